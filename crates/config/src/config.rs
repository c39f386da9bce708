//! Centralized configuration for cf-vault
//!
//! `Config` bundles the platform session with the runtime settings. It is
//! built once at startup and only read afterwards.

use crate::session::CfSession;
use cf_vault_core::constants::{
    CF_VAULT_BINARY_VAR, CF_VAULT_LOG_VAR, DEFAULT_LOG_FILTER, VAULT_BINARY,
};

/// Immutable configuration for a single invocation
#[derive(Debug, Clone)]
pub struct Config {
    /// Current platform login
    pub session: CfSession,

    /// Runtime configuration settings
    pub runtime: RuntimeSettings,
}

/// Runtime configuration settings that affect how cf-vault operates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    /// `tracing` filter directive
    pub log_filter: String,

    /// Secrets tool executable
    pub vault_binary: String,
}

impl Config {
    pub fn new(session: CfSession, runtime: RuntimeSettings) -> Self {
        Self { session, runtime }
    }
}

impl RuntimeSettings {
    /// Read overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            log_filter: lookup(CF_VAULT_LOG_VAR)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_filter),
            vault_binary: lookup(CF_VAULT_BINARY_VAR)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.vault_binary),
        }
    }
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            vault_binary: VAULT_BINARY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_runtime_settings_defaults() {
        let settings = RuntimeSettings::from_lookup(|_| None);
        assert_eq!(settings.log_filter, "info");
        assert_eq!(settings.vault_binary, "vault");
    }

    #[test]
    fn test_runtime_settings_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CF_VAULT_LOG", "debug"),
            ("CF_VAULT_BINARY", "/opt/vault/bin/vault"),
        ]
        .into_iter()
        .collect();
        let settings = RuntimeSettings::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(settings.log_filter, "debug");
        assert_eq!(settings.vault_binary, "/opt/vault/bin/vault");
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let settings = RuntimeSettings::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(settings, RuntimeSettings::default());
    }
}
