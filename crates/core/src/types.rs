use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Wrapper type for environment variables with domain-specific operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariables(HashMap<String, String>);

impl EnvironmentVariables {
    /// Create a new empty environment
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Insert a variable, returning the previous value if any
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Get a variable by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&String> {
        self.0.get(key)
    }

    /// Iterate over the variables
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

/// Type-safe wrapper for command arguments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandArguments(Vec<String>);

impl CommandArguments {
    /// Get a slice of the arguments
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Deref for CommandArguments {
    type Target = Vec<String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<String>> for CommandArguments {
    fn from(args: Vec<String>) -> Self {
        Self(args)
    }
}

impl FromIterator<String> for CommandArguments {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Secure string type that zeroizes on drop and never prints its contents
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretToken(String);

impl SecretToken {
    /// Wrap a token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the raw token (be careful with the returned value)
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Check if the token is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretToken(****)")
    }
}

/// A provisioned service instance, looked up by name on every invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInstance {
    /// Platform-assigned identifier
    pub guid: String,
    /// Name the user refers to the instance by
    pub name: String,
}

impl ServiceInstance {
    #[must_use]
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
        }
    }
}

/// Connection details extracted from the first service key of an instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// Service key name, used for diagnostics only
    pub name: String,
    /// Base URL of the secret store
    pub address: String,
    /// Bearer credential for the secret store
    pub token: SecretToken,
    /// Prefix for instance-scoped secrets
    pub generic_backend_path: String,
    /// Prefix for organization-scoped shared secrets
    pub shared_org_path: String,
    /// Prefix for space-scoped shared secrets
    pub shared_space_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_token_debug_is_redacted() {
        let token = SecretToken::new("s.super-secret");
        assert_eq!(format!("{token:?}"), "SecretToken(****)");
        assert_eq!(token.expose(), "s.super-secret");
    }

    #[test]
    fn test_credential_record_debug_hides_token() {
        let record = CredentialRecord {
            name: "my-key".to_string(),
            address: "https://vault.example.com".to_string(),
            token: SecretToken::new("s.super-secret"),
            generic_backend_path: "cf/inst".to_string(),
            shared_org_path: "cf/org".to_string(),
            shared_space_path: "cf/space".to_string(),
        };
        let debug = format!("{record:?}");
        assert!(!debug.contains("s.super-secret"));
        assert!(debug.contains("my-key"));
    }

    #[test]
    fn test_environment_variables_insert_overrides() {
        let mut env = EnvironmentVariables::new();
        env.insert("VAULT_ADDR", "http://a");
        let previous = env.insert("VAULT_ADDR", "http://b");
        assert_eq!(previous.as_deref(), Some("http://a"));
        assert_eq!(env.get("VAULT_ADDR").map(String::as_str), Some("http://b"));
        assert_eq!(env.iter().count(), 1);
    }

    #[test]
    fn test_command_arguments_collect() {
        let args: CommandArguments = vec!["read".to_string(), "secret/x".to_string()]
            .into_iter()
            .collect();
        assert_eq!(args.len(), 2);
        assert_eq!(args.as_slice()[1], "secret/x");
    }
}
