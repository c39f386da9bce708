//! Configuration loader for cf-vault
//!
//! Locates the platform session file, parses it and combines it with the
//! runtime settings taken from the environment.

use crate::{
    config::{Config, RuntimeSettings},
    session::CfSession,
};
use cf_vault_core::{
    constants::{CF_CONFIG_DIR, CF_CONFIG_FILENAME, CF_HOME_VAR},
    Error, Result,
};
use std::path::{Path, PathBuf};

/// Configuration loader that handles all startup configuration
pub struct ConfigLoader {
    /// Directory containing `.cf/config.json` (defaults to `$CF_HOME`, then `$HOME`)
    cf_home: Option<PathBuf>,
    /// Runtime settings to apply
    runtime: Option<RuntimeSettings>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            cf_home: None,
            runtime: None,
        }
    }

    /// Set the directory the session file is read from
    pub fn cf_home(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cf_home = Some(dir.into());
        self
    }

    /// Set runtime settings instead of reading them from the environment
    pub fn runtime(mut self, runtime: RuntimeSettings) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Load the configuration
    pub fn load(self) -> Result<Config> {
        let cf_home = match self.cf_home {
            Some(dir) => dir,
            None => default_cf_home()?,
        };
        let session_path = session_file_path(&cf_home);
        let session = load_session(&session_path)?;
        let runtime = self.runtime.unwrap_or_else(RuntimeSettings::from_env);

        tracing::debug!(
            path = %session_path.display(),
            space = %session.target_label(),
            "Loaded platform session"
        );

        Ok(Config::new(session, runtime))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// `$CF_HOME` when set, the user's home directory otherwise
fn default_cf_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CF_HOME_VAR).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .ok_or_else(|| Error::configuration("could not determine home directory, set CF_HOME"))
}

/// Location of the session file below a CF home directory
pub fn session_file_path(cf_home: &Path) -> PathBuf {
    cf_home.join(CF_CONFIG_DIR).join(CF_CONFIG_FILENAME)
}

fn load_session(path: &Path) -> Result<CfSession> {
    if !path.exists() {
        return Err(Error::configuration(format!(
            "no platform session found at '{}'. Use 'cf login' to log in",
            path.display()
        )));
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::file_system(path, "read", e))?;
    CfSession::from_json(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn write_session(dir: &Path, contents: &str) {
        let cf_dir = dir.join(".cf");
        std::fs::create_dir_all(&cf_dir).unwrap();
        std::fs::write(cf_dir.join("config.json"), contents).unwrap();
    }

    #[test]
    fn test_load_from_explicit_home() {
        let temp_dir = TempDir::new().unwrap();
        write_session(
            temp_dir.path(),
            r#"{"Target":"https://api.example.com","AccessToken":"bearer abc","SpaceFields":{"GUID":"s-1","Name":"dev"}}"#,
        );

        let config = ConfigLoader::new()
            .cf_home(temp_dir.path())
            .runtime(RuntimeSettings::default())
            .load()
            .unwrap();

        assert_eq!(config.session.api_endpoint().unwrap(), "https://api.example.com");
        assert_eq!(config.session.space_guid().unwrap(), "s-1");
        assert_eq!(config.runtime, RuntimeSettings::default());
    }

    #[test]
    fn test_missing_session_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = ConfigLoader::new()
            .cf_home(temp_dir.path())
            .runtime(RuntimeSettings::default())
            .load()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("cf login"));
    }

    #[test]
    #[serial]
    fn test_cf_home_from_environment() {
        let temp_dir = TempDir::new().unwrap();
        write_session(temp_dir.path(), r#"{"Target":"https://api.env.example.com"}"#);

        let previous = std::env::var_os("CF_HOME");
        std::env::set_var("CF_HOME", temp_dir.path());
        let result = ConfigLoader::new().runtime(RuntimeSettings::default()).load();
        match previous {
            Some(value) => std::env::set_var("CF_HOME", value),
            None => std::env::remove_var("CF_HOME"),
        }

        let config = result.unwrap();
        assert_eq!(config.session.api_endpoint().unwrap(), "https://api.env.example.com");
    }
}
