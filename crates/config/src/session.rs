//! Platform CLI session file
//!
//! The `cf` CLI persists the login state in `$CF_HOME/.cf/config.json`. Only a
//! handful of its fields matter here: the API endpoint, the access token and
//! the targeted organization and space.

use cf_vault_core::{Error, Result, SecretToken};
use serde::Deserialize;

/// On-disk shape of the session file; unknown fields are ignored
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SessionFile {
    #[serde(default)]
    target: String,
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    organization_fields: TargetFields,
    #[serde(default)]
    space_fields: TargetFields,
}

#[derive(Debug, Default, Deserialize)]
struct TargetFields {
    #[serde(rename = "GUID", default)]
    guid: String,
    #[serde(rename = "Name", default)]
    name: String,
}

/// The current platform login, as left behind by `cf login` and `cf target`
#[derive(Debug, Clone)]
pub struct CfSession {
    target: String,
    access_token: SecretToken,
    organization_name: String,
    space_guid: String,
    space_name: String,
}

impl CfSession {
    /// Build a session from its parts
    pub fn new(
        target: impl Into<String>,
        access_token: impl Into<String>,
        space_guid: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            access_token: SecretToken::new(access_token),
            organization_name: String::new(),
            space_guid: space_guid.into(),
            space_name: String::new(),
        }
    }

    /// Parse the contents of a session file
    pub fn from_json(contents: &str) -> Result<Self> {
        let file: SessionFile = serde_json::from_str(contents)?;
        Ok(Self {
            target: file.target,
            access_token: SecretToken::new(file.access_token),
            organization_name: file.organization_fields.name,
            space_guid: file.space_fields.guid,
            space_name: file.space_fields.name,
        })
    }

    /// API endpoint the CLI is logged in to
    pub fn api_endpoint(&self) -> Result<&str> {
        if self.target.is_empty() {
            return Err(Error::endpoint("no API endpoint set. Use 'cf login' or 'cf api'"));
        }
        Ok(self.target.trim_end_matches('/'))
    }

    /// Access token, including its scheme prefix
    pub fn access_token(&self) -> Result<&SecretToken> {
        if self.access_token.is_empty() {
            return Err(Error::auth_token("not logged in. Use 'cf login' to log in"));
        }
        Ok(&self.access_token)
    }

    /// GUID of the targeted space
    pub fn space_guid(&self) -> Result<&str> {
        if self.space_guid.is_empty() {
            return Err(Error::configuration(
                "no space targeted, use 'cf target -s SPACE'",
            ));
        }
        Ok(&self.space_guid)
    }

    /// Human readable `org/space` label for diagnostics
    #[must_use]
    pub fn target_label(&self) -> String {
        format!("{}/{}", self.organization_name, self.space_name)
    }
}
