//! Service key retrieval
//!
//! Lists the service keys bound to an instance through the platform API and
//! turns the first one into a [`CredentialRecord`].

use crate::decode::null_as_default;
use crate::transport::HttpTransport;
use cf_vault_core::{CredentialRecord, Error, Result, SecretToken, ServiceInstance};
use serde::Deserialize;
use std::sync::Arc;
use url::Url;

/// Subset of `GET /v2/service_instances/:guid/service_keys` that is consumed
#[derive(Debug, Default, Deserialize)]
struct ServiceKeys {
    #[serde(default, deserialize_with = "null_as_default")]
    resources: Vec<ServiceKeyResource>,
}

#[derive(Debug, Default, Deserialize)]
struct ServiceKeyResource {
    #[serde(default, deserialize_with = "null_as_default")]
    entity: ServiceKeyEntity,
}

#[derive(Debug, Default, Deserialize)]
struct ServiceKeyEntity {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    credentials: BrokerCredentials,
}

#[derive(Debug, Default, Deserialize)]
struct BrokerCredentials {
    #[serde(rename = "Address", default, deserialize_with = "null_as_default")]
    address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    auth: BrokerAuth,
    #[serde(default, deserialize_with = "null_as_default")]
    backends: Backends,
    #[serde(rename = "backends_shared", default, deserialize_with = "null_as_default")]
    shared_backends: SharedBackends,
}

#[derive(Debug, Default, Deserialize)]
struct BrokerAuth {
    #[serde(default, deserialize_with = "null_as_default")]
    token: String,
}

#[derive(Debug, Default, Deserialize)]
struct Backends {
    #[serde(default, deserialize_with = "null_as_default")]
    generic: String,
}

#[derive(Debug, Default, Deserialize)]
struct SharedBackends {
    #[serde(default, deserialize_with = "null_as_default")]
    organization: String,
    #[serde(default, deserialize_with = "null_as_default")]
    space: String,
}

impl From<ServiceKeyEntity> for CredentialRecord {
    fn from(entity: ServiceKeyEntity) -> Self {
        let creds = entity.credentials;
        CredentialRecord {
            name: entity.name,
            address: creds.address,
            token: SecretToken::new(creds.auth.token),
            generic_backend_path: creds.backends.generic,
            shared_org_path: creds.shared_backends.organization,
            shared_space_path: creds.shared_backends.space,
        }
    }
}

/// Build `{api_base}/v2/service_instances/{guid}/service_keys`, escaping the guid
pub fn service_keys_url(api_base: &str, instance_guid: &str) -> Result<Url> {
    let mut url = Url::parse(api_base)
        .map_err(|e| Error::endpoint(format!("invalid API endpoint '{api_base}': {e}")))?;
    url.path_segments_mut()
        .map_err(|()| Error::endpoint(format!("API endpoint '{api_base}' cannot be a base URL")))?
        .pop_if_empty()
        .extend(["v2", "service_instances", instance_guid, "service_keys"]);
    Ok(url)
}

/// Fetches and decodes the service key of a service instance
pub struct CredentialFetcher {
    transport: Arc<dyn HttpTransport>,
}

impl CredentialFetcher {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Fetch the credentials of the first service key bound to `instance`
    ///
    /// `token` is sent as the `Authorization` header unchanged, so it must
    /// already carry its scheme (`bearer ...`).
    ///
    /// # Errors
    /// * `Endpoint` - `api_base` is not a usable URL
    /// * `Transport` - the request could not be completed
    /// * `UnexpectedStatus` - anything but 200 came back; the body is not read as credentials
    /// * `Decode` - the body is not a service key listing
    /// * `NoServiceKey` - the listing is empty
    pub async fn fetch(
        &self,
        instance: &ServiceInstance,
        token: &str,
        api_base: &str,
    ) -> Result<CredentialRecord> {
        let url = service_keys_url(api_base, &instance.guid)?;
        let response = self.transport.get(&url, token).await?;

        if !response.is_ok() {
            return Err(Error::unexpected_status(url.as_str(), response.status_text));
        }

        let keys = serde_json::from_slice::<Option<ServiceKeys>>(&response.body)
            .map_err(|e| Error::decode("service keys", e))?
            .unwrap_or_default();

        let total = keys.resources.len();
        let Some(first) = keys.resources.into_iter().next() else {
            return Err(Error::no_service_key(&instance.name));
        };
        if total > 1 {
            tracing::debug!(ignored = total - 1, "Multiple service keys found, using the first");
        }

        let record = CredentialRecord::from(first.entity);
        note_empty_backends(&record);

        tracing::info!(
            "Using Vault instance: {} with service key: {}",
            instance.name,
            record.name
        );

        Ok(record)
    }
}

fn note_empty_backends(record: &CredentialRecord) {
    for (field, value) in [
        ("backends.generic", &record.generic_backend_path),
        ("backends_shared.organization", &record.shared_org_path),
        ("backends_shared.space", &record.shared_space_path),
    ] {
        if value.is_empty() {
            tracing::debug!(field, "Service key has an empty backend path");
        }
    }
}
