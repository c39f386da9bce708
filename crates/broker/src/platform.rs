//! Host platform capability
//!
//! Everything cf-vault needs from the platform: the service instance behind a
//! name, the current access token and the API endpoint. The production
//! implementation talks to the Cloud Controller v2 API with the session the
//! `cf` CLI left behind.

use crate::decode::null_as_default;
use crate::transport::HttpTransport;
use async_trait::async_trait;
use cf_vault_config::CfSession;
use cf_vault_core::{Error, Result, SecretToken, ServiceInstance};
use serde::Deserialize;
use std::sync::Arc;
use url::Url;

/// Trait for the platform session the pipeline runs in
#[async_trait]
pub trait Platform: Send + Sync {
    /// Look up a service instance in the targeted space by name
    async fn lookup_service(&self, name: &str) -> Result<ServiceInstance>;

    /// Access token to send as the `Authorization` header, scheme included
    fn current_access_token(&self) -> Result<SecretToken>;

    /// Base URL of the platform API
    fn current_api_endpoint(&self) -> Result<String>;
}

#[derive(Debug, Default, Deserialize)]
struct ServiceInstances {
    #[serde(default, deserialize_with = "null_as_default")]
    resources: Vec<ServiceInstanceResource>,
}

#[derive(Debug, Default, Deserialize)]
struct ServiceInstanceResource {
    #[serde(default, deserialize_with = "null_as_default")]
    metadata: ResourceMetadata,
    #[serde(default, deserialize_with = "null_as_default")]
    entity: ServiceInstanceEntity,
}

#[derive(Debug, Default, Deserialize)]
struct ResourceMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    guid: String,
}

#[derive(Debug, Default, Deserialize)]
struct ServiceInstanceEntity {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
}

/// Platform backed by the Cloud Controller API and the local `cf` session
pub struct CloudControllerPlatform {
    session: CfSession,
    transport: Arc<dyn HttpTransport>,
}

impl CloudControllerPlatform {
    pub fn new(session: CfSession, transport: Arc<dyn HttpTransport>) -> Self {
        Self { session, transport }
    }

    /// `GET /v2/spaces/:space/service_instances?q=name:<name>`
    fn service_instances_url(&self, name: &str) -> Result<Url> {
        let api = self.session.api_endpoint()?;
        let space_guid = self.session.space_guid()?;

        let mut url = Url::parse(api)
            .map_err(|e| Error::endpoint(format!("invalid API endpoint '{api}': {e}")))?;
        url.path_segments_mut()
            .map_err(|()| Error::endpoint(format!("API endpoint '{api}' cannot be a base URL")))?
            .pop_if_empty()
            .extend(["v2", "spaces", space_guid, "service_instances"]);
        url.query_pairs_mut()
            .append_pair("q", &format!("name:{name}"))
            .append_pair("return_user_provided_service_instances", "true");
        Ok(url)
    }
}

#[async_trait]
impl Platform for CloudControllerPlatform {
    async fn lookup_service(&self, name: &str) -> Result<ServiceInstance> {
        let url = self.service_instances_url(name)?;
        let token = self.current_access_token()?;

        let response = self
            .transport
            .get(&url, token.expose())
            .await
            .map_err(|e| Error::service_not_found(name, e.to_string()))?;

        if !response.is_ok() {
            return Err(Error::service_not_found(
                name,
                format!("platform API returned {}", response.status_text),
            ));
        }

        let instances: ServiceInstances = serde_json::from_slice(&response.body)
            .map_err(|e| Error::service_not_found(name, format!("unreadable response: {e}")))?;

        instances
            .resources
            .into_iter()
            .find(|resource| resource.entity.name == name)
            .map(|resource| ServiceInstance::new(resource.metadata.guid, resource.entity.name))
            .ok_or_else(|| {
                Error::service_not_found(
                    name,
                    format!("service instance {name} not found in {}", self.session.target_label()),
                )
            })
    }

    fn current_access_token(&self) -> Result<SecretToken> {
        self.session.access_token().cloned()
    }

    fn current_api_endpoint(&self) -> Result<String> {
        self.session.api_endpoint().map(str::to_string)
    }
}
