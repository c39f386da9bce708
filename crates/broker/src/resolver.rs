//! Service name to instance resolution

use crate::platform::Platform;
use cf_vault_core::{Error, Result, ServiceInstance};

/// Resolves a logical service name through the platform
pub struct ServiceResolver<'a> {
    platform: &'a dyn Platform,
}

impl<'a> ServiceResolver<'a> {
    pub fn new(platform: &'a dyn Platform) -> Self {
        Self { platform }
    }

    /// Resolve `name` to its service instance
    ///
    /// Any lookup failure is reported as `ServiceNotFound`.
    pub async fn resolve(&self, name: &str) -> Result<ServiceInstance> {
        let instance = self.platform.lookup_service(name).await.map_err(|e| match e {
            Error::ServiceNotFound { .. } => e,
            other => Error::service_not_found(name, other.to_string()),
        })?;

        tracing::debug!(service = %name, guid = %instance.guid, "Resolved service instance");
        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cf_vault_core::SecretToken;

    struct StaticPlatform {
        lookup: fn(&str) -> Result<ServiceInstance>,
    }

    #[async_trait]
    impl Platform for StaticPlatform {
        async fn lookup_service(&self, name: &str) -> Result<ServiceInstance> {
            (self.lookup)(name)
        }

        fn current_access_token(&self) -> Result<SecretToken> {
            Ok(SecretToken::new("bearer at"))
        }

        fn current_api_endpoint(&self) -> Result<String> {
            Ok("https://api.example.com".to_string())
        }
    }

    #[tokio::test]
    async fn test_resolve_known_service() {
        let platform = StaticPlatform {
            lookup: |name| Ok(ServiceInstance::new("inst-1", name)),
        };

        let instance = ServiceResolver::new(&platform).resolve("my-vault").await.unwrap();

        assert_eq!(instance.guid, "inst-1");
        assert_eq!(instance.name, "my-vault");
    }

    #[tokio::test]
    async fn test_resolve_passes_not_found_through() {
        let platform = StaticPlatform {
            lookup: |name| Err(Error::service_not_found(name, "no such instance")),
        };

        let err = ServiceResolver::new(&platform).resolve("ghost").await.unwrap_err();

        assert_eq!(err.to_string(), "error getting service 'ghost': no such instance");
    }

    #[tokio::test]
    async fn test_resolve_wraps_transport_failures() {
        let platform = StaticPlatform {
            lookup: |_| Err(Error::transport("https://api.example.com", "connection refused")),
        };

        let err = ServiceResolver::new(&platform).resolve("my-vault").await.unwrap_err();

        assert!(matches!(err, Error::ServiceNotFound { ref name, .. } if name == "my-vault"));
        assert!(err.to_string().contains("connection refused"));
    }
}
