//! Credential discovery for Vault service-broker instances
//!
//! The flow is strictly forward: a service name is resolved to an instance
//! through the [`Platform`], the instance's first service key is fetched over
//! an [`HttpTransport`], and the resulting [`CredentialRecord`] drives the
//! rewriting of `cf_o/`, `cf_s/` and `cf_i/` aliases in user arguments.
//!
//! [`CredentialRecord`]: cf_vault_core::CredentialRecord

pub mod credentials;
mod decode;
pub mod platform;
pub mod resolver;
pub mod rewrite;
pub mod transport;

pub use credentials::{service_keys_url, CredentialFetcher};
pub use platform::{CloudControllerPlatform, Platform};
pub use resolver::ServiceResolver;
pub use rewrite::{rewrite, rewrite_arg, BackendScope, RewriteRule, REWRITE_RULES};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
