//! The `vault` command pipeline: resolve, fetch, rewrite, launch
//!
//! Each stage runs to completion before the next one starts and every
//! failure ends the invocation. All external collaborators are injected so
//! the whole flow can run against doubles.

use cf_vault_broker::{rewrite, CredentialFetcher, HttpTransport, Platform, ServiceResolver};
use cf_vault_core::Result;
use cf_vault_exec::{CommandExecutor, ProcessLauncher};
use std::process::ExitStatus;
use std::sync::Arc;

pub struct VaultPipeline<'a> {
    platform: &'a dyn Platform,
    transport: Arc<dyn HttpTransport>,
    executor: &'a dyn CommandExecutor,
    vault_binary: String,
}

impl<'a> VaultPipeline<'a> {
    pub fn new(
        platform: &'a dyn Platform,
        transport: Arc<dyn HttpTransport>,
        executor: &'a dyn CommandExecutor,
        vault_binary: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            transport,
            executor,
            vault_binary: vault_binary.into(),
        }
    }

    /// Run the secrets tool for `service` with `args` after alias expansion
    pub async fn run(&self, service: &str, args: &[String]) -> Result<ExitStatus> {
        let instance = ServiceResolver::new(self.platform).resolve(service).await?;
        let token = self.platform.current_access_token()?;
        let api_endpoint = self.platform.current_api_endpoint()?;

        let creds = CredentialFetcher::new(Arc::clone(&self.transport))
            .fetch(&instance, token.expose(), &api_endpoint)
            .await?;

        let rewritten = rewrite(args, &creds);

        ProcessLauncher::new(self.executor, self.vault_binary.as_str())
            .launch(&rewritten, &creds)
            .await
    }
}
