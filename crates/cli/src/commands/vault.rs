use crate::pipeline::VaultPipeline;
use cf_vault_broker::{CloudControllerPlatform, HttpTransport, ReqwestTransport};
use cf_vault_config::{ConfigLoader, RuntimeSettings};
use cf_vault_core::{Error, Result};
use cf_vault_exec::CommandExecutorFactory;
use std::sync::Arc;

pub const MISSING_SERVICE_HINT: &str = "need at least one arg, the name of the vault instance. \
     Create one with: cf create-service hashicorp-vault shared my-vault";

/// Execute `vault` against the broker-provided Vault of `service`
pub async fn execute(
    runtime: RuntimeSettings,
    service: Option<String>,
    args: Vec<String>,
) -> Result<()> {
    let service = service
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::usage(MISSING_SERVICE_HINT))?;

    let config = ConfigLoader::new().runtime(runtime).load()?;

    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new());
    let platform = CloudControllerPlatform::new(config.session.clone(), Arc::clone(&transport));
    let executor = CommandExecutorFactory::system();

    VaultPipeline::new(
        &platform,
        transport,
        executor.as_ref(),
        config.runtime.vault_binary.as_str(),
    )
    .run(&service, &args)
    .await?;

    Ok(())
}
