use crate::commands::Commands;
use cf_vault_config::RuntimeSettings;
use cf_vault_core::Result;

impl Commands {
    pub async fn execute(self, runtime: RuntimeSettings) -> Result<()> {
        match self {
            Commands::Vault { service, args } => {
                crate::commands::vault::execute(runtime, service, args).await
            }
        }
    }
}
