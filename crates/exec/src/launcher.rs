//! Secrets tool launcher

use crate::command_executor::CommandExecutor;
use cf_vault_core::{
    CommandArguments, CredentialRecord, EnvironmentVariables, Error, Result, VAULT_ADDR_VAR,
    VAULT_TOKEN_VAR,
};
use std::process::ExitStatus;

/// The two variables injected into the secrets tool's environment
#[must_use]
pub fn vault_environment(creds: &CredentialRecord) -> EnvironmentVariables {
    let mut env = EnvironmentVariables::new();
    env.insert(VAULT_TOKEN_VAR, creds.token.expose());
    env.insert(VAULT_ADDR_VAR, creds.address.as_str());
    env
}

/// Runs the secrets tool with credentials injected
pub struct ProcessLauncher<'a> {
    executor: &'a dyn CommandExecutor,
    binary: String,
}

impl<'a> ProcessLauncher<'a> {
    pub fn new(executor: &'a dyn CommandExecutor, binary: impl Into<String>) -> Self {
        Self {
            executor,
            binary: binary.into(),
        }
    }

    /// Run the tool with `args` verbatim and wait for it to finish
    ///
    /// # Errors
    /// * `SubprocessLaunch` - the tool could not be started
    /// * `SubprocessFailure` - the tool exited unsuccessfully; carries its exit code
    pub async fn launch(
        &self,
        args: &CommandArguments,
        creds: &CredentialRecord,
    ) -> Result<ExitStatus> {
        let env = vault_environment(creds);
        tracing::debug!(
            binary = %self.binary,
            args = ?args.as_slice(),
            vault_addr = %creds.address,
            "Launching secrets tool"
        );

        let status = self.executor.run_inherited(&self.binary, args, &env).await?;

        if !status.success() {
            return Err(Error::subprocess_failure(&self.binary, status.code()));
        }
        Ok(status)
    }
}
