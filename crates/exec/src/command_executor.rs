use async_trait::async_trait;
use cf_vault_core::types::{CommandArguments, EnvironmentVariables};
use cf_vault_core::{Error, Result};
#[cfg(test)]
use std::collections::HashMap;
use std::process::{ExitStatus, Stdio};

/// Trait for executing external commands
/// This abstraction allows for testing without mocking by providing
/// different implementations for production and test environments
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run a command attached to this process's stdin, stdout and stderr
    ///
    /// The child inherits the current environment with `env` applied on top.
    /// Returns once the child has exited.
    async fn run_inherited(
        &self,
        cmd: &str,
        args: &CommandArguments,
        env: &EnvironmentVariables,
    ) -> Result<ExitStatus>;
}

/// Production implementation that executes real commands
#[derive(Debug, Default)]
pub struct SystemCommandExecutor;

impl SystemCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for SystemCommandExecutor {
    async fn run_inherited(
        &self,
        cmd: &str,
        args: &CommandArguments,
        env: &EnvironmentVariables,
    ) -> Result<ExitStatus> {
        tracing::debug!(command = %cmd, args = ?args.as_slice(), "Spawning command");

        let mut child = tokio::process::Command::new(cmd)
            .args(args.as_slice())
            .envs(env.iter())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::subprocess_launch(cmd, e.to_string()))?;

        // The terminal delivers interrupts to the child as well; stay alive
        // until it has exited so its status can be reported.
        loop {
            tokio::select! {
                status = child.wait() => {
                    return status.map_err(|e| Error::subprocess_launch(cmd, e.to_string()));
                }
                signal = tokio::signal::ctrl_c() => {
                    if let Err(e) = signal {
                        tracing::debug!(error = %e, "Could not listen for interrupts");
                        return child
                            .wait()
                            .await
                            .map_err(|e| Error::subprocess_launch(cmd, e.to_string()));
                    }
                    tracing::debug!(command = %cmd, "Interrupt received, waiting for child");
                }
            }
        }
    }
}

/// Test implementation that simulates command execution
/// This provides deterministic behavior for testing
#[cfg(test)]
pub struct TestCommandExecutor {
    exit_codes: std::sync::Mutex<HashMap<String, i32>>,
    invocations: std::sync::Mutex<Vec<Invocation>>,
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub struct Invocation {
    pub cmd: String,
    pub args: Vec<String>,
    pub env: EnvironmentVariables,
}

#[cfg(test)]
impl Default for TestCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl TestCommandExecutor {
    pub fn new() -> Self {
        Self {
            exit_codes: std::sync::Mutex::new(HashMap::new()),
            invocations: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Make `cmd` exit with `code`; unknown commands fail to launch
    pub fn add_exit_code(&self, cmd: &str, code: i32) {
        self.exit_codes
            .lock()
            .expect("test executor lock poisoned")
            .insert(cmd.to_string(), code);
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .expect("test executor lock poisoned")
            .clone()
    }
}

#[cfg(test)]
#[async_trait]
impl CommandExecutor for TestCommandExecutor {
    async fn run_inherited(
        &self,
        cmd: &str,
        args: &CommandArguments,
        env: &EnvironmentVariables,
    ) -> Result<ExitStatus> {
        let code = self
            .exit_codes
            .lock()
            .map_err(|e| Error::configuration(format!("Failed to lock test responses: {e}")))?
            .get(cmd)
            .copied();

        match code {
            Some(code) => {
                self.invocations
                    .lock()
                    .map_err(|e| Error::configuration(format!("Failed to lock invocations: {e}")))?
                    .push(Invocation {
                        cmd: cmd.to_string(),
                        args: args.as_slice().to_vec(),
                        env: env.clone(),
                    });
                Ok(exit_status::from_code(code))
            }
            None => Err(Error::subprocess_launch(
                cmd,
                "executable file not found in $PATH",
            )),
        }
    }
}

/// Factory for creating command executors
pub struct CommandExecutorFactory;

impl CommandExecutorFactory {
    /// Create a production command executor
    pub fn system() -> Box<dyn CommandExecutor> {
        Box::new(SystemCommandExecutor::new())
    }

    /// Create a test command executor
    #[cfg(test)]
    pub fn test() -> TestCommandExecutor {
        TestCommandExecutor::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_test_executor_records_invocation() {
        let executor = CommandExecutorFactory::test();
        executor.add_exit_code("vault", 0);

        let args = CommandArguments::from(vec!["status".to_string()]);
        let mut env = EnvironmentVariables::new();
        env.insert("VAULT_ADDR", "http://127.0.0.1:8200");

        let status = executor
            .run_inherited("vault", &args, &env)
            .await
            .expect("Failed to run vault");
        assert!(status.success());

        let invocations = executor.invocations();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].args, vec!["status"]);
        assert!(invocations[0].env.get("VAULT_ADDR").is_some());
    }

    #[tokio::test]
    async fn test_test_executor_missing_command() {
        let executor = CommandExecutorFactory::test();

        let result = executor
            .run_inherited("vault", &CommandArguments::default(), &EnvironmentVariables::new())
            .await;
        let err = result.expect_err("Expected launch error for unknown command");
        assert!(matches!(err, Error::SubprocessLaunch { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_executor_exit_status() {
        let executor = CommandExecutorFactory::system();
        let args = CommandArguments::from(vec!["-c".to_string(), "exit 3".to_string()]);

        let status = executor
            .run_inherited("sh", &args, &EnvironmentVariables::new())
            .await
            .expect("Failed to run sh");
        assert_eq!(status.code(), Some(3));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_executor_applies_env_overlay() {
        let executor = CommandExecutorFactory::system();
        let args = CommandArguments::from(vec![
            "-c".to_string(),
            "test \"$VAULT_ADDR\" = http://overlay && test -n \"$PATH\"".to_string(),
        ]);
        let mut env = EnvironmentVariables::new();
        env.insert("VAULT_ADDR", "http://overlay");

        let status = executor
            .run_inherited("sh", &args, &env)
            .await
            .expect("Failed to run sh");
        assert!(status.success(), "overlay missing or environment not inherited");
    }

    #[tokio::test]
    async fn test_system_executor_missing_binary() {
        let executor = CommandExecutorFactory::system();

        let err = executor
            .run_inherited(
                "definitely-not-a-real-binary-cf-vault",
                &CommandArguments::default(),
                &EnvironmentVariables::new(),
            )
            .await
            .expect_err("Expected launch failure");
        assert!(matches!(err, Error::SubprocessLaunch { .. }));
    }
}
