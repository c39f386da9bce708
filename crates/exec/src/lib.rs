//! Running the secrets tool
//!
//! [`CommandExecutor`] abstracts process spawning so the launcher can be
//! exercised without starting real processes; [`ProcessLauncher`] injects the
//! Vault credentials and turns an unsuccessful exit into an error.

pub mod command_executor;
pub mod launcher;

pub use command_executor::{CommandExecutor, CommandExecutorFactory, SystemCommandExecutor};
pub use launcher::{vault_environment, ProcessLauncher};
