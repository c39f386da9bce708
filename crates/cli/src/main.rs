use cf_vault::{logging, Commands};
use cf_vault_config::RuntimeSettings;
use clap::Parser;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cf-vault")]
#[command(
    about = "Plugin to make it easy to work with the service broker provided by Hashicorp Vault",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Log debug details to stderr (must come before the subcommand)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors (must come before the subcommand)
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let runtime = RuntimeSettings::from_env();
    logging::init(logging::effective_filter(
        &runtime.log_filter,
        cli.verbose,
        cli.quiet,
    ));

    match cli.command.execute(runtime).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(target: logging::FAILURE_TARGET, "{e}");
            let code = u8::try_from(e.exit_code())
                .ok()
                .filter(|code| *code != 0)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
