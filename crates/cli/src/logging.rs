use cf_vault_core::DEFAULT_LOG_FILTER;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Target of the one line reporting why an invocation failed
///
/// Stays enabled whatever filter is configured.
pub const FAILURE_TARGET: &str = "cf_vault::failure";

/// Install the stderr subscriber; stdout belongs to the secrets tool
pub fn init(filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_level(true)
                .with_target(false),
        )
        .with(build_filter(filter))
        .try_init();
}

fn build_filter(filter: &str) -> EnvFilter {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|e| {
        eprintln!("ignoring invalid log filter '{filter}': {e}");
        EnvFilter::new(DEFAULT_LOG_FILTER)
    });
    match format!("{FAILURE_TARGET}=error").parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Filter directive after applying `-v` / `-q`
pub fn effective_filter<'a>(configured: &'a str, verbose: bool, quiet: bool) -> &'a str {
    if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        configured
    }
}
