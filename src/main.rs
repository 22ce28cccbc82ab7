//! Surge - configuration automation for a self-hosted media stack.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use surge::cli::output;
use surge::cli::{execute, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("SURGE_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("surge=debug")
        } else {
            EnvFilter::new("surge=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command, cli.env_file) {
        let suggestion = match &e {
            surge::error::SurgeError::MissingCredential { path, .. } => Some(format!(
                "start the service once so it writes {}, then retry",
                output::path(&path.display().to_string())
            )),
            surge::error::SurgeError::NotReady { .. } => Some(format!(
                "check the container is running: {}",
                output::cmd("surge status")
            )),
            surge::error::SurgeError::Docker(_) => {
                Some("is docker installed and the compose file present?".to_string())
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
