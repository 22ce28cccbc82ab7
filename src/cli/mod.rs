//! Command-line interface.

pub mod audit;
pub mod completions;
pub mod configure;
pub mod deploy;
pub mod monitor;
pub mod output;
pub mod status;
pub mod wizard;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Surge - wire a self-hosted media stack together.
#[derive(Parser)]
#[command(
    name = "surge",
    about = "Configuration automation for a self-hosted media stack",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging (same as SURGE_LOG=surge=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a .env file (default: ./.env)
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Configure one service, or every enabled one
    Configure {
        /// Service slug (radarr, sonarr, ...) or "all"
        service: String,
    },

    /// Connectivity checklist for every enabled service
    Status,

    /// Security posture checklist
    Audit,

    /// Run the setup-wizard HTTP backend
    Wizard {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Bind port
        #[arg(long, default_value_t = 8484)]
        port: u16,
    },

    /// Bring the stack up with docker compose
    Deploy {
        /// Compose profiles to enable
        #[arg(long)]
        profile: Vec<String>,
        /// Compose file (default: docker's own lookup)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Re-run the status probes on an interval and log transitions
    Monitor {
        /// Seconds between iterations
        #[arg(long, default_value_t = 300)]
        interval: u64,
        /// Run a single iteration and exit
        #[arg(long)]
        once: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: completions::Shell,
    },
}

/// Execute a command.
pub fn execute(command: Command, env_file: Option<PathBuf>) -> crate::error::Result<()> {
    use crate::core::env::Env;

    let env = Env::load(env_file.as_deref())?;

    match command {
        Command::Configure { service } => configure::execute(&service, &env),
        Command::Status => status::execute(&env),
        Command::Audit => audit::execute(&env),
        Command::Wizard { host, port } => wizard::execute(&host, port, &env),
        Command::Deploy { profile, file } => deploy::execute(file.as_deref(), &profile),
        Command::Monitor { interval, once } => monitor::execute(&env, interval, once),
        Command::Completions { shell } => completions::execute(shell),
    }
}
