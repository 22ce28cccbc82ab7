//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::generate;

use crate::error::Result;

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = super::Cli::command();
    let name = cmd.get_name().to_string();
    let mut out = std::io::stdout();

    match shell {
        Shell::Bash => generate(clap_complete::shells::Bash, &mut cmd, name, &mut out),
        Shell::Zsh => generate(clap_complete::shells::Zsh, &mut cmd, name, &mut out),
        Shell::Fish => generate(clap_complete::shells::Fish, &mut cmd, name, &mut out),
        Shell::PowerShell => generate(clap_complete::shells::PowerShell, &mut cmd, name, &mut out),
    }

    Ok(())
}
