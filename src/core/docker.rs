//! docker compose invocation.

use std::path::Path;
use std::process::Command;

use crate::error::{Result, SurgeError};

/// Run `docker compose up -d`, optionally against a specific compose file and
/// a set of profiles.
pub fn compose_up(file: Option<&Path>, profiles: &[String]) -> Result<()> {
    let docker =
        which::which("docker").map_err(|_| SurgeError::Docker("docker not found in PATH".into()))?;

    let mut cmd = Command::new(docker);
    cmd.arg("compose");
    if let Some(file) = file {
        cmd.arg("-f").arg(file);
    }
    for profile in profiles {
        cmd.args(["--profile", profile]);
    }
    cmd.args(["up", "-d"]);

    tracing::info!(?profiles, "running docker compose up");
    let status = cmd.status()?;
    if !status.success() {
        return Err(SurgeError::Docker(format!(
            "docker compose exited with {status}"
        )));
    }
    Ok(())
}
