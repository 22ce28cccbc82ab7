//! Deploy command - docker compose up.

use std::path::Path;

use crate::cli::output;
use crate::core::docker;
use crate::error::Result;

pub fn execute(file: Option<&Path>, profiles: &[String]) -> Result<()> {
    docker::compose_up(file, profiles)?;

    if profiles.is_empty() {
        output::success("stack is up");
    } else {
        output::success(&format!("stack is up (profiles: {})", profiles.join(", ")));
    }
    output::hint(&format!(
        "run {} once the containers settle",
        output::cmd("surge configure all")
    ));
    Ok(())
}
