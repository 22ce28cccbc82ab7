//! Per-run step tally.
//!
//! Failures are non-fatal by design: each step is recorded, printed as a
//! checklist, and summarized as `ok/total steps succeeded` at the end.

use crate::cli::output;
use crate::core::http::WireOutcome;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Passed,
    Skipped(String),
    Failed(String),
}

/// Step checklist for one service run.
#[derive(Debug)]
pub struct Report {
    name: String,
    steps: Vec<(String, StepOutcome)>,
}

impl Report {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pass(&mut self, label: &str) {
        self.steps.push((label.to_string(), StepOutcome::Passed));
    }

    pub fn skip(&mut self, label: &str, reason: impl Into<String>) {
        self.steps
            .push((label.to_string(), StepOutcome::Skipped(reason.into())));
    }

    pub fn fail(&mut self, label: &str, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(service = %self.name, step = label, "step failed: {reason}");
        self.steps
            .push((label.to_string(), StepOutcome::Failed(reason)));
    }

    /// Fold a wiring result into the tally: created passes, an entry that was
    /// already there is a skip, an error is a non-fatal failure.
    pub fn record_wire(&mut self, label: &str, outcome: Result<WireOutcome>) {
        match outcome {
            Ok(WireOutcome::Created) => self.pass(label),
            Ok(WireOutcome::AlreadyConfigured) => self.skip(label, "already configured"),
            Err(err) => self.fail(label, err.to_string()),
        }
    }

    pub fn passed(&self) -> usize {
        self.steps
            .iter()
            .filter(|(_, o)| matches!(o, StepOutcome::Passed | StepOutcome::Skipped(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.steps
            .iter()
            .filter(|(_, o)| matches!(o, StepOutcome::Failed(_)))
            .count()
    }

    pub fn total(&self) -> usize {
        self.steps.len()
    }

    pub fn succeeded(&self) -> bool {
        self.failed() == 0
    }

    /// Print the checklist and the final tally line.
    pub fn print(&self) {
        output::section(&self.name);
        for (label, outcome) in &self.steps {
            match outcome {
                StepOutcome::Passed => output::success(label),
                StepOutcome::Skipped(reason) => output::warn(&format!("{label} ({reason})")),
                StepOutcome::Failed(reason) => output::failure(&format!("{label}: {reason}")),
            }
        }
        output::blank();
        output::dimmed(&format!(
            "{}/{} steps succeeded",
            self.passed(),
            self.total()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_outcomes() {
        let mut report = Report::new("Radarr");
        report.pass("service ready");
        report.skip("download client NZBGet", "already configured");
        report.fail("root folder", "500 from api");

        assert_eq!(report.passed(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.total(), 3);
        assert!(!report.succeeded());
    }

    #[test]
    fn record_wire_maps_outcomes() {
        let mut report = Report::new("Sonarr");
        report.record_wire("client", Ok(WireOutcome::Created));
        report.record_wire("client again", Ok(WireOutcome::AlreadyConfigured));
        report.record_wire(
            "broken",
            Err(crate::error::SurgeError::Config("nope".into())),
        );

        assert_eq!(report.passed(), 2);
        assert_eq!(report.failed(), 1);
    }
}
