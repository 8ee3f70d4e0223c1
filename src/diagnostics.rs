// ABOUTME: Diagnostics accumulator for non-fatal warnings during a command.
// ABOUTME: Collects warnings that shouldn't fail a command but should be shown to users.

use crate::types::DeploymentId;

/// Collects non-fatal warnings during command execution.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during a command.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Deployments dropped by a state filter because they have no status yet.
    pub fn missing_status(ids: &[DeploymentId]) -> Self {
        let list = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            kind: WarningKind::MissingStatus,
            message: format!("skipped {} deployment(s) without a status: {list}", ids.len()),
        }
    }

    /// The excluded deployment was not among the targets anyway.
    pub fn except_not_targeted(id: DeploymentId) -> Self {
        Self {
            kind: WarningKind::ExceptNotTargeted,
            message: format!("excluded deployment {id} was not among the matching deployments"),
        }
    }
}

/// Categories of warnings that can occur during a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Deployment has no status, so it cannot match a state filter.
    MissingStatus,
    /// `--except` named a deployment that would not have been touched.
    ExceptNotTargeted,
}
