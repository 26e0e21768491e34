//! Checkout execution - effectful operations
//!
//! This module runs a `CheckoutPlan` (created by the pure planning
//! functions) one git command at a time.

use crate::checkout::plan::{CheckoutPlan, GitOperation};
use crate::error::{Error, Result};
use crate::repo::GitRunner;
use tracing::debug;

/// Receives progress updates while a plan runs
pub trait ProgressCallback {
    /// Called before an operation starts
    fn on_step(&self, step: &GitOperation);

    /// Free-form status message
    fn on_message(&self, message: &str);
}

/// Progress callback that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_step(&self, _step: &GitOperation) {}

    fn on_message(&self, _message: &str) {}
}

/// Result of checkout execution
#[derive(Debug, Default)]
pub struct CheckoutExecutionResult {
    /// Operations that completed, in order
    pub applied: Vec<GitOperation>,
    /// Operation that failed (if any)
    pub failed_step: Option<GitOperation>,
    /// Error from the failed operation (if any)
    pub error: Option<Error>,
}

impl CheckoutExecutionResult {
    /// Check if every planned operation ran
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed_step.is_none()
    }

    /// Surface the failure, if any, as an error
    ///
    /// Operations applied before the failure stay applied.
    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Execute the checkout plan (EFFECTFUL)
///
/// Runs operations strictly in order and stops at the first failure. There
/// is no retry and no rollback.
///
/// # Arguments
/// * `plan` - The checkout plan to execute
/// * `runner` - Runs each git command
/// * `progress` - Progress callback for status updates
pub fn execute_checkout(
    plan: &CheckoutPlan,
    runner: &dyn GitRunner,
    progress: &dyn ProgressCallback,
) -> CheckoutExecutionResult {
    let mut result = CheckoutExecutionResult::default();

    for step in &plan.steps {
        progress.on_step(step);

        if let Err(e) = runner.run(&step.to_git_args()) {
            debug!(%step, error = %e, "checkout step failed");
            result.failed_step = Some(step.clone());
            result.error = Some(e);
            break;
        }
        result.applied.push(step.clone());
    }

    if result.is_success() {
        progress.on_message(&format!("Switched to {}", plan.branch_name));
    }
    result
}
