//! CLI commands for prco

pub mod checkout;
mod context;
pub mod style;

use anstream::println;
use pr_checkout::checkout::{GitOperation, ProgressCallback};
use style::{Stylize, arrow, check};

/// Prints each operation before it runs
///
/// Git's own output follows on the inherited streams.
pub struct CliProgress;

impl ProgressCallback for CliProgress {
    fn on_step(&self, step: &GitOperation) {
        println!("{} {}", arrow(), step.to_string().muted());
    }

    fn on_message(&self, message: &str) {
        println!("{} {message}", check());
    }
}
