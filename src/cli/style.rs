//! Terminal styling helpers

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;

/// Check mark used for completed work
pub const CHECK: &str = "✓";

/// Arrow used to list steps
pub const ARROW: &str = "→";

/// Semantic colors, applied only when the terminal supports them
pub trait Stylize: Display + Sized {
    /// De-emphasized text
    fn muted(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string()
    }

    /// Headings and labels
    fn emphasis(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.bold())
            .to_string()
    }

    /// Names the user should notice (branches, remotes, numbers)
    fn accent(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.cyan())
            .to_string()
    }

    /// Success messages
    fn success(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.green())
            .to_string()
    }

    /// Warnings
    fn warn(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.yellow())
            .to_string()
    }

    /// Errors (styled for stderr)
    fn error(&self) -> String {
        self.if_supports_color(Stream::Stderr, |t| t.red())
            .to_string()
    }
}

impl<T: Display> Stylize for T {}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Styled step arrow
pub fn arrow() -> String {
    ARROW.muted()
}

/// Spinner used while waiting on the network
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}
