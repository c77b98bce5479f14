//! Terminal styling helpers
//!
//! Colors are only emitted when stdout supports them (honors `NO_COLOR`).

use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;

/// Success check mark
pub const CHECK: &str = "✓";

/// Semantic styles for CLI output
pub trait Stylize {
    /// Bold, for headings
    fn emphasis(&self) -> String;
    /// Cyan, for names and versions
    fn accent(&self) -> String;
    /// Dimmed, for secondary text
    fn muted(&self) -> String;
    /// Green, for completed work
    fn success(&self) -> String;
    /// Yellow, for skipped work
    fn warn(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn emphasis(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.bold())
            .to_string()
    }

    fn accent(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.cyan())
            .to_string()
    }

    fn muted(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string()
    }

    fn success(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.green())
            .to_string()
    }

    fn warn(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.yellow())
            .to_string()
    }
}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Styled arrow for step lists
pub fn arrow() -> String {
    "→".muted()
}
