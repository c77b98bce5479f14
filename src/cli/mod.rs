//! CLI commands

mod context;
mod local;
mod style;
mod upstream;

pub use local::run_local;
pub use upstream::run_upstream;

use async_trait::async_trait;
use style::{Stylize, arrow};
use version_bump::sync::ProgressCallback;

/// Prints publish progress as indented lines on stdout
pub struct CliProgress {
    indent: usize,
}

impl CliProgress {
    /// Progress printer for single-line steps
    pub const fn compact() -> Self {
        Self { indent: 2 }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_message(&self, message: &str) {
        anstream::println!("{:indent$}{} {}", "", arrow(), message.muted(), indent = self.indent);
    }
}
