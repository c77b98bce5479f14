//! Local job - placeholder

use crate::cli::style::Stylize;
use tracing::warn;

/// Run the local sync job
///
/// Not implemented; reports that and exits successfully.
pub fn run_local() {
    warn!("the local job is not supported yet");
    anstream::println!("{}", "Local sync is not supported yet".muted());
}
