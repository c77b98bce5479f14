//! version-bump: keep a downstream OpenTelemetry Collector distribution in
//! step with upstream releases.
//!
//! One run compares the upstream `otelcol-contrib` release with the one the
//! fork was built against and, when upstream is newer, regenerates the
//! fork's builder manifest and compatibility docs and opens a pull request.

pub mod auth;
pub mod compat;
pub mod config;
pub mod error;
pub mod manifest;
pub mod platform;
pub mod sync;
pub mod types;
