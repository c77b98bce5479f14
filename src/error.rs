//! Error types for version-bump

use thiserror::Error;

/// Errors produced by the sync pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unusable credentials
    #[error("authentication error: {0}")]
    Auth(String),

    /// Invalid configuration file or value
    #[error("configuration error: {0}")]
    Config(String),

    /// GitHub API call failed
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Generic repository service failure (used by non-GitHub services)
    #[error("platform error: {0}")]
    Platform(String),

    /// Manifest has an unexpected shape
    #[error("manifest error: {0}")]
    Manifest(String),

    /// Compatibility document has an unexpected shape
    #[error("compatibility document error: {0}")]
    Compatibility(String),

    /// String is not a semantic version
    #[error("invalid version '{0}'")]
    InvalidVersion(String),

    /// YAML parse or serialize failure
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
