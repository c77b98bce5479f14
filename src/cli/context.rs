//! Shared command context for CLI commands

use chrono::Datelike;
use version_bump::auth::GitHubAuthConfig;
use version_bump::config::SyncConfig;
use version_bump::error::Result;
use version_bump::platform::{RepositoryService, create_repository_service};

/// Services and settings for one sync run
///
/// Both repository services are built from the same token up front and
/// handed to the pipeline; nothing is global.
pub struct CommandContext {
    /// Upstream release repository (read-only)
    pub upstream: Box<dyn RepositoryService>,
    /// Downstream fork (read and write)
    pub downstream: Box<dyn RepositoryService>,
    /// Calendar year the run targets
    pub year: i32,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(config: &SyncConfig, auth: &GitHubAuthConfig) -> Result<Self> {
        let api_base = config.api_base.as_deref();
        let upstream = create_repository_service(auth, config.upstream.repo_config(), api_base)?;
        let downstream =
            create_repository_service(auth, config.downstream.repo_config(), api_base)?;

        Ok(Self {
            upstream,
            downstream,
            year: chrono::Local::now().year(),
        })
    }
}
