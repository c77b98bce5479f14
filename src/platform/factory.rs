//! Repository service construction

use crate::auth::GitHubAuthConfig;
use crate::error::Result;
use crate::platform::{GitHubService, RepositoryService};
use crate::types::RepoConfig;
use tracing::debug;

/// Create a GitHub-backed service for `repo`
pub fn create_repository_service(
    auth: &GitHubAuthConfig,
    repo: RepoConfig,
    api_base: Option<&str>,
) -> Result<Box<dyn RepositoryService>> {
    debug!(repo = %repo, api_base = ?api_base, "creating GitHub service");
    let service = GitHubService::new(&auth.token, repo, api_base)?;
    Ok(Box::new(service))
}
