//! Repository services
//!
//! Provides the narrow slice of the hosting API the sync job needs: reading
//! files, creating a branch, committing files to it and opening a PR.

mod factory;
mod github;

pub use factory::create_repository_service;
pub use github::{GitHubService, decode_content};

use crate::error::Result;
use crate::types::{DirEntry, FileChange, PullRequest, RemoteFile, RepoConfig};
use async_trait::async_trait;

/// Repository service trait for file and PR operations
///
/// One service instance is bound to one repository. The pipeline reads from
/// an upstream service and reads/writes through a downstream service.
#[async_trait]
pub trait RepositoryService: Send + Sync {
    /// Read a file, optionally at a branch or commit (`None` = default branch)
    async fn get_file(&self, path: &str, git_ref: Option<&str>) -> Result<RemoteFile>;

    /// Read the repository's README, wherever it lives
    async fn get_readme(&self, git_ref: Option<&str>) -> Result<RemoteFile>;

    /// List the entries of a directory on the default branch
    async fn list_directory(&self, path: &str) -> Result<Vec<DirEntry>>;

    /// Check whether a branch exists
    async fn branch_exists(&self, branch: &str) -> Result<bool>;

    /// Resolve the tip commit SHA of a branch
    async fn get_branch_sha(&self, branch: &str) -> Result<String>;

    /// Create a branch pointing at `sha`
    async fn create_branch(&self, branch: &str, sha: &str) -> Result<()>;

    /// Overwrite an existing file on `branch`; `sha` is the current blob SHA
    async fn update_file(&self, change: &FileChange, sha: &str, branch: &str) -> Result<()>;

    /// Add a new file on `branch`
    async fn create_file(&self, change: &FileChange, branch: &str) -> Result<()>;

    /// Open a pull request from `head` into `base`
    async fn create_pr(&self, head: &str, base: &str, title: &str, body: &str)
    -> Result<PullRequest>;

    /// Repository this service is bound to
    fn config(&self) -> &RepoConfig;
}
