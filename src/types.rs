//! Core types for version-bump

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A release version such as `v0.70.0`
///
/// The leading `v` is optional when parsing and always present when
/// displayed. Ordering follows semantic versioning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseVersion(semver::Version);

impl ReleaseVersion {
    /// Parse `vX.Y.Z` or `X.Y.Z`
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
        semver::Version::parse(bare)
            .map(Self)
            .map_err(|_| Error::InvalidVersion(input.to_string()))
    }

    /// Version without the leading `v` (e.g. `0.70.0`)
    pub fn number(&self) -> String {
        self.0.to_string()
    }
}

impl FromStr for ReleaseVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

/// How overlay component versions are treated during reconciliation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GomodSyncStrategy {
    /// Keep overlay module versions exactly as authored
    #[default]
    Remain,
    /// Rewrite overlay module versions to the upstream release
    Sync,
}

impl fmt::Display for GomodSyncStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remain => write!(f, "remain"),
            Self::Sync => write!(f, "sync"),
        }
    }
}

/// Repository coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepoConfig {
    /// Create repository coordinates
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A file read from a remote repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Path within the repository
    pub path: String,
    /// Blob SHA (needed to update the file later)
    pub sha: String,
    /// Decoded UTF-8 content
    pub content: String,
}

/// An entry of a remote directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File or directory name
    pub name: String,
    /// Path within the repository
    pub path: String,
}

/// Whether a change overwrites an existing file or adds a new one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// File exists on the base branch
    Update,
    /// File is new
    Create,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update => write!(f, "update"),
            Self::Create => write!(f, "create"),
        }
    }
}

/// A single file commit to push
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Path within the repository
    pub path: String,
    /// New file content
    pub content: String,
    /// Commit message
    pub message: String,
    /// Update or create
    pub kind: ChangeKind,
}

/// A pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
}
