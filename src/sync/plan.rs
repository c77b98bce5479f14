//! Sync planning - pure functions for creating sync plans
//!
//! No I/O happens here: the fetched contents go in, the files to commit and
//! the pull request to open come out.

use crate::compat::{compatibility_file_name, compatibility_file_path, update_documents};
use crate::config::SyncConfig;
use crate::error::Result;
use crate::manifest::reconcile;
use crate::sync::RepoContents;
use crate::types::{ChangeKind, FileChange, ReleaseVersion};
use std::fmt;

/// Body of every sync pull request
pub const PR_BODY: &str = "This PR was created automatically by the version bump job. \
If there are other PRs created by the job, please approve the oldest one.";

/// Branch carrying the sync for `version`
pub fn branch_name(version: &ReleaseVersion) -> String {
    format!("bump_up_otelcol_contrib_to_{}", version.number())
}

/// Pull request title for `version`
pub fn pr_title(version: &ReleaseVersion) -> String {
    format!("[chore] Bump up otel col contrib to {version}")
}

/// Result of comparing the live upstream release with downstream's record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionGate {
    /// Live upstream release
    pub upstream: ReleaseVersion,
    /// Release recorded in the downstream build manifest
    pub downstream: ReleaseVersion,
}

impl VersionGate {
    /// Sync only when upstream is strictly newer
    pub fn needs_sync(&self) -> bool {
        self.upstream > self.downstream
    }
}

/// Compare `dist.version` of the upstream and downstream manifests
pub fn check_versions(contents: &RepoContents) -> Result<VersionGate> {
    Ok(VersionGate {
        upstream: contents.upstream_manifest.dist_version()?,
        downstream: contents.downstream_manifest.dist_version()?,
    })
}

/// Sync plan - the functional core output
///
/// Created by [`create_sync_plan`] (pure) and executed by
/// [`execute_sync`](crate::sync::execute_sync) (effectful).
#[derive(Debug, Clone)]
pub struct SyncPlan {
    /// Upstream release being adopted
    pub upstream_version: ReleaseVersion,
    /// Downstream release documented in the year document
    pub downstream_version: String,
    /// Branch to create
    pub branch: String,
    /// Branch to fork from and target with the PR
    pub base_branch: String,
    /// PR title
    pub title: String,
    /// PR body
    pub body: String,
    /// Files to commit, in order
    pub changes: Vec<FileChange>,
}

impl fmt::Display for SyncPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "create branch {} from {}", self.branch, self.base_branch)?;
        for change in &self.changes {
            writeln!(f, "{} {}", change.kind, change.path)?;
        }
        write!(f, "open PR \"{}\"", self.title)
    }
}

/// Create a sync plan (PURE - no I/O, easily testable)
///
/// Produces, in commit order: the reconciled build manifest, the README and
/// the current year's compatibility document. The year document is created
/// when only the previous year's existed.
pub fn create_sync_plan(contents: &RepoContents, config: &SyncConfig) -> Result<SyncPlan> {
    let upstream_version = contents.upstream_manifest.dist_version()?;

    let manifest = reconcile(
        &contents.upstream_manifest,
        &contents.overlay_manifest,
        config.gomod_sync_strategy,
        &config.dist,
    )?;

    let docs_dir = &config.downstream.docs_dir;
    let documents = update_documents(
        &contents.readme.content,
        &contents.compatibility.content,
        &upstream_version,
        docs_dir,
        contents.current_year,
    )?;

    let manifest_path = &config.downstream.manifest_path;
    let manifest_file = manifest_path.rsplit('/').next().unwrap_or(manifest_path.as_str());
    let readme_file = contents
        .readme
        .path
        .rsplit('/')
        .next()
        .unwrap_or(contents.readme.path.as_str());
    let compatibility_name = compatibility_file_name(contents.current_year);
    let compatibility_kind = if contents.has_current_year_document() {
        ChangeKind::Update
    } else {
        ChangeKind::Create
    };

    let changes = vec![
        FileChange {
            path: manifest_path.clone(),
            content: manifest.render_generated()?,
            message: format!("update {manifest_file} to latest version"),
            kind: ChangeKind::Update,
        },
        FileChange {
            path: contents.readme.path.clone(),
            content: documents.readme,
            message: format!("update {readme_file}"),
            kind: ChangeKind::Update,
        },
        FileChange {
            path: compatibility_file_path(docs_dir, contents.current_year),
            content: documents.compatibility,
            message: format!("{compatibility_kind} {compatibility_name}"),
            kind: compatibility_kind,
        },
    ];

    Ok(SyncPlan {
        branch: branch_name(&upstream_version),
        title: pr_title(&upstream_version),
        body: PR_BODY.to_string(),
        base_branch: config.downstream.base_branch.clone(),
        downstream_version: documents.downstream_version,
        upstream_version,
        changes,
    })
}
