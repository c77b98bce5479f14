//! Upstream sync engine
//!
//! Three phases, as for any change pushed to the fork:
//! 1. Fetch - read manifests and documents (effectful, read-only)
//! 2. Plan - version gate, reconcile, rewrite documents (pure, testable)
//! 3. Publish - branch, commits, pull request (effectful)
//!
//! [`run_upstream_sync`] wires them together with the version gate and the
//! duplicate-branch guard in between.

mod fetch;
mod plan;
mod publish;

pub use fetch::{RepoContents, fetch_contents};
pub use plan::{
    PR_BODY, SyncPlan, VersionGate, branch_name, check_versions, create_sync_plan, pr_title,
};
pub use publish::{PublishResult, execute_sync};

use crate::config::SyncConfig;
use crate::error::Result;
use crate::platform::RepositoryService;
use crate::types::ReleaseVersion;
use async_trait::async_trait;
use tracing::{info, warn};

/// Receives human-readable progress messages while publishing
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Report a progress message
    async fn on_message(&self, message: &str);
}

/// Progress sink that drops every message
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_message(&self, _message: &str) {}
}

/// Options for a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Plan everything but perform no remote writes
    pub dry_run: bool,
}

/// What a sync run did
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    /// Downstream already tracks the latest upstream release
    UpToDate {
        /// Live upstream release
        upstream: ReleaseVersion,
        /// Release recorded in the downstream manifest
        downstream: ReleaseVersion,
    },
    /// A branch for this release already exists
    AlreadyProposed {
        /// Live upstream release
        upstream: ReleaseVersion,
        /// Existing branch name
        branch: String,
    },
    /// Dry run: the plan that would have been published
    Planned(Box<SyncPlan>),
    /// Changes were pushed and a pull request opened
    Published {
        /// The executed plan
        plan: Box<SyncPlan>,
        /// Branch, commits and pull request
        result: PublishResult,
    },
}

/// Run the full upstream sync pipeline once
///
/// Stops without side effects when downstream is up to date or a branch for
/// the target release already exists.
pub async fn run_upstream_sync(
    upstream: &dyn RepositoryService,
    downstream: &dyn RepositoryService,
    config: &SyncConfig,
    year: i32,
    options: &SyncOptions,
    progress: &dyn ProgressCallback,
) -> Result<SyncOutcome> {
    let contents = fetch_contents(upstream, downstream, config, year).await?;

    let gate = check_versions(&contents)?;
    info!(
        upstream = %gate.upstream,
        downstream = %gate.downstream,
        "compared releases"
    );
    if !gate.needs_sync() {
        info!("downstream is up to date, nothing to do");
        return Ok(SyncOutcome::UpToDate {
            upstream: gate.upstream,
            downstream: gate.downstream,
        });
    }

    let branch = branch_name(&gate.upstream);
    if downstream.branch_exists(&branch).await? {
        warn!(%branch, "a branch for this release already exists, skipping");
        return Ok(SyncOutcome::AlreadyProposed {
            upstream: gate.upstream,
            branch,
        });
    }

    info!(upstream = %gate.upstream, "new upstream release detected, planning sync");
    let plan = create_sync_plan(&contents, config)?;

    if options.dry_run {
        info!(%branch, changes = plan.changes.len(), "dry run, not publishing");
        return Ok(SyncOutcome::Planned(Box::new(plan)));
    }

    let result = execute_sync(&plan, downstream, progress).await?;
    info!(pr_number = result.pull_request.number, "sync published");
    Ok(SyncOutcome::Published {
        plan: Box::new(plan),
        result,
    })
}
