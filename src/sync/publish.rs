//! Publish phase - effectful operations
//!
//! Takes a [`SyncPlan`] and pushes it: branch, one commit per file, then the
//! pull request. Stops at the first failure; whatever was already pushed
//! stays on the branch.

use crate::error::Result;
use crate::platform::RepositoryService;
use crate::sync::{ProgressCallback, SyncPlan};
use crate::types::{ChangeKind, PullRequest};

/// Result of publishing a plan
#[derive(Debug, Clone)]
pub struct PublishResult {
    /// Branch that was created
    pub branch: String,
    /// Paths committed, in order
    pub committed: Vec<String>,
    /// The opened pull request
    pub pull_request: PullRequest,
}

/// Execute the sync plan (EFFECTFUL)
///
/// Updates look up the file's blob SHA on the new branch right before
/// writing.
pub async fn execute_sync(
    plan: &SyncPlan,
    downstream: &dyn RepositoryService,
    progress: &dyn ProgressCallback,
) -> Result<PublishResult> {
    let base_sha = downstream.get_branch_sha(&plan.base_branch).await?;

    progress
        .on_message(&format!("Creating branch {}", plan.branch))
        .await;
    downstream.create_branch(&plan.branch, &base_sha).await?;

    let mut committed = Vec::with_capacity(plan.changes.len());
    for change in &plan.changes {
        match change.kind {
            ChangeKind::Update => {
                let current = downstream.get_file(&change.path, Some(&plan.branch)).await?;
                downstream
                    .update_file(change, &current.sha, &plan.branch)
                    .await?;
            }
            ChangeKind::Create => {
                downstream.create_file(change, &plan.branch).await?;
            }
        }
        progress
            .on_message(&format!("Committed {} ({})", change.path, change.kind))
            .await;
        committed.push(change.path.clone());
    }

    let pull_request = downstream
        .create_pr(&plan.branch, &plan.base_branch, &plan.title, &plan.body)
        .await?;
    progress
        .on_message(&format!(
            "Opened PR #{}: {}",
            pull_request.number, pull_request.html_url
        ))
        .await;

    Ok(PublishResult {
        branch: plan.branch.clone(),
        committed,
        pull_request,
    })
}
