//! Upstream command - adopt the latest upstream release

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{CHECK, Stylize, arrow, check};
use anstream::println;
use version_bump::auth::GitHubAuthConfig;
use version_bump::config::SyncConfig;
use version_bump::error::Result;
use version_bump::sync::{SyncOptions, SyncOutcome, SyncPlan, run_upstream_sync};

/// Run the upstream sync job
pub async fn run_upstream(
    config: &SyncConfig,
    auth: &GitHubAuthConfig,
    options: &SyncOptions,
) -> Result<()> {
    let ctx = CommandContext::new(config, auth)?;

    println!(
        "{} {} {} {}",
        "Checking".emphasis(),
        ctx.upstream.config().accent(),
        "against".emphasis(),
        ctx.downstream.config().accent()
    );

    let progress = CliProgress::compact();
    let outcome = run_upstream_sync(
        ctx.upstream.as_ref(),
        ctx.downstream.as_ref(),
        config,
        ctx.year,
        options,
        &progress,
    )
    .await?;

    match outcome {
        SyncOutcome::UpToDate {
            upstream,
            downstream,
        } => {
            println!(
                "{} downstream {} already tracks upstream {}",
                check(),
                downstream.accent(),
                upstream.accent()
            );
        }
        SyncOutcome::AlreadyProposed { upstream, branch } => {
            println!(
                "{} branch {} already exists for {}; approve the oldest open PR",
                "Skipped:".warn(),
                branch.accent(),
                upstream.accent()
            );
        }
        SyncOutcome::Planned(plan) => {
            print_plan(&plan);
            println!("{}", "Dry run complete".muted());
        }
        SyncOutcome::Published { plan, result } => {
            println!();
            println!(
                "{} {} {}",
                format!("{CHECK} Sync complete:").success(),
                plan.upstream_version.accent(),
                format!("({} files committed)", result.committed.len()).muted()
            );
            println!(
                "   PR #{}: {}",
                result.pull_request.number,
                result.pull_request.html_url.accent()
            );
        }
    }

    Ok(())
}

/// Print the plan for --dry-run
fn print_plan(plan: &SyncPlan) {
    println!("{}:", "Sync plan".emphasis());
    println!();
    println!(
        "  {} {} {} {}",
        "Adopt".emphasis(),
        plan.upstream_version.accent(),
        "for downstream".emphasis(),
        plan.downstream_version.accent()
    );
    for step in plan.to_string().lines() {
        println!("    {} {}", arrow(), step);
    }
    println!();
}
