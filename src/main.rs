//! version-bump CLI

mod cli;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use version_bump::auth::get_github_auth;
use version_bump::config::SyncConfig;
use version_bump::sync::SyncOptions;
use version_bump::types::GomodSyncStrategy;

/// Sync the OpenInsight collector distribution with upstream otelcol-contrib releases
#[derive(Parser)]
#[command(name = "version-bump", version)]
struct Cli {
    /// Sync job to run
    #[arg(long, value_enum, default_value_t = Job::Upstream)]
    job: Job,

    /// How overlay module versions are treated [default: remain]
    #[arg(long = "gomodSyncStrategy", visible_alias = "gomod-sync-strategy", value_enum)]
    gomod_sync_strategy: Option<StrategyArg>,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Plan the sync without pushing anything
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Job {
    /// Sync with the latest upstream release
    Upstream,
    /// Sync local changes (not supported yet)
    Local,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Keep overlay module versions as authored
    Remain,
    /// Rewrite overlay module versions to the upstream release
    Sync,
}

impl From<StrategyArg> for GomodSyncStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Remain => Self::Remain,
            StrategyArg::Sync => Self::Sync,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = SyncConfig::load(cli.config.as_deref())?;
    if let Some(strategy) = cli.gomod_sync_strategy {
        config.gomod_sync_strategy = strategy.into();
    }

    let auth = get_github_auth(&config.token_env)?;

    match cli.job {
        Job::Upstream => {
            let options = SyncOptions {
                dry_run: cli.dry_run,
            };
            cli::run_upstream(&config, &auth, &options).await?;
        }
        Job::Local => cli::run_local(),
    }

    Ok(())
}
