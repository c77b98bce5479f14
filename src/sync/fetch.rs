//! Fetch phase - read everything the plan needs
//!
//! Every read is attempted once; the first failure aborts the run.

use crate::compat::{compatibility_file_name, compatibility_file_path};
use crate::config::SyncConfig;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::platform::RepositoryService;
use crate::types::RemoteFile;
use tracing::{debug, info};

/// Everything read from the two repositories
#[derive(Debug, Clone)]
pub struct RepoContents {
    /// Upstream distribution manifest
    pub upstream_manifest: Manifest,
    /// Downstream generated build manifest
    pub downstream_manifest: Manifest,
    /// Downstream hand-maintained overlay
    pub overlay_manifest: Manifest,
    /// Downstream README
    pub readme: RemoteFile,
    /// Year document that was read (current or previous year)
    pub compatibility: RemoteFile,
    /// Year of the document that was read
    pub compatibility_year: i32,
    /// Year the run targets
    pub current_year: i32,
}

impl RepoContents {
    /// Whether the current year's document already exists downstream
    pub const fn has_current_year_document(&self) -> bool {
        self.compatibility_year == self.current_year
    }
}

/// Read manifests and documents from upstream and downstream
///
/// The year document for `year` is used when the docs directory lists it;
/// otherwise the previous year's document is read instead.
pub async fn fetch_contents(
    upstream: &dyn RepositoryService,
    downstream: &dyn RepositoryService,
    config: &SyncConfig,
    year: i32,
) -> Result<RepoContents> {
    info!(repo = %upstream.config(), "fetching upstream manifest");
    let upstream_manifest = upstream
        .get_file(&config.upstream.manifest_path, None)
        .await?;

    info!(repo = %downstream.config(), "fetching downstream manifests and docs");
    let downstream_manifest = downstream
        .get_file(&config.downstream.manifest_path, None)
        .await?;
    let overlay_manifest = downstream
        .get_file(&config.downstream.overlay_path, None)
        .await?;
    let readme = downstream.get_readme(None).await?;

    let docs = downstream.list_directory(&config.downstream.docs_dir).await?;
    let current_name = compatibility_file_name(year);
    let compatibility_year = if docs.iter().any(|entry| entry.name == current_name) {
        year
    } else {
        debug!(year, "no document for the current year, reading the previous one");
        year - 1
    };
    let compatibility = downstream
        .get_file(
            &compatibility_file_path(&config.downstream.docs_dir, compatibility_year),
            None,
        )
        .await?;

    Ok(RepoContents {
        upstream_manifest: Manifest::parse(&upstream_manifest.content)?,
        downstream_manifest: Manifest::parse(&downstream_manifest.content)?,
        overlay_manifest: Manifest::parse(&overlay_manifest.content)?,
        readme,
        compatibility,
        compatibility_year,
        current_year: year,
    })
}
