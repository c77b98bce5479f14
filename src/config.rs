//! Run configuration
//!
//! Every field has a default matching the OpenInsight / otelcol-contrib
//! setup, so the TOML file is optional and usually only overrides a few keys.

use crate::error::{Error, Result};
use crate::types::{GomodSyncStrategy, RepoConfig};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default environment variable holding the GitHub token
pub const DEFAULT_TOKEN_ENV: &str = "MY_GITHUB_TOKEN";

/// Top-level configuration for a sync run
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Environment variable holding the GitHub token
    pub token_env: String,
    /// API base URL (None for api.github.com)
    pub api_base: Option<String>,
    /// Version strategy for overlay components
    pub gomod_sync_strategy: GomodSyncStrategy,
    /// Upstream release repository
    pub upstream: UpstreamConfig,
    /// Downstream fork
    pub downstream: DownstreamConfig,
    /// Fixed `dist` record of the generated manifest
    pub dist: DistTemplate,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            api_base: None,
            gomod_sync_strategy: GomodSyncStrategy::default(),
            upstream: UpstreamConfig::default(),
            downstream: DownstreamConfig::default(),
            dist: DistTemplate::default(),
        }
    }
}

/// Upstream repository settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Path of the distribution manifest
    pub manifest_path: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            owner: "open-telemetry".to_string(),
            repo: "opentelemetry-collector-releases".to_string(),
            manifest_path: "distributions/otelcol-contrib/manifest.yaml".to_string(),
        }
    }
}

impl UpstreamConfig {
    /// Repository coordinates
    pub fn repo_config(&self) -> RepoConfig {
        RepoConfig::new(&self.owner, &self.repo)
    }
}

/// Downstream repository settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DownstreamConfig {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch pull requests target
    pub base_branch: String,
    /// Path of the generated build manifest
    pub manifest_path: String,
    /// Path of the hand-maintained distribution overlay
    pub overlay_path: String,
    /// Directory holding `version_compatibility_<year>.md`
    pub docs_dir: String,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            owner: "openinsight-proj".to_string(),
            repo: "OpenInsight".to_string(),
            base_branch: "main".to_string(),
            manifest_path: "builder/otelcol-builder.yaml".to_string(),
            overlay_path: "builder/openinsight-distrubution.yaml".to_string(),
            docs_dir: "docs".to_string(),
        }
    }
}

impl DownstreamConfig {
    /// Repository coordinates
    pub fn repo_config(&self) -> RepoConfig {
        RepoConfig::new(&self.owner, &self.repo)
    }
}

/// Name and description written into the generated `dist` block
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DistTemplate {
    /// Binary name
    pub name: String,
    /// Long application name
    pub description: String,
}

impl Default for DistTemplate {
    fn default() -> Self {
        Self {
            name: "otelcol-contrib".to_string(),
            description: "OpenInsight. You know, OpenTelemetry Collector enhancement distribution"
                .to_string(),
        }
    }
}

impl SyncConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("invalid configuration: {e}")))
    }

    /// Load configuration from a file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
    }
}
