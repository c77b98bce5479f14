//! Shared test fixtures

#![allow(dead_code)]

mod mock_repository;

pub use mock_repository::{CreateBranchCall, CreatePrCall, MockRepositoryService, WriteFileCall};

use version_bump::compat::compatibility_file_path;
use version_bump::config::SyncConfig;
use version_bump::manifest::Manifest;
use version_bump::sync::RepoContents;
use version_bump::types::RemoteFile;

/// Year used by the fixtures
pub const YEAR: i32 = 2026;

pub const UPSTREAM_MANIFEST_PATH: &str = "distributions/otelcol-contrib/manifest.yaml";
pub const BUILDER_PATH: &str = "builder/otelcol-builder.yaml";
pub const OVERLAY_PATH: &str = "builder/openinsight-distrubution.yaml";
pub const README_PATH: &str = "README.md";

/// Upstream distribution manifest at `version` (written verbatim)
pub fn upstream_manifest_yaml(version: &str) -> String {
    format!(
        r"dist:
  module: github.com/open-telemetry/opentelemetry-collector-releases/contrib
  name: otelcol-contrib
  description: OpenTelemetry Collector Contrib
  version: {version}
  output_path: ./_build

extensions:
  - gomod: github.com/foo/healthcheckextension v0.69.0
exporters:
  - gomod: github.com/foo/bazexporter v0.69.0
receivers:
  - gomod: github.com/foo/barreceiver v0.69.0
  - gomod: github.com/foo/otlpreceiver v0.69.0
"
    )
}

/// Downstream generated build manifest recording `version`
pub fn builder_manifest_yaml(version: &str) -> String {
    format!(
        r"dist:
  name: otelcol-contrib
  description: OpenInsight
  version: {version}
receivers:
  - gomod: github.com/foo/barreceiver v0.62.0
"
    )
}

/// Downstream overlay pinning `barreceiver`
pub const OVERLAY_YAML: &str = r"dist:
  name: otelcol-contrib
  version: v0.63.0
receivers:
  - gomod: github.com/foo/barreceiver v0.62.0
replaces:
  - github.com/foo/lib => ../lib
";

/// Year document whose newest row is `v0.1.0 / v0.63.0`
pub const COMPAT_DOC: &str = "# Version Compatibility

| OpenInsight | OpenTelemetry Collector Contrib |
|-------------|---------------------------------|
| v0.1.0      | v0.63.0                         |
| v0.0.9      | v0.62.0                         |
";

/// README with a single-row compatibility table
pub const README: &str = "# OpenInsight

## Version Compatibility

| OpenInsight | OpenTelemetry Collector Contrib |
|-------------|---------------------------------|
| v0.1.0      | v0.63.0                         |

See [docs/version_compatibility_2025.md](docs/version_compatibility_2025.md) for older releases.

## License
";

/// Upstream repository serving a manifest at `version`
pub fn upstream_repo(version: &str) -> MockRepositoryService {
    let repo = MockRepositoryService::new("open-telemetry", "opentelemetry-collector-releases");
    repo.put_file(UPSTREAM_MANIFEST_PATH, &upstream_manifest_yaml(version));
    repo
}

/// Downstream repository recording `version`, with a year document for
/// each of `doc_years`
pub fn downstream_repo(version: &str, doc_years: &[i32]) -> MockRepositoryService {
    let repo = MockRepositoryService::new("openinsight-proj", "OpenInsight");
    repo.put_file(BUILDER_PATH, &builder_manifest_yaml(version));
    repo.put_file(OVERLAY_PATH, OVERLAY_YAML);
    repo.put_file(README_PATH, README);
    repo.put_file("docs/architecture.md", "# Architecture\n");
    for year in doc_years {
        repo.put_file(&compatibility_file_path("docs", *year), COMPAT_DOC);
    }
    repo
}

/// Contents as the fetch phase would return them
pub fn repo_contents(upstream_version: &str, downstream_version: &str) -> RepoContents {
    RepoContents {
        upstream_manifest: Manifest::parse(&upstream_manifest_yaml(upstream_version)).unwrap(),
        downstream_manifest: Manifest::parse(&builder_manifest_yaml(downstream_version)).unwrap(),
        overlay_manifest: Manifest::parse(OVERLAY_YAML).unwrap(),
        readme: RemoteFile {
            path: README_PATH.to_string(),
            sha: "readme_sha".to_string(),
            content: README.to_string(),
        },
        compatibility: RemoteFile {
            path: compatibility_file_path("docs", YEAR),
            sha: "compat_sha".to_string(),
            content: COMPAT_DOC.to_string(),
        },
        compatibility_year: YEAR,
        current_year: YEAR,
    }
}

/// Default configuration
pub fn default_config() -> SyncConfig {
    SyncConfig::default()
}
