//! Collector builder manifests
//!
//! A manifest is an ordered YAML mapping: component categories
//! (`extensions`, `exporters`, `processors`, `receivers`, ...) hold lists of
//! records with a `gomod` string, and `dist` describes the binary.
//!
//! - `merge` - additive deep merge of two mappings
//! - `reconcile` - overlay-over-upstream reconciliation (pure)

mod merge;
mod reconcile;

pub use merge::additive_merge;
pub use reconcile::{reconcile, remove_overridden, sync_component_versions};

use crate::error::{Error, Result};
use crate::types::ReleaseVersion;
use serde_yaml::{Mapping, Value};

/// Categories whose module versions the `sync` strategy rewrites
pub const COMPONENT_CATEGORIES: [&str; 4] = ["extensions", "exporters", "processors", "receivers"];

/// Key of the distribution record
pub const DIST_KEY: &str = "dist";

/// Key of module replacements (passed through, never reconciled)
pub const REPLACES_KEY: &str = "replaces";

/// Header written above generated manifests, directly over the `dist` block
///
/// Comments in the upstream manifest and the overlay do not survive
/// reconciliation; the header says so.
pub const GENERATED_HEADER: &str = "\
# This file is auto-generated by the version-bump job (`version-bump --job upstream`).
# Comments from the upstream manifest and the overlay are not carried over;
# edit builder/openinsight-distrubution.yaml instead. Manual edits will be overwritten.";

/// A parsed builder manifest
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Manifest {
    root: Mapping,
}

impl Manifest {
    /// Parse manifest YAML; an empty document is an empty manifest
    pub fn parse(text: &str) -> Result<Self> {
        match serde_yaml::from_str::<Value>(text)? {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Ok(Self::default()),
            other => Err(Error::Manifest(format!(
                "top level must be a mapping, found {}",
                value_kind(&other)
            ))),
        }
    }

    /// Wrap an existing mapping
    pub const fn from_mapping(root: Mapping) -> Self {
        Self { root }
    }

    /// Borrow the underlying mapping
    pub const fn as_mapping(&self) -> &Mapping {
        &self.root
    }

    /// Mutably borrow the underlying mapping
    pub const fn as_mapping_mut(&mut self) -> &mut Mapping {
        &mut self.root
    }

    /// Value stored under a top-level key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// `dist.version` exactly as written
    pub fn dist_version_raw(&self) -> Result<&str> {
        self.root
            .get(DIST_KEY)
            .and_then(|dist| dist.get("version"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Manifest("missing string `dist.version`".to_string()))
    }

    /// `dist.version` parsed as a release version
    pub fn dist_version(&self) -> Result<ReleaseVersion> {
        ReleaseVersion::parse(self.dist_version_raw()?)
    }

    /// `gomod` identifiers of one category, in document order
    ///
    /// A missing category yields an empty list.
    pub fn gomods(&self, category: &str) -> Result<Vec<&str>> {
        match self.root.get(category) {
            None => Ok(Vec::new()),
            Some(Value::Sequence(components)) => components
                .iter()
                .map(|c| gomod_of(c, category))
                .collect(),
            Some(other) => Err(Error::Manifest(format!(
                "`{category}` must be a list, found {}",
                value_kind(other)
            ))),
        }
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// Serialize to YAML with the generated-file header
    pub fn render_generated(&self) -> Result<String> {
        Ok(format!("{GENERATED_HEADER}\n{}", self.to_yaml()?))
    }
}

/// Short component name of a `gomod` identifier
///
/// `github.com/foo/barreceiver v0.62.0` becomes `barreceiver`.
pub fn component_name(gomod: &str) -> &str {
    let module = gomod.split(' ').next().unwrap_or(gomod);
    module.rsplit('/').next().unwrap_or(module)
}

/// Extract the `gomod` string of a component record
pub(crate) fn gomod_of<'a>(component: &'a Value, category: &str) -> Result<&'a str> {
    component
        .get("gomod")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            Error::Manifest(format!("component in `{category}` has no string `gomod`"))
        })
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
