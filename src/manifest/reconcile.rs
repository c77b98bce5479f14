//! Overlay-over-upstream reconciliation (pure)
//!
//! Components listed in the overlay win over same-named upstream
//! components; everything else is inherited from upstream.

use super::{
    COMPONENT_CATEGORIES, DIST_KEY, Manifest, REPLACES_KEY, additive_merge, component_name,
    gomod_of,
};
use crate::config::DistTemplate;
use crate::error::Result;
use crate::types::{GomodSyncStrategy, ReleaseVersion};
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::LazyLock;
use tracing::debug;

static TRAILING_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v[0-9]+\.[0-9]+\.[0-9]+$").expect("valid regex"));

/// Drop upstream components that the overlay overrides
///
/// For each overlay component (every key except `dist` and `replaces`), the
/// first upstream entry in the same category with the same short name is
/// removed. Only that first match goes: if upstream lists a name twice the
/// second entry survives. Categories upstream lacks are skipped.
///
/// Returns the names that were removed, in removal order.
pub fn remove_overridden(upstream: &mut Manifest, overlay: &Manifest) -> Result<Vec<String>> {
    let mut removed = Vec::new();

    for (key, value) in overlay.as_mapping() {
        let Some(category) = key.as_str() else {
            continue;
        };
        if category == DIST_KEY || category == REPLACES_KEY {
            continue;
        }
        let Value::Sequence(overrides) = value else {
            debug!(category, "overlay key is not a component list, skipping");
            continue;
        };

        for component in overrides {
            let target = component_name(gomod_of(component, category)?);

            let Some(Value::Sequence(inherited)) = upstream.as_mapping_mut().get_mut(category)
            else {
                continue;
            };

            let position = inherited.iter().position(|c| {
                c.get("gomod")
                    .and_then(Value::as_str)
                    .is_some_and(|g| component_name(g) == target)
            });

            if let Some(index) = position {
                inherited.remove(index);
                debug!(category, component = target, "removed upstream component");
                removed.push(target.to_string());
            }
        }
    }

    Ok(removed)
}

/// Rewrite overlay module versions to `version`
///
/// Only `gomod` strings ending in `vX.Y.Z` within the component categories
/// are touched. Returns how many identifiers changed.
pub fn sync_component_versions(overlay: &mut Manifest, version: &ReleaseVersion) -> Result<usize> {
    let replacement = version.to_string();
    let mut changed = 0;

    for category in COMPONENT_CATEGORIES {
        let Some(Value::Sequence(components)) = overlay.as_mapping_mut().get_mut(category) else {
            continue;
        };

        for component in components.iter_mut() {
            let current = gomod_of(component, category)?;
            if !TRAILING_VERSION.is_match(current) {
                continue;
            }
            let synced = TRAILING_VERSION
                .replace(current, replacement.as_str())
                .into_owned();
            if synced != current {
                changed += 1;
            }
            if let Value::Mapping(record) = component {
                record.insert(Value::from("gomod"), Value::from(synced));
            }
        }
    }

    Ok(changed)
}

/// Build the downstream manifest from upstream and the overlay
///
/// Upstream loses the components the overlay overrides, the two are merged
/// additively, and `dist` is replaced by `template` carrying upstream's
/// version string verbatim. `dist` is always the first key.
pub fn reconcile(
    upstream: &Manifest,
    overlay: &Manifest,
    strategy: GomodSyncStrategy,
    template: &DistTemplate,
) -> Result<Manifest> {
    let upstream_version_raw = upstream.dist_version_raw()?.to_string();

    let mut inherited = upstream.clone();
    let removed = remove_overridden(&mut inherited, overlay)?;
    debug!(count = removed.len(), "overridden upstream components removed");

    let mut overrides = overlay.clone();
    if strategy == GomodSyncStrategy::Sync {
        let version = upstream.dist_version()?;
        let changed = sync_component_versions(&mut overrides, &version)?;
        debug!(changed, %version, "synced overlay module versions");
    }

    let mut merged = Mapping::new();
    additive_merge(&mut merged, inherited.as_mapping());
    additive_merge(&mut merged, overrides.as_mapping());

    let mut dist = Mapping::new();
    dist.insert(Value::from("name"), Value::from(template.name.as_str()));
    dist.insert(
        Value::from("description"),
        Value::from(template.description.as_str()),
    );
    dist.insert(Value::from("version"), Value::from(upstream_version_raw));

    // `dist` leads so the generated header sits above it
    let mut root = Mapping::new();
    root.insert(Value::from(DIST_KEY), Value::Mapping(dist));
    for (key, value) in merged {
        if key.as_str() != Some(DIST_KEY) {
            root.insert(key, value);
        }
    }

    Ok(Manifest::from_mapping(root))
}
