//! Additive deep merge of YAML mappings

use serde_yaml::{Mapping, Value};

/// Merge `src` into `dest`
///
/// Mapping into mapping recurses, list into list appends `src` after the
/// existing entries, anything else overwrites. Keys new to `dest` are
/// appended in `src` order.
pub fn additive_merge(dest: &mut Mapping, src: &Mapping) {
    for (key, value) in src {
        let Some(existing) = dest.get_mut(key) else {
            dest.insert(key.clone(), value.clone());
            continue;
        };

        match (existing, value) {
            (Value::Mapping(existing), Value::Mapping(incoming)) => {
                additive_merge(existing, incoming);
            }
            (Value::Sequence(existing), Value::Sequence(incoming)) => {
                existing.extend(incoming.iter().cloned());
            }
            (existing, _) => *existing = value.clone(),
        }
    }
}
