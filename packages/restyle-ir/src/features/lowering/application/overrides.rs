//! Phase 2: descendant overrides
//!
//! Requests recorded while lowering (`& ${Icon}`, `&:hover ${Icon}`,
//! `${Card}:hover &`) are grouped per parent/child pair and synthesized into
//! one style object on the child, conditioned on the parent's pseudo-state
//! through the ancestor marker.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::features::lowering::domain::{Bail, DescendantOverride, LowerResult, OverrideRequest};
use crate::shared::models::{ConditionKey, ConditionMap, Location, ReasonCode, StyleObject, StyleValue};
use crate::shared::utils::{to_pascal_case, StyleKeyAllocator};

#[derive(Debug, Default)]
pub(crate) struct ResolvedOverrides {
    pub overrides: Vec<DescendantOverride>,
    pub styles: Vec<(String, StyleObject)>,
    /// Declarations whose pseudo-state some override observes
    pub ancestor_markers: Vec<String>,
}

/// `component_keys` maps every non-helper declaration to its base key;
/// `bases` holds their own base objects
pub(crate) fn resolve_overrides(
    location: &Location,
    component_keys: &FxHashMap<String, String>,
    bases: &FxHashMap<String, StyleObject>,
    requests: Vec<OverrideRequest>,
    keys: &mut StyleKeyAllocator,
) -> LowerResult<ResolvedOverrides> {
    let mut grouped: IndexMap<(String, String), Vec<OverrideRequest>> = IndexMap::new();
    for request in requests {
        for name in [&request.parent, &request.child] {
            if !component_keys.contains_key(name) {
                return Err(Bail::new(
                    ReasonCode::UnknownDescendantReference,
                    location.clone().in_declaration(&request.origin, None),
                    format!("`{}` references `{}`, which is not a styled component of this file", request.selector, name),
                ));
            }
        }
        grouped
            .entry((request.parent.clone(), request.child.clone()))
            .or_default()
            .push(request);
    }

    let mut resolved = ResolvedOverrides::default();
    for ((parent, child), requests) in grouped {
        let parent_key = &component_keys[&parent];
        let child_key = &component_keys[&child];

        let mut buckets: IndexMap<Option<String>, StyleObject> = IndexMap::new();
        for request in requests {
            buckets
                .entry(request.ancestor_pseudo)
                .or_default()
                .merge(&request.values);
        }

        let child_base = bases.get(&child);
        let style = synthesize(&buckets, child_base);
        let override_key = keys.allocate(&format!("{}In{}", child_key, to_pascal_case(&parent)));

        if buckets.keys().any(Option::is_some) && !resolved.ancestor_markers.contains(&parent) {
            resolved.ancestor_markers.push(parent.clone());
        }
        resolved.styles.push((override_key.clone(), style));
        resolved.overrides.push(DescendantOverride {
            parent_style_key: parent_key.clone(),
            child_style_key: child_key.clone(),
            override_style_key: override_key,
            buckets,
        });
    }
    Ok(resolved)
}

/// One object over every property any bucket touches: the base bucket (or the
/// child's own default) as `default`, one ancestor entry per pseudo bucket
fn synthesize(
    buckets: &IndexMap<Option<String>, StyleObject>,
    child_base: Option<&StyleObject>,
) -> StyleObject {
    let mut properties: Vec<&String> = Vec::new();
    for object in buckets.values() {
        for property in object.keys() {
            if !properties.contains(&property) {
                properties.push(property);
            }
        }
    }

    let always = buckets.get(&None);
    let mut style = StyleObject::new();
    for property in properties {
        let base_value = always.and_then(|object| object.get(property));
        let pseudo_entries: Vec<(&String, &StyleValue)> = buckets
            .iter()
            .filter_map(|(pseudo, object)| Some((pseudo.as_ref()?, object.get(property)?)))
            .collect();

        if pseudo_entries.is_empty() {
            if let Some(value) = base_value {
                style.insert(property.clone(), value.clone());
            }
            continue;
        }

        let default = base_value
            .cloned()
            .or_else(|| child_base.and_then(|b| b.get(property)).map(StyleValue::default_value))
            .unwrap_or(StyleValue::Null);
        let mut map = ConditionMap::with_default(default);
        for (pseudo, value) in pseudo_entries {
            map.insert(ConditionKey::Ancestor(pseudo.clone()), value.clone());
        }
        style.insert(property.clone(), StyleValue::Conditions(map));
    }
    style
}
