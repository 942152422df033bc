//! Lowering Context - per-declaration buckets
//!
//! One context is created per styled declaration and threaded by reference
//! through rule processing. It owns every partial map; nothing here outlives
//! the declaration unless the file converts.

use indexmap::IndexMap;

use crate::features::resolution::VariantCondition;
use crate::features::selector::{AttributeKind, SiblingKind};
use crate::shared::models::{ConditionKey, ConditionMap, StyleObject, StyleValue};

use super::OverrideRequest;

/// Write `value` at `path` into the current value of one property
///
/// An empty path sets the plain (default) value. Each path element opens or
/// extends a conditional map; a map created here starts with `fallback` as its
/// explicit default, so a pseudo never appears without a `default` entry.
pub fn write_value(
    current: Option<StyleValue>,
    path: &[ConditionKey],
    value: StyleValue,
    fallback: StyleValue,
) -> StyleValue {
    let Some((key, rest)) = path.split_first() else {
        return match current {
            Some(StyleValue::Conditions(mut map)) => {
                map.insert(ConditionKey::Default, value);
                StyleValue::Conditions(map)
            }
            _ => value,
        };
    };

    let mut map = match current {
        Some(StyleValue::Conditions(map)) => map,
        Some(plain) => ConditionMap::with_default(plain),
        None => ConditionMap::with_default(fallback),
    };
    let inner_fallback = map
        .default_entry()
        .map(StyleValue::default_value)
        .unwrap_or(StyleValue::Null);
    let inner = write_value(map.get(key).cloned(), rest, value, inner_fallback);
    map.insert(key.clone(), inner);
    StyleValue::Conditions(map)
}

fn value_at(value: &StyleValue, path: &[ConditionKey]) -> StyleValue {
    let Some((key, rest)) = path.split_first() else {
        return value.default_value();
    };
    match value {
        StyleValue::Conditions(map) => match map.get(key) {
            Some(inner) => value_at(inner, rest),
            None => value.default_value(),
        },
        plain => plain.clone(),
    }
}

/// Variant toggled by a render-time condition
#[derive(Debug, Clone, PartialEq)]
pub struct VariantBucket {
    pub condition: VariantCondition,
    pub style: StyleObject,
}

/// Style applied by the wrapper when an attribute condition holds
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBucket {
    pub kind: AttributeKind,
    pub style: StyleObject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiblingBucket {
    pub kind: SiblingKind,
    pub style: StyleObject,
}

/// Style function collected during rule processing
#[derive(Debug, Clone, PartialEq)]
pub struct PendingStyleFunction {
    pub name_hint: String,
    pub params: Vec<String>,
    pub body: StyleObject,
    pub call_args: Vec<String>,
}

/// Lowering Context (accumulating state of one declaration)
#[derive(Debug, Clone, Default)]
pub struct LoweringContext {
    /// Own style object
    pub base: StyleObject,

    /// Values inherited from composed helpers; defaults for new conditional maps
    pub inherited: StyleObject,

    /// Condition text → bucket, in first-seen order
    pub variants: IndexMap<String, VariantBucket>,

    /// Attribute suffix → bucket
    pub attributes: IndexMap<String, AttributeBucket>,

    pub sibling: Option<SiblingBucket>,

    pub style_functions: Vec<PendingStyleFunction>,

    /// Cross-component requests, resolved after every declaration is lowered
    pub override_requests: Vec<OverrideRequest>,

    /// Props read by variants and style functions
    pub consumed_props: Vec<String>,

    /// Composed style keys, in composition order
    pub extra_style_keys: Vec<String>,

    pub needs_wrapper: bool,
}

impl LoweringContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default a new conditional map on the own object starts from
    pub fn base_fallback(&self, property: &str) -> StyleValue {
        self.base
            .get(property)
            .or_else(|| self.inherited.get(property))
            .map(StyleValue::default_value)
            .unwrap_or(StyleValue::Null)
    }

    /// Object a write lands in: the own object, or a pseudo-element block of it
    fn target<'o>(object: &'o mut StyleObject, pseudo_element: Option<&str>) -> &'o mut StyleObject {
        let Some(element) = pseudo_element else {
            return object;
        };
        if !matches!(object.get(element), Some(StyleValue::Object(_))) {
            object.insert(element, StyleValue::Object(StyleObject::new()));
        }
        match object.get_mut(element) {
            Some(StyleValue::Object(inner)) => inner,
            // inserted just above
            _ => unreachable!("pseudo-element block is an object"),
        }
    }

    /// Write into the own style object
    pub fn write_base(
        &mut self,
        pseudo_element: Option<&str>,
        path: &[ConditionKey],
        property: &str,
        value: StyleValue,
    ) {
        let fallback = if pseudo_element.is_none() {
            self.base_fallback(property)
        } else {
            StyleValue::Null
        };
        let target = Self::target(&mut self.base, pseudo_element);
        let next = write_value(target.get(property).cloned(), path, value.clone(), fallback);
        target.insert(property, next);

        // a later declaration wins over earlier variants of the same property
        for bucket in self.variants.values_mut() {
            let Some(target) = Self::existing_target(&mut bucket.style, pseudo_element) else {
                continue;
            };
            if let Some(current) = target.get(property).cloned() {
                let next = write_value(Some(current), path, value.clone(), StyleValue::Null);
                target.insert(property, next);
            }
        }
    }

    fn existing_target<'o>(
        object: &'o mut StyleObject,
        pseudo_element: Option<&str>,
    ) -> Option<&'o mut StyleObject> {
        match pseudo_element {
            None => Some(object),
            Some(element) => match object.get_mut(element) {
                Some(StyleValue::Object(inner)) => Some(inner),
                _ => None,
            },
        }
    }

    /// Condition of a bucket applied after `condition`'s that also sets
    /// `property`; writing into `condition` then cannot win over it
    pub fn later_variant_setting(
        &self,
        condition: &VariantCondition,
        pseudo_element: Option<&str>,
        property: &str,
    ) -> Option<&VariantCondition> {
        let position = self.variants.get_index_of(&condition.to_string())?;
        self.variants
            .values()
            .skip(position + 1)
            .find(|bucket| {
                let style = match pseudo_element {
                    None => Some(&bucket.style),
                    Some(element) => match bucket.style.get(element) {
                        Some(StyleValue::Object(inner)) => Some(inner),
                        _ => None,
                    },
                };
                style.is_some_and(|style| style.contains(property))
            })
            .map(|bucket| &bucket.condition)
    }

    /// Whether the own object or a variant bucket already sets `property`
    pub fn sets_property(&self, property: &str) -> bool {
        self.base.contains(property)
            || self
                .variants
                .values()
                .any(|bucket| bucket.style.contains(property))
    }

    /// Write into a variant bucket; new conditional maps inherit the own
    /// object's current default so the variant only changes what it states
    pub fn write_variant(
        &mut self,
        condition: &VariantCondition,
        pseudo_element: Option<&str>,
        path: &[ConditionKey],
        property: &str,
        value: StyleValue,
    ) {
        let fallback = match pseudo_element {
            None => self.base_fallback(property),
            Some(element) => match self.base.get(element) {
                Some(StyleValue::Object(inner)) => inner
                    .get(property)
                    .map(StyleValue::default_value)
                    .unwrap_or(StyleValue::Null),
                _ => StyleValue::Null,
            },
        };
        for prop in condition.props() {
            self.consume_prop(prop);
        }
        self.needs_wrapper = true;

        let bucket = self
            .variants
            .entry(condition.to_string())
            .or_insert_with(|| VariantBucket {
                condition: condition.clone(),
                style: StyleObject::new(),
            });
        let target = Self::target(&mut bucket.style, pseudo_element);
        let next = write_value(target.get(property).cloned(), path, value, fallback);
        target.insert(property, next);
    }

    pub fn write_attribute(
        &mut self,
        kind: &AttributeKind,
        suffix: &str,
        pseudo_element: Option<&str>,
        path: &[ConditionKey],
        property: &str,
        value: StyleValue,
    ) {
        self.needs_wrapper = true;
        let bucket = self
            .attributes
            .entry(suffix.to_string())
            .or_insert_with(|| AttributeBucket {
                kind: kind.clone(),
                style: StyleObject::new(),
            });
        let target = Self::target(&mut bucket.style, pseudo_element);
        let next = write_value(target.get(property).cloned(), path, value, StyleValue::Null);
        target.insert(property, next);
    }

    pub fn write_sibling(&mut self, kind: SiblingKind, property: &str, value: StyleValue) {
        self.needs_wrapper = true;
        let fallback = self.base_fallback(property);
        let bucket = self.sibling.get_or_insert_with(|| SiblingBucket {
            kind,
            style: StyleObject::new(),
        });
        let value = match kind {
            SiblingKind::Adjacent => value,
            SiblingKind::General => {
                let mut map = ConditionMap::with_default(fallback);
                map.insert(ConditionKey::SiblingBefore(":is(*)".to_string()), value);
                StyleValue::Conditions(map)
            }
        };
        bucket.style.insert(property, value);
    }

    pub fn consume_prop(&mut self, prop: &str) {
        if !self.consumed_props.iter().any(|p| p == prop) {
            self.consumed_props.push(prop.to_string());
        }
    }

    /// Apply composed style keys before the own key and seed inherited
    /// defaults from their effective style. Properties the own object set
    /// before the composition point are folded in separately.
    pub fn inherit(&mut self, style_keys: &[String], composed: &StyleObject) {
        for key in style_keys {
            if !self.extra_style_keys.contains(key) {
                self.extra_style_keys.push(key.clone());
            }
        }
        for (property, value) in composed.iter() {
            self.inherited.insert(property.clone(), value.default_value());
        }
    }

    /// Value the own object currently yields for `property` under `path`
    pub fn base_value_at(
        &self,
        pseudo_element: Option<&str>,
        path: &[ConditionKey],
        property: &str,
    ) -> StyleValue {
        let current = match pseudo_element {
            None => self
                .base
                .get(property)
                .or_else(|| self.inherited.get(property)),
            Some(element) => match self.base.get(element) {
                Some(StyleValue::Object(block)) => block.get(property),
                _ => None,
            },
        };
        current
            .map(|value| value_at(value, path))
            .unwrap_or(StyleValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hover() -> ConditionKey {
        ConditionKey::Pseudo(":hover".into())
    }

    #[test]
    fn test_pseudo_without_base_gets_null_default() {
        let mut ctx = LoweringContext::new();
        ctx.write_base(None, &[hover()], "color", StyleValue::string("red"));

        let map = ctx.base.get("color").and_then(StyleValue::as_conditions).unwrap();
        assert_eq!(map.default_entry(), Some(&StyleValue::Null));
        assert_eq!(map.get(&hover()), Some(&StyleValue::string("red")));
        assert_eq!(map.keys().next(), Some(&ConditionKey::Default));
    }

    #[test]
    fn test_base_after_pseudo_replaces_default() {
        let mut ctx = LoweringContext::new();
        ctx.write_base(None, &[hover()], "color", StyleValue::string("red"));
        ctx.write_base(None, &[], "color", StyleValue::string("blue"));

        let map = ctx.base.get("color").and_then(StyleValue::as_conditions).unwrap();
        assert_eq!(map.default_entry(), Some(&StyleValue::string("blue")));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_inherited_default_seeds_pseudo_map() {
        let mut ctx = LoweringContext::new();
        ctx.inherit(
            &["truncate".to_string()],
            &StyleObject::from_pairs(vec![("color".into(), StyleValue::string("gray"))]),
        );
        ctx.write_base(None, &[hover()], "color", StyleValue::string("red"));

        let map = ctx.base.get("color").and_then(StyleValue::as_conditions).unwrap();
        assert_eq!(map.default_entry(), Some(&StyleValue::string("gray")));
        assert_eq!(ctx.extra_style_keys, vec!["truncate"]);
    }

    #[test]
    fn test_pseudo_with_media_nests() {
        let mut ctx = LoweringContext::new();
        ctx.write_base(None, &[], "color", StyleValue::string("black"));
        let media = ConditionKey::AtRule("@media (max-width: 600px)".into());
        ctx.write_base(None, &[hover(), media.clone()], "color", StyleValue::string("red"));

        let outer = ctx.base.get("color").and_then(StyleValue::as_conditions).unwrap();
        assert_eq!(outer.default_entry(), Some(&StyleValue::string("black")));
        let inner = outer.get(&hover()).and_then(StyleValue::as_conditions).unwrap();
        assert_eq!(inner.default_entry(), Some(&StyleValue::string("black")));
        assert_eq!(inner.get(&media), Some(&StyleValue::string("red")));
    }

    #[test]
    fn test_pseudo_element_block() {
        let mut ctx = LoweringContext::new();
        ctx.write_base(Some("::before"), &[], "content", StyleValue::string("\"\""));
        ctx.write_base(Some("::before"), &[hover()], "color", StyleValue::string("red"));

        let Some(StyleValue::Object(block)) = ctx.base.get("::before") else {
            panic!("expected a pseudo-element block");
        };
        assert_eq!(block.get("content"), Some(&StyleValue::string("\"\"")));
        assert!(block.get("color").and_then(StyleValue::as_conditions).is_some());
    }

    #[test]
    fn test_variant_write_inherits_base_default() {
        let mut ctx = LoweringContext::new();
        ctx.write_base(None, &[], "color", StyleValue::string("black"));
        let cond = VariantCondition::Truthy("$active".into());
        ctx.write_variant(&cond, None, &[hover()], "color", StyleValue::string("red"));

        let bucket = &ctx.variants["$active"];
        let map = bucket.style.get("color").and_then(StyleValue::as_conditions).unwrap();
        assert_eq!(map.default_entry(), Some(&StyleValue::string("black")));
        assert!(ctx.needs_wrapper);
        assert_eq!(ctx.consumed_props, vec!["$active"]);
    }

    #[test]
    fn test_later_base_write_overrides_earlier_variant() {
        let mut ctx = LoweringContext::new();
        let cond = VariantCondition::Truthy("$x".into());
        ctx.write_variant(&cond, None, &[], "color", StyleValue::string("red"));
        ctx.write_variant(&cond, None, &[], "opacity", StyleValue::Number(0.5));
        ctx.write_base(None, &[], "color", StyleValue::string("green"));
        ctx.write_base(None, &[hover()], "opacity", StyleValue::Number(1.0));

        let bucket = &ctx.variants["$x"];
        assert_eq!(bucket.style.get("color"), Some(&StyleValue::string("green")));
        let opacity = bucket.style.get("opacity").and_then(StyleValue::as_conditions).unwrap();
        assert_eq!(opacity.default_entry(), Some(&StyleValue::Number(0.5)));
        assert_eq!(opacity.get(&hover()), Some(&StyleValue::Number(1.0)));
        // untouched properties stay out of the bucket
        ctx.write_base(None, &[], "margin", StyleValue::Number(0.0));
        assert!(!ctx.variants["$x"].style.contains("margin"));
    }

    #[test]
    fn test_later_variant_setting_same_property() {
        let mut ctx = LoweringContext::new();
        let a = VariantCondition::Truthy("$a".into());
        let b = VariantCondition::Truthy("$b".into());
        ctx.write_variant(&a, None, &[], "opacity", StyleValue::Number(0.5));
        ctx.write_variant(&b, None, &[], "opacity", StyleValue::Number(0.2));

        assert_eq!(ctx.later_variant_setting(&a, None, "opacity"), Some(&b));
        assert_eq!(ctx.later_variant_setting(&b, None, "opacity"), None);
        assert_eq!(ctx.later_variant_setting(&a, None, "color"), None);
        assert!(ctx.sets_property("opacity"));
        assert!(!ctx.sets_property("color"));
    }

    #[test]
    fn test_general_sibling_uses_marker() {
        let mut ctx = LoweringContext::new();
        ctx.write_base(None, &[], "margin-top", StyleValue::Number(0.0));
        ctx.write_sibling(SiblingKind::General, "margin-top", StyleValue::string("8px"));

        let bucket = ctx.sibling.as_ref().unwrap();
        let map = bucket.style.get("margin-top").and_then(StyleValue::as_conditions).unwrap();
        assert_eq!(map.default_entry(), Some(&StyleValue::Number(0.0)));
        assert!(map.keys().any(|k| k.is_marker()));
    }

    #[test]
    fn test_base_value_at_follows_conditions() {
        let mut ctx = LoweringContext::new();
        ctx.write_base(None, &[], "color", StyleValue::string("black"));
        ctx.write_base(None, &[hover()], "color", StyleValue::string("red"));

        assert_eq!(ctx.base_value_at(None, &[hover()], "color"), StyleValue::string("red"));
        let focus = ConditionKey::Pseudo(":focus".into());
        assert_eq!(ctx.base_value_at(None, &[focus], "color"), StyleValue::string("black"));
        assert_eq!(ctx.base_value_at(None, &[], "margin"), StyleValue::Null);
    }
}
