//! Post-pass: buckets → style keys and annotations
//!
//! Variant buckets that are all equality tests against one enumerated prop
//! become a [`VariantDimension`]; the rest stay independently toggled keys.
//! Compound keys are synthesized where two variants would otherwise fight
//! over one property through emission order.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::config::LoweringConfig;
use crate::features::lowering::domain::{DynamicStyle, LoweringContext, VariantBucket};
use crate::features::resolution::VariantCondition;
use crate::shared::constants::is_html_attribute;
use crate::shared::models::{
    AttributeWrapper, CompoundVariant, ConditionMap, LoweringAnnotations, SiblingWrapper,
    StyleFunctionUse, StyleObject, StyleValue, StyledDeclaration, VariantDimension,
};
use crate::shared::utils::StyleKeyAllocator;

/// Everything one declaration contributes to the file output
#[derive(Debug, Clone, Default)]
pub(crate) struct DeclarationOutput {
    pub styles: Vec<(String, StyleObject)>,
    pub functions: Vec<(String, DynamicStyle)>,
    pub annotations: LoweringAnnotations,
}

/// Variant applied when both conditions hold
#[derive(Debug, Clone, PartialEq)]
struct Compound {
    first: VariantCondition,
    second: VariantCondition,
    style: StyleObject,
}

pub(crate) fn finalize(
    decl: &StyledDeclaration,
    base_key: &str,
    mut ctx: LoweringContext,
    keys: &mut StyleKeyAllocator,
    config: &LoweringConfig,
) -> DeclarationOutput {
    let mut output = DeclarationOutput::default();
    let annotations = &mut output.annotations;
    annotations.style_key = Some(base_key.to_string());
    annotations.extra_style_keys = std::mem::take(&mut ctx.extra_style_keys);
    output.styles.push((base_key.to_string(), std::mem::take(&mut ctx.base)));
    let base = &output.styles[0].1;

    // compounds look at what each variant set before carry-forward rewrites it
    let compounds = if config.synthesize_compound_variants {
        synthesize_compounds(&ctx.variants)
    } else {
        Vec::new()
    };
    if config.carry_pseudo_into_variants {
        carry_pseudo_entries(base, &mut ctx.variants);
    }

    let dimension_props = dimension_props(decl, &ctx.variants, &compounds);
    let mut dimensions: IndexMap<String, VariantDimension> = IndexMap::new();
    let mut variant_styles = Vec::new();
    for (text, bucket) in std::mem::take(&mut ctx.variants) {
        let key = keys.allocate(&format!("{}{}", base_key, bucket.condition.key_suffix()));
        match &bucket.condition {
            VariantCondition::Equals(prop, literal) if dimension_props.contains(prop) => {
                let declared_values = decl
                    .prop_types
                    .get(prop)
                    .and_then(|ty| ty.closed_values())
                    .map(<[_]>::to_vec)
                    .unwrap_or_default();
                dimensions
                    .entry(prop.clone())
                    .or_insert_with(|| VariantDimension {
                        prop_name: prop.clone(),
                        cases: IndexMap::new(),
                        declared_values,
                    })
                    .cases
                    .insert(literal.as_text(), key.clone());
            }
            _ => {
                annotations.variant_style_keys.insert(text, key.clone());
            }
        }
        variant_styles.push((key, bucket.style));
    }
    annotations.variant_dimensions = dimensions.into_values().collect();

    for compound in compounds {
        let suffix = format!(
            "{}{}",
            compound.first.key_suffix(),
            compound.second.key_suffix()
        );
        let key = keys.allocate(&format!("{}{}", base_key, suffix));
        annotations.compound_variants.push(CompoundVariant {
            conditions: vec![compound.first.to_string(), compound.second.to_string()],
            style_key: key.clone(),
        });
        variant_styles.push((key, compound.style));
    }
    output.styles.extend(variant_styles);

    for function in std::mem::take(&mut ctx.style_functions) {
        let key = keys.allocate(&format!("{}{}", base_key, function.name_hint));
        annotations.style_functions.push(StyleFunctionUse {
            style_key: key.clone(),
            call_args: function.call_args,
        });
        output.functions.push((
            key,
            DynamicStyle {
                params: function.params,
                body: function.body,
            },
        ));
    }

    for (suffix, bucket) in std::mem::take(&mut ctx.attributes) {
        let key = keys.allocate(&format!("{}{}", base_key, suffix));
        annotations.attribute_wrappers.push(AttributeWrapper {
            attribute: bucket.kind.selector_text(),
            condition: bucket.kind.condition(),
            style_key: key.clone(),
        });
        output.styles.push((key, bucket.style));
    }

    if let Some(bucket) = ctx.sibling.take() {
        let key = keys.allocate(&format!("{}{}", base_key, bucket.kind.suffix()));
        annotations.sibling_wrapper = Some(SiblingWrapper {
            combinator: bucket.kind.combinator().to_string(),
            style_key: key.clone(),
        });
        output.styles.push((key, bucket.style));
    }

    annotations.needs_wrapper = ctx.needs_wrapper
        || !annotations.variant_style_keys.is_empty()
        || !annotations.variant_dimensions.is_empty()
        || !annotations.compound_variants.is_empty()
        || !annotations.style_functions.is_empty()
        || !annotations.attribute_wrappers.is_empty()
        || annotations.sibling_wrapper.is_some();

    let intrinsic = decl.intrinsic_tag().is_some();
    for prop in &ctx.consumed_props {
        if prop.starts_with('$') || (intrinsic && !is_html_attribute(prop)) {
            annotations.forward_exclusions.insert(prop.clone());
        }
    }

    output
}

/// Props whose variants form a closed lookup: only `===` tests against
/// members of a declared enumeration, and no other condition reads them
fn dimension_props(
    decl: &StyledDeclaration,
    variants: &IndexMap<String, VariantBucket>,
    compounds: &[Compound],
) -> FxHashSet<String> {
    let mut candidates: FxHashSet<String> = FxHashSet::default();
    let mut excluded: FxHashSet<String> = FxHashSet::default();

    for bucket in variants.values() {
        match &bucket.condition {
            VariantCondition::Equals(prop, literal) => {
                let declared = decl
                    .prop_types
                    .get(prop)
                    .and_then(|ty| ty.closed_values())
                    .is_some_and(|values| values.contains(literal));
                if declared {
                    candidates.insert(prop.clone());
                } else {
                    excluded.insert(prop.clone());
                }
            }
            other => excluded.extend(other.props().into_iter().map(str::to_string)),
        }
    }
    for compound in compounds {
        excluded.extend(compound.first.props().into_iter().map(str::to_string));
        excluded.extend(compound.second.props().into_iter().map(str::to_string));
    }

    candidates.retain(|prop| !excluded.contains(prop));
    candidates
}

/// A variant that sets a property plainly keeps the base object's pseudo
/// entries for it, so `:hover` still wins over the variant default
fn carry_pseudo_entries(base: &StyleObject, variants: &mut IndexMap<String, VariantBucket>) {
    for bucket in variants.values_mut() {
        let carried: Vec<(String, StyleValue)> = bucket
            .style
            .iter()
            .filter(|(_, value)| is_plain(value))
            .filter_map(|(property, value)| {
                let base_map = base.get(property)?.as_conditions()?;
                if base_map.conditional_entries().next().is_none() {
                    return None;
                }
                let mut map = ConditionMap::with_default(value.clone());
                for (key, entry) in base_map.conditional_entries() {
                    map.insert(key.clone(), entry.clone());
                }
                Some((property.clone(), StyleValue::Conditions(map)))
            })
            .collect();
        for (property, value) in carried {
            bucket.style.insert(property, value);
        }
    }
}

/// `A && B` where A sets a property plainly and B sets it under conditions:
/// A's value with B's conditional entries
fn synthesize_compounds(variants: &IndexMap<String, VariantBucket>) -> Vec<Compound> {
    let mut compounds = Vec::new();
    for (a_text, a) in variants {
        for (b_text, b) in variants {
            if a_text == b_text || shares_prop(&a.condition, &b.condition) {
                continue;
            }
            let mut style = StyleObject::new();
            for (property, value) in a.style.iter() {
                if !is_plain(value) {
                    continue;
                }
                let Some(b_map) = b.style.get(property).and_then(StyleValue::as_conditions) else {
                    continue;
                };
                if b_map.conditional_entries().next().is_none() {
                    continue;
                }
                let mut map = ConditionMap::with_default(value.clone());
                for (key, entry) in b_map.conditional_entries() {
                    map.insert(key.clone(), entry.clone());
                }
                style.insert(property.clone(), StyleValue::Conditions(map));
            }
            if !style.is_empty() {
                compounds.push(Compound {
                    first: a.condition.clone(),
                    second: b.condition.clone(),
                    style,
                });
            }
        }
    }
    compounds
}

fn is_plain(value: &StyleValue) -> bool {
    !matches!(value, StyleValue::Conditions(_) | StyleValue::Object(_))
}

/// Conditions over the same prop are either exclusive or redundant together
fn shares_prop(a: &VariantCondition, b: &VariantCondition) -> bool {
    let b_props = b.props();
    a.props().iter().any(|p| b_props.contains(p))
}
