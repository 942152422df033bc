//! Styled declarations and the lowering annotations attached to them

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::css_rule::CssRule;
use super::literal::Literal;
use super::slot::{SlotExpr, SlotIndex, SlotTable};
use super::span::Span;

/// What a styled declaration renders
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum DeclarationBase {
    /// `styled.button`, `styled("a")`
    Intrinsic(String),
    /// `styled(Link)`
    Component(String),
    /// `const truncate = css\`...\`` helper / mixin
    Helper,
}

/// Declared type of a prop, as far as the front end could tell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "values")]
pub enum PropType {
    Boolean,
    /// Closed union of literals (`"small" | "medium" | "large"`)
    Enum(Vec<Literal>),
    Other,
}

impl PropType {
    /// A closed enumeration with at least two members
    pub fn closed_values(&self) -> Option<&[Literal]> {
        match self {
            PropType::Enum(values) if values.len() >= 2 => Some(values),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Lowering annotations
// ═══════════════════════════════════════════════════════════════════════════

/// Closed set of mutually exclusive variants over one enumerated prop,
/// renderable as a single lookup (`styles[size]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDimension {
    pub prop_name: String,
    /// Literal text → style key
    pub cases: IndexMap<String, String>,
    /// Every member of the prop's declared enumeration
    pub declared_values: Vec<Literal>,
}

/// Variant applied only when every condition holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundVariant {
    pub conditions: Vec<String>,
    pub style_key: String,
}

/// A dynamic style function and the arguments the wrapper passes to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleFunctionUse {
    pub style_key: String,
    pub call_args: Vec<String>,
}

/// Style applied by the wrapper when an attribute condition holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeWrapper {
    /// Attribute selector text, e.g. `type="checkbox"`
    pub attribute: String,
    /// JS condition the wrapper evaluates, e.g. `props.type === "checkbox"`
    pub condition: String,
    pub style_key: String,
}

/// Style applied when the element follows a sibling of the same component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiblingWrapper {
    /// `+` (adjacent) or `~` (general)
    pub combinator: String,
    pub style_key: String,
}

/// Results of lowering one declaration, consumed by code generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoweringAnnotations {
    pub style_key: Option<String>,
    pub needs_wrapper: bool,
    /// Props consumed by styling that must not reach the DOM
    pub forward_exclusions: BTreeSet<String>,
    /// Condition text → style key, for independently toggled variants
    pub variant_style_keys: IndexMap<String, String>,
    pub variant_dimensions: Vec<VariantDimension>,
    pub compound_variants: Vec<CompoundVariant>,
    pub style_functions: Vec<StyleFunctionUse>,
    pub attribute_wrappers: Vec<AttributeWrapper>,
    pub sibling_wrapper: Option<SiblingWrapper>,
    /// Composed style keys applied before this declaration's own key
    pub extra_style_keys: Vec<String>,
    /// Some descendant override conditions on this element's state
    pub is_ancestor_marker: bool,
}

// ═══════════════════════════════════════════════════════════════════════════
// Declaration
// ═══════════════════════════════════════════════════════════════════════════

/// One extracted styled component (or `css` helper)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledDeclaration {
    pub local_name: String,
    pub base: DeclarationBase,
    pub rules: Vec<CssRule>,
    #[serde(default)]
    pub slots: SlotTable,
    #[serde(default)]
    pub prop_types: IndexMap<String, PropType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(default)]
    pub annotations: LoweringAnnotations,
}

impl StyledDeclaration {
    pub fn new(local_name: impl Into<String>, base: DeclarationBase) -> Self {
        Self {
            local_name: local_name.into(),
            base,
            rules: Vec::new(),
            slots: SlotTable::new(),
            prop_types: IndexMap::new(),
            span: None,
            annotations: LoweringAnnotations::default(),
        }
    }

    /// `styled.<tag>`
    pub fn intrinsic(local_name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::new(local_name, DeclarationBase::Intrinsic(tag.into()))
    }

    /// `css` helper
    pub fn helper(local_name: impl Into<String>) -> Self {
        Self::new(local_name, DeclarationBase::Helper)
    }

    pub fn with_rule(mut self, rule: CssRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_rules(mut self, rules: Vec<CssRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn with_slot(mut self, source: impl Into<String>) -> Self {
        self.slots.push(SlotExpr::new(source));
        self
    }

    pub fn with_prop_type(mut self, prop: impl Into<String>, ty: PropType) -> Self {
        self.prop_types.insert(prop.into(), ty);
        self
    }

    pub fn slot(&self, index: SlotIndex) -> Option<&SlotExpr> {
        self.slots.get(index)
    }

    pub fn intrinsic_tag(&self) -> Option<&str> {
        match &self.base {
            DeclarationBase::Intrinsic(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn is_helper(&self) -> bool {
        matches!(self.base, DeclarationBase::Helper)
    }

    /// Every slot referenced from a rule exists in the slot table
    pub fn slots_are_consistent(&self) -> bool {
        self.rules
            .iter()
            .flat_map(|rule| rule.declarations.iter())
            .flat_map(|decl| decl.value.slots())
            .all(|index| index < self.slots.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::css_rule::{CssDeclaration, CssValue, ValuePart};

    #[test]
    fn test_slot_consistency() {
        let rule = CssRule::new("&").with_declaration(CssDeclaration::new(
            "color",
            CssValue::Interpolated(vec![ValuePart::Slot(1)]),
        ));
        let decl = StyledDeclaration::intrinsic("Button", "button")
            .with_rule(rule)
            .with_slot("p => p.color");
        assert!(!decl.slots_are_consistent());
        let decl = decl.with_slot("p => p.other");
        assert!(decl.slots_are_consistent());
    }

    #[test]
    fn test_enum_prop_type_needs_two_members() {
        assert!(PropType::Enum(vec![Literal::string("a")]).closed_values().is_none());
        assert_eq!(
            PropType::Enum(vec![Literal::string("a"), Literal::string("b")])
                .closed_values()
                .map(|v| v.len()),
            Some(2)
        );
    }

    #[test]
    fn test_declaration_json_roundtrip_shape() {
        let json = r#"{
            "local_name": "Title",
            "base": {"kind": "intrinsic", "name": "h1"},
            "rules": [{"selector": "&", "declarations": [
                {"property": "color", "value": {"static": "red"}, "raw_value": "red"}
            ]}],
            "prop_types": {"size": {"kind": "enum", "values": ["s", "m"]}}
        }"#;
        let decl: StyledDeclaration = serde_json::from_str(json).unwrap();
        assert_eq!(decl.intrinsic_tag(), Some("h1"));
        assert_eq!(decl.rules[0].declarations[0].property, "color");
        assert!(decl.prop_types["size"].closed_values().is_some());
    }
}
