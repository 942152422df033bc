//! Flat CSS rule IR
//!
//! A [`CssRule`] is one selector under one at-rule stack with its
//! declarations. Rules are produced by the normalizer and never mutated
//! afterwards.

use serde::{Deserialize, Serialize};

use super::slot::{slot_placeholder, SlotIndex};

/// One part of an interpolated value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuePart {
    Static(String),
    Slot(SlotIndex),
}

/// Declaration value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CssValue {
    Static(String),
    /// Ordered static/slot parts; contains at least one slot
    Interpolated(Vec<ValuePart>),
}

impl CssValue {
    /// Build from parts, collapsing to `Static` when no slot is present
    pub fn from_parts(parts: Vec<ValuePart>) -> Self {
        if parts.iter().any(|p| matches!(p, ValuePart::Slot(_))) {
            CssValue::Interpolated(parts)
        } else {
            CssValue::Static(
                parts
                    .into_iter()
                    .map(|p| match p {
                        ValuePart::Static(s) => s,
                        ValuePart::Slot(_) => String::new(),
                    })
                    .collect(),
            )
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, CssValue::Static(_))
    }

    /// Slot indices referenced by this value, in order
    pub fn slots(&self) -> Vec<SlotIndex> {
        match self {
            CssValue::Static(_) => Vec::new(),
            CssValue::Interpolated(parts) => parts
                .iter()
                .filter_map(|p| match p {
                    ValuePart::Slot(i) => Some(*i),
                    ValuePart::Static(_) => None,
                })
                .collect(),
        }
    }

    /// The value is exactly one slot with no static text around it
    pub fn single_slot(&self) -> Option<SlotIndex> {
        match self {
            CssValue::Interpolated(parts) => {
                let mut slots = parts.iter().filter(|p| match p {
                    ValuePart::Static(s) => !s.trim().is_empty(),
                    ValuePart::Slot(_) => true,
                });
                match (slots.next(), slots.next()) {
                    (Some(ValuePart::Slot(i)), None) => Some(*i),
                    _ => None,
                }
            }
            CssValue::Static(_) => None,
        }
    }

    /// Text with placeholders re-inserted
    pub fn to_template_text(&self) -> String {
        match self {
            CssValue::Static(s) => s.clone(),
            CssValue::Interpolated(parts) => parts
                .iter()
                .map(|p| match p {
                    ValuePart::Static(s) => s.clone(),
                    ValuePart::Slot(i) => slot_placeholder(*i),
                })
                .collect(),
        }
    }
}

/// One CSS declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CssDeclaration {
    /// Property name; empty for a pure-composition placeholder (`${mixin}`)
    pub property: String,
    pub value: CssValue,
    #[serde(default)]
    pub important: bool,
    /// Value text as written, including `!important`
    pub raw_value: String,
}

impl CssDeclaration {
    pub fn new(property: impl Into<String>, value: CssValue) -> Self {
        let raw_value = value.to_template_text();
        Self {
            property: property.into(),
            value,
            important: false,
            raw_value,
        }
    }

    pub fn static_value(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(property, CssValue::Static(value.into()))
    }

    /// Synthetic zero-property declaration standing for `${slot}` on its own
    pub fn composition(slot: SlotIndex) -> Self {
        Self::new("", CssValue::Interpolated(vec![ValuePart::Slot(slot)]))
    }

    pub fn is_composition(&self) -> bool {
        self.property.is_empty()
    }

    /// Declaration text as it would appear inside a rule body
    pub fn to_css_text(&self) -> String {
        if self.is_composition() {
            return self.value.to_template_text();
        }
        let mut text = format!("{}: {}", self.property, self.value.to_template_text());
        if self.important {
            text.push_str(" !important");
        }
        text
    }
}

/// One flat rule: selector + at-rule stack + declarations
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CssRule {
    /// Normalized selector, `&` for the component itself
    pub selector: String,
    /// Outermost first, e.g. `["@media (min-width: 600px)"]`
    #[serde(default)]
    pub at_rules: Vec<String>,
    pub declarations: Vec<CssDeclaration>,
}

impl CssRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            at_rules: Vec::new(),
            declarations: Vec::new(),
        }
    }

    pub fn with_at_rule(mut self, at_rule: impl Into<String>) -> Self {
        self.at_rules.push(at_rule.into());
        self
    }

    pub fn with_declaration(mut self, declaration: CssDeclaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Identity used when merging rules
    pub fn identity(&self) -> (&str, &[String]) {
        (&self.selector, &self.at_rules)
    }

    pub fn is_self(&self) -> bool {
        self.selector == "&" && self.at_rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_collapses_static() {
        let value = CssValue::from_parts(vec![ValuePart::Static("red".into())]);
        assert_eq!(value, CssValue::Static("red".into()));
    }

    #[test]
    fn test_single_slot_ignores_whitespace() {
        let value = CssValue::Interpolated(vec![
            ValuePart::Static(" ".into()),
            ValuePart::Slot(2),
        ]);
        assert_eq!(value.single_slot(), Some(2));

        let with_unit = CssValue::Interpolated(vec![
            ValuePart::Slot(2),
            ValuePart::Static("px".into()),
        ]);
        assert_eq!(with_unit.single_slot(), None);
        assert_eq!(with_unit.to_template_text(), "__SLOT_2__px");
    }

    #[test]
    fn test_declaration_text() {
        let mut decl = CssDeclaration::static_value("color", "red");
        decl.important = true;
        assert_eq!(decl.to_css_text(), "color: red !important");
        assert_eq!(CssDeclaration::composition(4).to_css_text(), "__SLOT_4__");
    }
}
