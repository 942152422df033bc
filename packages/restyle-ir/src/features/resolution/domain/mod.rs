//! Resolution Domain - canonical outcomes of resolving one slot

use std::fmt;

use crate::features::expression_builder::JsExpr;
use crate::shared::models::{ExprValue, Literal, PropertyValues, ReasonCode, StyleValue};
use crate::shared::utils::naming::to_pascal_case;

// ═══════════════════════════════════════════════════════════════════════════
// Variant conditions
// ═══════════════════════════════════════════════════════════════════════════

/// Condition over render-time props under which a variant applies
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VariantCondition {
    /// `$disabled`
    Truthy(String),
    /// `!$disabled`
    Falsy(String),
    /// `size === "small"`
    Equals(String, Literal),
    /// `size !== "small"`
    NotEquals(String, Literal),
    /// Conjunction, in source order
    And(Vec<VariantCondition>),
}

impl VariantCondition {
    /// Textual inversion of a single test; `None` for conjunctions
    pub fn negate(&self) -> Option<VariantCondition> {
        match self {
            VariantCondition::Truthy(p) => Some(VariantCondition::Falsy(p.clone())),
            VariantCondition::Falsy(p) => Some(VariantCondition::Truthy(p.clone())),
            VariantCondition::Equals(p, v) => Some(VariantCondition::NotEquals(p.clone(), v.clone())),
            VariantCondition::NotEquals(p, v) => Some(VariantCondition::Equals(p.clone(), v.clone())),
            VariantCondition::And(_) => None,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            VariantCondition::Truthy(_) | VariantCondition::Equals(..) => true,
            VariantCondition::Falsy(_) | VariantCondition::NotEquals(..) => false,
            VariantCondition::And(parts) => parts.iter().any(VariantCondition::is_positive),
        }
    }

    /// Single tests this condition is made of
    pub fn parts(&self) -> Vec<&VariantCondition> {
        match self {
            VariantCondition::And(parts) => parts.iter().flat_map(|p| p.parts()).collect(),
            single => vec![single],
        }
    }

    /// Props the condition reads, in order
    pub fn props(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for part in self.parts() {
            let prop = match part {
                VariantCondition::Truthy(p)
                | VariantCondition::Falsy(p)
                | VariantCondition::Equals(p, _)
                | VariantCondition::NotEquals(p, _) => p.as_str(),
                VariantCondition::And(_) => continue,
            };
            if !out.contains(&prop) {
                out.push(prop);
            }
        }
        out
    }

    /// Build from a list of tests: one test stays itself, more become `And`
    pub fn all(mut parts: Vec<VariantCondition>) -> Option<VariantCondition> {
        match parts.len() {
            0 => None,
            1 => parts.pop(),
            _ => Some(VariantCondition::And(parts)),
        }
    }

    /// Style-key suffix: `Disabled`, `NotDisabled`, `SizeSmall`, `DisabledSizeSmall`
    pub fn key_suffix(&self) -> String {
        match self {
            VariantCondition::Truthy(p) => to_pascal_case(p),
            VariantCondition::Falsy(p) => format!("Not{}", to_pascal_case(p)),
            VariantCondition::Equals(p, v) => format!("{}{}", to_pascal_case(p), v.key_fragment()),
            VariantCondition::NotEquals(p, v) => {
                format!("{}Not{}", to_pascal_case(p), v.key_fragment())
            }
            VariantCondition::And(parts) => parts.iter().map(|p| p.key_suffix()).collect(),
        }
    }

    /// JS condition the wrapper evaluates, reading props off `props_ident`
    pub fn to_js(&self, props_ident: &str) -> String {
        let read = |p: &str| {
            if p.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
                format!("{}.{}", props_ident, p)
            } else {
                format!("{}[{:?}]", props_ident, p)
            }
        };
        match self {
            VariantCondition::Truthy(p) => read(p),
            VariantCondition::Falsy(p) => format!("!{}", read(p)),
            VariantCondition::Equals(p, v) => format!("{} === {}", read(p), v),
            VariantCondition::NotEquals(p, v) => format!("{} !== {}", read(p), v),
            VariantCondition::And(parts) => parts
                .iter()
                .map(|p| p.to_js(props_ident))
                .collect::<Vec<_>>()
                .join(" && "),
        }
    }
}

impl fmt::Display for VariantCondition {
    /// Condition text used as the variant bucket key
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantCondition::Truthy(p) => write!(f, "{}", p),
            VariantCondition::Falsy(p) => write!(f, "!{}", p),
            VariantCondition::Equals(p, v) => write!(f, "{} === {}", p, v),
            VariantCondition::NotEquals(p, v) => write!(f, "{} !== {}", p, v),
            VariantCondition::And(parts) => {
                let texts: Vec<String> = parts.iter().map(|p| p.to_string()).collect();
                write!(f, "{}", texts.join(" && "))
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Outcomes
// ═══════════════════════════════════════════════════════════════════════════

/// One branch of a split over whole style blocks; `when == None` is the base
#[derive(Debug, Clone, PartialEq)]
pub struct VariantCase {
    pub when: Option<VariantCondition>,
    pub style: PropertyValues,
}

/// One branch of a split over a single value; `value == None` means the
/// branch interpolates to nothing
#[derive(Debug, Clone, PartialEq)]
pub struct ValueCase {
    pub when: Option<VariantCondition>,
    pub value: Option<StyleValue>,
}

/// Dynamic style function: `(width) => ({ width })`
#[derive(Debug, Clone, PartialEq)]
pub struct StyleFunctionSpec {
    /// Suffix for the style key (`Width`)
    pub name_hint: String,
    pub params: Vec<String>,
    pub body: PropertyValues,
    /// Argument the wrapper passes, e.g. `props.width`
    pub call_arg: String,
    /// Props the call argument reads
    pub reads: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    ResolvedValue(ExprValue),
    EmitStyleFunction(StyleFunctionSpec),
    SplitVariants(Vec<VariantCase>),
    SplitVariantsResolvedValue(Vec<ValueCase>),
    /// Leave the file unconverted
    KeepOriginal { reason: ReasonCode, detail: String },
}

impl ResolutionOutcome {
    pub fn keep_original(reason: ReasonCode, detail: impl Into<String>) -> Self {
        ResolutionOutcome::KeepOriginal {
            reason,
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ResolutionOutcome::ResolvedValue(_) => "resolved-value",
            ResolutionOutcome::EmitStyleFunction(_) => "style-function",
            ResolutionOutcome::SplitVariants(_) => "split-variants",
            ResolutionOutcome::SplitVariantsResolvedValue(_) => "split-variants-value",
            ResolutionOutcome::KeepOriginal { .. } => "keep-original",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Request
// ═══════════════════════════════════════════════════════════════════════════

/// One slot and its CSS context
#[derive(Debug, Clone, Copy)]
pub struct SlotRequest<'a> {
    pub expr: &'a JsExpr,
    /// Expression source as written
    pub source: &'a str,
    /// CSS property; empty in composition position
    pub property: &'a str,
    pub selector: &'a str,
    pub at_rules: &'a [String],
}

impl SlotRequest<'_> {
    pub fn is_composition(&self) -> bool {
        self.property.is_empty()
    }
}
