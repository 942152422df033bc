//! Normalization Domain - raw rule tree handed over by the CSS pre-parser

use serde::{Deserialize, Serialize};

use crate::shared::models::CssRule;

/// One node of the pre-parsed rule tree of a styled template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum RawNode {
    /// `color: __SLOT_0__` (text as the pre-parser produced it)
    Declaration { text: String },
    /// `&:hover { ... }`
    Rule {
        selector: String,
        children: Vec<RawNode>,
    },
    /// `@media (max-width: 600px) { ... }`; `name` is given without the `@`
    AtRule {
        name: String,
        params: String,
        children: Vec<RawNode>,
    },
}

impl RawNode {
    pub fn declaration(text: impl Into<String>) -> Self {
        RawNode::Declaration { text: text.into() }
    }

    pub fn rule(selector: impl Into<String>, children: Vec<RawNode>) -> Self {
        RawNode::Rule {
            selector: selector.into(),
            children,
        }
    }

    pub fn at_rule(name: impl Into<String>, params: impl Into<String>, children: Vec<RawNode>) -> Self {
        RawNode::AtRule {
            name: name.into(),
            params: params.into(),
            children,
        }
    }
}

/// Normalizer output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRules {
    pub rules: Vec<CssRule>,
    /// Declaration text that matched no `property: value` shape
    pub dropped: Vec<String>,
}
