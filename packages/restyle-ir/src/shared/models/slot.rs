//! Interpolation slots
//!
//! Every `${...}` of a styled template is stored once in the owning
//! declaration's [`SlotTable`] and referenced everywhere else by index.
//! Inside CSS text a slot is spelled `__SLOT_<n>__`; a slot used as a
//! component reference inside a selector is normalized to
//! `__COMPONENT_<Name>__`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::css_rule::ValuePart;
use super::span::Span;

pub type SlotIndex = usize;

lazy_static! {
    static ref SLOT_RE: Regex = Regex::new(r"__SLOT_(\d+)__").unwrap();
    static ref EXACT_SLOT_RE: Regex = Regex::new(r"^__SLOT_(\d+)__$").unwrap();
    static ref COMPONENT_RE: Regex = Regex::new(r"__COMPONENT_([A-Za-z_$][\w$]*)__").unwrap();
}

/// One interpolation slot's originating expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotExpr {
    /// Expression source text (JS/TS)
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl SlotExpr {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// A bare identifier (`Icon`, `truncate`), the shape used for component
    /// references and composition helpers
    pub fn as_identifier(&self) -> Option<&str> {
        let text = self.source.trim();
        let mut chars = text.chars();
        let first = chars.next()?;
        if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
            return None;
        }
        if chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
            Some(text)
        } else {
            None
        }
    }
}

/// Arena of slot expressions owned by one declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotTable {
    slots: Vec<SlotExpr>,
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, slot: SlotExpr) -> SlotIndex {
        self.slots.push(slot);
        self.slots.len() - 1
    }

    pub fn get(&self, index: SlotIndex) -> Option<&SlotExpr> {
        self.slots.get(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &SlotExpr)> {
        self.slots.iter().enumerate()
    }
}

impl FromIterator<SlotExpr> for SlotTable {
    fn from_iter<I: IntoIterator<Item = SlotExpr>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Placeholder helpers
// ═══════════════════════════════════════════════════════════════════════════

pub fn slot_placeholder(index: SlotIndex) -> String {
    format!("__SLOT_{}__", index)
}

pub fn component_placeholder(name: &str) -> String {
    format!("__COMPONENT_{}__", name)
}

/// `Some(n)` when `text` is exactly one slot placeholder
pub fn parse_slot_placeholder(text: &str) -> Option<SlotIndex> {
    EXACT_SLOT_RE
        .captures(text.trim())
        .and_then(|caps| caps[1].parse().ok())
}

/// Slot placeholder at the very start of `text`, with the byte length it spans
pub fn leading_slot_placeholder(text: &str) -> Option<(SlotIndex, usize)> {
    let m = SLOT_RE.find(text)?;
    if m.start() != 0 {
        return None;
    }
    let index = SLOT_RE.captures(m.as_str())?[1].parse().ok()?;
    Some((index, m.end()))
}

pub fn contains_slot_placeholder(text: &str) -> bool {
    SLOT_RE.is_match(text)
}

/// Component names referenced in a normalized selector, in order
pub fn component_references(selector: &str) -> Vec<String> {
    COMPONENT_RE
        .captures_iter(selector)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Split text on slot placeholders into alternating static/slot parts.
/// Empty static fragments are not emitted.
pub fn split_placeholders(text: &str) -> Vec<ValuePart> {
    let mut parts = Vec::new();
    let mut last = 0;
    for caps in SLOT_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            parts.push(ValuePart::Static(text[last..whole.start()].to_string()));
        }
        if let Ok(index) = caps[1].parse() {
            parts.push(ValuePart::Slot(index));
        }
        last = whole.end();
    }
    if last < text.len() {
        parts.push(ValuePart::Static(text[last..].to_string()));
    }
    parts
}
