//! Interpolated value → shorthand tokens
//!
//! Static text is split on whitespace outside parentheses; a slot stays glued
//! to the text touching it, so `${size}px` or `rgba(0, 0, 0, ${alpha})` is one
//! token. A token mixing text and runtime values becomes a template literal.

use rustc_hash::FxHashMap;

use crate::shared::models::{SlotIndex, StyleValue, ValuePart};
use crate::shared::utils::property_map::{template_literal, ValueToken};

/// Build tokens for `parts`, taking each slot's value from `values`.
/// `None` when a referenced slot has no value.
pub fn value_tokens(
    parts: &[ValuePart],
    values: &FxHashMap<SlotIndex, StyleValue>,
) -> Option<Vec<ValueToken>> {
    let mut builder = TokenBuilder::default();
    for part in parts {
        match part {
            ValuePart::Static(chunk) => builder.push_text(chunk),
            ValuePart::Slot(index) => match values.get(index)? {
                // "0 auto" from a branch is as many tokens as the same static text
                StyleValue::String(s) => builder.push_text(s),
                value => builder.push_value(value.clone()),
            },
        }
    }
    Some(builder.finish())
}

#[derive(Default)]
struct TokenBuilder {
    atoms: Vec<Vec<ValueToken>>,
    current: Vec<ValueToken>,
    text: String,
    depth: i32,
}

impl TokenBuilder {
    fn push_text(&mut self, chunk: &str) {
        for c in chunk.chars() {
            match c {
                '(' => self.depth += 1,
                ')' => self.depth -= 1,
                _ => {}
            }
            if c.is_whitespace() && self.depth <= 0 {
                self.end_atom();
            } else {
                self.text.push(c);
            }
        }
    }

    fn push_value(&mut self, value: StyleValue) {
        flush_text(&mut self.text, &mut self.current);
        self.current.push(ValueToken::Value(value));
    }

    fn end_atom(&mut self) {
        flush_text(&mut self.text, &mut self.current);
        if !self.current.is_empty() {
            self.atoms.push(std::mem::take(&mut self.current));
        }
    }

    fn finish(mut self) -> Vec<ValueToken> {
        self.end_atom();
        self.atoms.into_iter().map(atom_token).collect()
    }
}

fn flush_text(text: &mut String, current: &mut Vec<ValueToken>) {
    if !text.is_empty() {
        current.push(ValueToken::Static(std::mem::take(text)));
    }
}

fn atom_token(mut atom: Vec<ValueToken>) -> ValueToken {
    if atom.len() == 1 {
        if let Some(token) = atom.pop() {
            return token;
        }
    }
    // numbers inside a larger token are plain text
    let parts: Vec<ValueToken> = atom
        .into_iter()
        .map(|token| match token {
            ValueToken::Value(StyleValue::Number(n)) => ValueToken::Static(n.to_string()),
            other => other,
        })
        .collect();
    if parts.iter().all(|t| matches!(t, ValueToken::Static(_))) {
        let text = parts
            .into_iter()
            .map(|t| match t {
                ValueToken::Static(s) => s,
                ValueToken::Value(_) => String::new(),
            })
            .collect();
        return ValueToken::Static(text);
    }
    ValueToken::Value(template_literal(&parts))
}
