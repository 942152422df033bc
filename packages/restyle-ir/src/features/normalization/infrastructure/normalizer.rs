//! CssRuleNormalizer - raw rule tree → flat `CssRule` list
//!
//! Declarations attach to the current selector scope (`&` at the top), rule
//! nodes open a nested scope and at-rule nodes push onto the at-rule stack.
//! Rules with identical selector and at-rule stack are merged; the merged rule
//! keeps the position where that identity was first seen.
//!
//! Known limitation: a declaration whose text starts with a lone slot
//! placeholder followed by more text (`__SLOT_0__ color: red`) is split into
//! a composition declaration and the remaining declaration. This undoes one
//! upstream pre-parser's habit of gluing a mixin interpolation onto the next
//! declaration. Other merged shapes are not recovered.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::features::normalization::domain::{NormalizedRules, RawNode};
use crate::shared::models::slot::{
    component_placeholder, leading_slot_placeholder, parse_slot_placeholder, split_placeholders,
};
use crate::shared::models::{CssDeclaration, CssRule, CssValue, SlotTable};
use crate::shared::utils::css_value::{split_commas, split_top_level, strip_important};

lazy_static! {
    static ref DECLARATION_RE: Regex =
        Regex::new(r"^\s*(-{0,2}[A-Za-z_][-\w]*)\s*:\s*([\s\S]*?)\s*;?\s*$").unwrap();
    static ref SELECTOR_SLOT_RE: Regex = Regex::new(r"__SLOT_(\d+)__").unwrap();
    static ref SELF_RUN_RE: Regex = Regex::new(r"&{2,}").unwrap();
}

type RuleIdentity = (String, Vec<String>);

#[derive(Debug, Default, Clone, Copy)]
pub struct CssRuleNormalizer;

impl CssRuleNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Flatten a raw rule tree
    pub fn normalize(&self, nodes: &[RawNode], slots: &SlotTable) -> NormalizedRules {
        let mut acc = RuleAccumulator::default();
        self.walk(nodes, "&", &[], slots, &mut acc);
        acc.finish()
    }

    fn walk(
        &self,
        nodes: &[RawNode],
        scope: &str,
        at_rules: &[String],
        slots: &SlotTable,
        acc: &mut RuleAccumulator,
    ) {
        for node in nodes {
            match node {
                RawNode::Declaration { text } => {
                    for piece in split_top_level(text, |c| c == ';') {
                        match parse_declaration_text(&piece) {
                            Some(decls) => acc.push(scope, at_rules, decls),
                            None => {
                                debug!(text = %piece, "dropping unmatched declaration text");
                                acc.dropped.push(piece);
                            }
                        }
                    }
                }
                RawNode::Rule { selector, children } => {
                    let selector = normalize_selector(selector, slots);
                    let nested = if selector.is_empty() {
                        scope.to_string()
                    } else {
                        nest_selector(scope, &selector)
                    };
                    self.walk(children, &nested, at_rules, slots, acc);
                }
                RawNode::AtRule {
                    name,
                    params,
                    children,
                } => {
                    let mut stack = at_rules.to_vec();
                    stack.push(at_rule_prelude(name, params));
                    self.walk(children, scope, &stack, slots, acc);
                }
            }
        }
    }
}

#[derive(Default)]
struct RuleAccumulator {
    rules: IndexMap<RuleIdentity, Vec<CssDeclaration>>,
    dropped: Vec<String>,
}

impl RuleAccumulator {
    fn push(&mut self, selector: &str, at_rules: &[String], decls: Vec<CssDeclaration>) {
        self.rules
            .entry((selector.to_string(), at_rules.to_vec()))
            .or_default()
            .extend(decls);
    }

    fn finish(self) -> NormalizedRules {
        let rules = self
            .rules
            .into_iter()
            .filter(|(_, decls)| !decls.is_empty())
            .map(|((selector, at_rules), declarations)| CssRule {
                selector,
                at_rules,
                declarations,
            })
            .collect();
        NormalizedRules {
            rules,
            dropped: self.dropped,
        }
    }
}

/// `@media (x)`; `name` may or may not carry its `@`
fn at_rule_prelude(name: &str, params: &str) -> String {
    let name = name.trim().trim_start_matches('@');
    let params = params.split_whitespace().collect::<Vec<_>>().join(" ");
    if params.is_empty() {
        format!("@{}", name)
    } else {
        format!("@{} {}", name, params)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Declarations
// ═══════════════════════════════════════════════════════════════════════════

/// Parse one declaration's text; `None` when it matches no known shape
pub fn parse_declaration_text(text: &str) -> Option<Vec<CssDeclaration>> {
    let text = text.trim().trim_end_matches(';').trim();
    if text.is_empty() {
        return None;
    }

    if let Some(slot) = parse_slot_placeholder(text) {
        return Some(vec![CssDeclaration::composition(slot)]);
    }

    if let Some((slot, len)) = leading_slot_placeholder(text) {
        let rest = text[len..].trim();
        if !rest.starts_with(':') {
            let mut out = vec![CssDeclaration::composition(slot)];
            out.extend(parse_declaration_text(rest)?);
            return Some(out);
        }
        // interpolated property name
        return None;
    }

    let caps = DECLARATION_RE.captures(text)?;
    let property = caps[1].to_string();
    let raw_value = caps[2].trim().to_string();
    if raw_value.is_empty() {
        return None;
    }
    let (value_text, important) = strip_important(&raw_value);
    let value = CssValue::from_parts(split_placeholders(&value_text));

    let property = if property.starts_with("--") {
        property
    } else {
        property.to_ascii_lowercase()
    };
    Some(vec![CssDeclaration {
        property,
        value,
        important,
        raw_value,
    }])
}

// ═══════════════════════════════════════════════════════════════════════════
// Selectors
// ═══════════════════════════════════════════════════════════════════════════

/// Normalize one selector as written in a rule node:
/// identifier slots become component references, `&&` collapses to `&`,
/// combinators get single spaces.
pub fn normalize_selector(selector: &str, slots: &SlotTable) -> String {
    let with_components = SELECTOR_SLOT_RE.replace_all(selector, |caps: &regex::Captures| {
        let component = caps[1]
            .parse::<usize>()
            .ok()
            .and_then(|index| slots.get(index))
            .and_then(|slot| slot.as_identifier());
        match component {
            Some(name) => component_placeholder(name),
            None => caps[0].to_string(),
        }
    });
    let collapsed = SELF_RUN_RE.replace_all(&with_components, "&");
    split_commas(&collapsed)
        .iter()
        .map(|part| space_combinators(part))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Single spaces around top-level `>`, `+`, `~`; runs of whitespace collapsed
fn space_combinators(selector: &str) -> String {
    let mut out = String::with_capacity(selector.len() + 4);
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for c in selector.chars() {
        if let Some(q) = quote {
            out.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => {
                quote = Some(c);
                out.push(c);
            }
            '(' | '[' => {
                depth += 1;
                out.push(c);
            }
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                out.push(c);
            }
            '>' | '+' | '~' if depth == 0 => {
                out.push(' ');
                out.push(c);
                out.push(' ');
            }
            c if c.is_whitespace() && depth == 0 => out.push(' '),
            c => out.push(c),
        }
    }
    out.split(' ')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Combine a parent scope with a nested selector. Parts without `&` are
/// descendants of the parent; comma groups expand to every pairing.
pub fn nest_selector(parent: &str, child: &str) -> String {
    let parents = split_commas(parent);
    let mut out = Vec::new();
    for child_part in split_commas(child) {
        for parent_part in &parents {
            let combined = if child_part.contains('&') {
                child_part.replace('&', parent_part)
            } else {
                format!("{} {}", parent_part, child_part)
            };
            let combined = SELF_RUN_RE.replace_all(&combined, "&").into_owned();
            if !out.contains(&combined) {
                out.push(combined);
            }
        }
    }
    out.join(", ")
}

// ═══════════════════════════════════════════════════════════════════════════
// Flatten back
// ═══════════════════════════════════════════════════════════════════════════

/// Render flat rules back into a raw tree; normalizing the result yields the
/// same rules
pub fn to_raw_nodes(rules: &[CssRule]) -> Vec<RawNode> {
    rules
        .iter()
        .flat_map(|rule| {
            let declarations: Vec<RawNode> = rule
                .declarations
                .iter()
                .map(|decl| RawNode::declaration(raw_declaration_text(decl)))
                .collect();
            let mut nodes = if rule.selector == "&" {
                declarations
            } else {
                vec![RawNode::rule(rule.selector.clone(), declarations)]
            };
            for prelude in rule.at_rules.iter().rev() {
                let body = prelude.trim_start_matches('@');
                let (name, params) = body.split_once(' ').unwrap_or((body, ""));
                nodes = vec![RawNode::at_rule(name, params, nodes)];
            }
            nodes
        })
        .collect()
}

fn raw_declaration_text(decl: &CssDeclaration) -> String {
    if decl.is_composition() {
        decl.value.to_template_text()
    } else {
        format!("{}: {}", decl.property, decl.raw_value)
    }
}
