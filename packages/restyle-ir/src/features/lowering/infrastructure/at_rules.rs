//! At-rule stack → condition keys

use crate::shared::models::ConditionKey;

const CONDITIONAL_AT_RULES: &[&str] = &["@media", "@supports", "@container"];

fn at_rule_name(at_rule: &str) -> &str {
    let at_rule = at_rule.trim();
    at_rule
        .find(|c: char| c.is_whitespace() || c == '(')
        .map(|end| &at_rule[..end])
        .unwrap_or(at_rule)
}

/// Condition keys for an at-rule stack, outermost first. Nested `@media`
/// conditions collapse into one key joined with `and`. `Err` carries the first
/// at-rule that cannot be expressed as a condition.
pub fn at_rule_path(at_rules: &[String]) -> Result<Vec<ConditionKey>, String> {
    let mut path = Vec::new();
    let mut media: Vec<String> = Vec::new();

    for at_rule in at_rules {
        let name = at_rule_name(at_rule);
        if !CONDITIONAL_AT_RULES.contains(&name) {
            return Err(at_rule.clone());
        }
        let prelude = at_rule.trim()[name.len()..].trim();
        if prelude.is_empty() {
            return Err(at_rule.clone());
        }
        if name == "@media" {
            media.push(prelude.to_string());
            continue;
        }
        if !media.is_empty() {
            path.push(media_key(&std::mem::take(&mut media)));
        }
        path.push(ConditionKey::AtRule(format!("{} {}", name, prelude)));
    }
    if !media.is_empty() {
        path.push(media_key(&media));
    }
    Ok(path)
}

fn media_key(conditions: &[String]) -> ConditionKey {
    ConditionKey::AtRule(format!("@media {}", conditions.join(" and ")))
}
