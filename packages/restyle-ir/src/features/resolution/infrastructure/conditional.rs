//! Conditionals over prop reads
//!
//! `p => p.$disabled ? 0.5 : 1` and enumerations such as
//! `p => p.size === "sm" ? "4px" : p.size === "lg" ? "12px" : "8px"` become one
//! case per leaf. The leaf reached only through negative tests is the base.

use tracing::debug;

use crate::features::expression_builder::JsExpr;
use crate::features::resolution::domain::{
    ResolutionOutcome, SlotRequest, ValueCase, VariantCase, VariantCondition,
};
use crate::features::resolution::ports::{RecognizeContext, Recognizer};
use crate::shared::models::ReasonCode;

use super::blocks::{branch_block, branch_value, BranchError, BranchResult};
use super::props::PropsScope;

#[derive(Debug, Default, Clone, Copy)]
pub struct ConditionalRecognizer;

struct Leaf<'e> {
    conditions: Vec<VariantCondition>,
    expr: &'e JsExpr,
}

fn collect_leaves<'e>(
    expr: &'e JsExpr,
    scope: &PropsScope,
    path: &mut Vec<VariantCondition>,
    max_depth: usize,
    out: &mut Vec<Leaf<'e>>,
) -> BranchResult<()> {
    let JsExpr::Conditional {
        test,
        consequent,
        alternate,
    } = expr
    else {
        out.push(Leaf {
            conditions: path.clone(),
            expr,
        });
        return Ok(());
    };

    if path.len() >= max_depth {
        return Err(BranchError::Abort(ResolutionOutcome::keep_original(
            ReasonCode::KeepOriginal,
            format!("conditional chain is deeper than {} levels", max_depth),
        )));
    }
    let condition = scope.condition(test).ok_or(BranchError::Unrecognized)?;
    let negated = condition.negate().ok_or(BranchError::Unrecognized)?;

    path.push(condition);
    collect_leaves(consequent, scope, path, max_depth, out)?;
    path.pop();

    path.push(negated);
    collect_leaves(alternate, scope, path, max_depth, out)?;
    path.pop();
    Ok(())
}

/// Drop tests implied by others; `None` when the tests contradict each other
pub(crate) fn simplify(conditions: Vec<VariantCondition>) -> Option<Vec<VariantCondition>> {
    let mut out: Vec<VariantCondition> = Vec::new();
    for condition in conditions {
        if !out.contains(&condition) {
            out.push(condition);
        }
    }

    for a in &out {
        for b in &out {
            let contradiction = match (a, b) {
                (VariantCondition::Truthy(p), VariantCondition::Falsy(q)) => p == q,
                (VariantCondition::Equals(p, v), VariantCondition::NotEquals(q, w)) => p == q && v == w,
                (VariantCondition::Equals(p, v), VariantCondition::Equals(q, w)) => p == q && v != w,
                _ => false,
            };
            if contradiction {
                return None;
            }
        }
    }

    // `size === "lg"` already excludes `size !== "sm"`
    let pinned: Vec<String> = out
        .iter()
        .filter_map(|c| match c {
            VariantCondition::Equals(p, _) => Some(p.clone()),
            _ => None,
        })
        .collect();
    out.retain(|c| match c {
        VariantCondition::NotEquals(p, _) => !pinned.contains(p),
        _ => true,
    });
    Some(out)
}

/// Leaves with their final condition, base first; `None` on an unexpected
/// second base
fn arrange<'e>(leaves: Vec<Leaf<'e>>) -> Option<Vec<(Option<VariantCondition>, &'e JsExpr)>> {
    let mut base = None;
    let mut variants = Vec::new();
    for leaf in leaves {
        let Some(conditions) = simplify(leaf.conditions) else {
            continue;
        };
        if conditions.iter().all(|c| !c.is_positive()) {
            if base.is_some() {
                return None;
            }
            base = Some((None, leaf.expr));
        } else {
            variants.push((VariantCondition::all(conditions), leaf.expr));
        }
    }
    Some(base.into_iter().chain(variants).collect())
}

impl Recognizer for ConditionalRecognizer {
    fn name(&self) -> &'static str {
        "conditional"
    }

    fn recognize(
        &self,
        request: &SlotRequest<'_>,
        ctx: &mut RecognizeContext<'_>,
    ) -> Option<ResolutionOutcome> {
        let (scope, body) = PropsScope::from_arrow(request.expr)?;
        if !matches!(body, JsExpr::Conditional { .. }) {
            return None;
        }

        let mut leaves = Vec::new();
        let max_depth = ctx.config.max_conditional_depth;
        match collect_leaves(body, &scope, &mut Vec::new(), max_depth, &mut leaves) {
            Ok(()) => {}
            Err(BranchError::Unrecognized) => return None,
            Err(BranchError::Abort(outcome)) => return Some(outcome),
        }
        let arranged = arrange(leaves)?;
        debug!(source = request.source, cases = arranged.len(), "conditional split");

        let outcome = if request.is_composition() {
            arranged
                .into_iter()
                .map(|(when, expr)| Ok(VariantCase { when, style: branch_block(expr, ctx)? }))
                .collect::<BranchResult<Vec<_>>>()
                .map(ResolutionOutcome::SplitVariants)
        } else {
            arranged
                .into_iter()
                .map(|(when, expr)| {
                    Ok(ValueCase {
                        when,
                        value: branch_value(expr, &scope, ctx)?,
                    })
                })
                .collect::<BranchResult<Vec<_>>>()
                .map(ResolutionOutcome::SplitVariantsResolvedValue)
        };

        match outcome {
            Ok(outcome) => Some(outcome),
            Err(BranchError::Unrecognized) => None,
            Err(BranchError::Abort(outcome)) => Some(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Literal;

    fn eq(prop: &str, value: &str) -> VariantCondition {
        VariantCondition::Equals(prop.into(), Literal::string(value))
    }

    fn ne(prop: &str, value: &str) -> VariantCondition {
        VariantCondition::NotEquals(prop.into(), Literal::string(value))
    }

    #[test]
    fn test_simplify_drops_implied_negation() {
        assert_eq!(simplify(vec![ne("size", "a"), eq("size", "b")]), Some(vec![eq("size", "b")]));
    }

    #[test]
    fn test_simplify_detects_contradiction() {
        assert_eq!(simplify(vec![eq("size", "a"), ne("size", "a")]), None);
        assert_eq!(simplify(vec![eq("size", "a"), eq("size", "b")]), None);
        assert_eq!(
            simplify(vec![
                VariantCondition::Truthy("$on".into()),
                VariantCondition::Falsy("$on".into())
            ]),
            None
        );
    }

    #[test]
    fn test_simplify_keeps_other_props() {
        let conditions = vec![VariantCondition::Truthy("$a".into()), ne("size", "sm")];
        assert_eq!(simplify(conditions.clone()), Some(conditions));
    }
}
