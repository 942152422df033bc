//! Logical blocks: `p => p.$active && "color: red;"`, `p => p.$flat || css`...``
//!
//! The right-hand side applies only when the left-hand side selects it, so the
//! result is one variant and no base.

use crate::features::expression_builder::JsExpr;
use crate::features::resolution::domain::{ResolutionOutcome, SlotRequest, ValueCase, VariantCase};
use crate::features::resolution::ports::{RecognizeContext, Recognizer};

use super::blocks::{branch_block, BranchError};
use super::props::PropsScope;
use crate::shared::models::StyleValue;
use crate::shared::utils::property_map::static_scalar;

#[derive(Debug, Default, Clone, Copy)]
pub struct LogicalBlockRecognizer;

impl Recognizer for LogicalBlockRecognizer {
    fn name(&self) -> &'static str {
        "logical-block"
    }

    fn recognize(
        &self,
        request: &SlotRequest<'_>,
        ctx: &mut RecognizeContext<'_>,
    ) -> Option<ResolutionOutcome> {
        let (scope, body) = PropsScope::from_arrow(request.expr)?;
        let JsExpr::Binary { op, left, right } = body else {
            return None;
        };
        let when = match op.as_str() {
            "&&" => scope.condition(left)?,
            // `a || x` applies `x` exactly when `a` is falsy
            "||" => scope.condition(left)?.negate()?,
            _ => return None,
        };

        if request.is_composition() {
            return match branch_block(right, ctx) {
                Ok(style) => Some(ResolutionOutcome::SplitVariants(vec![VariantCase {
                    when: Some(when),
                    style,
                }])),
                Err(BranchError::Unrecognized) => None,
                Err(BranchError::Abort(outcome)) => Some(outcome),
            };
        }

        // `||` in value position yields the prop value itself when truthy
        if op != "&&" {
            return None;
        }
        let value = match right.as_ref() {
            JsExpr::String(text) if !text.is_empty() => StyleValue::string(text.as_str()),
            JsExpr::Number(text) => static_scalar(text),
            other => StyleValue::string(other.static_template_text().filter(|t| !t.is_empty())?),
        };
        Some(ResolutionOutcome::SplitVariantsResolvedValue(vec![ValueCase {
            when: Some(when),
            value: Some(value),
        }]))
    }
}
