//! Inline-style fallback: an arrow computing only from its own props is
//! forwarded verbatim as a style function argument (reported as a warning)

use crate::features::resolution::domain::{ResolutionOutcome, SlotRequest, StyleFunctionSpec};
use crate::features::resolution::ports::{RecognizeContext, Recognizer};
use crate::shared::models::{ReasonCode, StyleValue};
use crate::shared::utils::naming::to_pascal_case;

use super::forward::{function_body, function_param};
use super::props::PropsScope;

#[derive(Debug, Default, Clone, Copy)]
pub struct InlineFallbackRecognizer;

impl Recognizer for InlineFallbackRecognizer {
    fn name(&self) -> &'static str {
        "inline-fallback"
    }

    fn recognize(
        &self,
        request: &SlotRequest<'_>,
        ctx: &mut RecognizeContext<'_>,
    ) -> Option<ResolutionOutcome> {
        if !ctx.config.allow_inline_style_fallback || request.is_composition() {
            return None;
        }
        let (scope, body) = PropsScope::from_arrow(request.expr)?;
        if body.has_opaque_parts() {
            return None;
        }
        let call_arg = scope.to_props_expr(body)?;
        let reads = scope.reads(body);
        if reads.is_empty() {
            return None;
        }

        let param = function_param(request.property);
        let body = match function_body(request.property, StyleValue::expr(param.clone())) {
            Ok(body) => body,
            Err(outcome) => return Some(outcome),
        };

        ctx.warn(
            ReasonCode::InlineStyleFallback,
            format!(
                "`{}: {}` is forwarded as an inline style",
                request.property, request.source
            ),
        );
        Some(ResolutionOutcome::EmitStyleFunction(StyleFunctionSpec {
            name_hint: to_pascal_case(request.property),
            params: vec![param],
            body,
            call_arg: call_arg.to_string(),
            reads,
        }))
    }
}
