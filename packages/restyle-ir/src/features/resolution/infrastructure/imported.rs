//! Imported symbols: single-literal calls (`color("primary")`) and value
//! paths (`tokens.space.md`), bare or as the body of a slot arrow

use crate::features::expression_builder::JsExpr;
use crate::features::resolution::domain::{ResolutionOutcome, SlotRequest};
use crate::features::resolution::ports::{RecognizeContext, Recognizer, ResolveRequest};
use crate::shared::models::ReasonCode;

use super::blocks::{imported_value_request, BranchError};
use super::props::PropsScope;

/// Expression and scope a bare slot or a slot arrow evaluates
fn evaluated(expr: &JsExpr) -> (PropsScope, &JsExpr) {
    PropsScope::from_arrow(expr).unwrap_or_else(|| (PropsScope::empty(), expr))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ImportedCallRecognizer;

impl Recognizer for ImportedCallRecognizer {
    fn name(&self) -> &'static str {
        "imported-call"
    }

    fn recognize(
        &self,
        request: &SlotRequest<'_>,
        ctx: &mut RecognizeContext<'_>,
    ) -> Option<ResolutionOutcome> {
        if request.is_composition() {
            return None;
        }
        let (scope, body) = evaluated(request.expr);
        let JsExpr::Call { callee, args } = body else {
            return None;
        };
        let (root, path) = callee.member_path()?;
        if scope.is_bound(root) {
            return None;
        }
        let import = ctx.file.import_for(root)?.clone();

        let imported_name = match path.as_slice() {
            [] if !import.is_namespace() => import.imported.clone(),
            [name] if import.is_namespace() => name.to_string(),
            _ => return None,
        };

        if ctx.file.is_mutated(root) {
            return Some(ResolutionOutcome::keep_original(
                ReasonCode::MutatedImport,
                format!("`{}` is imported from `{}` and mutated in this file", root, import.source),
            ));
        }

        let argument = match args.as_slice() {
            [JsExpr::String(text)] => text.clone(),
            [single] => match single.static_template_text() {
                Some(text) => text,
                None => {
                    return Some(ResolutionOutcome::keep_original(
                        ReasonCode::KeepOriginal,
                        format!("`{}` is called with `{}`; only a string literal argument can be resolved", callee, single),
                    ))
                }
            },
            _ => {
                return Some(ResolutionOutcome::keep_original(
                    ReasonCode::KeepOriginal,
                    format!("`{}` is called with {} arguments; expected exactly one", callee, args.len()),
                ))
            }
        };

        let lookup = ResolveRequest::ImportedCall {
            local_name: root.to_string(),
            imported_name,
            source_module: import.source.clone(),
            argument,
        };
        Some(match ctx.lookup(&lookup) {
            Ok(value) => ResolutionOutcome::ResolvedValue(value),
            Err(outcome) => outcome,
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ImportedValueRecognizer;

impl Recognizer for ImportedValueRecognizer {
    fn name(&self) -> &'static str {
        "imported-value"
    }

    fn recognize(
        &self,
        request: &SlotRequest<'_>,
        ctx: &mut RecognizeContext<'_>,
    ) -> Option<ResolutionOutcome> {
        if request.is_composition() {
            return None;
        }
        let (scope, body) = evaluated(request.expr);
        let lookup = match imported_value_request(body, &scope, ctx) {
            Ok(Some(lookup)) => lookup,
            Ok(None) | Err(BranchError::Unrecognized) => return None,
            Err(BranchError::Abort(outcome)) => return Some(outcome),
        };

        Some(match ctx.lookup(&lookup) {
            Ok(value) => ResolutionOutcome::ResolvedValue(value),
            Err(outcome) => outcome,
        })
    }
}
