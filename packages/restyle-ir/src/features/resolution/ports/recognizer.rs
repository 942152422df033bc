//! Recognizer port and the per-slot context recognizers share

use tracing::debug;

use super::{ResolveRequest, ValueResolver};
use crate::config::LoweringConfig;
use crate::features::expression_builder::ExpressionBuilderUseCase;
use crate::features::resolution::domain::{ResolutionOutcome, SlotRequest};
use crate::shared::models::{ExprValue, ReasonCode, SourceFile};

/// One pattern recognizer
///
/// Returns `None` when the slot is not its shape; `Some(KeepOriginal)` when it
/// is, but cannot be converted safely.
pub trait Recognizer: Send + Sync {
    /// Short stable name, used in logs
    fn name(&self) -> &'static str;

    fn recognize(
        &self,
        request: &SlotRequest<'_>,
        ctx: &mut RecognizeContext<'_>,
    ) -> Option<ResolutionOutcome>;
}

/// Everything a recognizer may consult while resolving one slot
pub struct RecognizeContext<'a> {
    pub file: &'a SourceFile,
    pub config: &'a LoweringConfig,
    pub resolver: &'a dyn ValueResolver,
    pub expressions: &'a mut dyn ExpressionBuilderUseCase,
    /// Non-fatal findings, drained by the engine into diagnostics
    pub warnings: Vec<(ReasonCode, String)>,
}

impl<'a> RecognizeContext<'a> {
    pub fn new(
        file: &'a SourceFile,
        config: &'a LoweringConfig,
        resolver: &'a dyn ValueResolver,
        expressions: &'a mut dyn ExpressionBuilderUseCase,
    ) -> Self {
        Self {
            file,
            config,
            resolver,
            expressions,
            warnings: Vec::new(),
        }
    }

    /// Ask the adapter; a miss or unparseable answer is a `KeepOriginal`
    /// outcome, since the caller already committed to this reference
    pub fn lookup(&mut self, request: &ResolveRequest) -> Result<ExprValue, ResolutionOutcome> {
        let Some(resolved) = self.resolver.resolve_value(request) else {
            debug!(?request, "resolver miss");
            return Err(ResolutionOutcome::keep_original(
                ReasonCode::UnresolvedReference,
                format!("resolver returned nothing for {}", describe(request)),
            ));
        };

        if let Err(err) = self.expressions.validate_output(&resolved.expr_source) {
            return Err(ResolutionOutcome::keep_original(
                ReasonCode::UnparseableResolverOutput,
                format!(
                    "resolver output `{}` for {} is not an expression: {}",
                    resolved.expr_source,
                    describe(request),
                    err
                ),
            ));
        }

        Ok(resolved.into_expr_value())
    }

    pub fn warn(&mut self, reason: ReasonCode, context: impl Into<String>) {
        self.warnings.push((reason, context.into()));
    }
}

fn describe(request: &ResolveRequest) -> String {
    match request {
        ResolveRequest::ThemePath { path } => format!("theme path `{}`", path),
        ResolveRequest::ImportedCall {
            local_name,
            argument,
            ..
        } => format!("call `{}({:?})`", local_name, argument),
        ResolveRequest::ImportedValue {
            local_name, path, ..
        } => {
            if path.is_empty() {
                format!("imported value `{}`", local_name)
            } else {
                format!("imported value `{}.{}`", local_name, path.join("."))
            }
        }
    }
}
