//! Theme-path reads: `p => p.theme.colors.primary`, `({ theme }) => theme.space.md`

use crate::features::resolution::domain::{ResolutionOutcome, SlotRequest};
use crate::features::resolution::ports::{RecognizeContext, Recognizer};

use super::blocks::theme_request;
use super::props::PropsScope;

#[derive(Debug, Default, Clone, Copy)]
pub struct ThemePathRecognizer;

impl Recognizer for ThemePathRecognizer {
    fn name(&self) -> &'static str {
        "theme-path"
    }

    fn recognize(
        &self,
        request: &SlotRequest<'_>,
        ctx: &mut RecognizeContext<'_>,
    ) -> Option<ResolutionOutcome> {
        if request.is_composition() {
            return None;
        }
        let (scope, body) = PropsScope::from_arrow(request.expr)?;
        let path = scope.props_path(body)?;
        let lookup = theme_request(&path, ctx)?;

        Some(match ctx.lookup(&lookup) {
            Ok(value) => ResolutionOutcome::ResolvedValue(value),
            Err(outcome) => outcome,
        })
    }
}
