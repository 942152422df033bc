//! Dynamic Expression Resolver
//!
//! Ordered list of recognizers; the first one that claims a slot decides its
//! outcome. A slot nobody claims is kept original, which bails the file.

use tracing::debug;

use crate::features::resolution::domain::{ResolutionOutcome, SlotRequest};
use crate::features::resolution::infrastructure::{
    ConditionalRecognizer, ImportedCallRecognizer, ImportedValueRecognizer,
    InlineFallbackRecognizer, LogicalBlockRecognizer, PropForwardRecognizer, ThemePathRecognizer,
};
use crate::features::resolution::ports::{RecognizeContext, Recognizer};
use crate::shared::models::ReasonCode;

pub struct DynamicExpressionResolver {
    recognizers: Vec<Box<dyn Recognizer>>,
}

impl Default for DynamicExpressionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicExpressionResolver {
    /// Resolver with the built-in recognizers in priority order
    pub fn new() -> Self {
        Self::empty()
            .with_recognizer(Box::new(ThemePathRecognizer))
            .with_recognizer(Box::new(ImportedCallRecognizer))
            .with_recognizer(Box::new(ImportedValueRecognizer))
            .with_recognizer(Box::new(ConditionalRecognizer))
            .with_recognizer(Box::new(LogicalBlockRecognizer))
            .with_recognizer(Box::new(PropForwardRecognizer))
            .with_recognizer(Box::new(InlineFallbackRecognizer))
    }

    /// Resolver that recognizes nothing
    pub fn empty() -> Self {
        Self {
            recognizers: Vec::new(),
        }
    }

    /// Append a recognizer (lowest priority so far)
    pub fn with_recognizer(mut self, recognizer: Box<dyn Recognizer>) -> Self {
        self.recognizers.push(recognizer);
        self
    }

    pub fn recognizer_names(&self) -> Vec<&'static str> {
        self.recognizers.iter().map(|r| r.name()).collect()
    }

    /// Resolve one parsed slot
    pub fn resolve(&self, request: &SlotRequest<'_>, ctx: &mut RecognizeContext<'_>) -> ResolutionOutcome {
        for recognizer in &self.recognizers {
            if let Some(outcome) = recognizer.recognize(request, ctx) {
                debug!(
                    recognizer = recognizer.name(),
                    outcome = outcome.kind(),
                    source = request.source,
                    "slot recognized"
                );
                return outcome;
            }
        }
        ResolutionOutcome::keep_original(
            ReasonCode::KeepOriginal,
            format!("no recognizer matched `{}`", request.source),
        )
    }

    /// Parse `source` and resolve it; unparseable source is kept original
    pub fn resolve_source(
        &self,
        source: &str,
        property: &str,
        selector: &str,
        at_rules: &[String],
        ctx: &mut RecognizeContext<'_>,
    ) -> ResolutionOutcome {
        let expr = match ctx.expressions.parse_expression(source) {
            Ok(expr) => expr,
            Err(err) => {
                return ResolutionOutcome::keep_original(
                    ReasonCode::UnparseableExpression,
                    format!("`{}`: {}", source, err),
                )
            }
        };
        let request = SlotRequest {
            expr: &expr,
            source,
            property,
            selector,
            at_rules,
        };
        self.resolve(&request, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoweringConfig, Preset};
    use crate::features::expression_builder::ExpressionBuilderUseCaseImpl;
    use crate::features::resolution::domain::{ValueCase, VariantCase, VariantCondition};
    use crate::features::resolution::infrastructure::StaticValueResolver;
    use crate::features::resolution::ports::{ResolvedExpr, ValueResolver};
    use crate::shared::models::{ImportBinding, ImportSpec, Literal, SourceFile, StyleValue};
    use pretty_assertions::assert_eq;

    struct Harness {
        file: SourceFile,
        config: LoweringConfig,
        resolver: StaticValueResolver,
        expressions: ExpressionBuilderUseCaseImpl,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                file: SourceFile::new("Button.tsx")
                    .with_import(ImportBinding::named("css", "styled-components"))
                    .with_import(ImportBinding::named("color", "./theme"))
                    .with_import(ImportBinding::aliased("tokens", "*", "./tokens")),
                config: LoweringConfig::default(),
                resolver: StaticValueResolver::new()
                    .with_theme(
                        "colors.primary",
                        ResolvedExpr::new("vars.primary").with_import(ImportSpec::new("vars", "./tokens.stylex")),
                    )
                    .with_call("color", "./theme", "accent", ResolvedExpr::new("vars.accent"))
                    .with_value("space", "./tokens", "md", ResolvedExpr::new("spacing.md"))
                    .with_theme("broken", ResolvedExpr::new("vars.")),
                expressions: ExpressionBuilderUseCaseImpl::new().unwrap(),
            }
        }

        fn resolve(&mut self, source: &str, property: &str) -> (ResolutionOutcome, Vec<(ReasonCode, String)>) {
            let resolver: &dyn ValueResolver = &self.resolver;
            let mut ctx = RecognizeContext::new(&self.file, &self.config, resolver, &mut self.expressions);
            let outcome = DynamicExpressionResolver::new().resolve_source(source, property, "&", &[], &mut ctx);
            (outcome, ctx.warnings)
        }
    }

    fn reason(outcome: &ResolutionOutcome) -> Option<ReasonCode> {
        match outcome {
            ResolutionOutcome::KeepOriginal { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    #[test]
    fn test_default_order() {
        assert_eq!(
            DynamicExpressionResolver::new().recognizer_names(),
            vec![
                "theme-path",
                "imported-call",
                "imported-value",
                "conditional",
                "logical-block",
                "prop-forward",
                "inline-fallback"
            ]
        );
    }

    #[test]
    fn test_theme_path() {
        let mut h = Harness::new();
        let (outcome, _) = h.resolve("p => p.theme.colors.primary", "color");
        match outcome {
            ResolutionOutcome::ResolvedValue(value) => {
                assert_eq!(value.source, "vars.primary");
                assert_eq!(value.imports, vec![ImportSpec::new("vars", "./tokens.stylex")]);
            }
            other => panic!("unexpected {:?}", other),
        }

        let (outcome, _) = h.resolve("({ theme }) => theme.colors.missing", "color");
        assert_eq!(reason(&outcome), Some(ReasonCode::UnresolvedReference));

        let (outcome, _) = h.resolve("p => p.theme.broken", "color");
        assert_eq!(reason(&outcome), Some(ReasonCode::UnparseableResolverOutput));
    }

    #[test]
    fn test_imported_call() {
        let mut h = Harness::new();
        let (outcome, _) = h.resolve("color(\"accent\")", "color");
        assert_eq!(outcome, ResolutionOutcome::ResolvedValue(crate::shared::models::ExprValue::new("vars.accent")));

        let (outcome, _) = h.resolve("() => color(\"accent\")", "color");
        assert_eq!(outcome.kind(), "keep-original");

        let (outcome, _) = h.resolve("p => color(p.name)", "color");
        assert_eq!(reason(&outcome), Some(ReasonCode::KeepOriginal));

        let (outcome, _) = h.resolve("color(\"a\", \"b\")", "color");
        assert!(matches!(outcome, ResolutionOutcome::KeepOriginal { ref detail, .. } if detail.contains("2 arguments")));
    }

    #[test]
    fn test_imported_value_through_namespace() {
        let mut h = Harness::new();
        let (outcome, _) = h.resolve("tokens.space.md", "padding");
        assert_eq!(outcome, ResolutionOutcome::ResolvedValue(crate::shared::models::ExprValue::new("spacing.md")));
    }

    #[test]
    fn test_mutated_import_bails() {
        let mut h = Harness::new();
        h.file = h.file.clone().with_mutated_binding("tokens");
        let (outcome, _) = h.resolve("tokens.space.md", "padding");
        assert_eq!(reason(&outcome), Some(ReasonCode::MutatedImport));
    }

    #[test]
    fn test_boolean_conditional() {
        let mut h = Harness::new();
        let (outcome, _) = h.resolve("p => p.$disabled ? 0.5 : 1", "opacity");
        assert_eq!(
            outcome,
            ResolutionOutcome::SplitVariantsResolvedValue(vec![
                ValueCase {
                    when: None,
                    value: Some(StyleValue::Number(1.0)),
                },
                ValueCase {
                    when: Some(VariantCondition::Truthy("$disabled".into())),
                    value: Some(StyleValue::Number(0.5)),
                },
            ])
        );
    }

    #[test]
    fn test_enumeration_conditional() {
        let mut h = Harness::new();
        let (outcome, _) = h.resolve(
            "p => p.size === \"sm\" ? \"4px\" : p.size === \"lg\" ? \"12px\" : \"8px\"",
            "padding",
        );
        assert_eq!(
            outcome,
            ResolutionOutcome::SplitVariantsResolvedValue(vec![
                ValueCase {
                    when: None,
                    value: Some(StyleValue::string("8px")),
                },
                ValueCase {
                    when: Some(VariantCondition::Equals("size".into(), Literal::string("sm"))),
                    value: Some(StyleValue::string("4px")),
                },
                ValueCase {
                    when: Some(VariantCondition::Equals("size".into(), Literal::string("lg"))),
                    value: Some(StyleValue::string("12px")),
                },
            ])
        );
    }

    #[test]
    fn test_conditional_depth_limit() {
        let mut h = Harness::new();
        h.config = LoweringConfig::default().max_conditional_depth(1);
        let (outcome, _) = h.resolve("p => p.a ? \"1px\" : p.b ? \"2px\" : \"3px\"", "width");
        assert!(matches!(outcome, ResolutionOutcome::KeepOriginal { ref detail, .. } if detail.contains("deeper")));
    }

    #[test]
    fn test_conditional_block_in_composition() {
        let mut h = Harness::new();
        let (outcome, _) = h.resolve(
            "p => p.$primary ? css`color: white; background: blue;` : \"color: black;\"",
            "",
        );
        assert_eq!(
            outcome,
            ResolutionOutcome::SplitVariants(vec![
                VariantCase {
                    when: None,
                    style: vec![("color".to_string(), StyleValue::string("black"))],
                },
                VariantCase {
                    when: Some(VariantCondition::Truthy("$primary".into())),
                    style: vec![
                        ("color".to_string(), StyleValue::string("white")),
                        ("backgroundColor".to_string(), StyleValue::string("blue")),
                    ],
                },
            ])
        );
    }

    #[test]
    fn test_logical_block() {
        let mut h = Harness::new();
        let (outcome, _) = h.resolve("p => p.$active && \"color: red;\"", "");
        assert_eq!(
            outcome,
            ResolutionOutcome::SplitVariants(vec![VariantCase {
                when: Some(VariantCondition::Truthy("$active".into())),
                style: vec![("color".to_string(), StyleValue::string("red"))],
            }])
        );

        let (outcome, _) = h.resolve("({ $flat }) => $flat || \"box-shadow: none;\"", "");
        assert!(matches!(
            outcome,
            ResolutionOutcome::SplitVariants(ref cases)
                if cases[0].when == Some(VariantCondition::Falsy("$flat".into()))
        ));
    }

    #[test]
    fn test_prop_forward() {
        let mut h = Harness::new();
        let (outcome, _) = h.resolve("p => p.width", "width");
        match outcome {
            ResolutionOutcome::EmitStyleFunction(spec) => {
                assert_eq!(spec.name_hint, "Width");
                assert_eq!(spec.params, vec!["width"]);
                assert_eq!(spec.call_arg, "props.width");
                assert_eq!(spec.body, vec![("width".to_string(), StyleValue::expr("width"))]);
            }
            other => panic!("unexpected {:?}", other),
        }

        let (outcome, _) = h.resolve("p => `${p.size}px`", "font-size");
        match outcome {
            ResolutionOutcome::EmitStyleFunction(spec) => {
                assert_eq!(spec.body, vec![("fontSize".to_string(), StyleValue::expr("`${fontSize}px`"))]);
                assert_eq!(spec.reads, vec!["size"]);
            }
            other => panic!("unexpected {:?}", other),
        }

        let (outcome, _) = h.resolve("p => p.edge", "border");
        assert_eq!(reason(&outcome), Some(ReasonCode::UnsupportedDynamicShorthand));
    }

    #[test]
    fn test_inline_fallback_is_gated() {
        let mut h = Harness::new();
        let (outcome, _) = h.resolve("p => p.$size * 2", "width");
        assert_eq!(reason(&outcome), Some(ReasonCode::KeepOriginal));

        h.config = LoweringConfig::preset(Preset::Permissive);
        let (outcome, warnings) = h.resolve("p => p.$size * 2", "width");
        match outcome {
            ResolutionOutcome::EmitStyleFunction(spec) => assert_eq!(spec.call_arg, "props.$size * 2"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].0, ReasonCode::InlineStyleFallback);
    }

    #[test]
    fn test_unmatched_and_unparseable() {
        let mut h = Harness::new();
        let (outcome, _) = h.resolve("p => compute(p)", "width");
        assert!(matches!(outcome, ResolutionOutcome::KeepOriginal { ref detail, .. } if detail.contains("no recognizer matched")));

        let (outcome, _) = h.resolve("p => p.", "width");
        assert_eq!(reason(&outcome), Some(ReasonCode::UnparseableExpression));
    }
}
