//! RuleLoweringEngine - styled declarations of one file → StyleX objects
//!
//! The engine itself is immutable and shared; every mutable map of a run
//! lives in a per-file [`FileLowering`], so files can be lowered in parallel.

use std::sync::Arc;

use tracing::{info, warn};

use super::declaration::FileLowering;
use crate::config::LoweringConfig;
use crate::features::expression_builder::ExpressionBuilderUseCaseImpl;
use crate::features::lowering::domain::{Bail, BailReport, ConversionResult, LowerResult, LoweredFile};
use crate::features::resolution::{DynamicExpressionResolver, NoopResolver, ValueResolver};
use crate::features::selector::SelectorClassifier;
use crate::shared::models::{Diagnostic, Location, ReasonCode, SourceFile};

pub struct RuleLoweringEngine {
    pub(crate) config: LoweringConfig,
    pub(crate) resolver: Arc<dyn ValueResolver>,
    pub(crate) recognizers: DynamicExpressionResolver,
    pub(crate) classifier: SelectorClassifier,
}

impl Default for RuleLoweringEngine {
    fn default() -> Self {
        Self::new(LoweringConfig::default(), Arc::new(NoopResolver))
    }
}

impl RuleLoweringEngine {
    pub fn new(config: LoweringConfig, resolver: Arc<dyn ValueResolver>) -> Self {
        Self {
            config,
            resolver,
            recognizers: DynamicExpressionResolver::new(),
            classifier: SelectorClassifier::new(),
        }
    }

    /// Default configuration with the given resolver
    pub fn with_resolver(resolver: impl ValueResolver + 'static) -> Self {
        Self::new(LoweringConfig::default(), Arc::new(resolver))
    }

    /// Replace the recognizer list
    pub fn with_recognizers(mut self, recognizers: DynamicExpressionResolver) -> Self {
        self.recognizers = recognizers;
        self
    }

    pub fn config(&self) -> &LoweringConfig {
        &self.config
    }

    pub fn recognizer_names(&self) -> Vec<&'static str> {
        self.recognizers.recognizer_names()
    }

    /// Lower one file; warnings end up in [`LoweredFile::diagnostics`]
    pub fn lower_file(&self, file: &SourceFile) -> LowerResult<LoweredFile> {
        let (result, warnings) = self.run(file);
        result.map(|mut lowered| {
            lowered.diagnostics = warnings;
            lowered
        })
    }

    /// Lower one file, turning a bail into a report
    pub fn convert_file(&self, file: &SourceFile) -> ConversionResult {
        match self.run(file) {
            (Ok(mut lowered), warnings) => {
                lowered.diagnostics = warnings;
                info!(
                    path = %file.path,
                    styles = lowered.styles.len(),
                    warnings = lowered.diagnostics.len(),
                    "file converted"
                );
                ConversionResult::Converted(lowered)
            }
            (Err(bail), warnings) => {
                warn!(path = %file.path, reason = %bail.reason, context = %bail.context, "file left unconverted");
                ConversionResult::Bailed(BailReport {
                    path: file.path.clone(),
                    diagnostic: bail.into_diagnostic(),
                    warnings,
                })
            }
        }
    }

    fn run(&self, file: &SourceFile) -> (LowerResult<LoweredFile>, Vec<Diagnostic>) {
        let mut expressions = match ExpressionBuilderUseCaseImpl::new() {
            Ok(expressions) => expressions,
            Err(err) => {
                let bail = Bail::new(
                    ReasonCode::KeepOriginal,
                    Location::file(&file.path),
                    format!("expression parser unavailable: {}", err),
                );
                return (Err(bail), Vec::new());
            }
        };
        let mut lowering = FileLowering::new(self, file, &mut expressions);
        let result = lowering.run();
        (result, lowering.take_warnings())
    }
}
