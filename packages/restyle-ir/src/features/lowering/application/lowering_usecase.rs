//! Lowering UseCase

use crate::features::lowering::application::RuleLoweringEngine;
use crate::features::lowering::domain::{ConversionResult, LowerResult, LoweredFile};
use crate::shared::models::SourceFile;

/// Lowering UseCase Trait
pub trait LoweringUseCase: Send + Sync {
    /// Lower every declaration of `file`, or bail the whole file
    fn lower_file(&self, file: &SourceFile) -> LowerResult<LoweredFile>;

    /// Same as `lower_file`, with the bail folded into a report
    fn convert_file(&self, file: &SourceFile) -> ConversionResult;
}

impl LoweringUseCase for RuleLoweringEngine {
    fn lower_file(&self, file: &SourceFile) -> LowerResult<LoweredFile> {
        RuleLoweringEngine::lower_file(self, file)
    }

    fn convert_file(&self, file: &SourceFile) -> ConversionResult {
        RuleLoweringEngine::convert_file(self, file)
    }
}
