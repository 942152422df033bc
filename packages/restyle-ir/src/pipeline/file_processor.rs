//! Single-file entry points

use crate::errors::Result;
use crate::features::lowering::{ConversionResult, LoweringUseCase};
use crate::features::normalization::CssRuleNormalizer;
use crate::shared::models::SourceFile;

use super::input::RawSourceFile;

/// Convert one already-normalized file
pub fn process_file(engine: &dyn LoweringUseCase, file: &SourceFile) -> ConversionResult {
    engine.convert_file(file)
}

/// Normalize and convert one file; dropped declaration text is reported
/// alongside the lowering diagnostics
pub fn process_raw_file(engine: &dyn LoweringUseCase, raw: RawSourceFile) -> ConversionResult {
    let (file, dropped) = raw.normalize(&CssRuleNormalizer::new());
    let mut result = engine.convert_file(&file);
    if dropped.is_empty() {
        return result;
    }
    match &mut result {
        ConversionResult::Converted(lowered) => {
            lowered.diagnostics.splice(0..0, dropped);
        }
        ConversionResult::Bailed(report) => {
            report.warnings.splice(0..0, dropped);
        }
    }
    result
}

/// Convert a `SourceFile` serialized as JSON by an out-of-process front end
pub fn process_json(engine: &dyn LoweringUseCase, json: &str) -> Result<ConversionResult> {
    let file = SourceFile::from_json(json)?;
    Ok(process_file(engine, &file))
}
