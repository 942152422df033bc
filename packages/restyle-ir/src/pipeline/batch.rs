//! Batch driver
//!
//! Files share nothing mutable: each conversion builds its own expression
//! parser and maps, and only the engine (config + `Sync` resolver) is shared.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use crate::features::lowering::LoweringUseCase;
use crate::shared::models::SourceFile;

use super::file_processor::process_file;
use super::result::BatchReport;

/// Convert `files`; results keep the input order
pub fn convert_files(engine: &dyn LoweringUseCase, files: &[SourceFile]) -> BatchReport {
    #[cfg(feature = "parallel")]
    let results = files
        .par_iter()
        .map(|file| process_file(engine, file))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results = files.iter().map(|file| process_file(engine, file)).collect();

    let report = BatchReport { results };
    info!(
        files = report.len(),
        converted = report.converted(),
        bailed = report.bailed(),
        "batch finished"
    );
    report
}
