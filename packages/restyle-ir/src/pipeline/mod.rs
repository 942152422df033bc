//! Pipeline orchestration
//!
//! ```text
//! RawSourceFile ──normalize──┐
//!                            ↓
//!                       SourceFile ──RuleLoweringEngine──→ ConversionResult
//!                            ↑
//! [SourceFile] ──convert_files (rayon)──→ BatchReport
//! ```

pub mod batch;
pub mod file_processor;
pub mod input;
pub mod result;

pub use batch::convert_files;
pub use file_processor::{process_file, process_json, process_raw_file};
pub use input::{RawDeclaration, RawSourceFile};
pub use result::BatchReport;
