//! Rule Lowering - styled declarations → StyleX style objects
//!
//! ## Architecture
//!
//! ```text
//! SourceFile (declarations, rules, slots)
//!       ↓
//! Phase 0: css helpers → HelperIndex (read-only)
//!       ↓
//! Phase 1: per declaration
//! ├── SelectorClassifier          → write target
//! ├── DynamicExpressionResolver   → value / variants / style function
//! └── LoweringContext             → base, variant, attribute, sibling buckets
//!       ↓ post-pass
//!     variant dimensions, compound variants, forward exclusions
//!       ↓
//! Phase 2: override requests → descendant overrides
//!       ↓
//! ConversionResult (Converted | Bailed)
//! ```
//!
//! A bail anywhere discards the whole file: the engine returns
//! `Err(Bail)` and no partial map survives.

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export application layer
pub use application::{LoweringUseCase, RuleLoweringEngine};

pub use domain::{
    Bail, BailReport, ConversionResult, DescendantOverride, DynamicStyle, LowerResult,
    LoweredFile, LoweringContext, OverrideRequest,
};
