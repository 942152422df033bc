/*
 * Restyle IR - styled-components → StyleX rule lowering
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Input IR (declarations, rules, slots), StyleX output model, diagnostics
 * - features/    : Vertical slices (normalization → selector → resolution → lowering)
 * - pipeline/    : Single-file and batch entry points
 * - config/      : Lowering presets and YAML loading
 *
 * Performance:
 * - Files are independent; batches fan out on rayon
 * - One tree-sitter parser per file, no shared mutable state
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Lowering helpers thread many contexts
#![allow(clippy::type_complexity)] // Split cases are nested tuples
#![allow(clippy::collapsible_if)] // Readability over brevity
#![allow(clippy::collapsible_else_if)] // else if clarity
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::match_like_matches_macro)] // Match for readability

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (normalization, selector, resolution, lowering)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{LoweringConfig, Preset};
pub use errors::{RestyleError, Result};
pub use features::lowering::{
    Bail, BailReport, ConversionResult, LoweredFile, LoweringUseCase, RuleLoweringEngine,
};
pub use features::normalization::CssRuleNormalizer;
pub use features::resolution::{DynamicExpressionResolver, ValueResolver};
pub use features::selector::SelectorClassifier;
pub use pipeline::{convert_files, process_file, process_json, process_raw_file, BatchReport};
pub use shared::models::{
    Diagnostic, ReasonCode, SourceFile, StyleObject, StyleValue, StyledDeclaration,
};
