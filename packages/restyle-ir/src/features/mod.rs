//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure business logic (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - External dependency implementations

// Template rule trees → flat CssRule list
pub mod normalization;

// Selector text → SelectorShape
pub mod selector;

// Interpolation source → JsExpr (tree-sitter TypeScript)
pub mod expression_builder;

// JsExpr + CSS context → ResolutionOutcome
pub mod resolution;

// Declarations → StyleX style objects, annotations, bails
pub mod lowering;
