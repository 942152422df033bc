//! Expression Builder - slot expression text → JsExpr
//!
//! ## Architecture
//!
//! ```text
//! slot source text
//!       ↓
//! tree-sitter TypeScript
//!       ↓
//! TypeScriptExpressionBuilder (recursive descent)
//!       ↓
//! JsExpr
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export application layer
pub use application::{ExpressionBuilderUseCase, ExpressionBuilderUseCaseImpl};

pub use domain::{Binding, ExpressionBuilderTrait, JsExpr, Param, PatternProp};

// Re-export infrastructure (internal use - prefer application layer)
#[doc(hidden)]
pub use infrastructure::TypeScriptExpressionBuilder;
