//! Dynamic Expression Resolution - one interpolation slot → canonical outcome
//!
//! ## Architecture
//!
//! ```text
//! slot source + CSS context
//!       ↓
//! ExpressionBuilder (JsExpr)
//!       ↓
//! DynamicExpressionResolver
//! ├── theme-path        → ValueResolver (ThemePath)
//! ├── imported-call     → ValueResolver (ImportedCall)
//! ├── imported-value    → ValueResolver (ImportedValue)
//! ├── conditional       → SplitVariants / SplitVariantsResolvedValue
//! ├── logical-block     → SplitVariants / SplitVariantsResolvedValue
//! ├── prop-forward      → EmitStyleFunction
//! └── inline-fallback   → EmitStyleFunction (warning, config-gated)
//!       ↓
//! ResolutionOutcome (KeepOriginal when nothing matched)
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::DynamicExpressionResolver;
pub use domain::{
    ResolutionOutcome, SlotRequest, StyleFunctionSpec, ValueCase, VariantCase, VariantCondition,
};
pub use ports::{
    NoopResolver, RecognizeContext, Recognizer, ResolveRequest, ResolvedExpr, ValueResolver,
};

#[doc(hidden)]
pub use infrastructure::{PropsScope, ResolverTable, StaticValueResolver};
