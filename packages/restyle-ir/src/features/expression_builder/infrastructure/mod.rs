//! Expression builder adapters

pub mod typescript;

pub use typescript::TypeScriptExpressionBuilder;
