//! Recognizer implementations and the table-driven resolver

mod blocks;
pub mod conditional;
pub mod fallback;
pub mod forward;
pub mod imported;
pub mod logical;
pub mod props;
pub mod static_resolver;
pub mod theme;

pub use blocks::lower_block_text;
pub use conditional::ConditionalRecognizer;
pub use fallback::InlineFallbackRecognizer;
pub use forward::{function_body, function_param, PropForwardRecognizer};
pub use imported::{ImportedCallRecognizer, ImportedValueRecognizer};
pub use logical::LogicalBlockRecognizer;
pub use props::{PropsScope, PROPS_IDENT};
pub use static_resolver::{ResolverTable, StaticValueResolver};
pub use theme::ThemePathRecognizer;
