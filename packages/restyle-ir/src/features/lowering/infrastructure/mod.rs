//! Lowering infrastructure: value tokenization and at-rule keys

pub mod at_rules;
pub mod value_tokens;

pub use at_rules::at_rule_path;
pub use value_tokens::value_tokens;
