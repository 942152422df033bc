//! Normalizer implementation

pub mod normalizer;

pub use normalizer::{
    nest_selector, normalize_selector, parse_declaration_text, to_raw_nodes, CssRuleNormalizer,
};
