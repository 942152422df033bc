//! Normalization Feature
//!
//! Turns the pre-parsed rule tree of one styled template into flat
//! [`CssRule`](crate::shared::models::CssRule)s.
//!
//! ## Structure
//! - `domain/` - RawNode tree, NormalizedRules
//! - `infrastructure/` - CssRuleNormalizer

pub mod domain;
pub mod infrastructure;

pub use domain::{NormalizedRules, RawNode};
pub use infrastructure::{parse_declaration_text, to_raw_nodes, CssRuleNormalizer};
