//! Selector Feature
//!
//! Classifies normalized selectors into the shapes the lowering engine can
//! express in StyleX.
//!
//! ## Structure
//! - `domain/` - SelectorShape, AttributeKind, SiblingKind
//! - `infrastructure/` - SelectorClassifier

pub mod domain;
pub mod infrastructure;

pub use domain::{AttributeKind, SelectorShape, SiblingKind};
pub use infrastructure::SelectorClassifier;
