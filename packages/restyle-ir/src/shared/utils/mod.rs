//! Utility modules shared across features
//!
//! - `tree_sitter`: Tree-sitter node traversal and text extraction
//! - `css_value`: CSS value tokenizing and classification
//! - `property_map`: CSS property → output property table, shorthand decomposition
//! - `naming`: casing helpers and style-key allocation

pub mod css_value;
pub mod naming;
pub mod property_map;
pub mod tree_sitter;

// Re-exports for convenience
pub use naming::{to_camel_case, to_pascal_case, StyleKeyAllocator};
pub use property_map::{
    expand_box_sides, lower_dynamic_value, lower_static_declaration, lower_tokens, output_property_name,
    ShorthandError, ValueToken,
};
