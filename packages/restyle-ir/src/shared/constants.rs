//! Centralized constants
//!
//! Keyword tables and defaults shared by the value utilities, the resolver
//! and the lowering engine.

/// Resolver defaults
pub mod resolution {
    /// Conventional name of the theme binding read off the props parameter
    pub const DEFAULT_THEME_BINDING: &str = "theme";

    /// Default bound on nested-conditional chain length
    pub const DEFAULT_MAX_CONDITIONAL_DEPTH: usize = 8;

    /// Upper bound accepted by config validation
    pub const MAX_CONDITIONAL_DEPTH_LIMIT: usize = 64;

    /// Modules whose `css` export is recognized as a tagged template helper
    pub const DEFAULT_STYLED_MODULES: &[&str] = &["styled-components"];
}

/// CSS keywords used by shorthand decomposition
pub mod css {
    pub const BORDER_STYLES: &[&str] = &[
        "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset",
        "outset",
    ];

    pub const BORDER_WIDTH_KEYWORDS: &[&str] = &["thin", "medium", "thick"];

    /// `content` values that must not be quoted
    pub const CONTENT_KEYWORDS: &[&str] = &[
        "none",
        "normal",
        "open-quote",
        "close-quote",
        "no-open-quote",
        "no-close-quote",
        "inherit",
        "initial",
        "unset",
    ];

    /// Recognized length units for numeric detection in shorthands
    pub const LENGTH_UNITS: &[&str] = &[
        "px", "em", "rem", "%", "vh", "vw", "vmin", "vmax", "ch", "ex", "pt", "pc", "cm", "mm",
        "in", "fr", "svh", "dvh", "lvh",
    ];
}

/// Prop names that are valid attributes on intrinsic elements and therefore
/// keep reaching the DOM after styling consumed them
pub const HTML_ATTRIBUTES: &[&str] = &[
    "alt",
    "checked",
    "children",
    "className",
    "disabled",
    "download",
    "draggable",
    "form",
    "height",
    "hidden",
    "href",
    "htmlFor",
    "id",
    "lang",
    "max",
    "min",
    "multiple",
    "name",
    "placeholder",
    "readOnly",
    "rel",
    "required",
    "role",
    "selected",
    "size",
    "src",
    "step",
    "style",
    "tabIndex",
    "target",
    "title",
    "type",
    "value",
    "width",
];

pub fn is_html_attribute(prop: &str) -> bool {
    HTML_ATTRIBUTES.contains(&prop)
        || prop.starts_with("aria-")
        || prop.starts_with("data-")
        || (prop.starts_with("on") && prop[2..].starts_with(|c: char| c.is_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_attribute_detection() {
        assert!(is_html_attribute("disabled"));
        assert!(is_html_attribute("aria-label"));
        assert!(is_html_attribute("onClick"));
        assert!(!is_html_attribute("variant"));
        assert!(!is_html_attribute("$active"));
        assert!(!is_html_attribute("on"));
    }
}
