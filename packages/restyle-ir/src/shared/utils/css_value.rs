//! CSS value text utilities
//!
//! Tokenizing respects parentheses and quotes, so `1px solid rgba(0, 0, 0, .5)`
//! splits into three tokens.

use lazy_static::lazy_static;
use regex::Regex;

use crate::shared::constants::css::{
    BORDER_STYLES, BORDER_WIDTH_KEYWORDS, CONTENT_KEYWORDS, LENGTH_UNITS,
};

lazy_static! {
    static ref NUMBER_RE: Regex = Regex::new(r"^-?(\d+\.?\d*|\.\d+)$").unwrap();
    static ref DIMENSION_RE: Regex = Regex::new(r"^-?(\d+\.?\d*|\.\d+)([a-zA-Z%]+)$").unwrap();
    static ref IMPORTANT_RE: Regex = Regex::new(r"(?i)\s*!\s*important\s*$").unwrap();
}

/// Split on top-level occurrences of `sep` (outside parentheses and quotes).
/// Empty pieces are dropped; pieces are trimmed.
pub fn split_top_level(value: &str, is_sep: impl Fn(char) -> bool) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut current = String::new();

    for c in value.chars() {
        if let Some(q) = quote {
            current.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => {
                quote = Some(c);
                current.push(c);
            }
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            c if depth == 0 && is_sep(c) => {
                let piece = current.trim();
                if !piece.is_empty() {
                    parts.push(piece.to_string());
                }
                current.clear();
            }
            c => current.push(c),
        }
    }
    let piece = current.trim();
    if !piece.is_empty() {
        parts.push(piece.to_string());
    }
    parts
}

/// Whitespace-separated top-level tokens
pub fn tokenize(value: &str) -> Vec<String> {
    split_top_level(value, char::is_whitespace)
}

/// Comma-separated top-level groups
pub fn split_commas(value: &str) -> Vec<String> {
    split_top_level(value, |c| c == ',')
}

/// Strip a trailing `!important`, reporting whether one was present
pub fn strip_important(value: &str) -> (String, bool) {
    match IMPORTANT_RE.find(value) {
        Some(m) => (value[..m.start()].trim().to_string(), true),
        None => (value.trim().to_string(), false),
    }
}

/// Parse a unitless numeric literal (`0`, `1.5`, `-2`, `.5`)
pub fn parse_number(value: &str) -> Option<f64> {
    let text = value.trim();
    if NUMBER_RE.is_match(text) {
        text.parse().ok()
    } else {
        None
    }
}

/// `12px`, `-0.5em`, `100%`
pub fn is_dimension(value: &str) -> bool {
    DIMENSION_RE
        .captures(value.trim())
        .map(|caps| LENGTH_UNITS.contains(&caps[2].to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Value that only a `background-image` can hold
pub fn is_gradient_or_image(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.contains("gradient(") || lower.contains("url(") || lower.contains("image-set(")
}

pub fn is_border_style(token: &str) -> bool {
    BORDER_STYLES.contains(&token.to_ascii_lowercase().as_str())
}

pub fn is_border_width(token: &str) -> bool {
    parse_number(token).is_some()
        || is_dimension(token)
        || BORDER_WIDTH_KEYWORDS.contains(&token.to_ascii_lowercase().as_str())
        || token.starts_with("calc(")
}

pub fn is_quoted(value: &str) -> bool {
    let v = value.trim();
    v.len() >= 2
        && ((v.starts_with('"') && v.ends_with('"')) || (v.starts_with('\'') && v.ends_with('\'')))
}

/// `content` values must reach StyleX with their quotes (`'""'`)
pub fn quote_content(value: &str) -> String {
    let v = value.trim();
    let lower = v.to_ascii_lowercase();
    if is_quoted(v)
        || CONTENT_KEYWORDS.contains(&lower.as_str())
        || lower.starts_with("attr(")
        || lower.starts_with("counter(")
        || lower.starts_with("counters(")
        || lower.starts_with("url(")
        || lower.starts_with("var(")
    {
        v.to_string()
    } else {
        format!("\"{}\"", v.replace('"', "\\\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_respects_parens_and_quotes() {
        assert_eq!(
            tokenize("1px solid rgba(0, 0, 0, .5)"),
            vec!["1px", "solid", "rgba(0, 0, 0, .5)"]
        );
        assert_eq!(tokenize("'a b' c"), vec!["'a b'", "c"]);
        assert_eq!(
            split_commas(":hover, :focus-visible"),
            vec![":hover", ":focus-visible"]
        );
    }

    #[test]
    fn test_strip_important() {
        assert_eq!(strip_important("red !important"), ("red".to_string(), true));
        assert_eq!(strip_important("red ! IMPORTANT "), ("red".to_string(), true));
        assert_eq!(strip_important(" red "), ("red".to_string(), false));
    }

    #[test]
    fn test_numbers_and_dimensions() {
        assert_eq!(parse_number("0.5"), Some(0.5));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("10px"), None);
        assert!(is_dimension("10px"));
        assert!(is_dimension("-1.5rem"));
        assert!(!is_dimension("10"));
        assert!(!is_dimension("red"));
    }

    #[test]
    fn test_gradient_detection() {
        assert!(is_gradient_or_image("linear-gradient(red, blue)"));
        assert!(is_gradient_or_image("url(/a.png)"));
        assert!(!is_gradient_or_image("#fff"));
    }

    #[test]
    fn test_quote_content() {
        assert_eq!(quote_content("\"\""), "\"\"");
        assert_eq!(quote_content("'→'"), "'→'");
        assert_eq!(quote_content("none"), "none");
        assert_eq!(quote_content("→"), "\"→\"");
        assert_eq!(quote_content("attr(title)"), "attr(title)");
    }
}
