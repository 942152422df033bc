//! SelectorClassifier - normalized selector → [`SelectorShape`]
//!
//! Input selectors come out of the normalizer: the component itself is `&`,
//! component references are `__COMPONENT_<Name>__`, combinators are spaced.
//! Anything outside the supported shapes is `Unsupported`, which makes the
//! caller bail. A space before a pseudo (`& :hover`) targets descendants and
//! is never folded into a same-element pseudo.

use lazy_static::lazy_static;
use regex::Regex;

use crate::features::selector::domain::{AttributeKind, SelectorShape, SiblingKind};
use crate::shared::models::slot::contains_slot_placeholder;
use crate::shared::utils::css_value::split_commas;
use crate::shared::utils::naming::to_pascal_case;

lazy_static! {
    static ref ATTRIBUTE_RE: Regex =
        Regex::new(r#"^\s*([\w-]+)\s*([\^$*~|]?=)\s*["']?([^"']*)["']?\s*$"#).unwrap();
    static ref COMPONENT_PREFIX_RE: Regex =
        Regex::new(r"^__COMPONENT_([A-Za-z_$][\w$]*)__").unwrap();
}

const LEGACY_PSEUDO_ELEMENTS: &[&str] = &["before", "after", "first-line", "first-letter"];

#[derive(Debug, Default, Clone, Copy)]
pub struct SelectorClassifier;

/// Same-element part of a selector (`:hover[type="checkbox"]::after`)
#[derive(Debug, Default, PartialEq)]
struct Compound {
    pseudos: String,
    pseudo_element: Option<String>,
    attribute: Option<String>,
}

impl SelectorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify one selector for an element rendering `element` (`Some("input")`
    /// for `styled.input`, `None` for wrapped components)
    pub fn classify(&self, selector: &str, element: Option<&str>) -> SelectorShape {
        let selector = selector.trim();
        if contains_slot_placeholder(selector) {
            return unsupported("interpolated selector");
        }

        let branches = split_commas(selector);
        if branches.len() > 1 {
            return self.classify_group(&branches, element);
        }

        if selector == "&" {
            return SelectorShape::SelfRule;
        }
        if let Some(rest) = selector.strip_prefix('&') {
            return self.classify_self_prefixed(rest, element);
        }
        if let Some(caps) = COMPONENT_PREFIX_RE.captures(selector) {
            let component = caps[1].to_string();
            return self.classify_component_ancestor(component, &selector[caps[0].len()..]);
        }
        unsupported("selector does not start at the component")
    }

    /// Comma groups: every branch must be a same-element pseudo
    fn classify_group(&self, branches: &[String], element: Option<&str>) -> SelectorShape {
        let mut names = Vec::new();
        for branch in branches {
            match self.classify(branch, element) {
                SelectorShape::Pseudo(branch_names) => names.extend(branch_names),
                _ => return unsupported("comma group with a branch that is not a simple pseudo"),
            }
        }
        SelectorShape::Pseudo(names)
    }

    fn classify_self_prefixed(&self, rest: &str, element: Option<&str>) -> SelectorShape {
        if rest.starts_with(' ') {
            return self.classify_relation(rest.trim_start());
        }

        let (compound, tail) = match scan_compound(rest) {
            Ok(parsed) => parsed,
            Err(reason) => return unsupported(&reason),
        };
        let tail = tail.trim();

        if !tail.is_empty() {
            // `&:hover ${Icon}`
            if compound.attribute.is_some() || compound.pseudo_element.is_some() {
                return unsupported("descendant of an attribute or pseudo-element selector");
            }
            return match exact_component(tail) {
                Some(component) => SelectorShape::DescendantComponent {
                    component,
                    ancestor_pseudo: non_empty(compound.pseudos),
                },
                None => unsupported("descendant, child or sibling element selector"),
            };
        }

        if let Some(attribute) = compound.attribute {
            if !compound.pseudos.is_empty() {
                return unsupported("pseudo combined with attribute selector");
            }
            return match attribute_kind(&attribute, element) {
                Some(kind) => SelectorShape::Attribute {
                    suffix: attribute_suffix(&kind),
                    kind,
                    pseudo_element: compound.pseudo_element,
                },
                None => unsupported("attribute selector outside the supported catalogue"),
            };
        }

        if let Some(element) = compound.pseudo_element {
            return SelectorShape::PseudoElement {
                element,
                pseudo: non_empty(compound.pseudos),
            };
        }

        match non_empty(compound.pseudos) {
            Some(pseudo) => SelectorShape::Pseudo(vec![pseudo]),
            None => unsupported("empty selector"),
        }
    }

    /// `& <combinator> ...` with the leading `&` and space removed
    fn classify_relation(&self, rest: &str) -> SelectorShape {
        if rest.starts_with(':') {
            return unsupported("descendant pseudo (space before the pseudo)");
        }
        match rest {
            "+ &" => return SelectorShape::SiblingOfSelf(SiblingKind::Adjacent),
            "~ &" => return SelectorShape::SiblingOfSelf(SiblingKind::General),
            _ => {}
        }
        match exact_component(rest) {
            Some(component) => SelectorShape::DescendantComponent {
                component,
                ancestor_pseudo: None,
            },
            None => unsupported("descendant, child or sibling element selector"),
        }
    }

    /// `__COMPONENT_X__:hover &` with the component prefix removed
    fn classify_component_ancestor(&self, component: String, rest: &str) -> SelectorShape {
        let (compound, tail) = match scan_compound(rest) {
            Ok(parsed) => parsed,
            Err(reason) => return unsupported(&reason),
        };
        if compound.attribute.is_some() || compound.pseudo_element.is_some() {
            return unsupported("ancestor component with attribute or pseudo-element");
        }
        if tail.trim() != "&" {
            return unsupported("component reference not followed by the component itself");
        }
        SelectorShape::ComponentAncestor {
            component,
            pseudo: non_empty(compound.pseudos),
        }
    }
}

fn unsupported(reason: &str) -> SelectorShape {
    SelectorShape::Unsupported(reason.to_string())
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn exact_component(text: &str) -> Option<String> {
    let caps = COMPONENT_PREFIX_RE.captures(text)?;
    if caps[0].len() == text.len() {
        Some(caps[1].to_string())
    } else {
        None
    }
}

/// Scan the same-element part; returns it with the remaining text
/// (starting at the first top-level space, or empty)
fn scan_compound(text: &str) -> Result<(Compound, &str), String> {
    let mut compound = Compound::default();
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b' ' => break,
            b':' => {
                if compound.pseudo_element.is_some() {
                    return Err("pseudo after a pseudo-element".to_string());
                }
                let is_element = bytes.get(i + 1) == Some(&b':');
                let name_start = if is_element { i + 2 } else { i + 1 };
                let name_end = scan_ident(bytes, name_start);
                if name_end == name_start {
                    return Err("empty pseudo name".to_string());
                }
                let end = scan_parens(text, name_end)?;
                let name = &text[name_start..name_end];
                if is_element {
                    compound.pseudo_element = Some(text[i..end].to_string());
                } else if LEGACY_PSEUDO_ELEMENTS.contains(&name) && end == name_end {
                    compound.pseudo_element = Some(format!("::{}", name));
                } else {
                    let pseudo = &text[i..end];
                    if pseudo.contains("__COMPONENT_") || pseudo.contains('&') {
                        return Err("component reference inside a pseudo".to_string());
                    }
                    compound.pseudos.push_str(pseudo);
                }
                i = end;
            }
            b'[' => {
                if compound.attribute.is_some() {
                    return Err("multiple attribute selectors".to_string());
                }
                let close = text[i..]
                    .find(']')
                    .map(|offset| i + offset)
                    .ok_or_else(|| "unterminated attribute selector".to_string())?;
                compound.attribute = Some(text[i + 1..close].to_string());
                i = close + 1;
            }
            b'.' | b'#' => return Err("compound class or id selector on the same element".to_string()),
            _ => return Err("element selector on the same element".to_string()),
        }
    }
    Ok((compound, &text[i..]))
}

fn scan_ident(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'-' || bytes[end] == b'_') {
        end += 1;
    }
    end
}

/// Index just past a balanced `( ... )` starting at `start`, or `start`
fn scan_parens(text: &str, start: usize) -> Result<usize, String> {
    if text.as_bytes().get(start) != Some(&b'(') {
        return Ok(start);
    }
    let mut depth = 0usize;
    for (offset, c) in text[start..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(start + offset + 1);
                }
            }
            _ => {}
        }
    }
    Err("unbalanced parentheses in pseudo".to_string())
}

fn attribute_kind(attribute: &str, element: Option<&str>) -> Option<AttributeKind> {
    let caps = ATTRIBUTE_RE.captures(attribute)?;
    let (name, op, value) = (&caps[1], &caps[2], &caps[3]);
    match (element?, name, op, value) {
        ("input", "type", "=", "checkbox") => Some(AttributeKind::Checkbox),
        ("input", "type", "=", "radio") => Some(AttributeKind::Radio),
        ("a", "target", "=", "_blank") => Some(AttributeKind::TargetBlank),
        ("a", "href", "^=", v) if !v.is_empty() => Some(AttributeKind::HrefStartsWith(v.to_string())),
        ("a", "href", "$=", v) if !v.is_empty() => Some(AttributeKind::HrefEndsWith(v.to_string())),
        _ => None,
    }
}

fn attribute_suffix(kind: &AttributeKind) -> String {
    match kind {
        AttributeKind::Checkbox => "Checkbox".to_string(),
        AttributeKind::Radio => "Radio".to_string(),
        AttributeKind::TargetBlank => "TargetBlank".to_string(),
        AttributeKind::HrefStartsWith(v) => format!("HrefStarts{}", to_pascal_case(v)),
        AttributeKind::HrefEndsWith(v) => format!("HrefEnds{}", to_pascal_case(v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(selector: &str) -> SelectorShape {
        SelectorClassifier::new().classify(selector, Some("button"))
    }

    fn is_unsupported(shape: &SelectorShape) -> bool {
        !shape.is_supported()
    }

    #[test]
    fn test_self_and_pseudos() {
        assert_eq!(classify("&"), SelectorShape::SelfRule);
        assert_eq!(classify("&:hover"), SelectorShape::Pseudo(vec![":hover".into()]));
        assert_eq!(
            classify("&:hover, &:focus-visible"),
            SelectorShape::Pseudo(vec![":hover".into(), ":focus-visible".into()])
        );
        assert_eq!(
            classify("&:hover:not(:disabled)"),
            SelectorShape::Pseudo(vec![":hover:not(:disabled)".into()])
        );
    }

    #[test]
    fn test_pseudo_elements() {
        assert_eq!(
            classify("&::before"),
            SelectorShape::PseudoElement {
                element: "::before".into(),
                pseudo: None
            }
        );
        assert_eq!(
            classify("&:hover:after"),
            SelectorShape::PseudoElement {
                element: "::after".into(),
                pseudo: Some(":hover".into())
            }
        );
        assert!(is_unsupported(&classify("&::before:hover")));
    }

    #[test]
    fn test_unsupported_shapes() {
        assert!(is_unsupported(&classify("& a")));
        assert!(is_unsupported(&classify("& > span")));
        assert!(is_unsupported(&classify("&.active")));
        assert!(is_unsupported(&classify("& :hover")));
        assert!(is_unsupported(&classify("&:hover, & span")));
        assert!(is_unsupported(&classify("&:__SLOT_2__")));
        assert!(is_unsupported(&classify("& + span")));
    }

    #[test]
    fn test_attribute_catalogue_is_gated_by_element() {
        let classifier = SelectorClassifier::new();
        assert_eq!(
            classifier.classify("&[type=\"checkbox\"]", Some("input")),
            SelectorShape::Attribute {
                kind: AttributeKind::Checkbox,
                suffix: "Checkbox".into(),
                pseudo_element: None,
            }
        );
        assert!(is_unsupported(&classifier.classify("&[type=\"checkbox\"]", Some("div"))));
        assert!(is_unsupported(&classifier.classify("&[type=\"checkbox\"]", None)));
        assert_eq!(
            classifier.classify("&[href^=\"http\"]::after", Some("a")),
            SelectorShape::Attribute {
                kind: AttributeKind::HrefStartsWith("http".into()),
                suffix: "HrefStartsHttp".into(),
                pseudo_element: Some("::after".into()),
            }
        );
        assert!(is_unsupported(&classifier.classify("&[disabled]", Some("button"))));
    }

    #[test]
    fn test_component_relations() {
        assert_eq!(
            classify("& __COMPONENT_Icon__"),
            SelectorShape::DescendantComponent {
                component: "Icon".into(),
                ancestor_pseudo: None
            }
        );
        assert_eq!(
            classify("&:hover __COMPONENT_Icon__"),
            SelectorShape::DescendantComponent {
                component: "Icon".into(),
                ancestor_pseudo: Some(":hover".into())
            }
        );
        assert_eq!(
            classify("__COMPONENT_Card__:focus-within &"),
            SelectorShape::ComponentAncestor {
                component: "Card".into(),
                pseudo: Some(":focus-within".into())
            }
        );
        assert!(is_unsupported(&classify("& > __COMPONENT_Icon__")));
        assert!(is_unsupported(&classify("__COMPONENT_Card__ span")));
    }

    #[test]
    fn test_siblings_of_self() {
        assert_eq!(classify("& + &"), SelectorShape::SiblingOfSelf(SiblingKind::Adjacent));
        assert_eq!(classify("& ~ &"), SelectorShape::SiblingOfSelf(SiblingKind::General));
    }
}
