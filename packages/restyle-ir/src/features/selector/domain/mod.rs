//! Selector Domain - closed set of supported selector shapes

use std::fmt;

/// Attribute conditions the wrapper can evaluate from props
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// `input[type="checkbox"]`
    Checkbox,
    /// `input[type="radio"]`
    Radio,
    /// `a[target="_blank"]`
    TargetBlank,
    /// `a[href^="..."]`
    HrefStartsWith(String),
    /// `a[href$="..."]`
    HrefEndsWith(String),
}

impl AttributeKind {
    /// Attribute selector text as written
    pub fn selector_text(&self) -> String {
        match self {
            AttributeKind::Checkbox => "type=\"checkbox\"".to_string(),
            AttributeKind::Radio => "type=\"radio\"".to_string(),
            AttributeKind::TargetBlank => "target=\"_blank\"".to_string(),
            AttributeKind::HrefStartsWith(v) => format!("href^={:?}", v),
            AttributeKind::HrefEndsWith(v) => format!("href$={:?}", v),
        }
    }

    /// JS condition the wrapper evaluates against its props
    pub fn condition(&self) -> String {
        match self {
            AttributeKind::Checkbox => "props.type === \"checkbox\"".to_string(),
            AttributeKind::Radio => "props.type === \"radio\"".to_string(),
            AttributeKind::TargetBlank => "props.target === \"_blank\"".to_string(),
            AttributeKind::HrefStartsWith(v) => format!(
                "typeof props.href === \"string\" && props.href.startsWith({:?})",
                v
            ),
            AttributeKind::HrefEndsWith(v) => format!(
                "typeof props.href === \"string\" && props.href.endsWith({:?})",
                v
            ),
        }
    }

    /// The prop the condition reads
    pub fn prop_name(&self) -> &'static str {
        match self {
            AttributeKind::Checkbox | AttributeKind::Radio => "type",
            AttributeKind::TargetBlank => "target",
            AttributeKind::HrefStartsWith(_) | AttributeKind::HrefEndsWith(_) => "href",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiblingKind {
    /// `& + &`
    Adjacent,
    /// `& ~ &`
    General,
}

impl SiblingKind {
    pub fn combinator(&self) -> &'static str {
        match self {
            SiblingKind::Adjacent => "+",
            SiblingKind::General => "~",
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            SiblingKind::Adjacent => "AdjacentSibling",
            SiblingKind::General => "GeneralSibling",
        }
    }
}

/// Classification of one normalized selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorShape {
    /// `&`
    SelfRule,
    /// `&:hover`, `&:hover, &:focus-visible`, `&:hover:not(:disabled)`
    Pseudo(Vec<String>),
    /// `&::before`, `&:hover::after`
    PseudoElement {
        element: String,
        pseudo: Option<String>,
    },
    /// `&[type="checkbox"]`, `&[href^="http"]::after`
    Attribute {
        kind: AttributeKind,
        suffix: String,
        pseudo_element: Option<String>,
    },
    /// `& + &`, `& ~ &`
    SiblingOfSelf(SiblingKind),
    /// `& ${Icon}`, `&:hover ${Icon}`
    DescendantComponent {
        component: String,
        ancestor_pseudo: Option<String>,
    },
    /// `${Card}:hover &`
    ComponentAncestor {
        component: String,
        pseudo: Option<String>,
    },
    Unsupported(String),
}

impl SelectorShape {
    pub fn is_supported(&self) -> bool {
        !matches!(self, SelectorShape::Unsupported(_))
    }
}

impl fmt::Display for SelectorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorShape::SelfRule => write!(f, "self"),
            SelectorShape::Pseudo(names) => write!(f, "pseudo({})", names.join(", ")),
            SelectorShape::PseudoElement { element, pseudo } => {
                write!(f, "pseudo-element({}{})", pseudo.as_deref().unwrap_or(""), element)
            }
            SelectorShape::Attribute { kind, .. } => write!(f, "attribute([{}])", kind.selector_text()),
            SelectorShape::SiblingOfSelf(kind) => write!(f, "sibling(& {} &)", kind.combinator()),
            SelectorShape::DescendantComponent {
                component,
                ancestor_pseudo,
            } => write!(
                f,
                "descendant({}{})",
                component,
                ancestor_pseudo.as_deref().unwrap_or("")
            ),
            SelectorShape::ComponentAncestor { component, pseudo } => {
                write!(f, "ancestor({}{})", component, pseudo.as_deref().unwrap_or(""))
            }
            SelectorShape::Unsupported(reason) => write!(f, "unsupported({})", reason),
        }
    }
}
