//! Expression Builder Domain - owned slot-expression tree and builder port

use std::fmt;

use crate::errors::Result;
use crate::shared::models::Literal;

/// Expression Builder Trait (Port)
///
/// Turns one slot's source text into a [`JsExpr`]
pub trait ExpressionBuilderTrait {
    fn build(&mut self, source: &str) -> Result<JsExpr>;

    /// Language name (e.g., "typescript")
    fn language(&self) -> &str;
}

/// Small owned JS/TS expression tree
///
/// Only the shapes the resolver reasons about get their own variant; anything
/// else is kept as [`JsExpr::Other`] with its source text.
#[derive(Debug, Clone, PartialEq)]
pub enum JsExpr {
    Ident(String),
    /// `a.b`, `a?.b`, `a["b"]`
    Member {
        object: Box<JsExpr>,
        property: String,
        optional: bool,
    },
    /// `a[b]` with a non-literal index
    Index {
        object: Box<JsExpr>,
        index: Box<JsExpr>,
    },
    String(String),
    /// Numeric literal, source text kept
    Number(String),
    Bool(bool),
    Null,
    Undefined,
    Template {
        quasis: Vec<String>,
        exprs: Vec<JsExpr>,
    },
    /// `` css`...` ``
    TaggedTemplate {
        tag: Box<JsExpr>,
        quasis: Vec<String>,
        exprs: Vec<JsExpr>,
    },
    Call {
        callee: Box<JsExpr>,
        args: Vec<JsExpr>,
    },
    Arrow {
        params: Vec<Param>,
        body: Box<JsExpr>,
    },
    Conditional {
        test: Box<JsExpr>,
        consequent: Box<JsExpr>,
        alternate: Box<JsExpr>,
    },
    /// Arithmetic, comparison and logical (`&&`, `||`, `??`) operators
    Binary {
        op: String,
        left: Box<JsExpr>,
        right: Box<JsExpr>,
    },
    Unary {
        op: String,
        arg: Box<JsExpr>,
    },
    Other {
        kind: String,
        text: String,
    },
}

/// Arrow function parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Ident(String),
    /// `({ $active, theme: { colors }, size = "md" })`
    Object(Vec<PatternProp>),
    Other(String),
}

/// One property of an object pattern
#[derive(Debug, Clone, PartialEq)]
pub struct PatternProp {
    pub key: String,
    pub binding: Binding,
    /// Source text of a default value (`= "md"`)
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Local(String),
    Pattern(Vec<PatternProp>),
}

impl Param {
    /// Every local name this parameter binds, paired with the path read off
    /// the argument to obtain it (`{ theme: { colors } }` → `colors` = `theme.colors`)
    pub fn bindings(&self) -> Vec<(String, Vec<String>)> {
        fn walk(props: &[PatternProp], prefix: &mut Vec<String>, out: &mut Vec<(String, Vec<String>)>) {
            for prop in props {
                prefix.push(prop.key.clone());
                match &prop.binding {
                    Binding::Local(local) => out.push((local.clone(), prefix.clone())),
                    Binding::Pattern(inner) => walk(inner, prefix, out),
                }
                prefix.pop();
            }
        }
        match self {
            Param::Ident(name) => vec![(name.clone(), Vec::new())],
            Param::Object(props) => {
                let mut out = Vec::new();
                walk(props, &mut Vec::new(), &mut out);
                out
            }
            Param::Other(_) => Vec::new(),
        }
    }
}

impl JsExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        JsExpr::Ident(name.into())
    }

    pub fn member(object: JsExpr, property: impl Into<String>) -> Self {
        JsExpr::Member {
            object: Box::new(object),
            property: property.into(),
            optional: false,
        }
    }

    /// Flatten an identifier/member chain: `p.theme.colors` → (`p`, [`theme`, `colors`])
    pub fn member_path(&self) -> Option<(&str, Vec<&str>)> {
        match self {
            JsExpr::Ident(name) => Some((name.as_str(), Vec::new())),
            JsExpr::Member {
                object, property, ..
            } => {
                let (root, mut path) = object.member_path()?;
                path.push(property.as_str());
                Some((root, path))
            }
            _ => None,
        }
    }

    pub fn literal(&self) -> Option<Literal> {
        match self {
            JsExpr::String(s) => Some(Literal::string(s.clone())),
            JsExpr::Number(n) => Some(Literal::number(n.clone())),
            JsExpr::Bool(b) => Some(Literal::Bool(*b)),
            JsExpr::Template { quasis, exprs } if exprs.is_empty() => {
                Some(Literal::string(quasis.concat()))
            }
            _ => None,
        }
    }

    /// `null`, `undefined`, `false` or `""`: interpolates to no declaration
    pub fn is_omitted_value(&self) -> bool {
        match self {
            JsExpr::Null | JsExpr::Undefined | JsExpr::Bool(false) => true,
            JsExpr::String(s) => s.is_empty(),
            JsExpr::Template { quasis, exprs } => exprs.is_empty() && quasis.concat().is_empty(),
            _ => false,
        }
    }

    /// Static text of a template literal with no substitutions
    pub fn static_template_text(&self) -> Option<String> {
        match self {
            JsExpr::Template { quasis, exprs } if exprs.is_empty() => Some(quasis.concat()),
            _ => None,
        }
    }

    /// Every identifier read anywhere in this expression (member properties excluded)
    pub fn free_identifiers(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_identifiers(&mut out);
        out
    }

    fn collect_identifiers(&self, out: &mut Vec<String>) {
        match self {
            JsExpr::Ident(name) => {
                if !out.contains(name) {
                    out.push(name.clone());
                }
            }
            JsExpr::Member { object, .. } => object.collect_identifiers(out),
            JsExpr::Index { object, index } => {
                object.collect_identifiers(out);
                index.collect_identifiers(out);
            }
            JsExpr::Template { exprs, .. } => exprs.iter().for_each(|e| e.collect_identifiers(out)),
            JsExpr::TaggedTemplate { tag, exprs, .. } => {
                tag.collect_identifiers(out);
                exprs.iter().for_each(|e| e.collect_identifiers(out));
            }
            JsExpr::Call { callee, args } => {
                callee.collect_identifiers(out);
                args.iter().for_each(|a| a.collect_identifiers(out));
            }
            JsExpr::Arrow { body, .. } => body.collect_identifiers(out),
            JsExpr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                test.collect_identifiers(out);
                consequent.collect_identifiers(out);
                alternate.collect_identifiers(out);
            }
            JsExpr::Binary { left, right, .. } => {
                left.collect_identifiers(out);
                right.collect_identifiers(out);
            }
            JsExpr::Unary { arg, .. } => arg.collect_identifiers(out),
            JsExpr::String(_)
            | JsExpr::Number(_)
            | JsExpr::Bool(_)
            | JsExpr::Null
            | JsExpr::Undefined
            | JsExpr::Other { .. } => {}
        }
    }

    /// Direct sub-expressions, in source order
    pub fn children(&self) -> Vec<&JsExpr> {
        match self {
            JsExpr::Member { object, .. } => vec![object.as_ref()],
            JsExpr::Index { object, index } => vec![object.as_ref(), index.as_ref()],
            JsExpr::Template { exprs, .. } => exprs.iter().collect(),
            JsExpr::TaggedTemplate { tag, exprs, .. } => {
                std::iter::once(tag.as_ref()).chain(exprs.iter()).collect()
            }
            JsExpr::Call { callee, args } => std::iter::once(callee.as_ref()).chain(args.iter()).collect(),
            JsExpr::Arrow { body, .. } => vec![body.as_ref()],
            JsExpr::Conditional {
                test,
                consequent,
                alternate,
            } => vec![test.as_ref(), consequent.as_ref(), alternate.as_ref()],
            JsExpr::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            JsExpr::Unary { arg, .. } => vec![arg.as_ref()],
            JsExpr::Ident(_)
            | JsExpr::String(_)
            | JsExpr::Number(_)
            | JsExpr::Bool(_)
            | JsExpr::Null
            | JsExpr::Undefined
            | JsExpr::Other { .. } => Vec::new(),
        }
    }

    /// Contains a node the builder could not model
    pub fn has_opaque_parts(&self) -> bool {
        match self {
            JsExpr::Other { .. } => true,
            JsExpr::Member { object, .. } => object.has_opaque_parts(),
            JsExpr::Index { object, index } => object.has_opaque_parts() || index.has_opaque_parts(),
            JsExpr::Template { exprs, .. } | JsExpr::TaggedTemplate { exprs, .. } => {
                exprs.iter().any(JsExpr::has_opaque_parts)
            }
            JsExpr::Call { callee, args } => {
                callee.has_opaque_parts() || args.iter().any(JsExpr::has_opaque_parts)
            }
            JsExpr::Arrow { body, .. } => body.has_opaque_parts(),
            JsExpr::Conditional {
                test,
                consequent,
                alternate,
            } => test.has_opaque_parts() || consequent.has_opaque_parts() || alternate.has_opaque_parts(),
            JsExpr::Binary { left, right, .. } => left.has_opaque_parts() || right.has_opaque_parts(),
            JsExpr::Unary { arg, .. } => arg.has_opaque_parts(),
            _ => false,
        }
    }
}

fn write_template(f: &mut fmt::Formatter<'_>, quasis: &[String], exprs: &[JsExpr]) -> fmt::Result {
    write!(f, "`")?;
    for (i, quasi) in quasis.iter().enumerate() {
        write!(f, "{}", quasi)?;
        if let Some(expr) = exprs.get(i) {
            write!(f, "${{{}}}", expr)?;
        }
    }
    write!(f, "`")
}

fn needs_parens(expr: &JsExpr) -> bool {
    matches!(
        expr,
        JsExpr::Conditional { .. } | JsExpr::Binary { .. } | JsExpr::Arrow { .. }
    )
}

impl fmt::Display for JsExpr {
    /// Prints JS source; compound operands are parenthesized
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsExpr::Ident(name) => write!(f, "{}", name),
            JsExpr::Member {
                object,
                property,
                optional,
            } => {
                let sep = if *optional { "?." } else { "." };
                if needs_parens(object) {
                    write!(f, "({}){}{}", object, sep, property)
                } else {
                    write!(f, "{}{}{}", object, sep, property)
                }
            }
            JsExpr::Index { object, index } => write!(f, "{}[{}]", object, index),
            JsExpr::String(s) => write!(f, "{:?}", s),
            JsExpr::Number(n) => write!(f, "{}", n),
            JsExpr::Bool(b) => write!(f, "{}", b),
            JsExpr::Null => write!(f, "null"),
            JsExpr::Undefined => write!(f, "undefined"),
            JsExpr::Template { quasis, exprs } => write_template(f, quasis, exprs),
            JsExpr::TaggedTemplate { tag, quasis, exprs } => {
                write!(f, "{}", tag)?;
                write_template(f, quasis, exprs)
            }
            JsExpr::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            JsExpr::Arrow { params, body } => {
                write!(f, "(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param_text(param))?;
                }
                write!(f, ") => {}", body)
            }
            JsExpr::Conditional {
                test,
                consequent,
                alternate,
            } => write!(f, "{} ? {} : {}", paren(test), paren(consequent), alternate),
            JsExpr::Binary { op, left, right } => {
                write!(f, "{} {} {}", paren(left), op, paren(right))
            }
            JsExpr::Unary { op, arg } => {
                if op.chars().all(char::is_alphabetic) {
                    write!(f, "{} {}", op, paren(arg))
                } else {
                    write!(f, "{}{}", op, paren(arg))
                }
            }
            JsExpr::Other { text, .. } => write!(f, "{}", text),
        }
    }
}

fn paren(expr: &JsExpr) -> String {
    if needs_parens(expr) {
        format!("({})", expr)
    } else {
        expr.to_string()
    }
}

fn param_text(param: &Param) -> String {
    fn props_text(props: &[PatternProp]) -> String {
        let inner: Vec<String> = props
            .iter()
            .map(|prop| {
                let mut text = match &prop.binding {
                    Binding::Local(local) if *local == prop.key => local.clone(),
                    Binding::Local(local) => format!("{}: {}", prop.key, local),
                    Binding::Pattern(inner) => format!("{}: {}", prop.key, props_text(inner)),
                };
                if let Some(default) = &prop.default {
                    text.push_str(" = ");
                    text.push_str(default);
                }
                text
            })
            .collect();
        format!("{{ {} }}", inner.join(", "))
    }
    match param {
        Param::Ident(name) => name.clone(),
        Param::Object(props) => props_text(props),
        Param::Other(text) => text.clone(),
    }
}
