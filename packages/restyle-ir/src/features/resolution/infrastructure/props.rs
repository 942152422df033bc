//! Props scope of a slot arrow function
//!
//! `p => p.$active`, `({ $active }) => $active` and
//! `({ theme: { colors } }) => colors.primary` all read off the same props
//! object; [`PropsScope`] maps each local back to the path it reads.

use rustc_hash::FxHashMap;

use crate::features::expression_builder::{Binding, JsExpr, Param};
use crate::features::resolution::domain::VariantCondition;

/// Identifier the generated wrapper binds its props to
pub const PROPS_IDENT: &str = "props";

#[derive(Debug, Clone, Default)]
pub struct PropsScope {
    /// Local name → path read off the props object (empty = the object itself)
    locals: FxHashMap<String, Vec<String>>,
    /// Local name → default value source (`size = "md"`)
    defaults: FxHashMap<String, String>,
}

impl PropsScope {
    /// Scope of a one-parameter arrow, plus its body
    pub fn from_arrow(expr: &JsExpr) -> Option<(PropsScope, &JsExpr)> {
        let JsExpr::Arrow { params, body } = expr else {
            return None;
        };
        let [param] = params.as_slice() else {
            return None;
        };
        if matches!(param, Param::Other(_)) {
            return None;
        }
        let mut scope = PropsScope::default();
        for (local, path) in param.bindings() {
            scope.locals.insert(local, path);
        }
        if let Param::Object(props) = param {
            for prop in props {
                if let (Binding::Local(local), Some(default)) = (&prop.binding, &prop.default) {
                    scope.defaults.insert(local.clone(), default.clone());
                }
            }
        }
        Some((scope, body.as_ref()))
    }

    /// Scope with no bindings, for bare slot expressions
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.locals.contains_key(name)
    }

    /// Path read off props: `p.theme.colors` → `[theme, colors]`
    pub fn props_path(&self, expr: &JsExpr) -> Option<Vec<String>> {
        let (root, rest) = expr.member_path()?;
        let base = self.locals.get(root)?;
        let mut path = base.clone();
        path.extend(rest.into_iter().map(str::to_string));
        Some(path)
    }

    /// Single prop read (`p.$active`, destructured `$active`)
    pub fn prop_read(&self, expr: &JsExpr) -> Option<String> {
        match self.props_path(expr)?.as_slice() {
            [prop] => Some(prop.clone()),
            _ => None,
        }
    }

    /// Default declared for the local `expr` reads directly
    pub fn default_for(&self, expr: &JsExpr) -> Option<&str> {
        match expr {
            JsExpr::Ident(name) => self.defaults.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// Test of a ternary or logical operand as a variant condition
    ///
    /// Props with a default are rejected: the default changes what the
    /// wrapper would have to test.
    pub fn condition(&self, test: &JsExpr) -> Option<VariantCondition> {
        match test {
            JsExpr::Unary { op, arg } if op == "!" => self.condition(arg)?.negate(),
            JsExpr::Binary { op, left, right } if is_equality(op) => {
                let (prop_side, literal) = match (right.literal(), left.literal()) {
                    (Some(lit), _) => (left.as_ref(), lit),
                    (None, Some(lit)) => (right.as_ref(), lit),
                    (None, None) => return None,
                };
                if self.default_for(prop_side).is_some() {
                    return None;
                }
                let prop = self.prop_read(prop_side)?;
                if op.starts_with('!') {
                    Some(VariantCondition::NotEquals(prop, literal))
                } else {
                    Some(VariantCondition::Equals(prop, literal))
                }
            }
            JsExpr::Binary { op, left, right } if op == "&&" => {
                let mut parts = self.condition(left)?.parts().into_iter().cloned().collect::<Vec<_>>();
                parts.extend(self.condition(right)?.parts().into_iter().cloned());
                VariantCondition::all(parts)
            }
            _ => {
                if self.default_for(test).is_some() {
                    return None;
                }
                self.prop_read(test).map(VariantCondition::Truthy)
            }
        }
    }

    /// Rewrite `expr` to read off [`PROPS_IDENT`]; `None` when it reads any
    /// identifier this scope does not bind
    pub fn to_props_expr(&self, expr: &JsExpr) -> Option<JsExpr> {
        Some(match expr {
            JsExpr::Ident(name) => {
                let path = self.locals.get(name)?;
                let read = path
                    .iter()
                    .fold(JsExpr::ident(PROPS_IDENT), |acc, key| JsExpr::member(acc, key.clone()));
                match self.defaults.get(name) {
                    Some(default) => JsExpr::Binary {
                        op: "??".to_string(),
                        left: Box::new(read),
                        right: Box::new(JsExpr::Other {
                            kind: "default".to_string(),
                            text: default.clone(),
                        }),
                    },
                    None => read,
                }
            }
            JsExpr::Member {
                object,
                property,
                optional,
            } => JsExpr::Member {
                object: Box::new(self.to_props_expr(object)?),
                property: property.clone(),
                optional: *optional,
            },
            JsExpr::Index { object, index } => JsExpr::Index {
                object: Box::new(self.to_props_expr(object)?),
                index: Box::new(self.to_props_expr(index)?),
            },
            JsExpr::Template { quasis, exprs } => JsExpr::Template {
                quasis: quasis.clone(),
                exprs: exprs
                    .iter()
                    .map(|e| self.to_props_expr(e))
                    .collect::<Option<Vec<_>>>()?,
            },
            JsExpr::Conditional {
                test,
                consequent,
                alternate,
            } => JsExpr::Conditional {
                test: Box::new(self.to_props_expr(test)?),
                consequent: Box::new(self.to_props_expr(consequent)?),
                alternate: Box::new(self.to_props_expr(alternate)?),
            },
            JsExpr::Binary { op, left, right } => JsExpr::Binary {
                op: op.clone(),
                left: Box::new(self.to_props_expr(left)?),
                right: Box::new(self.to_props_expr(right)?),
            },
            JsExpr::Unary { op, arg } => JsExpr::Unary {
                op: op.clone(),
                arg: Box::new(self.to_props_expr(arg)?),
            },
            JsExpr::String(_)
            | JsExpr::Number(_)
            | JsExpr::Bool(_)
            | JsExpr::Null
            | JsExpr::Undefined => expr.clone(),
            JsExpr::TaggedTemplate { .. }
            | JsExpr::Call { .. }
            | JsExpr::Arrow { .. }
            | JsExpr::Other { .. } => return None,
        })
    }

    /// Props `expr` reads, first path segment only
    pub fn reads(&self, expr: &JsExpr) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        self.collect_reads(expr, &mut out);
        out
    }

    fn collect_reads(&self, expr: &JsExpr, out: &mut Vec<String>) {
        if let Some(path) = self.props_path(expr) {
            if let Some(first) = path.first() {
                if !out.contains(first) {
                    out.push(first.clone());
                }
            }
            return;
        }
        for child in expr.children() {
            self.collect_reads(child, out);
        }
    }
}

fn is_equality(op: &str) -> bool {
    matches!(op, "===" | "==" | "!==" | "!=")
}
