//! TypeScript Expression Builder - tree-sitter TypeScript → JsExpr
//!
//! Recursive descent over the tree-sitter node of one slot expression. The
//! source is wrapped as `(<expr>\n);` so object literals and arrow functions
//! parse as expressions.

use tree_sitter::{Node, Parser, Tree};

use crate::errors::{RestyleError, Result};
use crate::features::expression_builder::domain::{
    Binding, ExpressionBuilderTrait, JsExpr, Param, PatternProp,
};
use crate::shared::utils::tree_sitter::{
    extract_node_text, extract_node_text_owned, field_text, find_child_by_kind, first_error_span,
    named_children, unquote_string,
};

const PREFIX: &str = "(";
const SUFFIX: &str = "\n);";

pub struct TypeScriptExpressionBuilder {
    parser: Parser,
}

impl TypeScriptExpressionBuilder {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::language_typescript())
            .map_err(|e| RestyleError::parse(format!("Failed to set TypeScript language: {}", e)))?;

        Ok(Self { parser })
    }

    /// Parse source code and get tree
    fn parse(&mut self, wrapped: &str) -> Result<Tree> {
        self.parser
            .parse(wrapped, None)
            .ok_or_else(|| RestyleError::parse("Failed to parse TypeScript expression"))
    }

    /// Visit expression node and build the owned tree
    fn visit(&self, node: Node, src: &str) -> Result<JsExpr> {
        match node.kind() {
            "identifier" | "this" => {
                let text = extract_node_text(&node, src);
                Ok(if text == "undefined" {
                    JsExpr::Undefined
                } else {
                    JsExpr::Ident(text.to_string())
                })
            }
            "undefined" => Ok(JsExpr::Undefined),
            "null" => Ok(JsExpr::Null),
            "true" => Ok(JsExpr::Bool(true)),
            "false" => Ok(JsExpr::Bool(false)),
            "number" => Ok(JsExpr::Number(extract_node_text_owned(&node, src))),
            "string" => Ok(JsExpr::String(unquote_string(extract_node_text(&node, src)))),
            "template_string" => {
                let (quasis, exprs) = self.visit_template(node, src)?;
                Ok(JsExpr::Template { quasis, exprs })
            }

            // Transparent wrappers
            "parenthesized_expression"
            | "as_expression"
            | "satisfies_expression"
            | "non_null_expression"
            | "type_assertion" => {
                let inner = named_children(&node)
                    .into_iter()
                    .find(|c| !c.kind().contains("type"))
                    .ok_or_else(|| RestyleError::parse("empty parenthesized expression"))?;
                self.visit(inner, src)
            }

            "member_expression" => self.visit_member(node, src),
            "subscript_expression" => self.visit_subscript(node, src),
            "call_expression" => self.visit_call(node, src),
            "arrow_function" => self.visit_arrow(node, src),

            // Conditional expression (a ? b : c)
            "ternary_expression" => Ok(JsExpr::Conditional {
                test: Box::new(self.visit_field(node, "condition", src)?),
                consequent: Box::new(self.visit_field(node, "consequence", src)?),
                alternate: Box::new(self.visit_field(node, "alternative", src)?),
            }),

            "binary_expression" => {
                let op = field_text(&node, "operator", src)
                    .ok_or_else(|| RestyleError::parse("binary expression without operator"))?;
                Ok(JsExpr::Binary {
                    op: op.to_string(),
                    left: Box::new(self.visit_field(node, "left", src)?),
                    right: Box::new(self.visit_field(node, "right", src)?),
                })
            }

            "unary_expression" => {
                let op = field_text(&node, "operator", src)
                    .ok_or_else(|| RestyleError::parse("unary expression without operator"))?;
                Ok(JsExpr::Unary {
                    op: op.to_string(),
                    arg: Box::new(self.visit_field(node, "argument", src)?),
                })
            }

            kind => Ok(JsExpr::Other {
                kind: kind.to_string(),
                text: extract_node_text_owned(&node, src),
            }),
        }
    }

    fn visit_field(&self, node: Node, field: &str, src: &str) -> Result<JsExpr> {
        let child = node.child_by_field_name(field).ok_or_else(|| {
            RestyleError::parse(format!("`{}` is missing its {}", node.kind(), field))
        })?;
        self.visit(child, src)
    }

    /// Visit member access (obj.field, obj?.field)
    fn visit_member(&self, node: Node, src: &str) -> Result<JsExpr> {
        let object = self.visit_field(node, "object", src)?;
        let property = field_text(&node, "property", src)
            .ok_or_else(|| RestyleError::parse("member expression without property"))?;
        let optional = node.child_by_field_name("optional_chain").is_some()
            || find_child_by_kind(&node, "optional_chain").is_some();
        Ok(JsExpr::Member {
            object: Box::new(object),
            property: property.to_string(),
            optional,
        })
    }

    /// Visit subscript (obj["field"], obj[index])
    fn visit_subscript(&self, node: Node, src: &str) -> Result<JsExpr> {
        let object = self.visit_field(node, "object", src)?;
        let index = self.visit_field(node, "index", src)?;
        Ok(match index {
            JsExpr::String(property) => JsExpr::Member {
                object: Box::new(object),
                property,
                optional: false,
            },
            index => JsExpr::Index {
                object: Box::new(object),
                index: Box::new(index),
            },
        })
    }

    /// Visit call, including tagged templates (`css\`...\``)
    fn visit_call(&self, node: Node, src: &str) -> Result<JsExpr> {
        let callee = self.visit_field(node, "function", src)?;
        let arguments = node
            .child_by_field_name("arguments")
            .ok_or_else(|| RestyleError::parse("call expression without arguments"))?;

        if arguments.kind() == "template_string" {
            let (quasis, exprs) = self.visit_template(arguments, src)?;
            return Ok(JsExpr::TaggedTemplate {
                tag: Box::new(callee),
                quasis,
                exprs,
            });
        }

        let args = named_children(&arguments)
            .into_iter()
            .map(|arg| self.visit(arg, src))
            .collect::<Result<Vec<_>>>()?;
        Ok(JsExpr::Call {
            callee: Box::new(callee),
            args,
        })
    }

    /// Quasis are the raw text between substitutions
    fn visit_template(&self, node: Node, src: &str) -> Result<(Vec<String>, Vec<JsExpr>)> {
        let mut quasis = Vec::new();
        let mut exprs = Vec::new();
        let mut cursor = node.start_byte() + 1;
        for child in named_children(&node) {
            if child.kind() != "template_substitution" {
                continue;
            }
            quasis.push(src[cursor..child.start_byte()].to_string());
            let inner = named_children(&child)
                .into_iter()
                .next()
                .ok_or_else(|| RestyleError::parse("empty template substitution"))?;
            exprs.push(self.visit(inner, src)?);
            cursor = child.end_byte();
        }
        let end = node.end_byte().saturating_sub(1).max(cursor);
        quasis.push(src[cursor..end].to_string());
        Ok((quasis, exprs))
    }

    /// Visit arrow function; a block body must be a single `return`
    fn visit_arrow(&self, node: Node, src: &str) -> Result<JsExpr> {
        let params = if let Some(single) = node.child_by_field_name("parameter") {
            vec![Param::Ident(extract_node_text_owned(&single, src))]
        } else if let Some(formal) = node.child_by_field_name("parameters") {
            named_children(&formal)
                .into_iter()
                .map(|p| self.visit_param(p, src))
                .collect()
        } else {
            Vec::new()
        };

        let body_node = node
            .child_by_field_name("body")
            .ok_or_else(|| RestyleError::parse("arrow function without body"))?;
        let body = if body_node.kind() == "statement_block" {
            let statements = named_children(&body_node);
            match statements.as_slice() {
                [ret] if ret.kind() == "return_statement" => match named_children(ret).first() {
                    Some(value) => self.visit(*value, src)?,
                    None => JsExpr::Undefined,
                },
                _ => JsExpr::Other {
                    kind: "statement_block".to_string(),
                    text: extract_node_text_owned(&body_node, src),
                },
            }
        } else {
            self.visit(body_node, src)?
        };

        Ok(JsExpr::Arrow {
            params,
            body: Box::new(body),
        })
    }

    fn visit_param(&self, node: Node, src: &str) -> Param {
        let pattern = match node.kind() {
            "required_parameter" | "optional_parameter" => node.child_by_field_name("pattern"),
            _ => Some(node),
        };
        match pattern {
            Some(p) if p.kind() == "identifier" => Param::Ident(extract_node_text_owned(&p, src)),
            Some(p) if p.kind() == "object_pattern" => Param::Object(self.visit_object_pattern(p, src)),
            _ => Param::Other(extract_node_text_owned(&node, src)),
        }
    }

    fn visit_object_pattern(&self, node: Node, src: &str) -> Vec<PatternProp> {
        let mut props = Vec::new();
        for child in named_children(&node) {
            match child.kind() {
                "shorthand_property_identifier_pattern" => {
                    let name = extract_node_text_owned(&child, src);
                    props.push(PatternProp {
                        key: name.clone(),
                        binding: Binding::Local(name),
                        default: None,
                    });
                }
                "object_assignment_pattern" => {
                    let Some(left) = child.child_by_field_name("left") else {
                        continue;
                    };
                    let name = extract_node_text_owned(&left, src);
                    props.push(PatternProp {
                        key: name.clone(),
                        binding: Binding::Local(name),
                        default: field_text(&child, "right", src).map(str::to_string),
                    });
                }
                "pair_pattern" => {
                    let (Some(key), Some(value)) = (
                        child.child_by_field_name("key"),
                        child.child_by_field_name("value"),
                    ) else {
                        continue;
                    };
                    let key = unquote_string(extract_node_text(&key, src));
                    let (value, default) = if value.kind() == "assignment_pattern" {
                        (
                            value.child_by_field_name("left").unwrap_or(value),
                            field_text(&value, "right", src).map(str::to_string),
                        )
                    } else {
                        (value, None)
                    };
                    let binding = if value.kind() == "object_pattern" {
                        Binding::Pattern(self.visit_object_pattern(value, src))
                    } else {
                        Binding::Local(extract_node_text_owned(&value, src))
                    };
                    props.push(PatternProp {
                        key,
                        binding,
                        default,
                    });
                }
                // rest patterns bind the remaining props; nothing to track
                _ => {}
            }
        }
        props
    }
}

impl ExpressionBuilderTrait for TypeScriptExpressionBuilder {
    fn build(&mut self, source: &str) -> Result<JsExpr> {
        let wrapped = format!("{}{}{}", PREFIX, source, SUFFIX);
        let tree = self.parse(&wrapped)?;
        let root = tree.root_node();

        if root.has_error() {
            let at = first_error_span(&root)
                .map(|span| format!(" at {}", span))
                .unwrap_or_default();
            return Err(RestyleError::parse(format!(
                "invalid expression{}: {}",
                at,
                source.trim()
            )));
        }

        let statements = named_children(&root);
        let [statement] = statements.as_slice() else {
            return Err(RestyleError::parse(format!(
                "expected a single expression: {}",
                source.trim()
            )));
        };
        let expr = named_children(statement)
            .into_iter()
            .next()
            .filter(|_| statement.kind() == "expression_statement")
            .ok_or_else(|| RestyleError::parse(format!("not an expression: {}", source.trim())))?;

        self.visit(expr, &wrapped)
    }

    fn language(&self) -> &str {
        "typescript"
    }
}
