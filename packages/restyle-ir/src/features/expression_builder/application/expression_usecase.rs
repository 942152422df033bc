//! Expression Builder UseCase
//!
//! Parses slot expressions and validates resolver output text. One instance
//! lives per file conversion; parses are memoized by source text since the
//! same slot expression is often consulted by several recognizers.

use rustc_hash::FxHashMap;

use crate::errors::Result;
use crate::features::expression_builder::domain::{ExpressionBuilderTrait, JsExpr};
use crate::features::expression_builder::infrastructure::TypeScriptExpressionBuilder;

/// Expression Builder UseCase Trait
pub trait ExpressionBuilderUseCase {
    /// Parse one slot expression
    fn parse_expression(&mut self, source: &str) -> Result<JsExpr>;

    /// Check that resolver output is a single well-formed expression
    fn validate_output(&mut self, source: &str) -> Result<()> {
        self.parse_expression(source).map(|_| ())
    }
}

/// Expression Builder UseCase Implementation
pub struct ExpressionBuilderUseCaseImpl {
    builder: TypeScriptExpressionBuilder,
    cache: FxHashMap<String, JsExpr>,
}

impl ExpressionBuilderUseCaseImpl {
    pub fn new() -> Result<Self> {
        Ok(Self {
            builder: TypeScriptExpressionBuilder::new()?,
            cache: FxHashMap::default(),
        })
    }
}

impl ExpressionBuilderUseCase for ExpressionBuilderUseCaseImpl {
    fn parse_expression(&mut self, source: &str) -> Result<JsExpr> {
        if let Some(expr) = self.cache.get(source) {
            return Ok(expr.clone());
        }
        let expr = self.builder.build(source)?;
        self.cache.insert(source.to_string(), expr.clone());
        Ok(expr)
    }
}
