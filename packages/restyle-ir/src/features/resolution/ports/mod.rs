//! Resolution Ports
//!
//! The value-resolver contract. An adapter outside the engine decides how
//! theme paths and imported symbols map to output expressions; the engine
//! treats what it returns as opaque printable source.

use serde::{Deserialize, Serialize};

use crate::shared::models::{ExprValue, ImportSpec};

mod recognizer;

pub use recognizer::{RecognizeContext, Recognizer};

/// What the engine asks the adapter to resolve
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ResolveRequest {
    /// `props.theme.colors.primary` → path `colors.primary`
    ThemePath { path: String },
    /// `color("primary")` where `color` is imported
    #[serde(rename_all = "camelCase")]
    ImportedCall {
        local_name: String,
        imported_name: String,
        source_module: String,
        argument: String,
    },
    /// `tokens.space.md` where `tokens` is imported
    #[serde(rename_all = "camelCase")]
    ImportedValue {
        local_name: String,
        imported_name: String,
        source_module: String,
        path: Vec<String>,
    },
}

/// Adapter answer: output expression source plus the imports it needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedExpr {
    pub expr_source: String,
    #[serde(default)]
    pub imports: Vec<ImportSpec>,
}

impl ResolvedExpr {
    pub fn new(expr_source: impl Into<String>) -> Self {
        Self {
            expr_source: expr_source.into(),
            imports: Vec::new(),
        }
    }

    pub fn with_import(mut self, import: ImportSpec) -> Self {
        self.imports.push(import);
        self
    }

    pub fn into_expr_value(self) -> ExprValue {
        ExprValue::new(self.expr_source).with_imports(self.imports)
    }
}

/// Value resolver contract
///
/// Calls are synchronous pure queries. Implementations are shared across
/// files converted in parallel, hence `Send + Sync`.
pub trait ValueResolver: Send + Sync {
    fn resolve_value(&self, request: &ResolveRequest) -> Option<ResolvedExpr>;
}

impl<T: ValueResolver + ?Sized> ValueResolver for &T {
    fn resolve_value(&self, request: &ResolveRequest) -> Option<ResolvedExpr> {
        (**self).resolve_value(request)
    }
}

impl<T: ValueResolver + ?Sized> ValueResolver for Box<T> {
    fn resolve_value(&self, request: &ResolveRequest) -> Option<ResolvedExpr> {
        (**self).resolve_value(request)
    }
}

/// Resolver that knows nothing; every lookup misses
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopResolver;

impl ValueResolver for NoopResolver {
    fn resolve_value(&self, _request: &ResolveRequest) -> Option<ResolvedExpr> {
        None
    }
}
