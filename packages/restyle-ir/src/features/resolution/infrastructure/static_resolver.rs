//! Table-driven value resolver
//!
//! Exact-match lookup of theme paths, imported calls and imported value
//! paths. Enough for tests and for adapters whose mapping is a fixed table;
//! it implements no lookup policy of its own.
//!
//! ```yaml
//! theme:
//!   colors.primary:
//!     exprSource: vars.primary
//!     imports: [{ importedName: vars, sourceModule: ./tokens.stylex }]
//! calls:
//!   - importedName: color
//!     sourceModule: ./theme
//!     argument: primary
//!     exprSource: vars.primary
//! values:
//!   - importedName: tokens
//!     sourceModule: ./tokens
//!     path: space.md
//!     exprSource: spacing.md
//! ```

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::errors::{RestyleError, Result};
use crate::features::resolution::ports::{ResolveRequest, ResolvedExpr, ValueResolver};
use crate::shared::models::ImportSpec;

/// One imported-call entry of the YAML table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallEntry {
    pub imported_name: String,
    pub source_module: String,
    pub argument: String,
    pub expr_source: String,
    #[serde(default)]
    pub imports: Vec<ImportSpec>,
}

/// One imported-value entry of the YAML table; `path` is dotted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueEntry {
    pub imported_name: String,
    pub source_module: String,
    #[serde(default)]
    pub path: String,
    pub expr_source: String,
    #[serde(default)]
    pub imports: Vec<ImportSpec>,
}

/// Serialized form of [`StaticValueResolver`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverTable {
    pub theme: FxHashMap<String, ResolvedExpr>,
    pub calls: Vec<CallEntry>,
    pub values: Vec<ValueEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct StaticValueResolver {
    theme: FxHashMap<String, ResolvedExpr>,
    /// (imported name, module, argument)
    calls: FxHashMap<(String, String, String), ResolvedExpr>,
    /// (imported name, module, dotted path)
    values: FxHashMap<(String, String, String), ResolvedExpr>,
}

impl StaticValueResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, path: impl Into<String>, resolved: ResolvedExpr) -> Self {
        self.theme.insert(path.into(), resolved);
        self
    }

    pub fn with_call(
        mut self,
        imported_name: impl Into<String>,
        source_module: impl Into<String>,
        argument: impl Into<String>,
        resolved: ResolvedExpr,
    ) -> Self {
        self.calls.insert(
            (imported_name.into(), source_module.into(), argument.into()),
            resolved,
        );
        self
    }

    pub fn with_value(
        mut self,
        imported_name: impl Into<String>,
        source_module: impl Into<String>,
        path: impl Into<String>,
        resolved: ResolvedExpr,
    ) -> Self {
        self.values.insert(
            (imported_name.into(), source_module.into(), path.into()),
            resolved,
        );
        self
    }

    pub fn from_table(table: ResolverTable) -> Self {
        let mut resolver = Self {
            theme: table.theme,
            ..Self::default()
        };
        for entry in table.calls {
            let resolved = ResolvedExpr {
                expr_source: entry.expr_source,
                imports: entry.imports,
            };
            resolver = resolver.with_call(entry.imported_name, entry.source_module, entry.argument, resolved);
        }
        for entry in table.values {
            let resolved = ResolvedExpr {
                expr_source: entry.expr_source,
                imports: entry.imports,
            };
            resolver = resolver.with_value(entry.imported_name, entry.source_module, entry.path, resolved);
        }
        resolver
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let table: ResolverTable = serde_yaml::from_str(content)
            .map_err(|e| RestyleError::config(format!("invalid resolver table: {}", e)))?;
        Ok(Self::from_table(table))
    }

    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn len(&self) -> usize {
        self.theme.len() + self.calls.len() + self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ValueResolver for StaticValueResolver {
    fn resolve_value(&self, request: &ResolveRequest) -> Option<ResolvedExpr> {
        match request {
            ResolveRequest::ThemePath { path } => self.theme.get(path).cloned(),
            ResolveRequest::ImportedCall {
                imported_name,
                source_module,
                argument,
                ..
            } => self
                .calls
                .get(&(imported_name.clone(), source_module.clone(), argument.clone()))
                .cloned(),
            ResolveRequest::ImportedValue {
                imported_name,
                source_module,
                path,
                ..
            } => self
                .values
                .get(&(imported_name.clone(), source_module.clone(), path.join(".")))
                .cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TABLE: &str = r#"
theme:
  colors.primary:
    exprSource: vars.primary
    imports: [{ importedName: vars, sourceModule: ./tokens.stylex }]
calls:
  - importedName: color
    sourceModule: ./theme
    argument: primary
    exprSource: vars.primary
values:
  - importedName: tokens
    sourceModule: ./tokens
    path: space.md
    exprSource: spacing.md
"#;

    #[test]
    fn test_yaml_table() {
        let resolver = StaticValueResolver::from_yaml_str(TABLE).unwrap();
        assert_eq!(resolver.len(), 3);

        let theme = resolver
            .resolve_value(&ResolveRequest::ThemePath {
                path: "colors.primary".into(),
            })
            .unwrap();
        assert_eq!(theme.expr_source, "vars.primary");
        assert_eq!(theme.imports, vec![ImportSpec::new("vars", "./tokens.stylex")]);

        let value = resolver.resolve_value(&ResolveRequest::ImportedValue {
            local_name: "t".into(),
            imported_name: "tokens".into(),
            source_module: "./tokens".into(),
            path: vec!["space".into(), "md".into()],
        });
        assert_eq!(value.map(|v| v.expr_source), Some("spacing.md".to_string()));
    }

    #[test]
    fn test_exact_match_only() {
        let resolver = StaticValueResolver::new().with_call("color", "./theme", "primary", ResolvedExpr::new("x"));
        let miss = resolver.resolve_value(&ResolveRequest::ImportedCall {
            local_name: "color".into(),
            imported_name: "color".into(),
            source_module: "./other".into(),
            argument: "primary".into(),
        });
        assert!(miss.is_none());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();
        let resolver = StaticValueResolver::from_yaml(file.path()).unwrap();
        assert!(!resolver.is_empty());
    }

    #[test]
    fn test_invalid_table() {
        assert!(StaticValueResolver::from_yaml_str("unknown: 1").is_err());
    }
}
