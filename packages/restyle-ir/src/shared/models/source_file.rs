//! File-level input: the declarations of one component file plus the import
//! and mutation facts the resolver needs.

use serde::{Deserialize, Serialize};

use super::declaration::StyledDeclaration;

/// One import binding visible in the file.
///
/// `imported` is `"default"` for default imports and `"*"` for namespace imports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportBinding {
    pub local: String,
    pub imported: String,
    pub source: String,
}

impl ImportBinding {
    pub fn named(local: impl Into<String>, source: impl Into<String>) -> Self {
        let local = local.into();
        Self {
            imported: local.clone(),
            local,
            source: source.into(),
        }
    }

    pub fn aliased(
        local: impl Into<String>,
        imported: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            local: local.into(),
            imported: imported.into(),
            source: source.into(),
        }
    }

    pub fn is_namespace(&self) -> bool {
        self.imported == "*"
    }
}

/// Import the generated code needs: `import { importedName } from "sourceModule"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSpec {
    pub imported_name: String,
    pub source_module: String,
}

impl ImportSpec {
    pub fn new(imported_name: impl Into<String>, source_module: impl Into<String>) -> Self {
        Self {
            imported_name: imported_name.into(),
            source_module: source_module.into(),
        }
    }
}

/// Everything the engine receives for one file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub declarations: Vec<StyledDeclaration>,
    #[serde(default)]
    pub imports: Vec<ImportBinding>,
    /// Local bindings the front end saw assigned or property-mutated in this file
    #[serde(default)]
    pub mutated_bindings: Vec<String>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_declaration(mut self, declaration: StyledDeclaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    pub fn with_import(mut self, import: ImportBinding) -> Self {
        self.imports.push(import);
        self
    }

    pub fn with_mutated_binding(mut self, local: impl Into<String>) -> Self {
        self.mutated_bindings.push(local.into());
        self
    }

    pub fn import_for(&self, local: &str) -> Option<&ImportBinding> {
        self.imports.iter().find(|import| import.local == local)
    }

    pub fn declaration(&self, local_name: &str) -> Option<&StyledDeclaration> {
        self.declarations
            .iter()
            .find(|decl| decl.local_name == local_name)
    }

    pub fn is_mutated(&self, local: &str) -> bool {
        self.mutated_bindings.iter().any(|m| m == local)
    }

    /// Load a file description produced by a front end running elsewhere
    pub fn from_json(json: &str) -> crate::errors::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
