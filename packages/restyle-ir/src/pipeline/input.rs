//! Pre-normalization input
//!
//! A front end that only pre-parses styled templates hands over raw rule
//! trees; they are flattened here before lowering. Declaration text the
//! normalizer cannot read is reported as a `dropped-declaration` warning.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::features::normalization::{CssRuleNormalizer, RawNode};
use crate::shared::models::{
    DeclarationBase, Diagnostic, ImportBinding, Location, PropType, ReasonCode, SlotTable,
    SourceFile, Span, StyledDeclaration,
};

/// One styled declaration with its rule tree not yet flattened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDeclaration {
    pub local_name: String,
    pub base: DeclarationBase,
    pub tree: Vec<RawNode>,
    #[serde(default)]
    pub slots: SlotTable,
    #[serde(default)]
    pub prop_types: IndexMap<String, PropType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSourceFile {
    pub path: String,
    pub declarations: Vec<RawDeclaration>,
    #[serde(default)]
    pub imports: Vec<ImportBinding>,
    #[serde(default)]
    pub mutated_bindings: Vec<String>,
}

impl RawSourceFile {
    pub fn from_json(json: &str) -> crate::errors::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Flatten every rule tree; returns the file plus dropped-text warnings
    pub fn normalize(self, normalizer: &CssRuleNormalizer) -> (SourceFile, Vec<Diagnostic>) {
        let mut warnings = Vec::new();
        let mut declarations = Vec::with_capacity(self.declarations.len());

        for raw in self.declarations {
            let normalized = normalizer.normalize(&raw.tree, &raw.slots);
            let location = Location::file(&self.path).in_declaration(&raw.local_name, raw.span);
            for text in normalized.dropped {
                debug!(declaration = %raw.local_name, %text, "declaration text dropped");
                warnings.push(Diagnostic::new(
                    ReasonCode::DroppedDeclaration,
                    location.clone(),
                    text,
                ));
            }

            let mut decl = StyledDeclaration::new(raw.local_name, raw.base).with_rules(normalized.rules);
            decl.slots = raw.slots;
            decl.prop_types = raw.prop_types;
            decl.span = raw.span;
            declarations.push(decl);
        }

        let file = SourceFile {
            path: self.path,
            declarations,
            imports: self.imports,
            mutated_bindings: self.mutated_bindings,
        };
        (file, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::SlotExpr;

    #[test]
    fn test_normalize_flattens_and_reports_dropped_text() {
        let raw = RawSourceFile {
            path: "Button.tsx".into(),
            declarations: vec![RawDeclaration {
                local_name: "Button".into(),
                base: DeclarationBase::Intrinsic("button".into()),
                tree: vec![
                    RawNode::declaration("color: red"),
                    RawNode::declaration("this is not css"),
                    RawNode::rule("&:hover", vec![RawNode::declaration("color: __SLOT_0__")]),
                ],
                slots: vec![SlotExpr::new("p => p.$hover")].into_iter().collect(),
                prop_types: IndexMap::new(),
                span: None,
            }],
            ..RawSourceFile::default()
        };

        let (file, warnings) = raw.normalize(&CssRuleNormalizer::new());
        let decl = &file.declarations[0];
        assert_eq!(decl.rules.len(), 2);
        assert_eq!(decl.rules[1].selector, "&:hover");
        assert!(decl.slots_are_consistent());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].reason_code, ReasonCode::DroppedDeclaration);
        assert!(!warnings[0].is_bail());
    }
}
