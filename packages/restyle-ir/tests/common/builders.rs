//! Test data builders
//!
//! Declarations are written the way a front end hands them over: raw rule
//! trees with `${n}` standing for slot `n`, flattened by the normalizer.

use restyle_ir::features::normalization::{CssRuleNormalizer, RawNode};
use restyle_ir::shared::models::{
    DeclarationBase, ImportBinding, Literal, PropType, SlotExpr, SlotTable, SourceFile,
    StyledDeclaration,
};

/// `${0}` → `__SLOT_0__`
pub fn with_placeholders(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) if after[..end].chars().all(|c| c.is_ascii_digit()) && end > 0 => {
                out.push_str(&format!("__SLOT_{}__", &after[..end]));
                rest = &after[end + 1..];
            }
            _ => {
                out.push_str("${");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Builder for one styled declaration
#[derive(Debug)]
pub struct DeclBuilder {
    name: String,
    base: DeclarationBase,
    nodes: Vec<RawNode>,
    slots: Vec<SlotExpr>,
    prop_types: Vec<(String, PropType)>,
}

impl DeclBuilder {
    fn new(name: &str, base: DeclarationBase) -> Self {
        Self {
            name: name.to_string(),
            base,
            nodes: Vec::new(),
            slots: Vec::new(),
            prop_types: Vec::new(),
        }
    }

    /// `styled.<tag>`
    pub fn intrinsic(name: &str, tag: &str) -> Self {
        Self::new(name, DeclarationBase::Intrinsic(tag.to_string()))
    }

    /// `styled(Target)`
    pub fn component(name: &str, target: &str) -> Self {
        Self::new(name, DeclarationBase::Component(target.to_string()))
    }

    /// `css` helper
    pub fn helper(name: &str) -> Self {
        Self::new(name, DeclarationBase::Helper)
    }

    /// Slot expressions, in index order
    pub fn slot(mut self, source: &str) -> Self {
        self.slots.push(SlotExpr::new(source));
        self
    }

    /// Declarations directly on the component
    pub fn css(mut self, declarations: &[&str]) -> Self {
        for text in declarations {
            self.nodes.push(RawNode::declaration(with_placeholders(text)));
        }
        self
    }

    pub fn rule(mut self, selector: &str, declarations: &[&str]) -> Self {
        let children = declarations
            .iter()
            .map(|text| RawNode::declaration(with_placeholders(text)))
            .collect();
        self.nodes.push(RawNode::rule(with_placeholders(selector), children));
        self
    }

    pub fn at_rule(mut self, name: &str, params: &str, declarations: &[&str]) -> Self {
        let children = declarations
            .iter()
            .map(|text| RawNode::declaration(with_placeholders(text)))
            .collect();
        self.nodes.push(RawNode::at_rule(name, params, children));
        self
    }

    pub fn node(mut self, node: RawNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn string_enum(mut self, prop: &str, values: &[&str]) -> Self {
        let literals = values.iter().map(|v| Literal::string(*v)).collect();
        self.prop_types.push((prop.to_string(), PropType::Enum(literals)));
        self
    }

    /// Normalize the rule tree; panics when any text was dropped
    pub fn build(self) -> StyledDeclaration {
        let slots: SlotTable = self.slots.into_iter().collect();
        let normalized = CssRuleNormalizer::new().normalize(&self.nodes, &slots);
        assert!(
            normalized.dropped.is_empty(),
            "declaration text dropped while building `{}`: {:?}",
            self.name,
            normalized.dropped
        );
        let mut decl = StyledDeclaration::new(self.name, self.base).with_rules(normalized.rules);
        decl.slots = slots;
        for (prop, ty) in self.prop_types {
            decl = decl.with_prop_type(prop, ty);
        }
        decl
    }
}

/// Builder for a source file
#[derive(Debug, Default)]
pub struct FileBuilder {
    file: SourceFile,
}

impl FileBuilder {
    pub fn new(path: &str) -> Self {
        Self {
            file: SourceFile::new(path),
        }
    }

    pub fn decl(mut self, decl: DeclBuilder) -> Self {
        self.file.declarations.push(decl.build());
        self
    }

    pub fn import(mut self, local: &str, source: &str) -> Self {
        self.file.imports.push(ImportBinding::named(local, source));
        self
    }

    pub fn mutated(mut self, local: &str) -> Self {
        self.file.mutated_bindings.push(local.to_string());
        self
    }

    pub fn build(self) -> SourceFile {
        self.file
    }
}

/// Single-declaration file
pub fn single(decl: DeclBuilder) -> SourceFile {
    FileBuilder::new("Component.tsx").decl(decl).build()
}
