//! Shared models
//!
//! Input IR handed over by the declaration front end, the StyleX output model,
//! and diagnostics.

pub mod css_rule;
pub mod declaration;
pub mod diagnostic;
pub mod literal;
pub mod slot;
pub mod source_file;
mod span;
pub mod style;

pub use css_rule::{CssDeclaration, CssRule, CssValue, ValuePart};
pub use declaration::{
    AttributeWrapper, CompoundVariant, DeclarationBase, LoweringAnnotations, PropType,
    SiblingWrapper, StyleFunctionUse, StyledDeclaration, VariantDimension,
};
pub use diagnostic::{Diagnostic, Location, ReasonCode, Severity};
pub use literal::Literal;
pub use slot::{SlotExpr, SlotIndex, SlotTable};
pub use source_file::{ImportBinding, ImportSpec, SourceFile};
pub use span::Span;
pub use style::{ConditionKey, ConditionMap, ExprValue, PropertyValues, StyleObject, StyleValue};
