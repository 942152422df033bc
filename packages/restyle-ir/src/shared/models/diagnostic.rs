//! Diagnostics
//!
//! Every unsupported or ambiguous shape is reported as a [`Diagnostic`]. The
//! reporting layer consumes them; when a file is skipped they are the only
//! signal the user sees.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Not specifically handled, but a safe fallback was used
    Warning,
    /// Correctness cannot be guaranteed; the file is left unconverted
    Bail,
}

/// Closed set of machine-readable reason codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasonCode {
    UnsupportedSelector,
    KeepOriginal,
    HeterogeneousVariantValues,
    UnknownDescendantReference,
    MutatedImport,
    UnparseableExpression,
    UnparseableResolverOutput,
    UnresolvedReference,
    UnsupportedAtRule,
    UnsupportedDynamicShorthand,
    MultipleDynamicSlots,
    InlineStyleFallback,
    DroppedDeclaration,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::UnsupportedSelector => "unsupported-selector",
            ReasonCode::KeepOriginal => "keep-original",
            ReasonCode::HeterogeneousVariantValues => "heterogeneous-variant-values",
            ReasonCode::UnknownDescendantReference => "unknown-descendant-reference",
            ReasonCode::MutatedImport => "mutated-import",
            ReasonCode::UnparseableExpression => "unparseable-expression",
            ReasonCode::UnparseableResolverOutput => "unparseable-resolver-output",
            ReasonCode::UnresolvedReference => "unresolved-reference",
            ReasonCode::UnsupportedAtRule => "unsupported-at-rule",
            ReasonCode::UnsupportedDynamicShorthand => "unsupported-dynamic-shorthand",
            ReasonCode::MultipleDynamicSlots => "multiple-dynamic-slots",
            ReasonCode::InlineStyleFallback => "inline-style-fallback",
            ReasonCode::DroppedDeclaration => "dropped-declaration",
        }
    }

    /// Severity a diagnostic with this code carries
    pub fn severity(&self) -> Severity {
        match self {
            ReasonCode::InlineStyleFallback | ReasonCode::DroppedDeclaration => Severity::Warning,
            _ => Severity::Bail,
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a diagnostic points
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Location {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            file: path.into(),
            ..Self::default()
        }
    }

    pub fn in_declaration(mut self, name: impl Into<String>, span: Option<Span>) -> Self {
        self.declaration = Some(name.into());
        self.span = span;
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file)?;
        if let Some(span) = &self.span {
            if !span.is_zero() {
                write!(f, ":{}", span)?;
            }
        }
        if let Some(decl) = &self.declaration {
            write!(f, " ({})", decl)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: Severity,
    pub reason_code: ReasonCode,
    pub location: Location,
    /// Engineer-legible detail: the offending selector, expression or value
    pub context: String,
}

impl Diagnostic {
    pub fn new(reason_code: ReasonCode, location: Location, context: impl Into<String>) -> Self {
        Self {
            severity: reason_code.severity(),
            reason_code,
            location,
            context: context.into(),
        }
    }

    pub fn is_bail(&self) -> bool {
        self.severity == Severity::Bail
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Bail => "bail",
        };
        write!(
            f,
            "{}[{}] {}: {}",
            level, self.reason_code, self.location, self.context
        )
    }
}
