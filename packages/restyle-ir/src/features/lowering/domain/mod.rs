//! Lowering Domain - bail signal, per-file output and the lowering context

mod context;

pub use context::{write_value, AttributeBucket, LoweringContext, PendingStyleFunction, SiblingBucket, VariantBucket};

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::shared::models::{
    Diagnostic, Location, ReasonCode, Severity, StyleObject, StyleValue, StyledDeclaration,
};

// ═══════════════════════════════════════════════════════════════════════════
// Bail
// ═══════════════════════════════════════════════════════════════════════════

/// Conversion of the whole file must stop; the source stays untouched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} at {location}: {context}")]
pub struct Bail {
    pub reason: ReasonCode,
    pub context: String,
    pub location: Location,
}

impl Bail {
    pub fn new(reason: ReasonCode, location: Location, context: impl Into<String>) -> Self {
        Self {
            reason,
            context: context.into(),
            location,
        }
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        let mut diagnostic = Diagnostic::new(self.reason, self.location, self.context);
        // a warning-class code that aborted conversion is still a bail
        diagnostic.severity = Severity::Bail;
        diagnostic
    }
}

/// `Continue | Abort(reason)`, short-circuited with `?`
pub type LowerResult<T> = Result<T, Bail>;

// ═══════════════════════════════════════════════════════════════════════════
// Cross-component overrides
// ═══════════════════════════════════════════════════════════════════════════

/// Phase-1 record: a rule on `parent` styles `child` rendered inside it
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideRequest {
    pub parent: String,
    pub child: String,
    /// Pseudo-state of the parent the values apply under; `None` = always
    pub ancestor_pseudo: Option<String>,
    /// Rule the request came from, for diagnostics
    pub selector: String,
    pub values: StyleObject,
    /// Declaration whose rule produced the request
    pub origin: String,
}

/// Phase-2 result: `child` inside `parent` also applies `override_style_key`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescendantOverride {
    pub parent_style_key: String,
    pub child_style_key: String,
    pub override_style_key: String,
    /// Values per ancestor pseudo; the `None` key is the base bucket
    #[serde(skip)]
    pub buckets: IndexMap<Option<String>, StyleObject>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Output
// ═══════════════════════════════════════════════════════════════════════════

/// Dynamic style: `(width) => ({ width })`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynamicStyle {
    pub params: Vec<String>,
    pub body: StyleObject,
}

/// Everything code generation needs for one converted file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoweredFile {
    pub path: String,
    /// Style key → style object, in `stylex.create` order
    pub styles: IndexMap<String, StyleObject>,
    /// Style key → dynamic style function
    pub style_functions: IndexMap<String, DynamicStyle>,
    /// Input declarations with their annotations filled in
    pub declarations: Vec<StyledDeclaration>,
    pub descendant_overrides: Vec<DescendantOverride>,
    /// Warnings; a converted file never carries a bail diagnostic
    pub diagnostics: Vec<Diagnostic>,
}

impl LoweredFile {
    pub fn style(&self, key: &str) -> Option<&StyleObject> {
        self.styles.get(key)
    }

    pub fn declaration(&self, local_name: &str) -> Option<&StyledDeclaration> {
        self.declarations.iter().find(|d| d.local_name == local_name)
    }

    /// Style object of a declaration's own key
    pub fn declaration_style(&self, local_name: &str) -> Option<&StyleObject> {
        let key = self.declaration(local_name)?.annotations.style_key.as_deref()?;
        self.styles.get(key)
    }

    /// Value of `property` in the style object `key`
    pub fn value(&self, key: &str, property: &str) -> Option<&StyleValue> {
        self.styles.get(key)?.get(property)
    }
}

/// Why a file was left unconverted
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BailReport {
    pub path: String,
    pub diagnostic: Diagnostic,
    /// Warnings gathered before the bail
    pub warnings: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ConversionResult {
    Converted(LoweredFile),
    Bailed(BailReport),
}

impl ConversionResult {
    pub fn is_converted(&self) -> bool {
        matches!(self, ConversionResult::Converted(_))
    }

    pub fn is_bailed(&self) -> bool {
        matches!(self, ConversionResult::Bailed(_))
    }

    pub fn lowered(&self) -> Option<&LoweredFile> {
        match self {
            ConversionResult::Converted(file) => Some(file),
            ConversionResult::Bailed(_) => None,
        }
    }

    pub fn bail(&self) -> Option<&BailReport> {
        match self {
            ConversionResult::Converted(_) => None,
            ConversionResult::Bailed(report) => Some(report),
        }
    }

    /// Diagnostics the reporting layer shows, bail first
    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        match self {
            ConversionResult::Converted(file) => file.diagnostics.iter().collect(),
            ConversionResult::Bailed(report) => std::iter::once(&report.diagnostic)
                .chain(report.warnings.iter())
                .collect(),
        }
    }
}
