//! Custom assertions for lowering results

use pretty_assertions::assert_eq;
use restyle_ir::shared::models::{ReasonCode, StyleValue};
use restyle_ir::{ConversionResult, LoweredFile};

/// Unwrap a converted file, failing with the bail diagnostic otherwise
pub fn assert_converted(result: &ConversionResult) -> &LoweredFile {
    match result {
        ConversionResult::Converted(lowered) => lowered,
        ConversionResult::Bailed(report) => {
            panic!("expected conversion, file bailed: {}", report.diagnostic)
        }
    }
}

/// Assert the file bailed with `reason` and that nothing partial survived
pub fn assert_bailed(result: &ConversionResult, reason: ReasonCode) {
    match result {
        ConversionResult::Bailed(report) => {
            assert_eq!(
                report.diagnostic.reason_code, reason,
                "bailed for another reason: {}",
                report.diagnostic
            );
            assert!(report.diagnostic.is_bail());
        }
        ConversionResult::Converted(lowered) => panic!(
            "expected bail with {}, file converted with styles {:?}",
            reason,
            lowered.styles.keys().collect::<Vec<_>>()
        ),
    }
}

/// Compare one style object against JSON
pub fn assert_style_json(lowered: &LoweredFile, key: &str, expected: serde_json::Value) {
    let style = lowered
        .style(key)
        .unwrap_or_else(|| panic!("no style `{}` in {:?}", key, lowered.styles.keys().collect::<Vec<_>>()));
    assert_eq!(serde_json::to_value(style).unwrap(), expected);
}

pub fn assert_value(lowered: &LoweredFile, key: &str, property: &str, expected: StyleValue) {
    assert_eq!(
        lowered.value(key, property),
        Some(&expected),
        "style `{}` property `{}`",
        key,
        property
    );
}

/// Style keys in output order
pub fn style_keys(lowered: &LoweredFile) -> Vec<&str> {
    lowered.styles.keys().map(String::as_str).collect()
}
