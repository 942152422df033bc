// Integration tests for interpolated values: variants, enumerations,
// resolver lookups and style functions

mod common;
use common::*;

use pretty_assertions::assert_eq;
use restyle_ir::config::LoweringConfig;
use restyle_ir::shared::models::{ReasonCode, StyleValue};
use restyle_ir::RuleLoweringEngine;
use serde_json::json;

fn expr_source(value: Option<&StyleValue>) -> Option<&str> {
    match value {
        Some(StyleValue::Expr(expr)) => Some(expr.source.as_str()),
        _ => None,
    }
}

#[test]
fn test_boolean_ternary_becomes_variant() {
    let file = single(
        DeclBuilder::intrinsic("Button", "button")
            .slot("p => p.$disabled ? 0.5 : 1")
            .css(&["opacity: ${0}"]),
    );
    let result = RuleLoweringEngine::default().convert_file(&file);
    let lowered = assert_converted(&result);

    assert_style_json(lowered, "button", json!({"opacity": 1.0}));
    assert_style_json(lowered, "buttonDisabled", json!({"opacity": 0.5}));

    let annotations = &lowered.declarations[0].annotations;
    assert_eq!(
        annotations.variant_style_keys.get("$disabled").map(String::as_str),
        Some("buttonDisabled")
    );
    assert!(annotations.needs_wrapper);
    assert!(annotations.forward_exclusions.contains("$disabled"));
}

#[test]
fn test_enumeration_ternary_has_no_overlap() {
    let file = single(
        DeclBuilder::intrinsic("Badge", "span")
            .slot("p => p.tone === \"a\" ? \"red\" : p.tone === \"b\" ? \"green\" : \"gray\"")
            .css(&["color: ${0}"]),
    );
    let result = RuleLoweringEngine::default().convert_file(&file);
    let lowered = assert_converted(&result);

    assert_style_json(lowered, "badge", json!({"color": "gray"}));
    let keys = &lowered.declarations[0].annotations.variant_style_keys;
    let a = keys.get("tone === \"a\"").unwrap();
    let b = keys.get("tone === \"b\"").unwrap();
    assert_style_json(lowered, a, json!({"color": "red"}));
    assert_style_json(lowered, b, json!({"color": "green"}));
    assert_eq!(keys.len(), 2);
}

#[test]
fn test_declared_enumeration_becomes_dimension() {
    let lowered_result = RuleLoweringEngine::default().convert_file(&fixture_button_file());
    let lowered = assert_converted(&lowered_result);
    let annotations = &lowered.declarations[0].annotations;

    let dimension = &annotations.variant_dimensions[0];
    assert_eq!(dimension.prop_name, "size");
    assert_eq!(
        dimension.cases.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["small", "large"]
    );
    let small = &dimension.cases["small"];
    assert_style_json(
        lowered,
        small,
        json!({
            "paddingTop": "4px",
            "paddingRight": "8px",
            "paddingBottom": "4px",
            "paddingLeft": "8px"
        }),
    );
    assert_value(lowered, "button", "paddingTop", StyleValue::string("8px"));
    assert_style_json(lowered, "buttonDisabled", json!({"opacity": 0.5}));
    assert_style_json(
        lowered,
        "button",
        json!({
            "color": "white",
            "backgroundColor": {"default": "#0055ff", ":hover": "#0044cc"},
            "borderWidth": "1px",
            "borderStyle": "solid",
            "borderColor": "transparent",
            "opacity": 1.0,
            "paddingTop": "8px",
            "paddingRight": "16px",
            "paddingBottom": "8px",
            "paddingLeft": "16px"
        }),
    );
}

#[test]
fn test_theme_read_resolves_through_adapter() {
    let file = single(
        DeclBuilder::intrinsic("Text", "p")
            .slot("({ theme }) => theme.colors.primary")
            .css(&["color: ${0}"]),
    );
    let result = fixture_engine().convert_file(&file);
    let lowered = assert_converted(&result);
    let value = lowered.value("text", "color");
    assert_eq!(expr_source(value), Some("vars.primary"));
    assert_eq!(value.unwrap().imports().len(), 1);
}

#[test]
fn test_theme_miss_bails() {
    let file = single(
        DeclBuilder::intrinsic("Text", "p")
            .slot("p => p.theme.colors.unknown")
            .css(&["color: ${0}"]),
    );
    let result = fixture_engine().convert_file(&file);
    assert!(result.is_bailed());
    assert!(result.lowered().is_none());
}

#[test]
fn test_imported_call_and_value() {
    let file = FileBuilder::new("Chip.tsx")
        .import("color", "./theme")
        .import("spacing", "./tokens")
        .decl(
            DeclBuilder::intrinsic("Chip", "span")
                .slot("color(\"accent\")")
                .slot("spacing.md")
                .css(&["color: ${0}", "gap: ${1}"]),
        )
        .build();
    let result = fixture_engine().convert_file(&file);
    let lowered = assert_converted(&result);
    assert_eq!(expr_source(lowered.value("chip", "color")), Some("vars.accent"));
    assert_eq!(expr_source(lowered.value("chip", "gap")), Some("space.md"));
}

#[test]
fn test_mutated_import_bails() {
    let file = FileBuilder::new("Chip.tsx")
        .import("spacing", "./tokens")
        .mutated("spacing")
        .decl(
            DeclBuilder::intrinsic("Chip", "span")
                .slot("spacing.md")
                .css(&["gap: ${0}"]),
        )
        .build();
    let result = fixture_engine().convert_file(&file);
    assert_bailed(&result, ReasonCode::MutatedImport);
}

#[test]
fn test_prop_forward_emits_style_function() {
    let file = single(
        DeclBuilder::intrinsic("Bar", "div")
            .slot("p => p.$width")
            .css(&["height: 4px", "width: ${0}"]),
    );
    let result = RuleLoweringEngine::default().convert_file(&file);
    let lowered = assert_converted(&result);

    let function = &lowered.style_functions["barWidth"];
    assert_eq!(function.params, vec!["width"]);
    assert_eq!(expr_source(function.body.get("width")), Some("width"));

    let annotations = &lowered.declarations[0].annotations;
    assert_eq!(annotations.style_functions[0].style_key, "barWidth");
    assert_eq!(annotations.style_functions[0].call_args, vec!["props.$width"]);
    assert!(annotations.forward_exclusions.contains("$width"));
    assert!(lowered.value("bar", "width").is_none());
}

#[test]
fn test_logical_block_in_composition_position() {
    let file = single(
        DeclBuilder::intrinsic("Row", "li")
            .slot("p => p.$active && \"color: red; font-weight: 700;\"")
            .css(&["color: black", "${0}"]),
    );
    let result = RuleLoweringEngine::default().convert_file(&file);
    let lowered = assert_converted(&result);
    assert_style_json(lowered, "rowActive", json!({"color": "red", "fontWeight": 700.0}));
    assert_style_json(lowered, "row", json!({"color": "black"}));
}

#[test]
fn test_omitted_branch_restores_base() {
    let file = single(
        DeclBuilder::intrinsic("Box", "div")
            .slot("p => p.$plain ? null : \"red\"")
            .css(&["border-color: blue", "border-color: ${0}"]),
    );
    let result = RuleLoweringEngine::default().convert_file(&file);
    let lowered = assert_converted(&result);
    // base branch overwrote the static value; the omitted branch brings it back
    assert_value(lowered, "box", "borderColor", StyleValue::string("red"));
    assert_style_json(lowered, "boxPlain", json!({"borderColor": "blue"}));
}

#[test]
fn test_heterogeneous_branches_bail() {
    let file = single(
        DeclBuilder::intrinsic("Hero", "header")
            .slot("p => p.$fancy ? \"linear-gradient(red, blue)\" : \"red\"")
            .css(&["background: ${0}"]),
    );
    let result = RuleLoweringEngine::default().convert_file(&file);
    assert_bailed(&result, ReasonCode::HeterogeneousVariantValues);
}

#[test]
fn test_unrecognized_expression_keeps_original() {
    let file = single(
        DeclBuilder::intrinsic("Box", "div")
            .slot("p => compute(p.size) * 2")
            .css(&["width: ${0}"]),
    );
    let result = RuleLoweringEngine::default().convert_file(&file);
    assert!(result.is_bailed());
    assert!(result.diagnostics()[0].is_bail());
}

#[test]
fn test_inline_fallback_is_config_gated_warning() {
    let file = single(
        DeclBuilder::intrinsic("Box", "div")
            .slot("p => p.$size * 2")
            .css(&["width: ${0}"]),
    );

    let strict = RuleLoweringEngine::default().convert_file(&file);
    assert!(strict.is_bailed());

    let config = LoweringConfig::default().allow_inline_style_fallback(true);
    let engine = RuleLoweringEngine::new(config, std::sync::Arc::new(fixture_resolver()));
    let result = engine.convert_file(&file);
    let lowered = assert_converted(&result);
    assert_eq!(lowered.diagnostics.len(), 1);
    assert_eq!(lowered.diagnostics[0].reason_code, ReasonCode::InlineStyleFallback);
    assert!(!lowered.diagnostics[0].is_bail());
    assert!(lowered.style_functions.contains_key("boxWidth"));
}

#[test]
fn test_multiple_dynamic_slots_bail() {
    let file = single(
        DeclBuilder::intrinsic("Box", "div")
            .slot("p => p.$x")
            .slot("p => p.$y")
            .css(&["margin: ${0} ${1}"]),
    );
    let result = RuleLoweringEngine::default().convert_file(&file);
    assert_bailed(&result, ReasonCode::MultipleDynamicSlots);
}

#[test]
fn test_static_after_ternary_wins_in_every_branch() {
    let file = single(
        DeclBuilder::intrinsic("Box", "div")
            .slot("p => p.$x ? \"red\" : \"blue\"")
            .css(&["color: ${0}", "color: green"]),
    );
    let result = RuleLoweringEngine::default().convert_file(&file);
    let lowered = assert_converted(&result);

    assert_style_json(lowered, "box", json!({"color": "green"}));
    let keys = &lowered.declarations[0].annotations.variant_style_keys;
    assert_style_json(lowered, &keys["$x"], json!({"color": "green"}));
}

#[test]
fn test_static_after_logical_block_wins() {
    let file = single(
        DeclBuilder::intrinsic("Row", "li")
            .slot("p => p.$x && \"color: red;\"")
            .css(&["${0}", "color: blue"]),
    );
    let result = RuleLoweringEngine::default().convert_file(&file);
    let lowered = assert_converted(&result);

    assert_style_json(lowered, "row", json!({"color": "blue"}));
    assert_style_json(lowered, "rowX", json!({"color": "blue"}));
}

#[test]
fn test_later_ternary_on_other_prop_wins() {
    let file = single(
        DeclBuilder::intrinsic("Box", "div")
            .slot("p => p.$a ? 0.5 : 1")
            .slot("p => p.$b ? 0.2 : 1")
            .css(&["opacity: ${0}", "opacity: ${1}"]),
    );
    let result = RuleLoweringEngine::default().convert_file(&file);
    let lowered = assert_converted(&result);

    assert_style_json(lowered, "box", json!({"opacity": 1.0}));
    // `$a` alone no longer changes anything; `$b` is applied after it
    assert_style_json(lowered, "boxA", json!({"opacity": 1.0}));
    assert_style_json(lowered, "boxB", json!({"opacity": 0.2}));
    assert_eq!(
        style_keys(lowered),
        vec!["box", "boxA", "boxB"]
    );
}

#[test]
fn test_earlier_variant_rewritten_after_later_one_bails() {
    let file = single(
        DeclBuilder::intrinsic("Box", "div")
            .slot("p => p.$a ? 0.5 : 1")
            .slot("p => p.$b ? 0.2 : 1")
            .slot("p => p.$a ? 0.7 : 1")
            .css(&["opacity: ${0}", "opacity: ${1}", "opacity: ${2}"]),
    );
    let result = RuleLoweringEngine::default().convert_file(&file);
    assert_bailed(&result, ReasonCode::KeepOriginal);
}

#[test]
fn test_multi_word_branch_splits_per_side() {
    let file = single(
        DeclBuilder::intrinsic("Box", "div")
            .slot("p => p.$c ? \"0 auto\" : \"4px\"")
            .css(&["margin: ${0}"]),
    );
    let result = RuleLoweringEngine::default().convert_file(&file);
    let lowered = assert_converted(&result);

    assert_style_json(
        lowered,
        "box",
        json!({
            "marginTop": "4px",
            "marginRight": "4px",
            "marginBottom": "4px",
            "marginLeft": "4px"
        }),
    );
    assert_style_json(
        lowered,
        "boxC",
        json!({
            "marginTop": 0.0,
            "marginRight": "auto",
            "marginBottom": 0.0,
            "marginLeft": "auto"
        }),
    );
}

#[test]
fn test_background_theme_branch_lands_on_background_color() {
    let file = single(
        DeclBuilder::intrinsic("Panel", "section")
            .slot("p => p.$x ? p.theme.colors.primary : \"white\"")
            .css(&["background: ${0}"]),
    );
    let result = fixture_engine().convert_file(&file);
    let lowered = assert_converted(&result);

    assert_value(lowered, "panel", "backgroundColor", StyleValue::string("white"));
    assert_eq!(
        expr_source(lowered.value("panelX", "backgroundColor")),
        Some("vars.primary")
    );
    assert!(lowered.value("panelX", "background").is_none());
}
