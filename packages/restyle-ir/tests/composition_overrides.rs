// Integration tests for cross-declaration features: helper composition,
// styled(Local) bases and descendant/ancestor overrides

mod common;
use common::*;

use pretty_assertions::assert_eq;
use restyle_ir::shared::models::{ReasonCode, StyleValue};
use restyle_ir::RuleLoweringEngine;
use serde_json::json;

#[test]
fn test_hover_override_on_descendant_component() {
    let result = RuleLoweringEngine::default().convert_file(&fixture_card_file());
    let lowered = assert_converted(&result);

    let relation = &lowered.descendant_overrides[0];
    assert_eq!(relation.parent_style_key, "card");
    assert_eq!(relation.child_style_key, "icon");
    assert_eq!(relation.override_style_key, "iconInCard");
    assert_style_json(
        lowered,
        "iconInCard",
        json!({"color": {"default": "gray", "stylex.when.ancestor(':hover')": "blue"}}),
    );

    let card = lowered.declaration("Card").unwrap();
    assert!(card.annotations.is_ancestor_marker);
    let icon = lowered.declaration("Icon").unwrap();
    assert!(!icon.annotations.is_ancestor_marker);
    // the icon's own style is untouched
    assert_style_json(lowered, "icon", json!({"color": "gray", "width": "16px"}));
}

#[test]
fn test_component_ancestor_rule_on_child() {
    let file = FileBuilder::new("List.tsx")
        .decl(DeclBuilder::intrinsic("Row", "li").css(&["padding: 4px"]))
        .decl(
            DeclBuilder::intrinsic("Label", "span")
                .slot("Row")
                .css(&["color: black"])
                .rule("${0}:hover &", &["text-decoration: underline"]),
        )
        .build();
    let result = RuleLoweringEngine::default().convert_file(&file);
    let lowered = assert_converted(&result);

    assert_eq!(lowered.descendant_overrides[0].override_style_key, "labelInRow");
    assert_style_json(
        lowered,
        "labelInRow",
        json!({"textDecoration": {"default": null, "stylex.when.ancestor(':hover')": "underline"}}),
    );
    assert!(lowered.declaration("Row").unwrap().annotations.is_ancestor_marker);
}

#[test]
fn test_unknown_descendant_reference_bails() {
    let result = RuleLoweringEngine::default().convert_file(&single(
        DeclBuilder::intrinsic("Card", "div")
            .slot("Badge")
            .rule("& ${0}", &["color: red"]),
    ));
    assert_bailed(&result, ReasonCode::UnknownDescendantReference);
}

#[test]
fn test_helper_composition_seeds_defaults() {
    let file = FileBuilder::new("Label.tsx")
        .decl(DeclBuilder::helper("truncate").css(&[
            "overflow: hidden",
            "white-space: nowrap",
        ]))
        .decl(
            DeclBuilder::intrinsic("Label", "span")
                .slot("truncate")
                .css(&["${0}", "color: red"])
                .rule("&:hover", &["overflow: visible"]),
        )
        .build();
    let result = RuleLoweringEngine::default().convert_file(&file);
    let lowered = assert_converted(&result);

    assert_style_json(lowered, "truncate", json!({"overflow": "hidden", "whiteSpace": "nowrap"}));
    assert_style_json(
        lowered,
        "label",
        json!({"color": "red", "overflow": {"default": "hidden", ":hover": "visible"}}),
    );
    let label = lowered.declaration("Label").unwrap();
    assert_eq!(label.annotations.extra_style_keys, vec!["truncate"]);
}

#[test]
fn test_helper_used_before_declaration_bails() {
    let file = FileBuilder::new("Label.tsx")
        .decl(
            DeclBuilder::intrinsic("Label", "span")
                .slot("truncate")
                .css(&["${0}"]),
        )
        .decl(DeclBuilder::helper("truncate").css(&["overflow: hidden"]))
        .build();
    let result = RuleLoweringEngine::default().convert_file(&file);
    assert_bailed(&result, ReasonCode::KeepOriginal);
}

#[test]
fn test_helper_reading_props_bails() {
    let file = FileBuilder::new("Mixins.tsx")
        .decl(
            DeclBuilder::helper("muted")
                .slot("p => p.$muted ? 0.5 : 1")
                .css(&["opacity: ${0}"]),
        )
        .build();
    let result = RuleLoweringEngine::default().convert_file(&file);
    assert_bailed(&result, ReasonCode::KeepOriginal);
}

#[test]
fn test_styled_local_component_composes() {
    let file = FileBuilder::new("Buttons.tsx")
        .decl(DeclBuilder::intrinsic("Button", "button").css(&["color: black"]))
        .decl(
            DeclBuilder::component("DangerButton", "Button")
                .css(&["background: red"])
                .rule("&:hover", &["color: white"]),
        )
        .build();
    let result = RuleLoweringEngine::default().convert_file(&file);
    let lowered = assert_converted(&result);

    let danger = lowered.declaration("DangerButton").unwrap();
    assert_eq!(danger.annotations.extra_style_keys, vec!["button"]);
    assert_eq!(danger.annotations.style_key.as_deref(), Some("dangerButton"));
    let color = lowered
        .value("dangerButton", "color")
        .and_then(StyleValue::as_conditions)
        .unwrap();
    assert_eq!(color.default_entry(), Some(&StyleValue::string("black")));
}

#[test]
fn test_helper_after_own_declaration_wins() {
    let file = FileBuilder::new("Note.tsx")
        .decl(DeclBuilder::helper("muted").css(&["color: gray", "opacity: 0.8"]))
        .decl(
            DeclBuilder::intrinsic("Note", "p")
                .slot("muted")
                .css(&["color: red", "${0}", "font-size: 12px"])
                .rule("&:hover", &["color: black"]),
        )
        .build();
    let result = RuleLoweringEngine::default().convert_file(&file);
    let lowered = assert_converted(&result);

    assert_style_json(
        lowered,
        "note",
        json!({
            "color": {"default": "gray", ":hover": "black"},
            "fontSize": "12px"
        }),
    );
    let note = lowered.declaration("Note").unwrap();
    assert_eq!(note.annotations.extra_style_keys, vec!["muted"]);
}

#[test]
fn test_helper_after_own_declaration_overrides_variant() {
    let file = FileBuilder::new("Note.tsx")
        .decl(DeclBuilder::helper("muted").css(&["color: gray"]))
        .decl(
            DeclBuilder::intrinsic("Note", "p")
                .slot("p => p.$alert ? \"red\" : \"black\"")
                .slot("muted")
                .css(&["color: ${0}", "${1}"]),
        )
        .build();
    let result = RuleLoweringEngine::default().convert_file(&file);
    let lowered = assert_converted(&result);

    assert_style_json(lowered, "note", json!({"color": "gray"}));
    assert_style_json(lowered, "noteAlert", json!({"color": "gray"}));
}

#[test]
fn test_conditional_helper_after_own_declaration_bails() {
    let file = FileBuilder::new("Note.tsx")
        .decl(
            DeclBuilder::helper("muted")
                .css(&["color: gray"])
                .rule("&:hover", &["color: silver"]),
        )
        .decl(
            DeclBuilder::intrinsic("Note", "p")
                .slot("muted")
                .css(&["color: red", "${0}"]),
        )
        .build();
    let result = RuleLoweringEngine::default().convert_file(&file);
    assert_bailed(&result, ReasonCode::KeepOriginal);
}
