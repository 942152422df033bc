//! Test fixtures
//!
//! Realistic component files and a resolver table shared across tests.

use restyle_ir::features::resolution::{ResolvedExpr, StaticValueResolver};
use restyle_ir::shared::models::{ImportSpec, SourceFile};
use restyle_ir::RuleLoweringEngine;

use super::builders::{DeclBuilder, FileBuilder};

/// Theme paths and imported tokens known to the test resolver
pub fn fixture_resolver() -> StaticValueResolver {
    let tokens = ImportSpec::new("vars", "./tokens.stylex");
    StaticValueResolver::new()
        .with_theme(
            "colors.primary",
            ResolvedExpr::new("vars.primary").with_import(tokens.clone()),
        )
        .with_theme(
            "colors.muted",
            ResolvedExpr::new("vars.muted").with_import(tokens.clone()),
        )
        .with_call(
            "color",
            "./theme",
            "accent",
            ResolvedExpr::new("vars.accent").with_import(tokens.clone()),
        )
        .with_value(
            "spacing",
            "./tokens",
            "md",
            ResolvedExpr::new("space.md").with_import(ImportSpec::new("space", "./space.stylex")),
        )
}

pub fn fixture_engine() -> RuleLoweringEngine {
    RuleLoweringEngine::with_resolver(fixture_resolver())
}

/// Button with a hover state, a disabled variant and a size enumeration
pub fn fixture_button_file() -> SourceFile {
    FileBuilder::new("Button.tsx")
        .decl(
            DeclBuilder::intrinsic("Button", "button")
                .slot("p => p.$disabled ? 0.5 : 1")
                .slot("p => p.size === \"small\" ? \"4px 8px\" : p.size === \"large\" ? \"12px 24px\" : \"8px 16px\"")
                .css(&[
                    "color: white",
                    "background: #0055ff",
                    "border: 1px solid transparent",
                    "opacity: ${0}",
                    "padding: ${1}",
                ])
                .rule("&:hover", &["background: #0044cc"])
                .string_enum("size", &["small", "medium", "large"]),
        )
        .build()
}

/// Card whose hover recolors a nested icon
pub fn fixture_card_file() -> SourceFile {
    FileBuilder::new("Card.tsx")
        .decl(DeclBuilder::intrinsic("Icon", "svg").css(&["color: gray", "width: 16px"]))
        .decl(
            DeclBuilder::intrinsic("Card", "div")
                .slot("Icon")
                .css(&["padding: 16px"])
                .rule("&:hover ${0}", &["color: blue"]),
        )
        .build()
}

/// `n` independent static components, for batch and bench runs
pub fn fixture_n_components(n: usize) -> SourceFile {
    let mut builder = FileBuilder::new("Many.tsx");
    for i in 0..n {
        builder = builder.decl(
            DeclBuilder::intrinsic(&format!("Box{}", i), "div")
                .css(&["display: flex", "margin: 0 auto", "border: 1px solid #eee"])
                .rule("&:hover", &["border-color: #ccc"]),
        );
    }
    builder.build()
}
