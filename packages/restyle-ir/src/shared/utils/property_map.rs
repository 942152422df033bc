//! CSS property → StyleX output mapping
//!
//! One canonical table drives both static declarations and dynamic values:
//! property names are camelized (`-webkit-` → `Webkit`, `-ms-` → `ms`,
//! custom properties untouched), `background` splits into `backgroundImage` or
//! `backgroundColor` depending on gradient detection, `border*` / `outline`
//! decompose into width/style/color and multi-value `margin` / `padding`
//! decompose per side.

use thiserror::Error;

use super::css_value::{
    is_border_style, is_border_width, is_gradient_or_image, parse_number, quote_content,
    tokenize,
};
use crate::shared::models::{ExprValue, PropertyValues, StyleValue};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShorthandError {
    /// A runtime value cannot be assigned to one longhand
    #[error("cannot decompose runtime value of shorthand `{0}`")]
    Dynamic(String),

    #[error("cannot decompose `{property}: {value}`")]
    Ambiguous { property: String, value: String },
}

/// One whitespace-separated token of a declaration value
#[derive(Debug, Clone, PartialEq)]
pub enum ValueToken {
    Static(String),
    Value(StyleValue),
}

/// Output name of a CSS property
pub fn output_property_name(css_property: &str) -> String {
    let property = css_property.trim();
    if property.starts_with("--") {
        return property.to_string();
    }
    let (prefix, rest) = if let Some(rest) = property.strip_prefix("-ms-") {
        ("ms", rest)
    } else if let Some(rest) = property.strip_prefix('-') {
        ("", rest)
    } else {
        ("", property)
    };
    let vendor = property.starts_with('-') && prefix.is_empty();

    let mut out = String::from(prefix);
    let mut upper = vendor || !prefix.is_empty();
    for c in rest.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

/// Number when the text is a unitless numeric literal, string otherwise
pub fn static_scalar(text: &str) -> StyleValue {
    match parse_number(text) {
        Some(n) => StyleValue::Number(n),
        None => StyleValue::string(text.trim()),
    }
}

fn border_prefix(property: &str) -> Option<&'static str> {
    match property {
        "border" => Some("border"),
        "border-top" => Some("borderTop"),
        "border-right" => Some("borderRight"),
        "border-bottom" => Some("borderBottom"),
        "border-left" => Some("borderLeft"),
        "border-inline-start" => Some("borderInlineStart"),
        "border-inline-end" => Some("borderInlineEnd"),
        "outline" => Some("outline"),
        _ => None,
    }
}

fn box_prefix(property: &str) -> Option<&'static str> {
    match property {
        "margin" => Some("margin"),
        "padding" => Some("padding"),
        _ => None,
    }
}

/// Properties whose tokens are split into several output properties
pub fn is_decomposable_shorthand(property: &str) -> bool {
    let property = property.trim();
    border_prefix(property).is_some() || box_prefix(property).is_some()
}

/// Lower one fully static declaration
pub fn lower_static_declaration(property: &str, value: &str) -> Result<PropertyValues, ShorthandError> {
    let property = property.trim();
    let value = value.trim();
    if is_decomposable_shorthand(property) {
        let tokens = tokenize(value).into_iter().map(ValueToken::Static).collect();
        return lower_tokens(property, tokens);
    }
    match property {
        "background" => {
            let target = if is_gradient_or_image(value) {
                "backgroundImage"
            } else if tokenize(value).len() == 1 {
                "backgroundColor"
            } else {
                "background"
            };
            Ok(vec![(target.to_string(), StyleValue::string(value))])
        }
        "content" => Ok(vec![(
            "content".to_string(),
            StyleValue::string(quote_content(value)),
        )]),
        _ => Ok(vec![(output_property_name(property), static_scalar(value))]),
    }
}

/// Lower a value that fills the whole declaration (a resolved expression, a
/// variant branch literal, a style-function parameter)
pub fn lower_dynamic_value(property: &str, value: StyleValue) -> Result<PropertyValues, ShorthandError> {
    let property = property.trim();
    match value {
        StyleValue::String(text) => lower_static_declaration(property, &text),
        StyleValue::Number(n) => {
            if is_decomposable_shorthand(property) {
                lower_tokens(property, vec![ValueToken::Value(StyleValue::Number(n))])
            } else {
                Ok(vec![(output_property_name(property), StyleValue::Number(n))])
            }
        }
        other => {
            if border_prefix(property).is_some() {
                return Err(ShorthandError::Dynamic(property.to_string()));
            }
            if property == "background" {
                let target = match &other {
                    StyleValue::Expr(expr) if is_gradient_or_image(&expr.source) => "backgroundImage",
                    _ => "backgroundColor",
                };
                return Ok(vec![(target.to_string(), other)]);
            }
            Ok(vec![(output_property_name(property), other)])
        }
    }
}

/// Lower a value given as mixed static/runtime tokens
pub fn lower_tokens(property: &str, tokens: Vec<ValueToken>) -> Result<PropertyValues, ShorthandError> {
    let property = property.trim();
    if let Some(prefix) = border_prefix(property) {
        return lower_border(property, prefix, tokens);
    }
    if let Some(prefix) = box_prefix(property) {
        return lower_box(property, prefix, tokens);
    }
    if tokens.iter().all(|t| matches!(t, ValueToken::Static(_))) {
        let text = tokens
            .iter()
            .map(|t| match t {
                ValueToken::Static(s) => s.as_str(),
                ValueToken::Value(_) => "",
            })
            .collect::<Vec<_>>()
            .join(" ");
        return lower_static_declaration(property, &text);
    }
    match <[ValueToken; 1]>::try_from(tokens) {
        Ok([ValueToken::Value(value)]) => lower_dynamic_value(property, value),
        _ => Err(ShorthandError::Dynamic(property.to_string())),
    }
}

fn token_text(tokens: &[ValueToken]) -> String {
    tokens
        .iter()
        .map(|t| match t {
            ValueToken::Static(s) => s.clone(),
            ValueToken::Value(v) => v.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn lower_border(property: &str, prefix: &str, tokens: Vec<ValueToken>) -> Result<PropertyValues, ShorthandError> {
    let ambiguous = |tokens: &[ValueToken]| ShorthandError::Ambiguous {
        property: property.to_string(),
        value: token_text(tokens),
    };
    let mut width: Option<StyleValue> = None;
    let mut style: Option<StyleValue> = None;
    let mut color: Option<StyleValue> = None;

    for token in &tokens {
        let slot = match token {
            ValueToken::Static(text) if is_border_style(text) => (&mut style, StyleValue::string(text.as_str())),
            ValueToken::Static(text) if is_border_width(text) => (&mut width, static_scalar(text)),
            ValueToken::Static(text) => (&mut color, StyleValue::string(text.as_str())),
            // A runtime token is taken as the color unless a static color is present
            ValueToken::Value(StyleValue::Number(n)) => (&mut width, StyleValue::Number(*n)),
            ValueToken::Value(value) => (&mut color, value.clone()),
        };
        if slot.0.is_some() {
            return Err(ambiguous(&tokens));
        }
        *slot.0 = Some(slot.1);
    }
    if width.is_none() && style.is_none() && color.is_none() {
        return Err(ambiguous(&tokens));
    }

    let mut out = Vec::new();
    if let Some(width) = width {
        out.push((format!("{}Width", prefix), width));
    }
    if let Some(style) = style {
        out.push((format!("{}Style", prefix), style));
    }
    if let Some(color) = color {
        out.push((format!("{}Color", prefix), color));
    }
    Ok(out)
}

fn lower_box(property: &str, prefix: &str, tokens: Vec<ValueToken>) -> Result<PropertyValues, ShorthandError> {
    let values: Vec<StyleValue> = tokens
        .iter()
        .map(|t| match t {
            ValueToken::Static(text) => static_scalar(text),
            ValueToken::Value(v) => v.clone(),
        })
        .collect();
    let sides = ["Top", "Right", "Bottom", "Left"];
    let ordered: [usize; 4] = match values.len() {
        1 => return Ok(vec![(prefix.to_string(), values[0].clone())]),
        2 => [0, 1, 0, 1],
        3 => [0, 1, 2, 1],
        4 => [0, 1, 2, 3],
        _ => {
            return Err(ShorthandError::Ambiguous {
                property: property.to_string(),
                value: token_text(&tokens),
            })
        }
    };
    Ok(sides
        .iter()
        .zip(ordered)
        .map(|(side, index)| (format!("{}{}", prefix, side), values[index].clone()))
        .collect())
}

/// Spell a single-value `margin`/`padding` out per side; other values pass
/// through unchanged
pub fn expand_box_sides(values: PropertyValues) -> PropertyValues {
    match values.as_slice() {
        [(property, value)] if box_prefix(property).is_some() => ["Top", "Right", "Bottom", "Left"]
            .iter()
            .map(|side| (format!("{}{}", property, side), value.clone()))
            .collect(),
        _ => values,
    }
}

/// Combine static text and runtime values into one template literal value
pub fn template_literal(parts: &[ValueToken]) -> StyleValue {
    let mut source = String::from("`");
    let mut imports = Vec::new();
    for part in parts {
        match part {
            ValueToken::Static(text) => source.push_str(&text.replace('`', "\\`")),
            ValueToken::Value(StyleValue::Expr(expr)) => {
                source.push_str(&format!("${{{}}}", expr.source));
                for import in &expr.imports {
                    if !imports.contains(import) {
                        imports.push(import.clone());
                    }
                }
            }
            ValueToken::Value(StyleValue::String(s)) => source.push_str(s),
            ValueToken::Value(other) => source.push_str(&format!("${{{}}}", other)),
        }
    }
    source.push('`');
    StyleValue::Expr(ExprValue::new(source).with_imports(imports))
}
