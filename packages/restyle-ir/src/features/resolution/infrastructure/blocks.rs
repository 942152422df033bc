//! Static style blocks and branch values shared by the recognizers

use crate::features::expression_builder::JsExpr;
use crate::features::normalization::parse_declaration_text;
use crate::features::resolution::ports::{RecognizeContext, ResolveRequest};
use crate::features::resolution::domain::ResolutionOutcome;
use crate::shared::models::{PropertyValues, ReasonCode, StyleValue};
use crate::shared::utils::css_value::split_top_level;
use crate::shared::utils::property_map::{lower_static_declaration, static_scalar};

use super::props::PropsScope;

/// Why a branch could not be turned into a value or block
#[derive(Debug)]
pub enum BranchError {
    /// Not a shape this recognizer handles; let the next one try
    Unrecognized,
    /// Recognized, but conversion must stop
    Abort(ResolutionOutcome),
}

impl From<ResolutionOutcome> for BranchError {
    fn from(outcome: ResolutionOutcome) -> Self {
        BranchError::Abort(outcome)
    }
}

pub type BranchResult<T> = Result<T, BranchError>;

/// Lower `color: red; padding: 4px 8px` into output properties
pub fn lower_block_text(text: &str) -> BranchResult<PropertyValues> {
    let mut out = PropertyValues::new();
    for piece in split_top_level(text, |c| c == ';') {
        if piece.trim().is_empty() {
            continue;
        }
        let declarations = parse_declaration_text(&piece).ok_or(BranchError::Unrecognized)?;
        for declaration in declarations {
            if declaration.is_composition() || !declaration.value.is_static() {
                return Err(BranchError::Unrecognized);
            }
            let lowered = lower_static_declaration(
                &declaration.property,
                &declaration.value.to_template_text(),
            )
            .map_err(|err| {
                BranchError::Abort(ResolutionOutcome::keep_original(
                    ReasonCode::UnsupportedDynamicShorthand,
                    err.to_string(),
                ))
            })?;
            out.extend(lowered);
        }
    }
    Ok(out)
}

/// Whether `tag` is the `css` helper of a styled module
pub fn is_css_tag(tag: &JsExpr, ctx: &RecognizeContext<'_>) -> bool {
    let JsExpr::Ident(local) = tag else {
        return false;
    };
    ctx.file
        .import_for(local)
        .map(|import| import.imported == "css" && ctx.config.is_styled_module(&import.source))
        .unwrap_or(false)
}

/// A branch in composition position: a declaration-block string, a static
/// template or a static `css` tagged template; omitted values give an empty block
pub fn branch_block(expr: &JsExpr, ctx: &RecognizeContext<'_>) -> BranchResult<PropertyValues> {
    if expr.is_omitted_value() {
        return Ok(PropertyValues::new());
    }
    match expr {
        JsExpr::String(text) => lower_block_text(text),
        JsExpr::Template { quasis, exprs } if exprs.is_empty() => lower_block_text(&quasis.concat()),
        JsExpr::TaggedTemplate { tag, quasis, exprs } if exprs.is_empty() && is_css_tag(tag, ctx) => {
            lower_block_text(&quasis.concat())
        }
        _ => Err(BranchError::Unrecognized),
    }
}

/// A branch in value position; `Ok(None)` when it interpolates to nothing
pub fn branch_value(
    expr: &JsExpr,
    scope: &PropsScope,
    ctx: &mut RecognizeContext<'_>,
) -> BranchResult<Option<StyleValue>> {
    if expr.is_omitted_value() {
        return Ok(None);
    }
    match expr {
        JsExpr::String(text) => return Ok(Some(StyleValue::string(text.as_str()))),
        JsExpr::Number(text) => return Ok(Some(static_scalar(text))),
        JsExpr::Template { quasis, exprs } if exprs.is_empty() => {
            return Ok(Some(StyleValue::string(quasis.concat())))
        }
        _ => {}
    }

    if let Some(path) = scope.props_path(expr) {
        return match theme_request(&path, ctx) {
            Some(request) => Ok(Some(StyleValue::Expr(ctx.lookup(&request)?))),
            None => Err(BranchError::Unrecognized),
        };
    }

    if let Some(request) = imported_value_request(expr, scope, ctx)? {
        return Ok(Some(StyleValue::Expr(ctx.lookup(&request)?)));
    }

    Err(BranchError::Unrecognized)
}

/// `[theme, colors, primary]` → theme path `colors.primary`
pub fn theme_request(path: &[String], ctx: &RecognizeContext<'_>) -> Option<ResolveRequest> {
    match path {
        [root, rest @ ..] if *root == ctx.config.theme_binding && !rest.is_empty() => {
            Some(ResolveRequest::ThemePath {
                path: rest.join("."),
            })
        }
        _ => None,
    }
}

/// Member path rooted at an imported binding not shadowed by a parameter
///
/// `Ok(None)` when `expr` is not such a path; a mutated root aborts.
pub fn imported_value_request(
    expr: &JsExpr,
    scope: &PropsScope,
    ctx: &RecognizeContext<'_>,
) -> BranchResult<Option<ResolveRequest>> {
    let Some((root, path)) = expr.member_path() else {
        return Ok(None);
    };
    if scope.is_bound(root) {
        return Ok(None);
    }
    let Some(import) = ctx.file.import_for(root) else {
        return Ok(None);
    };
    if ctx.file.is_mutated(root) {
        return Err(BranchError::Abort(ResolutionOutcome::keep_original(
            ReasonCode::MutatedImport,
            format!("`{}` is imported from `{}` and mutated in this file", root, import.source),
        )));
    }

    let mut path: Vec<String> = path.into_iter().map(str::to_string).collect();
    let imported_name = if import.is_namespace() {
        if path.is_empty() {
            return Ok(None);
        }
        path.remove(0)
    } else {
        import.imported.clone()
    };

    Ok(Some(ResolveRequest::ImportedValue {
        local_name: root.to_string(),
        imported_name,
        source_module: import.source.clone(),
        path,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_block_text() {
        let out = lower_block_text("color: red; border: 1px solid blue;").unwrap();
        assert_eq!(
            out,
            vec![
                ("color".to_string(), StyleValue::string("red")),
                ("borderWidth".to_string(), StyleValue::string("1px")),
                ("borderStyle".to_string(), StyleValue::string("solid")),
                ("borderColor".to_string(), StyleValue::string("blue")),
            ]
        );
    }

    #[test]
    fn test_lower_block_text_rejects_garbage() {
        assert!(matches!(
            lower_block_text("not a declaration"),
            Err(BranchError::Unrecognized)
        ));
    }
}
