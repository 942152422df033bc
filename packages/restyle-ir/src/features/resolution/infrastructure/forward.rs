//! Prop forwarding: `width: ${p => p.width}` becomes a dynamic style function
//! `(width) => ({ width })` called with `props.width`

use crate::features::expression_builder::JsExpr;
use crate::features::resolution::domain::{ResolutionOutcome, SlotRequest, StyleFunctionSpec};
use crate::features::resolution::ports::{RecognizeContext, Recognizer};
use crate::shared::models::{PropertyValues, ReasonCode, StyleValue};
use crate::shared::utils::naming::{to_camel_case, to_pascal_case};
use crate::shared::utils::property_map::{lower_dynamic_value, template_literal, ValueToken};

use super::props::{PropsScope, PROPS_IDENT};

/// Parameter name of the style function for `property`
pub fn function_param(property: &str) -> String {
    let name = to_camel_case(property);
    if name.is_empty() {
        "value".to_string()
    } else {
        name
    }
}

/// Body of a style function taking `param` for `property`
pub fn function_body(property: &str, param_value: StyleValue) -> Result<PropertyValues, ResolutionOutcome> {
    lower_dynamic_value(property, param_value).map_err(|err| {
        ResolutionOutcome::keep_original(ReasonCode::UnsupportedDynamicShorthand, err.to_string())
    })
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PropForwardRecognizer;

/// What the arrow body forwards
struct Forwarded<'e> {
    prop: String,
    read: &'e JsExpr,
    /// Static text around the read, when the body is a template
    quasis: Option<&'e [String]>,
}

impl PropForwardRecognizer {
    /// `p.width`, or a template with a single read such as `` `${p.size}px` ``
    fn forwarded<'e>(scope: &PropsScope, body: &'e JsExpr) -> Option<Forwarded<'e>> {
        if let Some(prop) = scope.prop_read(body) {
            return Some(Forwarded {
                prop,
                read: body,
                quasis: None,
            });
        }
        let JsExpr::Template { quasis, exprs } = body else {
            return None;
        };
        let [read] = exprs.as_slice() else {
            return None;
        };
        scope.prop_read(read).map(|prop| Forwarded {
            prop,
            read,
            quasis: Some(quasis.as_slice()),
        })
    }
}

impl Recognizer for PropForwardRecognizer {
    fn name(&self) -> &'static str {
        "prop-forward"
    }

    fn recognize(
        &self,
        request: &SlotRequest<'_>,
        _ctx: &mut RecognizeContext<'_>,
    ) -> Option<ResolutionOutcome> {
        if request.is_composition() {
            return None;
        }
        let (scope, body) = PropsScope::from_arrow(request.expr)?;
        let forwarded = Self::forwarded(&scope, body)?;

        let param = function_param(request.property);
        let param_value = match forwarded.quasis {
            None => StyleValue::expr(param.clone()),
            Some(quasis) => {
                let mut parts = Vec::new();
                for (i, quasi) in quasis.iter().enumerate() {
                    if !quasi.is_empty() {
                        parts.push(ValueToken::Static(quasi.clone()));
                    }
                    if i == 0 {
                        parts.push(ValueToken::Value(StyleValue::expr(param.clone())));
                    }
                }
                template_literal(&parts)
            }
        };

        let body = match function_body(request.property, param_value) {
            Ok(body) => body,
            Err(outcome) => return Some(outcome),
        };

        let call_arg = match scope.default_for(forwarded.read) {
            Some(default) => format!("{}.{} ?? {}", PROPS_IDENT, forwarded.prop, default),
            None => format!("{}.{}", PROPS_IDENT, forwarded.prop),
        };

        Some(ResolutionOutcome::EmitStyleFunction(StyleFunctionSpec {
            name_hint: to_pascal_case(request.property),
            params: vec![param],
            body,
            call_arg,
            reads: vec![forwarded.prop],
        }))
    }
}
