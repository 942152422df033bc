//! Per-file lowering run
//!
//! Phase 0 lowers `css` helpers into a read-only [`HelperIndex`], phase 1
//! lowers every styled declaration on its own (cross-component rules only
//! record requests), phase 2 resolves those requests once every base style
//! exists. Any bail aborts the run; nothing partial escapes.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::engine::RuleLoweringEngine;
use super::overrides::resolve_overrides;
use super::variants::{finalize, DeclarationOutput};
use crate::features::expression_builder::ExpressionBuilderUseCase;
use crate::features::lowering::domain::{
    write_value, Bail, LowerResult, LoweredFile, LoweringContext, OverrideRequest,
    PendingStyleFunction,
};
use crate::features::lowering::infrastructure::{at_rule_path, value_tokens};
use crate::features::resolution::{RecognizeContext, ResolutionOutcome, VariantCondition};
use crate::features::selector::SelectorShape;
use crate::shared::models::{
    ConditionKey, CssDeclaration, CssRule, CssValue, DeclarationBase, Diagnostic, Location,
    PropertyValues, ReasonCode, SlotIndex, SourceFile, StyleObject, StyleValue,
    StyledDeclaration, ValuePart,
};
use crate::shared::utils::{
    expand_box_sides, lower_static_declaration, lower_tokens, to_camel_case, ShorthandError,
    StyleKeyAllocator,
};

// ═══════════════════════════════════════════════════════════════════════════
// Composition index
// ═══════════════════════════════════════════════════════════════════════════

/// Style another declaration contributes when composed
#[derive(Debug, Clone, Default)]
pub struct ComposedStyle {
    /// Keys to apply, transitive compositions first
    pub style_keys: Vec<String>,
    /// Effective style: inherited values overlaid with own values
    pub style: StyleObject,
}

/// Lowered `css` helpers by local name; filled in phase 0, read-only after
#[derive(Debug, Default)]
pub struct HelperIndex {
    helpers: FxHashMap<String, ComposedStyle>,
}

impl HelperIndex {
    pub fn get(&self, name: &str) -> Option<&ComposedStyle> {
        self.helpers.get(name)
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    fn insert(&mut self, name: String, composed: ComposedStyle) {
        self.helpers.insert(name, composed);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Rule scope
// ═══════════════════════════════════════════════════════════════════════════

/// One rule being lowered, with its classified selector
struct RuleScope<'r> {
    decl: &'r StyledDeclaration,
    rule: &'r CssRule,
    shape: SelectorShape,
    at_path: Vec<ConditionKey>,
    location: &'r Location,
}

impl RuleScope<'_> {
    fn bail(&self, reason: ReasonCode, context: impl Into<String>) -> Bail {
        Bail::new(reason, self.location.clone(), context)
    }

    /// Same-element targets: pseudo-element block plus one condition path per
    /// listed pseudo. `None` for shapes that do not write the own object.
    fn own_paths(&self) -> Option<(Option<&str>, Vec<Vec<ConditionKey>>)> {
        let prefixed = |pseudo: Option<&String>| -> Vec<ConditionKey> {
            pseudo
                .map(|p| ConditionKey::Pseudo(p.clone()))
                .into_iter()
                .chain(self.at_path.iter().cloned())
                .collect()
        };
        match &self.shape {
            SelectorShape::SelfRule => Some((None, vec![self.at_path.clone()])),
            SelectorShape::Pseudo(names) => {
                Some((None, names.iter().map(|n| prefixed(Some(n))).collect()))
            }
            SelectorShape::PseudoElement { element, pseudo } => {
                Some((Some(element.as_str()), vec![prefixed(pseudo.as_ref())]))
            }
            _ => None,
        }
    }
}

/// A declaration value after slot resolution
enum LoweredValue {
    Plain(PropertyValues),
    /// `None` condition is the base case; `None` values mean "no declaration"
    Split(Vec<(Option<VariantCondition>, Option<PropertyValues>)>),
    Function {
        function: PendingStyleFunction,
        reads: Vec<String>,
    },
}

// ═══════════════════════════════════════════════════════════════════════════
// File lowering
// ═══════════════════════════════════════════════════════════════════════════

pub(crate) struct FileLowering<'a> {
    engine: &'a RuleLoweringEngine,
    file: &'a SourceFile,
    expressions: &'a mut dyn ExpressionBuilderUseCase,
    keys: StyleKeyAllocator,
    /// Base style key per declaration, in source order
    decl_keys: Vec<String>,
    positions: FxHashMap<String, usize>,
    helpers: HelperIndex,
    /// Components lowered so far, for composition and `styled(Local)`
    components: FxHashMap<String, ComposedStyle>,
    /// Own base objects, for descendant-override defaults
    bases: FxHashMap<String, StyleObject>,
    warnings: Vec<Diagnostic>,
}

impl<'a> FileLowering<'a> {
    pub fn new(
        engine: &'a RuleLoweringEngine,
        file: &'a SourceFile,
        expressions: &'a mut dyn ExpressionBuilderUseCase,
    ) -> Self {
        Self {
            engine,
            file,
            expressions,
            keys: StyleKeyAllocator::new(),
            decl_keys: Vec::new(),
            positions: FxHashMap::default(),
            helpers: HelperIndex::default(),
            components: FxHashMap::default(),
            bases: FxHashMap::default(),
            warnings: Vec::new(),
        }
    }

    /// Warnings gathered so far, including those of a run that bailed
    pub fn take_warnings(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.warnings)
    }

    pub fn run(&mut self) -> LowerResult<LoweredFile> {
        let file = self.file;
        for (index, decl) in file.declarations.iter().enumerate() {
            self.positions.entry(decl.local_name.clone()).or_insert(index);
            let key = self.keys.allocate(&to_camel_case(&decl.local_name));
            self.decl_keys.push(key);
        }

        let mut outputs: Vec<Option<DeclarationOutput>> =
            file.declarations.iter().map(|_| None).collect();

        // Phase 0: helpers
        for (index, decl) in file.declarations.iter().enumerate() {
            if !decl.is_helper() {
                continue;
            }
            let ctx = self.lower_declaration(index)?;
            if !ctx.variants.is_empty()
                || !ctx.style_functions.is_empty()
                || !ctx.attributes.is_empty()
                || ctx.sibling.is_some()
                || !ctx.override_requests.is_empty()
                || ctx.needs_wrapper
            {
                return Err(Bail::new(
                    ReasonCode::KeepOriginal,
                    self.location(decl),
                    format!(
                        "helper `{}` depends on props or needs a wrapper",
                        decl.local_name
                    ),
                ));
            }
            let composed = self.composed_style(index, &ctx);
            self.helpers.insert(decl.local_name.clone(), composed);
            outputs[index] = Some(self.finish(index, ctx));
        }

        // Phase 1: components
        let mut requests: Vec<OverrideRequest> = Vec::new();
        for (index, decl) in file.declarations.iter().enumerate() {
            if decl.is_helper() {
                continue;
            }
            let mut ctx = self.lower_declaration(index)?;
            requests.append(&mut ctx.override_requests);
            let composed = self.composed_style(index, &ctx);
            self.components.insert(decl.local_name.clone(), composed);
            self.bases.insert(decl.local_name.clone(), ctx.base.clone());
            outputs[index] = Some(self.finish(index, ctx));
        }

        // Phase 2: cross-component overrides
        let component_keys: FxHashMap<String, String> = file
            .declarations
            .iter()
            .zip(&self.decl_keys)
            .filter(|(decl, _)| !decl.is_helper())
            .map(|(decl, key)| (decl.local_name.clone(), key.clone()))
            .collect();
        let resolved = resolve_overrides(
            &Location::file(&file.path),
            &component_keys,
            &self.bases,
            requests,
            &mut self.keys,
        )?;

        let mut lowered = LoweredFile {
            path: file.path.clone(),
            ..LoweredFile::default()
        };
        for (decl, output) in file.declarations.iter().zip(outputs) {
            let Some(mut output) = output else {
                continue;
            };
            if resolved.ancestor_markers.contains(&decl.local_name) {
                output.annotations.is_ancestor_marker = true;
            }
            for (key, style) in output.styles {
                lowered.styles.insert(key, style);
            }
            for (key, function) in output.functions {
                lowered.style_functions.insert(key, function);
            }
            let mut decl = decl.clone();
            decl.annotations = output.annotations;
            lowered.declarations.push(decl);
        }
        for (key, style) in resolved.styles {
            lowered.styles.insert(key, style);
        }
        lowered.descendant_overrides = resolved.overrides;
        Ok(lowered)
    }

    fn location(&self, decl: &StyledDeclaration) -> Location {
        Location::file(&self.file.path).in_declaration(&decl.local_name, decl.span)
    }

    fn composed_style(&self, index: usize, ctx: &LoweringContext) -> ComposedStyle {
        let mut style_keys = ctx.extra_style_keys.clone();
        style_keys.push(self.decl_keys[index].clone());
        let mut style = ctx.inherited.clone();
        style.merge(&ctx.base);
        ComposedStyle { style_keys, style }
    }

    fn finish(&mut self, index: usize, ctx: LoweringContext) -> DeclarationOutput {
        let decl = &self.file.declarations[index];
        finalize(
            decl,
            &self.decl_keys[index],
            ctx,
            &mut self.keys,
            &self.engine.config,
        )
    }

    // ───────────────────────────────────────────────────────────────────────
    // Declarations and rules
    // ───────────────────────────────────────────────────────────────────────

    fn lower_declaration(&mut self, index: usize) -> LowerResult<LoweringContext> {
        let file = self.file;
        let decl = &file.declarations[index];
        let location = self.location(decl);
        let mut ctx = LoweringContext::new();

        if let DeclarationBase::Component(target) = &decl.base {
            if self.positions.contains_key(target) {
                self.compose_local(&mut ctx, index, target, &location)?;
            }
        }

        // Composition pre-scan: inherited defaults must be known before any
        // pseudo map picks its `default`
        for rule in &decl.rules {
            for declaration in &rule.declarations {
                let Some(name) = self.local_composition_target(decl, declaration) else {
                    continue;
                };
                if !rule.is_self() {
                    return Err(Bail::new(
                        ReasonCode::KeepOriginal,
                        location,
                        format!("composition of `{}` inside `{}`", name, rule.selector),
                    ));
                }
                self.compose_local(&mut ctx, index, name, &location)?;
            }
        }

        for rule in &decl.rules {
            self.lower_rule(&mut ctx, decl, rule, &location)?;
        }

        debug!(
            declaration = %decl.local_name,
            rules = decl.rules.len(),
            variants = ctx.variants.len(),
            functions = ctx.style_functions.len(),
            "declaration lowered"
        );
        Ok(ctx)
    }

    /// Local declaration named by a pure-composition slot (`${truncate}`)
    fn local_composition_target<'d>(
        &self,
        decl: &'d StyledDeclaration,
        declaration: &CssDeclaration,
    ) -> Option<&'d str> {
        if !declaration.is_composition() {
            return None;
        }
        let name = decl.slot(declaration.value.single_slot()?)?.as_identifier()?;
        self.positions.contains_key(name).then_some(name)
    }

    fn compose_local(
        &self,
        ctx: &mut LoweringContext,
        index: usize,
        name: &str,
        location: &Location,
    ) -> LowerResult<()> {
        let declared_before = self.positions.get(name).is_some_and(|&at| at < index);
        if !declared_before {
            return Err(Bail::new(
                ReasonCode::KeepOriginal,
                location.clone(),
                format!("`{}` is composed before it is declared", name),
            ));
        }
        let composed = self
            .helpers
            .get(name)
            .or_else(|| self.components.get(name))
            .ok_or_else(|| {
                Bail::new(
                    ReasonCode::KeepOriginal,
                    location.clone(),
                    format!("`{}` has no lowered style to compose", name),
                )
            })?;
        ctx.inherit(&composed.style_keys, &composed.style);
        Ok(())
    }

    fn lower_rule(
        &mut self,
        ctx: &mut LoweringContext,
        decl: &StyledDeclaration,
        rule: &CssRule,
        location: &Location,
    ) -> LowerResult<()> {
        let shape = self.engine.classifier.classify(&rule.selector, decl.intrinsic_tag());
        if let SelectorShape::Unsupported(reason) = &shape {
            return Err(Bail::new(
                ReasonCode::UnsupportedSelector,
                location.clone(),
                format!("`{}`: {}", rule.selector, reason),
            ));
        }
        let at_path = at_rule_path(&rule.at_rules)
            .map_err(|at_rule| Bail::new(ReasonCode::UnsupportedAtRule, location.clone(), at_rule))?;
        let scope = RuleScope {
            decl,
            rule,
            shape,
            at_path,
            location,
        };

        for declaration in &rule.declarations {
            if declaration.is_composition() {
                match self.local_composition_target(decl, declaration) {
                    Some(name) => self.fold_composed(ctx, &scope, name)?,
                    None => self.lower_composition(ctx, &scope, declaration)?,
                }
                continue;
            }
            let lowered = self.lower_value(&scope, declaration)?;
            self.place(ctx, &scope, lowered)?;
        }
        Ok(())
    }

    /// Composed keys apply before the own key, so own values set ahead of
    /// `${name}` are overwritten here with the composed ones
    fn fold_composed(
        &self,
        ctx: &mut LoweringContext,
        scope: &RuleScope<'_>,
        name: &str,
    ) -> LowerResult<()> {
        let Some(composed) = self.helpers.get(name).or_else(|| self.components.get(name)) else {
            return Ok(());
        };
        for (property, value) in composed.style.iter() {
            if !ctx.sets_property(property) {
                continue;
            }
            match value {
                StyleValue::Conditions(_) | StyleValue::Object(_) => {
                    return Err(scope.bail(
                        ReasonCode::KeepOriginal,
                        format!(
                            "conditional `{}` from `{}` overrides an earlier own value",
                            property, name
                        ),
                    ));
                }
                plain => ctx.write_base(None, &[], property, plain.clone()),
            }
        }
        Ok(())
    }

    /// `${expr}` on its own line, resolved as a style block
    fn lower_composition(
        &mut self,
        ctx: &mut LoweringContext,
        scope: &RuleScope<'_>,
        declaration: &CssDeclaration,
    ) -> LowerResult<()> {
        if scope.shape != SelectorShape::SelfRule || !scope.at_path.is_empty() {
            return Err(scope.bail(
                ReasonCode::KeepOriginal,
                format!("composed block inside `{}`", scope.rule.selector),
            ));
        }
        let Some(slot) = declaration.value.single_slot() else {
            return Err(scope.bail(ReasonCode::KeepOriginal, declaration.raw_value.clone()));
        };
        match self.resolve_slot(scope, "", slot)? {
            ResolutionOutcome::SplitVariants(mut cases) => {
                cases.sort_by_key(|case| case.when.is_some());
                for case in cases {
                    for (property, value) in case.style {
                        match &case.when {
                            None => ctx.write_base(None, &[], &property, value),
                            Some(condition) => {
                                write_variant(ctx, scope, condition, None, &[], &property, value)?
                            }
                        }
                    }
                }
                Ok(())
            }
            other => Err(scope.bail(
                ReasonCode::KeepOriginal,
                format!(
                    "composed `{}` is a {}, not a style block",
                    declaration.raw_value.trim(),
                    other.kind()
                ),
            )),
        }
    }

    // ───────────────────────────────────────────────────────────────────────
    // Values
    // ───────────────────────────────────────────────────────────────────────

    fn lower_value(
        &mut self,
        scope: &RuleScope<'_>,
        declaration: &CssDeclaration,
    ) -> LowerResult<LoweredValue> {
        let property = declaration.property.as_str();
        let parts = match &declaration.value {
            CssValue::Static(text) => {
                return lower_static_declaration(property, text)
                    .map(LoweredValue::Plain)
                    .map_err(|err| shorthand_bail(scope, err));
            }
            CssValue::Interpolated(parts) => parts,
        };

        let mut slots: Vec<SlotIndex> = Vec::new();
        for slot in declaration.value.slots() {
            if !slots.contains(&slot) {
                slots.push(slot);
            }
        }

        let mut values: FxHashMap<SlotIndex, StyleValue> = FxHashMap::default();
        let mut dynamic: Option<(SlotIndex, ResolutionOutcome)> = None;
        for &slot in &slots {
            match self.resolve_slot(scope, property, slot)? {
                ResolutionOutcome::ResolvedValue(expr) => {
                    values.insert(slot, StyleValue::Expr(expr));
                }
                outcome => {
                    if slots.len() > 1 {
                        return Err(scope.bail(
                            ReasonCode::MultipleDynamicSlots,
                            format!(
                                "`{}: {}` combines a {} with other slots",
                                property,
                                declaration.raw_value,
                                outcome.kind()
                            ),
                        ));
                    }
                    dynamic = Some((slot, outcome));
                }
            }
        }

        let Some((slot, outcome)) = dynamic else {
            return lower_parts(scope, property, parts, &values).map(LoweredValue::Plain);
        };

        match outcome {
            ResolutionOutcome::SplitVariantsResolvedValue(cases) => {
                let mut lowered = Vec::with_capacity(cases.len());
                for case in cases {
                    let case_values = match case.value {
                        None => None,
                        Some(value) => {
                            let mut with_case = values.clone();
                            with_case.insert(slot, value);
                            Some(lower_parts(scope, property, parts, &with_case)?)
                        }
                    };
                    lowered.push((case.when, case_values));
                }
                // `"4px"` lines up with a `"0 auto"` branch once spelled per side
                let multi = lowered
                    .iter()
                    .any(|(_, values)| values.as_ref().is_some_and(|values| values.len() > 1));
                if multi {
                    for (_, values) in &mut lowered {
                        *values = values.take().map(expand_box_sides);
                    }
                }
                check_homogeneous(scope, property, &lowered)?;
                Ok(LoweredValue::Split(lowered))
            }
            ResolutionOutcome::EmitStyleFunction(spec) => {
                let body = if declaration.value.single_slot() == Some(slot) {
                    spec.body
                } else {
                    // static text around the slot moves into the function body
                    let [param] = spec.params.as_slice() else {
                        return Err(scope.bail(
                            ReasonCode::KeepOriginal,
                            format!("`{}: {}` needs a multi-parameter function", property, declaration.raw_value),
                        ));
                    };
                    let mut with_param = values;
                    with_param.insert(slot, StyleValue::expr(param.clone()));
                    lower_parts(scope, property, parts, &with_param)?
                };
                Ok(LoweredValue::Function {
                    function: PendingStyleFunction {
                        name_hint: spec.name_hint,
                        params: spec.params,
                        body: StyleObject::from_pairs(body),
                        call_args: vec![spec.call_arg],
                    },
                    reads: spec.reads,
                })
            }
            other => Err(scope.bail(
                ReasonCode::KeepOriginal,
                format!("`{}: {}` resolved to a {}", property, declaration.raw_value, other.kind()),
            )),
        }
    }

    fn resolve_slot(
        &mut self,
        scope: &RuleScope<'_>,
        property: &str,
        slot: SlotIndex,
    ) -> LowerResult<ResolutionOutcome> {
        let engine = self.engine;
        let Some(slot_expr) = scope.decl.slot(slot) else {
            return Err(scope.bail(
                ReasonCode::KeepOriginal,
                format!("slot {} has no expression", slot),
            ));
        };
        let location = Location::file(&self.file.path).in_declaration(
            &scope.decl.local_name,
            slot_expr.span.or(scope.decl.span),
        );

        let mut recognize = RecognizeContext::new(
            self.file,
            &engine.config,
            engine.resolver.as_ref(),
            &mut *self.expressions,
        );
        let outcome = engine.recognizers.resolve_source(
            &slot_expr.source,
            property,
            &scope.rule.selector,
            &scope.rule.at_rules,
            &mut recognize,
        );
        let warnings = std::mem::take(&mut recognize.warnings);
        for (reason, context) in warnings {
            self.warnings
                .push(Diagnostic::new(reason, location.clone(), context));
        }

        match outcome {
            ResolutionOutcome::KeepOriginal { reason, detail } => {
                Err(Bail::new(reason, location, detail))
            }
            outcome => Ok(outcome),
        }
    }

    // ───────────────────────────────────────────────────────────────────────
    // Placement
    // ───────────────────────────────────────────────────────────────────────

    fn place(
        &mut self,
        ctx: &mut LoweringContext,
        scope: &RuleScope<'_>,
        lowered: LoweredValue,
    ) -> LowerResult<()> {
        match lowered {
            LoweredValue::Plain(values) => place_values(ctx, scope, values),
            LoweredValue::Split(cases) => place_split(ctx, scope, cases),
            LoweredValue::Function { function, reads } => {
                if scope.shape != SelectorShape::SelfRule || !scope.at_path.is_empty() {
                    return Err(scope.bail(
                        ReasonCode::KeepOriginal,
                        format!(
                            "runtime value inside `{}` cannot become a style function",
                            scope.rule.selector
                        ),
                    ));
                }
                for read in &reads {
                    ctx.consume_prop(read);
                }
                ctx.needs_wrapper = true;
                ctx.style_functions.push(function);
                Ok(())
            }
        }
    }
}

fn shorthand_bail(scope: &RuleScope<'_>, err: ShorthandError) -> Bail {
    let reason = match err {
        ShorthandError::Dynamic(_) => ReasonCode::UnsupportedDynamicShorthand,
        ShorthandError::Ambiguous { .. } => ReasonCode::KeepOriginal,
    };
    scope.bail(reason, err.to_string())
}

fn lower_parts(
    scope: &RuleScope<'_>,
    property: &str,
    parts: &[ValuePart],
    values: &FxHashMap<SlotIndex, StyleValue>,
) -> LowerResult<PropertyValues> {
    let tokens = value_tokens(parts, values).ok_or_else(|| {
        scope.bail(
            ReasonCode::KeepOriginal,
            format!("`{}` references a slot without a value", property),
        )
    })?;
    lower_tokens(property, tokens).map_err(|err| shorthand_bail(scope, err))
}

/// Every branch must land on the same output properties
fn check_homogeneous(
    scope: &RuleScope<'_>,
    property: &str,
    cases: &[(Option<VariantCondition>, Option<PropertyValues>)],
) -> LowerResult<()> {
    let mut shapes = cases.iter().filter_map(|(_, values)| {
        values
            .as_ref()
            .map(|values| values.iter().map(|(p, _)| p.as_str()).collect::<Vec<_>>())
    });
    let Some(first) = shapes.next() else {
        return Ok(());
    };
    for other in shapes {
        if other != first {
            return Err(scope.bail(
                ReasonCode::HeterogeneousVariantValues,
                format!(
                    "`{}` branches lower to [{}] and [{}]",
                    property,
                    first.join(", "),
                    other.join(", ")
                ),
            ));
        }
    }
    Ok(())
}

fn place_values(
    ctx: &mut LoweringContext,
    scope: &RuleScope<'_>,
    values: PropertyValues,
) -> LowerResult<()> {
    if let Some((pseudo_element, paths)) = scope.own_paths() {
        for path in &paths {
            for (property, value) in &values {
                ctx.write_base(pseudo_element, path, property, value.clone());
            }
        }
        return Ok(());
    }

    match &scope.shape {
        SelectorShape::Attribute {
            kind,
            suffix,
            pseudo_element,
        } => {
            for (property, value) in values {
                ctx.write_attribute(
                    kind,
                    suffix,
                    pseudo_element.as_deref(),
                    &scope.at_path,
                    &property,
                    value,
                );
            }
            Ok(())
        }
        SelectorShape::SiblingOfSelf(kind) => {
            if !scope.at_path.is_empty() {
                return Err(scope.bail(
                    ReasonCode::UnsupportedSelector,
                    format!("`{}` inside {}", scope.rule.selector, scope.rule.at_rules.join(" ")),
                ));
            }
            for (property, value) in values {
                ctx.write_sibling(*kind, &property, value);
            }
            Ok(())
        }
        SelectorShape::DescendantComponent {
            component,
            ancestor_pseudo,
        } => {
            let parent = scope.decl.local_name.clone();
            push_override(ctx, scope, parent, component.clone(), ancestor_pseudo.clone(), values);
            Ok(())
        }
        SelectorShape::ComponentAncestor { component, pseudo } => {
            let child = scope.decl.local_name.clone();
            push_override(ctx, scope, component.clone(), child, pseudo.clone(), values);
            Ok(())
        }
        shape => Err(scope.bail(
            ReasonCode::UnsupportedSelector,
            format!("`{}` classified as {}", scope.rule.selector, shape),
        )),
    }
}

fn push_override(
    ctx: &mut LoweringContext,
    scope: &RuleScope<'_>,
    parent: String,
    child: String,
    ancestor_pseudo: Option<String>,
    values: PropertyValues,
) {
    let mut object = StyleObject::new();
    for (property, value) in values {
        let next = write_value(object.get(&property).cloned(), &scope.at_path, value, StyleValue::Null);
        object.insert(property, next);
    }
    ctx.override_requests.push(OverrideRequest {
        parent,
        child,
        ancestor_pseudo,
        selector: scope.rule.selector.clone(),
        values: object,
        origin: scope.decl.local_name.clone(),
    });
}

fn place_split(
    ctx: &mut LoweringContext,
    scope: &RuleScope<'_>,
    cases: Vec<(Option<VariantCondition>, Option<PropertyValues>)>,
) -> LowerResult<()> {
    let Some((pseudo_element, paths)) = scope.own_paths() else {
        return Err(scope.bail(
            ReasonCode::KeepOriginal,
            format!("conditional value inside `{}`", scope.rule.selector),
        ));
    };

    // omitted branches restore what the own object held before this declaration
    let properties: Vec<String> = cases
        .iter()
        .find_map(|(_, values)| values.as_ref())
        .map(|values| values.iter().map(|(p, _)| p.clone()).collect())
        .unwrap_or_default();
    let snapshot: &LoweringContext = ctx;
    let prior: Vec<(usize, String, StyleValue)> = paths
        .iter()
        .enumerate()
        .flat_map(|(i, path)| {
            properties
                .iter()
                .map(move |p| (i, p.clone(), snapshot.base_value_at(pseudo_element, path, p)))
        })
        .collect();

    // base first, so it never overwrites a branch of this same declaration
    let mut cases = cases;
    cases.sort_by_key(|(when, _)| when.is_some());
    for (when, values) in cases {
        match (when, values) {
            (None, Some(values)) => {
                for path in &paths {
                    for (property, value) in &values {
                        ctx.write_base(pseudo_element, path, property, value.clone());
                    }
                }
            }
            (None, None) => {}
            (Some(condition), Some(values)) => {
                for path in &paths {
                    for (property, value) in &values {
                        write_variant(ctx, scope, &condition, pseudo_element, path, property, value.clone())?;
                    }
                }
            }
            (Some(condition), None) => {
                for (i, property, value) in &prior {
                    write_variant(ctx, scope, &condition, pseudo_element, &paths[*i], property, value.clone())?;
                }
            }
        }
    }
    Ok(())
}

/// Variant write that keeps source order: a bucket applied after this one
/// that sets the same property would win where the later declaration should
fn write_variant(
    ctx: &mut LoweringContext,
    scope: &RuleScope<'_>,
    condition: &VariantCondition,
    pseudo_element: Option<&str>,
    path: &[ConditionKey],
    property: &str,
    value: StyleValue,
) -> LowerResult<()> {
    if let Some(later) = ctx.later_variant_setting(condition, pseudo_element, property) {
        return Err(scope.bail(
            ReasonCode::KeepOriginal,
            format!(
                "`{}` set under `{}` would lose to the later-applied `{}`",
                property, condition, later
            ),
        ));
    }
    ctx.write_variant(condition, pseudo_element, path, property, value);
    Ok(())
}
