//! Lowering configuration
//!
//! Knobs the resolver and the lowering engine read. Every field has a
//! preset-derived default, so partial YAML overrides stay small.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigOverrides;
use super::preset::Preset;
use super::validation::Validatable;
use crate::shared::constants::resolution::{
    DEFAULT_MAX_CONDITIONAL_DEPTH, DEFAULT_STYLED_MODULES, DEFAULT_THEME_BINDING,
    MAX_CONDITIONAL_DEPTH_LIMIT,
};

/// Configuration shared by every file of one conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoweringConfig {
    /// Identifier theme reads are rooted at (`props.theme.colors.primary`)
    pub theme_binding: String,

    /// Forward self-contained arrow functions as inline style arguments
    pub allow_inline_style_fallback: bool,

    /// Longest nested conditional chain a single slot may use
    pub max_conditional_depth: usize,

    /// Modules whose `css` export builds static tagged templates
    pub styled_module_names: Vec<String>,

    /// Copy base pseudo entries into variants that override the same property
    pub carry_pseudo_into_variants: bool,

    /// Synthesize `A && B` variants where a default-level and a pseudo-level
    /// variant touch the same property
    pub synthesize_compound_variants: bool,
}

impl Default for LoweringConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

impl LoweringConfig {
    /// Start from a preset
    pub fn preset(preset: Preset) -> Self {
        let base = Self {
            theme_binding: DEFAULT_THEME_BINDING.to_string(),
            allow_inline_style_fallback: false,
            max_conditional_depth: DEFAULT_MAX_CONDITIONAL_DEPTH,
            styled_module_names: DEFAULT_STYLED_MODULES.iter().map(|m| m.to_string()).collect(),
            carry_pseudo_into_variants: true,
            synthesize_compound_variants: true,
        };

        match preset {
            Preset::Strict => base,
            Preset::Permissive => Self {
                allow_inline_style_fallback: true,
                ..base
            },
        }
    }

    pub fn theme_binding(mut self, name: impl Into<String>) -> Self {
        self.theme_binding = name.into();
        self
    }

    pub fn allow_inline_style_fallback(mut self, enabled: bool) -> Self {
        self.allow_inline_style_fallback = enabled;
        self
    }

    pub fn max_conditional_depth(mut self, depth: usize) -> Self {
        self.max_conditional_depth = depth;
        self
    }

    pub fn styled_module(mut self, module: impl Into<String>) -> Self {
        let module = module.into();
        if !self.styled_module_names.contains(&module) {
            self.styled_module_names.push(module);
        }
        self
    }

    pub fn carry_pseudo_into_variants(mut self, enabled: bool) -> Self {
        self.carry_pseudo_into_variants = enabled;
        self
    }

    pub fn synthesize_compound_variants(mut self, enabled: bool) -> Self {
        self.synthesize_compound_variants = enabled;
        self
    }

    /// Apply YAML overrides field by field
    pub fn apply_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(name) = &overrides.theme_binding {
            self.theme_binding = name.clone();
        }
        if let Some(enabled) = overrides.allow_inline_style_fallback {
            self.allow_inline_style_fallback = enabled;
        }
        if let Some(depth) = overrides.max_conditional_depth {
            self.max_conditional_depth = depth;
        }
        if let Some(modules) = &overrides.styled_module_names {
            self.styled_module_names = modules.clone();
        }
        if let Some(enabled) = overrides.carry_pseudo_into_variants {
            self.carry_pseudo_into_variants = enabled;
        }
        if let Some(enabled) = overrides.synthesize_compound_variants {
            self.synthesize_compound_variants = enabled;
        }
        self
    }

    /// Validate and hand back the config
    pub fn build(self) -> ConfigResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Whether `module` exports the static `css` helper
    pub fn is_styled_module(&self, module: &str) -> bool {
        self.styled_module_names.iter().any(|m| m == module)
    }
}

impl Validatable for LoweringConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !(1..=MAX_CONDITIONAL_DEPTH_LIMIT).contains(&self.max_conditional_depth) {
            return Err(ConfigError::range_with_hint(
                "max_conditional_depth",
                self.max_conditional_depth,
                1,
                MAX_CONDITIONAL_DEPTH_LIMIT,
                "Nested conditional chains need at least one level",
            ));
        }

        let binding = self.theme_binding.trim();
        if binding.is_empty() {
            return Err(ConfigError::Validation(
                "theme_binding must not be empty".to_string(),
            ));
        }
        if !binding
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        {
            return Err(ConfigError::Validation(format!(
                "theme_binding '{}' is not a plain identifier",
                self.theme_binding
            )));
        }

        if self.styled_module_names.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "styled_module_names must not contain empty entries".to_string(),
            ));
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "LoweringConfig"
    }
}
