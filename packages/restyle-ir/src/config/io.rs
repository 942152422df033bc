//! Configuration I/O (YAML loading)
//!
//! YAML schema v1:
//!
//! ```yaml
//! version: 1
//! preset: strict
//! overrides:
//!   theme_binding: theme
//!   max_conditional_depth: 4
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::lowering_config::LoweringConfig;
use super::preset::Preset;
use super::validation::Validatable;

/// Versions this build can read
const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Field names accepted under `overrides`
const OVERRIDE_FIELDS: &[&str] = &[
    "theme_binding",
    "allow_inline_style_fallback",
    "max_conditional_depth",
    "styled_module_names",
    "carry_pseudo_into_variants",
    "synthesize_compound_variants",
];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Base preset
    pub preset: String,

    /// Fine-grained overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

/// Configuration overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_binding: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_inline_style_fallback: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_conditional_depth: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub styled_module_names: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub carry_pseudo_into_variants: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesize_compound_variants: Option<bool>,
}

impl ConfigOverrides {
    /// Overrides that turn `base` into `target`
    pub fn diff(base: &LoweringConfig, target: &LoweringConfig) -> Self {
        fn changed<T: PartialEq + Clone>(a: &T, b: &T) -> Option<T> {
            (a != b).then(|| b.clone())
        }

        Self {
            theme_binding: changed(&base.theme_binding, &target.theme_binding),
            allow_inline_style_fallback: changed(
                &base.allow_inline_style_fallback,
                &target.allow_inline_style_fallback,
            ),
            max_conditional_depth: changed(
                &base.max_conditional_depth,
                &target.max_conditional_depth,
            ),
            styled_module_names: changed(&base.styled_module_names, &target.styled_module_names),
            carry_pseudo_into_variants: changed(
                &base.carry_pseudo_into_variants,
                &target.carry_pseudo_into_variants,
            ),
            synthesize_compound_variants: changed(
                &base.synthesize_compound_variants,
                &target.synthesize_compound_variants,
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl LoweringConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let raw: serde_yaml::Value = serde_yaml::from_str(content)?;
        check_schema(&raw)?;

        let export: ConfigExportV1 = serde_yaml::from_value(raw)?;
        if !SUPPORTED_VERSIONS.contains(&export.version) {
            return Err(ConfigError::UnsupportedVersion {
                found: export.version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset =
            Preset::from_str(&export.preset).map_err(|_| ConfigError::UnknownPreset(export.preset))?;

        let mut config = Self::preset(preset);
        if let Some(overrides) = &export.overrides {
            config = config.apply_overrides(overrides);
        }
        config.validate()?;
        Ok(config)
    }

    /// Export as YAML, expressed as overrides over `preset`
    pub fn to_yaml(&self, preset: Preset) -> ConfigResult<String> {
        let overrides = ConfigOverrides::diff(&Self::preset(preset), self);
        let export = ConfigExportV1 {
            version: 1,
            preset: preset.as_str().to_string(),
            overrides: (!overrides.is_empty()).then_some(overrides),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}

/// Version presence and override field names, checked before typed decoding
/// so typos get a suggestion instead of a bare serde message
fn check_schema(raw: &serde_yaml::Value) -> ConfigResult<()> {
    let mapping = match raw.as_mapping() {
        Some(m) => m,
        None => {
            return Err(ConfigError::Validation(
                "configuration root must be a mapping".to_string(),
            ))
        }
    };

    if !mapping.contains_key("version") {
        return Err(ConfigError::MissingVersion);
    }

    if let Some(overrides) = mapping.get("overrides").and_then(|v| v.as_mapping()) {
        for key in overrides.keys() {
            let Some(name) = key.as_str() else { continue };
            if !OVERRIDE_FIELDS.contains(&name) {
                return Err(ConfigError::unknown_field_with_suggestion(
                    name,
                    "overrides",
                    OVERRIDE_FIELDS.iter().map(|f| f.to_string()).collect(),
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_roundtrip() {
        let config = LoweringConfig::preset(Preset::Strict)
            .max_conditional_depth(3)
            .theme_binding("tokens");

        let yaml = config.to_yaml(Preset::Strict).unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("max_conditional_depth: 3"));
        assert!(!yaml.contains("carry_pseudo_into_variants"));

        let loaded = LoweringConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_yaml_loading() {
        let yaml = r#"
version: 1
preset: permissive
overrides:
  max_conditional_depth: 2
  styled_module_names: ["styled-components", "@emotion/styled"]
"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = LoweringConfig::from_yaml(file.path()).unwrap();
        assert!(config.allow_inline_style_fallback);
        assert_eq!(config.max_conditional_depth, 2);
        assert!(config.is_styled_module("@emotion/styled"));
    }

    #[test]
    fn test_yaml_missing_version() {
        let err = LoweringConfig::from_yaml_str("preset: strict\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingVersion));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let err = LoweringConfig::from_yaml_str("version: 2\npreset: strict\n").unwrap_err();
        match err {
            ConfigError::UnsupportedVersion { found, supported } => {
                assert_eq!(found, 2);
                assert_eq!(supported, vec![1]);
            }
            other => panic!("expected UnsupportedVersion, got {:?}", other),
        }
    }

    #[test]
    fn test_yaml_unknown_preset() {
        let err = LoweringConfig::from_yaml_str("version: 1\npreset: turbo\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPreset(ref p) if p == "turbo"));
    }

    #[test]
    fn test_yaml_unknown_override_suggests() {
        let yaml = "version: 1\npreset: strict\noverrides:\n  theme_bindng: t\n";
        let err = LoweringConfig::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("Did you mean 'theme_binding'"));
    }

    #[test]
    fn test_yaml_invalid_override_value() {
        let yaml = "version: 1\npreset: strict\noverrides:\n  max_conditional_depth: 0\n";
        let err = LoweringConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Range { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = LoweringConfig::from_yaml("/nonexistent/restyle.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
