//! Lowering configuration
//!
//! Two levels:
//! - Preset: `LoweringConfig::preset(Preset::Strict)`
//! - YAML: `LoweringConfig::from_yaml("restyle.yaml")?` (schema v1, preset plus overrides)
//!
//! # Examples
//!
//! ```rust,ignore
//! use restyle_ir::config::{LoweringConfig, Preset};
//!
//! let config = LoweringConfig::preset(Preset::Permissive)
//!     .max_conditional_depth(4)
//!     .build()?;
//! ```

pub mod error;
pub mod io;
pub mod lowering_config;
pub mod preset;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, ConfigOverrides};
pub use lowering_config::LoweringConfig;
pub use preset::Preset;
pub use validation::Validatable;
