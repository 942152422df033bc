//! Configuration validation
//!
//! Builders run `validate` before a config reaches the engine; YAML loading
//! validates after overrides are applied.

use super::error::ConfigResult;

/// Configuration object with range and shape checks
pub trait Validatable {
    fn validate(&self) -> ConfigResult<()>;

    /// Name used in error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}
