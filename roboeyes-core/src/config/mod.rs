//! Configuration types
//!
//! `EyesConfig` with TOML loading behind the `toml` feature.

pub mod types;

pub use types::*;

#[cfg(feature = "toml")]
impl EyesConfig {
    /// Parse and validate a TOML config
    ///
    /// Missing keys keep their defaults.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: EyesConfig = toml::from_str(input).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }
}
