//! Engine configuration
//!
//! Every coefficient the engine uses lives here, grouped by component:
//! - Section types and their defaults (`sections`)
//! - Self-documenting schema for each coefficient (`schema_docs`)
//!
//! # Single Source of Truth
//!
//! No formula in the engine embeds a literal coefficient. Regional or
//! temporal calibration is done by overriding values in a JSON document;
//! any omitted key keeps its default.
//!
//! Configuration is read-only after startup. Validation happens once, when
//! the engine is built, and a bad document is fatal.

pub mod schema_docs;
pub mod sections;

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use schema_docs::{get_config_schema, CoefficientCategory, CoefficientElement, ConfigSchemaDoc};
pub use sections::{
    CanyonConfig, CostRates, EconomicRates, GradeBand, HealthConfig, OptimizerConfig,
    ResilienceConfig, RiskBand, ThermalConfig,
};

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid coefficient {name} = {value}: {reason}")]
    InvalidCoefficient {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Invalid bands in {section}: {reason}")]
    InvalidBands {
        section: &'static str,
        reason: String,
    },
}

/// Complete engine configuration
///
/// # Example
/// ```
/// use heat_mitigation_core_rs::EngineConfig;
///
/// let config = EngineConfig::from_json_str(r#"{"thermal": {"humidity_penalty": 0.25}}"#).unwrap();
/// assert_eq!(config.thermal.humidity_penalty, 0.25);
/// assert_eq!(config.thermal.green_cooling_c, 11.5); // untouched default
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub thermal: ThermalConfig,
    pub optimizer: OptimizerConfig,
    pub costs: CostRates,
    pub health: HealthConfig,
    pub economics: EconomicRates,
    pub resilience: ResilienceConfig,
    pub canyon: CanyonConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON document
    ///
    /// Unknown keys are ignored; missing keys fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        info!("loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thermal.validate()?;
        self.optimizer.validate()?;
        self.costs.validate()?;
        self.health.validate()?;
        self.economics.validate()?;
        self.resilience.validate()?;
        self.canyon.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = EngineConfig::from_json_str(
            r#"{"economics": {"carbon_price_per_ton": 80.0}, "costs": {"green_cost_per_km2": 5e7}}"#,
        )
        .unwrap();
        assert_eq!(config.economics.carbon_price_per_ton, 80.0);
        assert_eq!(config.economics.co2_tons_per_c, 485.0);
        assert_eq!(config.costs.green_cost_per_km2, 5e7);
        assert_eq!(config.costs.albedo_cost_per_km2, 15_000_000.0);
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = EngineConfig::from_json_str("{ thermal: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_wrong_type_is_a_parse_error() {
        let err = EngineConfig::from_json_str(r#"{"thermal": {"green_cooling_c": "lots"}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_value_fails_validation() {
        let err = EngineConfig::from_json_str(r#"{"thermal": {"green_cooling_c": -1.0}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidCoefficient {
                name: "thermal.green_cooling_c",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = EngineConfig::load("/nonexistent/heat-engine.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
