//! Health Risk Classifier
//!
//! Temperature + humidity → heat-stress index → ordinal risk category,
//! advisory text and a safe-exposure budget for outdoor labour.
//!
//! # Index Policy
//!
//! Regional data sources disagree on the index, so the formula is a named,
//! swappable policy ([`HeatIndexFormula`]). The default contract is the
//! simplified heat index:
//!
//! ```text
//! index = temp + 0.55 * (humidity * 100 - 55)
//! ```
//!
//! Both policies are strictly increasing in temperature for any humidity
//! in [0, 1], so classification is monotonic in temperature.
//!
//! Thresholds, advisories and exposure budgets come from
//! [`HealthConfig`](crate::config::HealthConfig).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::HealthConfig;
use crate::core::validation::{self, ValidationError};

/// Ordinal heat-stress category, mildest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCategory {
    Stable,
    Caution,
    Warning,
    Severe,
    Critical,
}

impl RiskCategory {
    /// Every category in ascending severity
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::Stable,
        RiskCategory::Caution,
        RiskCategory::Warning,
        RiskCategory::Severe,
        RiskCategory::Critical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Stable => "STABLE",
            RiskCategory::Caution => "CAUTION",
            RiskCategory::Warning => "WARNING",
            RiskCategory::Severe => "SEVERE",
            RiskCategory::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Heat-stress index policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatIndexFormula {
    /// `temp + 0.55 * (humidity * 100 - 55)`
    SimplifiedHeatIndex,

    /// `0.7 * temp * humidity + 0.3 * temp`, a wet-bulb weighted proxy
    WetBulbWeighted,
}

impl HeatIndexFormula {
    pub fn index(&self, temp_c: f64, humidity: f64) -> f64 {
        match self {
            HeatIndexFormula::SimplifiedHeatIndex => temp_c + 0.55 * (humidity * 100.0 - 55.0),
            HeatIndexFormula::WetBulbWeighted => 0.7 * (temp_c * humidity) + 0.3 * temp_c,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HeatIndexFormula::SimplifiedHeatIndex => "simplified_heat_index",
            HeatIndexFormula::WetBulbWeighted => "wet_bulb_weighted",
        }
    }
}

/// Classification of one temperature/humidity reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub index_value: f64,
    pub category: RiskCategory,
    pub advisory: String,
    pub safe_exposure_minutes_per_hour: u32,
}

/// Band-based classifier over a borrowed health configuration
#[derive(Debug, Clone, Copy)]
pub struct HealthRiskClassifier<'a> {
    config: &'a HealthConfig,
}

impl<'a> HealthRiskClassifier<'a> {
    /// The configuration is expected to have passed [`HealthConfig::validate`].
    /// Over an unvalidated table an index no band covers is an error, never
    /// a default category.
    pub fn new(config: &'a HealthConfig) -> Self {
        Self { config }
    }

    /// Classify a reading
    ///
    /// # Errors
    ///
    /// `ValidationError` for non-finite input or humidity outside [0, 1],
    /// or when no configured band covers the index.
    ///
    /// # Example
    /// ```
    /// use heat_mitigation_core_rs::{HealthConfig, HealthRiskClassifier, RiskCategory};
    ///
    /// let config = HealthConfig::default();
    /// let classifier = HealthRiskClassifier::new(&config);
    ///
    /// // 47.1 + 0.55 * (44 - 55) = 41.05
    /// let risk = classifier.classify(47.1, 0.44).unwrap();
    /// assert_eq!(risk.category, RiskCategory::Severe);
    /// assert_eq!(risk.safe_exposure_minutes_per_hour, 15);
    /// ```
    pub fn classify(&self, temp_c: f64, humidity: f64) -> Result<RiskAssessment, ValidationError> {
        let temp_c = validation::finite("temp_c", temp_c)?;
        let humidity = validation::fraction("humidity", humidity)?;
        let index_value = self.config.formula.index(temp_c, humidity);

        // Most severe band whose threshold the index exceeds; the lowest
        // band has no threshold and catches the rest.
        let band = self
            .config
            .bands
            .iter()
            .rev()
            .find(|band| band.index_above.map_or(true, |threshold| index_value > threshold));

        let band = band.ok_or(ValidationError::Unbanded {
            field: "heat_index",
            value: index_value,
        })?;
        Ok(RiskAssessment {
            index_value,
            category: band.category,
            advisory: band.advisory.clone(),
            safe_exposure_minutes_per_hour: band.safe_exposure_minutes_per_hour,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_ordered() {
        assert!(RiskCategory::Stable < RiskCategory::Caution);
        assert!(RiskCategory::Severe < RiskCategory::Critical);
    }

    #[test]
    fn test_category_serializes_upper_case() {
        let json = serde_json::to_string(&RiskCategory::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
        assert_eq!(RiskCategory::Caution.to_string(), "CAUTION");
    }

    #[test]
    fn test_formula_serializes_snake_case() {
        let json = serde_json::to_string(&HeatIndexFormula::WetBulbWeighted).unwrap();
        assert_eq!(json, "\"wet_bulb_weighted\"");
    }

    #[test]
    fn test_simplified_index_value() {
        let index = HeatIndexFormula::SimplifiedHeatIndex.index(40.0, 0.55);
        assert!((index - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_wet_bulb_index_value() {
        let index = HeatIndexFormula::WetBulbWeighted.index(40.0, 0.5);
        assert!((index - 26.0).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut config = HealthConfig::default();
        let at_threshold = config.formula.index(48.0, 0.5);
        config.bands[4].index_above = Some(at_threshold);
        let classifier = HealthRiskClassifier::new(&config);

        assert_eq!(classifier.classify(48.0, 0.5).unwrap().category, RiskCategory::Severe);
        assert_eq!(classifier.classify(48.1, 0.5).unwrap().category, RiskCategory::Critical);
    }

    #[test]
    fn test_unvalidated_bands_never_default_to_stable() {
        let mut config = HealthConfig::default();
        config.bands[0].index_above = Some(10.0);
        assert!(config.validate().is_err());
        let classifier = HealthRiskClassifier::new(&config);

        let err = classifier.classify(5.0, 0.55).unwrap_err();
        assert!(matches!(err, ValidationError::Unbanded { field: "heat_index", .. }));
        assert_eq!(classifier.classify(30.0, 0.55).unwrap().category, RiskCategory::Caution);
    }

    #[test]
    fn test_infinite_temperature_is_rejected() {
        let config = HealthConfig::default();
        let classifier = HealthRiskClassifier::new(&config);
        assert_eq!(
            classifier.classify(f64::INFINITY, 0.4),
            Err(ValidationError::NonFinite { field: "temp_c" })
        );
    }
}
