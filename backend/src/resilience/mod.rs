//! Resilience Scorer
//!
//! Composite grade of how well a sector can absorb a heatwave:
//!
//! ```text
//! aqi_term = min(1, max(0, aqi_ceiling - aqi) / aqi_scale)   (AQI known)
//!          = neutral_aqi_fraction                             (AQI unknown)
//! score    = albedo_weight * albedo + green_weight * green + aqi_weight * aqi_term
//! ```
//!
//! A sector without air-quality telemetry gets a neutral air-quality
//! credit, neither penalised as if the air were toxic nor rewarded as if it
//! were clean.

use serde::{Deserialize, Serialize};

use crate::config::ResilienceConfig;
use crate::core::validation::{self, ValidationError};
use crate::models::InterventionMix;

/// Letter grade, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    F,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResilienceGrade {
    /// Score in [0, max_score]
    pub score: f64,
    pub grade: LetterGrade,
    pub advisory: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ResilienceScorer<'a> {
    config: &'a ResilienceConfig,
}

impl<'a> ResilienceScorer<'a> {
    /// The configuration is expected to have passed
    /// [`ResilienceConfig::validate`], whose lowest grade starts at 0.
    /// A score below every grade is an error, never a default `F`.
    pub fn new(config: &'a ResilienceConfig) -> Self {
        Self { config }
    }

    /// Air-quality share in [0, 1]
    pub fn air_quality_term(&self, aqi: Option<f64>) -> f64 {
        match aqi {
            Some(aqi) => ((self.config.aqi_ceiling - aqi).max(0.0) / self.config.aqi_scale).min(1.0),
            None => self.config.neutral_aqi_fraction,
        }
    }

    /// Grade an intervention mix and the sector's air quality
    ///
    /// # Example
    /// ```
    /// use heat_mitigation_core_rs::{InterventionMix, LetterGrade, ResilienceConfig, ResilienceScorer};
    ///
    /// let config = ResilienceConfig::default();
    /// let scorer = ResilienceScorer::new(&config);
    ///
    /// let grade = scorer.score(&InterventionMix::new(1.0, 1.0).unwrap(), Some(0.0)).unwrap();
    /// assert_eq!(grade.score, 100.0);
    /// assert_eq!(grade.grade, LetterGrade::A);
    /// ```
    pub fn score(&self, mix: &InterventionMix, aqi: Option<f64>) -> Result<ResilienceGrade, ValidationError> {
        mix.validate()?;
        let aqi = aqi.map(|value| validation::non_negative("aqi", value)).transpose()?;

        let score = self.config.albedo_weight * mix.albedo_coverage
            + self.config.green_weight * mix.green_cover
            + self.config.aqi_weight * self.air_quality_term(aqi);

        let band = self
            .config
            .grades
            .iter()
            .find(|band| score >= band.min_score)
            .ok_or(ValidationError::Unbanded {
                field: "resilience_score",
                value: score,
            })?;

        Ok(ResilienceGrade {
            score,
            grade: band.grade,
            advisory: band.advisory.clone(),
        })
    }
}
