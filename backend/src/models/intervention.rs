//! Intervention mix and its capital cost
//!
//! Two channels are modelled:
//! - **Albedo coverage**: reflective coating on roofs and pavement
//! - **Green cover**: vegetative canopy (evapotranspirative cooling)
//!
//! Both are fractions of the sector's built-up area in [0, 1].

use serde::{Deserialize, Serialize};

use crate::config::CostRates;
use crate::core::validation::{self, ValidationError};

/// Deployment levels of the two intervention channels
///
/// A mix with both channels at zero means "no intervention".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InterventionMix {
    /// Fraction of surface given reflective treatment
    pub albedo_coverage: f64,

    /// Fraction of surface under vegetative canopy
    pub green_cover: f64,
}

impl InterventionMix {
    /// Build a mix, rejecting fractions outside [0, 1]
    ///
    /// # Example
    /// ```
    /// use heat_mitigation_core_rs::InterventionMix;
    ///
    /// let mix = InterventionMix::new(0.3, 0.5).unwrap();
    /// assert_eq!(mix.green_cover, 0.5);
    /// assert!(InterventionMix::new(1.3, 0.5).is_err());
    /// ```
    pub fn new(albedo_coverage: f64, green_cover: f64) -> Result<Self, ValidationError> {
        let mix = Self {
            albedo_coverage,
            green_cover,
        };
        mix.validate()?;
        Ok(mix)
    }

    /// The "no intervention" mix
    pub fn none() -> Self {
        Self::default()
    }

    /// Build a mix by clamping each channel into [0, 1]
    ///
    /// Used for optimizer output, where the allocation formula may ask for
    /// more than full coverage.
    pub fn clamped(albedo_coverage: f64, green_cover: f64) -> Self {
        Self {
            albedo_coverage: albedo_coverage.clamp(0.0, 1.0),
            green_cover: green_cover.clamp(0.0, 1.0),
        }
    }

    /// Check both channels are fractions
    ///
    /// Fields are public for record-style use, so engine entry points call
    /// this rather than trusting construction.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::fraction("albedo_coverage", self.albedo_coverage)?;
        validation::fraction("green_cover", self.green_cover)?;
        Ok(())
    }

    pub fn is_none(&self) -> bool {
        self.albedo_coverage == 0.0 && self.green_cover == 0.0
    }

    /// True when both channels are deployed at their cap
    pub fn is_saturated(&self) -> bool {
        self.albedo_coverage >= 1.0 && self.green_cover >= 1.0
    }
}

/// Capital cost of deploying a mix over a sector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub albedo_cost: f64,
    pub green_cost: f64,

    /// `albedo_cost + green_cost`
    pub capital_cost: f64,
}

impl CostEstimate {
    /// Price a mix over `area_km2` with the configured unit costs
    ///
    /// # Example
    /// ```
    /// use heat_mitigation_core_rs::{CostEstimate, CostRates, InterventionMix};
    ///
    /// let rates = CostRates::default();
    /// let mix = InterventionMix::new(1.0, 0.0).unwrap();
    /// let cost = CostEstimate::for_mix(&mix, 10.0, &rates);
    /// assert_eq!(cost.capital_cost, 10.0 * rates.albedo_cost_per_km2);
    /// ```
    pub fn for_mix(mix: &InterventionMix, area_km2: f64, rates: &CostRates) -> Self {
        let albedo_cost = mix.albedo_coverage * rates.albedo_cost_per_km2 * area_km2;
        let green_cost = mix.green_cover * rates.green_cost_per_km2 * area_km2;
        Self {
            albedo_cost,
            green_cost,
            capital_cost: albedo_cost + green_cost,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}
