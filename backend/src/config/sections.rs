//! Coefficient sections of the engine configuration
//!
//! One section per component. Every coefficient is a named, overridable
//! value; the `Default` impls carry the calibrated Punjab-region values.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::health::{HeatIndexFormula, RiskCategory};
use crate::resilience::LetterGrade;

fn check_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidCoefficient {
            name,
            value,
            reason: "must be finite",
        })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidCoefficient {
            name,
            value,
            reason: "must be positive",
        })
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidCoefficient {
            name,
            value,
            reason: "must not be negative",
        })
    }
}

fn check_fraction(name: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(name, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidCoefficient {
            name,
            value,
            reason: "must be in [0, 1]",
        })
    }
}

// ============================================================================
// Thermal model
// ============================================================================

/// Forward thermal model coefficients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThermalConfig {
    /// Cooling (°C) delivered by full green cover (evapotranspiration)
    pub green_cooling_c: f64,

    /// Cooling (°C) delivered by full albedo coverage (reflected short-wave)
    pub albedo_cooling_c: f64,

    /// Humidity penalty `k` in `efficiency = 1 - humidity * k`
    ///
    /// Must stay below 1.0 so that efficiency is positive even at
    /// saturation.
    pub humidity_penalty: f64,

    /// Lowest temperature the model will report (°C)
    pub temperature_floor_c: f64,

    /// AQI above which pollution forcing starts
    pub aqi_baseline: f64,

    /// Heat-blanket forcing per AQI point above `aqi_baseline` (°C)
    pub heat_blanket_c_per_aqi: f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            green_cooling_c: 11.5,
            albedo_cooling_c: 9.2,
            humidity_penalty: 0.28,
            temperature_floor_c: 21.5,
            aqi_baseline: 100.0,
            heat_blanket_c_per_aqi: 0.01,
        }
    }
}

impl ThermalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("thermal.green_cooling_c", self.green_cooling_c)?;
        check_positive("thermal.albedo_cooling_c", self.albedo_cooling_c)?;
        check_non_negative("thermal.humidity_penalty", self.humidity_penalty)?;
        if self.humidity_penalty >= 1.0 {
            return Err(ConfigError::InvalidCoefficient {
                name: "thermal.humidity_penalty",
                value: self.humidity_penalty,
                reason: "must be below 1.0",
            });
        }
        check_finite("thermal.temperature_floor_c", self.temperature_floor_c)?;
        check_non_negative("thermal.aqi_baseline", self.aqi_baseline)?;
        check_non_negative("thermal.heat_blanket_c_per_aqi", self.heat_blanket_c_per_aqi)
    }
}

// ============================================================================
// Optimizer
// ============================================================================

/// Closed-form allocation policy of the intervention optimizer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Albedo coverage allocated per °C of cooling needed
    pub albedo_allocation_ratio: f64,

    /// Cooling (°C) credited per unit of albedo before green cover is sized
    ///
    /// Below 1.0 so albedo's contribution is not double counted.
    pub albedo_overlap_factor: f64,

    /// Slack (°C) within which a projected temperature counts as on target
    pub tolerance_c: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            albedo_allocation_ratio: 0.42,
            albedo_overlap_factor: 0.6,
            tolerance_c: 0.05,
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("optimizer.albedo_allocation_ratio", self.albedo_allocation_ratio)?;
        check_non_negative("optimizer.albedo_overlap_factor", self.albedo_overlap_factor)?;
        if self.albedo_overlap_factor >= 1.0 {
            return Err(ConfigError::InvalidCoefficient {
                name: "optimizer.albedo_overlap_factor",
                value: self.albedo_overlap_factor,
                reason: "must be below 1.0",
            });
        }
        check_non_negative("optimizer.tolerance_c", self.tolerance_c)
    }
}

// ============================================================================
// Capital costs
// ============================================================================

/// Unit capital costs of interventions
///
/// Currency-agnostic: formatting (₹ crore, $) belongs to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CostRates {
    /// Cost per km² per unit of albedo coverage (reflective coating)
    pub albedo_cost_per_km2: f64,

    /// Cost per km² per unit of green cover (planting plus upkeep)
    pub green_cost_per_km2: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            albedo_cost_per_km2: 15_000_000.0, // ₹1.5 Cr per km² at full coverage
            green_cost_per_km2: 45_000_000.0,  // ₹4.5 Cr per km² at full cover
        }
    }
}

impl CostRates {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("costs.albedo_cost_per_km2", self.albedo_cost_per_km2)?;
        check_non_negative("costs.green_cost_per_km2", self.green_cost_per_km2)?;
        // The allocation policy leads with albedo because it is the cheaper channel.
        if self.green_cost_per_km2 <= self.albedo_cost_per_km2 {
            return Err(ConfigError::InvalidCoefficient {
                name: "costs.green_cost_per_km2",
                value: self.green_cost_per_km2,
                reason: "must exceed costs.albedo_cost_per_km2",
            });
        }
        Ok(())
    }
}

// ============================================================================
// Health risk
// ============================================================================

/// One ordinal band of the heat-stress scale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskBand {
    pub category: RiskCategory,

    /// Band applies when the index is strictly above this value
    ///
    /// `None` only for the lowest band, which catches everything else.
    pub index_above: Option<f64>,

    pub advisory: String,

    pub safe_exposure_minutes_per_hour: u32,
}

/// Heat-stress index policy and its banding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HealthConfig {
    pub formula: HeatIndexFormula,

    /// One band per category, mildest first
    pub bands: Vec<RiskBand>,
}

impl Default for HealthConfig {
    fn default() -> Self {
        let band = |category, index_above, advisory: &str, minutes| RiskBand {
            category,
            index_above,
            advisory: advisory.to_string(),
            safe_exposure_minutes_per_hour: minutes,
        };
        Self {
            formula: HeatIndexFormula::SimplifiedHeatIndex,
            bands: vec![
                band(RiskCategory::Stable, None, "Thermal conditions stable.", 60),
                band(
                    RiskCategory::Caution,
                    Some(27.0),
                    "Mild thermal load. Hydrate and take shade breaks.",
                    45,
                ),
                band(
                    RiskCategory::Warning,
                    Some(32.0),
                    "Significant thermal fatigue likely for outdoor labor.",
                    30,
                ),
                band(
                    RiskCategory::Severe,
                    Some(39.0),
                    "Heatstroke likely with prolonged exposure.",
                    15,
                ),
                band(
                    RiskCategory::Critical,
                    Some(46.0),
                    "Extreme danger. Hyperthermia risk imminent, suspend outdoor work.",
                    0,
                ),
            ],
        }
    }
}

impl HealthConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBands {
            section: "health.bands",
            reason,
        };

        if self.bands.len() != RiskCategory::ALL.len() {
            return Err(invalid(format!(
                "expected {} bands, found {}",
                RiskCategory::ALL.len(),
                self.bands.len()
            )));
        }

        let mut previous: Option<&RiskBand> = None;
        for (band, expected) in self.bands.iter().zip(RiskCategory::ALL) {
            if band.category != expected {
                return Err(invalid(format!(
                    "expected {:?} band, found {:?}",
                    expected, band.category
                )));
            }
            match (previous, band.index_above) {
                (None, None) => {}
                (None, Some(_)) => {
                    return Err(invalid("lowest band must not have a threshold".to_string()))
                }
                (Some(_), None) => {
                    return Err(invalid(format!("{:?} band is missing a threshold", band.category)))
                }
                (Some(prev), Some(threshold)) => {
                    if !threshold.is_finite() {
                        return Err(invalid(format!("{:?} threshold must be finite", band.category)));
                    }
                    if let Some(prev_threshold) = prev.index_above {
                        if threshold <= prev_threshold {
                            return Err(invalid(format!(
                                "{:?} threshold {} must exceed {}",
                                band.category, threshold, prev_threshold
                            )));
                        }
                    }
                    if band.safe_exposure_minutes_per_hour >= prev.safe_exposure_minutes_per_hour {
                        return Err(invalid(format!(
                            "{:?} exposure budget must be below {:?}",
                            band.category, prev.category
                        )));
                    }
                }
            }
            previous = Some(band);
        }

        if let Some(first) = self.bands.first() {
            if first.safe_exposure_minutes_per_hour > 60 {
                return Err(invalid("exposure budget cannot exceed 60 minutes per hour".to_string()));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Economics
// ============================================================================

/// Market and physical rates for the economic valuation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EconomicRates {
    /// Tons of CO₂e avoided per °C of district-wide cooling (HVAC load)
    pub co2_tons_per_c: f64,

    /// Carbon market price per ton
    pub carbon_price_per_ton: f64,

    /// Average usable battery capacity per vehicle (kWh)
    pub battery_kwh_avg: f64,

    /// Share of the fleet available for discharge during a peak event
    pub discharge_fraction: f64,

    /// Price paid per MWh discharged to the grid
    pub v2g_price_per_mwh: f64,

    /// Evaporative water loss avoided per °C of cooling (mm over the sector)
    pub evapotranspiration_mm_per_c: f64,
}

impl Default for EconomicRates {
    fn default() -> Self {
        Self {
            co2_tons_per_c: 485.0,
            carbon_price_per_ton: 28.5, // EU-ETS approximate
            battery_kwh_avg: 40.0,
            discharge_fraction: 0.3,
            v2g_price_per_mwh: 120.0,
            evapotranspiration_mm_per_c: 0.8,
        }
    }
}

impl EconomicRates {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("economics.co2_tons_per_c", self.co2_tons_per_c)?;
        check_non_negative("economics.carbon_price_per_ton", self.carbon_price_per_ton)?;
        check_non_negative("economics.battery_kwh_avg", self.battery_kwh_avg)?;
        check_fraction("economics.discharge_fraction", self.discharge_fraction)?;
        check_non_negative("economics.v2g_price_per_mwh", self.v2g_price_per_mwh)?;
        check_non_negative(
            "economics.evapotranspiration_mm_per_c",
            self.evapotranspiration_mm_per_c,
        )
    }
}

// ============================================================================
// Resilience
// ============================================================================

/// One letter-grade band, applied when the score is at or above `min_score`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradeBand {
    pub grade: LetterGrade,
    pub min_score: f64,
    pub advisory: String,
}

/// Weights and grade bands of the resilience score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResilienceConfig {
    pub albedo_weight: f64,
    pub green_weight: f64,
    pub aqi_weight: f64,

    /// AQI at or above which air quality contributes nothing
    pub aqi_ceiling: f64,

    /// Divisor normalising `aqi_ceiling - aqi` into [0, 1]
    pub aqi_scale: f64,

    /// Share of `aqi_weight` credited when AQI is unknown
    pub neutral_aqi_fraction: f64,

    /// Bands ordered best grade first
    pub grades: Vec<GradeBand>,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        let band = |grade, min_score, advisory: &str| GradeBand {
            grade,
            min_score,
            advisory: advisory.to_string(),
        };
        Self {
            albedo_weight: 30.0,
            green_weight: 40.0,
            aqi_weight: 30.0,
            aqi_ceiling: 300.0,
            aqi_scale: 300.0,
            neutral_aqi_fraction: 0.5,
            grades: vec![
                band(LetterGrade::A, 80.0, "Resilient: sector can absorb a heatwave."),
                band(LetterGrade::B, 60.0, "Adequate: expand canopy to harden further."),
                band(LetterGrade::C, 40.0, "Fragile: interventions below safe levels."),
                band(LetterGrade::F, 0.0, "Exposed: no meaningful thermal defence."),
            ],
        }
    }
}

impl ResilienceConfig {
    /// Highest score the weights can produce
    pub fn max_score(&self) -> f64 {
        self.albedo_weight + self.green_weight + self.aqi_weight
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("resilience.albedo_weight", self.albedo_weight)?;
        check_non_negative("resilience.green_weight", self.green_weight)?;
        check_non_negative("resilience.aqi_weight", self.aqi_weight)?;
        check_positive("resilience.max_score", self.max_score())?;
        check_non_negative("resilience.aqi_ceiling", self.aqi_ceiling)?;
        check_positive("resilience.aqi_scale", self.aqi_scale)?;
        check_fraction("resilience.neutral_aqi_fraction", self.neutral_aqi_fraction)?;

        let invalid = |reason: String| ConfigError::InvalidBands {
            section: "resilience.grades",
            reason,
        };
        if self.grades.is_empty() {
            return Err(invalid("at least one grade band is required".to_string()));
        }
        for pair in self.grades.windows(2) {
            if pair[1].grade <= pair[0].grade {
                return Err(invalid(format!(
                    "grade {:?} must follow {:?} in worsening order",
                    pair[1].grade, pair[0].grade
                )));
            }
            if !(pair[1].min_score < pair[0].min_score) {
                return Err(invalid(format!(
                    "grade {:?} threshold must be below {:?}",
                    pair[1].grade, pair[0].grade
                )));
            }
        }
        match self.grades.last() {
            Some(last) if last.min_score <= 0.0 => Ok(()),
            _ => Err(invalid("lowest grade must start at 0 so every score is graded".to_string())),
        }
    }
}

// ============================================================================
// Urban canyon (sky view factor)
// ============================================================================

/// Sky-view-factor model for night-time heat retention
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CanyonConfig {
    /// Building density (per km²) at which the open-sky fraction reaches zero
    pub density_scale: f64,

    /// Sky view factor of the densest canyon
    pub min_sky_view_factor: f64,

    /// Long-wave heat trapped (°C) when no sky is visible
    pub max_trapped_heat_c: f64,
}

impl Default for CanyonConfig {
    fn default() -> Self {
        Self {
            density_scale: 1000.0,
            min_sky_view_factor: 0.12,
            max_trapped_heat_c: 6.5,
        }
    }
}

impl CanyonConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("canyon.density_scale", self.density_scale)?;
        check_fraction("canyon.min_sky_view_factor", self.min_sky_view_factor)?;
        check_non_negative("canyon.max_trapped_heat_c", self.max_trapped_heat_c)
    }
}
