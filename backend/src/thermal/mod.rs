//! Thermal Simulator - forward model
//!
//! Intervention mix + humidity + baseline → mitigated temperature.
//!
//! # Model
//!
//! ```text
//! cooling_potential = green * green_cooling_c + albedo * albedo_cooling_c
//! efficiency        = 1 - humidity * humidity_penalty
//! mitigated         = max(baseline - cooling_potential * efficiency, floor)
//! ```
//!
//! Evaporative cooling loses effectiveness as ambient moisture rises, so the
//! humidity penalty scales the whole cooling potential.
//!
//! Pollution forcing (see [`ThermalSimulator::simulate_with_aqi`]) is added
//! *after* the floor clamp. It is an independent warming term, never a
//! multiplier on the mitigation.
//!
//! # Critical Invariants
//!
//! - Mitigated temperature never drops below the configured floor
//! - Non-increasing in both coverage channels
//! - Non-decreasing in humidity
//! - Inputs are validated, never clamped

pub mod canyon;

use serde::{Deserialize, Serialize};

use crate::config::ThermalConfig;
use crate::core::validation::{self, ValidationError};
use crate::models::InterventionMix;

pub use canyon::{assess_sky_view, SkyViewAssessment};

/// Outcome of one forward simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub baseline_temp_c: f64,
    pub mitigated_temp_c: f64,

    /// `baseline_temp_c - mitigated_temp_c`
    ///
    /// Negative when pollution forcing outweighs mitigation, or when the
    /// baseline sits below the floor.
    pub delta_c: f64,

    /// Warming added by pollution forcing (0 without AQI input)
    pub pollution_forcing_c: f64,
}

/// Forward thermal model over a borrowed coefficient set
#[derive(Debug, Clone, Copy)]
pub struct ThermalSimulator<'a> {
    config: &'a ThermalConfig,
}

impl<'a> ThermalSimulator<'a> {
    pub fn new(config: &'a ThermalConfig) -> Self {
        Self { config }
    }

    /// Raw cooling (°C) a mix could deliver in dry air
    pub fn cooling_potential(&self, mix: &InterventionMix) -> f64 {
        mix.green_cover * self.config.green_cooling_c
            + mix.albedo_coverage * self.config.albedo_cooling_c
    }

    /// Share of the cooling potential realised at `humidity`
    ///
    /// Always positive: the penalty coefficient is validated below 1.0.
    pub fn efficiency(&self, humidity: f64) -> f64 {
        1.0 - humidity * self.config.humidity_penalty
    }

    /// Extra warming (°C) from aerosols above the AQI baseline
    pub fn pollution_forcing(&self, aqi: f64) -> f64 {
        (aqi - self.config.aqi_baseline).max(0.0) * self.config.heat_blanket_c_per_aqi
    }

    /// Simulate the mitigated temperature of a mix
    ///
    /// # Errors
    ///
    /// `ValidationError` if a coverage fraction or `humidity` is outside
    /// [0, 1], or `baseline_temp_c` is not a positive finite number.
    ///
    /// # Example
    /// ```
    /// use heat_mitigation_core_rs::{InterventionMix, ThermalConfig, ThermalSimulator};
    ///
    /// let config = ThermalConfig::default();
    /// let simulator = ThermalSimulator::new(&config);
    ///
    /// let mix = InterventionMix::new(0.5, 0.5).unwrap();
    /// let result = simulator.simulate(&mix, 0.0, 47.1).unwrap();
    ///
    /// // (0.5 * 11.5 + 0.5 * 9.2) * 1.0 = 10.35 °C of cooling
    /// assert!((result.mitigated_temp_c - 36.75).abs() < 1e-9);
    /// ```
    pub fn simulate(
        &self,
        mix: &InterventionMix,
        humidity: f64,
        baseline_temp_c: f64,
    ) -> Result<SimulationResult, ValidationError> {
        mix.validate()?;
        let humidity = validation::fraction("humidity", humidity)?;
        let baseline_temp_c = validation::positive("baseline_temp_c", baseline_temp_c)?;

        let raw = baseline_temp_c - self.cooling_potential(mix) * self.efficiency(humidity);
        // The floor bounds every output, including a baseline already below it.
        let mitigated_temp_c = raw.max(self.config.temperature_floor_c);

        Ok(SimulationResult {
            baseline_temp_c,
            mitigated_temp_c,
            delta_c: baseline_temp_c - mitigated_temp_c,
            pollution_forcing_c: 0.0,
        })
    }

    /// Simulate with optional pollution forcing applied after mitigation
    ///
    /// `aqi = None` is identical to [`simulate`](Self::simulate).
    pub fn simulate_with_aqi(
        &self,
        mix: &InterventionMix,
        humidity: f64,
        baseline_temp_c: f64,
        aqi: Option<f64>,
    ) -> Result<SimulationResult, ValidationError> {
        let mut result = self.simulate(mix, humidity, baseline_temp_c)?;
        if let Some(aqi) = aqi {
            let forcing = self.pollution_forcing(validation::non_negative("aqi", aqi)?);
            result.mitigated_temp_c += forcing;
            result.delta_c = result.baseline_temp_c - result.mitigated_temp_c;
            result.pollution_forcing_c = forcing;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_no_intervention_keeps_baseline() {
        let config = ThermalConfig::default();
        let result = ThermalSimulator::new(&config)
            .simulate(&InterventionMix::none(), 0.44, 47.1)
            .unwrap();
        assert_eq!(result.mitigated_temp_c, 47.1);
        assert_eq!(result.delta_c, 0.0);
    }

    #[test]
    fn test_humidity_penalty_reduces_cooling() {
        let config = ThermalConfig::default();
        let sim = ThermalSimulator::new(&config);
        let mix = InterventionMix::new(0.2, 0.3).unwrap();

        let dry = sim.simulate(&mix, 0.0, 45.0).unwrap();
        let humid = sim.simulate(&mix, 1.0, 45.0).unwrap();

        // cooling = 0.2 * 9.2 + 0.3 * 11.5 = 5.29
        assert!(approx(dry.delta_c, 5.29));
        assert!(approx(humid.delta_c, 5.29 * 0.72));
    }

    #[test]
    fn test_floor_clamps_aggressive_mix() {
        let config = ThermalConfig::default();
        let result = ThermalSimulator::new(&config)
            .simulate(&InterventionMix::new(1.0, 1.0).unwrap(), 0.0, 30.0)
            .unwrap();
        assert_eq!(result.mitigated_temp_c, 21.5);
        assert!(approx(result.delta_c, 8.5));
    }

    #[test]
    fn test_baseline_below_floor_reports_floor() {
        let config = ThermalConfig::default();
        let sim = ThermalSimulator::new(&config);

        let full = sim.simulate(&InterventionMix::new(1.0, 1.0).unwrap(), 0.0, 18.0).unwrap();
        assert_eq!(full.mitigated_temp_c, 21.5);
        assert!(approx(full.delta_c, -3.5));

        let untouched = sim.simulate(&InterventionMix::none(), 0.5, 18.0).unwrap();
        assert_eq!(untouched.mitigated_temp_c, 21.5);
    }

    #[test]
    fn test_out_of_range_humidity_is_rejected() {
        let config = ThermalConfig::default();
        let err = ThermalSimulator::new(&config)
            .simulate(&InterventionMix::none(), 44.0, 47.1)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::FractionOutOfRange {
                field: "humidity",
                value: 44.0
            }
        );
    }

    #[test]
    fn test_pollution_forcing_is_additive_after_mitigation() {
        let config = ThermalConfig::default();
        let sim = ThermalSimulator::new(&config);
        let mix = InterventionMix::new(0.4, 0.4).unwrap();

        let clean = sim.simulate(&mix, 0.44, 47.1).unwrap();
        let smoggy = sim.simulate_with_aqi(&mix, 0.44, 47.1, Some(300.0)).unwrap();

        assert!(approx(smoggy.pollution_forcing_c, 2.0));
        assert!(approx(smoggy.mitigated_temp_c, clean.mitigated_temp_c + 2.0));
    }

    #[test]
    fn test_pollution_below_baseline_adds_nothing() {
        let config = ThermalConfig::default();
        let sim = ThermalSimulator::new(&config);
        let mix = InterventionMix::new(0.4, 0.4).unwrap();

        let clean = sim.simulate(&mix, 0.44, 47.1).unwrap();
        let fine = sim.simulate_with_aqi(&mix, 0.44, 47.1, Some(60.0)).unwrap();
        assert_eq!(clean, fine);
    }

    #[test]
    fn test_forcing_can_make_delta_negative() {
        let config = ThermalConfig::default();
        let result = ThermalSimulator::new(&config)
            .simulate_with_aqi(&InterventionMix::none(), 0.4, 44.8, Some(250.0))
            .unwrap();
        assert!(result.delta_c < 0.0);
    }
}
