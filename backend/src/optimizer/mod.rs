//! Intervention Optimizer - inverse model
//!
//! Target temperature + sector → recommended intervention mix and its cost.
//!
//! # Allocation Policy (closed form, no search)
//!
//! ```text
//! delta_needed = max(0, baseline - max(target, floor))
//! albedo       = clamp(delta_needed * albedo_allocation_ratio, 0, 1)
//! green        = clamp((delta_needed - albedo * albedo_overlap_factor) / green_cooling_c, 0, 1)
//! ```
//!
//! Albedo is allocated first because reflective coating is cheaper and
//! faster to deploy. The overlap factor keeps albedo's cooling from being
//! counted twice when sizing green cover.
//!
//! # Residual Pass
//!
//! The allocation ignores humidity, so the mix is re-simulated. If it still
//! misses the target, green cover and then albedo are raised to the exact
//! coverage that closes the gap under the sector's humidity efficiency.
//!
//! # Infeasibility
//!
//! When the capped mix cannot reach the target, the recommendation carries
//! the achievable mix and the unmet residual (°C). Infeasibility is a
//! normal planning outcome, not an error. Cooling is only sized down to
//! the temperature floor: a sector at or below the floor gets the zero mix
//! at zero cost, and a target under the floor is reported as unmet.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::{CostRates, OptimizerConfig, ThermalConfig};
use crate::core::validation::{self, ValidationError};
use crate::models::{CostEstimate, InterventionMix, SectorProfile};
use crate::thermal::{SimulationResult, ThermalSimulator};

/// Recommended mix for one sector and target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub target_temp_c: f64,

    /// `max(0, baseline - max(target, floor))`
    pub delta_needed_c: f64,

    /// Achievable mix, each channel in [0, 1]
    pub mix: InterventionMix,

    pub cost: CostEstimate,

    /// Re-simulation of `mix` for the sector (no pollution forcing)
    pub projected: SimulationResult,

    /// Cooling still missing after deploying `mix` (°C)
    ///
    /// Zero whenever the projection lands within tolerance of the target.
    pub unmet_delta_c: f64,
}

impl Recommendation {
    pub fn is_feasible(&self) -> bool {
        self.unmet_delta_c == 0.0
    }
}

/// Inverse model over borrowed coefficient sets
#[derive(Debug, Clone, Copy)]
pub struct InterventionOptimizer<'a> {
    thermal: &'a ThermalConfig,
    policy: &'a OptimizerConfig,
    costs: &'a CostRates,
}

impl<'a> InterventionOptimizer<'a> {
    pub fn new(thermal: &'a ThermalConfig, policy: &'a OptimizerConfig, costs: &'a CostRates) -> Self {
        Self {
            thermal,
            policy,
            costs,
        }
    }

    /// Closed-form split of `delta_needed` into albedo and green cover
    pub fn allocate(&self, delta_needed: f64) -> InterventionMix {
        let albedo = (delta_needed * self.policy.albedo_allocation_ratio).clamp(0.0, 1.0);
        let green = (delta_needed - albedo * self.policy.albedo_overlap_factor)
            / self.thermal.green_cooling_c;
        InterventionMix::clamped(albedo, green)
    }

    /// Recommend a mix that cools `profile` to `target_temp_c`
    ///
    /// # Errors
    ///
    /// `ValidationError` if `target_temp_c` is not finite.
    ///
    /// # Example
    /// ```
    /// use heat_mitigation_core_rs::{EngineConfig, InterventionOptimizer, SectorProfile};
    ///
    /// let config = EngineConfig::default();
    /// let optimizer = InterventionOptimizer::new(&config.thermal, &config.optimizer, &config.costs);
    /// let sector = SectorProfile::new("Ludhiana", 47.1, 0.44, 159.0).unwrap();
    ///
    /// let rec = optimizer.recommend(&sector, 31.0).unwrap();
    /// assert!(rec.is_feasible());
    /// assert!(rec.projected.mitigated_temp_c <= 31.0 + config.optimizer.tolerance_c);
    /// assert!(rec.cost.capital_cost > 0.0);
    /// ```
    pub fn recommend(
        &self,
        profile: &SectorProfile,
        target_temp_c: f64,
    ) -> Result<Recommendation, ValidationError> {
        let target_temp_c = validation::finite("target_temp_c", target_temp_c)?;
        let simulator = ThermalSimulator::new(self.thermal);
        let baseline = profile.baseline_temp_c();
        let humidity = profile.humidity();

        // Cooling below the floor is never bought; it cannot be delivered.
        let reachable_target = target_temp_c.max(self.thermal.temperature_floor_c);
        let delta_needed = (baseline - reachable_target).max(0.0);

        let (mix, projected, cost) = if delta_needed == 0.0 {
            let mix = InterventionMix::none();
            let projected = simulator.simulate(&mix, humidity, baseline)?;
            (mix, projected, CostEstimate::zero())
        } else {
            let mut mix = self.allocate(delta_needed);
            let mut projected = simulator.simulate(&mix, humidity, baseline)?;

            // Raw cooling the mix must supply once humidity is accounted for.
            let required_potential = delta_needed / simulator.efficiency(humidity);

            if self.misses(&projected, reachable_target) && mix.green_cover < 1.0 {
                let green_needed = (required_potential
                    - mix.albedo_coverage * self.thermal.albedo_cooling_c)
                    / self.thermal.green_cooling_c;
                mix = InterventionMix::clamped(mix.albedo_coverage, green_needed.max(mix.green_cover));
                projected = simulator.simulate(&mix, humidity, baseline)?;
            }

            if self.misses(&projected, reachable_target) && mix.albedo_coverage < 1.0 {
                let albedo_needed = (required_potential
                    - mix.green_cover * self.thermal.green_cooling_c)
                    / self.thermal.albedo_cooling_c;
                mix = InterventionMix::clamped(albedo_needed.max(mix.albedo_coverage), mix.green_cover);
                projected = simulator.simulate(&mix, humidity, baseline)?;
            }

            let cost = CostEstimate::for_mix(&mix, profile.area_km2(), self.costs);
            (mix, projected, cost)
        };

        let unmet_delta_c = if self.misses(&projected, target_temp_c) {
            projected.mitigated_temp_c - target_temp_c
        } else {
            0.0
        };

        if unmet_delta_c > 0.0 {
            warn!(
                "{}: target {:.1}°C unreachable, best {:.2}°C leaves {:.2}°C unmet",
                profile.name(),
                target_temp_c,
                projected.mitigated_temp_c,
                unmet_delta_c
            );
        } else {
            debug!(
                "{}: albedo {:.3}, green {:.3} reach {:.2}°C for {:.0}",
                profile.name(),
                mix.albedo_coverage,
                mix.green_cover,
                projected.mitigated_temp_c,
                cost.capital_cost
            );
        }

        Ok(Recommendation {
            target_temp_c,
            delta_needed_c: delta_needed,
            mix,
            cost,
            projected,
            unmet_delta_c,
        })
    }

    fn misses(&self, projected: &SimulationResult, target_temp_c: f64) -> bool {
        projected.mitigated_temp_c > target_temp_c + self.policy.tolerance_c
    }
}
