//! Engine - validated configuration plus every decision operation
//!
//! `MitigationEngine` is the single entry point for callers. It owns a
//! validated [`EngineConfig`] and hands borrowed slices of it to each
//! component. The engine holds no other state, so one instance can be
//! shared across threads and reused for every request.
//!
//! # Control Flow
//!
//! ```text
//! SectorProfile ─┬─ mix ────► ThermalSimulator ──────────────┐
//!                └─ target ─► InterventionOptimizer ─► mix ──┤
//!                                                           ▼
//!                         HealthRiskClassifier / EconomicValuator / ResilienceScorer
//! ```

pub mod report;

use log::{debug, info, warn};

use crate::config::{ConfigError, EngineConfig};
use crate::core::validation::{self, ValidationError};
use crate::economics::{EconomicOutcome, EconomicValuator};
use crate::health::{HealthRiskClassifier, RiskAssessment};
use crate::models::{InterventionMix, SectorProfile};
use crate::optimizer::{InterventionOptimizer, Recommendation};
use crate::resilience::{ResilienceGrade, ResilienceScorer};
use crate::thermal::{assess_sky_view, SimulationResult, SkyViewAssessment, ThermalSimulator};

pub use report::{RegionalSummary, SectorReport};

/// Stateless decision engine over a validated configuration
///
/// # Example
/// ```
/// use heat_mitigation_core_rs::{MitigationEngine, SectorProfile};
///
/// let engine = MitigationEngine::with_defaults();
/// let sector = SectorProfile::new("Ludhiana", 47.1, 0.44, 159.0).unwrap().with_ev_fleet(15_800);
///
/// let report = engine.plan(&sector, 31.0).unwrap();
/// assert!(report.recommendation.is_feasible());
/// assert!(report.risk_after.category <= report.risk_before.category);
/// ```
#[derive(Debug, Clone)]
pub struct MitigationEngine {
    config: EngineConfig,
}

impl MitigationEngine {
    /// Build an engine, validating the configuration first
    ///
    /// # Errors
    ///
    /// `ConfigError` if any coefficient or band is invalid. No engine is
    /// built from a bad configuration.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            "mitigation engine ready: floor {}°C, index {}",
            config.thermal.temperature_floor_c,
            config.health.formula.name()
        );
        Ok(Self { config })
    }

    /// Engine over the built-in default coefficients
    pub fn with_defaults() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn thermal(&self) -> ThermalSimulator<'_> {
        ThermalSimulator::new(&self.config.thermal)
    }

    pub fn optimizer(&self) -> InterventionOptimizer<'_> {
        InterventionOptimizer::new(&self.config.thermal, &self.config.optimizer, &self.config.costs)
    }

    pub fn health(&self) -> HealthRiskClassifier<'_> {
        HealthRiskClassifier::new(&self.config.health)
    }

    pub fn economics(&self) -> EconomicValuator<'_> {
        EconomicValuator::new(&self.config.economics)
    }

    pub fn resilience(&self) -> ResilienceScorer<'_> {
        ResilienceScorer::new(&self.config.resilience)
    }

    /// Forward model without pollution forcing
    pub fn simulate(
        &self,
        mix: &InterventionMix,
        humidity: f64,
        baseline_temp_c: f64,
    ) -> Result<SimulationResult, ValidationError> {
        self.thermal().simulate(mix, humidity, baseline_temp_c)
    }

    /// Forward model for a sector, including its AQI forcing when known
    pub fn simulate_sector(
        &self,
        profile: &SectorProfile,
        mix: &InterventionMix,
    ) -> Result<SimulationResult, ValidationError> {
        self.thermal()
            .simulate_with_aqi(mix, profile.humidity(), profile.baseline_temp_c(), profile.aqi())
    }

    pub fn recommend(
        &self,
        profile: &SectorProfile,
        target_temp_c: f64,
    ) -> Result<Recommendation, ValidationError> {
        self.optimizer().recommend(profile, target_temp_c)
    }

    pub fn classify(&self, temp_c: f64, humidity: f64) -> Result<RiskAssessment, ValidationError> {
        self.health().classify(temp_c, humidity)
    }

    pub fn valuate(
        &self,
        delta_c: f64,
        profile: &SectorProfile,
    ) -> Result<EconomicOutcome, ValidationError> {
        self.economics().valuate(delta_c, profile)
    }

    pub fn score(
        &self,
        mix: &InterventionMix,
        aqi: Option<f64>,
    ) -> Result<ResilienceGrade, ValidationError> {
        self.resilience().score(mix, aqi)
    }

    pub fn sky_view(&self, building_density: f64) -> Result<SkyViewAssessment, ValidationError> {
        assess_sky_view(building_density, &self.config.canyon)
    }

    /// End-to-end plan for one sector
    ///
    /// Recommends a mix for `target_temp_c`, then fans the projected
    /// temperature out to risk, economics and resilience. Economics are
    /// valued on the cooling the interventions deliver; risk after
    /// mitigation uses the pollution-adjusted temperature when AQI is known,
    /// and a pollution-adjusted temperature above the target makes the
    /// report infeasible even when the recommendation alone is met.
    pub fn plan(
        &self,
        profile: &SectorProfile,
        target_temp_c: f64,
    ) -> Result<SectorReport, ValidationError> {
        let recommendation = self.recommend(profile, target_temp_c)?;

        let pollution_adjusted = match profile.aqi() {
            Some(_) => Some(self.simulate_sector(profile, &recommendation.mix)?),
            None => None,
        };
        let before = self.simulate_sector(profile, &InterventionMix::none())?;
        let after_temp_c = pollution_adjusted
            .as_ref()
            .map_or(recommendation.projected.mitigated_temp_c, |r| r.mitigated_temp_c);

        let tolerance = self.config.optimizer.tolerance_c;
        let pollution_unmet_c = match &pollution_adjusted {
            Some(adjusted) if adjusted.mitigated_temp_c > recommendation.target_temp_c + tolerance => {
                adjusted.mitigated_temp_c - recommendation.target_temp_c
            }
            _ => 0.0,
        };
        if pollution_unmet_c > 0.0 && recommendation.is_feasible() {
            warn!(
                "{}: pollution forcing of {:.2}°C leaves target {:.1}°C unmet by {:.2}°C",
                profile.name(),
                pollution_adjusted.as_ref().map_or(0.0, |r| r.pollution_forcing_c),
                recommendation.target_temp_c,
                pollution_unmet_c
            );
        }

        let risk_before = self.classify(before.mitigated_temp_c, profile.humidity())?;
        let risk_after = self.classify(after_temp_c, profile.humidity())?;
        let economics = self.valuate(recommendation.projected.delta_c, profile)?;
        let resilience = self.score(&recommendation.mix, profile.aqi())?;
        let sky_view = profile
            .building_density()
            .map(|density| self.sky_view(density))
            .transpose()?;

        debug!(
            "{}: planned {:.2}°C → {:.2}°C, risk {} → {}",
            profile.name(),
            profile.baseline_temp_c(),
            after_temp_c,
            risk_before.category,
            risk_after.category
        );

        Ok(SectorReport {
            sector: profile.name().to_string(),
            recommendation,
            pollution_adjusted,
            pollution_unmet_c,
            risk_before,
            risk_after,
            economics,
            resilience,
            sky_view,
        })
    }

    /// Plan every sector against one target and aggregate the results
    ///
    /// Sectors are independent; order of `profiles` is preserved in the
    /// summary's reports.
    pub fn plan_region(
        &self,
        profiles: &[SectorProfile],
        target_temp_c: f64,
    ) -> Result<RegionalSummary, ValidationError> {
        let target_temp_c = validation::finite("target_temp_c", target_temp_c)?;
        let mut summary = RegionalSummary::new(target_temp_c);
        for profile in profiles {
            summary.add(self.plan(profile, target_temp_c)?);
        }
        info!(
            "regional plan: {} sectors, {} infeasible, capital cost {:.0}",
            summary.reports.len(),
            summary.infeasible_sectors,
            summary.total_capital_cost
        );
        Ok(summary)
    }
}

impl Default for MitigationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
