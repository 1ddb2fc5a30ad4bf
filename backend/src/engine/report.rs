//! Plan reports and the regional aggregate

use serde::{Deserialize, Serialize};

use crate::economics::EconomicOutcome;
use crate::health::{RiskAssessment, RiskCategory};
use crate::optimizer::Recommendation;
use crate::resilience::ResilienceGrade;
use crate::thermal::{SimulationResult, SkyViewAssessment};

/// Everything the engine derives for one sector and target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorReport {
    pub sector: String,
    pub recommendation: Recommendation,

    /// Recommended mix re-simulated with the sector's AQI forcing
    pub pollution_adjusted: Option<SimulationResult>,

    /// Amount (°C) by which pollution forcing pushes the planned sector
    /// back above target plus tolerance (0 when AQI is unknown)
    pub pollution_unmet_c: f64,

    pub risk_before: RiskAssessment,
    pub risk_after: RiskAssessment,
    pub economics: EconomicOutcome,
    pub resilience: ResilienceGrade,

    /// Night-time canyon effect, when building density is known
    pub sky_view: Option<SkyViewAssessment>,
}

impl SectorReport {
    /// True only when the target holds with and without pollution forcing
    pub fn is_feasible(&self) -> bool {
        self.recommendation.is_feasible() && self.pollution_unmet_c == 0.0
    }

    /// Largest shortfall against the target (°C)
    pub fn unmet_delta_c(&self) -> f64 {
        self.recommendation.unmet_delta_c.max(self.pollution_unmet_c)
    }
}

/// Aggregate of independent sector plans against one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalSummary {
    pub target_temp_c: f64,
    pub reports: Vec<SectorReport>,

    pub total_capital_cost: f64,
    pub total_co2_tons: f64,
    pub total_credit_value: f64,
    pub total_v2g_energy_mwh: f64,
    pub total_water_saved_liters: f64,

    /// Sectors whose target could not be reached, pollution included
    pub infeasible_sectors: usize,

    /// Most severe post-mitigation category (None for an empty region)
    pub worst_risk_after: Option<RiskCategory>,
}

impl RegionalSummary {
    pub fn new(target_temp_c: f64) -> Self {
        Self {
            target_temp_c,
            reports: Vec::new(),
            total_capital_cost: 0.0,
            total_co2_tons: 0.0,
            total_credit_value: 0.0,
            total_v2g_energy_mwh: 0.0,
            total_water_saved_liters: 0.0,
            infeasible_sectors: 0,
            worst_risk_after: None,
        }
    }

    /// Fold one sector report into the totals
    pub fn add(&mut self, report: SectorReport) {
        self.total_capital_cost += report.recommendation.cost.capital_cost;
        self.total_co2_tons += report.economics.co2_tons;
        self.total_credit_value += report.economics.credit_value;
        self.total_v2g_energy_mwh += report.economics.v2g_energy_mwh;
        self.total_water_saved_liters += report.economics.water_saved_liters;
        if !report.is_feasible() {
            self.infeasible_sectors += 1;
        }
        self.worst_risk_after = self.worst_risk_after.max(Some(report.risk_after.category));
        self.reports.push(report);
    }
}
