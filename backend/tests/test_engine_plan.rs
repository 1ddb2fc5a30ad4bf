//! End-to-end plans: recommend → re-simulate → fan out to risk, economics,
//! resilience and canyon assessment.

use heat_mitigation_core_rs::catalog::{find_sector, punjab_sectors};
use heat_mitigation_core_rs::{MitigationEngine, RiskCategory, SectorProfile};

#[test]
fn test_ludhiana_plan() {
    let engine = MitigationEngine::with_defaults();
    let ludhiana = find_sector("Ludhiana").unwrap().unwrap();
    let report = engine.plan(&ludhiana, 31.0).unwrap();

    assert_eq!(report.sector, "Ludhiana");
    assert!(report.recommendation.is_feasible());
    assert!(report.recommendation.cost.capital_cost > 0.0);

    // Baseline 47.1 °C at 44% humidity is severe; the plan brings it down.
    assert_eq!(report.risk_before.category, RiskCategory::Severe);
    assert!(report.risk_after.category < report.risk_before.category);

    // Economics are valued on the intervention cooling.
    let delta = report.recommendation.projected.delta_c;
    assert!((report.economics.co2_tons - delta * 485.0).abs() < 1e-6);
    assert!((report.economics.v2g_energy_mwh - 189.6).abs() < 1e-9);

    // AQI 168 adds forcing on top of the projected temperature.
    let adjusted = report.pollution_adjusted.unwrap();
    assert!((adjusted.pollution_forcing_c - 0.68).abs() < 1e-9);
    assert!(adjusted.mitigated_temp_c > report.recommendation.projected.mitigated_temp_c);
    assert_eq!(report.pollution_unmet_c, 0.0);
    assert!(report.is_feasible());

    let sky_view = report.sky_view.unwrap();
    assert!(sky_view.trapped_heat_c > 0.0);
}

#[test]
fn test_pollution_forcing_can_miss_a_met_target() {
    let engine = MitigationEngine::with_defaults();
    let ludhiana = find_sector("Ludhiana").unwrap().unwrap();
    let report = engine.plan(&ludhiana, 29.5).unwrap();

    // Full coverage reaches ~28.95 °C, but AQI 168 adds 0.68 °C on top.
    assert!(report.recommendation.is_feasible());
    assert!(report.recommendation.projected.mitigated_temp_c <= 29.5);
    let adjusted = report.pollution_adjusted.unwrap().mitigated_temp_c;
    assert!(adjusted > 29.5 + engine.config().optimizer.tolerance_c);

    assert!(!report.is_feasible());
    assert!((report.pollution_unmet_c - (adjusted - 29.5)).abs() < 1e-12);
    assert_eq!(report.unmet_delta_c(), report.pollution_unmet_c);

    let summary = engine.plan_region(&[ludhiana], 29.5).unwrap();
    assert_eq!(summary.infeasible_sectors, 1);
}

#[test]
fn test_sector_below_floor_plans_at_zero_cost() {
    let engine = MitigationEngine::with_defaults();
    let cool = SectorProfile::new("Cool", 20.0, 0.3, 50.0).unwrap();
    let report = engine.plan(&cool, 19.9).unwrap();

    assert!(report.recommendation.mix.is_none());
    assert_eq!(report.recommendation.cost.capital_cost, 0.0);
    assert!(!report.is_feasible());
    assert_eq!(report.economics.co2_tons, 0.0);
}

#[test]
fn test_plan_at_baseline_changes_nothing() {
    let engine = MitigationEngine::with_defaults();
    let sector = SectorProfile::new("Patiala", 43.5, 0.48, 160.0)
        .unwrap()
        .with_ev_fleet(9_800);
    let report = engine.plan(&sector, 43.5).unwrap();

    assert!(report.recommendation.mix.is_none());
    assert_eq!(report.risk_before, report.risk_after);
    assert_eq!(report.economics.co2_tons, 0.0);
    assert_eq!(report.economics.v2g_energy_mwh, 0.0);
}

#[test]
fn test_region_aggregates_every_sector() {
    let engine = MitigationEngine::with_defaults();
    let sectors = punjab_sectors().unwrap();
    let summary = engine.plan_region(&sectors, 31.0).unwrap();

    assert_eq!(summary.reports.len(), sectors.len());
    let cost: f64 = summary
        .reports
        .iter()
        .map(|r| r.recommendation.cost.capital_cost)
        .sum();
    assert!((summary.total_capital_cost - cost).abs() < 1e-3);

    let co2: f64 = summary.reports.iter().map(|r| r.economics.co2_tons).sum();
    assert!((summary.total_co2_tons - co2).abs() < 1e-6);

    let worst = summary.reports.iter().map(|r| r.risk_after.category).max();
    assert_eq!(summary.worst_risk_after, worst);
}

#[test]
fn test_region_counts_infeasible_sectors() {
    let engine = MitigationEngine::with_defaults();
    let sectors = punjab_sectors().unwrap();
    let summary = engine.plan_region(&sectors, 20.0).unwrap();

    // 20 °C is under the physical floor everywhere.
    assert_eq!(summary.infeasible_sectors, sectors.len());
    assert!(summary.reports.iter().all(|r| r.recommendation.unmet_delta_c > 0.0));
    assert!(summary.reports.iter().all(|r| !r.is_feasible()));
}

#[test]
fn test_empty_region() {
    let engine = MitigationEngine::with_defaults();
    let summary = engine.plan_region(&[], 31.0).unwrap();
    assert!(summary.reports.is_empty());
    assert_eq!(summary.worst_risk_after, None);
    assert_eq!(summary.total_capital_cost, 0.0);
}

#[test]
fn test_region_rejects_nan_target() {
    let engine = MitigationEngine::with_defaults();
    let sectors = punjab_sectors().unwrap();
    assert!(engine.plan_region(&sectors, f64::NAN).is_err());
}

#[test]
fn test_parallel_sectors_match_sequential() {
    let engine = MitigationEngine::with_defaults();
    let sectors = punjab_sectors().unwrap();

    let sequential: Vec<_> = sectors.iter().map(|s| engine.plan(s, 32.0).unwrap()).collect();
    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = sectors
            .iter()
            .map(|s| {
                let engine = &engine;
                scope.spawn(move || engine.plan(s, 32.0).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
}

#[test]
fn test_report_serializes_to_json() {
    let engine = MitigationEngine::with_defaults();
    let ludhiana = find_sector("Ludhiana").unwrap().unwrap();
    let report = engine.plan(&ludhiana, 31.0).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["sector"], "Ludhiana");
    assert_eq!(json["risk_before"]["category"], "SEVERE");
    assert!(json["economics"]["water_saved_liters"].as_f64().unwrap() > 0.0);
}
