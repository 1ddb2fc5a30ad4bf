//! Configuration Schema Documentation
//!
//! Self-documenting schema for every tunable coefficient. Default values are
//! read from the `Default` impls, so the documentation cannot drift from the
//! code. Exported as JSON for the CLI command `heat-plan config-schema`.

use serde::{Deserialize, Serialize};

use super::sections::{
    CanyonConfig, CostRates, EconomicRates, HealthConfig, OptimizerConfig, ResilienceConfig,
    ThermalConfig,
};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Component a coefficient belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CoefficientCategory {
    Thermal,
    Optimizer,
    Cost,
    Health,
    Economic,
    Resilience,
    Canyon,
}

/// Documentation for a single coefficient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoefficientElement {
    /// Dotted config key (e.g., "thermal.humidity_penalty")
    pub name: String,

    /// Human-readable display name
    pub display_name: String,

    pub category: CoefficientCategory,

    /// What this coefficient represents
    pub description: String,

    /// Formula the coefficient appears in (plain text)
    pub formula: String,

    pub default_value: String,

    pub unit: String,
}

/// Complete configuration schema documentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSchemaDoc {
    pub version: String,
    pub coefficients: Vec<CoefficientElement>,
}

/// Types that can describe their own coefficients
pub trait ConfigSchemaDocumented {
    fn schema_docs() -> Vec<CoefficientElement>;
}

fn element(
    name: &str,
    display_name: &str,
    category: CoefficientCategory,
    unit: &str,
    default_value: impl ToString,
    formula: &str,
    description: &str,
) -> CoefficientElement {
    CoefficientElement {
        name: name.to_string(),
        display_name: display_name.to_string(),
        category,
        description: description.to_string(),
        formula: formula.to_string(),
        default_value: default_value.to_string(),
        unit: unit.to_string(),
    }
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl ConfigSchemaDocumented for ThermalConfig {
    fn schema_docs() -> Vec<CoefficientElement> {
        use CoefficientCategory::Thermal;
        let d = ThermalConfig::default();
        let cooling = "mitigated = baseline - (green * green_cooling_c + albedo * albedo_cooling_c) * (1 - humidity * humidity_penalty)";
        vec![
            element(
                "thermal.green_cooling_c",
                "Green Cover Cooling",
                Thermal,
                "°C per unit cover",
                d.green_cooling_c,
                cooling,
                "Evapotranspirative cooling delivered by full vegetative canopy.",
            ),
            element(
                "thermal.albedo_cooling_c",
                "Albedo Cooling",
                Thermal,
                "°C per unit coverage",
                d.albedo_cooling_c,
                cooling,
                "Radiative cooling from reflecting short-wave radiation before it heats asphalt.",
            ),
            element(
                "thermal.humidity_penalty",
                "Humidity Penalty",
                Thermal,
                "dimensionless, [0, 1)",
                d.humidity_penalty,
                "efficiency = 1 - humidity * humidity_penalty",
                "Loss of evaporative cooling efficiency as ambient moisture rises.",
            ),
            element(
                "thermal.temperature_floor_c",
                "Temperature Floor",
                Thermal,
                "°C",
                d.temperature_floor_c,
                "mitigated = max(mitigated, temperature_floor_c)",
                "Minimum plausible ambient temperature. Every simulated temperature is clamped up to it, and the optimizer never buys cooling below it.",
            ),
            element(
                "thermal.aqi_baseline",
                "Pollution Forcing Baseline",
                Thermal,
                "AQI",
                d.aqi_baseline,
                "forcing = max(0, aqi - aqi_baseline) * heat_blanket_c_per_aqi",
                "Air-quality level above which aerosols trap additional heat.",
            ),
            element(
                "thermal.heat_blanket_c_per_aqi",
                "Heat Blanket Forcing",
                Thermal,
                "°C per AQI point",
                d.heat_blanket_c_per_aqi,
                "forcing = max(0, aqi - aqi_baseline) * heat_blanket_c_per_aqi",
                "Warming added after mitigation for each AQI point above the baseline.",
            ),
        ]
    }
}

impl ConfigSchemaDocumented for OptimizerConfig {
    fn schema_docs() -> Vec<CoefficientElement> {
        use CoefficientCategory::Optimizer;
        let d = OptimizerConfig::default();
        vec![
            element(
                "optimizer.albedo_allocation_ratio",
                "Albedo Allocation Ratio",
                Optimizer,
                "coverage per °C",
                d.albedo_allocation_ratio,
                "albedo = clamp(delta_needed * albedo_allocation_ratio, 0, 1)",
                "Share of the cooling need assigned first to the cheaper, faster reflective channel.",
            ),
            element(
                "optimizer.albedo_overlap_factor",
                "Albedo Overlap Factor",
                Optimizer,
                "°C per unit coverage, < 1",
                d.albedo_overlap_factor,
                "green = clamp((delta_needed - albedo * albedo_overlap_factor) / green_cooling_c, 0, 1)",
                "Cooling credited to albedo before green cover is sized, avoiding double counting.",
            ),
            element(
                "optimizer.tolerance_c",
                "Target Tolerance",
                Optimizer,
                "°C",
                d.tolerance_c,
                "feasible when projected <= target + tolerance_c",
                "Slack within which a projected temperature counts as reaching the target.",
            ),
        ]
    }
}

impl ConfigSchemaDocumented for CostRates {
    fn schema_docs() -> Vec<CoefficientElement> {
        use CoefficientCategory::Cost;
        let d = CostRates::default();
        let formula = "capital_cost = area_km2 * (albedo * albedo_cost_per_km2 + green * green_cost_per_km2)";
        vec![
            element(
                "costs.albedo_cost_per_km2",
                "Albedo Unit Cost",
                Cost,
                "currency per km² per unit coverage",
                d.albedo_cost_per_km2,
                formula,
                "Capital cost of reflective cool-roof and pavement coating.",
            ),
            element(
                "costs.green_cost_per_km2",
                "Green Cover Unit Cost",
                Cost,
                "currency per km² per unit cover",
                d.green_cost_per_km2,
                formula,
                "Capital cost of planting and establishing vegetative canopy. Must exceed the albedo unit cost.",
            ),
        ]
    }
}

impl ConfigSchemaDocumented for HealthConfig {
    fn schema_docs() -> Vec<CoefficientElement> {
        use CoefficientCategory::Health;
        let d = HealthConfig::default();
        let thresholds: Vec<String> = d
            .bands
            .iter()
            .filter_map(|band| band.index_above.map(|t| format!("{:?}>{}", band.category, t)))
            .collect();
        vec![
            element(
                "health.formula",
                "Heat Stress Index Formula",
                Health,
                "policy",
                d.formula.name(),
                "simplified_heat_index: temp + 0.55 * (humidity * 100 - 55); wet_bulb_weighted: 0.7 * temp * humidity + 0.3 * temp",
                "Index policy used to band heat stress.",
            ),
            element(
                "health.bands",
                "Risk Bands",
                Health,
                "index value",
                thresholds.join(", "),
                "category = most severe band with index > index_above",
                "Ordered thresholds, advisories and safe-exposure budgets per category.",
            ),
        ]
    }
}

impl ConfigSchemaDocumented for EconomicRates {
    fn schema_docs() -> Vec<CoefficientElement> {
        use CoefficientCategory::Economic;
        let d = EconomicRates::default();
        let v2g = "v2g_energy_mwh = ev_fleet_size * battery_kwh_avg * discharge_fraction / 1000";
        vec![
            element(
                "economics.co2_tons_per_c",
                "CO₂ Avoided per Degree",
                Economic,
                "t CO₂e per °C",
                d.co2_tons_per_c,
                "co2_tons = delta_c * co2_tons_per_c",
                "Reduced HVAC emissions per degree of district-wide cooling.",
            ),
            element(
                "economics.carbon_price_per_ton",
                "Carbon Price",
                Economic,
                "currency per t CO₂e",
                d.carbon_price_per_ton,
                "credit_value = co2_tons * carbon_price_per_ton",
                "Market price of one carbon credit.",
            ),
            element(
                "economics.battery_kwh_avg",
                "Average Battery Capacity",
                Economic,
                "kWh per vehicle",
                d.battery_kwh_avg,
                v2g,
                "Usable battery capacity of an average fleet vehicle.",
            ),
            element(
                "economics.discharge_fraction",
                "Discharge Availability",
                Economic,
                "fraction",
                d.discharge_fraction,
                v2g,
                "Share of the fleet plugged in and available during a peak event.",
            ),
            element(
                "economics.v2g_price_per_mwh",
                "V2G Energy Price",
                Economic,
                "currency per MWh",
                d.v2g_price_per_mwh,
                "v2g_revenue = v2g_energy_mwh * v2g_price_per_mwh",
                "Price paid by the grid operator for peak discharge.",
            ),
            element(
                "economics.evapotranspiration_mm_per_c",
                "Evapotranspiration Saved",
                Economic,
                "mm per °C",
                d.evapotranspiration_mm_per_c,
                "water_saved_liters = delta_c * evapotranspiration_mm_per_c * area_km2 * 1e6",
                "Evaporative water loss avoided over the sector per degree of cooling.",
            ),
        ]
    }
}

impl ConfigSchemaDocumented for ResilienceConfig {
    fn schema_docs() -> Vec<CoefficientElement> {
        use CoefficientCategory::Resilience;
        let d = ResilienceConfig::default();
        let score = "score = albedo_weight * albedo + green_weight * green + aqi_weight * min(1, max(0, aqi_ceiling - aqi) / aqi_scale)";
        vec![
            element(
                "resilience.albedo_weight",
                "Albedo Weight",
                Resilience,
                "points",
                d.albedo_weight,
                score,
                "Score points for full albedo coverage.",
            ),
            element(
                "resilience.green_weight",
                "Green Cover Weight",
                Resilience,
                "points",
                d.green_weight,
                score,
                "Score points for full green cover.",
            ),
            element(
                "resilience.aqi_weight",
                "Air Quality Weight",
                Resilience,
                "points",
                d.aqi_weight,
                score,
                "Score points for clean air.",
            ),
            element(
                "resilience.aqi_ceiling",
                "AQI Ceiling",
                Resilience,
                "AQI",
                d.aqi_ceiling,
                score,
                "AQI at or above which air quality earns nothing.",
            ),
            element(
                "resilience.aqi_scale",
                "AQI Scale",
                Resilience,
                "AQI",
                d.aqi_scale,
                score,
                "Normaliser for the air-quality term.",
            ),
            element(
                "resilience.neutral_aqi_fraction",
                "Neutral AQI Credit",
                Resilience,
                "fraction",
                d.neutral_aqi_fraction,
                "aqi term = aqi_weight * neutral_aqi_fraction when AQI is unknown",
                "Credit given to sectors without air-quality telemetry.",
            ),
            element(
                "resilience.grades",
                "Grade Bands",
                Resilience,
                "score",
                d.grades
                    .iter()
                    .map(|g| format!("{:?}>={}", g.grade, g.min_score))
                    .collect::<Vec<_>>()
                    .join(", "),
                "grade = best band with score >= min_score",
                "Letter grades with advisory text.",
            ),
        ]
    }
}

impl ConfigSchemaDocumented for CanyonConfig {
    fn schema_docs() -> Vec<CoefficientElement> {
        use CoefficientCategory::Canyon;
        let d = CanyonConfig::default();
        vec![
            element(
                "canyon.density_scale",
                "Canyon Density Scale",
                Canyon,
                "buildings per km²",
                d.density_scale,
                "svf = max(1 - density / density_scale, min_sky_view_factor)",
                "Building density at which the open-sky fraction reaches zero.",
            ),
            element(
                "canyon.min_sky_view_factor",
                "Minimum Sky View Factor",
                Canyon,
                "fraction",
                d.min_sky_view_factor,
                "svf = max(1 - density / density_scale, min_sky_view_factor)",
                "Sky view of the densest urban canyon.",
            ),
            element(
                "canyon.max_trapped_heat_c",
                "Trapped Heat",
                Canyon,
                "°C",
                d.max_trapped_heat_c,
                "trapped_heat_c = (1 - svf) * max_trapped_heat_c",
                "Night-time long-wave heat retained when no sky is visible.",
            ),
        ]
    }
}

/// Generate complete coefficient documentation as a JSON string
pub fn get_config_schema() -> Result<String, serde_json::Error> {
    let mut coefficients = ThermalConfig::schema_docs();
    coefficients.extend(OptimizerConfig::schema_docs());
    coefficients.extend(CostRates::schema_docs());
    coefficients.extend(HealthConfig::schema_docs());
    coefficients.extend(EconomicRates::schema_docs());
    coefficients.extend(ResilienceConfig::schema_docs());
    coefficients.extend(CanyonConfig::schema_docs());

    let schema = ConfigSchemaDoc {
        version: "1.0".to_string(),
        coefficients,
    };
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn all_docs() -> Vec<CoefficientElement> {
        let schema = get_config_schema().unwrap();
        let parsed: ConfigSchemaDoc = serde_json::from_str(&schema).unwrap();
        parsed.coefficients
    }

    #[test]
    fn test_category_serializes_to_json() {
        let json = serde_json::to_string(&CoefficientCategory::Economic).unwrap();
        assert_eq!(json, "\"Economic\"");
    }

    #[test]
    fn test_every_documented_name_is_a_config_key() {
        let config = serde_json::to_value(EngineConfig::default()).unwrap();
        for doc in all_docs() {
            let pointer = format!("/{}", doc.name.replace('.', "/"));
            assert!(
                config.pointer(&pointer).is_some(),
                "{} is not a key of EngineConfig",
                doc.name
            );
        }
    }

    #[test]
    fn test_every_scalar_key_is_documented() {
        let config = serde_json::to_value(EngineConfig::default()).unwrap();
        let documented: Vec<String> = all_docs().into_iter().map(|d| d.name).collect();
        for (section, fields) in config.as_object().unwrap() {
            for key in fields.as_object().unwrap().keys() {
                let name = format!("{}.{}", section, key);
                assert!(documented.contains(&name), "{} is undocumented", name);
            }
        }
    }

    #[test]
    fn test_defaults_match_code() {
        let docs = all_docs();
        let humidity = docs
            .iter()
            .find(|d| d.name == "thermal.humidity_penalty")
            .unwrap();
        assert_eq!(humidity.default_value, "0.28");

        let formula = docs.iter().find(|d| d.name == "health.formula").unwrap();
        assert_eq!(formula.default_value, "simplified_heat_index");
    }

    #[test]
    fn test_every_element_has_description_and_unit() {
        for doc in all_docs() {
            assert!(!doc.description.is_empty(), "{} has empty description", doc.name);
            assert!(!doc.unit.is_empty(), "{} has empty unit", doc.name);
            assert!(!doc.formula.is_empty(), "{} has empty formula", doc.name);
        }
    }

    #[test]
    fn test_get_config_schema_is_deterministic() {
        assert_eq!(get_config_schema().unwrap(), get_config_schema().unwrap());
    }
}
