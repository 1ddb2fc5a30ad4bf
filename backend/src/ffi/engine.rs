//! PyO3 wrapper for MitigationEngine

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{parse_sector, record_to_py, value_error};
use crate::catalog::punjab_sectors;
use crate::config::EngineConfig;
use crate::engine::MitigationEngine;
use crate::models::InterventionMix;

/// Python wrapper for the Rust MitigationEngine
///
/// # Example (from Python)
///
/// ```python
/// from heat_mitigation_core_rs import MitigationEngine
///
/// engine = MitigationEngine()  # or MitigationEngine('{"economics": {...}}')
/// sector = {"name": "Ludhiana", "baseline_temp_c": 47.1, "humidity": 0.44,
///           "area_km2": 159.0, "ev_fleet_size": 15800}
/// plan = engine.plan(sector, 31.0)
/// print(plan["recommendation"]["cost"]["capital_cost"])
/// ```
#[pyclass(name = "MitigationEngine", frozen)]
pub struct PyMitigationEngine {
    inner: MitigationEngine,
}

#[pymethods]
impl PyMitigationEngine {
    /// Create an engine from an optional JSON configuration document
    ///
    /// Raises ValueError if the document is malformed or invalid.
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => EngineConfig::from_json_str(json).map_err(value_error)?,
            None => EngineConfig::default(),
        };
        let inner = MitigationEngine::new(config).map_err(value_error)?;
        Ok(Self { inner })
    }

    fn simulate(
        &self,
        py: Python<'_>,
        albedo_coverage: f64,
        green_cover: f64,
        humidity: f64,
        baseline_temp_c: f64,
    ) -> PyResult<PyObject> {
        let mix = InterventionMix::new(albedo_coverage, green_cover).map_err(value_error)?;
        let result = self
            .inner
            .simulate(&mix, humidity, baseline_temp_c)
            .map_err(value_error)?;
        record_to_py(py, &result)
    }

    fn recommend(&self, py: Python<'_>, sector: &Bound<'_, PyDict>, target_temp_c: f64) -> PyResult<PyObject> {
        let sector = parse_sector(sector)?;
        let rec = self.inner.recommend(&sector, target_temp_c).map_err(value_error)?;
        record_to_py(py, &rec)
    }

    fn classify(&self, py: Python<'_>, temp_c: f64, humidity: f64) -> PyResult<PyObject> {
        let risk = self.inner.classify(temp_c, humidity).map_err(value_error)?;
        record_to_py(py, &risk)
    }

    fn valuate(&self, py: Python<'_>, delta_c: f64, sector: &Bound<'_, PyDict>) -> PyResult<PyObject> {
        let sector = parse_sector(sector)?;
        let outcome = self.inner.valuate(delta_c, &sector).map_err(value_error)?;
        record_to_py(py, &outcome)
    }

    #[pyo3(signature = (albedo_coverage, green_cover, aqi=None))]
    fn score(&self, py: Python<'_>, albedo_coverage: f64, green_cover: f64, aqi: Option<f64>) -> PyResult<PyObject> {
        let mix = InterventionMix::new(albedo_coverage, green_cover).map_err(value_error)?;
        let grade = self.inner.score(&mix, aqi).map_err(value_error)?;
        record_to_py(py, &grade)
    }

    fn plan(&self, py: Python<'_>, sector: &Bound<'_, PyDict>, target_temp_c: f64) -> PyResult<PyObject> {
        let sector = parse_sector(sector)?;
        let report = self.inner.plan(&sector, target_temp_c).map_err(value_error)?;
        record_to_py(py, &report)
    }
}

/// Built-in sector table as a list of dicts
#[pyfunction]
pub fn sector_catalog(py: Python<'_>) -> PyResult<PyObject> {
    let sectors = punjab_sectors().map_err(value_error)?;
    record_to_py(py, &sectors)
}
