//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust records and PyO3-compatible types (PyDict, PyList).

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use serde::Serialize;
use serde_json::Value;

use crate::models::SectorProfile;

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field from a Python dict with a clear error message.
fn extract_required<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .extract()
}

/// Extract an optional field; a missing key or `None` value yields `None`.
fn extract_optional<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.extract()?)),
        _ => Ok(None),
    }
}

/// Map any engine error onto `ValueError`.
pub fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

// ========================================================================
// Parsers
// ========================================================================

/// Convert a Python dict into a validated SectorProfile
///
/// Required keys: `name`, `baseline_temp_c`, `humidity`, `area_km2`.
/// Optional keys: `latitude`, `longitude`, `ev_fleet_size`, `aqi`,
/// `building_density`.
pub fn parse_sector(dict: &Bound<'_, PyDict>) -> PyResult<SectorProfile> {
    let name: String = extract_required(dict, "name")?;
    let baseline_temp_c: f64 = extract_required(dict, "baseline_temp_c")?;
    let humidity: f64 = extract_required(dict, "humidity")?;
    let area_km2: f64 = extract_required(dict, "area_km2")?;

    let mut sector =
        SectorProfile::new(name, baseline_temp_c, humidity, area_km2).map_err(value_error)?;

    let latitude: Option<f64> = extract_optional(dict, "latitude")?;
    let longitude: Option<f64> = extract_optional(dict, "longitude")?;
    if latitude.is_some() || longitude.is_some() {
        sector = sector
            .with_coordinates(latitude.unwrap_or_default(), longitude.unwrap_or_default())
            .map_err(value_error)?;
    }
    if let Some(ev_fleet_size) = extract_optional::<u32>(dict, "ev_fleet_size")? {
        sector = sector.with_ev_fleet(ev_fleet_size);
    }
    if let Some(aqi) = extract_optional::<f64>(dict, "aqi")? {
        sector = sector.with_aqi(aqi).map_err(value_error)?;
    }
    if let Some(density) = extract_optional::<f64>(dict, "building_density")? {
        sector = sector.with_building_density(density).map_err(value_error)?;
    }
    Ok(sector)
}

// ========================================================================
// Record → Python
// ========================================================================

/// Convert any serializable engine record into nested dicts and lists
pub fn record_to_py<T: Serialize>(py: Python<'_>, record: &T) -> PyResult<PyObject> {
    let value = serde_json::to_value(record).map_err(value_error)?;
    json_to_py(py, &value)
}

fn json_to_py(py: Python<'_>, value: &Value) -> PyResult<PyObject> {
    Ok(match value {
        Value::Null => py.None(),
        Value::Bool(b) => (*b).into_py(py),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.into_py(py),
            None => n.as_f64().unwrap_or(f64::NAN).into_py(py),
        },
        Value::String(s) => s.as_str().into_py(py),
        Value::Array(items) => {
            let list = PyList::empty_bound(py);
            for item in items {
                list.append(json_to_py(py, item)?)?;
            }
            list.into_any().unbind()
        }
        Value::Object(map) => {
            let dict = PyDict::new_bound(py);
            for (key, item) in map {
                dict.set_item(key, json_to_py(py, item)?)?;
            }
            dict.into_any().unbind()
        }
    })
}
