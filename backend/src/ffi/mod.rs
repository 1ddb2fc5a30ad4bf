//! Python bindings (feature `pyo3`)
//!
//! The presentation layer calls the engine through these wrappers. Results
//! cross the boundary as plain dicts; no formatting happens here.

pub mod engine;
pub mod types;
