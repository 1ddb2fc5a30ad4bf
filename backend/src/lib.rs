//! Heat Mitigation Core - Rust Engine
//!
//! Decision-support calculator for urban heat-mitigation planning.
//!
//! # Architecture
//!
//! - **core**: Shared input validation
//! - **config**: Every tunable coefficient, JSON loading, schema docs
//! - **models**: Domain types (SectorProfile, InterventionMix, CostEstimate)
//! - **thermal**: Forward model (mix → mitigated temperature)
//! - **optimizer**: Inverse model (target → cost-aware mix)
//! - **health**: Heat-stress index and risk banding
//! - **economics**: Carbon credits, V2G grid relief, water recovery
//! - **resilience**: Composite letter grade
//! - **engine**: Validated facade, end-to-end plans, regional aggregate
//!
//! # Critical Invariants
//!
//! 1. Every operation is pure: no I/O, no shared mutable state, no randomness
//! 2. Inputs are validated, never silently coerced
//! 3. No coefficient is embedded in a formula; all live in `EngineConfig`
//! 4. An unreachable target is reported with its unmet residual, never hidden

// Module declarations
pub mod config;
pub mod core;
pub mod economics;
pub mod engine;
pub mod health;
pub mod models;
pub mod optimizer;
pub mod resilience;
pub mod thermal;

// Re-exports for convenience
pub use config::{
    CanyonConfig, ConfigError, CostRates, EconomicRates, EngineConfig, HealthConfig,
    OptimizerConfig, ResilienceConfig, ThermalConfig,
};
pub use core::validation::ValidationError;
pub use economics::{EconomicOutcome, EconomicValuator};
pub use engine::{MitigationEngine, RegionalSummary, SectorReport};
pub use health::{HealthRiskClassifier, HeatIndexFormula, RiskAssessment, RiskCategory};
pub use models::{catalog, CostEstimate, InterventionMix, SectorProfile};
pub use optimizer::{InterventionOptimizer, Recommendation};
pub use resilience::{LetterGrade, ResilienceGrade, ResilienceScorer};
pub use thermal::{SimulationResult, SkyViewAssessment, ThermalSimulator};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn heat_mitigation_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::engine::PyMitigationEngine>()?;
    m.add_function(wrap_pyfunction!(ffi::engine::sector_catalog, m)?)?;
    Ok(())
}
