//! Domain models for the heat-mitigation engine

pub mod catalog;
pub mod intervention;
pub mod sector;

// Re-exports
pub use intervention::{CostEstimate, InterventionMix};
pub use sector::SectorProfile;
