//! Sky View Factor (urban canyon) model
//!
//! The sky view factor is the fraction of sky visible from street level:
//! 1.0 in an open field, down to ~0.1 in a dense canyon. A low SVF traps
//! long-wave radiation, so the street cannot shed heat back to space at
//! night. The result is reported next to the daytime simulation; it does
//! not alter the mitigated temperature.

use serde::{Deserialize, Serialize};

use crate::config::CanyonConfig;
use crate::core::validation::{self, ValidationError};

/// Night-time heat retention of a built-up sector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyViewAssessment {
    pub building_density: f64,
    pub sky_view_factor: f64,

    /// Long-wave heat retained after sunset (°C)
    pub trapped_heat_c: f64,
}

/// Assess the canyon effect for `building_density` (buildings per km²)
pub fn assess_sky_view(
    building_density: f64,
    config: &CanyonConfig,
) -> Result<SkyViewAssessment, ValidationError> {
    let building_density = validation::non_negative("building_density", building_density)?;
    let sky_view_factor =
        (1.0 - building_density / config.density_scale).max(config.min_sky_view_factor);

    Ok(SkyViewAssessment {
        building_density,
        sky_view_factor,
        trapped_heat_c: (1.0 - sky_view_factor) * config.max_trapped_heat_c,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_field_traps_nothing() {
        let assessment = assess_sky_view(0.0, &CanyonConfig::default()).unwrap();
        assert_eq!(assessment.sky_view_factor, 1.0);
        assert_eq!(assessment.trapped_heat_c, 0.0);
    }

    #[test]
    fn test_dense_canyon_hits_svf_floor() {
        let assessment = assess_sky_view(5_000.0, &CanyonConfig::default()).unwrap();
        assert_eq!(assessment.sky_view_factor, 0.12);
        assert!((assessment.trapped_heat_c - 0.88 * 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_mid_density() {
        let assessment = assess_sky_view(500.0, &CanyonConfig::default()).unwrap();
        assert!((assessment.sky_view_factor - 0.5).abs() < 1e-12);
        assert!((assessment.trapped_heat_c - 3.25).abs() < 1e-9);
    }

    #[test]
    fn test_negative_density_is_rejected() {
        assert!(assess_sky_view(-1.0, &CanyonConfig::default()).is_err());
    }
}
