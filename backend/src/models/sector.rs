//! Sector profile model
//!
//! Baseline climate of one geographic sector. A profile is immutable once
//! built: every constructor and builder step validates, and deserialization
//! goes through the same checks, so an engine call never sees an invalid
//! profile.
//!
//! Latitude and longitude are carried for the map layer only; no formula
//! reads them.

use serde::{Deserialize, Serialize};

use crate::core::validation::{self, ValidationError};

/// Baseline description of one geographic sector
///
/// # Example
/// ```
/// use heat_mitigation_core_rs::SectorProfile;
///
/// let ludhiana = SectorProfile::new("Ludhiana", 47.1, 0.44, 159.0)
///     .unwrap()
///     .with_ev_fleet(15_800)
///     .with_aqi(168.0)
///     .unwrap();
/// assert_eq!(ludhiana.baseline_temp_c(), 47.1);
/// assert_eq!(ludhiana.ev_fleet_size(), 15_800);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SectorProfileRecord")]
pub struct SectorProfile {
    name: String,
    latitude: f64,
    longitude: f64,

    /// Ambient baseline temperature (°C, > 0)
    baseline_temp_c: f64,

    /// Relative humidity as a fraction in [0, 1]
    humidity: f64,

    /// Built-up area (km², > 0)
    area_km2: f64,

    ev_fleet_size: u32,

    /// Air-quality index, when telemetry exists
    aqi: Option<f64>,

    /// Buildings per km², when known (drives the sky-view-factor model)
    building_density: Option<f64>,
}

impl SectorProfile {
    /// Create a profile with the required climate attributes
    ///
    /// The EV fleet defaults to zero; AQI and building density to unknown.
    pub fn new(
        name: impl Into<String>,
        baseline_temp_c: f64,
        humidity: f64,
        area_km2: f64,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self {
            name,
            latitude: 0.0,
            longitude: 0.0,
            baseline_temp_c: validation::positive("baseline_temp_c", baseline_temp_c)?,
            humidity: validation::fraction("humidity", humidity)?,
            area_km2: validation::positive("area_km2", area_km2)?,
            ev_fleet_size: 0,
            aqi: None,
            building_density: None,
        })
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        self.latitude = validation::finite("latitude", latitude)?;
        self.longitude = validation::finite("longitude", longitude)?;
        Ok(self)
    }

    pub fn with_ev_fleet(mut self, ev_fleet_size: u32) -> Self {
        self.ev_fleet_size = ev_fleet_size;
        self
    }

    pub fn with_aqi(mut self, aqi: f64) -> Result<Self, ValidationError> {
        self.aqi = Some(validation::non_negative("aqi", aqi)?);
        Ok(self)
    }

    pub fn with_building_density(mut self, buildings_per_km2: f64) -> Result<Self, ValidationError> {
        self.building_density = Some(validation::non_negative(
            "building_density",
            buildings_per_km2,
        )?);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn baseline_temp_c(&self) -> f64 {
        self.baseline_temp_c
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn area_km2(&self) -> f64 {
        self.area_km2
    }

    pub fn ev_fleet_size(&self) -> u32 {
        self.ev_fleet_size
    }

    pub fn aqi(&self) -> Option<f64> {
        self.aqi
    }

    pub fn building_density(&self) -> Option<f64> {
        self.building_density
    }
}

/// Unvalidated wire form of [`SectorProfile`]
#[derive(Deserialize)]
struct SectorProfileRecord {
    name: String,
    #[serde(default)]
    latitude: f64,
    #[serde(default)]
    longitude: f64,
    baseline_temp_c: f64,
    humidity: f64,
    area_km2: f64,
    #[serde(default)]
    ev_fleet_size: u32,
    #[serde(default)]
    aqi: Option<f64>,
    #[serde(default)]
    building_density: Option<f64>,
}

impl TryFrom<SectorProfileRecord> for SectorProfile {
    type Error = ValidationError;

    fn try_from(record: SectorProfileRecord) -> Result<Self, Self::Error> {
        let mut profile = SectorProfile::new(
            record.name,
            record.baseline_temp_c,
            record.humidity,
            record.area_km2,
        )?
        .with_coordinates(record.latitude, record.longitude)?
        .with_ev_fleet(record.ev_fleet_size);
        if let Some(aqi) = record.aqi {
            profile = profile.with_aqi(aqi)?;
        }
        if let Some(density) = record.building_density {
            profile = profile.with_building_density(density)?;
        }
        Ok(profile)
    }
}
