//! Economic Valuator
//!
//! Translates achieved cooling into downstream value. Three independent
//! calculations, none feeding another:
//!
//! ```text
//! co2_tons           = delta_c * co2_tons_per_c
//! credit_value       = co2_tons * carbon_price_per_ton
//! v2g_energy_mwh     = ev_fleet_size * battery_kwh_avg * discharge_fraction / 1000
//! v2g_revenue        = v2g_energy_mwh * v2g_price_per_mwh
//! water_saved_liters = delta_c * evapotranspiration_mm_per_c * area_km2 * 1e6
//! ```
//!
//! V2G capacity is a fleet-availability assumption and does not scale with
//! cooling. The delta only decides whether grid relief is engaged at all:
//! with no cooling (`delta_c <= 0`) every field is zero.

use serde::{Deserialize, Serialize};

use crate::config::EconomicRates;
use crate::core::validation::{self, ValidationError};
use crate::models::SectorProfile;

/// Litres of water in a 1 mm layer over 1 km²
pub const LITERS_PER_MM_KM2: f64 = 1_000_000.0;

const KWH_PER_MWH: f64 = 1000.0;

/// Value derived from one cooling outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomicOutcome {
    pub co2_tons: f64,
    pub credit_value: f64,
    pub v2g_energy_mwh: f64,
    pub v2g_revenue: f64,
    pub water_saved_liters: f64,
}

impl EconomicOutcome {
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Valuation over borrowed market rates
#[derive(Debug, Clone, Copy)]
pub struct EconomicValuator<'a> {
    rates: &'a EconomicRates,
}

impl<'a> EconomicValuator<'a> {
    pub fn new(rates: &'a EconomicRates) -> Self {
        Self { rates }
    }

    /// Tons of CO₂e avoided and their credit value
    pub fn carbon_credits(&self, delta_c: f64) -> (f64, f64) {
        let co2_tons = delta_c * self.rates.co2_tons_per_c;
        (co2_tons, co2_tons * self.rates.carbon_price_per_ton)
    }

    /// Peak discharge energy (MWh) and revenue of an EV fleet
    pub fn v2g_capacity(&self, ev_fleet_size: u32) -> (f64, f64) {
        let energy_mwh = f64::from(ev_fleet_size)
            * self.rates.battery_kwh_avg
            * self.rates.discharge_fraction
            / KWH_PER_MWH;
        (energy_mwh, energy_mwh * self.rates.v2g_price_per_mwh)
    }

    /// Evaporative water loss avoided over `area_km2` (litres)
    pub fn water_recovered(&self, delta_c: f64, area_km2: f64) -> f64 {
        delta_c * self.rates.evapotranspiration_mm_per_c * area_km2 * LITERS_PER_MM_KM2
    }

    /// Value a cooling outcome for a sector
    ///
    /// # Errors
    ///
    /// `ValidationError` if `delta_c` is not finite.
    ///
    /// # Example
    /// ```
    /// use heat_mitigation_core_rs::{EconomicRates, EconomicValuator, SectorProfile};
    ///
    /// let rates = EconomicRates::default();
    /// let valuator = EconomicValuator::new(&rates);
    /// let sector = SectorProfile::new("Ludhiana", 47.1, 0.44, 159.0).unwrap().with_ev_fleet(15_800);
    ///
    /// let outcome = valuator.valuate(2.0, &sector).unwrap();
    /// assert_eq!(outcome.co2_tons, 970.0);
    /// ```
    pub fn valuate(&self, delta_c: f64, profile: &SectorProfile) -> Result<EconomicOutcome, ValidationError> {
        let delta_c = validation::finite("delta_c", delta_c)?;
        if delta_c <= 0.0 {
            return Ok(EconomicOutcome::zero());
        }

        let (co2_tons, credit_value) = self.carbon_credits(delta_c);
        let (v2g_energy_mwh, v2g_revenue) = self.v2g_capacity(profile.ev_fleet_size());
        let water_saved_liters = self.water_recovered(delta_c, profile.area_km2());

        Ok(EconomicOutcome {
            co2_tons,
            credit_value,
            v2g_energy_mwh,
            v2g_revenue,
            water_saved_liters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sector() -> SectorProfile {
        SectorProfile::new("Ludhiana", 47.1, 0.44, 159.0)
            .unwrap()
            .with_ev_fleet(15_800)
    }

    #[test]
    fn test_carbon_credits_at_market_rate() {
        let rates = EconomicRates::default();
        let (tons, value) = EconomicValuator::new(&rates).carbon_credits(1.0);
        assert_eq!(tons, 485.0);
        assert!((value - 485.0 * 28.5).abs() < 1e-9);
    }

    #[test]
    fn test_v2g_capacity_formula() {
        let rates = EconomicRates::default();
        let (mwh, revenue) = EconomicValuator::new(&rates).v2g_capacity(1000);
        // 1000 * 40 kWh * 0.3 / 1000
        assert!((mwh - 12.0).abs() < 1e-9);
        assert!((revenue - 12.0 * 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_water_recovered_units() {
        let rates = EconomicRates::default();
        let litres = EconomicValuator::new(&rates).water_recovered(1.0, 1.0);
        // 0.8 mm over 1 km² = 800,000 L
        assert!((litres - 800_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_delta_is_valued_at_zero() {
        let rates = EconomicRates::default();
        let outcome = EconomicValuator::new(&rates).valuate(-1.5, &sector()).unwrap();
        assert_eq!(outcome, EconomicOutcome::zero());
    }

    #[test]
    fn test_nan_delta_is_rejected() {
        let rates = EconomicRates::default();
        assert!(EconomicValuator::new(&rates).valuate(f64::NAN, &sector()).is_err());
    }
}
