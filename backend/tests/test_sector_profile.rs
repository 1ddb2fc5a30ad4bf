//! Tests for SectorProfile construction and deserialization
//!
//! Profiles are validated on every construction path, JSON included.

use heat_mitigation_core_rs::{SectorProfile, ValidationError};

#[test]
fn test_full_profile_builder() {
    let sector = SectorProfile::new("Amritsar", 44.8, 0.40, 139.0)
        .unwrap()
        .with_coordinates(31.6340, 74.8723)
        .unwrap()
        .with_ev_fleet(12_400)
        .with_aqi(154.0)
        .unwrap()
        .with_building_density(690.0)
        .unwrap();

    assert_eq!(sector.name(), "Amritsar");
    assert_eq!(sector.latitude(), 31.6340);
    assert_eq!(sector.longitude(), 74.8723);
    assert_eq!(sector.baseline_temp_c(), 44.8);
    assert_eq!(sector.humidity(), 0.40);
    assert_eq!(sector.area_km2(), 139.0);
    assert_eq!(sector.ev_fleet_size(), 12_400);
    assert_eq!(sector.aqi(), Some(154.0));
    assert_eq!(sector.building_density(), Some(690.0));
}

#[test]
fn test_humidity_outside_unit_interval_is_rejected() {
    // Percent instead of fraction is the classic caller bug
    assert_eq!(
        SectorProfile::new("Ludhiana", 47.1, 44.0, 159.0),
        Err(ValidationError::FractionOutOfRange {
            field: "humidity",
            value: 44.0
        })
    );
}

#[test]
fn test_non_positive_area_is_rejected() {
    assert_eq!(
        SectorProfile::new("Ludhiana", 47.1, 0.44, 0.0),
        Err(ValidationError::NonPositive {
            field: "area_km2",
            value: 0.0
        })
    );
}

#[test]
fn test_non_positive_baseline_is_rejected() {
    assert!(matches!(
        SectorProfile::new("Ludhiana", -3.0, 0.44, 159.0),
        Err(ValidationError::NonPositive {
            field: "baseline_temp_c",
            ..
        })
    ));
}

#[test]
fn test_nan_baseline_is_rejected() {
    assert_eq!(
        SectorProfile::new("Ludhiana", f64::NAN, 0.44, 159.0),
        Err(ValidationError::NonFinite {
            field: "baseline_temp_c"
        })
    );
}

#[test]
fn test_deserialize_minimal_profile() {
    let sector: SectorProfile = serde_json::from_str(
        r#"{"name": "Ferozpur", "baseline_temp_c": 46.2, "humidity": 0.35, "area_km2": 51.0}"#,
    )
    .unwrap();

    assert_eq!(sector.name(), "Ferozpur");
    assert_eq!(sector.ev_fleet_size(), 0);
    assert_eq!(sector.aqi(), None);
}

#[test]
fn test_deserialize_validates() {
    let result: Result<SectorProfile, _> = serde_json::from_str(
        r#"{"name": "Ferozpur", "baseline_temp_c": 46.2, "humidity": 35, "area_km2": 51.0}"#,
    );
    let err = result.unwrap_err();
    assert!(err.to_string().contains("humidity"));
}

#[test]
fn test_deserialize_rejects_negative_fleet() {
    let result: Result<SectorProfile, _> = serde_json::from_str(
        r#"{"name": "Ferozpur", "baseline_temp_c": 46.2, "humidity": 0.35, "area_km2": 51.0, "ev_fleet_size": -10}"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_serialized_profile_reads_back() {
    let sector = SectorProfile::new("Patiala", 43.5, 0.48, 160.0)
        .unwrap()
        .with_aqi(126.0)
        .unwrap();
    let json = serde_json::to_string(&sector).unwrap();
    let restored: SectorProfile = serde_json::from_str(&json).unwrap();
    assert_eq!(sector, restored);
}
