//! Tests for the resilience scorer
//!
//! score = 30 * albedo + 40 * green + 30 * air_quality_term

use heat_mitigation_core_rs::{
    EngineConfig, InterventionMix, LetterGrade, MitigationEngine, ResilienceConfig,
    ResilienceScorer,
};

#[test]
fn test_score_is_bounded_by_weights() {
    let engine = MitigationEngine::with_defaults();
    let best = engine
        .score(&InterventionMix::new(1.0, 1.0).unwrap(), Some(0.0))
        .unwrap();
    assert_eq!(best.score, engine.config().resilience.max_score());
}

#[test]
fn test_air_quality_beyond_ceiling_contributes_nothing() {
    let config = ResilienceConfig::default();
    let scorer = ResilienceScorer::new(&config);
    assert_eq!(scorer.air_quality_term(Some(300.0)), 0.0);
    assert_eq!(scorer.air_quality_term(Some(999.0)), 0.0);
    assert_eq!(scorer.air_quality_term(Some(150.0)), 0.5);
}

#[test]
fn test_air_quality_term_is_capped_at_one() {
    let config = ResilienceConfig {
        aqi_scale: 100.0,
        ..ResilienceConfig::default()
    };
    let scorer = ResilienceScorer::new(&config);
    assert_eq!(scorer.air_quality_term(Some(0.0)), 1.0);
}

#[test]
fn test_missing_aqi_is_not_treated_as_zero_aqi() {
    let engine = MitigationEngine::with_defaults();
    let mix = InterventionMix::new(0.6, 0.6).unwrap();
    let unknown = engine.score(&mix, None).unwrap();
    let pristine = engine.score(&mix, Some(0.0)).unwrap();
    assert!(unknown.score < pristine.score);
}

#[test]
fn test_grade_bands() {
    let engine = MitigationEngine::with_defaults();
    // AQI 300 contributes nothing, leaving 30 * albedo + 40 * green
    let cases = [
        (1.0, 1.0, LetterGrade::B),  // 70
        (0.0, 1.0, LetterGrade::C),  // 40
        (0.5, 0.5, LetterGrade::F),  // 35
    ];
    for (albedo, green, grade) in cases {
        let result = engine
            .score(&InterventionMix::new(albedo, green).unwrap(), Some(300.0))
            .unwrap();
        assert_eq!(result.grade, grade, "albedo {} green {}", albedo, green);
    }
}

#[test]
fn test_custom_neutral_fraction() {
    let mut config = EngineConfig::default();
    config.resilience.neutral_aqi_fraction = 0.0;
    let engine = MitigationEngine::new(config).unwrap();

    let grade = engine.score(&InterventionMix::none(), None).unwrap();
    assert_eq!(grade.score, 0.0);
    assert_eq!(grade.grade, LetterGrade::F);
}

#[test]
fn test_negative_aqi_is_rejected() {
    let engine = MitigationEngine::with_defaults();
    assert!(engine.score(&InterventionMix::none(), Some(-4.0)).is_err());
}

#[test]
fn test_grade_serializes_as_letter() {
    let engine = MitigationEngine::with_defaults();
    let grade = engine
        .score(&InterventionMix::new(1.0, 1.0).unwrap(), Some(0.0))
        .unwrap();
    let json = serde_json::to_value(&grade).unwrap();
    assert_eq!(json["grade"], "A");
}
