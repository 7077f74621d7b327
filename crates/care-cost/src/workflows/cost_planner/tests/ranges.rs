use serde_json::json;

use super::common::*;
use crate::workflows::cost_planner::ranges::{range_explanation, widening_factors};
use crate::workflows::cost_planner::{
    calculate_cost_range, classify_confidence, has_high_uncertainty, has_moderate_uncertainty,
    CareType, Confidence, CostTables,
};

#[test]
fn stable_needs_get_the_narrow_band() {
    let ctx = context(&[]);
    let range = calculate_cost_range(
        1000.0,
        &ctx,
        CareType::AssistedLiving,
        &CostTables::standard().confidence_ranges,
    );

    assert_eq!(range.confidence, Confidence::High);
    assert_eq!(range.range_pct, 0.07);
    assert_cents(range.low, 930.0);
    assert_cents(range.likely, 1000.0);
    assert_cents(range.high, 1070.0);
    assert_eq!(
        range.widening_factors,
        vec!["Care needs are stable and predictable".to_string()]
    );
    assert!(range.explanation.contains("narrow (\u{b1}7%)"));
}

#[test]
fn high_acuity_memory_care_is_always_low_confidence() {
    let ctx = context(&[]);
    assert_eq!(
        classify_confidence(&ctx, CareType::MemoryCareHighAcuity),
        Confidence::Low
    );
    assert!(has_high_uncertainty(&ctx, CareType::MemoryCareHighAcuity));
}

#[test]
fn heavy_behavioral_needs_widen_to_low_confidence() {
    let ctx = context_with(
        &[BEHAVIORAL_CONCERNS],
        json!({ "behaviors": ["wandering", "aggression", "sundowning"] }),
    );

    assert_eq!(
        classify_confidence(&ctx, CareType::AssistedLiving),
        Confidence::Low
    );
    let factors = widening_factors(&ctx, CareType::AssistedLiving, Confidence::Low);
    assert_eq!(
        factors[0],
        "Significant behavioral needs (3 behaviors) require intensive support"
    );
}

#[test]
fn continuous_supervision_depends_on_setting() {
    let ctx = context(&[CONTINUOUS_SUPERVISION]);

    assert_eq!(classify_confidence(&ctx, CareType::InHomeCare), Confidence::Low);
    assert_eq!(
        classify_confidence(&ctx, CareType::AssistedLiving),
        Confidence::Medium
    );
}

#[test]
fn behavioral_concerns_in_memory_care_are_moderate() {
    let ctx = context(&[BEHAVIORAL_CONCERNS]);

    assert!(has_moderate_uncertainty(&ctx, CareType::MemoryCare));
    assert!(!has_high_uncertainty(&ctx, CareType::MemoryCare));
    assert_eq!(classify_confidence(&ctx, CareType::MemoryCare), Confidence::Medium);
    assert_eq!(
        classify_confidence(&ctx, CareType::AssistedLiving),
        Confidence::High
    );
}

#[test]
fn high_dependence_is_moderate_everywhere() {
    let ctx = context(&[HIGH_DEPENDENCE]);
    for care_type in [
        CareType::AssistedLiving,
        CareType::MemoryCare,
        CareType::InHomeCare,
    ] {
        assert_eq!(classify_confidence(&ctx, care_type), Confidence::Medium);
    }
}

#[test]
fn moderate_explanation_joins_factors() {
    let factors = vec![
        "Fall risk requires enhanced monitoring".to_string(),
        "High level of care dependency varies by provider capability".to_string(),
    ];

    let explanation = range_explanation(Confidence::Medium, 0.12, &factors);

    assert_eq!(
        explanation,
        "Cost range is moderate (\u{b1}12%) because fall risk requires enhanced monitoring \
         and high level of care dependency varies by provider capability. \
         Different communities may price these needs differently."
    );
}

#[test]
fn low_confidence_band_is_twenty_percent() {
    let ctx = context(&[TRANSFER_LIFT_REQUIRED]);
    let range = calculate_cost_range(
        9400.0,
        &ctx,
        CareType::MemoryCare,
        &CostTables::standard().confidence_ranges,
    );

    assert_eq!(range.confidence, Confidence::Low);
    assert_eq!(range.range_pct, 0.20);
    assert_cents(range.low, 7520.0);
    assert_cents(range.high, 11280.0);
    assert!(range
        .widening_factors
        .iter()
        .any(|factor| factor.contains("mechanical lifts")));
}
