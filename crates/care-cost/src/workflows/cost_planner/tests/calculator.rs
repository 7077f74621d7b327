use serde_json::json;

use super::common::*;
use crate::workflows::cost_planner::{
    calculate_care_costs, AddOnKind, CareType, Confidence, CostCalculator, CostError, CostTables,
    TierId, CALCULATION_METHOD, MODEL_VERSION,
};

fn labels(result: &crate::workflows::cost_planner::CostResult) -> Vec<&str> {
    result
        .breakdown
        .iter()
        .map(|line| line.label.as_str())
        .collect()
}

#[test]
fn baseline_assisted_living_matches_national_median() {
    let result = calculator()
        .calculate(&outcome(&[]), 1.0, None)
        .expect("estimate succeeds");

    assert_eq!(result.care_type, CareType::AssistedLiving);
    assert_eq!(result.escalated_from, None);
    assert_eq!(result.tier_id, "tier_0");
    assert_eq!(result.tier, "Standard Care");
    assert_eq!(result.tier_increment, 0.0);
    assert!(result.addons.is_empty());
    assert_cents(result.base_cost, 5900.0);
    assert_cents(result.total_monthly, 5900.0);
    assert_eq!(result.range.confidence, Confidence::High);
    assert_cents(result.range.low, 5487.0);
    assert_cents(result.range.high, 6313.0);
    assert_eq!(result.model_version, MODEL_VERSION);
    assert_eq!(result.calculation_method, CALCULATION_METHOD);
    assert!(!result.base_cost_derived);
    assert!(result.base_cost_source.name.contains("Genworth"));
    assert_eq!(
        labels(&result),
        vec![
            "National Base",
            "Regional Adjustment (1.0x)",
            "Care Tier: Standard Care",
            "Add-ons",
        ]
    );
}

#[test]
fn multiple_high_intensity_needs_price_at_tier_four() {
    let assessment = outcome_with(
        &[
            BEHAVIORAL_CONCERNS,
            HIGH_MOBILITY_DEPENDENCE,
            CONTINUOUS_SUPERVISION,
        ],
        json!({ "badls": adls(3) }),
    );

    let result = calculator()
        .calculate(&assessment, 1.0, Some(CareType::AssistedLiving))
        .expect("estimate succeeds");

    assert_eq!(result.tier_id, TierId::Tier4.as_str());
    assert_cents(result.tier_increment, 3000.0);
    assert_cents(result.total_monthly, 8900.0);
    assert_eq!(result.range.confidence, Confidence::Medium);
    assert_eq!(result.range.range_pct, 0.12);
}

#[test]
fn regional_multiplier_scales_base_tier_and_add_on_cap() {
    let result = calculator()
        .calculate(&outcome(&[FALLS_MULTIPLE]), 1.2, Some(CareType::AssistedLiving))
        .expect("estimate succeeds");

    assert_cents(result.regional_base, 7080.0);
    assert_cents(result.tier_increment, 1440.0);
    assert_cents(result.addon_total, 400.0);
    assert_cents(result.addon_cap, 800.0);
    assert_cents(result.total_monthly, 8920.0);
    assert_eq!(result.regional_multiplier, 1.2);

    let amounts: Vec<f64> = result.breakdown.iter().map(|line| line.amount).collect();
    assert_cents(amounts[0], 5900.0);
    assert_cents(amounts[1], 1180.0);
    assert_cents(amounts[2], 1440.0);
    assert_cents(amounts[3], 400.0);
    assert_eq!(result.breakdown[1].label, "Regional Adjustment (1.2x)");
    assert_eq!(result.breakdown[2].label, "Care Tier: Moderate Assistance");
}

#[test]
fn capped_add_ons_reconcile_to_the_cent() {
    let assessment = outcome_with(
        &[FALLS_MULTIPLE, INCONTINENCE_MANAGEMENT],
        json!({ "chronic_conditions": ["parkinsons", "copd"] }),
    );

    let result = calculator()
        .calculate(&assessment, 1.0, Some(CareType::AssistedLiving))
        .expect("estimate succeeds");

    assert_eq!(result.addons.len(), 3);
    assert!(result.addons.iter().all(|addon| addon.capped));
    assert_eq!(result.addons[1].kind, AddOnKind::ChronicCondition);
    assert_cents(result.addon_total, 800.0);
    assert_cents(result.total_monthly, 7900.0);
    assert!((result.breakdown_total() - result.total_monthly).abs() <= 0.01);
}

#[test]
fn in_home_care_prices_recommended_hours() {
    let assessment = outcome_with(&[], json!({ "recommended_hours_per_week": 40 }));

    let result = calculator()
        .calculate(&assessment, 1.0, Some(CareType::InHomeCare))
        .expect("estimate succeeds");

    assert_eq!(result.tier_id, "hourly");
    assert_eq!(result.tier, "40 hours/week");
    assert_eq!(result.tier_reason, "recommended hours from assessment");
    assert_eq!(result.hours_per_week, 40.0);
    assert_eq!(result.hours_per_month, 173.2);
    assert_cents(result.hourly_base, 34.0);
    assert_cents(result.total_monthly, 5888.80);
    assert!(result.addons.is_empty());
    assert_eq!(result.addon_cap, 0.0);
    assert_eq!(result.tier_increment, 0.0);
    assert_eq!(
        labels(&result),
        vec![
            "National Hourly Rate (173.2 hrs/month)",
            "Regional Adjustment (1.0x)",
        ]
    );
    assert!((result.breakdown_total() - result.total_monthly).abs() <= 0.01);
}

#[test]
fn family_support_halves_paid_hours() {
    let assessment = outcome_with(&[], json!({ "recommended_hours_per_week": "20" }));

    let result = calculator()
        .calculate(&assessment, 1.0, Some(CareType::HomeWithCarry))
        .expect("estimate succeeds");

    assert_eq!(result.tier_id, "hourly_with_carry");
    assert_eq!(result.tier, "10 hours/week (with family support)");
    assert_eq!(result.hours_per_week, 10.0);
    assert_eq!(result.family_hours_per_week, 10.0);
    assert_eq!(result.hours_per_month, 43.3);
    assert_cents(result.total_monthly, 1472.20);
    assert!(result.base_cost_derived);

    let family = result.breakdown.last().expect("family line");
    assert_eq!(family.label, "Family provides ~10 hrs/week");
    assert_eq!(family.amount, 0.0);
}

#[test]
fn homemaker_defaults_to_ten_hours() {
    let result = calculator()
        .calculate(&outcome(&[]), 1.0, Some(CareType::HomemakerCare))
        .expect("estimate succeeds");

    assert_eq!(result.hours_per_week, 10.0);
    assert_eq!(result.family_hours_per_week, 0.0);
    assert_eq!(result.tier_reason, "default 10 hours/week for Homemaker Services");
    assert_cents(result.total_monthly, 1428.90);
}

#[test]
fn escalation_chain_matches_explicit_high_acuity() {
    let calculator = calculator();
    let assessment = high_acuity_outcome().with_recommendation(CareType::AssistedLiving);

    let escalated = calculator
        .calculate(&assessment, 1.0, None)
        .expect("escalated estimate");
    let explicit = calculator
        .calculate(&assessment, 1.0, Some(CareType::MemoryCareHighAcuity))
        .expect("explicit estimate");

    assert_eq!(escalated.care_type, CareType::MemoryCareHighAcuity);
    assert_eq!(escalated.escalated_from, Some(CareType::AssistedLiving));
    assert_eq!(explicit.escalated_from, None);
    assert_eq!(escalated.total_monthly, explicit.total_monthly);
    assert_cents(escalated.total_monthly, 9400.0);

    assert_eq!(escalated.tier_id, "high_acuity");
    assert_eq!(escalated.tier, "High Acuity");
    assert_eq!(escalated.range.confidence, Confidence::Low);
    assert!(!labels(&escalated)
        .iter()
        .any(|label| label.starts_with("Care Tier")));
}

#[test]
fn unknown_recommendation_is_rejected() {
    let mut assessment = outcome(&[]);
    assessment.recommendation = Some("hospice".to_string());

    let err = calculator()
        .calculate(&assessment, 1.0, None)
        .expect_err("unknown care type");

    assert_eq!(err, CostError::InvalidCareType("hospice".to_string()));
}

#[test]
fn missing_tier_row_is_a_lookup_error() {
    let mut tables = CostTables::genworth_2024();
    tables.memory_care_tiers.remove(&TierId::Tier4);
    let calculator = CostCalculator::new(tables);

    let err = calculator
        .calculate(
            &outcome(&[TRANSFER_LIFT_REQUIRED]),
            1.0,
            Some(CareType::MemoryCare),
        )
        .expect_err("tier 4 row missing");

    assert_eq!(
        err,
        CostError::ConfigLookup {
            care_type: CareType::MemoryCare,
            entry: "tier_4 entry".to_string(),
        }
    );
}

#[test]
fn missing_base_cost_is_a_lookup_error() {
    let mut tables = CostTables::genworth_2024();
    tables.base_costs.remove(&CareType::HomemakerCare);

    let err = CostCalculator::new(tables)
        .calculate(&outcome(&[]), 1.0, Some(CareType::HomemakerCare))
        .expect_err("base cost missing");

    assert_eq!(err.to_string(), "no base cost configured for homemaker_care");
}

#[test]
fn invalid_multiplier_prices_at_zero() {
    for multiplier in [-2.0, f64::NAN, f64::INFINITY] {
        let result = calculator()
            .calculate(&outcome(&[FALLS_MULTIPLE]), multiplier, Some(CareType::AssistedLiving))
            .expect("estimate succeeds");

        assert_eq!(result.regional_multiplier, 0.0);
        assert_eq!(result.total_monthly, 0.0);
        assert_eq!(result.addon_total, 0.0);
        assert!(result.range.low <= result.range.high);
    }
}

#[test]
fn compare_returns_results_in_request_order() {
    let assessment = high_acuity_outcome();
    let requested = [
        CareType::HomemakerCare,
        CareType::MemoryCare,
        CareType::AssistedLiving,
    ];

    let results = calculator()
        .compare(&assessment, 1.0, &requested)
        .expect("comparison succeeds");

    let care_types: Vec<_> = results.iter().map(|result| result.care_type).collect();
    assert_eq!(care_types, requested.to_vec());
    assert!(results.iter().all(|result| result.escalated_from.is_none()));
    assert_eq!(results[1].tier_id, "tier_4");
}

#[test]
fn free_function_parses_care_type_override() {
    let result = calculate_care_costs(&outcome(&[]), 1.0, Some("memory_care"))
        .expect("estimate succeeds");
    assert_eq!(result.care_type, CareType::MemoryCare);
    assert_cents(result.total_monthly, 7400.0);
    assert!(result.base_cost_derived);

    let err = calculate_care_costs(&outcome(&[]), 1.0, Some("nursing_home"))
        .expect_err("unknown override");
    assert_eq!(err, CostError::InvalidCareType("nursing_home".to_string()));
}

#[test]
fn summary_reads_like_a_quote() {
    let result = calculator()
        .calculate(&outcome(&[]), 1.0, None)
        .expect("estimate succeeds");

    assert_eq!(
        result.summary(),
        "Assisted Living (Standard Care): $5900.00/month, range $5487.00 to $6313.00 (high confidence)"
    );
}

#[test]
fn result_serializes_with_stable_field_names() {
    let result = calculator()
        .calculate(&outcome(&[]), 1.0, None)
        .expect("estimate succeeds");

    let payload = serde_json::to_value(&result).expect("serializes");
    assert_eq!(payload["care_type"], json!("assisted_living"));
    assert_eq!(payload["tier_id"], json!("tier_0"));
    assert_eq!(payload["range"]["confidence"], json!("high"));
    assert_eq!(payload["escalated_from"], json!(null));
    assert_eq!(payload["model_version"], json!("3.0.0"));
    assert!(payload["breakdown"].as_array().is_some_and(|lines| lines.len() == 4));
}

#[test]
fn absurd_weekly_hours_fall_back_to_the_default() {
    let assessment = outcome_with(&[], json!({ "recommended_hours_per_week": 1e306 }));

    let result = calculator()
        .calculate(&assessment, 1.0, Some(CareType::InHomeCare))
        .expect("estimate succeeds");

    assert_eq!(result.hours_per_week, 20.0);
    assert!(result.total_monthly.is_finite());
    assert!(result.range.high.is_finite());
    assert!(result.breakdown.iter().all(|line| line.amount.is_finite()));
    assert_eq!(result.tier_reason, "default 20 hours/week for In-Home Care");
}

#[test]
fn context_pricing_matches_explicit_calculation() {
    let assessment = outcome_with(
        &[FALLS_MULTIPLE],
        json!({ "chronic_conditions": ["copd", "stroke"] }),
    );
    let calculator = calculator();
    let ctx = crate::workflows::cost_planner::prepare_context(&assessment);

    let from_context = calculator
        .calculate_for_context(&ctx, CareType::MemoryCare, 1.3)
        .expect("context estimate");
    let explicit = calculator
        .calculate(&assessment, 1.3, Some(CareType::MemoryCare))
        .expect("explicit estimate");

    assert_eq!(from_context, explicit);
    assert_eq!(from_context.escalated_from, None);
}

#[test]
fn regional_label_shows_the_multiplier_as_given() {
    let result = calculator()
        .calculate(&outcome(&[]), 1.3, Some(CareType::AssistedLiving))
        .expect("estimate succeeds");

    assert_eq!(result.breakdown[1].label, "Regional Adjustment (1.3x)");
}
