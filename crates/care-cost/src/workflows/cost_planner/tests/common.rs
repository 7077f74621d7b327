use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::cost_planner::{
    cost_router, prepare_context, AssessmentContext, AssessmentOutcome, CostCalculator,
    CostRouterState, CostTables,
};

pub(super) use crate::workflows::cost_planner::flags::{
    BEHAVIORAL_CONCERNS, CONTINUOUS_SUPERVISION, FALLS_MULTIPLE, HIGH_DEPENDENCE,
    HIGH_MOBILITY_DEPENDENCE, INCONTINENCE_MANAGEMENT, MEMORY_CARE_DX, TRANSFER_LIFT_REQUIRED,
};

pub(super) fn calculator() -> CostCalculator {
    CostCalculator::default()
}

pub(super) fn outcome(flags: &[&str]) -> AssessmentOutcome {
    AssessmentOutcome::new().with_flags(flags.iter().copied())
}

pub(super) fn context(flags: &[&str]) -> AssessmentContext {
    prepare_context(&outcome(flags))
}

pub(super) fn context_with(flags: &[&str], answers: Value) -> AssessmentContext {
    prepare_context(&outcome_with(flags, answers))
}

pub(super) fn outcome_with(flags: &[&str], answers: Value) -> AssessmentOutcome {
    let mut outcome = outcome(flags);
    if let Value::Object(map) = answers {
        outcome.answers = map;
    }
    outcome
}

pub(super) fn adls(count: usize) -> Value {
    let all = ["bathing", "dressing", "toileting", "transferring", "eating", "continence"];
    json!(all.iter().take(count).collect::<Vec<_>>())
}

/// Needs that walk the full chain from assisted living to high-acuity memory care.
pub(super) fn high_acuity_outcome() -> AssessmentOutcome {
    outcome_with(
        &[MEMORY_CARE_DX, TRANSFER_LIFT_REQUIRED],
        json!({ "badls": adls(4) }),
    )
}

pub(super) fn router_with(tables: CostTables) -> axum::Router {
    let state = CostRouterState::new(CostCalculator::new(tables), 1.0);
    cost_router(Arc::new(state))
}

pub(super) fn assert_cents(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.005,
        "expected {expected:.2}, got {actual}"
    );
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
