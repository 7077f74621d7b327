use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::calculator::CostCalculator;
use super::domain::{AssessmentOutcome, CareType, CostResult};
use super::error::CostError;

/// Shared state behind the cost endpoints.
#[derive(Debug, Clone)]
pub struct CostRouterState {
    pub calculator: CostCalculator,
    pub default_regional_multiplier: f64,
}

impl CostRouterState {
    pub fn new(calculator: CostCalculator, default_regional_multiplier: f64) -> Self {
        Self {
            calculator,
            default_regional_multiplier,
        }
    }
}

impl Default for CostRouterState {
    fn default() -> Self {
        Self::new(CostCalculator::default(), 1.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub assessment: AssessmentOutcome,
    #[serde(default)]
    pub regional_multiplier: Option<f64>,
    #[serde(default)]
    pub care_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub assessment: AssessmentOutcome,
    #[serde(default)]
    pub regional_multiplier: Option<f64>,
    #[serde(default)]
    pub care_types: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    pub results: Vec<CostResult>,
}

/// Router builder exposing estimate, comparison, and table endpoints.
pub fn cost_router(state: Arc<CostRouterState>) -> Router {
    Router::new()
        .route("/api/v1/costs/estimate", post(estimate_handler))
        .route("/api/v1/costs/compare", post(compare_handler))
        .route("/api/v1/costs/tables", get(tables_handler))
        .with_state(state)
}

pub(crate) async fn estimate_handler(
    State(state): State<Arc<CostRouterState>>,
    axum::Json(request): axum::Json<EstimateRequest>,
) -> Response {
    let multiplier = match validate_multiplier(
        request.regional_multiplier,
        state.default_regional_multiplier,
    ) {
        Ok(multiplier) => multiplier,
        Err(response) => return response,
    };

    let care_type = match request.care_type.as_deref().map(CareType::from_str).transpose() {
        Ok(care_type) => care_type,
        Err(error) => return cost_error_response(error),
    };

    match state
        .calculator
        .calculate(&request.assessment, multiplier, care_type)
    {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => cost_error_response(error),
    }
}

pub(crate) async fn compare_handler(
    State(state): State<Arc<CostRouterState>>,
    axum::Json(request): axum::Json<CompareRequest>,
) -> Response {
    let multiplier = match validate_multiplier(
        request.regional_multiplier,
        state.default_regional_multiplier,
    ) {
        Ok(multiplier) => multiplier,
        Err(response) => return response,
    };

    let care_types = match request.care_types {
        Some(raw) => match raw
            .iter()
            .map(|value| CareType::from_str(value))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(parsed) => parsed,
            Err(error) => return cost_error_response(error),
        },
        None => CareType::ALL.to_vec(),
    };

    match state
        .calculator
        .compare(&request.assessment, multiplier, &care_types)
    {
        Ok(results) => (StatusCode::OK, axum::Json(CompareResponse { results })).into_response(),
        Err(error) => cost_error_response(error),
    }
}

pub(crate) async fn tables_handler(State(state): State<Arc<CostRouterState>>) -> Response {
    (StatusCode::OK, axum::Json(state.calculator.tables())).into_response()
}

fn validate_multiplier(requested: Option<f64>, default: f64) -> Result<f64, Response> {
    let multiplier = requested.unwrap_or(default);
    if multiplier.is_finite() && multiplier > 0.0 {
        return Ok(multiplier);
    }

    let payload = json!({
        "error": format!("regional multiplier must be a positive number, got {multiplier}"),
    });
    Err((StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response())
}

pub(crate) fn cost_error_status(error: &CostError) -> StatusCode {
    match error {
        CostError::InvalidCareType(_) => StatusCode::BAD_REQUEST,
        CostError::ConfigLookup { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn cost_error_response(error: CostError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (cost_error_status(&error), axum::Json(payload)).into_response()
}
