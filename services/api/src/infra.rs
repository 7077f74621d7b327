use care_cost::config::parse_multiplier;
use care_cost::error::AppError;
use care_cost::workflows::cost_planner::{AssessmentOutcome, CareType};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn load_assessment(path: &Path) -> Result<AssessmentOutcome, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn parse_regional_multiplier(raw: &str) -> Result<f64, String> {
    parse_multiplier(raw).map_err(|err| err.to_string())
}

pub(crate) fn parse_care_type(raw: &str) -> Result<CareType, String> {
    CareType::from_str(raw).map_err(|err| err.to_string())
}
