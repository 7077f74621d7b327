use std::collections::BTreeSet;

use serde_json::{Map, Value};

use super::domain::{AssessmentContext, AssessmentOutcome, NormalizedAnswers};
use super::flags::NONE_SENTINEL;

/// Build the canonical context for one calculation. Never fails: anything missing or
/// malformed reads as "no need reported".
pub fn prepare_context(outcome: &AssessmentOutcome) -> AssessmentContext {
    let flags: BTreeSet<String> = outcome.flags.iter().cloned().collect();
    let answers = normalize_answers(&outcome.answers);

    AssessmentContext {
        flags,
        answers,
        tier: outcome.tier.clone(),
        score: outcome.score.unwrap_or(0),
        support_band: outcome
            .support_band
            .clone()
            .unwrap_or_else(|| "low".to_string()),
        hours_band: outcome
            .hours_band
            .clone()
            .unwrap_or_else(|| "<1h".to_string()),
    }
}

pub(crate) fn normalize_answers(raw: &Map<String, Value>) -> NormalizedAnswers {
    let badls = filtered_list(raw.get("badls"));
    let iadls = filtered_list(raw.get("iadls"));
    let behaviors = filtered_list(raw.get("behaviors"));
    let chronic_conditions = filtered_list(raw.get("chronic_conditions"));

    NormalizedAnswers {
        badls_count: badls.len(),
        badls,
        iadls_count: iadls.len(),
        iadls,
        behaviors_count: behaviors.len(),
        behaviors,
        chronic_conditions,
        meds_complexity: category(raw, "meds_complexity"),
        incontinence: category(raw, "incontinence"),
        safe_alone: category(raw, "safe_alone"),
        transfers: category(raw, "transfers"),
        mobility: category(raw, "mobility"),
        memory_changes: category(raw, "memory_changes"),
        mood: category(raw, "mood"),
        falls: category(raw, "falls"),
        recommended_hours_per_week: hours(raw.get("recommended_hours_per_week")),
    }
}

fn filtered_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|item| *item != NONE_SENTINEL)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn category(raw: &Map<String, Value>, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Upper bound on a weekly hours answer; anything beyond a full week reads as unanswered.
const HOURS_PER_WEEK: f64 = 168.0;

fn hours(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    (parsed.is_finite() && (0.0..=HOURS_PER_WEEK).contains(&parsed)).then_some(parsed)
}
