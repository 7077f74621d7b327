use crate::infra::{load_assessment, parse_care_type, parse_regional_multiplier};
use care_cost::config::AppConfig;
use care_cost::error::AppError;
use care_cost::workflows::cost_planner::flags::{
    BEHAVIORAL_CONCERNS, CONTINUOUS_SUPERVISION, FALLS_MULTIPLE, HIGH_MOBILITY_DEPENDENCE,
    INCONTINENCE_MANAGEMENT, MEMORY_CARE_DX, MODERATE_COGNITIVE_DECLINE, TRANSFER_LIFT_REQUIRED,
};
use care_cost::workflows::cost_planner::{
    AssessmentOutcome, CareType, CostCalculator, CostResult,
};
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Assessment outcome JSON file
    #[arg(long)]
    pub(crate) assessment: PathBuf,
    /// Regional cost multiplier (defaults to COST_REGIONAL_MULTIPLIER or 1.0)
    #[arg(long, value_parser = parse_regional_multiplier)]
    pub(crate) regional_multiplier: Option<f64>,
    /// Price this care type instead of the escalated recommendation
    #[arg(long, value_parser = parse_care_type)]
    pub(crate) care_type: Option<CareType>,
    /// Print the full cost result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Regional cost multiplier applied to every scenario
    #[arg(long, value_parser = parse_regional_multiplier)]
    pub(crate) regional_multiplier: Option<f64>,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let EstimateArgs {
        assessment,
        regional_multiplier,
        care_type,
        json,
    } = args;

    let outcome = load_assessment(&assessment)?;
    let multiplier = resolve_multiplier(regional_multiplier)?;
    let result = CostCalculator::standard().calculate(&outcome, multiplier, care_type)?;

    if json {
        println!("{}", render_json(&result)?);
    } else {
        print!("{}", render_estimate(&result));
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let multiplier = resolve_multiplier(args.regional_multiplier)?;
    let calculator = CostCalculator::standard();

    println!("Care cost demo (regional multiplier {multiplier:?}x)");
    println!("==============================================");

    for scenario in demo_scenarios() {
        let result = calculator.calculate(&scenario.outcome, multiplier, scenario.care_type)?;
        println!("{:<34} {}", scenario.name, result.summary());
        if let Some(original) = result.escalated_from {
            println!("{:<34}   escalated from {}", "", original.label());
        }
    }

    Ok(())
}

/// Failing to write the result is an output error, not a bad assessment.
pub(crate) fn render_json(result: &CostResult) -> Result<String, AppError> {
    serde_json::to_string_pretty(result).map_err(output_error)
}

fn output_error(err: serde_json::Error) -> AppError {
    AppError::Io(std::io::Error::other(err))
}

fn resolve_multiplier(requested: Option<f64>) -> Result<f64, AppError> {
    match requested {
        Some(multiplier) => Ok(multiplier),
        None => Ok(AppConfig::load()?.pricing.regional_multiplier),
    }
}

/// Plain-text rendering used by `estimate` without `--json`.
pub(crate) fn render_estimate(result: &CostResult) -> String {
    let mut out = String::new();
    out.push_str(&result.summary());
    out.push('\n');

    if let Some(original) = result.escalated_from {
        out.push_str(&format!(
            "  Escalated from {} to {}\n",
            original.label(),
            result.care_type.label()
        ));
    }
    out.push_str(&format!(
        "  Tier: {} ({})\n",
        result.tier_description, result.tier_reason
    ));

    out.push_str("  Breakdown:\n");
    for line in &result.breakdown {
        out.push_str(&format!("    {:<44} ${:>10.2}\n", line.label, line.amount));
    }
    out.push_str(&format!(
        "    {:<44} ${:>10.2}\n",
        "Total", result.total_monthly
    ));

    if !result.addons.is_empty() {
        out.push_str("  Add-ons:\n");
        for addon in &result.addons {
            let capped = if addon.capped { " (capped)" } else { "" };
            out.push_str(&format!(
                "    {}: ${:.2}{} - {}\n",
                addon.label, addon.amount, capped, addon.reason
            ));
        }
    }

    out.push_str(&format!("  {}\n", result.range.explanation));
    out.push_str(&format!(
        "  Source: {} (model {})\n",
        result.base_cost_source.name, result.model_version
    ));
    out
}

struct DemoScenario {
    name: &'static str,
    outcome: AssessmentOutcome,
    care_type: Option<CareType>,
}

fn demo_scenarios() -> Vec<DemoScenario> {
    vec![
        DemoScenario {
            name: "Independent resident",
            outcome: AssessmentOutcome::new().with_recommendation(CareType::AssistedLiving),
            care_type: None,
        },
        DemoScenario {
            name: "Falls with chronic conditions",
            outcome: AssessmentOutcome::new()
                .with_flags([FALLS_MULTIPLE, INCONTINENCE_MANAGEMENT])
                .with_answer("badls", json!(["bathing"]))
                .with_answer("chronic_conditions", json!(["copd", "diabetes"]))
                .with_recommendation(CareType::AssistedLiving),
            care_type: None,
        },
        DemoScenario {
            name: "Moderate decline, mobility aid",
            outcome: AssessmentOutcome::new()
                .with_flags([MODERATE_COGNITIVE_DECLINE, HIGH_MOBILITY_DEPENDENCE])
                .with_answer("badls", json!(["bathing", "dressing"]))
                .with_answer("meds_complexity", "moderate")
                .with_recommendation(CareType::AssistedLiving),
            care_type: None,
        },
        DemoScenario {
            name: "Dementia with behaviors",
            outcome: AssessmentOutcome::new()
                .with_flags([MEMORY_CARE_DX, BEHAVIORAL_CONCERNS, CONTINUOUS_SUPERVISION])
                .with_answer("badls", json!(["bathing", "dressing"]))
                .with_answer("behaviors", json!(["wandering", "sundowning"]))
                .with_recommendation(CareType::AssistedLiving),
            care_type: None,
        },
        DemoScenario {
            name: "Dementia needing a lift",
            outcome: AssessmentOutcome::new()
                .with_flags([MEMORY_CARE_DX, TRANSFER_LIFT_REQUIRED])
                .with_answer(
                    "badls",
                    json!(["bathing", "dressing", "toileting", "transferring"]),
                )
                .with_recommendation(CareType::MemoryCare),
            care_type: None,
        },
        DemoScenario {
            name: "In-home aide, 40 hrs/week",
            outcome: AssessmentOutcome::new().with_answer("recommended_hours_per_week", 40),
            care_type: Some(CareType::InHomeCare),
        },
        DemoScenario {
            name: "Homemaker, default hours",
            outcome: AssessmentOutcome::new(),
            care_type: Some(CareType::HomemakerCare),
        },
        DemoScenario {
            name: "In-home with family carry",
            outcome: AssessmentOutcome::new().with_answer("recommended_hours_per_week", 20),
            care_type: Some(CareType::HomeWithCarry),
        },
    ]
}
