use super::domain::{AssessmentContext, CareType, Confidence, CostRange};
use super::flags::{
    BEHAVIORAL_CONCERNS, CONTINUOUS_SUPERVISION, FALLS_MULTIPLE, HIGH_DEPENDENCE,
    HIGH_MOBILITY_DEPENDENCE, TRANSFER_ASSISTANCE_2PERSON, TRANSFER_LIFT_REQUIRED,
};
use super::tables::ConfidenceRanges;

/// Guard in the uncertainty cascade. High-uncertainty guards yield `Confidence::Low`,
/// moderate ones `Confidence::Medium`; all low-confidence guards are listed first.
struct UncertaintyRule {
    confidence: Confidence,
    applies: fn(&AssessmentContext, CareType) -> bool,
}

const UNCERTAINTY_RULES: &[UncertaintyRule] = &[
    UncertaintyRule {
        confidence: Confidence::Low,
        applies: |ctx, _| ctx.has_flag(BEHAVIORAL_CONCERNS) && ctx.behaviors_count() >= 3,
    },
    UncertaintyRule {
        confidence: Confidence::Low,
        applies: |_, care_type| care_type == CareType::MemoryCareHighAcuity,
    },
    UncertaintyRule {
        confidence: Confidence::Low,
        applies: |ctx, _| ctx.has_flag(TRANSFER_ASSISTANCE_2PERSON) && ctx.badls_count() >= 3,
    },
    UncertaintyRule {
        confidence: Confidence::Low,
        applies: |ctx, _| ctx.has_flag(TRANSFER_LIFT_REQUIRED),
    },
    UncertaintyRule {
        confidence: Confidence::Low,
        applies: |ctx, care_type| {
            care_type == CareType::InHomeCare && ctx.has_flag(CONTINUOUS_SUPERVISION)
        },
    },
    UncertaintyRule {
        confidence: Confidence::Medium,
        applies: |ctx, care_type| care_type.is_memory_care() && ctx.has_flag(BEHAVIORAL_CONCERNS),
    },
    UncertaintyRule {
        confidence: Confidence::Medium,
        applies: |ctx, _| ctx.has_flag(FALLS_MULTIPLE) && ctx.has_flag(HIGH_MOBILITY_DEPENDENCE),
    },
    UncertaintyRule {
        confidence: Confidence::Medium,
        applies: |ctx, _| ctx.chronic_count() >= 3 && ctx.has_flag(FALLS_MULTIPLE),
    },
    UncertaintyRule {
        confidence: Confidence::Medium,
        applies: |ctx, _| ctx.has_flag(HIGH_DEPENDENCE),
    },
    UncertaintyRule {
        confidence: Confidence::Medium,
        applies: |ctx, care_type| {
            ctx.has_flag(CONTINUOUS_SUPERVISION) && care_type != CareType::InHomeCare
        },
    },
];

pub fn has_high_uncertainty(ctx: &AssessmentContext, care_type: CareType) -> bool {
    any_rule(Confidence::Low, ctx, care_type)
}

pub fn has_moderate_uncertainty(ctx: &AssessmentContext, care_type: CareType) -> bool {
    any_rule(Confidence::Medium, ctx, care_type)
}

fn any_rule(confidence: Confidence, ctx: &AssessmentContext, care_type: CareType) -> bool {
    UNCERTAINTY_RULES
        .iter()
        .filter(|rule| rule.confidence == confidence)
        .any(|rule| (rule.applies)(ctx, care_type))
}

pub fn classify_confidence(ctx: &AssessmentContext, care_type: CareType) -> Confidence {
    UNCERTAINTY_RULES
        .iter()
        .find(|rule| (rule.applies)(ctx, care_type))
        .map(|rule| rule.confidence)
        .unwrap_or(Confidence::High)
}

/// Human-readable reasons behind the chosen band. Descriptive only; the band itself comes
/// from `classify_confidence`.
pub fn widening_factors(
    ctx: &AssessmentContext,
    care_type: CareType,
    confidence: Confidence,
) -> Vec<String> {
    let mut factors = Vec::new();

    match confidence {
        Confidence::Low => {
            let behaviors = ctx.behaviors_count();
            if behaviors >= 3 {
                factors.push(format!(
                    "Significant behavioral needs ({behaviors} behaviors) require intensive support"
                ));
            }
            if care_type == CareType::MemoryCareHighAcuity {
                factors.push("High-acuity memory care has wide market variation".to_string());
            }
            if ctx.has_flag(TRANSFER_ASSISTANCE_2PERSON) || ctx.has_flag(TRANSFER_LIFT_REQUIRED) {
                factors.push(
                    "2-person transfers or mechanical lifts require specialized staffing"
                        .to_string(),
                );
            }
            if ctx.has_flag(CONTINUOUS_SUPERVISION) && care_type == CareType::InHomeCare {
                factors.push("24/7 in-home care has wide market variation".to_string());
            }
        }
        Confidence::Medium => {
            if ctx.has_flag(BEHAVIORAL_CONCERNS) {
                factors.push("Behavioral needs may vary and require flexible support".to_string());
            }
            if ctx.has_flag(FALLS_MULTIPLE) {
                factors.push("Fall risk requires enhanced monitoring".to_string());
            }
            let chronic = ctx.chronic_count();
            if chronic >= 3 {
                factors.push(format!(
                    "{chronic} chronic conditions may require additional oversight"
                ));
            }
            if ctx.has_flag(HIGH_DEPENDENCE) {
                factors.push(
                    "High level of care dependency varies by provider capability".to_string(),
                );
            }
            if ctx.has_flag(CONTINUOUS_SUPERVISION) {
                factors.push("Continuous supervision requirements vary by community".to_string());
            }
        }
        Confidence::High => {
            factors.push("Care needs are stable and predictable".to_string());
        }
    }

    factors
}

pub fn range_explanation(confidence: Confidence, range_pct: f64, factors: &[String]) -> String {
    let pct = format!("\u{b1}{:.0}%", range_pct * 100.0);
    match confidence {
        Confidence::High => format!(
            "Cost range is narrow ({pct}) because care needs are stable and predictable. \
             Most communities will fall within this range."
        ),
        Confidence::Medium => format!(
            "Cost range is moderate ({pct}) because {}. \
             Different communities may price these needs differently.",
            factors.join(" and ").to_lowercase()
        ),
        Confidence::Low => format!(
            "Cost range is wide ({pct}) because {}. \
             Significant market variation exists for these complex care needs.",
            factors.join("; ").to_lowercase()
        ),
    }
}

/// Band the total by confidence. Amounts are left unrounded for the caller to round once.
pub fn calculate_cost_range(
    total: f64,
    ctx: &AssessmentContext,
    care_type: CareType,
    ranges: &ConfidenceRanges,
) -> CostRange {
    let confidence = classify_confidence(ctx, care_type);
    let range_pct = ranges.pct(confidence);
    let widening_factors = widening_factors(ctx, care_type, confidence);
    let explanation = range_explanation(confidence, range_pct, &widening_factors);

    CostRange {
        low: total * (1.0 - range_pct),
        likely: total,
        high: total * (1.0 + range_pct),
        confidence,
        range_pct,
        widening_factors,
        explanation,
    }
}
