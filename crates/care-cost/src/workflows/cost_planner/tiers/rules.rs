use super::super::domain::{AssessmentContext, TierId};
use super::super::flags::{
    BEHAVIORAL_CONCERNS, CONTINUOUS_SUPERVISION, FALLS_MULTIPLE, HIGH_DEPENDENCE,
    HIGH_MOBILITY_DEPENDENCE, INCONTINENCE_MANAGEMENT, MILD_COGNITIVE_DECLINE,
    MODERATE_COGNITIVE_DECLINE, MODERATE_MOBILITY, SEVERE_COGNITIVE_RISK,
    TRANSFER_ASSISTANCE_1PERSON, TRANSFER_ASSISTANCE_2PERSON, TRANSFER_LIFT_REQUIRED,
};

pub(crate) const DEFAULT_REASON: &str = "no tier criteria met";

/// Single guard in a tier cascade. Rules are listed highest tier first; the first rule
/// whose predicate holds decides the tier.
pub(crate) struct TierRule {
    pub tier: TierId,
    pub reason: &'static str,
    pub applies: fn(&AssessmentContext) -> bool,
}

pub(crate) const ASSISTED_LIVING_RULES: &[TierRule] = &[
    TierRule {
        tier: TierId::Tier4,
        reason: "two or more high-intensity needs",
        applies: al_multiple_high_intensity,
    },
    TierRule {
        tier: TierId::Tier3,
        reason: "severe cognitive risk",
        applies: |ctx| ctx.has_flag(SEVERE_COGNITIVE_RISK),
    },
    TierRule {
        tier: TierId::Tier3,
        reason: "moderate cognitive decline with 2+ ADLs",
        applies: |ctx| ctx.has_flag(MODERATE_COGNITIVE_DECLINE) && ctx.badls_count() >= 2,
    },
    TierRule {
        tier: TierId::Tier3,
        reason: "behavioral concerns",
        applies: |ctx| ctx.has_flag(BEHAVIORAL_CONCERNS),
    },
    TierRule {
        tier: TierId::Tier3,
        reason: "3+ ADLs",
        applies: |ctx| ctx.badls_count() >= 3,
    },
    TierRule {
        tier: TierId::Tier3,
        reason: "high dependence",
        applies: |ctx| ctx.has_flag(HIGH_DEPENDENCE),
    },
    TierRule {
        tier: TierId::Tier2,
        reason: "high mobility dependence",
        applies: |ctx| ctx.has_flag(HIGH_MOBILITY_DEPENDENCE),
    },
    TierRule {
        tier: TierId::Tier2,
        reason: "one-person transfer assistance",
        applies: |ctx| ctx.has_flag(TRANSFER_ASSISTANCE_1PERSON),
    },
    TierRule {
        tier: TierId::Tier2,
        reason: "2+ ADLs",
        applies: |ctx| ctx.badls_count() >= 2,
    },
    TierRule {
        tier: TierId::Tier2,
        reason: "incontinence management",
        applies: |ctx| ctx.has_flag(INCONTINENCE_MANAGEMENT),
    },
    TierRule {
        tier: TierId::Tier2,
        reason: "multiple falls",
        applies: |ctx| ctx.has_flag(FALLS_MULTIPLE),
    },
    TierRule {
        tier: TierId::Tier1,
        reason: "moderate or complex medication management",
        applies: |ctx| ctx.meds_complex(),
    },
    TierRule {
        tier: TierId::Tier1,
        reason: "help with 1 ADL",
        applies: |ctx| ctx.badls_count() == 1,
    },
    TierRule {
        tier: TierId::Tier1,
        reason: "4+ IADLs",
        applies: |ctx| ctx.iadls_count() >= 4,
    },
    TierRule {
        tier: TierId::Tier1,
        reason: "mild cognitive decline",
        applies: |ctx| ctx.has_flag(MILD_COGNITIVE_DECLINE),
    },
];

pub(crate) const MEMORY_CARE_RULES: &[TierRule] = &[
    TierRule {
        tier: TierId::Tier4,
        reason: "behavioral concerns with 3+ behaviors",
        applies: |ctx| ctx.has_flag(BEHAVIORAL_CONCERNS) && ctx.behaviors_count() >= 3,
    },
    TierRule {
        tier: TierId::Tier4,
        reason: "continuous supervision with high dependence",
        applies: |ctx| ctx.has_flag(CONTINUOUS_SUPERVISION) && ctx.has_flag(HIGH_DEPENDENCE),
    },
    TierRule {
        tier: TierId::Tier4,
        reason: "4+ ADLs",
        applies: |ctx| ctx.badls_count() >= 4,
    },
    TierRule {
        tier: TierId::Tier4,
        reason: "mechanical lift required",
        applies: |ctx| ctx.has_flag(TRANSFER_LIFT_REQUIRED),
    },
    TierRule {
        tier: TierId::Tier3,
        reason: "behavioral concerns",
        applies: |ctx| ctx.has_flag(BEHAVIORAL_CONCERNS),
    },
    TierRule {
        tier: TierId::Tier3,
        reason: "3+ ADLs",
        applies: |ctx| ctx.badls_count() >= 3,
    },
    TierRule {
        tier: TierId::Tier3,
        reason: "two-person transfer assistance",
        applies: |ctx| ctx.has_flag(TRANSFER_ASSISTANCE_2PERSON),
    },
    TierRule {
        tier: TierId::Tier3,
        reason: "high dependence",
        applies: |ctx| ctx.has_flag(HIGH_DEPENDENCE),
    },
    TierRule {
        tier: TierId::Tier2,
        reason: "2+ ADLs",
        applies: |ctx| ctx.badls_count() >= 2,
    },
    TierRule {
        tier: TierId::Tier2,
        reason: "high mobility dependence",
        applies: |ctx| ctx.has_flag(HIGH_MOBILITY_DEPENDENCE),
    },
    TierRule {
        tier: TierId::Tier2,
        reason: "incontinence management",
        applies: |ctx| ctx.has_flag(INCONTINENCE_MANAGEMENT),
    },
    TierRule {
        tier: TierId::Tier1,
        reason: "help with 1 ADL",
        applies: |ctx| ctx.badls_count() == 1,
    },
    TierRule {
        tier: TierId::Tier1,
        reason: "one-person transfer assistance",
        applies: |ctx| ctx.has_flag(TRANSFER_ASSISTANCE_1PERSON),
    },
    TierRule {
        tier: TierId::Tier1,
        reason: "moderate mobility needs",
        applies: |ctx| ctx.has_flag(MODERATE_MOBILITY),
    },
];

fn al_multiple_high_intensity(ctx: &AssessmentContext) -> bool {
    let needs = [
        ctx.has_flag(SEVERE_COGNITIVE_RISK),
        ctx.has_flag(HIGH_MOBILITY_DEPENDENCE),
        ctx.has_flag(BEHAVIORAL_CONCERNS),
        ctx.badls_count() >= 3,
        ctx.has_flag(CONTINUOUS_SUPERVISION),
    ];
    needs.iter().filter(|held| **held).count() >= 2
}

pub(crate) fn first_match(rules: &[TierRule], ctx: &AssessmentContext) -> (TierId, &'static str) {
    rules
        .iter()
        .find(|rule| (rule.applies)(ctx))
        .map(|rule| (rule.tier, rule.reason))
        .unwrap_or((TierId::Tier0, DEFAULT_REASON))
}
