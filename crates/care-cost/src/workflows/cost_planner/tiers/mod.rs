mod escalation;
mod rules;

pub use escalation::{
    escalate, should_recommend_high_acuity_mc, should_recommend_memory_care_instead_of_al,
};

use super::domain::{AssessmentContext, CareType, TierAssignment, TierId};
use super::error::CostError;
use super::tables::CostTables;
use rules::{first_match, ASSISTED_LIVING_RULES, MEMORY_CARE_RULES};

pub fn assign_assisted_living_tier(ctx: &AssessmentContext) -> TierId {
    first_match(ASSISTED_LIVING_RULES, ctx).0
}

pub fn assign_memory_care_tier(ctx: &AssessmentContext) -> TierId {
    first_match(MEMORY_CARE_RULES, ctx).0
}

/// Resolve the tier for a tiered facility care type and attach its table row.
pub fn assign_tier(
    care_type: CareType,
    ctx: &AssessmentContext,
    tables: &CostTables,
) -> Result<TierAssignment, CostError> {
    let rules = match care_type {
        CareType::AssistedLiving => ASSISTED_LIVING_RULES,
        CareType::MemoryCare => MEMORY_CARE_RULES,
        other => return Err(CostError::missing(other, "tier rules")),
    };

    let (tier_id, reason) = first_match(rules, ctx);
    let config = tables.tier_config(care_type, tier_id)?;

    Ok(TierAssignment {
        tier_id,
        label: config.label.clone(),
        description: config.description.clone(),
        increment: config.increment,
        reason: reason.to_string(),
    })
}

#[cfg(test)]
pub(crate) fn rules_for_tests(care_type: CareType) -> &'static [rules::TierRule] {
    match care_type {
        CareType::MemoryCare => MEMORY_CARE_RULES,
        _ => ASSISTED_LIVING_RULES,
    }
}
