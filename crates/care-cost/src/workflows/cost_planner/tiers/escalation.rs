use super::super::domain::{AssessmentContext, CareType, TierId};
use super::super::flags::{
    BEHAVIORAL_CONCERNS, CONTINUOUS_SUPERVISION, MEMORY_CARE_DX, SEVERE_COGNITIVE_RISK,
    TRANSFER_LIFT_REQUIRED,
};
use super::assign_memory_care_tier;

/// Assisted living overflow: cognitive or behavioral needs beyond what AL can serve.
pub fn should_recommend_memory_care_instead_of_al(ctx: &AssessmentContext) -> bool {
    let behavioral = ctx.has_flag(BEHAVIORAL_CONCERNS);
    let supervision = ctx.has_flag(CONTINUOUS_SUPERVISION);

    if ctx.has_flag(MEMORY_CARE_DX) && (ctx.badls_count() >= 2 || behavioral || supervision) {
        return true;
    }

    if ctx.has_flag(SEVERE_COGNITIVE_RISK)
        && (behavioral || supervision || ctx.answers.safe_alone.as_deref() == Some("no"))
    {
        return true;
    }

    ctx.behaviors_count() >= 3
}

/// Memory care tier 4 plus a skilled-nursing indicator.
pub fn should_recommend_high_acuity_mc(ctx: &AssessmentContext, mc_tier: TierId) -> bool {
    if mc_tier != TierId::Tier4 {
        return false;
    }

    ctx.has_flag(TRANSFER_LIFT_REQUIRED)
        || ctx.answers.incontinence.as_deref() == Some("complete")
        || (ctx.has_flag(CONTINUOUS_SUPERVISION) && ctx.behaviors_count() >= 2)
}

/// Walk the AL -> MC -> high-acuity MC chain starting from the upstream recommendation.
///
/// The high-acuity check reads the memory care tier computed from this same context, before
/// the care type changes.
pub fn escalate(recommended: CareType, ctx: &AssessmentContext) -> CareType {
    let mut care_type = recommended;

    if care_type == CareType::AssistedLiving && should_recommend_memory_care_instead_of_al(ctx) {
        care_type = CareType::MemoryCare;
    }

    if care_type == CareType::MemoryCare {
        let mc_tier = assign_memory_care_tier(ctx);
        if should_recommend_high_acuity_mc(ctx, mc_tier) {
            care_type = CareType::MemoryCareHighAcuity;
        }
    }

    care_type
}
