use super::domain::{AddOn, AddOnKind, AssessmentContext};
use super::flags::{FALLS_MULTIPLE, HIGH_IMPACT_CONDITIONS, INCONTINENCE_MANAGEMENT};
use super::tables::AddOnPolicy;

/// Add-ons for one facility estimate, already scaled to fit the cap.
#[derive(Debug, Clone, PartialEq)]
pub struct AddOnSet {
    pub items: Vec<AddOn>,
    pub cap: f64,
}

impl AddOnSet {
    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.amount).sum()
    }

    pub fn capped(&self) -> bool {
        self.items.iter().any(|item| item.capped)
    }
}

/// Compute add-ons against the regional base. Items are produced in the order fall,
/// chronic, incontinence. When their sum exceeds the cap every item is scaled by the same
/// factor and marked capped.
pub fn calculate_add_ons(
    ctx: &AssessmentContext,
    regional_base: f64,
    policy: &AddOnPolicy,
) -> AddOnSet {
    let max_addon = policy.cap_for(regional_base);
    let mut items = Vec::new();

    if ctx.has_flag(FALLS_MULTIPLE) {
        items.push(AddOn {
            kind: AddOnKind::FallPrevention,
            label: "Fall Prevention Monitoring".to_string(),
            amount: policy.fall_monitoring.amount(max_addon),
            description: "Enhanced monitoring and prevention protocols".to_string(),
            reason: "Multiple falls in past 6 months".to_string(),
            capped: false,
        });
    }

    if should_apply_chronic_addon(ctx) {
        items.push(AddOn {
            kind: AddOnKind::ChronicCondition,
            label: "Chronic Condition Management".to_string(),
            amount: policy.chronic_complexity.amount(max_addon),
            description: "Coordination and monitoring for complex chronic conditions".to_string(),
            reason: format!(
                "{} chronic conditions requiring active management",
                ctx.chronic_count()
            ),
            capped: false,
        });
    }

    // High ADL counts already lift the tier, which covers incontinence support.
    if ctx.has_flag(INCONTINENCE_MANAGEMENT) && ctx.badls_count() < 2 {
        items.push(AddOn {
            kind: AddOnKind::Incontinence,
            label: "Incontinence Care".to_string(),
            amount: policy.incontinence_care.amount(max_addon),
            description: "Regular assistance and supplies".to_string(),
            reason: "Requires incontinence management support".to_string(),
            capped: false,
        });
    }

    let raw_total: f64 = items.iter().map(|item| item.amount).sum();
    if raw_total > max_addon {
        let scale = max_addon / raw_total;
        for item in &mut items {
            item.amount *= scale;
            item.capped = true;
        }
    }

    AddOnSet {
        items,
        cap: max_addon,
    }
}

/// Chronic conditions only cost more when they change how care is delivered.
pub fn should_apply_chronic_addon(ctx: &AssessmentContext) -> bool {
    let chronic = &ctx.answers.chronic_conditions;
    let chronic_count = chronic.len();
    if chronic_count == 0 {
        return false;
    }

    if chronic_count >= 3 && ctx.meds_complex() {
        return true;
    }

    if chronic_count >= 2 && ctx.has_flag(FALLS_MULTIPLE) {
        return true;
    }

    let high_impact = chronic
        .iter()
        .filter(|condition| HIGH_IMPACT_CONDITIONS.contains(&condition.as_str()))
        .count();

    (high_impact >= 1 && ctx.badls_count() >= 1) || high_impact >= 2
}
