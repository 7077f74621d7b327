//! Care flag identifiers emitted by the guided care planning assessment.

pub const SEVERE_COGNITIVE_RISK: &str = "severe_cognitive_risk";
pub const MODERATE_COGNITIVE_DECLINE: &str = "moderate_cognitive_decline";
pub const MILD_COGNITIVE_DECLINE: &str = "mild_cognitive_decline";
pub const MEMORY_CARE_DX: &str = "memory_care_dx";

pub const HIGH_MOBILITY_DEPENDENCE: &str = "high_mobility_dependence";
pub const MODERATE_MOBILITY: &str = "moderate_mobility";
pub const HIGH_DEPENDENCE: &str = "high_dependence";
pub const TRANSFER_ASSISTANCE_1PERSON: &str = "transfer_assistance_1person";
pub const TRANSFER_ASSISTANCE_2PERSON: &str = "transfer_assistance_2person";
pub const TRANSFER_LIFT_REQUIRED: &str = "transfer_lift_required";
pub const INCONTINENCE_MANAGEMENT: &str = "incontinence_management";

pub const BEHAVIORAL_CONCERNS: &str = "behavioral_concerns";
pub const CONTINUOUS_SUPERVISION: &str = "continuous_supervision";
pub const FALLS_MULTIPLE: &str = "falls_multiple";

/// Chronic conditions that drive the chronic-condition add-on on their own.
pub const HIGH_IMPACT_CONDITIONS: [&str; 4] = ["parkinsons", "copd", "heart_disease", "stroke"];

/// Sentinel answer meaning "nothing selected" in list-valued questions.
pub(crate) const NONE_SENTINEL: &str = "none";
