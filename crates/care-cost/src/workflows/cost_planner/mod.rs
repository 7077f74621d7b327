//! Tier-based senior care cost planning.
//!
//! An assessment outcome is normalized into an [`AssessmentContext`], escalated to the care
//! type it actually needs, and priced either through the facility tier tables or through
//! hourly in-home rates. Every estimate carries capped add-ons, a confidence-banded range,
//! and a breakdown that reconciles to the monthly total.

pub mod addons;
pub mod calculator;
pub mod domain;
pub mod error;
pub mod flags;
pub mod normalizer;
pub mod ranges;
pub mod router;
pub mod tables;
pub mod tiers;

#[cfg(test)]
mod tests;

pub use addons::{calculate_add_ons, should_apply_chronic_addon, AddOnSet};
pub use calculator::{calculate_care_costs, CostCalculator};
pub use domain::{
    AddOn, AddOnKind, AssessmentContext, AssessmentOutcome, BreakdownLine, CareType, Confidence,
    CostRange, CostResult, NormalizedAnswers, PricingPath, SourceCitation, TierAssignment, TierId,
};
pub use error::CostError;
pub use normalizer::prepare_context;
pub use ranges::{
    calculate_cost_range, classify_confidence, has_high_uncertainty, has_moderate_uncertainty,
};
pub use router::{cost_router, CompareRequest, CompareResponse, CostRouterState, EstimateRequest};
pub use tables::{
    AddOnPolicy, AddOnRate, BaseCostEntry, BaseRate, ConfidenceRanges, CostTables, TierConfig,
    CALCULATION_METHOD, MODEL_VERSION, WEEKS_PER_MONTH,
};
pub use tiers::{
    assign_assisted_living_tier, assign_memory_care_tier, assign_tier, escalate,
    should_recommend_high_acuity_mc, should_recommend_memory_care_instead_of_al,
};
