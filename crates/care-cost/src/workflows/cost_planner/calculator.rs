use std::str::FromStr;
use std::sync::OnceLock;

use tracing::{debug, info, warn};

use super::addons::calculate_add_ons;
use super::domain::{
    AddOn, AssessmentContext, AssessmentOutcome, BreakdownLine, CareType, CostRange, CostResult,
    PricingPath,
};
use super::error::CostError;
use super::normalizer::prepare_context;
use super::ranges::calculate_cost_range;
use super::tables::{
    BaseCostEntry, CostTables, CALCULATION_METHOD, MODEL_VERSION, WEEKS_PER_MONTH,
};
use super::tiers::{assign_tier, escalate};

static STANDARD_CALCULATOR: OnceLock<CostCalculator> = OnceLock::new();

const HIGH_ACUITY_DESCRIPTION: &str = "24/7 specialized memory care with highest level of support";

/// Stateless cost engine over a fixed set of pricing tables.
#[derive(Debug, Clone)]
pub struct CostCalculator {
    tables: CostTables,
}

impl Default for CostCalculator {
    fn default() -> Self {
        Self::new(CostTables::standard().clone())
    }
}

impl CostCalculator {
    pub fn new(tables: CostTables) -> Self {
        Self { tables }
    }

    /// Shared calculator over the 2024 tables.
    pub fn standard() -> &'static CostCalculator {
        STANDARD_CALCULATOR.get_or_init(CostCalculator::default)
    }

    pub fn tables(&self) -> &CostTables {
        &self.tables
    }

    /// Price one assessment. An explicit care type skips the escalation chain; otherwise the
    /// upstream recommendation (assisted living when absent) is escalated first.
    pub fn calculate(
        &self,
        outcome: &AssessmentOutcome,
        regional_multiplier: f64,
        care_type: Option<CareType>,
    ) -> Result<CostResult, CostError> {
        let ctx = prepare_context(outcome);

        let (care_type, escalated_from) = match care_type {
            Some(explicit) => (explicit, None),
            None => {
                let recommended = match outcome.recommendation.as_deref() {
                    Some(raw) => CareType::from_str(raw)?,
                    None => CareType::AssistedLiving,
                };
                let resolved = escalate(recommended, &ctx);
                if resolved != recommended {
                    info!(from = %recommended, to = %resolved, "care type escalated");
                }
                (resolved, (resolved != recommended).then_some(recommended))
            }
        };

        debug!(care_type = %care_type, "care type resolved");
        self.price(&ctx, care_type, regional_multiplier, escalated_from)
    }

    /// Price an already-normalized context for a specific care type.
    pub fn calculate_for_context(
        &self,
        ctx: &AssessmentContext,
        care_type: CareType,
        regional_multiplier: f64,
    ) -> Result<CostResult, CostError> {
        self.price(ctx, care_type, regional_multiplier, None)
    }

    /// Price the same assessment under several care types, in the order given.
    pub fn compare(
        &self,
        outcome: &AssessmentOutcome,
        regional_multiplier: f64,
        care_types: &[CareType],
    ) -> Result<Vec<CostResult>, CostError> {
        let ctx = prepare_context(outcome);
        care_types
            .iter()
            .map(|care_type| self.calculate_for_context(&ctx, *care_type, regional_multiplier))
            .collect()
    }

    fn price(
        &self,
        ctx: &AssessmentContext,
        care_type: CareType,
        regional_multiplier: f64,
        escalated_from: Option<CareType>,
    ) -> Result<CostResult, CostError> {
        let multiplier = sanitize_multiplier(regional_multiplier);

        let quote = match care_type.pricing() {
            PricingPath::Tiered => self.tiered_quote(ctx, care_type, multiplier)?,
            PricingPath::HighAcuity => self.high_acuity_quote(ctx, care_type, multiplier)?,
            PricingPath::Hourly => self.hourly_quote(ctx, care_type, multiplier)?,
        };

        let range = calculate_cost_range(
            quote.total,
            ctx,
            care_type,
            &self.tables.confidence_ranges,
        );
        let entry = self.tables.base_entry(care_type)?;

        debug!(
            care_type = %care_type,
            tier = %quote.tier_id,
            tier_reason = %quote.tier_reason,
            addons = quote.addons.len(),
            confidence = %range.confidence,
            total = quote.total,
            "care cost estimated"
        );

        Ok(assemble(
            quote,
            range,
            care_type,
            escalated_from,
            multiplier,
            entry,
        ))
    }

    fn tiered_quote(
        &self,
        ctx: &AssessmentContext,
        care_type: CareType,
        multiplier: f64,
    ) -> Result<Quote, CostError> {
        let base_cost = self.tables.monthly_base(care_type)?;
        let regional_base = base_cost * multiplier;

        let assignment = assign_tier(care_type, ctx, &self.tables)?;
        let tier_increment = assignment.increment * multiplier;

        let addons = calculate_add_ons(ctx, regional_base, &self.tables.addons);
        if addons.capped() {
            debug!(cap = addons.cap, "add-ons scaled down to cap");
        }
        let addon_total = addons.total();

        let total = regional_base + tier_increment + addon_total;

        Ok(Quote {
            total,
            base_cost,
            regional_base,
            tier_label: assignment.label.clone(),
            tier_id: assignment.tier_id.as_str().to_string(),
            tier_description: assignment.description,
            tier_increment,
            tier_reason: assignment.reason,
            hourly: HourlyDetail::default(),
            lines: vec![
                ("National Base".to_string(), base_cost),
                (regional_label(multiplier), regional_base - base_cost),
                (format!("Care Tier: {}", assignment.label), tier_increment),
                ("Add-ons".to_string(), addon_total),
            ],
            addons: addons.items,
            addon_total,
            addon_cap: addons.cap,
        })
    }

    fn high_acuity_quote(
        &self,
        ctx: &AssessmentContext,
        care_type: CareType,
        multiplier: f64,
    ) -> Result<Quote, CostError> {
        let base_cost = self.tables.monthly_base(care_type)?;
        let regional_base = base_cost * multiplier;

        let addons = calculate_add_ons(ctx, regional_base, &self.tables.addons);
        let addon_total = addons.total();

        Ok(Quote {
            total: regional_base + addon_total,
            base_cost,
            regional_base,
            tier_label: "High Acuity".to_string(),
            tier_id: "high_acuity".to_string(),
            tier_description: HIGH_ACUITY_DESCRIPTION.to_string(),
            tier_increment: 0.0,
            tier_reason: "high-acuity memory care has no tiers".to_string(),
            hourly: HourlyDetail::default(),
            lines: vec![
                ("National Base".to_string(), base_cost),
                (regional_label(multiplier), regional_base - base_cost),
                ("Add-ons".to_string(), addon_total),
            ],
            addons: addons.items,
            addon_total,
            addon_cap: addons.cap,
        })
    }

    fn hourly_quote(
        &self,
        ctx: &AssessmentContext,
        care_type: CareType,
        multiplier: f64,
    ) -> Result<Quote, CostError> {
        let hourly_base = self.tables.hourly_base(care_type)?;
        let regional_hourly = hourly_base * multiplier;

        let default_hours = match care_type {
            CareType::HomemakerCare => 10.0,
            _ => 20.0,
        };
        let requested_hours = ctx.answers.recommended_hours_per_week;
        let full_hours = requested_hours.unwrap_or(default_hours);

        let with_carry = care_type == CareType::HomeWithCarry;
        let hours_per_week = if with_carry { full_hours * 0.5 } else { full_hours };
        let family_hours_per_week = full_hours - hours_per_week;
        let hours_per_month = hours_per_week * WEEKS_PER_MONTH;

        let national_monthly = hourly_base * hours_per_month;
        let total = regional_hourly * hours_per_month;

        let mut lines = vec![
            (
                format!(
                    "National Hourly Rate ({} hrs/month)",
                    format_hours(hours_per_month)
                ),
                national_monthly,
            ),
            (
                regional_label(multiplier),
                (regional_hourly - hourly_base) * hours_per_month,
            ),
        ];

        let (tier_id, tier_label, tier_description) = if with_carry {
            lines.push((
                format!(
                    "Family provides ~{} hrs/week",
                    format_hours(family_hours_per_week)
                ),
                0.0,
            ));
            (
                "hourly_with_carry",
                format!(
                    "{} hours/week (with family support)",
                    format_hours(hours_per_week)
                ),
                "Paid in-home care with family covering the remaining hours",
            )
        } else if care_type == CareType::HomemakerCare {
            (
                "hourly",
                format!("{} hours/week", format_hours(hours_per_week)),
                "Hourly homemaker services for light assistance",
            )
        } else {
            (
                "hourly",
                format!("{} hours/week", format_hours(hours_per_week)),
                "Hourly home health aide support",
            )
        };

        let tier_reason = match requested_hours {
            Some(_) => "recommended hours from assessment".to_string(),
            None => format!(
                "default {} hours/week for {}",
                format_hours(default_hours),
                care_type.label()
            ),
        };

        Ok(Quote {
            total,
            base_cost: national_monthly,
            regional_base: total,
            tier_label,
            tier_id: tier_id.to_string(),
            tier_description: tier_description.to_string(),
            tier_increment: 0.0,
            tier_reason,
            hourly: HourlyDetail {
                hourly_base,
                regional_hourly,
                hours_per_week,
                hours_per_month,
                family_hours_per_week,
            },
            lines,
            addons: Vec::new(),
            addon_total: 0.0,
            addon_cap: 0.0,
        })
    }
}

/// Price with the standard tables, parsing the optional care type override.
pub fn calculate_care_costs(
    outcome: &AssessmentOutcome,
    regional_multiplier: f64,
    care_type: Option<&str>,
) -> Result<CostResult, CostError> {
    let care_type = care_type.map(CareType::from_str).transpose()?;
    CostCalculator::standard().calculate(outcome, regional_multiplier, care_type)
}

/// Unrounded figures for one care type; rounding happens once in `assemble`.
struct Quote {
    total: f64,
    base_cost: f64,
    regional_base: f64,
    tier_label: String,
    tier_id: String,
    tier_description: String,
    tier_increment: f64,
    tier_reason: String,
    hourly: HourlyDetail,
    lines: Vec<(String, f64)>,
    addons: Vec<AddOn>,
    addon_total: f64,
    addon_cap: f64,
}

#[derive(Default)]
struct HourlyDetail {
    hourly_base: f64,
    regional_hourly: f64,
    hours_per_week: f64,
    hours_per_month: f64,
    family_hours_per_week: f64,
}

fn assemble(
    quote: Quote,
    range: CostRange,
    care_type: CareType,
    escalated_from: Option<CareType>,
    multiplier: f64,
    entry: &BaseCostEntry,
) -> CostResult {
    let breakdown = reconcile(&quote.lines);
    let addons = quote
        .addons
        .into_iter()
        .map(|mut addon| {
            addon.amount = round_cents(addon.amount);
            addon
        })
        .collect();

    CostResult {
        total_monthly: round_cents(quote.total),
        base_cost: round_cents(quote.base_cost),
        regional_base: round_cents(quote.regional_base),
        tier: quote.tier_label,
        tier_id: quote.tier_id,
        tier_description: quote.tier_description,
        tier_increment: round_cents(quote.tier_increment),
        tier_reason: quote.tier_reason,
        hourly_base: round_cents(quote.hourly.hourly_base),
        regional_hourly: round_cents(quote.hourly.regional_hourly),
        hours_per_week: round_tenths(quote.hourly.hours_per_week),
        hours_per_month: round_tenths(quote.hourly.hours_per_month),
        family_hours_per_week: round_tenths(quote.hourly.family_hours_per_week),
        addons,
        addon_total: round_cents(quote.addon_total),
        addon_cap: round_cents(quote.addon_cap),
        breakdown,
        range: CostRange {
            low: round_cents(range.low),
            likely: round_cents(range.likely),
            high: round_cents(range.high),
            ..range
        },
        care_type,
        escalated_from,
        regional_multiplier: multiplier,
        base_cost_derived: entry.derived,
        base_cost_source: entry.source.clone(),
        model_version: MODEL_VERSION.to_string(),
        calculation_method: CALCULATION_METHOD.to_string(),
    }
}

/// Round each line as the step between rounded running totals so the lines add up to the
/// rounded total exactly.
fn reconcile(lines: &[(String, f64)]) -> Vec<BreakdownLine> {
    let mut running = 0.0;
    let mut reported = 0.0;

    lines
        .iter()
        .map(|(label, amount)| {
            running += amount;
            let rounded = round_cents(running);
            let line = BreakdownLine {
                label: label.clone(),
                amount: round_cents(rounded - reported),
            };
            reported = rounded;
            line
        })
        .collect()
}

fn sanitize_multiplier(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!(
            regional_multiplier = value,
            "regional multiplier must be finite and non-negative; pricing at zero"
        );
        0.0
    }
}

fn regional_label(multiplier: f64) -> String {
    format!("Regional Adjustment ({multiplier:?}x)")
}

fn format_hours(hours: f64) -> String {
    if hours.fract().abs() < 1e-9 {
        format!("{hours:.0}")
    } else {
        format!("{hours:.1}")
    }
}

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
