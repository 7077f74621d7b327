use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::error::CostError;

/// Care settings the planner knows how to price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareType {
    AssistedLiving,
    MemoryCare,
    MemoryCareHighAcuity,
    InHomeCare,
    HomemakerCare,
    HomeWithCarry,
}

impl CareType {
    pub const ALL: [CareType; 6] = [
        CareType::AssistedLiving,
        CareType::MemoryCare,
        CareType::MemoryCareHighAcuity,
        CareType::InHomeCare,
        CareType::HomemakerCare,
        CareType::HomeWithCarry,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            CareType::AssistedLiving => "assisted_living",
            CareType::MemoryCare => "memory_care",
            CareType::MemoryCareHighAcuity => "memory_care_high_acuity",
            CareType::InHomeCare => "in_home_care",
            CareType::HomemakerCare => "homemaker_care",
            CareType::HomeWithCarry => "home_with_carry",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CareType::AssistedLiving => "Assisted Living",
            CareType::MemoryCare => "Memory Care",
            CareType::MemoryCareHighAcuity => "Memory Care (High Acuity)",
            CareType::InHomeCare => "In-Home Care",
            CareType::HomemakerCare => "Homemaker Services",
            CareType::HomeWithCarry => "In-Home with Family Support",
        }
    }

    /// Pricing path the orchestrator dispatches to for this care type.
    pub const fn pricing(self) -> PricingPath {
        match self {
            CareType::AssistedLiving | CareType::MemoryCare => PricingPath::Tiered,
            CareType::MemoryCareHighAcuity => PricingPath::HighAcuity,
            CareType::InHomeCare | CareType::HomemakerCare | CareType::HomeWithCarry => {
                PricingPath::Hourly
            }
        }
    }

    pub const fn is_memory_care(self) -> bool {
        matches!(self, CareType::MemoryCare | CareType::MemoryCareHighAcuity)
    }
}

impl fmt::Display for CareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CareType {
    type Err = CostError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        CareType::ALL
            .into_iter()
            .find(|care_type| care_type.as_str() == trimmed)
            .ok_or_else(|| CostError::InvalidCareType(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingPath {
    Tiered,
    HighAcuity,
    Hourly,
}

/// Discrete pricing level within a facility care type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TierId {
    #[serde(rename = "tier_0")]
    Tier0,
    #[serde(rename = "tier_1")]
    Tier1,
    #[serde(rename = "tier_2")]
    Tier2,
    #[serde(rename = "tier_3")]
    Tier3,
    #[serde(rename = "tier_4")]
    Tier4,
}

impl TierId {
    pub const ALL: [TierId; 5] = [
        TierId::Tier0,
        TierId::Tier1,
        TierId::Tier2,
        TierId::Tier3,
        TierId::Tier4,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            TierId::Tier0 => "tier_0",
            TierId::Tier1 => "tier_1",
            TierId::Tier2 => "tier_2",
            TierId::Tier3 => "tier_3",
            TierId::Tier4 => "tier_4",
        }
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier chosen for a facility care type, with the unscaled increment from the tier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierAssignment {
    pub tier_id: TierId,
    pub label: String,
    pub description: String,
    pub increment: f64,
    pub reason: String,
}

/// Raw assessment outcome as captured upstream. Every field is optional on the wire and
/// values of the wrong shape are dropped rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    #[serde(default, deserialize_with = "lenient_strings")]
    pub flags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub answers: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub recommendation: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tier: Option<String>,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub score: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub support_band: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hours_band: Option<String>,
}

impl AssessmentOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
        self
    }

    pub fn with_answer(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.answers.insert(key.to_string(), value.into());
        self
    }

    pub fn with_recommendation(mut self, care_type: CareType) -> Self {
        self.recommendation = Some(care_type.as_str().to_string());
        self
    }
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_object<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_i64())
}

/// Canonical view of an assessment that every rule in the planner reads from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentContext {
    pub flags: BTreeSet<String>,
    pub answers: NormalizedAnswers,
    pub tier: Option<String>,
    pub score: i64,
    pub support_band: String,
    pub hours_band: String,
}

impl AssessmentContext {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn badls_count(&self) -> usize {
        self.answers.badls_count
    }

    pub fn iadls_count(&self) -> usize {
        self.answers.iadls_count
    }

    pub fn behaviors_count(&self) -> usize {
        self.answers.behaviors_count
    }

    pub fn chronic_count(&self) -> usize {
        self.answers.chronic_conditions.len()
    }

    /// True when medication management was reported as moderate or complex.
    pub fn meds_complex(&self) -> bool {
        matches!(
            self.answers.meds_complexity.as_deref(),
            Some("moderate" | "complex")
        )
    }
}

impl Default for AssessmentContext {
    fn default() -> Self {
        Self {
            flags: BTreeSet::new(),
            answers: NormalizedAnswers::default(),
            tier: None,
            score: 0,
            support_band: "low".to_string(),
            hours_band: "<1h".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedAnswers {
    pub badls: Vec<String>,
    pub badls_count: usize,
    pub iadls: Vec<String>,
    pub iadls_count: usize,
    pub behaviors: Vec<String>,
    pub behaviors_count: usize,
    pub chronic_conditions: Vec<String>,
    pub meds_complexity: Option<String>,
    pub incontinence: Option<String>,
    pub safe_alone: Option<String>,
    pub transfers: Option<String>,
    pub mobility: Option<String>,
    pub memory_changes: Option<String>,
    pub mood: Option<String>,
    pub falls: Option<String>,
    pub recommended_hours_per_week: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnKind {
    FallPrevention,
    ChronicCondition,
    Incontinence,
}

/// Capped secondary cost for a need the tier does not already price in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOn {
    pub kind: AddOnKind,
    pub label: String,
    pub amount: f64,
    pub description: String,
    pub reason: String,
    pub capped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub const fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRange {
    pub low: f64,
    pub likely: f64,
    pub high: f64,
    pub confidence: Confidence,
    pub range_pct: f64,
    pub widening_factors: Vec<String>,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub name: String,
    pub url: String,
    pub notes: String,
}

/// Fully self-describing estimate handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    pub total_monthly: f64,
    pub base_cost: f64,
    pub regional_base: f64,
    pub tier: String,
    pub tier_id: String,
    pub tier_description: String,
    pub tier_increment: f64,
    pub tier_reason: String,
    pub hourly_base: f64,
    pub regional_hourly: f64,
    pub hours_per_week: f64,
    pub hours_per_month: f64,
    pub family_hours_per_week: f64,
    pub addons: Vec<AddOn>,
    pub addon_total: f64,
    pub addon_cap: f64,
    pub breakdown: Vec<BreakdownLine>,
    pub range: CostRange,
    pub care_type: CareType,
    pub escalated_from: Option<CareType>,
    pub regional_multiplier: f64,
    pub base_cost_derived: bool,
    pub base_cost_source: SourceCitation,
    pub model_version: String,
    pub calculation_method: String,
}

impl CostResult {
    pub fn breakdown_total(&self) -> f64 {
        self.breakdown.iter().map(|line| line.amount).sum()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} ({}): ${:.2}/month, range ${:.2} to ${:.2} ({} confidence)",
            self.care_type.label(),
            self.tier,
            self.total_monthly,
            self.range.low,
            self.range.high,
            self.range.confidence
        )
    }
}
