//! Versioned, source-cited pricing tables.
//!
//! Base costs come from the Genworth/CareScout Cost of Care Survey 2024. Tier increments,
//! add-on fractions, and confidence bands are planner policy. The tables are built once per
//! process and only ever read afterwards.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::domain::{CareType, Confidence, SourceCitation, TierId};
use super::error::CostError;

pub const MODEL_VERSION: &str = "3.0.0";
pub const CALCULATION_METHOD: &str = "tier_based";
pub const WEEKS_PER_MONTH: f64 = 4.33;

const GENWORTH_2024: &str = "Genworth Cost of Care Survey 2024";
const GENWORTH_2024_URL: &str = "https://investor.genworth.com/news-events/press-releases/detail/982/";

static STANDARD_TABLES: OnceLock<CostTables> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "unit", content = "amount")]
pub enum BaseRate {
    Monthly(f64),
    Hourly(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseCostEntry {
    pub rate: BaseRate,
    pub derived: bool,
    pub derivation: Option<String>,
    pub source: SourceCitation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    pub increment: f64,
    pub label: String,
    pub description: String,
    pub typical_profile: String,
}

/// Half-width of the estimate band for each confidence label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceRanges {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl ConfidenceRanges {
    pub fn pct(&self, confidence: Confidence) -> f64 {
        match confidence {
            Confidence::High => self.high,
            Confidence::Medium => self.medium,
            Confidence::Low => self.low,
        }
    }
}

/// One add-on's share of the per-call cap plus its absolute ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AddOnRate {
    pub fraction: f64,
    pub ceiling: f64,
}

impl AddOnRate {
    pub fn amount(&self, max_addon: f64) -> f64 {
        (max_addon * self.fraction).min(self.ceiling).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AddOnPolicy {
    pub cap_fraction: f64,
    pub cap_absolute: f64,
    pub fall_monitoring: AddOnRate,
    pub chronic_complexity: AddOnRate,
    pub incontinence_care: AddOnRate,
}

impl AddOnPolicy {
    /// Ceiling on the combined add-on amount for a given regional base.
    pub fn cap_for(&self, regional_base: f64) -> f64 {
        (regional_base * self.cap_fraction)
            .min(self.cap_absolute)
            .max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostTables {
    pub version: String,
    pub base_costs: BTreeMap<CareType, BaseCostEntry>,
    pub assisted_living_tiers: BTreeMap<TierId, TierConfig>,
    pub memory_care_tiers: BTreeMap<TierId, TierConfig>,
    pub confidence_ranges: ConfidenceRanges,
    pub addons: AddOnPolicy,
}

impl CostTables {
    /// Process-wide copy of the 2024 tables.
    pub fn standard() -> &'static CostTables {
        STANDARD_TABLES.get_or_init(CostTables::genworth_2024)
    }

    pub fn genworth_2024() -> Self {
        Self {
            version: "2024".to_string(),
            base_costs: base_costs_2024(),
            assisted_living_tiers: tier_table(ASSISTED_LIVING_TIERS),
            memory_care_tiers: tier_table(MEMORY_CARE_TIERS),
            confidence_ranges: ConfidenceRanges {
                high: 0.07,
                medium: 0.12,
                low: 0.20,
            },
            addons: AddOnPolicy {
                cap_fraction: 0.15,
                cap_absolute: 800.0,
                fall_monitoring: AddOnRate {
                    fraction: 0.50,
                    ceiling: 400.0,
                },
                chronic_complexity: AddOnRate {
                    fraction: 0.375,
                    ceiling: 300.0,
                },
                incontinence_care: AddOnRate {
                    fraction: 0.3125,
                    ceiling: 250.0,
                },
            },
        }
    }

    pub fn base_entry(&self, care_type: CareType) -> Result<&BaseCostEntry, CostError> {
        self.base_costs
            .get(&care_type)
            .ok_or_else(|| CostError::missing(care_type, "base cost"))
    }

    pub fn monthly_base(&self, care_type: CareType) -> Result<f64, CostError> {
        match self.base_entry(care_type)?.rate {
            BaseRate::Monthly(amount) => Ok(amount),
            BaseRate::Hourly(_) => Err(CostError::missing(care_type, "monthly base cost")),
        }
    }

    pub fn hourly_base(&self, care_type: CareType) -> Result<f64, CostError> {
        match self.base_entry(care_type)?.rate {
            BaseRate::Hourly(amount) => Ok(amount),
            BaseRate::Monthly(_) => Err(CostError::missing(care_type, "hourly base rate")),
        }
    }

    /// Tier row for a facility care type. High-acuity memory care shares the memory care table.
    pub fn tier_config(&self, care_type: CareType, tier: TierId) -> Result<&TierConfig, CostError> {
        let table = match care_type {
            CareType::AssistedLiving => &self.assisted_living_tiers,
            CareType::MemoryCare | CareType::MemoryCareHighAcuity => &self.memory_care_tiers,
            _ => return Err(CostError::missing(care_type, "tier table")),
        };

        table
            .get(&tier)
            .ok_or_else(|| CostError::missing(care_type, format!("{tier} entry")))
    }
}

fn citation(name: &str, url: &str, notes: &str) -> SourceCitation {
    SourceCitation {
        name: name.to_string(),
        url: url.to_string(),
        notes: notes.to_string(),
    }
}

fn base_costs_2024() -> BTreeMap<CareType, BaseCostEntry> {
    let mut costs = BTreeMap::new();
    costs.insert(
        CareType::AssistedLiving,
        BaseCostEntry {
            rate: BaseRate::Monthly(5900.0),
            derived: false,
            derivation: None,
            source: citation(
                GENWORTH_2024,
                GENWORTH_2024_URL,
                "National median for assisted living facility",
            ),
        },
    );
    costs.insert(
        CareType::MemoryCare,
        BaseCostEntry {
            rate: BaseRate::Monthly(7400.0),
            derived: true,
            derivation: Some("assisted_living x 1.254".to_string()),
            source: citation(
                "Derived from Genworth 2024 AL median (1.254x premium)",
                "",
                "Typical memory care premium over AL baseline",
            ),
        },
    );
    costs.insert(
        CareType::MemoryCareHighAcuity,
        BaseCostEntry {
            rate: BaseRate::Monthly(9400.0),
            derived: true,
            derivation: Some("memory_care + 2000".to_string()),
            source: citation(
                "Derived from MC base + high-acuity increment",
                "",
                "High-acuity memory care with skilled nursing",
            ),
        },
    );
    costs.insert(
        CareType::InHomeCare,
        BaseCostEntry {
            rate: BaseRate::Hourly(34.0),
            derived: false,
            derivation: None,
            source: citation(
                "Genworth Cost of Care Survey 2024 - Home Health Aide",
                GENWORTH_2024_URL,
                "National median for home health aide",
            ),
        },
    );
    costs.insert(
        CareType::HomemakerCare,
        BaseCostEntry {
            rate: BaseRate::Hourly(33.0),
            derived: false,
            derivation: None,
            source: citation(
                GENWORTH_2024,
                GENWORTH_2024_URL,
                "National median for homemaker services",
            ),
        },
    );
    costs.insert(
        CareType::HomeWithCarry,
        BaseCostEntry {
            rate: BaseRate::Hourly(34.0),
            derived: true,
            derivation: Some("in_home_care hourly rate; family covers remaining hours".to_string()),
            source: citation(
                "Genworth Cost of Care Survey 2024 - Home Health Aide",
                GENWORTH_2024_URL,
                "Paid hours only; family caregiver hours are unpriced",
            ),
        },
    );
    costs
}

type TierRow = (TierId, f64, &'static str, &'static str, &'static str);

const ASSISTED_LIVING_TIERS: &[TierRow] = &[
    (
        TierId::Tier0,
        0.0,
        "Standard Care",
        "Minimal support, independent with most ADLs",
        "Independent resident needing minimal assistance",
    ),
    (
        TierId::Tier1,
        600.0,
        "Light Assistance",
        "Medication management OR mild ADL help",
        "Needs help with 1 ADL or medication management",
    ),
    (
        TierId::Tier2,
        1200.0,
        "Moderate Assistance",
        "Mobility assistance OR moderate ADL help",
        "Uses walker/wheelchair or needs help with 2+ ADLs",
    ),
    (
        TierId::Tier3,
        2000.0,
        "Enhanced Support",
        "Memory support OR behavioral concerns OR extensive ADLs",
        "Cognitive decline, behaviors, or 3+ ADLs",
    ),
    (
        TierId::Tier4,
        3000.0,
        "Maximum Support",
        "Multiple high-intensity needs",
        "Complex care with multiple dependencies",
    ),
];

const MEMORY_CARE_TIERS: &[TierRow] = &[
    (
        TierId::Tier0,
        0.0,
        "Standard Memory Care",
        "Base secured memory care environment",
        "Mild-moderate memory decline, secured environment",
    ),
    (
        TierId::Tier1,
        400.0,
        "Light ADL Support",
        "Mild ADL or mobility support",
        "Memory care + 1 ADL or mobility assistance",
    ),
    (
        TierId::Tier2,
        900.0,
        "Moderate ADL Support",
        "Moderate ADLs or mobility needs",
        "Memory care + 2 ADLs or significant mobility needs",
    ),
    (
        TierId::Tier3,
        1500.0,
        "Enhanced Behavioral Support",
        "Behavioral concerns or complex ADLs",
        "Challenging behaviors or 3+ ADLs",
    ),
    (
        TierId::Tier4,
        2200.0,
        "High-Acuity Care",
        "Severe behaviors or hands-on care",
        "Intensive supervision, severe behaviors, or total ADL dependence",
    ),
];

fn tier_table(rows: &[TierRow]) -> BTreeMap<TierId, TierConfig> {
    rows.iter()
        .map(|(tier, increment, label, description, profile)| {
            (
                *tier,
                TierConfig {
                    increment: *increment,
                    label: label.to_string(),
                    description: description.to_string(),
                    typical_profile: profile.to_string(),
                },
            )
        })
        .collect()
}
