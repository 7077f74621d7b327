use super::domain::CareType;

/// Fatal conditions raised by the cost planner. Both indicate a caller or table problem,
/// never sparse assessment input, so retrying with the same input is pointless.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CostError {
    #[error("unknown care type: {0}")]
    InvalidCareType(String),
    #[error("no {entry} configured for {care_type}")]
    ConfigLookup { care_type: CareType, entry: String },
}

impl CostError {
    pub(crate) fn missing(care_type: CareType, entry: impl Into<String>) -> Self {
        CostError::ConfigLookup {
            care_type,
            entry: entry.into(),
        }
    }
}
