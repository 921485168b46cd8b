use thiserror::Error;

/// Error type that captures the failure modes of the budgeting core.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("invalid period bounds: {0}")]
    InvalidPeriodBounds(String),
    #[error("period `{name}` [{start}, {end}] collides with an existing period")]
    PeriodOverlap {
        name: String,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
    #[error("category `{0}` is protected and must keep an active catalog entry")]
    ProtectedCategory(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("rollover stopped after {committed} of {planned} entries: {source}")]
    PartialRollover {
        committed: usize,
        planned: usize,
        #[source]
        source: Box<BudgetError>,
    },
    #[error("unknown entity: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BudgetError>;
