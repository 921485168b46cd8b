//! Billing periods. A period is called "month" in the UI but is bounded by
//! the configured billing day, not the calendar month.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::errors::{BudgetError, Result};

/// A billing cycle with fixed inclusive start and end dates. Immutable once
/// created except for its derived contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Period {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Period {
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        if start_date > end_date {
            return Err(BudgetError::InvalidPeriodBounds(format!(
                "start {} is after end {}",
                start_date, end_date
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_date,
            end_date,
        })
    }

    /// Inclusive containment test.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// True when the inclusive ranges share at least one day.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end_date && end >= self.start_date
    }

    /// A period is archived once "today" has moved past its end date.
    pub fn is_archived(&self, today: NaiveDate) -> bool {
        today > self.end_date
    }
}

impl Identifiable for Period {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Period {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = Period::new("Broken", date(2025, 2, 1), date(2025, 1, 1))
            .expect_err("inverted bounds should fail");
        assert!(matches!(err, BudgetError::InvalidPeriodBounds(_)));
    }

    #[test]
    fn containment_is_inclusive() {
        let period = Period::new("March 2025", date(2025, 3, 10), date(2025, 4, 9)).unwrap();
        assert!(period.contains(date(2025, 3, 10)));
        assert!(period.contains(date(2025, 4, 9)));
        assert!(!period.contains(date(2025, 4, 10)));
    }

    #[test]
    fn overlap_detects_shared_boundary_day() {
        let period = Period::new("March 2025", date(2025, 3, 10), date(2025, 4, 9)).unwrap();
        assert!(period.overlaps(date(2025, 4, 9), date(2025, 5, 8)));
        assert!(!period.overlaps(date(2025, 4, 10), date(2025, 5, 9)));
    }

    #[test]
    fn archived_once_today_passes_end() {
        let period = Period::new("March 2025", date(2025, 3, 10), date(2025, 4, 9)).unwrap();
        assert!(!period.is_archived(date(2025, 4, 9)));
        assert!(period.is_archived(date(2025, 4, 10)));
    }
}
