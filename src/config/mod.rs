use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{BudgetError, Result};

/// Billing days greater than or equal to this value mean "last calendar day
/// of the month"; 29, 30, and 31 are treated identically.
pub const LAST_DAY_SENTINEL: u8 = 29;

/// Household-wide budgeting settings. Read-only to the core except through
/// [`crate::storage::LedgerStore::update_settings`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Day of month a new billing period starts on (1-28), or a value of 29
    /// and above for "last calendar day".
    pub billing_day: u8,
    pub savings_percentage: Decimal,
    pub weekly_allowance: Decimal,
    pub daily_allowance: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            billing_day: 1,
            savings_percentage: Decimal::ZERO,
            weekly_allowance: Decimal::ZERO,
            daily_allowance: Decimal::ZERO,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.billing_day == 0 || self.billing_day > 31 {
            return Err(BudgetError::InvalidPeriodBounds(format!(
                "billing day {} is outside 1-31",
                self.billing_day
            )));
        }
        if self.weekly_allowance.is_sign_negative() || self.daily_allowance.is_sign_negative() {
            return Err(BudgetError::InvalidAmount(
                "allowance amounts cannot be negative".into(),
            ));
        }
        Ok(())
    }

    /// True when the configured billing day means "last calendar day".
    pub fn uses_last_day(&self) -> bool {
        self.billing_day >= LAST_DAY_SENTINEL
    }
}
