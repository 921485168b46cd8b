//! Standalone debts. A debt lives outside any period but surfaces as a
//! locked expense in whichever period contains its due date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::errors::{BudgetError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Debt {
    pub id: Uuid,
    pub name: String,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor: Option<String>,
    pub date_incurred: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub paid: bool,
}

impl Debt {
    pub fn new(
        name: impl Into<String>,
        total_amount: Decimal,
        date_incurred: NaiveDate,
    ) -> Result<Self> {
        if total_amount <= Decimal::ZERO {
            return Err(BudgetError::InvalidAmount(format!(
                "debt amount {} must be positive",
                total_amount
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            total_amount,
            paid_amount: Decimal::ZERO,
            creditor: None,
            date_incurred,
            due_date: None,
            paid: false,
        })
    }

    pub fn with_creditor(mut self, creditor: impl Into<String>) -> Self {
        self.creditor = Some(creditor.into());
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn outstanding(&self) -> Decimal {
        self.total_amount - self.paid_amount
    }

    /// Records a payment. Paid amounts only grow; once they reach the total
    /// the debt is terminal and excluded from active aggregation.
    pub fn record_payment(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(BudgetError::InvalidAmount(format!(
                "payment {} must be positive",
                amount
            )));
        }
        if self.paid {
            return Err(BudgetError::InvalidAmount(format!(
                "debt `{}` is already settled",
                self.name
            )));
        }
        self.paid_amount += amount;
        if self.paid_amount >= self.total_amount {
            self.paid = true;
        }
        Ok(())
    }
}

impl Identifiable for Debt {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Debt {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_debt() -> Debt {
        Debt::new(
            "Car loan",
            dec!(1500),
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn payments_accumulate_until_settled() {
        let mut debt = sample_debt();
        debt.record_payment(dec!(300)).unwrap();
        assert_eq!(debt.outstanding(), dec!(1200));
        assert!(!debt.paid);
        debt.record_payment(dec!(1200)).unwrap();
        assert!(debt.paid);
        assert_eq!(debt.outstanding(), Decimal::ZERO);
    }

    #[test]
    fn settled_debts_reject_further_payments() {
        let mut debt = sample_debt();
        debt.record_payment(dec!(1500)).unwrap();
        let err = debt.record_payment(dec!(1)).expect_err("terminal debt");
        assert!(matches!(err, BudgetError::InvalidAmount(_)));
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        assert!(Debt::new("Bad", Decimal::ZERO, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()).is_err());
        let mut debt = sample_debt();
        assert!(debt.record_payment(Decimal::ZERO).is_err());
    }
}
