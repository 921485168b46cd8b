//! Income and expense entries belonging to a single billing period, plus the
//! draft forms the rollover engine produces before the store assigns
//! identities.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::errors::{BudgetError, Result};

/// Where a synthetic expense came from. `Manual` covers everything the user
/// typed in; the other variants are generated by the rollover engine and are
/// locked against direct edits in the presentation layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseOrigin {
    Manual,
    WeeklyAllowance,
    DebtDue,
    SavingsGoal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeEntry {
    pub id: Uuid,
    pub period_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_withheld: Option<Decimal>,
    pub recurring: bool,
}

/// An income not yet persisted; the store assigns id and period on create.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_withheld: Option<Decimal>,
    pub recurring: bool,
}

impl IncomeDraft {
    pub fn new(name: impl Into<String>, amount: Decimal) -> Result<Self> {
        if amount <= Decimal::ZERO {
            return Err(BudgetError::InvalidAmount(format!(
                "income amount {} must be positive",
                amount
            )));
        }
        Ok(Self {
            name: name.into(),
            category: None,
            amount,
            tax_withheld: None,
            recurring: false,
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn recurring(mut self) -> Self {
        self.recurring = true;
        self
    }

    /// Re-drafts an existing entry for seeding into a new period.
    pub fn from_entry(entry: &IncomeEntry) -> Self {
        Self {
            name: entry.name.clone(),
            category: entry.category.clone(),
            amount: entry.amount,
            tax_withheld: entry.tax_withheld,
            recurring: entry.recurring,
        }
    }
}

impl Identifiable for IncomeEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for IncomeEntry {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseEntry {
    pub id: Uuid,
    pub period_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub is_fixed: bool,
    /// Display column in the period view, 1 through 3.
    pub column: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub locked: bool,
    pub origin: ExpenseOrigin,
}

impl ExpenseEntry {
    pub fn is_fully_paid(&self) -> bool {
        self.paid_amount == self.total_amount
    }

    pub fn outstanding(&self) -> Decimal {
        self.total_amount - self.paid_amount
    }

    /// Records a payment. Paid amounts never shrink and never pass the total.
    pub fn record_payment(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(BudgetError::InvalidAmount(format!(
                "payment {} must be positive",
                amount
            )));
        }
        let next = self.paid_amount + amount;
        if next > self.total_amount {
            return Err(BudgetError::InvalidAmount(format!(
                "payment {} would exceed the expense total {}",
                amount, self.total_amount
            )));
        }
        self.paid_amount = next;
        Ok(())
    }
}

/// An expense not yet persisted; the store assigns id and period on create.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub is_fixed: bool,
    pub column: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub locked: bool,
    pub origin: ExpenseOrigin,
}

impl ExpenseDraft {
    pub fn new(name: impl Into<String>, total_amount: Decimal) -> Result<Self> {
        if total_amount <= Decimal::ZERO {
            return Err(BudgetError::InvalidAmount(format!(
                "expense amount {} must be positive",
                total_amount
            )));
        }
        Ok(Self {
            name: name.into(),
            category: None,
            total_amount,
            paid_amount: Decimal::ZERO,
            is_fixed: false,
            column: 1,
            due_date: None,
            locked: false,
            origin: ExpenseOrigin::Manual,
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_column(mut self, column: u8) -> Result<Self> {
        if !(1..=3).contains(&column) {
            return Err(BudgetError::InvalidAmount(format!(
                "display column {} is outside 1-3",
                column
            )));
        }
        self.column = column;
        Ok(self)
    }

    pub fn locked(mut self, origin: ExpenseOrigin) -> Self {
        self.locked = true;
        self.origin = origin;
        self
    }

    /// Re-drafts an existing entry for seeding into a new period. Payments do
    /// not carry over.
    pub fn from_entry(entry: &ExpenseEntry) -> Self {
        Self {
            name: entry.name.clone(),
            category: entry.category.clone(),
            total_amount: entry.total_amount,
            paid_amount: Decimal::ZERO,
            is_fixed: entry.is_fixed,
            column: entry.column,
            due_date: None,
            locked: false,
            origin: ExpenseOrigin::Manual,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_amount <= Decimal::ZERO {
            return Err(BudgetError::InvalidAmount(format!(
                "expense amount {} must be positive",
                self.total_amount
            )));
        }
        if self.paid_amount < Decimal::ZERO || self.paid_amount > self.total_amount {
            return Err(BudgetError::InvalidAmount(format!(
                "paid amount {} is outside 0..={}",
                self.paid_amount, self.total_amount
            )));
        }
        if !(1..=3).contains(&self.column) {
            return Err(BudgetError::InvalidAmount(format!(
                "display column {} is outside 1-3",
                self.column
            )));
        }
        Ok(())
    }
}

impl Identifiable for ExpenseEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for ExpenseEntry {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn drafts_reject_non_positive_amounts() {
        assert!(matches!(
            IncomeDraft::new("Salary", Decimal::ZERO),
            Err(BudgetError::InvalidAmount(_))
        ));
        assert!(matches!(
            ExpenseDraft::new("Rent", dec!(-1)),
            Err(BudgetError::InvalidAmount(_))
        ));
    }

    #[test]
    fn column_must_be_one_through_three() {
        let draft = ExpenseDraft::new("Rent", dec!(900)).unwrap();
        assert!(draft.clone().with_column(3).is_ok());
        assert!(draft.with_column(4).is_err());
    }

    #[test]
    fn payments_never_exceed_total() {
        let draft = ExpenseDraft::new("Rent", dec!(900)).unwrap();
        let mut entry = ExpenseEntry {
            id: Uuid::new_v4(),
            period_id: Uuid::new_v4(),
            name: draft.name.clone(),
            category: None,
            total_amount: draft.total_amount,
            paid_amount: Decimal::ZERO,
            is_fixed: true,
            column: 1,
            due_date: None,
            locked: false,
            origin: ExpenseOrigin::Manual,
        };
        entry.record_payment(dec!(600)).unwrap();
        assert!(!entry.is_fully_paid());
        assert_eq!(entry.outstanding(), dec!(300));
        let err = entry.record_payment(dec!(301)).expect_err("overpayment");
        assert!(matches!(err, BudgetError::InvalidAmount(_)));
        entry.record_payment(dec!(300)).unwrap();
        assert!(entry.is_fully_paid());
    }

    #[test]
    fn seeded_draft_drops_payment_and_lock_state() {
        let entry = ExpenseEntry {
            id: Uuid::new_v4(),
            period_id: Uuid::new_v4(),
            name: "Insurance".into(),
            category: Some("Insurance".into()),
            total_amount: dec!(120),
            paid_amount: dec!(120),
            is_fixed: true,
            column: 2,
            due_date: NaiveDate::from_ymd_opt(2025, 3, 20),
            locked: true,
            origin: ExpenseOrigin::DebtDue,
        };
        let draft = ExpenseDraft::from_entry(&entry);
        assert_eq!(draft.paid_amount, Decimal::ZERO);
        assert!(!draft.locked);
        assert_eq!(draft.origin, ExpenseOrigin::Manual);
        assert!(draft.due_date.is_none());
        assert_eq!(draft.column, 2);
    }
}
