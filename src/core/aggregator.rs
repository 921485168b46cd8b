//! Pure arithmetic over a period's loaded entries. All sums run on
//! `Decimal`, so large entry counts accumulate without floating drift.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::days_remaining;
use crate::config::Settings;
use crate::domain::{Debt, ExpenseEntry, IncomeEntry, Period};
use crate::errors::Result;
use crate::storage::LedgerStore;

/// Category bucket for expenses without one.
pub const DEFAULT_CATEGORY: &str = "Other";

/// The headline figures for one period. Signed values are surfaced as-is;
/// interpreting a negative `remaining` is the presentation layer's job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_paid: Decimal,
    pub remaining: Decimal,
    pub still_owed: Decimal,
    pub outstanding_debt: Decimal,
    /// None for archived periods.
    pub days_remaining: Option<i64>,
    pub archived: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

pub struct BudgetAggregator;

impl BudgetAggregator {
    /// Combines a period's incomes and expenses with the active debts into
    /// the headline figures.
    ///
    /// For the current (non-archived) period the remaining days are projected
    /// at the daily allowance rate. `remaining` subtracts that projection
    /// from income while `still_owed` adds it on top of the unpaid totals;
    /// the weekly allowance is never projected because it is already a
    /// committed locked expense. This asymmetry is intentional and must not
    /// be "fixed".
    pub fn aggregate(
        period: &Period,
        incomes: &[IncomeEntry],
        expenses: &[ExpenseEntry],
        debts: &[Debt],
        settings: &Settings,
        today: NaiveDate,
    ) -> BudgetSummary {
        let total_income: Decimal = incomes.iter().map(|entry| entry.amount).sum();
        let total_expenses: Decimal = expenses.iter().map(|entry| entry.total_amount).sum();
        let total_paid: Decimal = expenses.iter().map(|entry| entry.paid_amount).sum();
        let outstanding_debt = Self::outstanding_debt(debts);

        let archived = period.is_archived(today);
        let remaining_days = if archived {
            None
        } else {
            days_remaining(period.end_date, today)
        };
        let projection = remaining_days
            .map(|days| Decimal::from(days) * settings.daily_allowance)
            .unwrap_or(Decimal::ZERO);

        BudgetSummary {
            total_income,
            total_expenses,
            total_paid,
            remaining: total_income - total_expenses - projection,
            still_owed: (total_expenses - total_paid) + projection,
            outstanding_debt,
            days_remaining: remaining_days,
            archived,
        }
    }

    /// Sum of what is still owed across active (unpaid) debts, independent of
    /// any period.
    pub fn outstanding_debt(debts: &[Debt]) -> Decimal {
        debts
            .iter()
            .filter(|debt| !debt.paid)
            .map(Debt::outstanding)
            .sum()
    }

    /// Groups expense totals by category, with [`DEFAULT_CATEGORY`] as the
    /// bucket for uncategorised entries.
    pub fn category_breakdown(expenses: &[ExpenseEntry]) -> Vec<CategoryTotal> {
        let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();
        for expense in expenses {
            let category = expense
                .category
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(DEFAULT_CATEGORY);
            *buckets.entry(category.to_string()).or_insert(Decimal::ZERO) +=
                expense.total_amount;
        }
        buckets
            .into_iter()
            .map(|(category, total)| CategoryTotal { category, total })
            .collect()
    }

    /// Category breakdown across every stored period overlapping the given
    /// inclusive date range.
    pub fn breakdown_for_range(
        store: &dyn LedgerStore,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CategoryTotal>> {
        let mut expenses = Vec::new();
        for period in store.list_periods()? {
            if period.overlaps(start, end) {
                expenses.extend(store.list_expenses(period.id)?);
            }
        }
        Ok(Self::category_breakdown(&expenses))
    }
}
