//! Seeds a new billing period from the previous period, same-month-last-year
//! history, active debts, and savings goals. Planning is pure; commit is a
//! sequence of individual creates against the store with no transaction, so
//! every seeded entry is guarded by a name-presence check and a failed
//! commit can simply be re-run.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::{calculator::shift_month, compute_period_bounds, count_saturdays, period_name, PeriodSelector};
use crate::config::Settings;
use crate::domain::common::same_name;
use crate::domain::{
    Debt, ExpenseDraft, ExpenseEntry, ExpenseOrigin, IncomeDraft, IncomeEntry, Period, SavingsGoal,
};
use crate::errors::{BudgetError, Result};
use crate::storage::LedgerStore;

/// Name of the locked weekly-allowance expense, always first in the list.
pub const WEEKLY_ALLOWANCE_NAME: &str = "Weekly allowance";

/// Candidate entries for a new period, not yet persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftEntries {
    pub incomes: Vec<IncomeDraft>,
    pub expenses: Vec<ExpenseDraft>,
}

impl DraftEntries {
    pub fn len(&self) -> usize {
        self.incomes.len() + self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty()
    }
}

/// A resolved rollover: target bounds plus the seeded drafts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolloverPlan {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub drafts: DraftEntries,
}

#[derive(Debug, Clone)]
pub struct RolloverOutcome {
    pub period: Period,
    pub incomes_created: usize,
    pub expenses_created: usize,
    /// Entries skipped because a same-named entry already existed in the
    /// target period (a resumed partial commit, or caller-added entries).
    pub skipped_existing: usize,
}

pub struct RolloverEngine;

impl RolloverEngine {
    /// Resolves the target period and builds the draft working set. Rejects
    /// the rollover before any write when the resolved bounds or name
    /// collide with a stored period.
    pub fn plan(
        store: &dyn LedgerStore,
        selector: PeriodSelector,
    ) -> Result<RolloverPlan> {
        let settings = store.settings()?;
        let (start, end) = compute_period_bounds(&settings, selector)?;
        let name = period_name(start);

        let periods = store.list_periods()?;
        if periods
            .iter()
            .any(|p| p.overlaps(start, end) || same_name(&p.name, &name))
        {
            return Err(BudgetError::PeriodOverlap { name, start, end });
        }

        let preceding = periods
            .iter()
            .filter(|p| p.end_date < start)
            .max_by_key(|p| p.end_date);
        let (prior_incomes, prior_expenses) = match preceding {
            Some(period) => (
                store.list_incomes(period.id)?,
                store.list_expenses(period.id)?,
            ),
            None => (Vec::new(), Vec::new()),
        };

        // Annual-only recurring costs live in the same calendar month one
        // year earlier, which the immediately preceding period cannot show.
        let year_ago = shift_month(start, -12);
        let last_year_expenses = match periods.iter().find(|p| p.contains(year_ago)) {
            Some(period) => store.list_expenses(period.id)?,
            None => Vec::new(),
        };

        let debts = store.list_active_debts()?;
        let goals = store.list_active_goals()?;

        let drafts = Self::build_draft(
            start,
            end,
            &settings,
            &prior_incomes,
            &prior_expenses,
            &last_year_expenses,
            &debts,
            &goals,
        )?;

        tracing::debug!(
            period = %name,
            incomes = drafts.incomes.len(),
            expenses = drafts.expenses.len(),
            "rollover plan built"
        );
        Ok(RolloverPlan {
            name,
            start,
            end,
            drafts,
        })
    }

    /// The pure seeding stages. Any stage whose source is empty is skipped.
    #[allow(clippy::too_many_arguments)]
    pub fn build_draft(
        start: NaiveDate,
        end: NaiveDate,
        settings: &Settings,
        prior_incomes: &[IncomeEntry],
        prior_expenses: &[ExpenseEntry],
        last_year_expenses: &[ExpenseEntry],
        debts: &[Debt],
        goals: &[SavingsGoal],
    ) -> Result<DraftEntries> {
        let mut drafts = DraftEntries::default();

        // Incomes carry over verbatim as editable drafts.
        for entry in prior_incomes {
            drafts.incomes.push(IncomeDraft::from_entry(entry));
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut push_expense = |drafts: &mut DraftEntries, draft: ExpenseDraft| {
            if seen.insert(draft.name.trim().to_ascii_lowercase()) {
                drafts.expenses.push(draft);
            }
        };

        // The locked weekly allowance heads the list.
        let saturdays = count_saturdays(start, end);
        let allowance = settings.weekly_allowance * Decimal::from(saturdays);
        if allowance > Decimal::ZERO {
            push_expense(
                &mut drafts,
                ExpenseDraft::new(WEEKLY_ALLOWANCE_NAME, allowance)?
                    .locked(ExpenseOrigin::WeeklyAllowance),
            );
        }

        // Fixed expenses from the preceding period, minus the synthetic
        // locked entries which would otherwise double-seed.
        for entry in prior_expenses {
            if entry.is_fixed && !entry.locked {
                push_expense(&mut drafts, ExpenseDraft::from_entry(entry));
            }
        }

        // Union in last year's expenses not already present by name.
        for entry in last_year_expenses {
            if !entry.locked {
                push_expense(&mut drafts, ExpenseDraft::from_entry(entry));
            }
        }

        // One locked expense per active debt falling due in this period.
        for debt in debts {
            let due = match debt.due_date {
                Some(due) if due >= start && due <= end => due,
                _ => continue,
            };
            if debt.paid || debt.outstanding() <= Decimal::ZERO {
                continue;
            }
            push_expense(
                &mut drafts,
                ExpenseDraft::new(debt.name.clone(), debt.outstanding())?
                    .with_due_date(due)
                    .locked(ExpenseOrigin::DebtDue),
            );
        }

        // One locked allocation per active savings goal.
        for goal in goals {
            if !goal.active {
                continue;
            }
            push_expense(
                &mut drafts,
                ExpenseDraft::new(goal.name.clone(), goal.monthly_amount)?
                    .locked(ExpenseOrigin::SavingsGoal),
            );
        }

        Ok(drafts)
    }

    /// Persists the plan: the period first, then each entry sequentially.
    ///
    /// There is no rollback. A failure partway surfaces
    /// [`BudgetError::PartialRollover`] with the progress so far; because
    /// every create is preceded by a name-presence check against the target
    /// period, re-invoking `commit` with the same plan completes the period
    /// without duplicating entries.
    pub fn commit(store: &mut dyn LedgerStore, plan: &RolloverPlan) -> Result<RolloverOutcome> {
        let planned = plan.drafts.len();
        let periods = store.list_periods()?;
        let period = match periods.iter().find(|p| {
            p.start_date == plan.start && p.end_date == plan.end && same_name(&p.name, &plan.name)
        }) {
            // Resuming a partially committed rollover.
            Some(existing) => existing.clone(),
            None => store.create_period(&plan.name, plan.start, plan.end)?,
        };

        let mut income_names: HashSet<String> = store
            .list_incomes(period.id)?
            .iter()
            .map(|e| e.name.trim().to_ascii_lowercase())
            .collect();
        let mut expense_names: HashSet<String> = store
            .list_expenses(period.id)?
            .iter()
            .map(|e| e.name.trim().to_ascii_lowercase())
            .collect();

        let mut committed = 0usize;
        let mut skipped = 0usize;
        let mut incomes_created = 0usize;
        let mut expenses_created = 0usize;

        for draft in &plan.drafts.incomes {
            if !income_names.insert(draft.name.trim().to_ascii_lowercase()) {
                skipped += 1;
                continue;
            }
            match store.create_income(period.id, draft.clone()) {
                Ok(_) => {
                    committed += 1;
                    incomes_created += 1;
                }
                Err(err) => {
                    return Err(BudgetError::PartialRollover {
                        committed,
                        planned,
                        source: Box::new(err),
                    })
                }
            }
        }

        for draft in &plan.drafts.expenses {
            if !expense_names.insert(draft.name.trim().to_ascii_lowercase()) {
                skipped += 1;
                continue;
            }
            match store.create_expense(period.id, draft.clone()) {
                Ok(_) => {
                    committed += 1;
                    expenses_created += 1;
                }
                Err(err) => {
                    return Err(BudgetError::PartialRollover {
                        committed,
                        planned,
                        source: Box::new(err),
                    })
                }
            }
        }

        tracing::info!(
            period = %period.name,
            incomes = incomes_created,
            expenses = expenses_created,
            skipped,
            "rollover committed"
        );
        Ok(RolloverOutcome {
            period,
            incomes_created,
            expenses_created,
            skipped_existing: skipped,
        })
    }
}
