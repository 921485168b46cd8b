//! In-memory reference store. Carries the canonical create preconditions so
//! tests and the JSON backend share one set of semantics.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::Settings;
use crate::domain::common::same_name;
use crate::domain::{
    CatalogEntry, CatalogKind, Debt, ExpenseDraft, ExpenseEntry, IncomeDraft, IncomeEntry, Period,
    SavingsGoal,
};
use crate::errors::{BudgetError, Result};

use super::{BudgetBook, LedgerStore};

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    book: BudgetBook,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_book(book: BudgetBook) -> Self {
        Self { book }
    }

    pub fn book(&self) -> &BudgetBook {
        &self.book
    }

    pub fn into_book(self) -> BudgetBook {
        self.book
    }

    pub fn add_debt(&mut self, debt: Debt) {
        self.book.debts.push(debt);
    }

    pub fn add_goal(&mut self, goal: SavingsGoal) {
        self.book.goals.push(goal);
    }

    fn period_exists(&self, period_id: Uuid) -> Result<()> {
        if self.book.periods.iter().any(|p| p.id == period_id) {
            Ok(())
        } else {
            Err(BudgetError::NotFound(format!("period {}", period_id)))
        }
    }
}

impl LedgerStore for MemoryStore {
    fn list_periods(&self) -> Result<Vec<Period>> {
        Ok(self.book.periods.clone())
    }

    fn create_period(&mut self, name: &str, start: NaiveDate, end: NaiveDate) -> Result<Period> {
        let period = Period::new(name, start, end)?;
        let collision = self.book.periods.iter().any(|existing| {
            existing.overlaps(start, end) || same_name(&existing.name, name)
        });
        if collision {
            return Err(BudgetError::PeriodOverlap {
                name: name.to_string(),
                start,
                end,
            });
        }
        self.book.periods.push(period.clone());
        Ok(period)
    }

    fn list_incomes(&self, period_id: Uuid) -> Result<Vec<IncomeEntry>> {
        Ok(self
            .book
            .incomes
            .iter()
            .filter(|entry| entry.period_id == period_id)
            .cloned()
            .collect())
    }

    fn create_income(&mut self, period_id: Uuid, draft: IncomeDraft) -> Result<IncomeEntry> {
        self.period_exists(period_id)?;
        if draft.amount <= rust_decimal::Decimal::ZERO {
            return Err(BudgetError::InvalidAmount(format!(
                "income amount {} must be positive",
                draft.amount
            )));
        }
        let entry = IncomeEntry {
            id: Uuid::new_v4(),
            period_id,
            name: draft.name,
            category: draft.category,
            amount: draft.amount,
            tax_withheld: draft.tax_withheld,
            recurring: draft.recurring,
        };
        self.book.incomes.push(entry.clone());
        Ok(entry)
    }

    fn list_expenses(&self, period_id: Uuid) -> Result<Vec<ExpenseEntry>> {
        Ok(self
            .book
            .expenses
            .iter()
            .filter(|entry| entry.period_id == period_id)
            .cloned()
            .collect())
    }

    fn create_expense(&mut self, period_id: Uuid, draft: ExpenseDraft) -> Result<ExpenseEntry> {
        self.period_exists(period_id)?;
        draft.validate()?;
        let entry = ExpenseEntry {
            id: Uuid::new_v4(),
            period_id,
            name: draft.name,
            category: draft.category,
            total_amount: draft.total_amount,
            paid_amount: draft.paid_amount,
            is_fixed: draft.is_fixed,
            column: draft.column,
            due_date: draft.due_date,
            locked: draft.locked,
            origin: draft.origin,
        };
        self.book.expenses.push(entry.clone());
        Ok(entry)
    }

    fn list_active_debts(&self) -> Result<Vec<Debt>> {
        Ok(self
            .book
            .debts
            .iter()
            .filter(|debt| !debt.paid)
            .cloned()
            .collect())
    }

    fn list_active_goals(&self) -> Result<Vec<SavingsGoal>> {
        Ok(self
            .book
            .goals
            .iter()
            .filter(|goal| goal.active)
            .cloned()
            .collect())
    }

    fn list_catalog_entries(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>> {
        Ok(self
            .book
            .catalog
            .iter()
            .filter(|entry| entry.kind == kind)
            .cloned()
            .collect())
    }

    fn upsert_catalog_entry(&mut self, entry: CatalogEntry) -> Result<()> {
        match self.book.catalog.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.book.catalog.push(entry),
        }
        Ok(())
    }

    fn settings(&self) -> Result<Settings> {
        Ok(self.book.settings.clone())
    }

    fn update_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        self.book.settings = settings;
        Ok(())
    }
}
