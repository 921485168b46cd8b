//! Persistence seam for the budgeting core. The engine only ever talks to
//! the [`LedgerStore`] trait; concrete backends decide where the data lives.

pub mod json_backend;
pub mod memory;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Settings;
use crate::domain::{
    CatalogEntry, CatalogKind, Debt, ExpenseDraft, ExpenseEntry, IncomeDraft, IncomeEntry, Period,
    SavingsGoal,
};
use crate::errors::Result;

pub use json_backend::JsonStorage;
pub use memory::MemoryStore;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Repository-style access to the persisted budget. Creates are individual
/// round trips; the store serializes writes but offers no multi-entity
/// transaction, which is why the rollover commit re-checks entry presence.
pub trait LedgerStore {
    fn list_periods(&self) -> Result<Vec<Period>>;
    fn create_period(&mut self, name: &str, start: NaiveDate, end: NaiveDate) -> Result<Period>;
    fn list_incomes(&self, period_id: Uuid) -> Result<Vec<IncomeEntry>>;
    fn create_income(&mut self, period_id: Uuid, draft: IncomeDraft) -> Result<IncomeEntry>;
    fn list_expenses(&self, period_id: Uuid) -> Result<Vec<ExpenseEntry>>;
    fn create_expense(&mut self, period_id: Uuid, draft: ExpenseDraft) -> Result<ExpenseEntry>;
    fn list_active_debts(&self) -> Result<Vec<Debt>>;
    fn list_active_goals(&self) -> Result<Vec<SavingsGoal>>;
    fn list_catalog_entries(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>>;
    fn upsert_catalog_entry(&mut self, entry: CatalogEntry) -> Result<()>;
    fn settings(&self) -> Result<Settings>;
    fn update_settings(&mut self, settings: Settings) -> Result<()>;
}

/// The whole persisted household budget as one document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetBook {
    pub schema_version: u8,
    pub settings: Settings,
    pub periods: Vec<Period>,
    pub incomes: Vec<IncomeEntry>,
    pub expenses: Vec<ExpenseEntry>,
    pub debts: Vec<Debt>,
    pub goals: Vec<SavingsGoal>,
    pub catalog: Vec<CatalogEntry>,
}

impl Default for BudgetBook {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            settings: Settings::default(),
            periods: Vec::new(),
            incomes: Vec::new(),
            expenses: Vec::new(),
            debts: Vec::new(),
            goals: Vec::new(),
            catalog: Vec::new(),
        }
    }
}
