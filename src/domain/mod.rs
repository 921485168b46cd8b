pub mod catalog;
pub mod common;
pub mod debt;
pub mod entry;
pub mod period;
pub mod savings;

pub use catalog::{CatalogEntry, CatalogKind};
pub use common::{Identifiable, NamedEntity};
pub use debt::Debt;
pub use entry::{ExpenseDraft, ExpenseEntry, ExpenseOrigin, IncomeDraft, IncomeEntry};
pub use period::Period;
pub use savings::{ContributionFrequency, SavingsGoal};
