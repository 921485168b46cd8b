pub mod aggregator;
pub mod catalog;
pub mod rollover;

pub use aggregator::{BudgetAggregator, BudgetSummary, CategoryTotal};
pub use catalog::{CatalogReconciler, PROTECTED_CATEGORIES};
pub use rollover::{
    DraftEntries, RolloverEngine, RolloverOutcome, RolloverPlan, WEEKLY_ALLOWANCE_NAME,
};
