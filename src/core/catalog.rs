//! Keeps the catalog of recurring income/expense templates deduplicated and
//! guarantees that protected categories always keep one active entry.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::domain::{CatalogEntry, CatalogKind};
use crate::errors::{BudgetError, Result};
use crate::storage::LedgerStore;

/// Categories that may never lose their last active catalog entry.
pub const PROTECTED_CATEGORIES: &[&str] = &["Housing", "Utilities", "Groceries", "Insurance"];

pub struct CatalogReconciler;

impl CatalogReconciler {
    /// Enforces exactly one active expense entry per protected category:
    /// reactivates an inactive entry when one exists, creates a fresh
    /// zero-amount protected default otherwise, and deactivates surplus
    /// actives. Running it twice changes nothing the second time.
    pub fn reconcile(store: &mut dyn LedgerStore, protected: &[&str]) -> Result<()> {
        let catalog = store.list_catalog_entries(CatalogKind::Expense)?;
        for &category in protected {
            let mut matching: Vec<&CatalogEntry> = catalog
                .iter()
                .filter(|entry| category_matches(entry, category))
                .collect();
            matching.sort_by(|a, b| a.name.cmp(&b.name));

            let actives: Vec<&CatalogEntry> =
                matching.iter().copied().filter(|e| e.active).collect();
            match actives.len() {
                1 => {}
                0 => {
                    if let Some(inactive) = matching.iter().find(|e| !e.active) {
                        let mut entry = (*inactive).clone();
                        entry.active = true;
                        entry.protected = true;
                        tracing::info!(category, name = %entry.name, "reactivating protected catalog entry");
                        store.upsert_catalog_entry(entry)?;
                    } else {
                        tracing::info!(category, "creating default protected catalog entry");
                        store.upsert_catalog_entry(
                            CatalogEntry::new(category, CatalogKind::Expense, Decimal::ZERO)
                                .with_category(category)
                                .protected(),
                        )?;
                    }
                }
                _ => {
                    for extra in &actives[1..] {
                        let mut entry = (*extra).clone();
                        entry.active = false;
                        store.upsert_catalog_entry(entry)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Soft-deletes a catalog entry, preserving it for rollover history
    /// lookups. Refused outright for protected categories.
    pub fn delete(
        store: &mut dyn LedgerStore,
        entry: &CatalogEntry,
        protected: &[&str],
    ) -> Result<()> {
        if let Some(category) = entry.category.as_deref() {
            if protected
                .iter()
                .any(|p| p.eq_ignore_ascii_case(category.trim()))
            {
                return Err(BudgetError::ProtectedCategory(category.to_string()));
            }
        }
        let mut deactivated = entry.clone();
        deactivated.active = false;
        store.upsert_catalog_entry(deactivated)
    }

    /// Scans every historical entry across all periods and inserts any name
    /// the catalog does not know yet as an active default. Expenses
    /// deduplicate by name and category, incomes by name alone. Idempotent.
    pub fn migrate_history_to_catalog(store: &mut dyn LedgerStore) -> Result<usize> {
        let mut known: HashSet<(CatalogKind, String, Option<String>)> = store
            .list_catalog_entries(CatalogKind::Income)?
            .iter()
            .chain(store.list_catalog_entries(CatalogKind::Expense)?.iter())
            .map(CatalogEntry::dedup_key)
            .collect();

        let mut additions: Vec<CatalogEntry> = Vec::new();
        for period in store.list_periods()? {
            for income in store.list_incomes(period.id)? {
                let candidate = CatalogEntry::new(
                    income.name.clone(),
                    CatalogKind::Income,
                    income.amount,
                );
                if known.insert(candidate.dedup_key()) {
                    additions.push(candidate);
                }
            }
            for expense in store.list_expenses(period.id)? {
                let mut candidate = CatalogEntry::new(
                    expense.name.clone(),
                    CatalogKind::Expense,
                    expense.total_amount,
                );
                if let Some(category) = expense.category.clone() {
                    candidate = candidate.with_category(category);
                }
                if known.insert(candidate.dedup_key()) {
                    additions.push(candidate);
                }
            }
        }

        let added = additions.len();
        for entry in additions {
            store.upsert_catalog_entry(entry)?;
        }
        if added > 0 {
            tracing::info!(added, "migrated historical entries into the catalog");
        }
        Ok(added)
    }
}

fn category_matches(entry: &CatalogEntry, category: &str) -> bool {
    entry
        .category
        .as_deref()
        .map(|c| c.trim().eq_ignore_ascii_case(category))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rust_decimal_macros::dec;

    fn active_expenses_in(store: &MemoryStore, category: &str) -> usize {
        store
            .list_catalog_entries(CatalogKind::Expense)
            .unwrap()
            .iter()
            .filter(|e| category_matches(e, category) && e.active)
            .count()
    }

    #[test]
    fn reconcile_creates_missing_protected_defaults() {
        let mut store = MemoryStore::new();
        CatalogReconciler::reconcile(&mut store, PROTECTED_CATEGORIES).unwrap();
        for category in PROTECTED_CATEGORIES {
            assert_eq!(active_expenses_in(&store, category), 1);
        }
    }

    #[test]
    fn reconcile_reactivates_instead_of_duplicating() {
        let mut store = MemoryStore::new();
        let mut rent = CatalogEntry::new("Rent", CatalogKind::Expense, dec!(900))
            .with_category("Housing")
            .protected();
        rent.active = false;
        store.upsert_catalog_entry(rent.clone()).unwrap();

        CatalogReconciler::reconcile(&mut store, &["Housing"]).unwrap();
        let catalog = store.list_catalog_entries(CatalogKind::Expense).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog[0].active);
        assert_eq!(catalog[0].name, "Rent");
    }

    #[test]
    fn reconcile_twice_changes_nothing() {
        let mut store = MemoryStore::new();
        CatalogReconciler::reconcile(&mut store, PROTECTED_CATEGORIES).unwrap();
        let after_first = store.list_catalog_entries(CatalogKind::Expense).unwrap();
        CatalogReconciler::reconcile(&mut store, PROTECTED_CATEGORIES).unwrap();
        let after_second = store.list_catalog_entries(CatalogKind::Expense).unwrap();
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn surplus_active_entries_are_deactivated() {
        let mut store = MemoryStore::new();
        store
            .upsert_catalog_entry(
                CatalogEntry::new("Rent", CatalogKind::Expense, dec!(900)).with_category("Housing"),
            )
            .unwrap();
        store
            .upsert_catalog_entry(
                CatalogEntry::new("Mortgage", CatalogKind::Expense, dec!(1200))
                    .with_category("Housing"),
            )
            .unwrap();

        CatalogReconciler::reconcile(&mut store, &["Housing"]).unwrap();
        assert_eq!(active_expenses_in(&store, "Housing"), 1);
    }

    #[test]
    fn migration_keeps_incomes_and_expenses_sharing_a_name() {
        use crate::domain::{ExpenseDraft, IncomeDraft};
        use chrono::NaiveDate;

        let mut store = MemoryStore::new();
        let period = store
            .create_period(
                "March 2025",
                NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                NaiveDate::from_ymd_opt(2025, 4, 9).unwrap(),
            )
            .unwrap();
        store
            .create_income(period.id, IncomeDraft::new("Refund", dec!(100)).unwrap())
            .unwrap();
        store
            .create_expense(period.id, ExpenseDraft::new("Refund", dec!(40)).unwrap())
            .unwrap();

        let added = CatalogReconciler::migrate_history_to_catalog(&mut store).unwrap();
        assert_eq!(added, 2);

        let incomes = store.list_catalog_entries(CatalogKind::Income).unwrap();
        let expenses = store.list_catalog_entries(CatalogKind::Expense).unwrap();
        assert_eq!(incomes.len(), 1);
        assert_eq!(expenses.len(), 1);
        assert_eq!(incomes[0].default_amount, dec!(100));
        assert_eq!(expenses[0].default_amount, dec!(40));
    }

    #[test]
    fn deleting_protected_category_entry_is_refused() {
        let mut store = MemoryStore::new();
        let housing = CatalogEntry::new("Rent", CatalogKind::Expense, dec!(900))
            .with_category("Housing")
            .protected();
        store.upsert_catalog_entry(housing.clone()).unwrap();

        let err = CatalogReconciler::delete(&mut store, &housing, PROTECTED_CATEGORIES)
            .expect_err("protected category");
        assert!(matches!(err, BudgetError::ProtectedCategory(_)));
        assert_eq!(active_expenses_in(&store, "Housing"), 1);
    }

    #[test]
    fn deleting_unprotected_entry_is_a_soft_delete() {
        let mut store = MemoryStore::new();
        let hobby = CatalogEntry::new("Climbing gym", CatalogKind::Expense, dec!(55))
            .with_category("Leisure");
        store.upsert_catalog_entry(hobby.clone()).unwrap();

        CatalogReconciler::delete(&mut store, &hobby, PROTECTED_CATEGORIES).unwrap();
        let catalog = store.list_catalog_entries(CatalogKind::Expense).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(!catalog[0].active);
    }
}
