//! Catalog of reusable income and expense templates used when seeding new
//! periods.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Which side of the budget a catalog template belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Income,
    Expense,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CatalogKind::Income => "Income",
            CatalogKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub kind: CatalogKind,
    pub default_amount: Decimal,
    pub protected: bool,
    pub active: bool,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, kind: CatalogKind, default_amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: None,
            kind,
            default_amount,
            protected: false,
            active: true,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn protected(mut self) -> Self {
        self.protected = true;
        self
    }

    /// Dedup key within the catalog. Incomes and expenses deduplicate
    /// independently: incomes by name, expenses by name and category.
    pub fn dedup_key(&self) -> (CatalogKind, String, Option<String>) {
        let name = self.name.trim().to_ascii_lowercase();
        match self.kind {
            CatalogKind::Income => (self.kind, name, None),
            CatalogKind::Expense => (
                self.kind,
                name,
                self.category
                    .as_deref()
                    .map(|c| c.trim().to_ascii_lowercase()),
            ),
        }
    }
}

impl Identifiable for CatalogEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for CatalogEntry {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_key_ignores_case_and_whitespace() {
        let a = CatalogEntry::new(" Rent ", CatalogKind::Expense, Decimal::ZERO)
            .with_category("Housing");
        let b = CatalogEntry::new("rent", CatalogKind::Expense, Decimal::ZERO)
            .with_category("housing");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn keys_differ_across_kinds_for_the_same_name() {
        let income = CatalogEntry::new("Refund", CatalogKind::Income, Decimal::ZERO);
        let expense = CatalogEntry::new("Refund", CatalogKind::Expense, Decimal::ZERO);
        assert_ne!(income.dedup_key(), expense.dedup_key());
    }

    #[test]
    fn income_key_ignores_category() {
        let a = CatalogEntry::new("Salary", CatalogKind::Income, Decimal::ZERO)
            .with_category("Work");
        let b = CatalogEntry::new("Salary", CatalogKind::Income, Decimal::ZERO);
        assert_eq!(a.dedup_key(), b.dedup_key());
    }
}
