//! Savings goals ("piggybanks"). Active goals put a locked allocation into
//! every new period; the accumulated balance only moves on manual deposits.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::errors::{BudgetError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContributionFrequency {
    Monthly,
    Quarterly,
    Yearly,
}

impl fmt::Display for ContributionFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContributionFrequency::Monthly => "Monthly",
            ContributionFrequency::Quarterly => "Quarterly",
            ContributionFrequency::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub name: String,
    /// None means open-ended saving with no fixed target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Decimal>,
    /// Allocation reserved per billing period.
    pub monthly_amount: Decimal,
    pub current_amount: Decimal,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub frequency: ContributionFrequency,
    pub active: bool,
}

impl SavingsGoal {
    pub fn new(
        name: impl Into<String>,
        monthly_amount: Decimal,
        start_date: NaiveDate,
    ) -> Result<Self> {
        if monthly_amount <= Decimal::ZERO {
            return Err(BudgetError::InvalidAmount(format!(
                "allocation {} must be positive",
                monthly_amount
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target_amount: None,
            monthly_amount,
            current_amount: Decimal::ZERO,
            start_date,
            end_date: None,
            frequency: ContributionFrequency::Monthly,
            active: true,
        })
    }

    pub fn with_target(mut self, target_amount: Decimal) -> Self {
        self.target_amount = Some(target_amount);
        self
    }

    pub fn with_frequency(mut self, frequency: ContributionFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Manual deposit into the goal. Not synced with the synthetic period
    /// allocations.
    pub fn deposit(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(BudgetError::InvalidAmount(format!(
                "deposit {} must be positive",
                amount
            )));
        }
        self.current_amount += amount;
        Ok(())
    }

    pub fn target_reached(&self) -> bool {
        match self.target_amount {
            Some(target) if target > Decimal::ZERO => self.current_amount >= target,
            _ => false,
        }
    }
}

impl Identifiable for SavingsGoal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for SavingsGoal {
    fn name(&self) -> &str {
        &self.name
    }
}
