//! Recurring-expense definitions.
//!
//! A definition only describes a repetition; the engine never expands it
//! into dated ledger entries. Definitions live in their own registry with
//! ids independent from the expense ledger.
use chrono::NaiveDate;

use crate::expense::{check_amount, parse_date};
use crate::{Frequency, ResultEngine};

/// One recurring-expense definition.
#[derive(Clone, Debug)]
pub struct RecurringDefinition {
    pub id: u64,
    pub start_date: NaiveDate,
    pub description: Option<String>,
    pub amount: f64,
    pub frequency: Frequency,
}

/// Raw fields of a definition to add, before any validation.
#[derive(Clone, Debug, Default)]
pub struct NewRecurring {
    pub start_date: String,
    pub amount: f64,
    pub description: Option<String>,
    pub frequency: Option<String>,
}

impl RecurringDefinition {
    /// Validates `new` and builds the definition stored under `id`.
    ///
    /// Unlike the ledger, a frequency is always mandatory here.
    pub fn new(id: u64, new: NewRecurring) -> ResultEngine<Self> {
        let start_date = parse_date(&new.start_date)?;
        let amount = check_amount(new.amount)?;
        let frequency = Frequency::try_from(new.frequency.as_deref().unwrap_or(""))?;

        Ok(Self {
            id,
            start_date,
            description: new.description,
            amount,
            frequency,
        })
    }
}
