//! The `TenantStore` holds one tenant's expense ledger and recurring
//! definitions. Every tenant gets its own store, created lazily by the
//! [`StoreRegistry`] on first access.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{Datelike, Month};

use crate::expense::{Attachment, Expense, NewExpense};
use crate::recurring::{NewRecurring, RecurringDefinition};
use crate::{EngineError, ResultEngine};

/// Holds expenses and recurring definitions
#[derive(Debug)]
pub struct TenantStore {
    expenses: HashMap<u64, Expense>,
    next_expense_id: u64,
    recurring: HashMap<u64, RecurringDefinition>,
    next_recurring_id: u64,
}

impl TenantStore {
    pub fn new() -> Self {
        Self {
            expenses: HashMap::new(),
            next_expense_id: 1,
            recurring: HashMap::new(),
            next_recurring_id: 1,
        }
    }

    /// Add an expense under the next sequential id.
    ///
    /// The counter advances only on success, so a rejected add leaves no
    /// gap. Deleted ids are never handed out again.
    pub fn add_expense(&mut self, new: NewExpense) -> ResultEngine<Expense> {
        let expense = Expense::new(self.next_expense_id, new)?;
        self.next_expense_id += 1;
        self.expenses.insert(expense.id, expense.clone());

        Ok(expense)
    }

    pub fn expense(&self, expense_id: u64) -> ResultEngine<Expense> {
        self.expenses
            .get(&expense_id)
            .cloned()
            .ok_or_else(|| EngineError::KeyNotFound(format!("expense {expense_id}")))
    }

    /// Snapshot of the whole ledger, keyed by id.
    pub fn expenses(&self) -> HashMap<u64, Expense> {
        self.expenses.clone()
    }

    pub fn delete_expense(&mut self, expense_id: u64) -> ResultEngine<()> {
        match self.expenses.remove(&expense_id) {
            Some(_) => Ok(()),
            None => Err(EngineError::KeyNotFound(format!("expense {expense_id}"))),
        }
    }

    pub fn total_amount(&self) -> f64 {
        self.expenses.values().map(|expense| expense.amount).sum()
    }

    /// Sum of the expenses falling in `month` of any year, plus the
    /// month's English name. The name is empty when nothing matched.
    pub fn month_total(&self, month: u32) -> ResultEngine<(f64, String)> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidInput(
                "Invalid month. Please use a value between 1 and 12.".to_string(),
            ));
        }

        let mut total = 0f64;
        let mut matched = false;
        for expense in self.expenses.values() {
            if expense.date.month() == month {
                total += expense.amount;
                matched = true;
            }
        }

        let name = match Month::try_from(month as u8) {
            Ok(m) if matched => m.name().to_string(),
            _ => String::new(),
        };

        Ok((total, name))
    }

    pub fn attachment(&self, expense_id: u64) -> ResultEngine<Attachment> {
        let expense = self
            .expenses
            .get(&expense_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("expense {expense_id}")))?;

        expense
            .attachment
            .clone()
            .ok_or(EngineError::NoAttachment(expense_id))
    }

    /// Copy `expense` into this ledger under a fresh id.
    ///
    /// Used when importing a shared expense; attachment bytes are shared
    /// with the original, not duplicated.
    pub fn import_expense(&mut self, expense: Expense) -> Expense {
        let imported = Expense {
            id: self.next_expense_id,
            ..expense
        };
        self.next_expense_id += 1;
        self.expenses.insert(imported.id, imported.clone());

        imported
    }

    pub fn add_recurring(&mut self, new: NewRecurring) -> ResultEngine<RecurringDefinition> {
        let definition = RecurringDefinition::new(self.next_recurring_id, new)?;
        self.next_recurring_id += 1;
        self.recurring.insert(definition.id, definition.clone());

        Ok(definition)
    }

    pub fn recurring(&self, recurring_id: u64) -> ResultEngine<RecurringDefinition> {
        self.recurring
            .get(&recurring_id)
            .cloned()
            .ok_or_else(|| EngineError::KeyNotFound(format!("recurring expense {recurring_id}")))
    }

    pub fn recurring_list(&self) -> HashMap<u64, RecurringDefinition> {
        self.recurring.clone()
    }

    pub fn delete_recurring(&mut self, recurring_id: u64) -> ResultEngine<()> {
        match self.recurring.remove(&recurring_id) {
            Some(_) => Ok(()),
            None => Err(EngineError::KeyNotFound(format!(
                "recurring expense {recurring_id}"
            ))),
        }
    }
}

impl Default for TenantStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns every tenant store, keyed by tenant key.
///
/// The registry lock is held only long enough to fetch or create a store
/// handle; all ledger work runs under the store's own mutex, so tenants
/// never block each other.
#[derive(Debug, Default)]
pub struct StoreRegistry {
    stores: RwLock<HashMap<String, Arc<Mutex<TenantStore>>>>,
}

impl StoreRegistry {
    /// Return the store for `key`, creating an empty one on first access.
    pub fn resolve(&self, key: &str) -> Arc<Mutex<TenantStore>> {
        if let Some(store) = self
            .stores
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
        {
            return Arc::clone(store);
        }

        let mut stores = self.stores.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            stores
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(TenantStore::new()))),
        )
    }
}
