use std::collections::HashMap;
use std::sync::PoisonError;

pub use error::EngineError;
pub use expense::{
    Attachment, DATE_FORMAT, Expense, Frequency, GENERIC_CONTENT_TYPE, NewAttachment, NewExpense,
};
pub use identity::resolve_identity;
pub use recurring::{NewRecurring, RecurringDefinition};
pub use share::{ShareRef, ShareRegistry};
pub use store::{StoreRegistry, TenantStore};

mod error;
mod expense;
mod identity;
mod recurring;
mod share;
mod store;

type ResultEngine<T> = Result<T, EngineError>;

/// Shared ledger state: one store per tenant plus the share registry.
///
/// Everything lives in process memory and is lost on shutdown. All
/// methods take `&self`, so a single instance can sit behind an `Arc`
/// and serve concurrent requests.
#[derive(Debug, Default)]
pub struct Engine {
    stores: StoreRegistry,
    shares: ShareRegistry,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_store<T>(&self, tenant: &str, op: impl FnOnce(&mut TenantStore) -> T) -> T {
        let store = self.stores.resolve(tenant);
        let mut store = store.lock().unwrap_or_else(PoisonError::into_inner);
        op(&mut store)
    }

    /// Add an expense to the tenant ledger.
    pub fn add_expense(&self, tenant: &str, new: NewExpense) -> ResultEngine<Expense> {
        self.with_store(tenant, |store| store.add_expense(new))
    }

    /// Return a single expense.
    pub fn expense(&self, tenant: &str, expense_id: u64) -> ResultEngine<Expense> {
        self.with_store(tenant, |store| store.expense(expense_id))
    }

    /// Return a snapshot of the tenant ledger, keyed by expense id.
    pub fn expenses(&self, tenant: &str) -> HashMap<u64, Expense> {
        self.with_store(tenant, |store| store.expenses())
    }

    pub fn delete_expense(&self, tenant: &str, expense_id: u64) -> ResultEngine<()> {
        self.with_store(tenant, |store| store.delete_expense(expense_id))
    }

    /// Sum of every expense amount in the tenant ledger.
    pub fn total_amount(&self, tenant: &str) -> f64 {
        self.with_store(tenant, |store| store.total_amount())
    }

    /// Sum of the expenses falling in `month` of any year, with the
    /// month's name. See [`TenantStore::month_total`].
    pub fn month_total(&self, tenant: &str, month: u32) -> ResultEngine<(f64, String)> {
        self.with_store(tenant, |store| store.month_total(month))
    }

    /// Return the attachment of an expense.
    pub fn attachment(&self, tenant: &str, expense_id: u64) -> ResultEngine<Attachment> {
        self.with_store(tenant, |store| store.attachment(expense_id))
    }

    /// Add a recurring definition to the tenant registry.
    pub fn add_recurring(
        &self,
        tenant: &str,
        new: NewRecurring,
    ) -> ResultEngine<RecurringDefinition> {
        self.with_store(tenant, |store| store.add_recurring(new))
    }

    /// Return a single recurring definition.
    pub fn recurring(&self, tenant: &str, recurring_id: u64) -> ResultEngine<RecurringDefinition> {
        self.with_store(tenant, |store| store.recurring(recurring_id))
    }

    /// Return a snapshot of the tenant's recurring definitions.
    pub fn recurring_list(&self, tenant: &str) -> HashMap<u64, RecurringDefinition> {
        self.with_store(tenant, |store| store.recurring_list())
    }

    pub fn delete_recurring(&self, tenant: &str, recurring_id: u64) -> ResultEngine<()> {
        self.with_store(tenant, |store| store.delete_recurring(recurring_id))
    }

    /// Mint a share token for one of the tenant's own expenses.
    ///
    /// The expense must exist when the token is minted; the token itself
    /// may outlive it.
    pub fn share_expense(&self, tenant: &str, expense_id: u64) -> ResultEngine<String> {
        self.with_store(tenant, |store| store.expense(expense_id))?;

        Ok(self.shares.issue(tenant, expense_id))
    }

    /// Return the expense a share token points at, whoever asks.
    ///
    /// A token whose expense has been deleted fails exactly like an
    /// unknown expense.
    pub fn shared_expense(&self, token: &str) -> ResultEngine<Expense> {
        let share = self.shares.resolve(token)?;
        self.with_store(&share.owner, |store| store.expense(share.expense_id))
    }

    /// Return the attachment behind a share token.
    pub fn shared_attachment(&self, token: &str) -> ResultEngine<Attachment> {
        let share = self.shares.resolve(token)?;
        self.with_store(&share.owner, |store| store.attachment(share.expense_id))
    }

    /// Copy the shared expense into the caller's own ledger.
    ///
    /// The copy gets a fresh id there; the token stays valid, so cloning
    /// is repeatable. The owner's store lock is dropped before the
    /// caller's is taken, which also covers a tenant cloning its own
    /// share.
    pub fn clone_shared(&self, tenant: &str, token: &str) -> ResultEngine<Expense> {
        let original = self.shared_expense(token)?;

        Ok(self.with_store(tenant, |store| store.import_expense(original)))
    }
}
