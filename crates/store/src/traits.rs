use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;

use scrapledger_core::{CustomerId, LedgerError, ProductId, TransactionId};
use scrapledger_model::{Customer, Product, Transaction};

/// Entity store operation error.
///
/// These are **infrastructure** failures (connectivity, contention), as
/// opposed to the domain failures in `LedgerError`. `Unavailable` is always
/// safe to retry; `Conflict` means a concurrent writer won a
/// compare-and-swap race and the caller should re-read and try again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("compare-and-swap conflict: {0}")]
    Conflict(String),
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => LedgerError::StoreUnavailable(msg),
            StoreError::Conflict(msg) => LedgerError::Conflict(msg),
        }
    }
}

/// Customer directory (written by external CRUD flows, read by the ledger).
pub trait CustomerStore: Send + Sync {
    fn insert_customer(&self, customer: &Customer) -> Result<(), StoreError>;

    fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>, StoreError>;

    /// All customers, ordered by name.
    fn list_customers(&self) -> Result<Vec<Customer>, StoreError>;

    /// Returns whether the customer existed.
    fn delete_customer(&self, id: CustomerId) -> Result<bool, StoreError>;
}

/// Product catalog (written by external CRUD flows, read by the ledger).
pub trait ProductStore: Send + Sync {
    fn insert_product(&self, product: &Product) -> Result<(), StoreError>;

    fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// All products, ordered by name.
    fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Returns whether the product existed.
    fn delete_product(&self, id: ProductId) -> Result<bool, StoreError>;
}

/// Transaction table. The ledger is the sole writer; reports are read-only.
pub trait TransactionStore: Send + Sync {
    fn insert_transaction(&self, transaction: &Transaction) -> Result<(), StoreError>;

    /// Replace an existing row. Returns whether the row existed.
    fn update_transaction(&self, transaction: &Transaction) -> Result<bool, StoreError>;

    /// Hard delete. Returns whether the row existed.
    fn delete_transaction(&self, id: TransactionId) -> Result<bool, StoreError>;

    fn get_transaction(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError>;

    /// One customer's full history, newest first.
    fn transactions_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// The whole table, newest first.
    fn all_transactions(&self) -> Result<Vec<Transaction>, StoreError>;

    /// Rows with `start <= created_at <= end` (inclusive), oldest first.
    fn transactions_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError>;
}

/// Scope of one invoice sequence: a customer on a calendar day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CounterKey {
    pub customer_id: CustomerId,
    pub day: NaiveDate,
}

/// Atomic per-(customer, day) invoice sequence allocator.
///
/// Implementations must make `compare_and_advance` atomic: when the stored
/// value does not equal `expected` the call fails with `Conflict` and
/// changes nothing. A key that was never advanced reads as 0, so the first
/// issued sequence is 1 and every (customer, day) run is contiguous with no
/// duplicates, regardless of how many callers race.
pub trait InvoiceCounterStore: Send + Sync {
    fn current_sequence(&self, key: CounterKey) -> Result<u32, StoreError>;

    /// Advance `key` from `expected` to `expected + 1`, returning the new
    /// value.
    fn compare_and_advance(&self, key: CounterKey, expected: u32) -> Result<u32, StoreError>;
}

/// The full entity-store surface the ledger runs against.
pub trait EntityStore:
    CustomerStore + ProductStore + TransactionStore + InvoiceCounterStore
{
}

impl<T> EntityStore for T where
    T: CustomerStore + ProductStore + TransactionStore + InvoiceCounterStore
{
}

impl<S> CustomerStore for Arc<S>
where
    S: CustomerStore + ?Sized,
{
    fn insert_customer(&self, customer: &Customer) -> Result<(), StoreError> {
        (**self).insert_customer(customer)
    }

    fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        (**self).get_customer(id)
    }

    fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        (**self).list_customers()
    }

    fn delete_customer(&self, id: CustomerId) -> Result<bool, StoreError> {
        (**self).delete_customer(id)
    }
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn insert_product(&self, product: &Product) -> Result<(), StoreError> {
        (**self).insert_product(product)
    }

    fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).get_product(id)
    }

    fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list_products()
    }

    fn delete_product(&self, id: ProductId) -> Result<bool, StoreError> {
        (**self).delete_product(id)
    }
}

impl<S> TransactionStore for Arc<S>
where
    S: TransactionStore + ?Sized,
{
    fn insert_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        (**self).insert_transaction(transaction)
    }

    fn update_transaction(&self, transaction: &Transaction) -> Result<bool, StoreError> {
        (**self).update_transaction(transaction)
    }

    fn delete_transaction(&self, id: TransactionId) -> Result<bool, StoreError> {
        (**self).delete_transaction(id)
    }

    fn get_transaction(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError> {
        (**self).get_transaction(id)
    }

    fn transactions_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Transaction>, StoreError> {
        (**self).transactions_for_customer(customer_id)
    }

    fn all_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        (**self).all_transactions()
    }

    fn transactions_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError> {
        (**self).transactions_created_between(start, end)
    }
}

impl<S> InvoiceCounterStore for Arc<S>
where
    S: InvoiceCounterStore + ?Sized,
{
    fn current_sequence(&self, key: CounterKey) -> Result<u32, StoreError> {
        (**self).current_sequence(key)
    }

    fn compare_and_advance(&self, key: CounterKey, expected: u32) -> Result<u32, StoreError> {
        (**self).compare_and_advance(key, expected)
    }
}
