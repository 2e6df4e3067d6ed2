use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use scrapledger_core::{CustomerId, Entity, ProductId, TransactionId};
use scrapledger_model::{Customer, Product, Transaction};

use crate::traits::{
    CounterKey, CustomerStore, InvoiceCounterStore, ProductStore, StoreError, TransactionStore,
};

/// In-memory entity store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    customers: RwLock<HashMap<CustomerId, Customer>>,
    products: RwLock<HashMap<ProductId, Product>>,
    transactions: RwLock<HashMap<TransactionId, Transaction>>,
    counters: RwLock<HashMap<CounterKey, u32>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

impl CustomerStore for InMemoryStore {
    fn insert_customer(&self, customer: &Customer) -> Result<(), StoreError> {
        let mut customers = self.customers.write().map_err(|_| poisoned())?;
        customers.insert(customer.id_typed(), customer.clone());
        Ok(())
    }

    fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let customers = self.customers.read().map_err(|_| poisoned())?;
        Ok(customers.get(&id).cloned())
    }

    fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let customers = self.customers.read().map_err(|_| poisoned())?;
        let mut all: Vec<Customer> = customers.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(all)
    }

    fn delete_customer(&self, id: CustomerId) -> Result<bool, StoreError> {
        let mut customers = self.customers.write().map_err(|_| poisoned())?;
        Ok(customers.remove(&id).is_some())
    }
}

impl ProductStore for InMemoryStore {
    fn insert_product(&self, product: &Product) -> Result<(), StoreError> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        products.insert(product.id_typed(), product.clone());
        Ok(())
    }

    fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.get(&id).cloned())
    }

    fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(all)
    }

    fn delete_product(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        Ok(products.remove(&id).is_some())
    }
}

// Newest first; UUIDv7 ids are time-ordered, so they break created_at ties
// in insertion order.
fn sort_newest_first(rows: &mut [Transaction]) {
    rows.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(a.id()))
    });
}

impl TransactionStore for InMemoryStore {
    fn insert_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        let mut transactions = self.transactions.write().map_err(|_| poisoned())?;
        transactions.insert(transaction.id_typed(), transaction.clone());
        Ok(())
    }

    fn update_transaction(&self, transaction: &Transaction) -> Result<bool, StoreError> {
        let mut transactions = self.transactions.write().map_err(|_| poisoned())?;
        match transactions.get_mut(&transaction.id_typed()) {
            Some(row) => {
                *row = transaction.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_transaction(&self, id: TransactionId) -> Result<bool, StoreError> {
        let mut transactions = self.transactions.write().map_err(|_| poisoned())?;
        Ok(transactions.remove(&id).is_some())
    }

    fn get_transaction(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError> {
        let transactions = self.transactions.read().map_err(|_| poisoned())?;
        Ok(transactions.get(&id).cloned())
    }

    fn transactions_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Transaction>, StoreError> {
        let transactions = self.transactions.read().map_err(|_| poisoned())?;
        let mut rows: Vec<Transaction> = transactions
            .values()
            .filter(|t| t.customer_id() == customer_id)
            .cloned()
            .collect();
        sort_newest_first(&mut rows);
        Ok(rows)
    }

    fn all_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        let transactions = self.transactions.read().map_err(|_| poisoned())?;
        let mut rows: Vec<Transaction> = transactions.values().cloned().collect();
        sort_newest_first(&mut rows);
        Ok(rows)
    }

    fn transactions_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError> {
        let transactions = self.transactions.read().map_err(|_| poisoned())?;
        let mut rows: Vec<Transaction> = transactions
            .values()
            .filter(|t| start <= t.created_at() && t.created_at() <= end)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(rows)
    }
}

impl InvoiceCounterStore for InMemoryStore {
    fn current_sequence(&self, key: CounterKey) -> Result<u32, StoreError> {
        let counters = self.counters.read().map_err(|_| poisoned())?;
        Ok(counters.get(&key).copied().unwrap_or(0))
    }

    fn compare_and_advance(&self, key: CounterKey, expected: u32) -> Result<u32, StoreError> {
        let mut counters = self.counters.write().map_err(|_| poisoned())?;
        let current = counters.entry(key).or_insert(0);
        if *current != expected {
            return Err(StoreError::Conflict(format!(
                "sequence for {key:?}: expected {expected}, found {current}"
            )));
        }
        *current += 1;
        Ok(*current)
    }
}
