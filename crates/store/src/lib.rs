//! `scrapledger-store` — the entity-store boundary.
//!
//! Durable storage is an external collaborator; this crate defines the trait
//! surface the ledger and report layers depend on, plus an in-memory
//! implementation for tests and development. Backends must honor the
//! ordering and atomicity guarantees documented on each trait.

pub mod memory;
pub mod traits;

pub use memory::InMemoryStore;
pub use traits::{
    CounterKey, CustomerStore, EntityStore, InvoiceCounterStore, ProductStore, StoreError,
    TransactionStore,
};
