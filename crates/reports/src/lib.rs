//! `scrapledger-reports` — derived business views over the transaction
//! history.
//!
//! Everything here is a pure function of its input slice: the caller fetches
//! (and optionally range-filters) the transactions, and the aggregator
//! groups them into the canonical views without touching the entity store.
//! Row types in [`export`] are the contract the external export adapter
//! renders to print/PDF/spreadsheet.

pub mod aggregate;
pub mod export;
pub mod range;

pub use aggregate::{CustomerSpend, ProductMovement, Summary, customer_spend, product_movement, summary};
pub use range::DateRange;
