//! `scrapledger-model` — shared data model of the scrap-trading ledger.
//!
//! Entities cross two boundaries: the entity store below and the
//! ledger/report engines above. All invariants (non-empty names, phone
//! shape, the amount rule) are enforced at construction so nothing past
//! this crate ever sees a malformed record.

pub mod customer;
pub mod invoice;
pub mod product;
pub mod transaction;
pub mod unit;

pub use customer::Customer;
pub use invoice::{InvoiceNumber, initials};
pub use product::{Product, SerialNumber};
pub use transaction::Transaction;
pub use unit::Unit;
