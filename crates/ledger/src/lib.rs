//! `scrapledger-ledger` — the authoritative read/write surface for
//! transactions.
//!
//! Owns the invariant-preserving lifecycle of transactions attached to an
//! invoice: creation, correction, deletion, and the "current invoice" view
//! versus full history. Invoice numbers come from [`InvoiceSequencer`],
//! which allocates per-(customer, day) sequences atomically against the
//! entity store.

pub mod ledger;
pub mod sequencer;
pub mod session;

pub use ledger::{CorrectTransaction, RecordTransaction, TransactionLedger};
pub use sequencer::InvoiceSequencer;
pub use session::LedgerSession;
