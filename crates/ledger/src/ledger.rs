use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use scrapledger_core::{CustomerId, LedgerError, LedgerResult, ProductId, TransactionId};
use scrapledger_model::{InvoiceNumber, Transaction, Unit};
use scrapledger_store::EntityStore;

use crate::sequencer::InvoiceSequencer;
use crate::session::LedgerSession;

/// Command: record a new transaction against a session's invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTransaction {
    pub product_id: ProductId,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub unit: Unit,
    /// Explicit target invoice. When `None` the session's current number is
    /// used. Superseded numbers are accepted; the ledger does not lock old
    /// invoices.
    pub invoice_number: Option<InvoiceNumber>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: correct a recorded transaction's measured fields.
///
/// The invoice number is deliberately absent: a transaction can never be
/// moved between invoices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectTransaction {
    pub transaction_id: TransactionId,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub unit: Unit,
}

/// The authoritative read/write surface for transactions.
///
/// The ledger is the sole writer of the transaction table and the boundary
/// that enforces the amount rule: `total_amount` is derived before anything
/// is handed to the store, so a persisted row is never in an inconsistent
/// state, and a failed write leaves no row behind.
pub struct TransactionLedger<S> {
    store: Arc<S>,
    sequencer: InvoiceSequencer<S>,
}

impl<S> TransactionLedger<S>
where
    S: EntityStore,
{
    pub fn new(store: Arc<S>) -> Self {
        let sequencer = InvoiceSequencer::new(Arc::clone(&store));
        Self { store, sequencer }
    }

    /// Open a new invoice for a customer.
    ///
    /// Always allocates a fresh number: calling this again for the same
    /// customer supersedes the previous session and never reuses its number.
    pub fn start_invoice(
        &self,
        customer_id: CustomerId,
        now: DateTime<Utc>,
    ) -> LedgerResult<LedgerSession> {
        let customer = self
            .store
            .get_customer(customer_id)?
            .ok_or_else(|| LedgerError::not_found("customer", customer_id))?;
        let invoice_number = self.sequencer.next(&customer, now)?;
        debug!(customer_id = %customer_id, invoice = %invoice_number, "started invoice");
        Ok(LedgerSession::new(customer_id, invoice_number))
    }

    /// Validate, derive the total, and persist a new transaction.
    pub fn record(
        &self,
        session: &LedgerSession,
        cmd: RecordTransaction,
    ) -> LedgerResult<Transaction> {
        Transaction::validate(cmd.quantity, cmd.unit_price)?;

        let customer_id = session.customer_id();
        if self.store.get_customer(customer_id)?.is_none() {
            return Err(LedgerError::not_found("customer", customer_id));
        }
        if self.store.get_product(cmd.product_id)?.is_none() {
            return Err(LedgerError::not_found("product", cmd.product_id));
        }

        let invoice_number = cmd
            .invoice_number
            .unwrap_or_else(|| session.invoice_number().clone());

        let transaction = Transaction::new(
            customer_id,
            cmd.product_id,
            cmd.quantity,
            cmd.unit_price,
            cmd.unit,
            invoice_number,
            cmd.occurred_at,
        )?;
        self.store.insert_transaction(&transaction)?;
        debug!(
            transaction_id = %transaction.id_typed(),
            invoice = %transaction.invoice_number(),
            total = %transaction.total_amount(),
            "recorded transaction"
        );
        Ok(transaction)
    }

    /// Re-derive a transaction's total from corrected fields.
    pub fn correct(&self, cmd: CorrectTransaction) -> LedgerResult<Transaction> {
        let existing = self
            .store
            .get_transaction(cmd.transaction_id)?
            .ok_or_else(|| LedgerError::not_found("transaction", cmd.transaction_id))?;
        let corrected = existing.corrected(cmd.quantity, cmd.unit_price, cmd.unit)?;
        if !self.store.update_transaction(&corrected)? {
            return Err(LedgerError::not_found("transaction", cmd.transaction_id));
        }
        Ok(corrected)
    }

    /// Hard delete. There is no soft-delete or undo.
    pub fn delete(&self, id: TransactionId) -> LedgerResult<()> {
        if !self.store.delete_transaction(id)? {
            return Err(LedgerError::not_found("transaction", id));
        }
        debug!(transaction_id = %id, "deleted transaction");
        Ok(())
    }

    /// A customer's full history, newest first.
    pub fn list_transactions(&self, customer_id: CustomerId) -> LedgerResult<Vec<Transaction>> {
        Ok(self.store.transactions_for_customer(customer_id)?)
    }

    /// The subset of a customer's history on one invoice, newest first.
    ///
    /// This is what receipts render: the active session only, not the
    /// customer's lifetime ledger.
    pub fn current_invoice_transactions(
        &self,
        customer_id: CustomerId,
        invoice_number: &InvoiceNumber,
    ) -> LedgerResult<Vec<Transaction>> {
        let history = self.store.transactions_for_customer(customer_id)?;
        Ok(history
            .into_iter()
            .filter(|t| t.invoice_number() == invoice_number)
            .collect())
    }
}
