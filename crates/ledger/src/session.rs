use serde::{Deserialize, Serialize};

use scrapledger_core::CustomerId;
use scrapledger_model::InvoiceNumber;

/// One working invoice for a customer, bounded by calls to
/// [`TransactionLedger::start_invoice`](crate::TransactionLedger::start_invoice).
///
/// The session is an explicit value handed back to the caller and passed
/// into every ledger write. There is no ambient "current invoice" state in
/// the ledger itself, so two sessions for the same customer cannot observe
/// each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSession {
    customer_id: CustomerId,
    invoice_number: InvoiceNumber,
}

impl LedgerSession {
    pub fn new(customer_id: CustomerId, invoice_number: InvoiceNumber) -> Self {
        Self {
            customer_id,
            invoice_number,
        }
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn invoice_number(&self) -> &InvoiceNumber {
        &self.invoice_number
    }
}
