use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use scrapledger_core::{LedgerError, LedgerResult};
use scrapledger_model::{Customer, InvoiceNumber, initials};
use scrapledger_store::{CounterKey, InvoiceCounterStore, StoreError};

/// Bounded internal retries before sequence contention is surfaced.
///
/// Every lost swap corresponds to another caller's win, so a caller racing
/// against N peers loses at most N times; 8 comfortably covers the handful
/// of simultaneous sessions a shop front ever has.
const MAX_CAS_ATTEMPTS: u32 = 8;

/// Allocates invoice numbers: `<initials>-<YYYYMMDD>-<seq>` with the
/// sequence scoped to (customer, day).
///
/// Sequences come from the store's atomic counter via compare-and-swap, so
/// concurrent sessions for the same customer always receive distinct,
/// contiguous values. If the store cannot be reached at all, a degraded
/// globally-unique `INV-` number is issued instead; invoice creation is
/// never blocked on the sequencer.
pub struct InvoiceSequencer<S> {
    store: Arc<S>,
}

impl<S> InvoiceSequencer<S>
where
    S: InvoiceCounterStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn next(&self, customer: &Customer, now: DateTime<Utc>) -> LedgerResult<InvoiceNumber> {
        let day = now.date_naive();
        let key = CounterKey {
            customer_id: customer.id_typed(),
            day,
        };
        let initials = initials(customer.name());

        let mut attempt = 0;
        loop {
            let current = match self.store.current_sequence(key) {
                Ok(current) => current,
                Err(StoreError::Unavailable(msg)) => return Ok(self.degrade(customer, &msg, now)),
                Err(err) => return Err(err.into()),
            };

            match self.store.compare_and_advance(key, current) {
                Ok(seq) => {
                    let number = InvoiceNumber::compose(&initials, day, seq);
                    debug!(customer_id = %customer.id_typed(), invoice = %number, "issued invoice number");
                    return Ok(number);
                }
                Err(StoreError::Conflict(msg)) => {
                    attempt += 1;
                    if attempt >= MAX_CAS_ATTEMPTS {
                        return Err(LedgerError::conflict(msg));
                    }
                    debug!(customer_id = %customer.id_typed(), attempt, "invoice sequence contention, retrying");
                    std::thread::sleep(Duration::from_millis(1 << attempt));
                }
                Err(StoreError::Unavailable(msg)) => return Ok(self.degrade(customer, &msg, now)),
            }
        }
    }

    fn degrade(&self, customer: &Customer, reason: &str, now: DateTime<Utc>) -> InvoiceNumber {
        let number = InvoiceNumber::degraded(now);
        warn!(
            customer_id = %customer.id_typed(),
            invoice = %number,
            reason,
            "store unavailable, issuing degraded invoice number"
        );
        number
    }
}
