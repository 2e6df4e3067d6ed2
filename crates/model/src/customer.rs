use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scrapledger_core::{CustomerId, Entity, LedgerError, LedgerResult};

/// A customer record: the identity anchor for invoices and spend aggregation.
///
/// Customers are created/edited by external CRUD flows; the ledger only needs
/// their identity, display name and phone, and must tolerate a customer being
/// deleted while transactions still reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(
        name: impl Into<String>,
        phone: Option<String>,
        created_at: DateTime<Utc>,
    ) -> LedgerResult<Self> {
        Self::with_id(CustomerId::new(), name, phone, created_at)
    }

    pub fn with_id(
        id: CustomerId,
        name: impl Into<String>,
        phone: Option<String>,
        created_at: DateTime<Utc>,
    ) -> LedgerResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(LedgerError::validation("name", "must not be empty"));
        }
        if let Some(phone) = phone.as_deref() {
            validate_phone(phone)?;
        }
        Ok(Self {
            id,
            name,
            phone,
            created_at,
        })
    }

    pub fn id_typed(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Phone numbers are free-form internationally, so the check is permissive:
/// digits plus `+ - ( )` and spaces, carrying 7 to 15 digits.
fn validate_phone(phone: &str) -> LedgerResult<()> {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' ');
    if !phone.chars().all(allowed) {
        return Err(LedgerError::validation(
            "phone",
            "may only contain digits, spaces and + - ( )",
        ));
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(7..=15).contains(&digits) {
        return Err(LedgerError::validation(
            "phone",
            "must contain between 7 and 15 digits",
        ));
    }
    Ok(())
}
