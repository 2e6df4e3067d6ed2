use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scrapledger_core::{Entity, LedgerError, LedgerResult, ProductId};

/// Catalog serial number, assigned once at creation and immutable after.
///
/// Format: `PROD-<unix millis>-<3 digits>`, the suffix derived from the
/// product id so two products created in the same millisecond stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerialNumber(String);

impl SerialNumber {
    pub fn derive(created_at: DateTime<Utc>, id: ProductId) -> Self {
        let suffix = (id.as_uuid().as_u128() % 1000) as u32;
        Self(format!(
            "PROD-{}-{suffix:03}",
            created_at.timestamp_millis()
        ))
    }

    pub fn from_string(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tradable product: the identity anchor for movement aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: Option<String>,
    serial_number: SerialNumber,
    created_at: DateTime<Utc>,
}

impl Product {
    /// Create a product, deriving its serial number from the creation time.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> LedgerResult<Self> {
        let id = ProductId::new();
        let serial_number = SerialNumber::derive(created_at, id);
        Self::with_id(id, name, description, serial_number, created_at)
    }

    /// Rehydrate a product with a known id and serial (store read path).
    pub fn with_id(
        id: ProductId,
        name: impl Into<String>,
        description: Option<String>,
        serial_number: SerialNumber,
        created_at: DateTime<Utc>,
    ) -> LedgerResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(LedgerError::validation("name", "must not be empty"));
        }
        Ok(Self {
            id,
            name,
            description,
            serial_number,
            created_at,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn serial_number(&self) -> &SerialNumber {
        &self.serial_number
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_serial_from_creation_time() {
        let at = DateTime::from_timestamp_millis(1_705_312_800_000).unwrap();
        let product = Product::new("Copper Wire", None, at).unwrap();
        let serial = product.serial_number().as_str();
        assert!(serial.starts_with("PROD-1705312800000-"));
        assert_eq!(serial.len(), "PROD-1705312800000-".len() + 3);
    }

    #[test]
    fn serial_survives_rehydration_unchanged() {
        let at = Utc::now();
        let product = Product::new("Aluminium Sheet", None, at).unwrap();
        let rehydrated = Product::with_id(
            product.id_typed(),
            product.name(),
            None,
            product.serial_number().clone(),
            at,
        )
        .unwrap();
        assert_eq!(rehydrated.serial_number(), product.serial_number());
    }

    #[test]
    fn rejects_empty_name() {
        let err = Product::new("", None, Utc::now()).unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field, .. } if field == "name"));
    }
}
