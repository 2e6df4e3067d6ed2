use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scrapledger_core::{CustomerId, Entity, LedgerError, LedgerResult, ProductId, TransactionId, round2};

use crate::invoice::InvoiceNumber;
use crate::unit::Unit;

/// A single ledger transaction: one product bought from one customer.
///
/// Invariant: `total_amount == round2(quantity * unit_price)`, established at
/// construction and re-derived on correction. Fields are private so no other
/// component can break the invariant; the `invoice_number` and `created_at`
/// of an existing transaction never change (a transaction cannot move
/// between invoices).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    customer_id: CustomerId,
    product_id: ProductId,
    quantity: Decimal,
    unit_price: Decimal,
    unit: Unit,
    total_amount: Decimal,
    invoice_number: InvoiceNumber,
    created_at: DateTime<Utc>,
}

impl Transaction {
    /// The amount rule: `round2(quantity * unit_price)`.
    pub fn line_total(quantity: Decimal, unit_price: Decimal) -> Decimal {
        round2(quantity * unit_price)
    }

    /// Quantity must be strictly positive, unit price non-negative.
    pub fn validate(quantity: Decimal, unit_price: Decimal) -> LedgerResult<()> {
        if quantity <= Decimal::ZERO {
            return Err(LedgerError::validation("quantity", "must be positive"));
        }
        if unit_price < Decimal::ZERO {
            return Err(LedgerError::validation(
                "unit_price",
                "must not be negative",
            ));
        }
        Ok(())
    }

    pub fn new(
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: Decimal,
        unit_price: Decimal,
        unit: Unit,
        invoice_number: InvoiceNumber,
        created_at: DateTime<Utc>,
    ) -> LedgerResult<Self> {
        Self::validate(quantity, unit_price)?;
        Ok(Self {
            id: TransactionId::new(),
            customer_id,
            product_id,
            quantity,
            unit_price,
            unit,
            total_amount: Self::line_total(quantity, unit_price),
            invoice_number,
            created_at,
        })
    }

    /// Correction: replace the measured fields and re-derive the total.
    ///
    /// Identity, invoice number and creation time are kept.
    pub fn corrected(
        &self,
        quantity: Decimal,
        unit_price: Decimal,
        unit: Unit,
    ) -> LedgerResult<Self> {
        Self::validate(quantity, unit_price)?;
        Ok(Self {
            quantity,
            unit_price,
            unit,
            total_amount: Self::line_total(quantity, unit_price),
            invoice_number: self.invoice_number.clone(),
            ..*self
        })
    }

    pub fn id_typed(&self) -> TransactionId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn invoice_number(&self) -> &InvoiceNumber {
        &self.invoice_number
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Invariant check, used by tests and store sanity assertions.
    pub fn holds_amount_invariant(&self) -> bool {
        self.total_amount == Self::line_total(self.quantity, self.unit_price)
    }
}

impl Entity for Transaction {
    type Id = TransactionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_invoice() -> InvoiceNumber {
        InvoiceNumber::parse("ABX-20240115-001").unwrap()
    }

    fn record(quantity: Decimal, unit_price: Decimal) -> LedgerResult<Transaction> {
        Transaction::new(
            CustomerId::new(),
            ProductId::new(),
            quantity,
            unit_price,
            Unit::Kg,
            test_invoice(),
            Utc::now(),
        )
    }

    #[test]
    fn derives_total_from_quantity_and_price() {
        let tx = record(dec!(2.5), dec!(150.00)).unwrap();
        assert_eq!(tx.total_amount(), dec!(375.00));
        assert!(tx.holds_amount_invariant());
    }

    #[test]
    fn total_is_rounded_to_cents() {
        let tx = record(dec!(0.333), dec!(10.00)).unwrap();
        assert_eq!(tx.total_amount(), dec!(3.33));
    }

    #[test]
    fn zero_price_is_allowed_zero_quantity_is_not() {
        assert!(record(dec!(1), dec!(0)).is_ok());
        let err = record(dec!(0), dec!(10)).unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field, .. } if field == "quantity"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = record(dec!(1), dec!(-0.01)).unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field, .. } if field == "unit_price"));
    }

    #[test]
    fn correction_rederives_total_but_keeps_invoice_and_time() {
        let tx = record(dec!(2), dec!(100)).unwrap();
        let fixed = tx.corrected(dec!(3), dec!(90), Unit::Bag).unwrap();
        assert_eq!(fixed.id_typed(), tx.id_typed());
        assert_eq!(fixed.invoice_number(), tx.invoice_number());
        assert_eq!(fixed.created_at(), tx.created_at());
        assert_eq!(fixed.total_amount(), dec!(270.00));
        assert_eq!(fixed.unit(), Unit::Bag);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: every accepted transaction holds the amount invariant.
            #[test]
            fn amount_invariant_holds(q in 1i64..=10_000_000, p in 0i64..=10_000_000) {
                // Scale to 3 decimal places so fractional quantities/prices are covered.
                let quantity = Decimal::new(q, 3);
                let unit_price = Decimal::new(p, 3);
                let tx = record(quantity, unit_price).unwrap();
                prop_assert!(tx.holds_amount_invariant());
                prop_assert!(tx.total_amount().scale() <= 2);
            }

            /// Property: corrections preserve the invariant too.
            #[test]
            fn correction_preserves_invariant(q in 1i64..=1_000_000, p in 0i64..=1_000_000) {
                let tx = record(dec!(1), dec!(1)).unwrap();
                let fixed = tx.corrected(Decimal::new(q, 2), Decimal::new(p, 2), Unit::Piece).unwrap();
                prop_assert!(fixed.holds_amount_invariant());
            }
        }
    }
}
