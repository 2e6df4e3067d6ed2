use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scrapledger_core::{CustomerId, ProductId};
use scrapledger_model::{Customer, Product, SerialNumber, Transaction};

/// Display label for rows whose customer/product no longer resolves.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Per-customer spend over a (filtered) transaction set.
///
/// `customer_id: None` is the synthetic bucket collecting transactions whose
/// customer was deleted, so money is never silently dropped from the totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSpend {
    pub customer_id: Option<CustomerId>,
    pub name: String,
    pub phone: Option<String>,
    pub transaction_count: u64,
    pub total_spend: Decimal,
}

/// Per-product movement over a (filtered) transaction set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMovement {
    pub product_id: Option<ProductId>,
    pub name: String,
    pub serial_number: Option<SerialNumber>,
    pub total_quantity: Decimal,
    pub total_amount: Decimal,
}

/// Headline totals over a (filtered) transaction set.
///
/// `total_customers`/`total_products` count the distinct customer/product
/// ids appearing in the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_customers: usize,
    pub total_products: usize,
    pub total_transactions: usize,
    pub total_amount: Decimal,
    pub total_quantity: Decimal,
}

/// Group by customer, summing spend and counting rows; sorted by spend
/// descending (name ascending on ties).
pub fn customer_spend(
    transactions: &[Transaction],
    customers: &HashMap<CustomerId, Customer>,
) -> Vec<CustomerSpend> {
    let mut groups: HashMap<Option<CustomerId>, CustomerSpend> = HashMap::new();
    for transaction in transactions {
        let key = customers
            .contains_key(&transaction.customer_id())
            .then(|| transaction.customer_id());
        let row = groups.entry(key).or_insert_with(|| match key {
            Some(id) => {
                let customer = &customers[&id];
                CustomerSpend {
                    customer_id: Some(id),
                    name: customer.name().to_string(),
                    phone: customer.phone().map(str::to_string),
                    transaction_count: 0,
                    total_spend: Decimal::ZERO,
                }
            }
            None => CustomerSpend {
                customer_id: None,
                name: UNKNOWN_LABEL.to_string(),
                phone: None,
                transaction_count: 0,
                total_spend: Decimal::ZERO,
            },
        });
        row.transaction_count += 1;
        row.total_spend += transaction.total_amount();
    }

    let mut rows: Vec<CustomerSpend> = groups.into_values().collect();
    rows.sort_by(|a, b| {
        b.total_spend
            .cmp(&a.total_spend)
            .then_with(|| a.name.cmp(&b.name))
    });
    rows
}

/// Group by product, summing quantity and amount; sorted by amount
/// descending (name ascending on ties).
pub fn product_movement(
    transactions: &[Transaction],
    products: &HashMap<ProductId, Product>,
) -> Vec<ProductMovement> {
    let mut groups: HashMap<Option<ProductId>, ProductMovement> = HashMap::new();
    for transaction in transactions {
        let key = products
            .contains_key(&transaction.product_id())
            .then(|| transaction.product_id());
        let row = groups.entry(key).or_insert_with(|| match key {
            Some(id) => {
                let product = &products[&id];
                ProductMovement {
                    product_id: Some(id),
                    name: product.name().to_string(),
                    serial_number: Some(product.serial_number().clone()),
                    total_quantity: Decimal::ZERO,
                    total_amount: Decimal::ZERO,
                }
            }
            None => ProductMovement {
                product_id: None,
                name: UNKNOWN_LABEL.to_string(),
                serial_number: None,
                total_quantity: Decimal::ZERO,
                total_amount: Decimal::ZERO,
            },
        });
        row.total_quantity += transaction.quantity();
        row.total_amount += transaction.total_amount();
    }

    let mut rows: Vec<ProductMovement> = groups.into_values().collect();
    rows.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then_with(|| a.name.cmp(&b.name))
    });
    rows
}

/// Plain sums over the set. Must equal the per-group aggregates to the
/// cent/unit; `tests::properties` pins that equality down.
pub fn summary(transactions: &[Transaction]) -> Summary {
    let customers: HashSet<CustomerId> =
        transactions.iter().map(Transaction::customer_id).collect();
    let products: HashSet<ProductId> = transactions.iter().map(Transaction::product_id).collect();
    Summary {
        total_customers: customers.len(),
        total_products: products.len(),
        total_transactions: transactions.len(),
        total_amount: transactions.iter().map(Transaction::total_amount).sum(),
        total_quantity: transactions.iter().map(Transaction::quantity).sum(),
    }
}
