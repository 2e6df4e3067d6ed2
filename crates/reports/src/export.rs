//! Row contracts consumed by the external export adapter.
//!
//! The adapter renders these to print/PDF/spreadsheet; this module only
//! guarantees the rows agree with the aggregates they were built from.
//! Currency values are rendered with 2 decimal places, no currency symbol.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scrapledger_core::{CustomerId, ProductId};
use scrapledger_model::{Customer, Product, Transaction};

use crate::aggregate::{CustomerSpend, ProductMovement, Summary, UNKNOWN_LABEL};

const NO_PHONE: &str = "No Phone";

/// One (metric, value) line of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub metric: String,
    pub value: String,
}

pub fn summary_rows(summary: &Summary) -> Vec<SummaryRow> {
    let row = |metric: &str, value: String| SummaryRow {
        metric: metric.to_string(),
        value,
    };
    vec![
        row("Total Customers", summary.total_customers.to_string()),
        row("Total Products", summary.total_products.to_string()),
        row("Total Transactions", summary.total_transactions.to_string()),
        row("Total Amount", format!("{:.2}", summary.total_amount)),
        row("Total Quantity", format!("{:.2}", summary.total_quantity)),
    ]
}

/// Customer-spending view: (customer, phone, transactions, total spent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSpendRow {
    pub customer: String,
    pub phone: String,
    pub transaction_count: u64,
    pub total_spend: String,
}

pub fn customer_spend_rows(spend: &[CustomerSpend]) -> Vec<CustomerSpendRow> {
    spend
        .iter()
        .map(|row| CustomerSpendRow {
            customer: row.name.clone(),
            phone: row.phone.clone().unwrap_or_else(|| NO_PHONE.to_string()),
            transaction_count: row.transaction_count,
            total_spend: format!("{:.2}", row.total_spend),
        })
        .collect()
}

/// Product-movement view: (product, serial, quantity bought, amount).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMovementRow {
    pub product: String,
    pub serial: String,
    pub total_quantity: String,
    pub total_amount: String,
}

pub fn product_movement_rows(movement: &[ProductMovement]) -> Vec<ProductMovementRow> {
    movement
        .iter()
        .map(|row| ProductMovementRow {
            product: row.name.clone(),
            serial: row
                .serial_number
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            total_quantity: format!("{:.2}", row.total_quantity),
            total_amount: format!("{:.2}", row.total_amount),
        })
        .collect()
}

/// Raw filtered transactions: (date, customer, product, quantity, amount).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub date: String,
    pub customer: String,
    pub product: String,
    pub quantity: String,
    pub total_amount: String,
}

pub fn transaction_rows(
    transactions: &[Transaction],
    customers: &HashMap<CustomerId, Customer>,
    products: &HashMap<ProductId, Product>,
) -> Vec<TransactionRow> {
    transactions
        .iter()
        .map(|t| TransactionRow {
            date: render_timestamp(t.created_at()),
            customer: customers
                .get(&t.customer_id())
                .map(|c| c.name().to_string())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            product: products
                .get(&t.product_id())
                .map(|p| p.name().to_string())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            quantity: format!("{} {}", t.quantity(), t.unit()),
            total_amount: format!("{:.2}", t.total_amount()),
        })
        .collect()
}

/// Customer directory listing: (name, phone, joined, status).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerListRow {
    pub name: String,
    pub phone: String,
    pub joined: String,
    pub status: String,
}

pub fn customer_list_rows(customers: &[Customer]) -> Vec<CustomerListRow> {
    customers
        .iter()
        .map(|c| CustomerListRow {
            name: c.name().to_string(),
            phone: c.phone().map(str::to_string).unwrap_or_else(|| NO_PHONE.to_string()),
            joined: render_date(c.created_at()),
            status: "Active".to_string(),
        })
        .collect()
}

/// Product catalog listing: (name, serial, description, added).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListRow {
    pub name: String,
    pub serial: String,
    pub description: String,
    pub added: String,
}

pub fn product_list_rows(products: &[Product]) -> Vec<ProductListRow> {
    products
        .iter()
        .map(|p| ProductListRow {
            name: p.name().to_string(),
            serial: p.serial_number().to_string(),
            description: p
                .description()
                .map(str::to_string)
                .unwrap_or_else(|| "No description".to_string()),
            added: render_date(p.created_at()),
        })
        .collect()
}

// dd/MM/yy hh:mm am/pm, the shape the report tables have always used.
fn render_timestamp(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%y %I:%M %p").to_string()
}

// dd Mon yyyy for directory listings.
fn render_date(at: DateTime<Utc>) -> String {
    at.format("%d %b %Y").to_string()
}
