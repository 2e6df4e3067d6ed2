//! Black-box flows: ledger writes feeding the report aggregation, the way
//! the intake screen and the reports screen consume them.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use scrapledger_core::{CustomerId, ProductId};
use scrapledger_ledger::{RecordTransaction, TransactionLedger};
use scrapledger_model::{Customer, Product, Unit};
use scrapledger_reports::{DateRange, customer_spend, product_movement, summary};
use scrapledger_store::{CustomerStore, InMemoryStore, ProductStore, TransactionStore};

fn jan15() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
}

struct Fixture {
    store: Arc<InMemoryStore>,
    ledger: TransactionLedger<InMemoryStore>,
    ahmad: Customer,
    bello: Customer,
    copper: Product,
}

fn fixture() -> Fixture {
    scrapledger_observability::init();
    let store = Arc::new(InMemoryStore::new());
    let ahmad = Customer::new("Ahmad Bello", None, jan15()).unwrap();
    let bello = Customer::new("Bello Tijjani Zubairu", None, jan15()).unwrap();
    let copper = Product::new("Copper Wire", None, jan15()).unwrap();
    store.insert_customer(&ahmad).unwrap();
    store.insert_customer(&bello).unwrap();
    store.insert_product(&copper).unwrap();
    Fixture {
        ledger: TransactionLedger::new(Arc::clone(&store)),
        store,
        ahmad,
        bello,
        copper,
    }
}

fn record(quantity: Decimal, unit_price: Decimal, product_id: ProductId) -> RecordTransaction {
    RecordTransaction {
        product_id,
        quantity,
        unit_price,
        unit: Unit::Kg,
        invoice_number: None,
        occurred_at: jan15(),
    }
}

fn directory(store: &InMemoryStore) -> (HashMap<CustomerId, Customer>, HashMap<ProductId, Product>) {
    let customers = store
        .list_customers()
        .unwrap()
        .into_iter()
        .map(|c| (c.id_typed(), c))
        .collect();
    let products = store
        .list_products()
        .unwrap()
        .into_iter()
        .map(|p| (p.id_typed(), p))
        .collect();
    (customers, products)
}

#[test]
fn first_invoice_of_the_day_uses_padded_initials_and_seq_one() {
    let fx = fixture();
    let session = fx.ledger.start_invoice(fx.ahmad.id_typed(), jan15()).unwrap();
    assert_eq!(session.invoice_number().as_str(), "ABX-20240115-001");

    let session = fx.ledger.start_invoice(fx.bello.id_typed(), jan15()).unwrap();
    assert_eq!(session.invoice_number().as_str(), "BTZ-20240115-001");
}

#[test]
fn concurrent_sessions_never_share_an_invoice_number() {
    let fx = fixture();
    let ledger = Arc::new(fx.ledger);
    let customer_id = fx.ahmad.id_typed();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ledger = Arc::clone(&ledger);
            std::thread::spawn(move || {
                ledger
                    .start_invoice(customer_id, jan15())
                    .unwrap()
                    .invoice_number()
                    .clone()
            })
        })
        .collect();

    let numbers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let mut seqs: Vec<u32> = numbers.iter().map(|n| n.sequence().unwrap()).collect();
    seqs.sort_unstable();
    assert_eq!(seqs, (1..=8).collect::<Vec<_>>());
    assert!(numbers.iter().all(|n| n.day_prefix() == Some("ABX-20240115-")));
}

#[test]
fn receipt_view_tracks_only_the_active_session() {
    let fx = fixture();
    let first = fx.ledger.start_invoice(fx.ahmad.id_typed(), jan15()).unwrap();
    fx.ledger
        .record(&first, record(dec!(2.5), dec!(150.00), fx.copper.id_typed()))
        .unwrap();

    let second = fx.ledger.start_invoice(fx.ahmad.id_typed(), jan15()).unwrap();
    let tx = fx
        .ledger
        .record(&second, record(dec!(1), dec!(80), fx.copper.id_typed()))
        .unwrap();
    assert_eq!(tx.total_amount(), dec!(80.00));

    let receipt = fx
        .ledger
        .current_invoice_transactions(fx.ahmad.id_typed(), second.invoice_number())
        .unwrap();
    assert_eq!(receipt.len(), 1);
    assert_eq!(receipt[0].total_amount(), dec!(80.00));

    // The full history still shows both sessions.
    let history = fx.ledger.list_transactions(fx.ahmad.id_typed()).unwrap();
    assert_eq!(history.len(), 2);
    let receipt_total: Decimal = receipt.iter().map(|t| t.total_amount()).sum();
    assert_eq!(receipt_total, dec!(80.00));
}

#[test]
fn ledger_writes_flow_into_consistent_aggregates() {
    let fx = fixture();
    let session_a = fx.ledger.start_invoice(fx.ahmad.id_typed(), jan15()).unwrap();
    let session_b = fx.ledger.start_invoice(fx.bello.id_typed(), jan15()).unwrap();

    fx.ledger
        .record(&session_a, record(dec!(1), dec!(100), fx.copper.id_typed()))
        .unwrap();
    fx.ledger
        .record(&session_a, record(dec!(1), dec!(50), fx.copper.id_typed()))
        .unwrap();
    fx.ledger
        .record(&session_b, record(dec!(1), dec!(200), fx.copper.id_typed()))
        .unwrap();

    let all = fx.store.all_transactions().unwrap();
    let filtered = DateRange::All.filter(&all, jan15()).unwrap();
    let (customers, products) = directory(&fx.store);

    let spend = customer_spend(&filtered, &customers);
    assert_eq!(spend[0].name, "Bello Tijjani Zubairu");
    assert_eq!(spend[0].total_spend, dec!(200.00));
    assert_eq!(spend[1].name, "Ahmad Bello");
    assert_eq!(spend[1].total_spend, dec!(150.00));

    let totals = summary(&filtered);
    assert_eq!(totals.total_amount, dec!(350.00));
    assert_eq!(totals.total_transactions, 3);

    let movement = product_movement(&filtered, &products);
    let moved: Decimal = movement.iter().map(|m| m.total_amount).sum();
    assert_eq!(moved, totals.total_amount);
}

#[test]
fn deleted_transactions_vanish_from_history_and_aggregates() {
    let fx = fixture();
    let session = fx.ledger.start_invoice(fx.ahmad.id_typed(), jan15()).unwrap();
    let keep = fx
        .ledger
        .record(&session, record(dec!(1), dec!(100), fx.copper.id_typed()))
        .unwrap();
    let gone = fx
        .ledger
        .record(&session, record(dec!(1), dec!(40), fx.copper.id_typed()))
        .unwrap();

    fx.ledger.delete(gone.id_typed()).unwrap();

    let history = fx.ledger.list_transactions(fx.ahmad.id_typed()).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id_typed(), keep.id_typed());

    let all = fx.store.all_transactions().unwrap();
    let (customers, _) = directory(&fx.store);
    assert_eq!(summary(&all).total_amount, dec!(100.00));
    let spend = customer_spend(&all, &customers);
    assert_eq!(spend.len(), 1);
    assert_eq!(spend[0].transaction_count, 1);
}

#[test]
fn deleting_a_customer_degrades_reports_instead_of_failing() {
    let fx = fixture();
    let session = fx.ledger.start_invoice(fx.ahmad.id_typed(), jan15()).unwrap();
    fx.ledger
        .record(&session, record(dec!(2), dec!(75), fx.copper.id_typed()))
        .unwrap();

    fx.store.delete_customer(fx.ahmad.id_typed()).unwrap();

    let all = fx.store.all_transactions().unwrap();
    let (customers, _) = directory(&fx.store);
    let spend = customer_spend(&all, &customers);
    assert_eq!(spend.len(), 1);
    assert!(spend[0].customer_id.is_none());
    assert_eq!(spend[0].name, "Unknown");
    assert_eq!(spend[0].total_spend, dec!(150.00));
    assert_eq!(summary(&all).total_amount, dec!(150.00));
}
