//! Shared test harness for repository backends
//!
//! Fixtures for users, clients and invoices plus the macro-generated
//! contract suites every backend must pass.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod repository_harness;
//! use repository_harness::*;
//! ```

#![allow(dead_code)]

pub mod client_repository_tests;
pub mod invoice_repository_tests;
pub mod user_repository_tests;

use billing::entities::{Client, Invoice, InvoiceStatus, LineItem, User};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn create_test_user(name: &str, email: &str) -> User {
    User::new(name.to_string(), email, "$2b$04$not-a-real-hash".to_string())
}

pub fn create_test_client(user_id: Uuid, company_name: &str) -> Client {
    Client::new(
        user_id,
        company_name.to_string(),
        None,
        format!("billing@{}.example", company_name.to_lowercase()),
        "+91 98765 43210".to_string(),
        "ABCDE1234F".to_string(),
    )
}

pub fn line_item(description: &str, quantity: u32, unit_price: &str) -> LineItem {
    LineItem {
        description: description.to_string(),
        quantity,
        unit_price: unit_price.parse::<Decimal>().expect("valid decimal"),
    }
}

pub fn create_test_invoice(client: &Client, sequence: u64) -> Invoice {
    Invoice::issue(
        client.id,
        client.user_id,
        sequence,
        vec![line_item("Consulting", 2, "1500.00")],
        client.currency.clone(),
        None,
        None,
    )
    .expect("fixture amounts fit in a Decimal")
}

/// Invoices numbered 1..=n, created one minute apart (oldest first)
pub fn invoice_batch(client: &Client, n: u64) -> Vec<Invoice> {
    let base = Utc::now() - Duration::hours(1);
    (1..=n)
        .map(|sequence| {
            let mut invoice = create_test_invoice(client, sequence);
            invoice.created_at = at_minute(base, sequence as i64);
            invoice.updated_at = invoice.created_at;
            invoice
        })
        .collect()
}

fn at_minute(base: DateTime<Utc>, minute: i64) -> DateTime<Utc> {
    // Whole seconds keep timestamps comparable across backends
    let whole = base.timestamp() - base.timestamp() % 60;
    DateTime::from_timestamp(whole, 0).unwrap_or(base) + Duration::minutes(minute)
}

// ---------------------------------------------------------------------------
// Assertions
// ---------------------------------------------------------------------------

pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}

pub fn assert_numbers(invoices: &[Invoice], expected: &[&str]) {
    let numbers: Vec<&str> = invoices.iter().map(|i| i.invoice_number.as_str()).collect();
    assert_eq!(numbers, expected);
}

pub fn assert_status(invoice: &Invoice, expected: InvoiceStatus) {
    assert_eq!(
        invoice.status, expected,
        "Invoice {} has status {:?}, expected {:?}",
        invoice.invoice_number, invoice.status, expected
    );
}
