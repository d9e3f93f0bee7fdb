//! Macro-generated contract suite for `InvoiceRepository` implementations.
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_and_get`: create then retrieve, amounts and items intact
//! - `test_get_nonexistent`: random UUID returns None
//! - `test_count_by_client`: counts only the given client's invoices
//!
//! ## Listing
//! - `test_find_by_client_newest_first`: ordering and scoping
//! - `test_find_by_client_pages`: page slicing and total
//! - `test_find_by_client_past_last_page`: empty items, total preserved
//! - `test_find_by_client_huge_page`: page number near `u64::MAX` is just empty
//! - `test_find_by_client_orders_within_a_second`: sub-second creation times
//! - `test_find_by_client_filters_status`: paid / unpaid / all
//!
//! ## Payment
//! - `test_mark_paid_transitions_once`: second call is a no-op returning None
//! - `test_mark_paid_nonexistent`: unknown ID returns None
//! - `test_concurrent_mark_paid`: exactly one of many racing calls wins

/// Generate an `InvoiceRepository` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty repository. It is re-evaluated
/// for each test; the concurrent test wraps it in an `Arc`, so it must be
/// `'static`.
#[macro_export]
macro_rules! invoice_repository_tests {
    ($factory:expr) => {
        mod invoice_repository_contract_tests {
            use super::*;
            use billing::core::{InvoiceRepository, PageRequest};
            use billing::entities::{InvoiceFilter, InvoiceStatus};
            use chrono::{DateTime, Utc};
            use rust_decimal::Decimal;
            use std::sync::Arc;
            use tokio_test::assert_ok;
            use uuid::Uuid;

            fn client() -> billing::entities::Client {
                create_test_client(Uuid::new_v4(), "Acme")
            }

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let repo = $factory;
                let client = client();
                let mut invoice = create_test_invoice(&client, 7);
                invoice.items.push(line_item("Hosting", 1, "499.99"));
                invoice.amount = billing::entities::Invoice::amount_of(&invoice.items).unwrap();
                let id = invoice.id;

                assert_ok!(repo.create(invoice).await);

                let fetched = repo.get(&id).await.unwrap().expect("invoice should exist");
                assert_eq!(fetched.invoice_number, "INV-0007");
                assert_eq!(fetched.client_id, client.id);
                assert_eq!(fetched.user_id, client.user_id);
                assert_count(&fetched.items, 2);
                assert_eq!(fetched.amount, "3499.99".parse::<Decimal>().unwrap());
                assert_status(&fetched, InvoiceStatus::Unpaid);
                assert!(fetched.paid_at.is_none());
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let repo = $factory;
                assert!(repo.get(&Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_count_by_client() {
                let repo = $factory;
                let acme = client();
                let globex = client();

                for invoice in invoice_batch(&acme, 3) {
                    repo.create(invoice).await.unwrap();
                }
                repo.create(create_test_invoice(&globex, 1)).await.unwrap();

                assert_eq!(repo.count_by_client(&acme.id).await.unwrap(), 3);
                assert_eq!(repo.count_by_client(&globex.id).await.unwrap(), 1);
                assert_eq!(repo.count_by_client(&Uuid::new_v4()).await.unwrap(), 0);
            }

            // ==================================================================
            // Listing
            // ==================================================================

            #[tokio::test]
            async fn test_find_by_client_newest_first() {
                let repo = $factory;
                let acme = client();
                let other = client();

                for invoice in invoice_batch(&acme, 3) {
                    repo.create(invoice).await.unwrap();
                }
                repo.create(create_test_invoice(&other, 1)).await.unwrap();

                let page = repo
                    .find_by_client(&acme.id, InvoiceFilter::All, &PageRequest::new(None, 10))
                    .await
                    .unwrap();
                assert_eq!(page.total, 3);
                assert_numbers(&page.items, &["INV-0003", "INV-0002", "INV-0001"]);
            }

            #[tokio::test]
            async fn test_find_by_client_pages() {
                let repo = $factory;
                let acme = client();
                for invoice in invoice_batch(&acme, 5) {
                    repo.create(invoice).await.unwrap();
                }

                let first = repo
                    .find_by_client(&acme.id, InvoiceFilter::All, &PageRequest::new(Some(1), 2))
                    .await
                    .unwrap();
                assert_numbers(&first.items, &["INV-0005", "INV-0004"]);
                assert_eq!(first.total, 5);
                assert_eq!(first.total_pages(), 3);

                let last = repo
                    .find_by_client(&acme.id, InvoiceFilter::All, &PageRequest::new(Some(3), 2))
                    .await
                    .unwrap();
                assert_numbers(&last.items, &["INV-0001"]);
            }

            #[tokio::test]
            async fn test_find_by_client_past_last_page() {
                let repo = $factory;
                let acme = client();
                for invoice in invoice_batch(&acme, 2) {
                    repo.create(invoice).await.unwrap();
                }

                let beyond = repo
                    .find_by_client(&acme.id, InvoiceFilter::All, &PageRequest::new(Some(4), 2))
                    .await
                    .unwrap();
                assert!(beyond.items.is_empty());
                assert_eq!(beyond.total, 2);
                assert_eq!(beyond.total_pages(), 1);
            }

            #[tokio::test]
            async fn test_find_by_client_orders_within_a_second() {
                let repo = $factory;
                let acme = client();
                let second = DateTime::from_timestamp(Utc::now().timestamp() - 60, 0).unwrap();
                let offsets_ms = [500, 0, 120, 999];

                for (sequence, ms) in offsets_ms.iter().enumerate() {
                    let mut invoice = create_test_invoice(&acme, sequence as u64 + 1);
                    invoice.created_at = second + chrono::Duration::milliseconds(*ms);
                    invoice.updated_at = invoice.created_at;
                    repo.create(invoice).await.unwrap();
                }

                let page = repo
                    .find_by_client(&acme.id, InvoiceFilter::All, &PageRequest::new(None, 10))
                    .await
                    .unwrap();
                // newest first: 999ms, 500ms, 120ms, whole second
                assert_numbers(&page.items, &["INV-0004", "INV-0001", "INV-0003", "INV-0002"]);
            }

            #[tokio::test]
            async fn test_find_by_client_huge_page() {
                let repo = $factory;
                let acme = client();
                for invoice in invoice_batch(&acme, 3) {
                    repo.create(invoice).await.unwrap();
                }

                for current_page in [u64::MAX, u64::MAX / 2, i64::MAX as u64] {
                    let page = PageRequest::new(Some(current_page), 2);
                    let beyond =
                        assert_ok!(repo.find_by_client(&acme.id, InvoiceFilter::All, &page).await);
                    assert!(beyond.items.is_empty());
                    assert_eq!(beyond.total, 3);
                    assert_eq!(beyond.total_pages(), 2);
                }
            }

            #[tokio::test]
            async fn test_find_by_client_filters_status() {
                let repo = $factory;
                let acme = client();
                let batch = invoice_batch(&acme, 4);
                let paid_id = batch[1].id;
                for invoice in batch {
                    repo.create(invoice).await.unwrap();
                }
                repo.mark_paid(&paid_id, Utc::now()).await.unwrap();

                let request = PageRequest::new(None, 10);

                let paid = repo
                    .find_by_client(&acme.id, InvoiceFilter::Paid, &request)
                    .await
                    .unwrap();
                assert_eq!(paid.total, 1);
                assert_numbers(&paid.items, &["INV-0002"]);

                let unpaid = repo
                    .find_by_client(&acme.id, InvoiceFilter::Unpaid, &request)
                    .await
                    .unwrap();
                assert_eq!(unpaid.total, 3);
                assert!(
                    unpaid
                        .items
                        .iter()
                        .all(|i| i.status == InvoiceStatus::Unpaid)
                );

                let all = repo
                    .find_by_client(&acme.id, InvoiceFilter::All, &request)
                    .await
                    .unwrap();
                assert_eq!(all.total, 4);
            }

            // ==================================================================
            // Payment
            // ==================================================================

            #[tokio::test]
            async fn test_mark_paid_transitions_once() {
                let repo = $factory;
                let invoice = repo
                    .create(create_test_invoice(&client(), 1))
                    .await
                    .unwrap();

                let paid = repo
                    .mark_paid(&invoice.id, Utc::now())
                    .await
                    .unwrap()
                    .expect("first payment should apply");
                assert_status(&paid, InvoiceStatus::Paid);
                assert!(paid.paid_at.is_some());

                let again = repo.mark_paid(&invoice.id, Utc::now()).await.unwrap();
                assert!(again.is_none(), "second payment must not apply");

                let stored = repo.get(&invoice.id).await.unwrap().unwrap();
                assert_status(&stored, InvoiceStatus::Paid);
                assert_eq!(stored.paid_at, paid.paid_at);
            }

            #[tokio::test]
            async fn test_mark_paid_nonexistent() {
                let repo = $factory;
                let outcome = repo.mark_paid(&Uuid::new_v4(), Utc::now()).await.unwrap();
                assert!(outcome.is_none());
            }

            #[tokio::test]
            async fn test_concurrent_mark_paid() {
                let repo = Arc::new($factory);
                let invoice = repo
                    .create(create_test_invoice(&client(), 1))
                    .await
                    .unwrap();

                let handles: Vec<_> = (0..8)
                    .map(|_| {
                        let repo = repo.clone();
                        let id = invoice.id;
                        tokio::spawn(async move { repo.mark_paid(&id, Utc::now()).await })
                    })
                    .collect();

                let mut applied = 0;
                for handle in handles {
                    let outcome = tokio::time::timeout(std::time::Duration::from_secs(30), handle)
                        .await
                        .expect("Concurrent payments timed out after 30s, possible deadlock")
                        .unwrap()
                        .unwrap();
                    if outcome.is_some() {
                        applied += 1;
                    }
                }

                assert_eq!(applied, 1, "exactly one payment should apply");
            }
        }
    };
}
