//! Macro-generated contract suite for `ClientRepository` implementations.
//!
//! # Generated Tests
//!
//! - `test_create_and_get`: create then retrieve, verify all fields
//! - `test_get_nonexistent`: random UUID returns None
//! - `test_update_existing`: changes are persisted
//! - `test_update_nonexistent`: update unknown ID returns Err
//! - `test_list_by_user_scopes_to_owner`: other users' clients never leak
//! - `test_list_by_user_newest_first`: ordering by creation time
//! - `test_list_by_user_empty`: user without clients gets an empty vec

/// Generate a `ClientRepository` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty repository. It is re-evaluated
/// for each test.
#[macro_export]
macro_rules! client_repository_tests {
    ($factory:expr) => {
        mod client_repository_contract_tests {
            use super::*;
            use billing::core::ClientRepository;
            use chrono::Duration;
            use tokio_test::{assert_err, assert_ok};
            use uuid::Uuid;

            #[tokio::test]
            async fn test_create_and_get() {
                let repo = $factory;
                let owner = Uuid::new_v4();
                let client = create_test_client(owner, "Acme");
                let id = client.id;

                assert_ok!(repo.create(client).await);

                let fetched = repo.get(&id).await.unwrap().expect("client should exist");
                assert_eq!(fetched.user_id, owner);
                assert_eq!(fetched.company_name, "Acme");
                assert_eq!(fetched.currency, "INR");
                assert_eq!(fetched.pan_number, "ABCDE1234F");
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let repo = $factory;
                assert!(repo.get(&Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_update_existing() {
                let repo = $factory;
                let mut client = repo
                    .create(create_test_client(Uuid::new_v4(), "Acme"))
                    .await
                    .unwrap();

                client.company_name = "Acme Industries".to_string();
                client.currency = "USD".to_string();
                assert_ok!(repo.update(&client.id, client.clone()).await);

                let fetched = repo.get(&client.id).await.unwrap().unwrap();
                assert_eq!(fetched.company_name, "Acme Industries");
                assert_eq!(fetched.currency, "USD");
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let repo = $factory;
                let client = create_test_client(Uuid::new_v4(), "Nowhere");

                assert_err!(repo.update(&client.id, client.clone()).await);
            }

            #[tokio::test]
            async fn test_list_by_user_scopes_to_owner() {
                let repo = $factory;
                let alice = Uuid::new_v4();
                let bob = Uuid::new_v4();

                repo.create(create_test_client(alice, "Acme")).await.unwrap();
                repo.create(create_test_client(alice, "Globex")).await.unwrap();
                repo.create(create_test_client(bob, "Initech")).await.unwrap();

                let alices = repo.list_by_user(&alice).await.unwrap();
                assert_count(&alices, 2);
                assert!(alices.iter().all(|c| c.user_id == alice));

                let bobs = repo.list_by_user(&bob).await.unwrap();
                assert_count(&bobs, 1);
                assert_eq!(bobs[0].company_name, "Initech");
            }

            #[tokio::test]
            async fn test_list_by_user_newest_first() {
                let repo = $factory;
                let owner = Uuid::new_v4();

                let mut older = create_test_client(owner, "Older");
                older.created_at = older.created_at - Duration::minutes(5);
                repo.create(older).await.unwrap();
                repo.create(create_test_client(owner, "Newer")).await.unwrap();

                let listed = repo.list_by_user(&owner).await.unwrap();
                let names: Vec<&str> = listed.iter().map(|c| c.company_name.as_str()).collect();
                assert_eq!(names, vec!["Newer", "Older"]);
            }

            #[tokio::test]
            async fn test_list_by_user_empty() {
                let repo = $factory;
                assert!(repo.list_by_user(&Uuid::new_v4()).await.unwrap().is_empty());
            }
        }
    };
}
