//! Macro-generated contract suite for `UserRepository` implementations.
//!
//! # Generated Tests
//!
//! - `test_create_and_get`: create then retrieve, verify all fields
//! - `test_get_nonexistent`: random UUID returns None
//! - `test_find_by_email`: lookup by the normalized address
//! - `test_find_by_unknown_email`: unknown address returns None
//! - `test_update_existing`: profile changes are persisted
//! - `test_update_nonexistent`: update unknown ID returns Err

/// Generate a `UserRepository` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty repository. It is re-evaluated
/// for each test.
#[macro_export]
macro_rules! user_repository_tests {
    ($factory:expr) => {
        mod user_repository_contract_tests {
            use super::*;
            use billing::core::UserRepository;
            use tokio_test::{assert_err, assert_ok};
            use uuid::Uuid;

            #[tokio::test]
            async fn test_create_and_get() {
                let repo = $factory;
                let user = create_test_user("Asha Rao", "asha@example.com");
                let id = user.id;

                let created = assert_ok!(repo.create(user).await);
                assert_eq!(created.id, id);

                let fetched = repo.get(&id).await.unwrap().expect("user should exist");
                assert_eq!(fetched.name, "Asha Rao");
                assert_eq!(fetched.email, "asha@example.com");
                assert_eq!(fetched.password_hash, "$2b$04$not-a-real-hash");
                assert_eq!(fetched.phone, None);
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let repo = $factory;
                assert!(repo.get(&Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_find_by_email() {
                let repo = $factory;
                repo.create(create_test_user("One", "one@example.com"))
                    .await
                    .unwrap();
                let two = repo
                    .create(create_test_user("Two", "Two@Example.com"))
                    .await
                    .unwrap();

                let found = repo
                    .find_by_email("two@example.com")
                    .await
                    .unwrap()
                    .expect("user should be found by normalized email");
                assert_eq!(found.id, two.id);
            }

            #[tokio::test]
            async fn test_find_by_unknown_email() {
                let repo = $factory;
                repo.create(create_test_user("One", "one@example.com"))
                    .await
                    .unwrap();

                assert!(
                    repo.find_by_email("nobody@example.com")
                        .await
                        .unwrap()
                        .is_none()
                );
            }

            #[tokio::test]
            async fn test_update_existing() {
                let repo = $factory;
                let mut user = repo
                    .create(create_test_user("Asha", "asha@example.com"))
                    .await
                    .unwrap();

                user.company_name = Some("Rao Studio".to_string());
                user.phone = Some("+91 90000 00000".to_string());
                let updated = assert_ok!(repo.update(&user.id, user.clone()).await);
                assert_eq!(updated.company_name.as_deref(), Some("Rao Studio"));

                let fetched = repo.get(&user.id).await.unwrap().unwrap();
                assert_eq!(fetched.company_name.as_deref(), Some("Rao Studio"));
                assert_eq!(fetched.phone.as_deref(), Some("+91 90000 00000"));
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let repo = $factory;
                let user = create_test_user("Ghost", "ghost@example.com");

                assert_err!(repo.update(&user.id, user.clone()).await);
            }
        }
    };
}
