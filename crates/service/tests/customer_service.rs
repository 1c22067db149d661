//! Behavior tests for the customer service.
//!
//! Run against the in-memory store and blob backends, so no database or
//! network is required. Database-backed contract tests live in the
//! `clientele-integration-tests` crate.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use async_trait::async_trait;

use clientele_core::{CustomerId, Email, Gender};
use clientele_service::blob::{BlobError, BlobStore, MemoryBlobStore};
use clientele_service::db::{CustomerStore, MemoryStore};
use clientele_service::models::{RegistrationRequest, UpdateRequest};
use clientele_service::services::{CredentialHasher, CustomerError, CustomerService, HashError};

/// Deterministic hasher so tests can assert the plaintext is never
/// stored without paying for Argon2.
struct TestHasher;

impl CredentialHasher for TestHasher {
    fn encode(&self, plaintext: &str) -> Result<String, HashError> {
        Ok(format!("hashed:{plaintext}"))
    }
}

/// Blob store whose writes always fail.
struct FailingBlobStore;

#[async_trait]
impl BlobStore for FailingBlobStore {
    async fn put(&self, _bucket: &str, _key: &str, _bytes: Vec<u8>) -> Result<(), BlobError> {
        Err(BlobError::Put("stream closed".to_owned()))
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, BlobError> {
        Err(BlobError::Get(format!("object not found: {bucket}/{key}")))
    }
}

fn service() -> CustomerService {
    CustomerService::new(
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryBlobStore::new()),
        Arc::new(TestHasher),
        "customer",
    )
}

fn service_with_failing_blob() -> CustomerService {
    CustomerService::new(
        Arc::new(MemoryStore::new()),
        Arc::new(FailingBlobStore),
        Arc::new(TestHasher),
        "customer",
    )
}

fn registration(name: &str, email: &str, age: i32) -> RegistrationRequest {
    RegistrationRequest {
        name: name.to_owned(),
        email: email.to_owned(),
        password: "password123".to_owned(),
        age,
        gender: Gender::Male,
    }
}

#[tokio::test]
async fn register_then_get_roundtrip() {
    let service = service();
    let created = service
        .add_customer(registration("Alex", "alex@example.com", 21))
        .await
        .unwrap();

    let view = service.get_customer(created.id).await.unwrap();
    assert_eq!(view.name, "Alex");
    assert_eq!(view.email.as_str(), "alex@example.com");
    assert_eq!(view.age, 21);
    assert_eq!(view.gender, Gender::Male);
    assert_eq!(view.profile_image_id, None);
}

#[tokio::test]
async fn view_never_exposes_credentials() {
    let service = service();
    let created = service
        .add_customer(registration("Alex", "alex@example.com", 21))
        .await
        .unwrap();

    let view = service.get_customer(created.id).await.unwrap();
    let json = serde_json::to_value(&view).unwrap();
    let object = json.as_object().unwrap();
    assert!(!object.contains_key("password"));
    assert!(!object.contains_key("password_hash"));
}

#[tokio::test]
async fn duplicate_registration_is_rejected_without_insert() {
    let service = service();
    service
        .add_customer(registration("Alex", "alex@example.com", 21))
        .await
        .unwrap();

    let result = service
        .add_customer(registration("Impostor", "alex@example.com", 30))
        .await;
    assert!(matches!(
        result,
        Err(CustomerError::DuplicateEmail { email }) if email == "alex@example.com"
    ));

    let all = service.get_all_customers().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Alex");
}

#[tokio::test]
async fn operations_on_missing_id_are_not_found() {
    let service = service();
    let missing = CustomerId::new(42);

    assert!(matches!(
        service.get_customer(missing).await,
        Err(CustomerError::NotFound { id }) if id == missing
    ));
    assert!(matches!(
        service.delete_customer(missing).await,
        Err(CustomerError::NotFound { .. })
    ));
    assert!(matches!(
        service.upload_profile_image(missing, b"img".to_vec()).await,
        Err(CustomerError::NotFound { .. })
    ));
    assert!(matches!(
        service.get_profile_image(missing).await,
        Err(CustomerError::NotFound { .. })
    ));

    assert!(service.get_all_customers().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_diffs_against_current_and_rejects_noop() {
    let service = service();
    let created = service
        .add_customer(registration("A", "a@x.com", 20))
        .await
        .unwrap();

    let age_only = UpdateRequest {
        age: Some(21),
        ..UpdateRequest::default()
    };
    let updated = service
        .update_customer(created.id, age_only.clone())
        .await
        .unwrap();
    assert_eq!(updated.age, 21);
    assert_eq!(updated.name, "A");
    assert_eq!(updated.email.as_str(), "a@x.com");

    // Same request again: nothing changes, must be rejected.
    let result = service.update_customer(created.id, age_only).await;
    assert!(matches!(result, Err(CustomerError::Validation(_))));
}

#[tokio::test]
async fn update_with_own_email_present_is_not_a_duplicate() {
    // The customer's own (unchanged) email is in the store; sending it
    // back must not trip the uniqueness check.
    let service = service();
    let created = service
        .add_customer(registration("A", "a@x.com", 20))
        .await
        .unwrap();

    let request = UpdateRequest {
        email: Some("a@x.com".to_owned()),
        age: Some(21),
        ..UpdateRequest::default()
    };
    let updated = service.update_customer(created.id, request).await.unwrap();
    assert_eq!(updated.age, 21);
}

#[tokio::test]
async fn update_to_colliding_email_is_rejected_unchanged() {
    let service = service();
    let first = service
        .add_customer(registration("A", "a@x.com", 20))
        .await
        .unwrap();
    service
        .add_customer(registration("B", "b@x.com", 25))
        .await
        .unwrap();

    let request = UpdateRequest {
        email: Some("b@x.com".to_owned()),
        ..UpdateRequest::default()
    };
    let result = service.update_customer(first.id, request).await;
    assert!(matches!(
        result,
        Err(CustomerError::DuplicateEmail { email }) if email == "b@x.com"
    ));

    let unchanged = service.get_customer(first.id).await.unwrap();
    assert_eq!(unchanged.email.as_str(), "a@x.com");
}

#[tokio::test]
async fn update_missing_customer_is_not_found() {
    let service = service();
    let request = UpdateRequest {
        name: Some("New".to_owned()),
        ..UpdateRequest::default()
    };
    assert!(matches!(
        service.update_customer(CustomerId::new(9), request).await,
        Err(CustomerError::NotFound { .. })
    ));
}

#[tokio::test]
async fn delete_removes_the_record() {
    let service = service();
    let created = service
        .add_customer(registration("A", "a@x.com", 20))
        .await
        .unwrap();

    service.delete_customer(created.id).await.unwrap();
    assert!(matches!(
        service.get_customer(created.id).await,
        Err(CustomerError::NotFound { .. })
    ));
}

#[tokio::test]
async fn upload_then_download_roundtrip() {
    let service = service();
    let created = service
        .add_customer(registration("A", "a@x.com", 20))
        .await
        .unwrap();

    let bytes = b"Hello World!".to_vec();
    service
        .upload_profile_image(created.id, bytes.clone())
        .await
        .unwrap();

    let downloaded = service.get_profile_image(created.id).await.unwrap();
    assert_eq!(downloaded, bytes);

    let view = service.get_customer(created.id).await.unwrap();
    assert!(view.profile_image_id.is_some());
}

#[tokio::test]
async fn download_before_upload_is_not_found() {
    let service = service();
    let created = service
        .add_customer(registration("A", "a@x.com", 20))
        .await
        .unwrap();

    assert!(matches!(
        service.get_profile_image(created.id).await,
        Err(CustomerError::ImageNotSet { .. })
    ));
}

#[tokio::test]
async fn failed_upload_leaves_image_pointer_untouched() {
    let service = service_with_failing_blob();
    let created = service
        .add_customer(registration("A", "a@x.com", 20))
        .await
        .unwrap();

    let result = service.upload_profile_image(created.id, b"img".to_vec()).await;
    assert!(matches!(result, Err(CustomerError::Upload(_))));

    let view = service.get_customer(created.id).await.unwrap();
    assert_eq!(view.profile_image_id, None);
}

#[tokio::test]
async fn listing_is_bounded_to_page_size() {
    let service = service();
    for i in 0..120 {
        service
            .add_customer(registration("Bulk", &format!("bulk{i}@example.com"), 30))
            .await
            .unwrap();
    }

    let all = service.get_all_customers().await.unwrap();
    assert_eq!(all.len(), 100);
}

#[tokio::test]
async fn registration_rejects_invalid_fields() {
    let service = service();

    assert!(matches!(
        service.add_customer(registration("A", "not-an-email", 20)).await,
        Err(CustomerError::InvalidEmail(_))
    ));
    assert!(matches!(
        service.add_customer(registration("", "a@x.com", 20)).await,
        Err(CustomerError::Validation(_))
    ));
    assert!(matches!(
        service.add_customer(registration("A", "a@x.com", 0)).await,
        Err(CustomerError::Validation(_))
    ));
}

#[tokio::test]
async fn password_is_hashed_before_storage() {
    let store = Arc::new(MemoryStore::new());
    let service = CustomerService::new(
        store.clone(),
        Arc::new(MemoryBlobStore::new()),
        Arc::new(TestHasher),
        "customer",
    );

    service
        .add_customer(registration("A", "a@x.com", 20))
        .await
        .unwrap();

    let stored = store
        .get_by_email(&Email::parse("a@x.com").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.password_hash, "hashed:password123");
}
