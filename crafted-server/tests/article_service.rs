mod common;

use std::sync::Arc;
use std::time::Duration;

use crafted_server::messaging::LogDispatcher;
use crafted_server::models::{ArticleUpdate, ValidationError};
use crafted_server::{ArticleService, ServiceError};

use common::{memory_service, BrokenDispatcher, MemoryStore, UnreachableStore};

#[tokio::test]
async fn create_assigns_fresh_ids() {
    let (service, _, _rx) = memory_service();

    let first = service.create_from("Hello", "World", 1).await.unwrap();
    let second = service.create_from("Again", "Words", 1).await.unwrap();

    assert_eq!(first.title, "Hello");
    assert_eq!(first.body, "World");
    assert_eq!(first.author.id, 1);
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn invalid_input_writes_nothing() {
    let (service, store, _rx) = memory_service();

    let err = service.create_from("", "World", 1).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::Empty { field: "title" })
    ));

    let err = service.create_from("Hello", "  ", 1).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::Empty { field: "body" })
    ));

    assert_eq!(store.row_count(), 0);
}

#[tokio::test]
async fn unknown_author_is_its_own_kind() {
    let (service, store, _rx) = memory_service();

    let err = service.create_from("Hello", "World", 77).await.unwrap_err();
    assert!(matches!(err, ServiceError::UnknownAuthor(77)));
    assert_eq!(store.row_count(), 0);
}

#[tokio::test]
async fn fetch_returns_stored_fields() {
    let (service, _, _rx) = memory_service();
    let created = service.create_from("Title", "Body", 1).await.unwrap();

    let fetched = service.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn missing_id_differs_from_store_failure() {
    let (service, _, _rx) = memory_service();
    let err = service.get(404).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { resource: "article", .. }));

    let offline = ArticleService::new(Arc::new(UnreachableStore), Arc::new(LogDispatcher));
    let err = offline.get(404).await.unwrap_err();
    assert!(matches!(err, ServiceError::Store(_)));
}

#[tokio::test]
async fn delete_then_fetch_is_not_found() {
    let (service, _, _rx) = memory_service();
    let created = service.create_from("Short", "Lived", 1).await.unwrap();

    assert_eq!(service.delete(created.id).await.unwrap(), 1);
    assert!(matches!(
        service.get(created.id).await,
        Err(ServiceError::NotFound { .. })
    ));
    assert_eq!(service.delete(created.id).await.unwrap(), 0);
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_all_counts_every_row() {
    let (service, _, _rx) = memory_service();
    let a = service.create_from("A", "a", 1).await.unwrap();
    service.create_from("B", "b", 1).await.unwrap();
    service.create_from("C", "c", 1).await.unwrap();
    service.delete(a.id).await.unwrap();

    // Unfiltered: the already-deleted row is stamped again and counted
    assert_eq!(service.delete_all().await.unwrap(), 3);
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_changes_only_title_and_body() {
    let (service, _, mut rx) = memory_service();
    let created = service.create_from("Old", "Text", 1).await.unwrap();

    let update = ArticleUpdate::new("New", "Words").unwrap();
    assert_eq!(service.update(created.id, update).await.unwrap(), 1);

    let fetched = service.get(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.author_id, created.author_id);
    assert_eq!(fetched.title, "New");
    assert_eq!(fetched.body, "Words");

    let message = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("notification not sent")
        .expect("channel closed");
    assert_eq!(message, ("updated_at".to_owned(), created.id.to_string()));
}

#[tokio::test]
async fn update_of_missing_id_affects_nothing() {
    let (service, _, _rx) = memory_service();
    let update = ArticleUpdate::new("New", "Words").unwrap();
    assert_eq!(service.update(9, update).await.unwrap(), 0);
}

#[tokio::test]
async fn dispatch_failure_does_not_change_result() {
    let store = Arc::new(MemoryStore::with_authors(&[1]));
    let service = ArticleService::new(store, Arc::new(BrokenDispatcher));
    let created = service.create_from("Old", "Text", 1).await.unwrap();

    let update = ArticleUpdate::new("New", "Text").unwrap();
    assert_eq!(service.update(created.id, update).await.unwrap(), 1);
}

#[tokio::test]
async fn list_is_ordered_by_id() {
    let (service, _, _rx) = memory_service();
    for title in ["one", "two", "three"] {
        service.create_from(title, "body", 1).await.unwrap();
    }

    let ids: Vec<i64> = service.list().await.unwrap().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}
