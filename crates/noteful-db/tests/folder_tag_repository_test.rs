//! Integration tests for the folder and tag repositories.
//!
//! Ignored by default; run with `cargo test -p noteful-db -- --ignored`.

use noteful_db::test_fixtures::{TestDatabase, SEED_FOLDER_COUNT, SEED_TAG_COUNT};
use noteful_db::{FolderRepository, NoteRepository, TagRepository};

async fn setup() -> TestDatabase {
    dotenvy::dotenv().ok();
    TestDatabase::new().await
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_folders_crud() {
    let test_db = setup().await;
    let folders = &test_db.db.folders;

    let all = folders.list().await.unwrap();
    assert_eq!(all.len(), SEED_FOLDER_COUNT);
    assert_eq!(all[0].id, 100);
    assert_eq!(all[0].name, "Archive");

    let created = folders.insert("Recipes").await.unwrap();
    assert_eq!(created.name, "Recipes");
    assert_eq!(folders.fetch(created.id).await.unwrap(), Some(created.clone()));

    let renamed = folders.update(created.id, "Cooking").await.unwrap().unwrap();
    assert_eq!(renamed.id, created.id);
    assert_eq!(renamed.name, "Cooking");

    assert!(folders.update(9999, "Nope").await.unwrap().is_none());
    assert!(folders.fetch(9999).await.unwrap().is_none());

    assert!(folders.delete(created.id).await.unwrap());
    assert!(!folders.delete(created.id).await.unwrap());

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_deleting_folder_detaches_notes() {
    let test_db = setup().await;

    assert!(test_db.db.folders.delete(100).await.unwrap());

    let note = test_db.db.notes.fetch(1000).await.unwrap().unwrap();
    assert_eq!(note.folder_id, None);
    assert_eq!(note.folder_name, None);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_folder_name_is_unique_violation() {
    let test_db = setup().await;

    let err = test_db
        .db
        .folders
        .insert("Archive")
        .await
        .expect_err("duplicate name");
    assert!(err.is_unique_violation());

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_tags_crud() {
    let test_db = setup().await;
    let tags = &test_db.db.tags;

    let all = tags.list().await.unwrap();
    assert_eq!(all.len(), SEED_TAG_COUNT);
    assert_eq!(all[0].name, "breed");

    let created = tags.insert("calico").await.unwrap();
    assert_eq!(tags.fetch(created.id).await.unwrap(), Some(created.clone()));

    let renamed = tags.update(created.id, "tabby").await.unwrap().unwrap();
    assert_eq!(renamed.name, "tabby");

    assert!(tags.delete(created.id).await.unwrap());
    assert!(tags.fetch(created.id).await.unwrap().is_none());

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_deleting_tag_removes_it_from_notes() {
    let test_db = setup().await;

    assert!(test_db.db.tags.delete(2).await.unwrap());

    let note = test_db.db.notes.fetch(1003).await.unwrap().unwrap();
    let ids: Vec<i32> = note.tags.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3]);

    test_db.cleanup().await;
}
