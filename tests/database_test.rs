// ABOUTME: Integration tests for the SQLite layer: file databases, migrations, and catalog seeding
// ABOUTME: Uses temporary directories so each test gets an isolated database file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFam

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use fitfam_server::config::DatabaseUrl;
use fitfam_server::database::Database;
use fitfam_server::models::User;
use tempfile::TempDir;

fn sample_user(handle: &str) -> User {
    User::new(
        format!("{handle}@example.com"),
        handle.to_owned(),
        format!("{handle} Tester"),
        70.0,
        180.0,
        "not-a-real-hash".to_owned(),
    )
}

#[tokio::test]
async fn test_file_database_survives_reopen() {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();
    let url = DatabaseUrl::SQLite {
        path: dir.path().join("nested").join("fitfam.db"),
    };

    let user = sample_user("ana");
    {
        let database = Database::new(&url).await.unwrap();
        database.create_user(&user).await.unwrap();
        database.ping().await.unwrap();
    }

    // Reopening runs migrations again without touching existing rows
    let database = Database::new(&url).await.unwrap();
    let loaded = database
        .get_user_by_email("ana@example.com")
        .await
        .unwrap()
        .expect("user missing after reopen");
    assert_eq!(loaded.id, user.id);
    assert_eq!(loaded.password_hash, "not-a-real-hash");
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let database = common::create_test_database().await;
    database.create_user(&sample_user("ana")).await.unwrap();

    let mut clash = sample_user("other");
    clash.username = "ana".to_owned();
    let err = database.create_user(&clash).await.unwrap_err();
    assert_eq!(err.http_status(), 409);
}

#[tokio::test]
async fn test_catalog_seed_is_idempotent() {
    let database = common::create_test_database().await;
    let catalog = database.catalog();

    let seeded = catalog.count().await.unwrap();
    assert!(seeded > 0);
    assert_eq!(catalog.seed_if_empty().await.unwrap(), 0);

    let replaced = catalog.replace_with_defaults().await.unwrap();
    assert_eq!(i64::try_from(replaced).unwrap(), seeded);
    assert_eq!(catalog.count().await.unwrap(), seeded);
}

#[tokio::test]
async fn test_in_memory_databases_are_isolated() {
    let first = common::create_test_database().await;
    let second = common::create_test_database().await;

    first.create_user(&sample_user("ana")).await.unwrap();
    assert!(second
        .get_user_by_email("ana@example.com")
        .await
        .unwrap()
        .is_none());
}
