//! Test fixtures for database integration tests.
//!
//! Each [`TestDatabase`] gets its own Postgres schema loaded with
//! `db/noteful.sql`, so tests can run in parallel against one server.
//!
//! ## Configuration
//!
//! The test database URL is read from the `DATABASE_URL` environment variable.
//! If not set, defaults to [`DEFAULT_TEST_DATABASE_URL`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use noteful_db::test_fixtures::TestDatabase;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let test_db = TestDatabase::new().await;
//!     let notes = test_db.db.notes.list(Default::default()).await.unwrap();
//!     assert_eq!(notes.len(), 10);
//!     test_db.cleanup().await;
//! }
//! ```

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Executor;
use uuid::Uuid;

use crate::Database;

/// Default test database URL when DATABASE_URL is not set.
pub const DEFAULT_TEST_DATABASE_URL: &str = "postgres://localhost/noteful-test";

/// Schema and seed data shared with operators.
pub const SEED_SQL: &str = include_str!("../../../db/noteful.sql");

/// Seeded note ids run 1000..=1009.
pub const SEED_NOTE_COUNT: usize = 10;

/// Seeded folder ids run 100..=103.
pub const SEED_FOLDER_COUNT: usize = 4;

/// Seeded tag ids run 1..=4.
pub const SEED_TAG_COUNT: usize = 4;

/// Resolve the test database URL.
pub fn test_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_TEST_DATABASE_URL.to_string())
}

/// A seeded, schema-isolated database for one test.
pub struct TestDatabase {
    pub pool: PgPool,
    pub db: Database,
    admin_pool: PgPool,
    schema_name: String,
    cleanup_on_drop: bool,
}

impl TestDatabase {
    /// Create a freshly seeded test database.
    pub async fn new() -> Self {
        let database_url = test_database_url();

        let admin_pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        let schema_name = format!("test_{}", Uuid::new_v4().simple());
        sqlx::query(&format!("CREATE SCHEMA {}", schema_name))
            .execute(&admin_pool)
            .await
            .expect("Failed to create test schema");

        // Every pooled connection must see the test schema, not just the first
        let search_path = format!("SET search_path TO {}", schema_name);
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .after_connect(move |conn, _meta| {
                let search_path = search_path.clone();
                Box::pin(async move {
                    conn.execute(search_path.as_str()).await?;
                    Ok(())
                })
            })
            .connect(&database_url)
            .await
            .expect("Failed to create test database pool");

        sqlx::raw_sql(SEED_SQL)
            .execute(&pool)
            .await
            .expect("Failed to load seed data");

        Self {
            db: Database::new(pool.clone()),
            pool,
            admin_pool,
            schema_name,
            cleanup_on_drop: true,
        }
    }

    /// Drop the test schema now.
    pub async fn cleanup(mut self) {
        if self.cleanup_on_drop {
            self.pool.close().await;
            let _ = sqlx::query(&format!(
                "DROP SCHEMA IF EXISTS {} CASCADE",
                self.schema_name
            ))
            .execute(&self.admin_pool)
            .await;
            self.cleanup_on_drop = false;
        }
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        if self.cleanup_on_drop {
            let pool = self.admin_pool.clone();
            let schema = self.schema_name.clone();
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                handle.spawn(async move {
                    let _ = sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", schema))
                        .execute(&pool)
                        .await;
                });
            }
        }
    }
}
