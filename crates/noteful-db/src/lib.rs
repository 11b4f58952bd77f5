//! # noteful-db
//!
//! PostgreSQL database layer for noteful.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for folders, tags and notes
//! - The flat notes join query that feeds note hydration
//!
//! ## Example
//!
//! ```rust,ignore
//! use noteful_db::{CreateNoteRequest, Database, NoteRepository, PoolConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db =
//!         Database::connect_with_config("postgres://localhost/noteful-app", PoolConfig::default())
//!             .await?;
//!
//!     let note = db.notes.insert(CreateNoteRequest {
//!         title: "Hello".to_string(),
//!         content: Some("world".to_string()),
//!         folder_id: None,
//!         tags: vec![],
//!     }).await?;
//!
//!     println!("Created note: {}", note.id);
//!     Ok(())
//! }
//! ```
pub mod folders;
pub mod note_query;
pub mod notes;
pub mod pool;
pub mod tags;

// Test fixtures for integration tests
// Always compiled so integration tests (in tests/) can use them
pub mod test_fixtures;

// Re-export core types
pub use noteful_core::*;

/// Escape LIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

// Re-export repository implementations
pub use folders::PgFolderRepository;
pub use note_query::{NoteQueryBuilder, QueryParam};
pub use notes::PgNoteRepository;
pub use pool::{create_lazy_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use tags::PgTagRepository;

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Folder repository.
    pub folders: PgFolderRepository,
    /// Tag repository.
    pub tags: PgTagRepository,
    /// Note repository, returns hydrated notes.
    pub notes: PgNoteRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            folders: PgFolderRepository::new(pool.clone()),
            tags: PgTagRepository::new(pool.clone()),
            notes: PgNoteRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Create without opening a connection until the first query.
    pub fn connect_lazy(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_lazy_pool(url, config)?;
        Ok(Self::new(pool))
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }

    /// Round-trip a trivial query to check the database is reachable.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}
