//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::info;

use noteful_core::{Error, Folder, FolderRepository, Result};

/// PostgreSQL implementation of FolderRepository.
#[derive(Clone)]
pub struct PgFolderRepository {
    pool: Pool<Postgres>,
}

impl PgFolderRepository {
    /// Create a new PgFolderRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderRepository for PgFolderRepository {
    async fn list(&self) -> Result<Vec<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT id, name FROM folders ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn fetch(&self, id: i32) -> Result<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT id, name FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn insert(&self, name: &str) -> Result<Folder> {
        let folder =
            sqlx::query_as::<_, Folder>("INSERT INTO folders (name) VALUES ($1) RETURNING id, name")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Database)?;

        info!(
            subsystem = "database",
            component = "folders",
            op = "insert",
            folder_id = folder.id,
            "Folder created"
        );
        Ok(folder)
    }

    async fn update(&self, id: i32, name: &str) -> Result<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        // notes.folder_id is ON DELETE SET NULL
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
