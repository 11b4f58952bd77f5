//! Tag repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::info;

use noteful_core::{Error, Result, Tag, TagRepository};

/// PostgreSQL implementation of TagRepository.
#[derive(Clone)]
pub struct PgTagRepository {
    pool: Pool<Postgres>,
}

impl PgTagRepository {
    /// Create a new PgTagRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn list(&self) -> Result<Vec<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn fetch(&self, id: i32) -> Result<Option<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn insert(&self, name: &str) -> Result<Tag> {
        let tag =
            sqlx::query_as::<_, Tag>("INSERT INTO tags (name) VALUES ($1) RETURNING id, name")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Database)?;

        info!(
            subsystem = "database",
            component = "tags",
            op = "insert",
            tag_id = tag.id,
            "Tag created"
        );
        Ok(tag)
    }

    async fn update(&self, id: i32, name: &str) -> Result<Option<Tag>> {
        sqlx::query_as::<_, Tag>("UPDATE tags SET name = $1 WHERE id = $2 RETURNING id, name")
            .bind(name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        // notes_tags rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
