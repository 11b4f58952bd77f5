//! Note repository implementation.
//!
//! Reads go through [`NoteQueryBuilder`] and come back hydrated. Writes that
//! touch both `notes` and `notes_tags` run in one transaction together with
//! the re-select of the hydrated note.

use std::collections::HashSet;
use std::time::Instant;

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Transaction};
use tracing::{debug, info};

use noteful_core::{
    hydrate_note, hydrate_notes, CreateNoteRequest, Error, ListNotesRequest, NoteFull,
    NoteRepository, Result, UpdateNoteRequest,
};

use crate::note_query::NoteQueryBuilder;

/// PostgreSQL implementation of NoteRepository.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Drop repeated tag ids, keeping first-seen order.
    fn unique_tag_ids(tags: &[i32]) -> Vec<i32> {
        let mut seen = HashSet::new();
        tags.iter().copied().filter(|id| seen.insert(*id)).collect()
    }

    /// Link a note to each tag id. Unknown tag ids fail with a foreign key
    /// violation.
    async fn attach_tags(
        tx: &mut Transaction<'_, Postgres>,
        note_id: i32,
        tags: &[i32],
    ) -> Result<()> {
        let tag_ids = Self::unique_tag_ids(tags);
        if tag_ids.is_empty() {
            return Ok(());
        }

        sqlx::query("INSERT INTO notes_tags (note_id, tag_id) SELECT $1, UNNEST($2::int[])")
            .bind(note_id)
            .bind(tag_ids)
            .execute(&mut **tx)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }

    /// Re-select a note inside the transaction that just wrote it.
    async fn fetch_in_tx(tx: &mut Transaction<'_, Postgres>, id: i32) -> Result<NoteFull> {
        let rows = NoteQueryBuilder::new()
            .note_id(id)
            .fetch_rows(&mut **tx)
            .await?;
        hydrate_note(rows)
            .ok_or_else(|| Error::Internal(format!("Note {} vanished after write", id)))
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn list(&self, req: ListNotesRequest) -> Result<Vec<NoteFull>> {
        let start = Instant::now();
        let rows = NoteQueryBuilder::from_request(&req)
            .fetch_rows(&self.pool)
            .await?;
        let row_count = rows.len();
        let notes = hydrate_notes(rows);

        debug!(
            subsystem = "database",
            component = "notes",
            op = "list",
            search_term = req.search_term.as_deref().unwrap_or(""),
            folder_id = ?req.folder_id,
            tag_id = ?req.tag_id,
            row_count,
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed notes"
        );
        Ok(notes)
    }

    async fn fetch(&self, id: i32) -> Result<Option<NoteFull>> {
        let rows = NoteQueryBuilder::new()
            .note_id(id)
            .fetch_rows(&self.pool)
            .await?;
        Ok(hydrate_note(rows))
    }

    async fn insert(&self, req: CreateNoteRequest) -> Result<NoteFull> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO notes (title, content, folder_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&req.title)
        .bind(&req.content)
        .bind(req.folder_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::Database)?;

        Self::attach_tags(&mut tx, id, &req.tags).await?;
        let note = Self::fetch_in_tx(&mut tx, id).await?;

        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "database",
            component = "notes",
            op = "insert",
            note_id = id,
            tag_count = note.tags.len(),
            "Note created"
        );
        Ok(note)
    }

    async fn update(&self, id: i32, req: UpdateNoteRequest) -> Result<Option<NoteFull>> {
        let mut sets = vec!["title = $1".to_string()];
        let mut next_param = 2;
        if req.content.is_some() {
            sets.push(format!("content = ${}", next_param));
            next_param += 1;
        }
        if req.folder_id.is_some() {
            sets.push(format!("folder_id = ${}", next_param));
            next_param += 1;
        }
        let sql = format!(
            "UPDATE notes SET {} WHERE id = ${} RETURNING id",
            sets.join(", "),
            next_param
        );

        let mut q = sqlx::query_scalar::<_, i32>(&sql).bind(&req.title);
        if let Some(content) = &req.content {
            q = q.bind(content.clone());
        }
        if let Some(folder_id) = req.folder_id {
            q = q.bind(folder_id);
        }
        q = q.bind(id);

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let updated = q.fetch_optional(&mut *tx).await.map_err(Error::Database)?;
        if updated.is_none() {
            tx.rollback().await.map_err(Error::Database)?;
            return Ok(None);
        }

        sqlx::query("DELETE FROM notes_tags WHERE note_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        Self::attach_tags(&mut tx, id, &req.tags).await?;
        let note = Self::fetch_in_tx(&mut tx, id).await?;

        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "database",
            component = "notes",
            op = "update",
            note_id = id,
            tag_count = note.tags.len(),
            "Note updated"
        );
        Ok(Some(note))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        // notes_tags rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_tag_ids_keeps_first_seen_order() {
        assert_eq!(
            PgNoteRepository::unique_tag_ids(&[3, 1, 3, 2, 1]),
            vec![3, 1, 2]
        );
    }

    #[test]
    fn test_unique_tag_ids_empty() {
        assert!(PgNoteRepository::unique_tag_ids(&[]).is_empty());
    }
}
