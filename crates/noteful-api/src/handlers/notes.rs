//! Note HTTP handlers.
//!
//! Every note in a response is hydrated: it carries `folderId`,
//! `folderName` and a `tags` array of `{id, name}`.

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use noteful_core::{
    deserialize_present, CreateNoteRequest, NoteFull, NoteRepository, UpdateNoteRequest,
};

use super::{check_text, location, require};
use crate::query_types::ListNotesQuery;
use crate::{ApiError, AppState};

/// Request body for creating or updating a note.
///
/// `folder_id` is accepted as an alias of `folderId`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub content: Option<Option<String>>,
    #[serde(default, alias = "folder_id", deserialize_with = "deserialize_present")]
    pub folder_id: Option<Option<i32>>,
    /// Tag ids. Absent or null means no tags.
    #[serde(default)]
    pub tags: Option<Vec<i32>>,
}

impl NoteBody {
    fn check_content(&self) -> Result<(), ApiError> {
        match &self.content {
            Some(Some(content)) => check_text(content, "content"),
            _ => Ok(()),
        }
    }

    fn into_create(self) -> Result<CreateNoteRequest, ApiError> {
        self.check_content()?;
        Ok(CreateNoteRequest {
            title: require(self.title, "title")?,
            content: self.content.flatten(),
            folder_id: self.folder_id.flatten(),
            tags: self.tags.unwrap_or_default(),
        })
    }

    fn into_update(self) -> Result<UpdateNoteRequest, ApiError> {
        self.check_content()?;
        Ok(UpdateNoteRequest {
            title: require(self.title, "title")?,
            content: self.content,
            folder_id: self.folder_id,
            tags: self.tags.unwrap_or_default(),
        })
    }
}

/// List notes, optionally filtered.
///
/// # Query Parameters
/// - `searchTerm`: substring of the title
/// - `folderId`: folder id
/// - `tagId`: tag id
///
/// # Returns
/// - 200 OK with an array of notes ordered by id (possibly empty)
/// - 400 Bad Request if `folderId` or `tagId` is not an integer, or
///   `searchTerm` contains a NUL character
pub async fn list_notes(
    State(state): State<AppState>,
    Query(query): Query<ListNotesQuery>,
) -> Result<Json<Vec<NoteFull>>, ApiError> {
    if let Some(term) = &query.search_term {
        check_text(term, "searchTerm")?;
    }
    let notes = state.db.notes.list(query.into()).await?;
    Ok(Json(notes))
}

/// Get a single note.
///
/// # Returns
/// - 200 OK with the note
/// - 404 Not Found if no note has this id
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<NoteFull>, ApiError> {
    let note = state
        .db
        .notes
        .fetch(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Note {} not found", id)))?;
    Ok(Json(note))
}

/// Create a note.
///
/// # Returns
/// - 201 Created with a `Location` header and the hydrated note
/// - 400 Bad Request if `title` is missing or a folder/tag id does not exist
pub async fn create_note(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(body): Json<NoteBody>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.into_create()?;
    let note = state.db.notes.insert(req).await?;

    info!(
        subsystem = "api",
        component = "notes",
        op = "create",
        note_id = note.id,
        "Note created"
    );
    Ok((StatusCode::CREATED, location(&uri, note.id), Json(note)))
}

/// Update a note and replace its tags.
///
/// Only `title`, `content` and `folderId` are written; fields left out of
/// the body keep their current values. `tags` replaces the whole tag set.
///
/// # Returns
/// - 200 OK with the hydrated note
/// - 400 Bad Request if `title` is missing
/// - 404 Not Found if no note has this id
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<NoteBody>,
) -> Result<Json<NoteFull>, ApiError> {
    let req = body.into_update()?;
    let note = state
        .db
        .notes
        .update(id, req)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Note {} not found", id)))?;
    Ok(Json(note))
}

/// Delete a note. Deleting a missing note is not an error.
///
/// # Returns
/// - 204 No Content
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let removed = state.db.notes.delete(id).await?;
    info!(
        subsystem = "api",
        component = "notes",
        op = "delete",
        note_id = id,
        removed,
        "Note delete"
    );
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> NoteBody {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_create_requires_title() {
        let err = body(r#"{"foo": "bar"}"#).into_create().unwrap_err();
        match err {
            ApiError::BadRequest(msg) => assert_eq!(msg, "Missing `title` in request body"),
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_create_rejects_empty_title() {
        assert!(body(r#"{"title": ""}"#).into_create().is_err());
    }

    #[test]
    fn test_create_flattens_optional_fields() {
        let req = body(r#"{"title": "A", "content": "B", "folderId": null, "tags": [1, 2]}"#)
            .into_create()
            .unwrap();
        assert_eq!(req.title, "A");
        assert_eq!(req.content.as_deref(), Some("B"));
        assert_eq!(req.folder_id, None);
        assert_eq!(req.tags, vec![1, 2]);
    }

    #[test]
    fn test_folder_id_alias() {
        let req = body(r#"{"title": "A", "folder_id": 101}"#).into_create().unwrap();
        assert_eq!(req.folder_id, Some(101));
    }

    #[test]
    fn test_update_distinguishes_absent_from_null() {
        let req = body(r#"{"title": "A", "content": null}"#).into_update().unwrap();
        assert_eq!(req.content, Some(None));
        assert_eq!(req.folder_id, None);
        assert!(req.tags.is_empty());
    }

    #[test]
    fn test_nul_in_title_or_content_is_rejected() {
        assert!(body(r#"{"title": "a\u0000b"}"#).into_create().is_err());
        let err = body(r#"{"title": "a", "content": "x\u0000"}"#)
            .into_update()
            .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_update_requires_title() {
        assert!(body(r#"{"content": "woof"}"#).into_update().is_err());
    }
}
