//! Repository traits for noteful.
//!
//! These traits define the interfaces the database layer implements, so
//! HTTP handlers can be written against them and tested with other backends.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use crate::error::Result;
use crate::models::*;

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Filters for listing notes. Every filter is optional and they combine
/// with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListNotesRequest {
    /// Substring matched against the title with `LIKE`.
    pub search_term: Option<String>,
    /// Only notes in this folder.
    pub folder_id: Option<i32>,
    /// Only notes carrying this tag.
    pub tag_id: Option<i32>,
}

/// Request for creating a new note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<i32>,
    /// Tag ids to associate with the note.
    pub tags: Vec<i32>,
}

/// Request for updating a note.
///
/// `title` is always written. For `content` and `folder_id` the outer
/// `Option` says whether the field was supplied at all: `None` leaves the
/// column alone, `Some(None)` sets it to NULL. `tags` always replaces the
/// note's full tag set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub content: Option<Option<String>>,
    pub folder_id: Option<Option<i32>>,
    pub tags: Vec<i32>,
}

/// Deserialize a field that may be absent, null, or set.
///
/// Use with `#[serde(default, deserialize_with = "deserialize_present")]`
/// on an `Option<Option<T>>`: absent gives `None`, `null` gives
/// `Some(None)`, a value gives `Some(Some(v))`.
pub fn deserialize_present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// =============================================================================
// REPOSITORY TRAITS
// =============================================================================

/// Repository for folder CRUD operations.
#[async_trait]
pub trait FolderRepository: Send + Sync {
    /// List all folders ordered by id.
    async fn list(&self) -> Result<Vec<Folder>>;

    /// Fetch a folder by id.
    async fn fetch(&self, id: i32) -> Result<Option<Folder>>;

    /// Insert a new folder.
    async fn insert(&self, name: &str) -> Result<Folder>;

    /// Rename a folder. `None` if it does not exist.
    async fn update(&self, id: i32, name: &str) -> Result<Option<Folder>>;

    /// Delete a folder. Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool>;
}

/// Repository for tag CRUD operations.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// List all tags ordered by id.
    async fn list(&self) -> Result<Vec<Tag>>;

    /// Fetch a tag by id.
    async fn fetch(&self, id: i32) -> Result<Option<Tag>>;

    /// Insert a new tag.
    async fn insert(&self, name: &str) -> Result<Tag>;

    /// Rename a tag. `None` if it does not exist.
    async fn update(&self, id: i32, name: &str) -> Result<Option<Tag>>;

    /// Delete a tag and its note associations. Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool>;
}

/// Repository for note CRUD operations.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List hydrated notes matching the filters, ordered by id.
    async fn list(&self, req: ListNotesRequest) -> Result<Vec<NoteFull>>;

    /// Fetch a hydrated note by id.
    async fn fetch(&self, id: i32) -> Result<Option<NoteFull>>;

    /// Insert a note and its tag associations, returning the hydrated note.
    async fn insert(&self, req: CreateNoteRequest) -> Result<NoteFull>;

    /// Update a note and replace its tag associations.
    /// `None` if the note does not exist.
    async fn update(&self, id: i32, req: UpdateNoteRequest) -> Result<Option<NoteFull>>;

    /// Delete a note. Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool>;
}
