//! Core data models for noteful.

use serde::{Deserialize, Serialize};

// =============================================================================
// FOLDERS AND TAGS
// =============================================================================

/// A folder. A note belongs to at most one folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Folder {
    pub id: i32,
    pub name: String,
}

/// A tag. Notes and tags are linked many-to-many through `notes_tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

// =============================================================================
// NOTES
// =============================================================================

/// One row of the flat `notes ⟕ folders ⟕ notes_tags ⟕ tags` join.
///
/// A note with `n` tags yields `n` rows; an untagged note yields one row
/// with `tag_id` and `tag_name` set to NULL.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct NoteRow {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<i32>,
    pub folder_name: Option<String>,
    pub tag_id: Option<i32>,
    pub tag_name: Option<String>,
}

/// A note with its folder and tags folded in.
///
/// `tags` never contains the same tag id twice and serializes as `[]`
/// for an untagged note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFull {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<i32>,
    pub folder_name: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl NoteFull {
    /// True if a tag with this id is already attached.
    pub fn has_tag(&self, tag_id: i32) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }
}
