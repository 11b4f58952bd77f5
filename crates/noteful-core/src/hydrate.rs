//! Note hydration.
//!
//! The notes query joins `notes` to `folders` and, through `notes_tags`, to
//! `tags`, so a note with three tags comes back as three rows. Hydration
//! groups those rows by note id into one [`NoteFull`] per note.
//!
//! Grouping goes through an id → position map rather than row adjacency, so
//! rows for the same note may arrive interleaved with rows for other notes.
//! Output order is the order in which each note id was first seen.

use std::collections::HashMap;

use crate::models::{NoteFull, NoteRow, Tag};

/// Fold flat join rows into notes, one per distinct note id.
///
/// Scalar and folder fields are taken from the first row seen for a note;
/// later rows for the same note only contribute tags. A row whose `tag_id`
/// is NULL contributes nothing, so an untagged note ends up with `tags: []`.
/// A tag id already attached to the note is skipped.
pub fn hydrate_notes<I>(rows: I) -> Vec<NoteFull>
where
    I: IntoIterator<Item = NoteRow>,
{
    let rows = rows.into_iter();
    let mut notes: Vec<NoteFull> = Vec::with_capacity(rows.size_hint().0);
    let mut index: HashMap<i32, usize> = HashMap::new();

    for row in rows {
        let pos = *index.entry(row.id).or_insert_with(|| {
            // folder_id comes from the joined folders row; a dangling
            // notes.folder_id never reaches here as a folder
            let folder_name = row.folder_id.and(row.folder_name.clone());
            notes.push(NoteFull {
                id: row.id,
                title: row.title.clone(),
                content: row.content.clone(),
                folder_id: row.folder_id,
                folder_name,
                tags: Vec::new(),
            });
            notes.len() - 1
        });

        if let Some(tag_id) = row.tag_id {
            let note = &mut notes[pos];
            if !note.has_tag(tag_id) {
                note.tags.push(Tag {
                    id: tag_id,
                    name: row.tag_name.unwrap_or_default(),
                });
            }
        }
    }

    notes
}

/// Hydrate the rows of a single-note query.
///
/// Returns `None` when there are no rows, which callers map to not-found.
pub fn hydrate_note<I>(rows: I) -> Option<NoteFull>
where
    I: IntoIterator<Item = NoteRow>,
{
    hydrate_notes(rows).into_iter().next()
}
