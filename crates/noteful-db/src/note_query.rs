//! Flat join query over notes, folders and tags.
//!
//! Produces one row per (note, tag) pair, or one row with NULL tag columns
//! for an untagged note. Rows are shaped as [`NoteRow`] and handed to
//! [`noteful_core::hydrate_notes`].

use sqlx::PgExecutor;

use noteful_core::{Error, ListNotesRequest, NoteRow, Result};

use crate::escape_like;

const SELECT_NOTE_ROWS: &str = r#"
    SELECT
        n.id,
        n.title,
        n.content,
        f.id AS folder_id,
        f.name AS folder_name,
        t.id AS tag_id,
        t.name AS tag_name
    FROM notes n
    LEFT JOIN folders f ON n.folder_id = f.id
    LEFT JOIN notes_tags nt ON n.id = nt.note_id
    LEFT JOIN tags t ON nt.tag_id = t.id"#;

/// A bound parameter for the generated query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    /// Integer parameter (ids).
    Int(i32),
    /// String parameter (LIKE patterns).
    String(String),
}

/// Builds the notes join query with optional filters.
///
/// # Example
///
/// ```rust,ignore
/// use noteful_db::note_query::NoteQueryBuilder;
///
/// let (sql, params) = NoteQueryBuilder::new().folder_id(100).build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct NoteQueryBuilder {
    note_id: Option<i32>,
    search_term: Option<String>,
    folder_id: Option<i32>,
    tag_id: Option<i32>,
}

impl NoteQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder populated from list filters.
    pub fn from_request(req: &ListNotesRequest) -> Self {
        let mut builder = Self::new();
        if let Some(term) = &req.search_term {
            builder = builder.search_term(term.as_str());
        }
        if let Some(id) = req.folder_id {
            builder = builder.folder_id(id);
        }
        if let Some(id) = req.tag_id {
            builder = builder.tag_id(id);
        }
        builder
    }

    /// Restrict to a single note.
    pub fn note_id(mut self, id: i32) -> Self {
        self.note_id = Some(id);
        self
    }

    /// Title substring filter. `%`, `_` and `\` match literally.
    pub fn search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn folder_id(mut self, id: i32) -> Self {
        self.folder_id = Some(id);
        self
    }

    /// Notes carrying this tag. The tag filter runs as a subquery so matched
    /// notes still come back with all of their tags.
    pub fn tag_id(mut self, id: i32) -> Self {
        self.tag_id = Some(id);
        self
    }

    /// Generate the SQL text and its parameters, numbered from `$1`.
    pub fn build(&self) -> (String, Vec<QueryParam>) {
        let mut clauses: Vec<String> = Vec::new();
        let mut params: Vec<QueryParam> = Vec::new();

        if let Some(id) = self.note_id {
            params.push(QueryParam::Int(id));
            clauses.push(format!("n.id = ${}", params.len()));
        }
        if let Some(term) = &self.search_term {
            params.push(QueryParam::String(format!("%{}%", escape_like(term))));
            clauses.push(format!("n.title LIKE ${}", params.len()));
        }
        if let Some(id) = self.folder_id {
            params.push(QueryParam::Int(id));
            clauses.push(format!("n.folder_id = ${}", params.len()));
        }
        if let Some(id) = self.tag_id {
            params.push(QueryParam::Int(id));
            clauses.push(format!(
                "n.id IN (SELECT note_id FROM notes_tags WHERE tag_id = ${})",
                params.len()
            ));
        }

        let where_clause = if clauses.is_empty() {
            "TRUE".to_string()
        } else {
            clauses.join(" AND ")
        };

        let sql = format!(
            "{}\n    WHERE {}\n    ORDER BY n.id, t.id",
            SELECT_NOTE_ROWS, where_clause
        );
        (sql, params)
    }

    /// Run the query and return the flat rows.
    pub async fn fetch_rows<'e, E>(&self, executor: E) -> Result<Vec<NoteRow>>
    where
        E: PgExecutor<'e>,
    {
        let (sql, params) = self.build();

        let mut q = sqlx::query_as::<_, NoteRow>(&sql);
        for param in params {
            q = match param {
                QueryParam::Int(val) => q.bind(val),
                QueryParam::String(s) => q.bind(s),
            };
        }

        q.fetch_all(executor).await.map_err(Error::Database)
    }
}
