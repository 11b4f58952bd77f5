//! Query-string parameter types with friendlier parsing.
//!
//! Query strings arrive as text, and clients routinely send empty values
//! (`?folderId=&searchTerm=`) for filters they are not using. These helpers
//! treat empty values as absent and give a readable error for ids that do
//! not parse.

use serde::{de, Deserialize, Deserializer};

use noteful_core::ListNotesRequest;

/// Query parameters for `GET /api/notes`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotesQuery {
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub search_term: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub folder_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub tag_id: Option<i32>,
}

impl From<ListNotesQuery> for ListNotesRequest {
    fn from(q: ListNotesQuery) -> Self {
        ListNotesRequest {
            search_term: q.search_term,
            folder_id: q.folder_id,
            tag_id: q.tag_id,
        }
    }
}

/// Empty string → `None`, anything else kept verbatim.
pub fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}

/// Blank → `None`, otherwise an integer id.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = match Option::<String>::deserialize(deserializer)? {
        Some(s) => s,
        None => return Ok(None),
    };
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    parse_id(s).map(Some).map_err(de::Error::custom)
}

fn parse_id(s: &str) -> Result<i32, String> {
    s.parse::<i32>()
        .map_err(|_| format!("Invalid id '{}'. Expected an integer (e.g., '1001')", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::extract::Query;
    use axum::http::Uri;

    fn parse(qs: &str) -> Result<ListNotesQuery, String> {
        let uri: Uri = format!("/api/notes?{}", qs).parse().unwrap();
        Query::<ListNotesQuery>::try_from_uri(&uri)
            .map(|Query(q)| q)
            .map_err(|rejection| rejection.body_text())
    }

    #[test]
    fn test_no_params() {
        let q = parse("").unwrap();
        assert!(q.search_term.is_none());
        assert!(q.folder_id.is_none());
        assert!(q.tag_id.is_none());
    }

    #[test]
    fn test_all_params() {
        let q = parse("searchTerm=cats&folderId=100&tagId=2").unwrap();
        assert_eq!(q.search_term.as_deref(), Some("cats"));
        assert_eq!(q.folder_id, Some(100));
        assert_eq!(q.tag_id, Some(2));
    }

    #[test]
    fn test_empty_values_are_absent() {
        let q = parse("searchTerm=&folderId=&tagId=").unwrap();
        assert!(q.search_term.is_none());
        assert!(q.folder_id.is_none());
        assert!(q.tag_id.is_none());
    }

    #[test]
    fn test_bad_id_is_rejected_with_message() {
        let err = parse("folderId=abc").unwrap_err();
        assert!(err.contains("Invalid id 'abc'"));
    }

    #[test]
    fn test_into_list_request() {
        let req: ListNotesRequest = parse("tagId=3").unwrap().into();
        assert_eq!(
            req,
            ListNotesRequest {
                search_term: None,
                folder_id: None,
                tag_id: Some(3),
            }
        );
    }
}
