//! HTTP handlers, one module per resource.

pub mod folders;
pub mod notes;
pub mod system;
pub mod tags;

use axum::http::{header, HeaderMap, HeaderValue, Uri};
use serde::Deserialize;

use crate::ApiError;

/// Request body shared by folders and tags.
#[derive(Debug, Default, Deserialize)]
pub struct NameBody {
    #[serde(default)]
    pub name: Option<String>,
}

/// Pull a required, non-empty string out of an optional body field.
pub(crate) fn require(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.is_empty() => {
            check_text(&v, field)?;
            Ok(v)
        }
        _ => Err(ApiError::missing_field(field)),
    }
}

/// Reject text Postgres cannot store in a `text` column.
pub(crate) fn check_text(value: &str, field: &str) -> Result<(), ApiError> {
    if value.contains('\0') {
        let msg = format!("`{}` must not contain NUL characters", field);
        return Err(ApiError::BadRequest(msg));
    }
    Ok(())
}

/// `Location` header pointing at `{request path}/{id}`.
pub(crate) fn location(uri: &Uri, id: i32) -> HeaderMap {
    let path = uri.path().trim_end_matches('/');
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format!("{}/{}", path, id)) {
        headers.insert(header::LOCATION, value);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_accepts_value() {
        assert_eq!(require(Some("Work".to_string()), "name").unwrap(), "Work");
    }

    #[test]
    fn test_require_rejects_nul() {
        match require(Some("Wo\0rk".to_string()), "name") {
            Err(ApiError::BadRequest(msg)) => {
                assert_eq!(msg, "`name` must not contain NUL characters")
            }
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_check_text_accepts_unicode() {
        assert!(check_text("caf\u{e9} \u{1F408}", "title").is_ok());
    }

    #[test]
    fn test_require_rejects_missing_and_empty() {
        assert!(matches!(require(None, "name"), Err(ApiError::BadRequest(_))));
        let empty = require(Some(String::new()), "name");
        assert!(matches!(empty, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_location_appends_id() {
        let uri: Uri = "/api/tags".parse().unwrap();
        let headers = location(&uri, 7);
        assert_eq!(headers[header::LOCATION], "/api/tags/7");
    }

    #[test]
    fn test_location_ignores_trailing_slash() {
        let uri: Uri = "/api/notes/".parse().unwrap();
        let headers = location(&uri, 1010);
        assert_eq!(headers[header::LOCATION], "/api/notes/1010");
    }
}
