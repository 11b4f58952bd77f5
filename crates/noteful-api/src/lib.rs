//! # noteful-api
//!
//! HTTP API for notes, folders and tags.
//!
//! All resources live under `/api`:
//!
//! | Method | Path | |
//! |--------|------|-|
//! | GET, POST | `/api/notes` | list (filterable) / create |
//! | GET, PUT, DELETE | `/api/notes/:id` | read / update / delete |
//! | GET, POST | `/api/folders` | |
//! | GET, PUT, DELETE | `/api/folders/:id` | |
//! | GET, POST | `/api/tags` | |
//! | GET, PUT, DELETE | `/api/tags/:id` | |
//!
//! `GET /health` reports database reachability.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod query_types;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use noteful_db::Database;

use handlers::{folders, notes, system, tags};

pub use error::ApiError;

/// Request bodies are small JSON documents.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Resource routes, mounted under `/api`.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/notes/:id",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .route(
            "/folders",
            get(folders::list_folders).post(folders::create_folder),
        )
        .route(
            "/folders/:id",
            get(folders::get_folder)
                .put(folders::update_folder)
                .delete(folders::delete_folder),
        )
        .route("/tags", get(tags::list_tags).post(tags::create_tag))
        .route(
            "/tags/:id",
            get(tags::get_tag)
                .put(tags::update_tag)
                .delete(tags::delete_tag),
        )
}

fn cors_layer(origins: Option<Vec<HeaderValue>>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::LOCATION])
        .max_age(std::time::Duration::from_secs(3600));

    match origins {
        Some(list) => layer.allow_origin(AllowOrigin::list(list)),
        None => layer.allow_origin(Any),
    }
}

/// Build the application router.
///
/// `cors_origins` of `None` allows any origin.
pub fn app(state: AppState, cors_origins: Option<Vec<HeaderValue>>) -> Router {
    Router::new()
        .route("/health", get(system::health_check))
        .nest("/api", api_routes())
        .fallback(system::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer(cors_origins))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_is_uuid_v7() {
        let request = axum::http::Request::new(());
        let id = MakeRequestUuidV7
            .make_request_id(&request)
            .expect("request id");
        let parsed = Uuid::parse_str(id.header_value().to_str().unwrap()).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }
}
