//! Tag HTTP handlers.

use axum::{
    extract::{OriginalUri, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use noteful_core::{Tag, TagRepository};

use super::{location, require, NameBody};
use crate::{ApiError, AppState};

pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, ApiError> {
    Ok(Json(state.db.tags.list().await?))
}

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Tag>, ApiError> {
    let tag = state
        .db
        .tags
        .fetch(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Tag {} not found", id)))?;
    Ok(Json(tag))
}

/// Create a tag. 400 if `name` is missing, 409 if it is taken.
pub async fn create_tag(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(body): Json<NameBody>,
) -> Result<impl IntoResponse, ApiError> {
    let name = require(body.name, "name")?;
    let tag = state.db.tags.insert(&name).await?;
    Ok((StatusCode::CREATED, location(&uri, tag.id), Json(tag)))
}

pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<NameBody>,
) -> Result<Json<Tag>, ApiError> {
    let name = require(body.name, "name")?;
    let tag = state
        .db
        .tags
        .update(id, &name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Tag {} not found", id)))?;
    Ok(Json(tag))
}

/// Delete a tag and detach it from every note. Always 204.
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.db.tags.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
