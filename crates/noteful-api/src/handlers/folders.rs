//! Folder HTTP handlers.

use axum::{
    extract::{OriginalUri, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use noteful_core::{Folder, FolderRepository};

use super::{location, require, NameBody};
use crate::{ApiError, AppState};

/// List all folders ordered by id.
pub async fn list_folders(State(state): State<AppState>) -> Result<Json<Vec<Folder>>, ApiError> {
    Ok(Json(state.db.folders.list().await?))
}

/// Get a folder by id.
///
/// # Returns
/// - 200 OK with the folder
/// - 404 Not Found if no folder has this id
pub async fn get_folder(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Folder>, ApiError> {
    let folder = state
        .db
        .folders
        .fetch(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Folder {} not found", id)))?;
    Ok(Json(folder))
}

/// Create a folder.
///
/// # Returns
/// - 201 Created with a `Location` header and the folder
/// - 400 Bad Request if `name` is missing
/// - 409 Conflict if the name is taken
pub async fn create_folder(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(body): Json<NameBody>,
) -> Result<impl IntoResponse, ApiError> {
    let name = require(body.name, "name")?;
    let folder = state.db.folders.insert(&name).await?;
    Ok((StatusCode::CREATED, location(&uri, folder.id), Json(folder)))
}

/// Rename a folder.
///
/// # Returns
/// - 200 OK with the folder
/// - 400 Bad Request if `name` is missing
/// - 404 Not Found if no folder has this id
pub async fn update_folder(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<NameBody>,
) -> Result<Json<Folder>, ApiError> {
    let name = require(body.name, "name")?;
    let folder = state
        .db
        .folders
        .update(id, &name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Folder {} not found", id)))?;
    Ok(Json(folder))
}

/// Delete a folder. Its notes are kept and lose their folder.
///
/// # Returns
/// - 204 No Content, whether or not the folder existed
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.db.folders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
