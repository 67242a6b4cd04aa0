//! Catalog handlers: listing, search, and perfume CRUD

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::error;

use crate::error::{ApiError, ApiResult};
use crate::models::NewPerfume;
use crate::state::AppState;

/// Search query parameters
#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// List all active perfumes
pub async fn list_perfumes(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let perfumes = state.perfume_repository.list_active().await.map_err(|e| {
        error!("Failed to list perfumes: {}", e);
        ApiError::Internal(e)
    })?;

    Ok(Json(perfumes))
}

/// Search perfumes by perfume or brand name
pub async fn search_perfumes(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<impl IntoResponse> {
    let perfumes = state
        .perfume_repository
        .search(&query.q)
        .await
        .map_err(|e| {
            error!("Failed to search perfumes: {}", e);
            ApiError::Internal(e)
        })?;

    Ok(Json(perfumes))
}

/// Get a single perfume by id
pub async fn get_perfume(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let perfume = state
        .perfume_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get perfume: {}", e);
            ApiError::Internal(e)
        })?
        .ok_or_else(|| ApiError::NotFound("perfume no encontrado".to_string()))?;

    Ok(Json(perfume))
}

/// List active perfumes of a gender; an empty array is a valid result
pub async fn perfumes_by_genero(
    State(state): State<AppState>,
    Path(genero): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let perfumes = state
        .perfume_repository
        .by_genero(&genero)
        .await
        .map_err(|e| {
            error!("Failed to list perfumes by genero: {}", e);
            ApiError::Internal(e)
        })?;

    Ok(Json(perfumes))
}

/// List all curated selections
pub async fn list_selecciones(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let selecciones = state.perfume_repository.selecciones().await.map_err(|e| {
        error!("Failed to list selecciones: {}", e);
        ApiError::Internal(e)
    })?;

    Ok(Json(selecciones))
}

/// Create a new perfume
pub async fn create_perfume(
    State(state): State<AppState>,
    Json(payload): Json<NewPerfume>,
) -> ApiResult<impl IntoResponse> {
    let perfume = state.perfume_repository.create(&payload).await.map_err(|e| {
        error!("Failed to create perfume: {}", e);
        ApiError::Internal(e)
    })?;

    Ok((StatusCode::CREATED, Json(perfume)))
}

/// Update an existing perfume
pub async fn update_perfume(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<NewPerfume>,
) -> ApiResult<impl IntoResponse> {
    let perfume = state
        .perfume_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to update perfume: {}", e);
            ApiError::Internal(e)
        })?
        .ok_or_else(|| ApiError::NotFound("perfume no encontrado".to_string()))?;

    Ok(Json(perfume))
}

/// Soft-delete a perfume
pub async fn delete_perfume(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state.perfume_repository.soft_delete(id).await.map_err(|e| {
        error!("Failed to delete perfume: {}", e);
        ApiError::Internal(e)
    })?;

    if !deleted {
        return Err(ApiError::NotFound("perfume no encontrado".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
