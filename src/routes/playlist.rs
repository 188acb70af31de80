use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::{api_error, ApiError};
use crate::errors::CatalogError;
use crate::models::{
    AddPlaylistRequest, AddPlaylistResponse, CategoriesResponse, EntriesResponse,
    PlaylistSummary, PlaylistsResponse, SearchQuery,
};
use crate::AppState;

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// POST /api/playlists - Import a playlist from pasted content or a URL
pub async fn add_playlist(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddPlaylistRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let force_category = non_blank(payload.force_category.as_deref());

    let record = match (non_blank(payload.content.as_deref()), non_blank(payload.url.as_deref())) {
        (Some(_), None) => {
            // Keep the content exactly as submitted
            let content = payload.content.as_deref().unwrap_or_default();
            state
                .service
                .add_playlist(&payload.name, content, None, force_category)
                .await
        }
        (None, Some(url)) => {
            state
                .service
                .import_from_url(&payload.name, url, force_category)
                .await
        }
        (Some(_), Some(_)) => Err(CatalogError::InvalidRequest(
            "provide either content or url, not both".to_string(),
        )),
        (None, None) => Err(CatalogError::InvalidRequest(
            "provide playlist content or a url".to_string(),
        )),
    }
    .map_err(api_error)?;

    Ok((
        StatusCode::CREATED,
        Json(AddPlaylistResponse {
            success: true,
            playlist: PlaylistSummary::from(&record),
        }),
    ))
}

/// GET /api/playlists - Stored playlists without their content
pub async fn list_playlists(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.service.get_playlists().await.map_err(api_error)?;
    let playlists: Vec<PlaylistSummary> = records.iter().map(PlaylistSummary::from).collect();
    let total = playlists.len();

    Ok(Json(PlaylistsResponse { playlists, total }))
}

/// DELETE /api/playlists - Remove every stored playlist
pub async fn clear_playlists(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.clear_all_data().await.map_err(api_error)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "All data deleted successfully"
    })))
}

/// GET /api/categories - Full category tree
pub async fn get_categories(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state.service.get_all_categories().await.map_err(api_error)?;
    let total = categories.len();

    Ok(Json(CategoriesResponse { categories, total }))
}

/// GET /api/categories/:name - One main category with its subcategories
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state.service.get_category(&name).await.map_err(api_error)?;
    Ok(Json(category))
}

/// GET /api/entries - Flat export of every entry
pub async fn export_entries(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.service.export_all_entries().await.map_err(api_error)?;
    let total = items.len();

    Ok(Json(EntriesResponse { items, total }))
}

/// GET /api/search?q= - Search entries by name or category
pub async fn search_entries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.service.search(&query.q).await.map_err(api_error)?;
    let total = items.len();

    Ok(Json(EntriesResponse { items, total }))
}

/// GET /api/stats - Storage summary
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let info = state.service.storage_info().await.map_err(api_error)?;
    Ok(Json(info))
}
