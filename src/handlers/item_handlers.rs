use axum::{extract::State, Json};

use crate::dto::ItemResponse;
use crate::errors::ApiError;
use crate::repo;
use crate::AppState;

/// Handler for listing the item catalog
///
/// This function handles GET requests to `/items`.
///
/// ### Arguments
///
/// * `state` - The application state with the database pool and asset URLs
///
/// ### Returns
///
/// The full catalog ordered by id, with image file names resolved to
/// absolute URLs
pub async fn list_items_handler(
    // Extract the shared application state
    State(state): State<AppState>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    // Call the repository function to list the catalog
    let items = repo::list_items(&state.pool).map_err(ApiError::Database)?;

    // Resolve each stored image file name against the public assets base
    let response: Vec<ItemResponse> = items
        .iter()
        .map(|item| ItemResponse::from_item(item, &state.uploads_url))
        .collect();

    Ok(Json(response))
}
