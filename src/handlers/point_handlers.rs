use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Query;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dto::{CreatePointDto, PointDetailResponse, PointQueryDto, PointResponse};
use crate::errors::ApiError;
use crate::models::NewPoint;
use crate::repo;
use crate::AppState;

/// Handler for registering a new collection point
///
/// This function handles POST requests to `/points`.
///
/// Validation runs before any storage mutation: the request schema is
/// checked first, then every referenced item id is matched against the
/// catalog. The point row and its associations are written in a single
/// transaction, so a partially-associated point is never observable.
///
/// ### Arguments
///
/// * `state` - The application state with the database pool and asset URLs
/// * `payload` - The request payload with the point fields and item ids
///
/// ### Returns
///
/// 201 with the created point (assigned id), or 400 with a field-level
/// error list
pub async fn create_point_handler(
    // Extract the shared application state
    State(state): State<AppState>,
    // Extract and deserialize the JSON request body
    Json(payload): Json<CreatePointDto>,
) -> Result<(StatusCode, Json<PointResponse>), ApiError> {
    // Check the declared request schema before touching storage
    payload.validate()?;

    // The accepted items form a set: collapse repeated ids so the
    // composite-key association insert never trips over a duplicate
    let mut item_ids = payload.items.clone();
    item_ids.sort_unstable();
    item_ids.dedup();

    // Every referenced item must exist in the catalog
    let missing = repo::missing_item_ids(&state.pool, &item_ids).map_err(ApiError::Database)?;
    if !missing.is_empty() {
        return Err(ApiError::Validation(unknown_items_error(&missing)));
    }

    // Fall back to the configured placeholder when no image was submitted
    let image = payload
        .image
        .unwrap_or_else(|| state.placeholder_image.to_string());

    // The coordinates passed the `required` check above
    let new_point = NewPoint::new(
        image,
        payload.name,
        payload.email,
        payload.whatsapp,
        payload.latitude.unwrap_or_default(),
        payload.longitude.unwrap_or_default(),
        payload.city,
        payload.uf,
    );

    // Insert the point and its associations atomically
    let point =
        repo::create_point(&state.pool, new_point, &item_ids).map_err(ApiError::Database)?;

    Ok((
        StatusCode::CREATED,
        Json(PointResponse::from_point(&point, &state.uploads_url)),
    ))
}

/// Handler for retrieving a specific point with its items
///
/// This function handles GET requests to `/points/{id}`.
///
/// ### Arguments
///
/// * `state` - The application state with the database pool and asset URLs
/// * `point_id` - The ID of the point to retrieve, extracted from the URL path
///
/// ### Returns
///
/// The point plus its resolved catalog items, or 404 if the id is unknown
pub async fn get_point_handler(
    // Extract the shared application state
    State(state): State<AppState>,
    // Extract the point ID from the URL path
    Path(point_id): Path<i32>,
) -> Result<Json<PointDetailResponse>, ApiError> {
    // Call the repository function to get the point
    let point = repo::get_point(&state.pool, point_id)
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::NotFound("point".to_string()))?;

    // Resolve the associated items (full catalog entries, not just ids)
    let items = repo::get_items_for_point(&state.pool, point_id).map_err(ApiError::Database)?;

    Ok(Json(PointDetailResponse {
        point: PointResponse::from_point(&point, &state.uploads_url),
        items: items
            .iter()
            .map(|item| crate::dto::ItemResponse::from_item(item, &state.uploads_url))
            .collect(),
    }))
}

/// Handler for listing points with optional filters
///
/// This function handles GET requests to `/points`.
///
/// ### Arguments
///
/// * `state` - The application state with the database pool and asset URLs
/// * `query` - Optional `city`, `uf`, and comma-separated `items` filters
///
/// ### Returns
///
/// The matching points in insertion order, or 400 if the item filter is
/// malformed
pub async fn list_points_handler(
    // Extract the shared application state
    State(state): State<AppState>,
    // Extract the optional filters from the query string
    Query(query): Query<PointQueryDto>,
) -> Result<Json<Vec<PointResponse>>, ApiError> {
    // A malformed items filter is a validation failure, not a storage error
    let item_ids = query.item_ids()?;

    let points = repo::list_points(
        &state.pool,
        query.city.as_deref(),
        query.uf.as_deref(),
        &item_ids,
    )
    .map_err(ApiError::Database)?;

    let response: Vec<PointResponse> = points
        .iter()
        .map(|point| PointResponse::from_point(point, &state.uploads_url))
        .collect();

    Ok(Json(response))
}

/// Builds the field-level error reported for unknown catalog ids
fn unknown_items_error(missing: &[i32]) -> ValidationErrors {
    let mut error = ValidationError::new("exists");
    error.message = Some(format!("unknown item ids: {missing:?}").into());
    let mut errors = ValidationErrors::new();
    errors.add("items".into(), error);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::tests::setup_test_db;

    fn test_state() -> AppState {
        AppState::new(
            setup_test_db(),
            "http://localhost:3333/uploads",
            "placeholder.svg",
        )
    }

    fn sample_payload(items: Vec<i32>) -> CreatePointDto {
        CreatePointDto {
            name: "Mercado Verde".to_string(),
            email: "contato@mercadoverde.com".to_string(),
            whatsapp: "+5511999990000".to_string(),
            latitude: Some(-23.55),
            longitude: Some(-46.63),
            city: "São Paulo".to_string(),
            uf: "SP".to_string(),
            items,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_create_point_handler_assigns_id_and_placeholder_image() {
        let state = test_state();

        let (status, response) =
            create_point_handler(State(state.clone()), Json(sample_payload(vec![1, 2])))
                .await
                .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        let point = response.0;
        assert!(point.id > 0);
        assert_eq!(point.image, "placeholder.svg");
        assert_eq!(
            point.image_url,
            "http://localhost:3333/uploads/placeholder.svg"
        );
    }

    #[tokio::test]
    async fn test_create_point_handler_collapses_duplicate_item_ids() {
        let state = test_state();

        let (status, created) =
            create_point_handler(State(state.clone()), Json(sample_payload(vec![1, 1, 2])))
                .await
                .unwrap();

        assert_eq!(status, StatusCode::CREATED);

        // One association per distinct item survived
        let items = repo::get_items_for_point(&state.pool, created.0.id).unwrap();
        let item_ids: Vec<i32> = items.iter().map(|item| item.get_id()).collect();
        assert_eq!(item_ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_create_point_handler_rejects_empty_item_list() {
        let state = test_state();

        let result =
            create_point_handler(State(state.clone()), Json(sample_payload(vec![]))).await;

        match result {
            Err(ApiError::Validation(errors)) => {
                assert!(errors.field_errors().contains_key("items"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        // Nothing was persisted for the rejected attempt
        let points = repo::list_points(&state.pool, None, None, &[]).unwrap();
        assert!(points.is_empty());
    }

    #[tokio::test]
    async fn test_create_point_handler_rejects_unknown_item_ids() {
        let state = test_state();

        let result =
            create_point_handler(State(state.clone()), Json(sample_payload(vec![1, 99]))).await;

        match result {
            Err(ApiError::Validation(errors)) => {
                assert!(errors.field_errors().contains_key("items"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        let points = repo::list_points(&state.pool, None, None, &[]).unwrap();
        assert!(points.is_empty());
    }

    #[tokio::test]
    async fn test_get_point_handler_resolves_items() {
        let state = test_state();

        let (_, created) =
            create_point_handler(State(state.clone()), Json(sample_payload(vec![1, 2])))
                .await
                .unwrap();

        let result = get_point_handler(State(state), Path(created.0.id)).await.unwrap();

        let detail = result.0;
        assert_eq!(detail.point.id, created.0.id);
        let titles: Vec<String> = detail.items.iter().map(|item| item.title.clone()).collect();
        assert_eq!(titles, vec!["Lamps".to_string(), "Batteries".to_string()]);
    }

    #[tokio::test]
    async fn test_get_point_handler_not_found() {
        let state = test_state();

        let result = get_point_handler(State(state), Path(42)).await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_points_handler_applies_uf_filter() {
        let state = test_state();

        create_point_handler(State(state.clone()), Json(sample_payload(vec![1])))
            .await
            .unwrap();
        let mut rj = sample_payload(vec![2]);
        rj.city = "Niterói".to_string();
        rj.uf = "RJ".to_string();
        create_point_handler(State(state.clone()), Json(rj)).await.unwrap();

        let query = PointQueryDto {
            uf: Some("RJ".to_string()),
            ..Default::default()
        };
        let result = list_points_handler(State(state.clone()), Query(query)).await.unwrap();

        let points = result.0;
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].uf, "RJ");

        // No filters returns everything
        let all = list_points_handler(State(state), Query(PointQueryDto::default()))
            .await
            .unwrap();
        assert_eq!(all.0.len(), 2);
    }

    #[tokio::test]
    async fn test_list_points_handler_rejects_malformed_item_filter() {
        let state = test_state();

        let query = PointQueryDto {
            items: Some("1,two".to_string()),
            ..Default::default()
        };
        let result = list_points_handler(State(state), Query(query)).await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
