//! City CRUD handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use cachemgmt_core::directory::{validate_city, CityView, SaveCityRequest};

use crate::{handlers::AppError, state::AppState};

use super::{created, error::error_response};

fn parse_body(
    body: Result<Json<SaveCityRequest>, JsonRejection>,
) -> Result<SaveCityRequest, Response> {
    body.map(|Json(payload)| payload).map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Failed to parse body: {e}"),
        )
    })
}

/// List all cities ordered by name (GET /api/cities).
pub async fn list_cities(State(state): State<AppState>) -> Result<Json<Vec<CityView>>, AppError> {
    let cities = state.city_repo.list_cities().await?;
    Ok(Json(cities.iter().map(CityView::from).collect()))
}

/// Get a single city by ID (GET /api/cities/{id}).
pub async fn get_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CityView>, Response> {
    state
        .city_repo
        .get_city(id)
        .await
        .map_err(|e| AppError::from(e).into_response())?
        .map(|city| Json(CityView::from(&city)))
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, format!("City {id} not found")))
}

/// Create a new city (POST /api/cities).
pub async fn create_city(
    State(state): State<AppState>,
    body: Result<Json<SaveCityRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let city = parse_body(body)?.into_city();

    validate_city(&city).map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;

    state
        .city_repo
        .create_city(&city)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    tracing::info!(city_id = %city.id, name = %city.name, "Created city");

    Ok(created("cities", city.id))
}

/// Rename a city by ID (PUT /api/cities/{id}).
///
/// People living in the city are re-projected on their next read.
pub async fn update_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<SaveCityRequest>, JsonRejection>,
) -> Result<StatusCode, Response> {
    let payload = parse_body(body)?;

    let mut city = state
        .city_repo
        .get_city(id)
        .await
        .map_err(|e| AppError::from(e).into_response())?
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, format!("City {id} not found")))?;

    payload.apply_to(&mut city);

    validate_city(&city).map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;

    state
        .city_repo
        .update_city(&city)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    tracing::info!(city_id = %id, name = %city.name, "Updated city");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a city by ID (DELETE /api/cities/{id}).
///
/// Rejected by the store while anyone still lives there.
pub async fn delete_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Response> {
    let deleted = state
        .city_repo
        .delete_city(id)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    if deleted == 0 {
        return Err(error_response(
            StatusCode::NOT_FOUND,
            format!("City {id} not found"),
        ));
    }

    tracing::info!(city_id = %id, "Deleted city");

    Ok(StatusCode::NO_CONTENT)
}
