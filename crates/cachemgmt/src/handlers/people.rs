//! Person CRUD handlers.
//!
//! These handlers use repository trait objects for database access.
//! Caching and event publishing are handled by the repository decorator.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use cachemgmt_core::directory::{validate_person, PersonView, SavePersonRequest};

use crate::{handlers::AppError, state::AppState};

use super::{created, error::error_response};

fn parse_body(
    body: Result<Json<SavePersonRequest>, JsonRejection>,
) -> Result<SavePersonRequest, Response> {
    body.map(|Json(payload)| payload).map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Failed to parse body: {e}"),
        )
    })
}

/// List all people ordered by name (GET /api/people).
pub async fn list_people(State(state): State<AppState>) -> Result<Json<Vec<PersonView>>, AppError> {
    let people = state.person_repo.list_person_views().await?;
    Ok(Json(people))
}

/// Get a single person by ID (GET /api/people/{id}).
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PersonView>, Response> {
    state
        .person_repo
        .get_person_view(id)
        .await
        .map_err(|e| AppError::from(e).into_response())?
        .map(Json)
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, format!("Person {id} not found")))
}

/// Create a new person (POST /api/people).
///
/// The referenced city is not checked here; the store's foreign key rejects
/// an unknown one.
pub async fn create_person(
    State(state): State<AppState>,
    body: Result<Json<SavePersonRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let person = parse_body(body)?.into_person();

    validate_person(&person)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;

    state
        .person_repo
        .create_person(&person)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    tracing::info!(person_id = %person.id, city_id = %person.city_id, "Created person");

    Ok(created("people", person.id))
}

/// Replace a person by ID (PUT /api/people/{id}).
pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<SavePersonRequest>, JsonRejection>,
) -> Result<StatusCode, Response> {
    let payload = parse_body(body)?;

    let mut person = state
        .person_repo
        .get_person(id)
        .await
        .map_err(|e| AppError::from(e).into_response())?
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, format!("Person {id} not found")))?;

    payload.apply_to(&mut person);

    validate_person(&person)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;

    state
        .person_repo
        .update_person(&person)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    tracing::info!(person_id = %id, "Updated person");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a person by ID (DELETE /api/people/{id}).
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Response> {
    let deleted = state
        .person_repo
        .delete_person(id)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    if deleted == 0 {
        return Err(error_response(
            StatusCode::NOT_FOUND,
            format!("Person {id} not found"),
        ));
    }

    tracing::info!(person_id = %id, "Deleted person");

    Ok(StatusCode::NO_CONTENT)
}
