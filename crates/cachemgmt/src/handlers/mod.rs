pub mod cities;
pub mod error;
pub mod health;
pub mod people;

pub use error::AppError;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

/// 201 response carrying the new resource's location and identity.
fn created(collection: &str, id: Uuid) -> Response {
    let location = format!("/api/{collection}/{id}");
    let mut response = (
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": id })),
    )
        .into_response();
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}
