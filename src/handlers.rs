use crate::errors::AppError;
use crate::geocoding::GeocodingClient;
use crate::models::{Contact, ContactRequest};
use crate::store::ContactStore;
use crate::validation::{
    validate_email, validate_personal_number, validate_text, validate_zip_code,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

/// Shared application state injected into handlers.
///
/// Built once at process start and handed to `router`; there is no other
/// cross-request state.
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway for the contact collection.
    pub store: ContactStore,
    /// Client for the external geocoding provider.
    pub geocoder: GeocodingClient,
}

/// Builds the routed application surface.
///
/// Process-level layers (trace, CORS) attach in `main`; only the
/// request-body limit lives here so tests drive the same surface the
/// server binds.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/contact", post(create_contact).get(list_contacts))
        .route("/contact/:id", get(get_contact))
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .with_state(state)
}

/// Health check endpoint.
///
/// Returns the service status and version for deploy probes.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "contact-api",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

/// POST /contact
///
/// Validates the eight required fields in fixed group order — text fields,
/// then email, then zip code, then personal number — and short-circuits
/// with 400 and the group's message on the first failure. A body that does
/// not deserialize at all (malformed JSON, missing or mistyped field) gets
/// the first group's message so every failure on this route keeps the
/// `{"error": …}` shape. On success the record is persisted and returned
/// as 201 with its store-assigned identifier.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `payload` - The creation payload, or the extractor's rejection.
///
/// # Returns
///
/// * `Result<(StatusCode, Json<Contact>), AppError>` - 201 with the stored
///   record, or a 400-mapped error.
pub async fn create_contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), AppError> {
    tracing::info!("POST /contact");

    let Json(fields) =
        payload.map_err(|_| AppError::Validation("Invalid input data".to_string()))?;

    if !validate_text(&fields.firstname)
        || !validate_text(&fields.lastname)
        || !validate_text(&fields.address)
        || !validate_text(&fields.city)
        || !validate_text(&fields.country)
    {
        return Err(AppError::Validation("Invalid input data".to_string()));
    }

    if !validate_email(&fields.email) {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }

    if !validate_zip_code(&fields.zip_code) {
        return Err(AppError::Validation("Invalid zip code format".to_string()));
    }

    if !validate_personal_number(&fields.personal_number) {
        return Err(AppError::Validation(
            "Invalid personal number format".to_string(),
        ));
    }

    let contact = state.store.create(&fields).await?;

    Ok((StatusCode::CREATED, Json(contact)))
}

/// GET /contact
///
/// Returns every persisted contact as a JSON array, in store-defined
/// order, without enrichment. Empty store means empty array.
///
/// # Arguments
///
/// * `state` - The application state.
///
/// # Returns
///
/// * `Result<Json<Vec<Contact>>, AppError>` - The full collection, or a
///   500-mapped error.
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Contact>>, AppError> {
    tracing::info!("GET /contact");

    let contacts = state.store.list_all().await?;

    Ok(Json(contacts))
}

/// GET /contact/:id
///
/// Fetches one contact and enriches it with coordinates from the external
/// geocoder. A malformed identifier and a well-formed-but-absent one are
/// both 404, with distinct fixed messages. The geocoder response must
/// carry both `lat` and `lng` (presence, not truthiness — 0.0 is a valid
/// coordinate); otherwise the request fails with 500 and nothing is
/// persisted. Coordinates are set on the in-memory record only and are
/// recomputed on every fetch.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `id` - The raw identifier path segment.
///
/// # Returns
///
/// * `Result<Json<Contact>, AppError>` - The enriched record, or a
///   404/500-mapped error.
pub async fn get_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, AppError> {
    tracing::info!("GET /contact/{}", id);

    let mut contact = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or(AppError::NotFound)?;

    let coordinates = state.geocoder.geocode(&contact.address_line()).await?;

    match (coordinates.lat, coordinates.lng) {
        (Some(lat), Some(lng)) => {
            contact.lat = Some(lat);
            contact.lng = Some(lng);
        }
        _ => return Err(AppError::EnrichmentFailure),
    }

    Ok(Json(contact))
}
