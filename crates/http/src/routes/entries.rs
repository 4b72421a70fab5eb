//! Entry publish and list endpoints
//!
//! Operates against the store owned by this API surface. Expired entries
//! are compacted on every read, so the list is correct even when no
//! presenter is running.

use crate::{error::HttpError, state::AppState};
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use chrono::Utc;
use passdrop_core::{
    Cookie, Entry, NewEntry, sweep,
    validation::{validate_new_entry, validate_website},
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::instrument;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Request to publish a new entry
///
/// `cookies` is taken as raw JSON so a non-array payload can be rejected
/// with the contract's 400 message instead of a generic decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateEntryRequest {
    /// Display label for the site
    #[serde(default)]
    pub website: Option<String>,
    /// Cookie name/value pairs, if any
    #[serde(default)]
    #[schema(value_type = Option<Vec<Object>>)]
    pub cookies: Option<JsonValue>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Response when publishing an entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEntryResponse {
    #[schema(value_type = Object)]
    pub entry: Entry,
}

/// Response listing the active entries
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntriesResponse {
    #[schema(value_type = Vec<Object>)]
    pub entries: Vec<Entry>,
}

/// List all active entries
///
/// Sweeps this surface's own store first, so expired entries disappear on
/// read rather than lingering until some timer notices them.
#[utoipa::path(
    get,
    path = "/entries",
    responses(
        (status = 200, description = "Active entries", body = EntriesResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    ),
    tag = "entries"
)]
#[instrument(name = "list_entries", skip(state), fields(entry_count = tracing::field::Empty))]
pub async fn list_entries(State(state): State<AppState>) -> Result<Json<EntriesResponse>, HttpError> {
    let now = Utc::now().timestamp_millis();
    let outcome = sweep(state.store.as_ref(), now)
        .await
        .map_err(|_| HttpError::InternalServerError("Failed to fetch entries".to_string()))?;

    tracing::Span::current().record("entry_count", outcome.active.len());
    Ok(Json(EntriesResponse {
        entries: outcome.active,
    }))
}

/// Publish a new entry
#[utoipa::path(
    post,
    path = "/entries",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = CreateEntryResponse),
        (status = 400, description = "Validation failure", body = crate::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    ),
    tag = "entries"
)]
#[instrument(name = "create_entry", skip(state, request))]
pub async fn create_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<CreateEntryResponse>), HttpError> {
    // The website label is checked before the cookie payload is decoded;
    // a request failing both gets the website error.
    let website = validate_website(request.website.as_deref().unwrap_or_default())?;
    let cookies = parse_cookies(request.cookies)?;

    let new = validate_new_entry(NewEntry {
        website,
        cookies,
        username: request.username,
        password: request.password,
    })?;

    let now = Utc::now().timestamp_millis();
    let entry = state
        .store
        .append(new, now)
        .await
        .map_err(|_| HttpError::InternalServerError("Failed to create entry".to_string()))?;

    Ok((StatusCode::CREATED, Json(CreateEntryResponse { entry })))
}

/// Decode the cookie payload; anything other than an absent value or an
/// array of cookie objects is a 400.
fn parse_cookies(raw: Option<JsonValue>) -> Result<Vec<Cookie>, HttpError> {
    match raw {
        None | Some(JsonValue::Null) => Ok(Vec::new()),
        Some(value) if value.is_array() => serde_json::from_value(value)
            .map_err(|_| HttpError::BadRequest("Cookies must be an array".to_string())),
        Some(_) => Err(HttpError::BadRequest(
            "Cookies must be an array".to_string(),
        )),
    }
}

/// Create the entries router
pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(list_entries, create_entry))
}
