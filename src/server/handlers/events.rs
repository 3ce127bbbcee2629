//! HTTP handlers for the events manager

use crate::core::error::{EventError, PortalResult};
use crate::core::event::{Event, EventDraft, Registration, RegistrationRequest};
use crate::server::host::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query parameters for listing events
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EventListParams {
    /// Case-insensitive title search
    pub search: Option<String>,
}

/// Response for list events endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ListEventsResponse {
    pub events: Vec<Event>,
    pub count: usize,
}

/// Response for list registrations endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ListRegistrationsResponse {
    pub event_id: Uuid,
    pub registrations: Vec<Registration>,
    pub count: usize,
}

/// GET /events
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> PortalResult<Json<ListEventsResponse>> {
    let events = match params.search.as_deref() {
        Some(term) => state.events.search(term).await?,
        None => state.events.list().await?,
    };

    Ok(Json(ListEventsResponse {
        count: events.len(),
        events,
    }))
}

/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    Json(draft): Json<EventDraft>,
) -> PortalResult<(StatusCode, Json<Event>)> {
    let event = state.events.create(draft).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> PortalResult<Json<Event>> {
    let event = state
        .events
        .get(&id)
        .await?
        .ok_or(EventError::NotFound { id })?;
    Ok(Json(event))
}

/// PUT /events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<EventDraft>,
) -> PortalResult<Json<Event>> {
    Ok(Json(state.events.update(&id, draft).await?))
}

/// DELETE /events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> PortalResult<StatusCode> {
    state.events.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /events/{id}/registrations
pub async fn list_registrations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> PortalResult<Json<ListRegistrationsResponse>> {
    let registrations = state.events.registrations(&id).await?;
    Ok(Json(ListRegistrationsResponse {
        event_id: id,
        count: registrations.len(),
        registrations,
    }))
}

/// POST /events/{id}/registrations
pub async fn register(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RegistrationRequest>,
) -> PortalResult<(StatusCode, Json<Event>)> {
    let event = state.events.register(&id, request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}
