//! Router builder utilities for the portal routes

use crate::server::handlers::{admin, directory, donations, events};
use crate::server::host::AppState;
use axum::{Router, routing::get};

/// Build the alumni directory routes
///
/// - GET /alumni - Search, filter, sort and paginate the roster
/// - GET /alumni/filters - Filter options derived from the roster
/// - GET /alumni/{id} - One record
pub fn build_directory_routes(state: AppState) -> Router {
    Router::new()
        .route("/alumni", get(directory::list_alumni))
        .route("/alumni/filters", get(directory::filter_options))
        .route("/alumni/{id}", get(directory::get_alumnus))
        .with_state(state)
}

/// Build the events manager routes
///
/// - GET/POST /events
/// - GET/PUT/DELETE /events/{id}
/// - GET/POST /events/{id}/registrations
pub fn build_event_routes(state: AppState) -> Router {
    Router::new()
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route(
            "/events/{id}/registrations",
            get(events::list_registrations).post(events::register),
        )
        .with_state(state)
}

/// Build the donation routes
///
/// - GET /donations/campaigns
/// - GET /donations/campaigns/{slug}
/// - GET/POST /donations/campaigns/{slug}/pledges
pub fn build_donation_routes(state: AppState) -> Router {
    Router::new()
        .route("/donations/campaigns", get(donations::list_campaigns))
        .route("/donations/campaigns/{slug}", get(donations::get_campaign))
        .route(
            "/donations/campaigns/{slug}/pledges",
            get(donations::list_pledges).post(donations::create_pledge),
        )
        .with_state(state)
}

/// Build the admin routes
pub fn build_admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/admin/dashboard", get(admin::dashboard))
        .with_state(state)
}
