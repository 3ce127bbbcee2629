//! REST API exposure for the portal
//!
//! The REST exposure consumes a `ServerHost` and produces an Axum `Router`.

use super::super::host::ServerHost;
use crate::server::router::{
    build_admin_routes, build_directory_routes, build_donation_routes, build_event_routes,
};
use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// # Arguments
    ///
    /// * `host` - The server host containing all portal state
    /// * `custom_routes` - Additional custom routes to merge
    /// * `cors` - Attach a permissive CORS layer
    ///
    /// # Returns
    ///
    /// Returns a fully configured Axum router with:
    /// - Health check routes
    /// - Directory, event, donation and admin routes
    /// - Custom routes
    /// - Request tracing
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>, cors: bool) -> Result<Router> {
        let mut app = Self::health_routes()
            .merge(build_directory_routes(host.clone()))
            .merge(build_event_routes(host.clone()))
            .merge(build_donation_routes(host.clone()))
            .merge(build_admin_routes(host));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        if cors {
            app = app.layer(CorsLayer::permissive());
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "alumni-portal"
        }))
    }
}
