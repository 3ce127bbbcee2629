//! HTTP handlers for the admin dashboard

use crate::core::dashboard::DashboardSummary;
use crate::core::error::PortalResult;
use crate::server::host::AppState;
use axum::{Json, extract::State};
use chrono::Local;

/// GET /admin/dashboard
///
/// "Upcoming" is measured against the server's local clock, since event
/// start times carry no zone.
pub async fn dashboard(State(state): State<AppState>) -> PortalResult<Json<DashboardSummary>> {
    let summary = DashboardSummary::collect(
        state.roster.records(),
        state.events.as_ref(),
        state.donations.as_ref(),
        Local::now().naive_local(),
    )
    .await?;
    Ok(Json(summary))
}
