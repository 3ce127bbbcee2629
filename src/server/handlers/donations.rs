//! HTTP handlers for donation campaigns and pledges

use crate::core::donation::{CampaignView, Pledge, PledgeRequest};
use crate::core::error::{DonationError, PortalResult};
use crate::server::host::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// GET /donations/campaigns
pub async fn list_campaigns(State(state): State<AppState>) -> PortalResult<Json<Vec<CampaignView>>> {
    let campaigns = state.donations.campaigns().await?;
    Ok(Json(campaigns.into_iter().map(CampaignView::from).collect()))
}

/// GET /donations/campaigns/{slug}
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> PortalResult<Json<CampaignView>> {
    let campaign = state
        .donations
        .campaign(&slug)
        .await?
        .ok_or(DonationError::CampaignNotFound { slug })?;
    Ok(Json(campaign.into()))
}

/// POST /donations/campaigns/{slug}/pledges
pub async fn create_pledge(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<PledgeRequest>,
) -> PortalResult<(StatusCode, Json<Pledge>)> {
    let pledge = state.donations.pledge(&slug, request).await?;
    Ok((StatusCode::CREATED, Json(pledge)))
}

/// GET /donations/campaigns/{slug}/pledges
pub async fn list_pledges(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> PortalResult<Json<Vec<Pledge>>> {
    Ok(Json(state.donations.pledges(&slug).await?))
}
