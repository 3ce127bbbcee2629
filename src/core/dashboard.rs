//! Admin dashboard figures

use crate::core::alumnus::Alumnus;
use crate::core::error::PortalResult;
use crate::core::service::{DonationService, EventService};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Headline numbers for the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_alumni: usize,
    pub published_events: usize,
    pub upcoming_events: usize,
    pub total_registrations: usize,
    pub total_raised: u64,
    /// Amount raised per campaign, in campaign order
    pub donation_distribution: Vec<CampaignShare>,
}

/// One slice of the donation distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignShare {
    pub slug: String,
    pub title: String,
    pub raised: u64,
}

impl DashboardSummary {
    /// Gather the summary from the roster and both services
    pub async fn collect(
        roster: &[Alumnus],
        events: &dyn EventService,
        donations: &dyn DonationService,
        now: NaiveDateTime,
    ) -> PortalResult<Self> {
        let all_events = events.list().await?;
        let upcoming = events.upcoming(now).await?;
        let campaigns = donations.campaigns().await?;

        let summary = Self {
            total_alumni: roster.len(),
            published_events: all_events.iter().filter(|e| e.is_published).count(),
            upcoming_events: upcoming.len(),
            total_registrations: all_events.iter().map(|e| e.registrations.len()).sum(),
            total_raised: campaigns
                .iter()
                .fold(0u64, |total, c| total.saturating_add(c.raised)),
            donation_distribution: campaigns
                .into_iter()
                .map(|c| CampaignShare {
                    slug: c.slug,
                    title: c.title,
                    raised: c.raised,
                })
                .collect(),
        };

        tracing::debug!(
            alumni = summary.total_alumni,
            upcoming = summary.upcoming_events,
            raised = summary.total_raised,
            "Dashboard summary collected"
        );

        Ok(summary)
    }
}
