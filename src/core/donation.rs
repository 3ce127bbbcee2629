//! Donation campaigns and pledges

use crate::core::error::{FieldValidationError, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fundraising campaign
///
/// Amounts are whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// URL-safe identifier (e.g., "scholarships")
    pub slug: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub raised: u64,

    pub target: u64,
}

impl Campaign {
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        raised: u64,
        target: u64,
    ) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            description: String::new(),
            raised,
            target,
        }
    }

    /// Share of the target raised so far, in percent
    ///
    /// Not capped: an over-funded campaign reports more than 100.
    pub fn progress_percent(&self) -> f64 {
        if self.target == 0 {
            0.0
        } else {
            self.raised as f64 / self.target as f64 * 100.0
        }
    }

    /// Amount still needed to reach the target
    pub fn remaining(&self) -> u64 {
        self.target.saturating_sub(self.raised)
    }
}

/// Campaign as returned over the API, with derived progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignView {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub progress_percent: f64,
    pub remaining: u64,
}

impl From<Campaign> for CampaignView {
    fn from(campaign: Campaign) -> Self {
        Self {
            progress_percent: campaign.progress_percent(),
            remaining: campaign.remaining(),
            campaign,
        }
    }
}

/// Payload of the donation form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PledgeRequest {
    pub amount: u64,
    #[serde(default)]
    pub donor: Option<String>,
}

impl PledgeRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        if self.amount == 0 {
            errors.push(FieldValidationError::new("amount", "must be greater than zero"));
        }
        ValidationError::from_fields(errors)
    }
}

/// A recorded pledge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pledge {
    pub id: Uuid,
    pub campaign: String,
    pub amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor: Option<String>,
    pub pledged_at: DateTime<Utc>,
}

impl Pledge {
    pub fn new(campaign: impl Into<String>, request: PledgeRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            campaign: campaign.into(),
            amount: request.amount,
            donor: request
                .donor
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            pledged_at: Utc::now(),
        }
    }
}
