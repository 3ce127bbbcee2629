//! Service traits for events and donations

use crate::core::donation::{Campaign, Pledge, PledgeRequest};
use crate::core::error::PortalResult;
use crate::core::event::{Event, EventDraft, Registration, RegistrationRequest};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

/// Service trait for the events manager
///
/// Implementations own the event list; handlers only ever see clones.
#[async_trait]
pub trait EventService: Send + Sync {
    /// Validate a draft and create an event; new events are listed first
    async fn create(&self, draft: EventDraft) -> PortalResult<Event>;

    /// Get an event by ID
    async fn get(&self, id: &Uuid) -> PortalResult<Option<Event>>;

    /// List all events, most recently created first
    async fn list(&self) -> PortalResult<Vec<Event>>;

    /// Events whose title contains `term`, ignoring case
    async fn search(&self, term: &str) -> PortalResult<Vec<Event>>;

    /// Replace the editable fields of an event
    async fn update(&self, id: &Uuid, draft: EventDraft) -> PortalResult<Event>;

    /// Delete an event
    async fn delete(&self, id: &Uuid) -> PortalResult<()>;

    /// Add an attendee to a published event
    async fn register(&self, id: &Uuid, request: RegistrationRequest) -> PortalResult<Event>;

    /// Registration list of an event
    async fn registrations(&self, id: &Uuid) -> PortalResult<Vec<Registration>>;

    /// Published events starting after `now`, soonest first
    async fn upcoming(&self, now: NaiveDateTime) -> PortalResult<Vec<Event>>;
}

/// Service trait for the donation ledger
#[async_trait]
pub trait DonationService: Send + Sync {
    /// All campaigns in configuration order
    async fn campaigns(&self) -> PortalResult<Vec<Campaign>>;

    /// Get a campaign by slug
    async fn campaign(&self, slug: &str) -> PortalResult<Option<Campaign>>;

    /// Record a pledge and add it to the campaign total
    async fn pledge(&self, slug: &str, request: PledgeRequest) -> PortalResult<Pledge>;

    /// Pledges made to a campaign, newest first
    async fn pledges(&self, slug: &str) -> PortalResult<Vec<Pledge>>;

    /// Sum raised across all campaigns, saturating at `u64::MAX`
    async fn total_raised(&self) -> PortalResult<u64> {
        Ok(self
            .campaigns()
            .await?
            .iter()
            .fold(0u64, |total, c| total.saturating_add(c.raised)))
    }
}
