//! In-memory implementations of the event and donation services

use crate::core::donation::{Campaign, Pledge, PledgeRequest};
use crate::core::error::{DonationError, EventError, PortalError, PortalResult};
use crate::core::event::{Event, EventDraft, Registration, RegistrationRequest};
use crate::core::service::{DonationService, EventService};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

fn read<T>(lock: &RwLock<T>) -> PortalResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| PortalError::Internal(format!("Failed to acquire read lock: {}", e)))
}

fn write<T>(lock: &RwLock<T>) -> PortalResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| PortalError::Internal(format!("Failed to acquire write lock: {}", e)))
}

/// In-memory event service
///
/// Events are kept newest first, matching how the events page lists them.
#[derive(Clone, Default)]
pub struct InMemoryEventService {
    events: Arc<RwLock<Vec<Event>>>,
}

impl InMemoryEventService {
    /// Create an empty event service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service holding existing events, in the given order
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: Arc::new(RwLock::new(events)),
        }
    }
}

#[async_trait]
impl EventService for InMemoryEventService {
    async fn create(&self, draft: EventDraft) -> PortalResult<Event> {
        draft.validate()?;
        let event = Event::from_draft(draft);

        let mut events = write(&self.events)?;
        events.insert(0, event.clone());

        tracing::info!(event_id = %event.id, title = %event.title, "Event created");
        Ok(event)
    }

    async fn get(&self, id: &Uuid) -> PortalResult<Option<Event>> {
        let events = read(&self.events)?;
        Ok(events.iter().find(|e| &e.id == id).cloned())
    }

    async fn list(&self) -> PortalResult<Vec<Event>> {
        let events = read(&self.events)?;
        Ok(events.clone())
    }

    async fn search(&self, term: &str) -> PortalResult<Vec<Event>> {
        let events = read(&self.events)?;
        Ok(events
            .iter()
            .filter(|e| e.title_matches(term))
            .cloned()
            .collect())
    }

    async fn update(&self, id: &Uuid, draft: EventDraft) -> PortalResult<Event> {
        draft.validate()?;

        let mut events = write(&self.events)?;
        let event = events
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or(EventError::NotFound { id: *id })?;
        event.apply(draft);

        tracing::info!(event_id = %id, "Event updated");
        Ok(event.clone())
    }

    async fn delete(&self, id: &Uuid) -> PortalResult<()> {
        let mut events = write(&self.events)?;
        let before = events.len();
        events.retain(|e| &e.id != id);
        if events.len() == before {
            return Err(EventError::NotFound { id: *id }.into());
        }

        tracing::info!(event_id = %id, "Event deleted");
        Ok(())
    }

    async fn register(&self, id: &Uuid, request: RegistrationRequest) -> PortalResult<Event> {
        request.validate()?;

        let mut events = write(&self.events)?;
        let event = events
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or(EventError::NotFound { id: *id })?;

        if !event.is_published {
            return Err(EventError::NotPublished { id: *id }.into());
        }
        if event.is_registered(&request.email) {
            return Err(EventError::AlreadyRegistered {
                id: *id,
                email: request.email.trim().to_string(),
            }
            .into());
        }

        event.registrations.push(request.into_registration());
        event.touch();

        tracing::info!(
            event_id = %id,
            registrations = event.registrations.len(),
            "Registration added"
        );
        Ok(event.clone())
    }

    async fn registrations(&self, id: &Uuid) -> PortalResult<Vec<Registration>> {
        let events = read(&self.events)?;
        events
            .iter()
            .find(|e| &e.id == id)
            .map(|e| e.registrations.clone())
            .ok_or_else(|| EventError::NotFound { id: *id }.into())
    }

    async fn upcoming(&self, now: NaiveDateTime) -> PortalResult<Vec<Event>> {
        let events = read(&self.events)?;
        let mut upcoming: Vec<Event> = events
            .iter()
            .filter(|e| e.is_published && e.starts_at > now)
            .cloned()
            .collect();
        upcoming.sort_by_key(|e| e.starts_at);
        Ok(upcoming)
    }
}

#[derive(Default)]
struct Ledger {
    campaigns: Vec<Campaign>,
    pledges: HashMap<String, Vec<Pledge>>,
}

/// In-memory donation ledger
#[derive(Clone, Default)]
pub struct InMemoryDonationService {
    ledger: Arc<RwLock<Ledger>>,
    max_pledge: Option<u64>,
}

impl InMemoryDonationService {
    /// Create a ledger over the given campaigns
    pub fn new(campaigns: Vec<Campaign>) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(Ledger {
                campaigns,
                pledges: HashMap::new(),
            })),
            max_pledge: None,
        }
    }

    /// Reject pledges above `max`
    pub fn with_max_pledge(mut self, max: Option<u64>) -> Self {
        self.max_pledge = max;
        self
    }
}

#[async_trait]
impl DonationService for InMemoryDonationService {
    async fn campaigns(&self) -> PortalResult<Vec<Campaign>> {
        let ledger = read(&self.ledger)?;
        Ok(ledger.campaigns.clone())
    }

    async fn campaign(&self, slug: &str) -> PortalResult<Option<Campaign>> {
        let ledger = read(&self.ledger)?;
        Ok(ledger.campaigns.iter().find(|c| c.slug == slug).cloned())
    }

    async fn pledge(&self, slug: &str, request: PledgeRequest) -> PortalResult<Pledge> {
        request.validate()?;
        if let Some(max) = self.max_pledge {
            if request.amount > max {
                return Err(DonationError::AboveMaximum {
                    amount: request.amount,
                    max,
                }
                .into());
            }
        }

        let mut ledger = write(&self.ledger)?;
        let campaign = ledger
            .campaigns
            .iter_mut()
            .find(|c| c.slug == slug)
            .ok_or_else(|| DonationError::CampaignNotFound {
                slug: slug.to_string(),
            })?;
        campaign.raised = campaign.raised.saturating_add(request.amount);
        let raised = campaign.raised;

        let pledge = Pledge::new(slug, request);
        ledger
            .pledges
            .entry(slug.to_string())
            .or_default()
            .push(pledge.clone());

        tracing::info!(campaign = slug, amount = pledge.amount, raised, "Pledge recorded");
        Ok(pledge)
    }

    async fn pledges(&self, slug: &str) -> PortalResult<Vec<Pledge>> {
        let ledger = read(&self.ledger)?;
        if !ledger.campaigns.iter().any(|c| c.slug == slug) {
            return Err(DonationError::CampaignNotFound {
                slug: slug.to_string(),
            }
            .into());
        }

        let mut pledges = ledger.pledges.get(slug).cloned().unwrap_or_default();
        pledges.reverse();
        Ok(pledges)
    }
}
