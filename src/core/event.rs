//! Alumni events, their edit form and registrations

use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::field::FieldFormat;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Kind of event, as offered by the event form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    #[default]
    Meetup,
    Webinar,
    Workshop,
    Cultural,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventCategory::Meetup => write!(f, "Meetup"),
            EventCategory::Webinar => write!(f, "Webinar"),
            EventCategory::Workshop => write!(f, "Workshop"),
            EventCategory::Cultural => write!(f, "Cultural"),
        }
    }
}

/// An alumni event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,

    pub title: String,

    /// Local date and time the event starts (venue time, no zone)
    pub starts_at: NaiveDateTime,

    /// Venue, or "Online"
    pub location: String,

    pub category: EventCategory,

    pub description: String,

    /// Unpublished events are drafts and do not accept registrations
    pub is_published: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,

    #[serde(default)]
    pub registrations: Vec<Registration>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Create an event from a validated draft
    pub fn from_draft(draft: EventDraft) -> Self {
        let now = Utc::now();
        let draft = draft.normalized();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            starts_at: draft.starts_at,
            location: draft.location,
            category: draft.category,
            description: draft.description,
            is_published: draft.is_published,
            poster: draft.poster,
            registrations: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields, keeping id and registrations
    pub fn apply(&mut self, draft: EventDraft) {
        let draft = draft.normalized();
        self.title = draft.title;
        self.starts_at = draft.starts_at;
        self.location = draft.location;
        self.category = draft.category;
        self.description = draft.description;
        self.is_published = draft.is_published;
        self.poster = draft.poster;
        self.touch();
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Whether this email is already on the registration list (ignoring case)
    pub fn is_registered(&self, email: &str) -> bool {
        self.registrations
            .iter()
            .any(|r| r.email.eq_ignore_ascii_case(email.trim()))
    }

    /// Case-insensitive title search; an empty term matches every event
    pub fn title_matches(&self, term: &str) -> bool {
        term.is_empty() || self.title.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Payload of the create/edit event form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,

    pub description: String,

    pub starts_at: NaiveDateTime,

    pub location: String,

    #[serde(default)]
    pub category: EventCategory,

    #[serde(default)]
    pub is_published: bool,

    #[serde(default)]
    pub poster: Option<String>,
}

impl EventDraft {
    /// Check required fields and the poster URL
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                errors.push(FieldValidationError::new(field, "must not be blank"));
            }
        }
        let poster = self.poster.as_deref().map(str::trim).unwrap_or_default();
        if !poster.is_empty() && !FieldFormat::Url.validate(poster) {
            errors.push(FieldValidationError::new("poster", "must be an http(s) URL"));
        }
        ValidationError::from_fields(errors)
    }

    fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();
        self.location = self.location.trim().to_string();
        self.poster = self
            .poster
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        self
    }
}

/// An attendee on an event's registration list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<i32>,
    pub registered_at: DateTime<Utc>,
}

/// Payload for registering to an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub batch: Option<i32>,
}

impl RegistrationRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldValidationError::new("name", "must not be blank"));
        }
        if !FieldFormat::Email.validate(self.email.trim()) {
            errors.push(FieldValidationError::new("email", "must be a valid email address"));
        }
        ValidationError::from_fields(errors)
    }

    /// Turn the request into a registration stamped now
    pub fn into_registration(self) -> Registration {
        Registration {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            batch: self.batch,
            registered_at: Utc::now(),
        }
    }
}
