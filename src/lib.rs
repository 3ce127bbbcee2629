//! # Alumni Portal
//!
//! Query engine and HTTP service for an alumni directory.
//!
//! ## Features
//!
//! - **Directory queries**: free-text search, per-field inclusion filters and
//!   stable sorting over a read-only roster
//! - **Filter options**: distinct values per filterable field, derived from the roster
//! - **Events**: create, edit and publish events, and take registrations
//! - **Donations**: campaigns with progress tracking and pledges
//! - **Dashboard**: portal-wide summary for administrators
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use alumni::prelude::*;
//!
//! let roster = Roster::from_file("alumni.yaml")?;
//!
//! let query = DirectoryQuery::new()
//!     .with_search("atlantis")
//!     .with_filter("batch", ["2004"])?
//!     .sorted_by("name", SortDirection::Ascending)?;
//!
//! for alumnus in roster.evaluate(&query) {
//!     println!("{}", alumnus.headline());
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Directory ===
    pub use crate::core::{
        alumnus::Alumnus,
        engine::{FilterOptions, evaluate},
        field::{DirectoryField, FieldFormat, FieldValue},
        query::{
            DirectoryQuery, FilterState, PaginatedResponse, PaginationMeta, QueryParams,
            SortDirection, SortSpec,
        },
        store::QueryableStore,
    };

    // === Events, donations and dashboard ===
    pub use crate::core::{
        dashboard::{CampaignShare, DashboardSummary},
        donation::{Campaign, CampaignView, Pledge, PledgeRequest},
        event::{Event, EventCategory, EventDraft, Registration, RegistrationRequest},
        service::{DonationService, EventService},
    };

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, DonationError, EventError, PortalError, PortalResult, QueryError,
        RosterError, ValidationError,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryDonationService, InMemoryEventService, Roster};

    // === Configuration ===
    pub use crate::config::{DirectoryConfig, DonationConfig, PortalConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === Re-exports from dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{NaiveDateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
