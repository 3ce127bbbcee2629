//! Server host holding the state shared by every handler

use crate::core::query::SortSpec;
use crate::core::service::{DonationService, EventService};
use crate::storage::Roster;
use std::sync::Arc;

/// Host context containing all portal state
///
/// Transport-agnostic: the REST exposure wraps it in an `Arc` and hands it
/// to every handler as axum state.
pub struct ServerHost {
    /// Read-only alumni roster
    pub roster: Roster,

    /// Events manager
    pub events: Arc<dyn EventService>,

    /// Donation ledger
    pub donations: Arc<dyn DonationService>,

    /// Sort used when a directory request does not name one
    pub default_sort: SortSpec,

    /// Largest page size a client may request
    pub max_page_size: usize,
}

/// Application state shared across handlers
pub type AppState = Arc<ServerHost>;
