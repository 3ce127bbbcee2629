//! Core module containing the directory engine, domain types and service traits

pub mod alumnus;
pub mod dashboard;
pub mod donation;
pub mod engine;
pub mod error;
pub mod event;
pub mod field;
pub mod query;
pub mod service;
pub mod store;

pub use alumnus::Alumnus;
pub use dashboard::{CampaignShare, DashboardSummary};
pub use donation::{Campaign, CampaignView, Pledge, PledgeRequest};
pub use engine::{FilterOptions, evaluate};
pub use error::{PortalError, PortalResult};
pub use event::{Event, EventCategory, EventDraft, Registration, RegistrationRequest};
pub use field::{DirectoryField, FieldFormat, FieldValue, SortKey};
pub use query::{DirectoryQuery, FilterState, QueryParams, SortDirection, SortSpec};
pub use service::{DonationService, EventService};
pub use store::QueryableStore;
