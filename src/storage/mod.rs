//! Storage implementations: the read-only roster and in-memory services

pub mod in_memory;
pub mod roster;

pub use in_memory::{InMemoryDonationService, InMemoryEventService};
pub use roster::Roster;
