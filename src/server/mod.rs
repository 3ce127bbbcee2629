//! HTTP server for the alumni portal
//!
//! `ServerBuilder` assembles a `ServerHost` from a roster, an events service
//! and a donation service, then exposes it over REST.

pub mod builder;
pub mod exposure;
pub mod handlers;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::{AppState, ServerHost};
