//! HTTP handlers, one module per portal area

pub mod admin;
pub mod directory;
pub mod donations;
pub mod events;
