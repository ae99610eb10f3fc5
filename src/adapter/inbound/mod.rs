//! Inbound adapters (driving side).

pub mod dashboard;
pub mod telegram;
