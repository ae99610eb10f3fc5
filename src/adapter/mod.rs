//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Telegram and web dashboard surfaces
//! - [`outbound`] - Paper exchange and holdings analytics

pub mod inbound;
pub mod outbound;
