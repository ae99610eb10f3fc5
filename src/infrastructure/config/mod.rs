//! Infrastructure configuration modules.

pub mod dashboard;
pub mod logging;
pub mod paper;
pub mod retry;
pub mod savings_plan;
pub mod settings;
pub mod telegram;

pub use settings::Config;
