//! Web dashboard with session-based login.
//!
//! # Modules
//!
//! - [`session`] - Signed-cookie session store
//! - [`login`] - Credential checks for the login form
//! - [`router`] - Path + session to view routing
//! - [`refresh`] - Timer-driven chart refresh
//! - [`view`] - HTML rendering
//! - [`server`] - Axum routes

pub mod login;
pub mod refresh;
pub mod router;
pub mod server;
pub mod session;
pub mod view;

pub use login::{LoginForm, StaticCredentials};
pub use refresh::{spawn_refresh, ChartCache, RefreshSchedule, RefreshTasks, Widget};
pub use router::{Navigation, SessionRouter};
pub use server::{build_router, serve, DashboardState};
pub use session::{spawn_sweeper, SessionStore, SESSION_COOKIE};
