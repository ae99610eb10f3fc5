//! Exchange-agnostic domain logic.
//!
//! Everything here is pure: no I/O, no async. The adapters drive these types.

pub mod conversation;
pub mod id;
pub mod navigation;
pub mod plan;
pub mod portfolio;

pub use conversation::{
    ConversationAction, ConversationInput, ConversationState, AFFIRMATIVE_REPLY, NEGATIVE_REPLY,
};
pub use id::{ChatId, SessionId};
pub use navigation::{LoginOutcome, LoginTrigger, Route, UserStatus, View};
pub use plan::{PendingOrderPlan, PlanLine};
pub use portfolio::{Holding, Holdings, IndexWeights, OrderReport};
