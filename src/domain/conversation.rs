//! Savings-plan conversation state machine.
//!
//! The machine is pure: [`ConversationState::apply`] maps a state and an
//! input to the next state plus the [`ConversationAction`] the caller must
//! perform. Side effects (fetching weights, submitting orders, replying) live
//! in the Telegram adapter.

/// Reply that confirms a presented plan.
pub const AFFIRMATIVE_REPLY: &str = "Yes, sounds great!";

/// Reply that rejects a presented plan.
pub const NEGATIVE_REPLY: &str = "Noo!";

/// Per-chat conversation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConversationState {
    #[default]
    Idle,
    /// A plan was presented and awaits an explicit yes/no.
    Planning,
}

/// Inputs that drive the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationInput {
    /// `/savings_plan`; also re-enters the flow while planning.
    StartPlan,
    /// Exactly [`AFFIRMATIVE_REPLY`].
    Confirm,
    /// Exactly [`NEGATIVE_REPLY`].
    Reject,
    /// Any other free text.
    Unrecognized,
    /// `/cancel`, valid from any state.
    Cancel,
    /// The exchange failed while the plan was computed or executed.
    Failed,
}

impl ConversationInput {
    /// Classify free text received from the user.
    #[must_use]
    pub fn from_reply(text: &str) -> Self {
        match text {
            AFFIRMATIVE_REPLY => Self::Confirm,
            NEGATIVE_REPLY => Self::Reject,
            _ => Self::Unrecognized,
        }
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationAction {
    /// Compute the plan and ask for confirmation.
    PresentPlan,
    /// Submit the confirmed plan to the exchange.
    SubmitOrder,
    /// Acknowledge that the plan was declined.
    AcknowledgeRejection,
    /// Ask again; the state does not advance.
    Reprompt,
    /// Acknowledge `/cancel` and clear the keyboard.
    AcknowledgeCancel,
    /// The conversation does not consume this input.
    Pass,
    /// Nothing to do beyond the state change.
    Reset,
}

impl ConversationState {
    /// Apply one input and return the next state with its side effect.
    #[must_use]
    pub fn apply(self, input: ConversationInput) -> (Self, ConversationAction) {
        use ConversationAction as A;
        use ConversationInput as I;

        match (self, input) {
            (_, I::StartPlan) => (Self::Planning, A::PresentPlan),
            (_, I::Cancel) => (Self::Idle, A::AcknowledgeCancel),
            (_, I::Failed) => (Self::Idle, A::Reset),
            (Self::Planning, I::Confirm) => (Self::Idle, A::SubmitOrder),
            (Self::Planning, I::Reject) => (Self::Idle, A::AcknowledgeRejection),
            (Self::Planning, I::Unrecognized) => (Self::Planning, A::Reprompt),
            (Self::Idle, I::Confirm | I::Reject | I::Unrecognized) => (Self::Idle, A::Pass),
        }
    }

    #[must_use]
    pub fn is_planning(self) -> bool {
        self == Self::Planning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_plan_from_idle_enters_planning() {
        let (state, action) = ConversationState::Idle.apply(ConversationInput::StartPlan);
        assert_eq!(state, ConversationState::Planning);
        assert_eq!(action, ConversationAction::PresentPlan);
    }

    #[test]
    fn start_plan_while_planning_restarts() {
        let (state, action) = ConversationState::Planning.apply(ConversationInput::StartPlan);
        assert_eq!(state, ConversationState::Planning);
        assert_eq!(action, ConversationAction::PresentPlan);
    }

    #[test]
    fn confirm_submits_and_returns_to_idle() {
        let (state, action) = ConversationState::Planning.apply(ConversationInput::Confirm);
        assert_eq!(state, ConversationState::Idle);
        assert_eq!(action, ConversationAction::SubmitOrder);
    }

    #[test]
    fn reject_returns_to_idle_without_order() {
        let (state, action) = ConversationState::Planning.apply(ConversationInput::Reject);
        assert_eq!(state, ConversationState::Idle);
        assert_eq!(action, ConversationAction::AcknowledgeRejection);
    }

    #[test]
    fn confirm_in_idle_is_not_consumed() {
        let (state, action) = ConversationState::Idle.apply(ConversationInput::Confirm);
        assert_eq!(state, ConversationState::Idle);
        assert_eq!(action, ConversationAction::Pass);
    }

    #[test]
    fn cancel_and_failure_reset_from_any_state() {
        for state in [ConversationState::Idle, ConversationState::Planning] {
            assert_eq!(state.apply(ConversationInput::Cancel).0, ConversationState::Idle);
            assert_eq!(state.apply(ConversationInput::Failed).0, ConversationState::Idle);
        }
    }

    #[test]
    fn hundred_unrecognized_replies_never_advance() {
        let mut state = ConversationState::Planning;
        for _ in 0..100 {
            let (next, action) = state.apply(ConversationInput::from_reply("maybe later"));
            assert_eq!(action, ConversationAction::Reprompt);
            state = next;
        }
        assert_eq!(state, ConversationState::Planning);
    }

    #[test]
    fn reply_classification_is_exact() {
        assert_eq!(
            ConversationInput::from_reply("Yes, sounds great!"),
            ConversationInput::Confirm
        );
        assert_eq!(ConversationInput::from_reply("Noo!"), ConversationInput::Reject);
        assert_eq!(
            ConversationInput::from_reply("yes, sounds great!"),
            ConversationInput::Unrecognized
        );
        assert_eq!(
            ConversationInput::from_reply("Noo! "),
            ConversationInput::Unrecognized
        );
    }
}
