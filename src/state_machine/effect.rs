//! Effects produced by state transitions

use super::state::Turn;
use std::time::Duration;

/// Notice shown to the trainee when a completion fails
pub const SEND_FAILED_NOTICE: &str = "Não foi possível enviar a mensagem. Tente novamente.";

/// Effects to be executed after state transition, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a turn to the log
    AppendTurn(Turn),

    /// Ask the completion service for the customer's reply (spawns as background task)
    RequestCompletion,

    /// Deliver `ConclusionDue` after `delay` unless the conversation is torn down first
    ScheduleConclusion { delay: Duration },

    /// Push the current snapshot to subscribers
    PublishSnapshot,

    /// Show a transient notice to the trainee
    Notify { message: String },
}

impl Effect {
    pub fn append(turn: Turn) -> Self {
        Effect::AppendTurn(turn)
    }

    pub fn send_failed() -> Self {
        Effect::Notify {
            message: SEND_FAILED_NOTICE.to_string(),
        }
    }
}
