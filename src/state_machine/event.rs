//! Events that can occur in a conversation

use crate::llm::LlmError;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // Trainee events
    UserTurn { text: String },

    // Completion events
    CompletionReply { text: String },
    CompletionFailed { error: LlmError },

    // Timer events
    ConclusionDue,
}
