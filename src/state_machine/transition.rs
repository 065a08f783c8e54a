//! Pure state transition function

use super::markers;
use super::{ConvContext, ConvState, Conversation, Effect, Event, Turn};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    /// Turns this transition appends, in order
    #[cfg(test)]
    pub fn appended_turns(&self) -> impl Iterator<Item = &Turn> {
        self.effects.iter().filter_map(|e| match e {
            Effect::AppendTurn(turn) => Some(turn),
            _ => None,
        })
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Empty message ignored")]
    EmptyTurn,
    #[error("A reply is already being generated")]
    AwaitingReply,
    #[error("Conversation is no longer accepting messages")]
    NotActive,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl TransitionError {
    /// Rejections that are expected from normal use and stay silent
    pub fn is_ignorable(&self) -> bool {
        !matches!(self, TransitionError::InvalidTransition(_))
    }
}

/// Pure transition function
///
/// Given the same inputs, it always produces the same outputs, with no I/O.
pub fn transition(
    conversation: &Conversation,
    context: &ConvContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (conversation.state, event) {
        // ============================================================
        // Trainee turns
        // ============================================================

        (ConvState::Active, Event::UserTurn { text }) if text.trim().is_empty() => {
            Err(TransitionError::EmptyTurn)
        }

        (ConvState::Active, Event::UserTurn { text }) => {
            Ok(TransitionResult::new(ConvState::AwaitingReply)
                .with_effect(Effect::append(Turn::salesperson(text)))
                .with_effect(Effect::PublishSnapshot)
                .with_effect(Effect::RequestCompletion))
        }

        // At most one completion in flight
        (ConvState::AwaitingReply, Event::UserTurn { .. }) => Err(TransitionError::AwaitingReply),

        (ConvState::Concluding { .. } | ConvState::Concluded { .. }, Event::UserTurn { .. }) => {
            Err(TransitionError::NotActive)
        }

        // ============================================================
        // Completion results
        // ============================================================

        // Nothing to show; treated like a malformed response
        (ConvState::AwaitingReply, Event::CompletionReply { text }) if text.trim().is_empty() => {
            Ok(TransitionResult::new(ConvState::Active)
                .with_effect(Effect::send_failed())
                .with_effect(Effect::PublishSnapshot))
        }

        (ConvState::AwaitingReply, Event::CompletionReply { text }) => {
            let detection = markers::detect(&text);
            match detection.outcome {
                None => Ok(TransitionResult::new(ConvState::Active)
                    .with_effect(Effect::append(Turn::customer(text)))
                    .with_effect(Effect::PublishSnapshot)),
                Some(outcome) => {
                    let residual = (!detection.visible.is_empty())
                        .then(|| Effect::append(Turn::customer(detection.visible)));
                    Ok(TransitionResult::new(ConvState::Concluding { outcome })
                        .with_effects(residual)
                        .with_effect(Effect::PublishSnapshot)
                        .with_effect(Effect::ScheduleConclusion {
                            delay: context.conclusion_delay,
                        }))
                }
            }
        }

        // Failed salesperson turn stays in the log so it can be resent
        (ConvState::AwaitingReply, Event::CompletionFailed { .. }) => {
            Ok(TransitionResult::new(ConvState::Active)
                .with_effect(Effect::send_failed())
                .with_effect(Effect::PublishSnapshot))
        }

        // ============================================================
        // Conclusion
        // ============================================================

        (ConvState::Concluding { outcome }, Event::ConclusionDue) => {
            Ok(TransitionResult::new(ConvState::Concluded { outcome })
                .with_effect(Effect::append(Turn::verdict(outcome)))
                .with_effect(Effect::PublishSnapshot))
        }

        // ============================================================
        // Invalid Transitions
        // ============================================================

        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {state:?} with event {event:?}"
        ))),
    }
}
