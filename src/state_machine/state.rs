//! Conversation state types

use crate::llm::LlmMessage;
use crate::persona::{self, Difficulty, Product};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Outcome and Turns
// ============================================================================

/// How a concluded conversation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Sold,
    Lost,
}

impl Outcome {
    /// Text of the verdict entry shown once the conversation concludes
    pub fn banner(self) -> &'static str {
        match self {
            Outcome::Sold => "🎉 Venda fechada! Parabéns, você convenceu o cliente.",
            Outcome::Lost => "❌ Venda perdida. O cliente desistiu da conversa.",
        }
    }
}

/// One entry in the conversation timeline. Never modified once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Turn {
    /// Line spoken by the simulated customer
    Customer { text: String },
    /// Line typed by the trainee
    Salesperson { text: String },
    /// Synthetic closing entry carrying the outcome
    Verdict { outcome: Outcome, text: String },
}

impl Turn {
    pub fn customer(text: impl Into<String>) -> Self {
        Turn::Customer { text: text.into() }
    }

    pub fn salesperson(text: impl Into<String>) -> Self {
        Turn::Salesperson { text: text.into() }
    }

    pub fn verdict(outcome: Outcome) -> Self {
        Turn::Verdict {
            outcome,
            text: outcome.banner().to_string(),
        }
    }

    /// Dialogue message for the model; the customer is the model's own voice
    pub fn to_llm_message(&self) -> Option<LlmMessage> {
        match self {
            Turn::Customer { text } => Some(LlmMessage::assistant(text.clone())),
            Turn::Salesperson { text } => Some(LlmMessage::user(text.clone())),
            Turn::Verdict { .. } => None,
        }
    }
}

// ============================================================================
// Conversation State
// ============================================================================

/// Coarse phase exposed to readers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Active,
    Concluding,
    Concluded,
}

/// Conversation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConvState {
    /// Ready for the trainee's next line
    #[default]
    Active,

    /// Trainee line sent, completion request in flight
    AwaitingReply,

    /// Marker seen; the verdict is appended after a short pause
    Concluding { outcome: Outcome },

    /// Terminal
    Concluded { outcome: Outcome },
}

impl ConvState {
    pub fn phase(self) -> Phase {
        match self {
            ConvState::Active | ConvState::AwaitingReply => Phase::Active,
            ConvState::Concluding { .. } => Phase::Concluding,
            ConvState::Concluded { .. } => Phase::Concluded,
        }
    }

    /// Recorded outcome; only present once concluded
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            ConvState::Concluded { outcome } => Some(outcome),
            _ => None,
        }
    }

    pub fn is_awaiting_reply(self) -> bool {
        matches!(self, ConvState::AwaitingReply)
    }
}

/// Turn log plus state, owned by exactly one runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub turns: Vec<Turn>,
    pub state: ConvState,
}

impl Conversation {
    /// Fresh conversation seeded with the persona's opening line
    pub fn new(difficulty: Difficulty, product: Product) -> Self {
        Self {
            turns: vec![Turn::customer(persona::greeting(difficulty, product))],
            state: ConvState::Active,
        }
    }
}

/// Context for a conversation (immutable configuration)
#[derive(Debug, Clone)]
pub struct ConvContext {
    pub conversation_id: String,
    pub difficulty: Difficulty,
    pub product: Product,
    pub conclusion_delay: Duration,
}

/// Presentational pause before the verdict entry
pub const DEFAULT_CONCLUSION_DELAY: Duration = Duration::from_millis(500);

impl ConvContext {
    pub fn new(conversation_id: impl Into<String>, difficulty: Difficulty, product: Product) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            difficulty,
            product,
            conclusion_delay: DEFAULT_CONCLUSION_DELAY,
        }
    }

    #[must_use]
    pub fn with_conclusion_delay(mut self, delay: Duration) -> Self {
        self.conclusion_delay = delay;
        self
    }
}
