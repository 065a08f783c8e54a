//! Conversation state machine
//!
//! Pure transitions in the Elm Architecture style: the runtime feeds events
//! in, applies the returned effects, and never mutates state any other way.

mod effect;
pub mod event;
pub mod markers;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
#[cfg(test)]
pub use effect::SEND_FAILED_NOTICE;
pub use event::Event;
pub use state::{ConvContext, ConvState, Conversation, Outcome, Phase, Turn};
pub use transition::transition;
#[cfg(test)]
pub use transition::TransitionResult;
