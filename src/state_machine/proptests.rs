//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::markers::{self, SALE_CLOSED, SALE_LOST};
use super::*;
use crate::llm::LlmError;
use crate::persona::{Difficulty, Product};
use proptest::prelude::*;
use std::time::Duration;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> ConvContext {
    ConvContext::new("test-conv", Difficulty::Easy, Product::Investments)
        .with_conclusion_delay(Duration::from_millis(5))
}

/// Apply a transition the way the runtime does: append turns, swap state
fn apply(conv: &mut Conversation, result: TransitionResult) {
    conv.turns.extend(result.appended_turns().cloned());
    conv.state = result.new_state;
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![Just(Outcome::Sold), Just(Outcome::Lost)]
}

fn arb_state() -> impl Strategy<Value = ConvState> {
    prop_oneof![
        Just(ConvState::Active),
        Just(ConvState::AwaitingReply),
        arb_outcome().prop_map(|outcome| ConvState::Concluding { outcome }),
        arb_outcome().prop_map(|outcome| ConvState::Concluded { outcome }),
    ]
}

/// Free text that never contains a marker
fn arb_plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.!?çãé]{0,60}"
}

fn arb_marker() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(SALE_CLOSED), Just(SALE_LOST)]
}

/// Reply with zero, one or two markers at arbitrary positions
fn arb_reply() -> impl Strategy<Value = String> {
    (
        arb_plain_text(),
        proptest::option::of(arb_marker()),
        arb_plain_text(),
        proptest::option::of(arb_marker()),
        arb_plain_text(),
    )
        .prop_map(|(a, m1, b, m2, c)| {
            format!("{a}{}{b}{}{c}", m1.unwrap_or(""), m2.unwrap_or(""))
        })
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_plain_text().prop_map(|text| Event::UserTurn { text }),
        arb_reply().prop_map(|text| Event::CompletionReply { text }),
        "[a-z ]{1,20}".prop_map(|m| Event::CompletionFailed {
            error: LlmError::unavailable(m)
        }),
        Just(Event::ConclusionDue),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Any event sequence leaves the machine in a well-formed state
    #[test]
    fn prop_state_stays_well_formed(events in proptest::collection::vec(arb_event(), 0..30)) {
        let ctx = test_context();
        let mut conv = Conversation::new(ctx.difficulty, ctx.product);

        for event in events {
            let before = conv.clone();
            if let Ok(result) = transition(&conv, &ctx, event) {
                apply(&mut conv, result);
            }

            prop_assert!(!conv.turns.is_empty());
            prop_assert!(conv.turns.len() >= before.turns.len());
            prop_assert_eq!(&conv.turns[..before.turns.len()], &before.turns[..]);
            prop_assert_eq!(conv.state.outcome().is_some(), conv.state.phase() == Phase::Concluded);
        }
    }

    /// Once concluded, nothing changes state or appends turns
    #[test]
    fn prop_concluded_is_terminal(outcome in arb_outcome(), event in arb_event()) {
        let ctx = test_context();
        let mut conv = Conversation::new(ctx.difficulty, ctx.product);
        conv.state = ConvState::Concluded { outcome };

        prop_assert!(transition(&conv, &ctx, event).is_err());
    }

    /// The outcome, once written, never changes
    #[test]
    fn prop_outcome_is_write_once(events in proptest::collection::vec(arb_event(), 0..40)) {
        let ctx = test_context();
        let mut conv = Conversation::new(ctx.difficulty, ctx.product);
        let mut recorded: Option<Outcome> = None;

        for event in events {
            if let Ok(result) = transition(&conv, &ctx, event) {
                apply(&mut conv, result);
            }
            if let Some(outcome) = conv.state.outcome() {
                if let Some(previous) = recorded {
                    prop_assert_eq!(previous, outcome);
                }
                recorded = Some(outcome);
            }
        }
    }

    /// Trainee lines are only accepted while Active
    #[test]
    fn prop_user_turn_only_when_active(state in arb_state(), text in "[a-zA-Z]{1,20}") {
        let ctx = test_context();
        let mut conv = Conversation::new(ctx.difficulty, ctx.product);
        conv.state = state;

        let result = transition(&conv, &ctx, Event::UserTurn { text });
        prop_assert_eq!(result.is_ok(), state == ConvState::Active);
        if let Err(err) = result {
            prop_assert!(err.is_ignorable());
        }
    }

    /// A non-blank trainee line from Active appends exactly one salesperson
    /// turn and exactly one completion request
    #[test]
    fn prop_user_turn_single_request(text in "[a-zA-Z]{1}[a-zA-Z ]{0,40}") {
        let ctx = test_context();
        let conv = Conversation::new(ctx.difficulty, ctx.product);
        let result = transition(&conv, &ctx, Event::UserTurn { text: text.clone() }).unwrap();

        prop_assert_eq!(result.new_state, ConvState::AwaitingReply);
        prop_assert_eq!(result.appended_turns().cloned().collect::<Vec<_>>(), vec![Turn::salesperson(text)]);
        prop_assert_eq!(
            result.effects.iter().filter(|e| matches!(e, Effect::RequestCompletion)).count(),
            1
        );
    }

    /// From AwaitingReply every reply lands in Active or Concluding
    #[test]
    fn prop_reply_is_total(reply in arb_reply()) {
        let ctx = test_context();
        let mut conv = Conversation::new(ctx.difficulty, ctx.product);
        conv.state = ConvState::AwaitingReply;

        let has_marker = reply.contains(SALE_CLOSED) || reply.contains(SALE_LOST);
        let result = transition(&conv, &ctx, Event::CompletionReply { text: reply.clone() }).unwrap();

        if has_marker {
            prop_assert_eq!(result.new_state.phase(), Phase::Concluding);
            prop_assert!(
                result.effects.iter().any(|e| matches!(e, Effect::ScheduleConclusion { .. })),
                "marker reply must schedule the verdict"
            );
        } else if reply.trim().is_empty() {
            prop_assert_eq!(result.new_state, ConvState::Active);
            prop_assert_eq!(result.appended_turns().count(), 0);
        } else {
            prop_assert_eq!(result.new_state, ConvState::Active);
            prop_assert_eq!(result.appended_turns().cloned().collect::<Vec<_>>(), vec![Turn::customer(reply)]);
        }
    }

    /// The deciding marker is the earliest one and never survives stripping
    #[test]
    fn prop_first_marker_decides(reply in arb_reply()) {
        let detection = markers::detect(&reply);
        let closed = reply.find(SALE_CLOSED);
        let lost = reply.find(SALE_LOST);

        let expected = match (closed, lost) {
            (Some(c), Some(l)) if c < l => Some(Outcome::Sold),
            (Some(_), Some(_)) | (None, Some(_)) => Some(Outcome::Lost),
            (Some(_), None) => Some(Outcome::Sold),
            (None, None) => None,
        };
        prop_assert_eq!(detection.outcome, expected);

        if let Some(outcome) = detection.outcome {
            prop_assert!(!detection.visible.contains(markers::marker(outcome)));
            prop_assert_eq!(detection.visible.trim(), detection.visible.as_str());
        }
    }
}
