//! Control markers embedded in completion replies
//!
//! The only machine-readable signal in a reply is one of two literal tokens,
//! matched anywhere in the text. Everything else is free-form and untouched.

use super::state::Outcome;

pub const SALE_CLOSED: &str = "[VENDA_FECHADA]";
pub const SALE_LOST: &str = "[VENDA_PERDIDA]";

/// A reply split into what the trainee sees and the signal it carried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub outcome: Option<Outcome>,
    pub visible: String,
}

pub fn marker(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Sold => SALE_CLOSED,
        Outcome::Lost => SALE_LOST,
    }
}

/// Scan a raw reply for a conclusion marker.
///
/// When both markers occur, the one appearing first decides the outcome and
/// the other stays in the visible text. Only the deciding marker is removed,
/// and the text around it is rejoined and trimmed. Without a marker the reply
/// is returned byte-for-byte.
pub fn detect(reply: &str) -> Detection {
    let first = [Outcome::Sold, Outcome::Lost]
        .into_iter()
        .filter_map(|outcome| reply.find(marker(outcome)).map(|pos| (pos, outcome)))
        .min_by_key(|(pos, _)| *pos);

    let Some((_, outcome)) = first else {
        return Detection {
            outcome: None,
            visible: reply.to_string(),
        };
    };

    let visible = reply
        .split(marker(outcome))
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    Detection {
        outcome: Some(outcome),
        visible,
    }
}
