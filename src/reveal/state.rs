//! Reveal state: identity, target text, progress, and lifecycle phase.

use super::error::ObserverError;
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// Stable identity of a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(String);

impl MessageId {
    /// Create an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for MessageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for MessageId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&MessageId> for MessageId {
    fn from(id: &MessageId) -> Self {
        id.clone()
    }
}

/// Why a reveal stopped before completing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    /// The caller asked for it.
    Requested,
    /// A different message took over the slot.
    Superseded {
        /// The message that replaced this one.
        by: MessageId,
    },
    /// The owning consumer was torn down.
    Teardown,
    /// The conversation was reset.
    SessionReset,
    /// A callback or observer failed while handling an event.
    ObserverFailed(ObserverError),
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requested => f.write_str("requested"),
            Self::Superseded { by } => write!(f, "superseded by {by}"),
            Self::Teardown => f.write_str("teardown"),
            Self::SessionReset => f.write_str("session reset"),
            Self::ObserverFailed(err) => write!(f, "{err}"),
        }
    }
}

/// Lifecycle of one reveal instance.
///
/// ```text
/// Idle ──▶ Running ──▶ Completed
///   │         │
///   └─────────┴──────▶ Cancelled
/// ```
///
/// `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Created, waiting for the initial deferral to elapse.
    Idle,
    /// Revealing one character per tick.
    Running,
    /// Every character was revealed.
    Completed,
    /// Stopped early.
    Cancelled(CancelReason),
}

impl Phase {
    /// `Idle` or `Running`: the reveal still owns a timer.
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Idle | Self::Running)
    }

    /// `Completed` or `Cancelled`.
    pub const fn is_terminal(&self) -> bool {
        !self.is_live()
    }
}

/// Progress of one message through its reveal.
///
/// The unit of progress is an extended grapheme cluster, so a partially
/// revealed prefix never ends in the middle of a visible character.
#[derive(Debug, Clone)]
pub struct RevealState {
    id: MessageId,
    full_text: String,
    /// Byte offset just past each grapheme of `full_text`.
    boundaries: Vec<usize>,
    revealed: usize,
}

impl RevealState {
    /// Create a state with nothing revealed yet.
    pub fn new(id: MessageId, full_text: String) -> Self {
        let boundaries = full_text
            .grapheme_indices(true)
            .map(|(offset, grapheme)| offset + grapheme.len())
            .collect();
        Self {
            id,
            full_text,
            boundaries,
            revealed: 0,
        }
    }

    /// Create a state with the whole text already revealed.
    pub fn fully_revealed(id: MessageId, full_text: String) -> Self {
        let mut state = Self::new(id, full_text);
        state.revealed = state.total();
        state
    }

    /// Identity of the message.
    pub const fn id(&self) -> &MessageId {
        &self.id
    }

    /// The complete target text.
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// Number of characters in the target text.
    pub fn total(&self) -> usize {
        self.boundaries.len()
    }

    /// Number of characters revealed so far.
    pub const fn revealed_len(&self) -> usize {
        self.revealed
    }

    /// The revealed prefix of the target text.
    pub fn prefix(&self) -> &str {
        match self.revealed {
            0 => "",
            n => &self.full_text[..self.boundaries[n - 1]],
        }
    }

    /// Whether every character has been revealed.
    pub fn is_fully_revealed(&self) -> bool {
        self.revealed == self.total()
    }

    /// Reveal one more character.
    ///
    /// Returns `false` (and changes nothing) if the text is already fully
    /// revealed.
    pub fn advance(&mut self) -> bool {
        if self.is_fully_revealed() {
            return false;
        }
        self.revealed += 1;
        true
    }
}
