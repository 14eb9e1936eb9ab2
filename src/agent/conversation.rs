//! Bounded conversation history
//!
//! A [`Conversation`] is an ordered list of turns whose first element is the
//! system instruction. Trimming keeps that element plus the most recent
//! `max_history` turns, so the history never grows past `1 + max_history`.

use crate::providers::{Role, Turn};
use serde::{Deserialize, Serialize};

/// Ordered turns of one session
///
/// Serializes as a plain JSON array of turns.
///
/// # Examples
///
/// ```
/// use profile_assistant::agent::Conversation;
/// use profile_assistant::providers::Turn;
///
/// let mut conversation = Conversation::new();
/// conversation.ensure_system("be brief");
/// for i in 0..6 {
///     conversation.push(Turn::user(format!("q{}", i)));
/// }
/// conversation.trim(4);
/// assert_eq!(conversation.len(), 5);
/// assert!(conversation.turns()[0].is_system());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Creates an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps existing turns without validating them
    ///
    /// Externally supplied histories may lack the system turn; the
    /// conversation manager heals that on the next turn.
    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of non-system turns
    pub fn message_count(&self) -> usize {
        self.turns.iter().filter(|t| !t.is_system()).count()
    }

    /// Appends a turn
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Guarantees the system instruction leads the conversation
    ///
    /// Seeds an empty conversation, or inserts the instruction at position 0
    /// when the first turn is not a system turn. Returns true when a turn was
    /// added.
    pub fn ensure_system(&mut self, instruction: &str) -> bool {
        match self.turns.first() {
            Some(first) if first.is_system() => false,
            _ => {
                self.turns.insert(0, Turn::system(instruction));
                true
            }
        }
    }

    /// Keeps the first turn plus the last `max_history` turns
    pub fn trim(&mut self, max_history: usize) {
        if self.turns.len() <= max_history + 1 {
            return;
        }
        let tail_start = self.turns.len() - max_history;
        self.turns.drain(1..tail_start);
    }

    /// Splits into the system instruction and the turns that follow it
    ///
    /// Without a leading system turn the instruction is empty and every turn
    /// is returned.
    pub fn split_system(&self) -> (&str, &[Turn]) {
        match self.turns.split_first() {
            Some((first, rest)) if first.role() == Role::System => (first.text(), rest),
            _ => ("", &self.turns),
        }
    }
}
