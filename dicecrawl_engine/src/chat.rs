//! Chat log.
//!
//! An append-only record of everything said during one dungeon run. Game logic only ever writes
//! to it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sender {
    #[serde(rename = "GM")]
    Gm,
    Player,
    System,
}

/// Emotional color of a message, used by the view for accents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Normal,
    Success,
    Failure,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    /// Position in the log, starting at 1.
    pub seq: u64,
    pub sender: Sender,
    pub text: String,
    #[serde(rename = "type")]
    pub tone: Tone,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}
impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return it.
    pub fn push(&mut self, sender: Sender, text: impl Into<String>, tone: Tone) -> &ChatMessage {
        let seq = self.messages.len() as u64 + 1;
        self.messages.push(ChatMessage {
            id: Uuid::new_v4(),
            seq,
            sender,
            text: text.into(),
            tone,
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn gm(&mut self, text: impl Into<String>, tone: Tone) {
        self.push(Sender::Gm, text, tone);
    }

    pub fn player(&mut self, text: impl Into<String>) {
        self.push(Sender::Player, text, Tone::Normal);
    }

    pub fn system(&mut self, text: impl Into<String>) {
        self.push(Sender::System, text, Tone::Info);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Messages appended after the one with sequence number `seq`.
    pub fn since(&self, seq: u64) -> &[ChatMessage] {
        let start = usize::try_from(seq).unwrap_or(usize::MAX).min(self.messages.len());
        &self.messages[start..]
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
