//! A per-advertisement conversation between exactly two registered users.
//!
//! Messages are append-only; insertion order is send order. At most one chat
//! exists per (unordered participant pair, advertisement), enforced by
//! lookup before creation in `messaging::start_chat`, not by the repository.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::Message;

#[derive(Debug, Clone, PartialEq)]
pub struct Chat {
    id: Uuid,
    pub advertisement_id: Uuid,
    participants: (Uuid, Uuid),
    created_at: DateTime<Utc>,
    messages: Vec<Message>,
}

fn validate_participants(participants: (Uuid, Uuid)) -> Result<()> {
    if participants.0.is_nil() || participants.1.is_nil() {
        return Err(AppError::Validation(
            "participant ids must be valid ids".into(),
        ));
    }
    if participants.0 == participants.1 {
        return Err(AppError::Validation(
            "a chat needs two distinct participants".into(),
        ));
    }
    Ok(())
}

impl Chat {
    pub fn new(advertisement_id: Uuid, participants: (Uuid, Uuid)) -> Result<Self> {
        validate_participants(participants)?;
        Ok(Self {
            id: Uuid::new_v4(),
            advertisement_id,
            participants,
            created_at: Utc::now(),
            messages: Vec::new(),
        })
    }

    /// Rebuilds a chat, messages included, from persisted state.
    pub fn restore(
        id: Uuid,
        advertisement_id: Uuid,
        participants: (Uuid, Uuid),
        created_at: DateTime<Utc>,
        messages: Vec<Message>,
    ) -> Result<Self> {
        validate_participants(participants)?;
        Ok(Self { id, advertisement_id, participants, created_at, messages })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn participants(&self) -> (Uuid, Uuid) {
        self.participants
    }

    /// Re-points the unordered pair, revalidating it.
    pub fn set_participants(&mut self, participants: (Uuid, Uuid)) -> Result<()> {
        validate_participants(participants)?;
        self.participants = participants;
        Ok(())
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn has_participant(&self, id: Uuid) -> bool {
        self.participants.0 == id || self.participants.1 == id
    }

    /// Order-independent match on the unordered participant pair.
    pub fn involves_pair(&self, a: Uuid, b: Uuid) -> bool {
        (self.participants.0 == a && self.participants.1 == b)
            || (self.participants.0 == b && self.participants.1 == a)
    }

    /// Appends a message sent by `sender_id`. Only the two participants may
    /// post.
    pub fn add_message(&mut self, sender_id: Uuid, text: impl Into<String>) -> Result<Message> {
        if !self.has_participant(sender_id) {
            return Err(AppError::Conflict(
                "sender is not a participant in this chat".into(),
            ));
        }
        let message = Message::new(self.id, sender_id, text)?;
        self.messages.push(message.clone());
        Ok(message)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The full history as an owned copy, in send order.
    pub fn history(&self) -> Vec<Message> {
        self.messages.clone()
    }
}
