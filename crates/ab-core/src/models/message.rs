//! A single chat message. Immutable after creation except for `text`, which
//! re-validates on every set.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: Uuid,
    chat_id: Uuid,
    sender_id: Uuid,
    text: String,
    sent_at: DateTime<Utc>,
}

fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "message text cannot be empty or whitespace".into(),
        ));
    }
    Ok(())
}

fn validate_id(field: &'static str, id: Uuid) -> Result<()> {
    if id.is_nil() {
        return Err(AppError::Validation(format!("{field} must be a valid id")));
    }
    Ok(())
}

impl Message {
    pub fn new(chat_id: Uuid, sender_id: Uuid, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        validate_id("chat id", chat_id)?;
        validate_id("sender id", sender_id)?;
        validate_text(&text)?;

        Ok(Self {
            id: Uuid::new_v4(),
            chat_id,
            sender_id,
            text,
            sent_at: Utc::now(),
        })
    }

    /// Rebuilds a message from persisted state.
    pub fn restore(
        id: Uuid,
        chat_id: Uuid,
        sender_id: Uuid,
        text: String,
        sent_at: DateTime<Utc>,
    ) -> Result<Self> {
        validate_id("chat id", chat_id)?;
        validate_id("sender id", sender_id)?;
        validate_text(&text)?;
        Ok(Self { id, chat_id, sender_id, text, sent_at })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn chat_id(&self) -> Uuid {
        self.chat_id
    }

    pub fn sender_id(&self) -> Uuid {
        self.sender_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        validate_text(&text)?;
        self.text = text;
        Ok(())
    }

    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_blank_text() {
        let err = Message::new(Uuid::new_v4(), Uuid::new_v4(), "  ");
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn new_rejects_nil_sender() {
        assert!(Message::new(Uuid::new_v4(), Uuid::nil(), "hi").is_err());
    }

    #[test]
    fn set_text_revalidates() {
        let mut message = Message::new(Uuid::new_v4(), Uuid::new_v4(), "hi").unwrap();
        assert!(message.set_text("").is_err());
        assert_eq!(message.text(), "hi");
        message.set_text("hello").unwrap();
        assert_eq!(message.text(), "hello");
    }
}
