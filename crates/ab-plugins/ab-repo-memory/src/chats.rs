//! In-memory chat store. The "at most one chat per unordered pair and
//! advertisement" rule belongs to `messaging::start_chat`; this store only
//! provides the lookup that makes it enforceable.

use std::sync::Mutex;
use uuid::Uuid;

use ab_core::error::{AppError, Result};
use ab_core::models::{Chat, Message};
use ab_core::traits::{ChatRepo, Snapshot};

use crate::codec;
use crate::lock;

#[derive(Default)]
pub struct MemoryChatRepo {
    items: Mutex<Vec<Chat>>,
}

impl MemoryChatRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(id: Uuid) -> AppError {
        AppError::NotFound("chat", id.to_string())
    }
}

impl ChatRepo for MemoryChatRepo {
    fn add(&self, chat: Chat) -> Result<()> {
        lock(&self.items).push(chat);
        Ok(())
    }

    fn get_all(&self) -> Vec<Chat> {
        lock(&self.items).clone()
    }

    fn get_by_id(&self, id: Uuid) -> Option<Chat> {
        lock(&self.items).iter().find(|chat| chat.id() == id).cloned()
    }

    fn get_by_participant(&self, participant_id: Uuid) -> Vec<Chat> {
        lock(&self.items)
            .iter()
            .filter(|chat| chat.has_participant(participant_id))
            .cloned()
            .collect()
    }

    fn get_by_participants_and_advertisement(
        &self,
        participant_a: Uuid,
        participant_b: Uuid,
        advertisement_id: Uuid,
    ) -> Option<Chat> {
        lock(&self.items)
            .iter()
            .find(|chat| {
                chat.advertisement_id == advertisement_id
                    && chat.involves_pair(participant_a, participant_b)
            })
            .cloned()
    }

    fn append_message(&self, chat_id: Uuid, sender_id: Uuid, text: &str) -> Result<Message> {
        let mut items = lock(&self.items);
        let chat = items
            .iter_mut()
            .find(|chat| chat.id() == chat_id)
            .ok_or_else(|| Self::not_found(chat_id))?;
        chat.add_message(sender_id, text)
    }

    fn update(&self, chat: &Chat) -> Result<()> {
        let mut items = lock(&self.items);
        let stored = items
            .iter_mut()
            .find(|stored| stored.id() == chat.id())
            .ok_or_else(|| Self::not_found(chat.id()))?;
        // Re-points the pair and the advertisement; stored history stays.
        stored.advertisement_id = chat.advertisement_id;
        stored.set_participants(chat.participants())?;
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        let mut items = lock(&self.items);
        let position = items
            .iter()
            .position(|chat| chat.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        items.remove(position);
        Ok(())
    }
}

impl Snapshot for MemoryChatRepo {
    fn serialize_all(&self) -> Result<String> {
        codec::chats_to_json(&lock(&self.items))
    }

    fn deserialize_all(&self, json: &str) -> Result<()> {
        let mut items = lock(&self.items);
        items.clear();
        *items = codec::chats_from_json(json)?;
        Ok(())
    }
}
