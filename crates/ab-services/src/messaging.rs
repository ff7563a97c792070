//! Per-advertisement conversations. At most one chat exists per unordered
//! participant pair and advertisement; `start_chat` enforces that by looking
//! the pair up before creating anything.

use uuid::Uuid;

use ab_core::error::Result;
use ab_core::models::{Chat, Message};
use ab_core::traits::ChatRepo;

/// Opens (or re-opens) the conversation between `initiator` and `other`
/// about an advertisement. When the pair already talks about that listing,
/// the existing chat is returned instead of a second one.
pub fn start_chat(
    chats: &impl ChatRepo,
    advertisement_id: Uuid,
    initiator: Uuid,
    other: Uuid,
) -> Result<Chat> {
    if let Some(existing) =
        chats.get_by_participants_and_advertisement(initiator, other, advertisement_id)
    {
        return Ok(existing);
    }

    let chat = Chat::new(advertisement_id, (initiator, other))?;
    chats.add(chat.clone())?;
    Ok(chat)
}

/// Appends to an existing conversation. The repository rejects unknown chat
/// ids and senders outside the pair.
pub fn send_message(
    chats: &impl ChatRepo,
    chat_id: Uuid,
    sender_id: Uuid,
    text: &str,
) -> Result<Message> {
    chats.append_message(chat_id, sender_id, text)
}

/// Derived view: every conversation `user_id` takes part in.
pub fn chats_of(chats: &impl ChatRepo, user_id: Uuid) -> Vec<Chat> {
    chats.get_by_participant(user_id)
}
