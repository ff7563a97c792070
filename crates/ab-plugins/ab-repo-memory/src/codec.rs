//! # Persistence Codec
//!
//! Wire records for the three snapshot documents. Keys are PascalCase and
//! advertisements travel inside a `{"Type": ..., "Ad": ...}` envelope whose
//! discriminator selects the variant on the way back in.
//!
//! Bulk loading follows one rule everywhere: an empty or whitespace document
//! is an empty collection; a document that is not a JSON array is a
//! [`AppError::Deserialization`]; an element whose envelope, payload, or
//! invariant check fails is skipped with a warning and the rest of the batch
//! continues. A chat element is atomic: one bad message skips that chat.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use ab_core::error::{AppError, Result};
use ab_core::models::{AdKind, Advertisement, AdvertisementType, Chat, Message, RegisteredUser};

#[derive(Serialize, Deserialize)]
struct AdEnvelope {
    #[serde(rename = "Type")]
    advertisement_type: AdvertisementType,
    #[serde(rename = "Ad")]
    ad: AdRecord,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AdRecord {
    id: Uuid,
    title: String,
    description: String,
    category_id: Uuid,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
    is_published: bool,
    photo_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UserRecord {
    id: Uuid,
    username: String,
    first_name: String,
    last_name: String,
    password: String,
    phone: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ChatRecord {
    id: Uuid,
    advertisement_id: Uuid,
    participant_id1: Uuid,
    participant_id2: Uuid,
    created_at: DateTime<Utc>,
    messages: Vec<MessageRecord>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MessageRecord {
    id: Uuid,
    chat_id: Uuid,
    sender_id: Uuid,
    text: String,
    sent_at: DateTime<Utc>,
}

impl From<&Advertisement> for AdEnvelope {
    fn from(ad: &Advertisement) -> Self {
        Self {
            advertisement_type: ad.advertisement_type(),
            ad: AdRecord {
                id: ad.id(),
                title: ad.title().to_owned(),
                description: ad.description().to_owned(),
                category_id: ad.category_id,
                owner_id: ad.owner_id,
                created_at: ad.created_at(),
                is_published: ad.is_published(),
                photo_paths: ad.photo_paths.clone(),
                price: ad.price(),
            },
        }
    }
}

impl TryFrom<AdEnvelope> for Advertisement {
    type Error = AppError;

    fn try_from(envelope: AdEnvelope) -> Result<Self> {
        let AdEnvelope { advertisement_type, ad } = envelope;
        let kind = match advertisement_type {
            AdvertisementType::Selling => AdKind::Selling { price: require_price(ad.price)? },
            AdvertisementType::Buying => AdKind::Buying { price: require_price(ad.price)? },
            AdvertisementType::Exchange => AdKind::Exchange,
        };
        Advertisement::restore(
            ad.id,
            ad.title,
            ad.description,
            ad.category_id,
            ad.owner_id,
            ad.created_at,
            ad.is_published,
            ad.photo_paths,
            kind,
        )
    }
}

fn require_price(price: Option<f64>) -> Result<f64> {
    price.ok_or_else(|| AppError::Deserialization("priced record is missing its price".into()))
}

impl From<&RegisteredUser> for UserRecord {
    fn from(user: &RegisteredUser) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_owned(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            password: user.password().to_owned(),
            phone: user.phone().to_owned(),
        }
    }
}

impl TryFrom<UserRecord> for RegisteredUser {
    type Error = AppError;

    fn try_from(record: UserRecord) -> Result<Self> {
        RegisteredUser::restore(
            record.id,
            record.username,
            record.password,
            record.first_name,
            record.last_name,
            record.phone,
        )
    }
}

impl From<&Chat> for ChatRecord {
    fn from(chat: &Chat) -> Self {
        let (participant_id1, participant_id2) = chat.participants();
        Self {
            id: chat.id(),
            advertisement_id: chat.advertisement_id,
            participant_id1,
            participant_id2,
            created_at: chat.created_at(),
            messages: chat.messages().iter().map(MessageRecord::from).collect(),
        }
    }
}

impl TryFrom<ChatRecord> for Chat {
    type Error = AppError;

    fn try_from(record: ChatRecord) -> Result<Self> {
        let messages = record
            .messages
            .into_iter()
            .map(Message::try_from)
            .collect::<Result<Vec<_>>>()?;
        Chat::restore(
            record.id,
            record.advertisement_id,
            (record.participant_id1, record.participant_id2),
            record.created_at,
            messages,
        )
    }
}

impl From<&Message> for MessageRecord {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id(),
            chat_id: message.chat_id(),
            sender_id: message.sender_id(),
            text: message.text().to_owned(),
            sent_at: message.sent_at(),
        }
    }
}

impl TryFrom<MessageRecord> for Message {
    type Error = AppError;

    fn try_from(record: MessageRecord) -> Result<Self> {
        Message::restore(record.id, record.chat_id, record.sender_id, record.text, record.sent_at)
    }
}

fn to_pretty_json<R: Serialize>(records: Vec<R>) -> Result<String> {
    serde_json::to_string_pretty(&records).map_err(|err| AppError::Internal(err.to_string()))
}

/// Splits a snapshot document into raw elements so that one malformed
/// element cannot take down the batch.
fn elements(text: &str) -> Result<Vec<Value>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text).map_err(|err| AppError::Deserialization(err.to_string()))
}

fn from_json<R, E>(text: &str, what: &'static str) -> Result<Vec<E>>
where
    R: DeserializeOwned,
    E: TryFrom<R, Error = AppError>,
{
    let mut entities = Vec::new();
    for value in elements(text)? {
        let parsed = serde_json::from_value::<R>(value)
            .map_err(|err| AppError::Deserialization(err.to_string()))
            .and_then(E::try_from);
        match parsed {
            Ok(entity) => entities.push(entity),
            Err(err) => warn!(error = %err, "skipping unreadable {what} record"),
        }
    }
    Ok(entities)
}

pub(crate) fn advertisements_to_json(items: &[Advertisement]) -> Result<String> {
    to_pretty_json(items.iter().map(AdEnvelope::from).collect())
}

pub(crate) fn advertisements_from_json(text: &str) -> Result<Vec<Advertisement>> {
    from_json::<AdEnvelope, _>(text, "advertisement")
}

pub(crate) fn users_to_json(items: &[RegisteredUser]) -> Result<String> {
    to_pretty_json(items.iter().map(UserRecord::from).collect())
}

pub(crate) fn users_from_json(text: &str) -> Result<Vec<RegisteredUser>> {
    from_json::<UserRecord, _>(text, "user")
}

pub(crate) fn chats_to_json(items: &[Chat]) -> Result<String> {
    to_pretty_json(items.iter().map(ChatRecord::from).collect())
}

pub(crate) fn chats_from_json(text: &str) -> Result<Vec<Chat>> {
    from_json::<ChatRecord, _>(text, "chat")
}
