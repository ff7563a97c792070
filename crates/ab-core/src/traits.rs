//! # Core Traits (Ports)
//!
//! Repository contracts over the domain entities. Implementations own the
//! canonical collection for their entity type and serialize every operation
//! behind one lock per repository; all reads hand out owned copies, so a
//! caller can never alias or corrupt the canonical state. Deliberate state
//! changes go through the repository (`update`, `publish`, `append_message`,
//! ...), which re-applies the entity invariants.

use uuid::Uuid;

use crate::error::Result;
use crate::filter::AdvertisementFilter;
use crate::models::{Advertisement, Category, Chat, Message, RegisteredUser};

/// Persistence contract for listings.
pub trait AdvertisementRepo: Send + Sync {
    /// Appends to the canonical collection. Insertion order is preserved for
    /// iteration.
    fn add(&self, advertisement: Advertisement) -> Result<()>;

    /// Owned copies of every listing, in insertion order.
    fn get_all(&self) -> Vec<Advertisement>;

    fn get_by_id(&self, id: Uuid) -> Option<Advertisement>;

    /// Listings owned by `owner_id`, in insertion order.
    fn get_by_user_id(&self, owner_id: Uuid) -> Vec<Advertisement>;

    /// Linear scan of the collection against `filter`. Result order is the
    /// collection order; callers wanting a defined order sort via
    /// [`Advertisement::cmp_created`].
    fn find_by_filters(&self, filter: &AdvertisementFilter) -> Vec<Advertisement>;

    /// Overwrites the updatable fields (title, description, category, owner,
    /// photos) of the stored listing with the same id.
    ///
    /// # Errors
    ///
    /// `NotFound` if no listing has `advertisement.id()`.
    fn update(&self, advertisement: &Advertisement) -> Result<()>;

    /// # Errors
    ///
    /// `NotFound` if the id is absent.
    fn delete(&self, id: Uuid) -> Result<()>;

    /// Publishes the stored listing; the `bool` is the entity-level outcome
    /// (`false` when `created_at` is in the future).
    fn publish(&self, id: Uuid) -> Result<bool>;

    /// Unpublishes the stored listing (`false` when it was not published).
    fn unpublish(&self, id: Uuid) -> Result<bool>;

    /// Promotes the stored listing (`false` inside the 24 h cooldown).
    fn promote(&self, id: Uuid) -> Result<bool>;
}

/// Persistence contract for categories.
pub trait CategoryRepo: Send + Sync {
    /// # Errors
    ///
    /// `Conflict` if a category with the same name (case-insensitive)
    /// already exists.
    fn add(&self, category: Category) -> Result<()>;

    fn get_all(&self) -> Vec<Category>;

    fn get_by_id(&self, id: Uuid) -> Option<Category>;

    /// Case-insensitive name lookup.
    fn get_by_name(&self, name: &str) -> Option<Category>;

    fn update(&self, category: &Category) -> Result<()>;

    fn delete(&self, id: Uuid) -> Result<()>;
}

/// Persistence contract for registered accounts.
pub trait RegisteredUserRepo: Send + Sync {
    /// # Errors
    ///
    /// `Conflict` on a username collision (case-insensitive).
    fn add(&self, user: RegisteredUser) -> Result<()>;

    fn get_all(&self) -> Vec<RegisteredUser>;

    fn get_by_id(&self, id: Uuid) -> Option<RegisteredUser>;

    /// Case-insensitive username lookup.
    fn get_by_username(&self, username: &str) -> Option<RegisteredUser>;

    fn update(&self, user: &RegisteredUser) -> Result<()>;

    fn delete(&self, id: Uuid) -> Result<()>;
}

/// Persistence contract for chats.
pub trait ChatRepo: Send + Sync {
    fn add(&self, chat: Chat) -> Result<()>;

    fn get_all(&self) -> Vec<Chat>;

    fn get_by_id(&self, id: Uuid) -> Option<Chat>;

    /// Chats where `participant_id` occupies either position of the pair.
    fn get_by_participant(&self, participant_id: Uuid) -> Vec<Chat>;

    /// The chat for an unordered participant pair and an advertisement, if
    /// one exists. Used to enforce at-most-one chat per pair + advertisement
    /// before creation.
    fn get_by_participants_and_advertisement(
        &self,
        participant_a: Uuid,
        participant_b: Uuid,
        advertisement_id: Uuid,
    ) -> Option<Chat>;

    /// Appends a message to the stored chat, returning a copy of it.
    ///
    /// # Errors
    ///
    /// `NotFound` if the chat is absent, `Conflict` if the sender is not a
    /// participant, `Validation` if the text is blank.
    fn append_message(&self, chat_id: Uuid, sender_id: Uuid, text: &str) -> Result<Message>;

    fn update(&self, chat: &Chat) -> Result<()>;

    fn delete(&self, id: Uuid) -> Result<()>;
}

/// Snapshot contract: the whole collection to and from one JSON document.
pub trait Snapshot {
    /// Serializes the live collection to a pretty-printed tagged JSON array.
    fn serialize_all(&self) -> Result<String>;

    /// Clears the repository and repopulates it from `json`, atomically from
    /// the perspective of other callers. Empty or whitespace input yields an
    /// empty repository. Elements that fail to parse or violate an invariant
    /// are skipped with a warning; only an unparseable document is an error.
    fn deserialize_all(&self, json: &str) -> Result<()>;
}

/// Plain-text read/write collaborator for snapshot documents.
pub trait StringStore: Send + Sync {
    /// The stored text, or an empty string when nothing was stored yet.
    fn read_string(&self, path: &str) -> Result<String>;

    fn write_string(&self, path: &str, content: &str) -> Result<()>;
}
