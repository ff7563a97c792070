//! # ab-repo-memory
//!
//! The canonical in-memory repositories. Each repository owns one
//! `Mutex<Vec<T>>`: one lock per repository, held for the full duration of
//! every operation, snapshot serialization included. Reads return owned
//! copies; nothing outside a repository ever touches the live collection.

mod advertisements;
mod categories;
mod chats;
mod codec;
mod users;

pub use advertisements::MemoryAdvertisementRepo;
pub use categories::MemoryCategoryRepo;
pub use chats::MemoryChatRepo;
pub use users::MemoryRegisteredUserRepo;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// A poisoned lock only means another caller panicked mid-operation; the
/// collection itself is still structurally sound, so recover the guard.
pub(crate) fn lock<T>(items: &Mutex<T>) -> MutexGuard<'_, T> {
    items.lock().unwrap_or_else(PoisonError::into_inner)
}
