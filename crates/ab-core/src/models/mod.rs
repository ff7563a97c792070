//! # Domain Models
//!
//! The core entities of adboard. Entities reference each other by id only:
//! repositories are the sole owners of their collections, and the snapshot
//! codec serializes each collection independently.

mod advertisement;
mod category;
mod chat;
mod message;
mod user;

pub use advertisement::{AdKind, Advertisement, AdvertisementType, MAX_DESCRIPTION_LEN};
pub use category::Category;
pub use chat::Chat;
pub use message::Message;
pub use user::{RegisteredUser, MIN_CREDENTIAL_LEN};
