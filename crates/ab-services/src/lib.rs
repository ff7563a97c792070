//! # ab-services
//!
//! Explicit use-case functions over the repository ports. Everything a user
//! can do (register, open a category, list something, start a chat) is a
//! free function taking the repositories it needs; no entity ever reaches
//! into a sibling repository on its own.

pub mod account;
pub mod catalog;
pub mod listings;
pub mod messaging;
