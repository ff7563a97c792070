//! adboard/crates/ab-core/src/lib.rs
//!
//! The central domain logic and interface definitions for adboard: validated
//! entities, the advertisement filter, repository ports, and the error type.

pub mod dto;
pub mod error;
pub mod filter;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use dto::*;
pub use error::*;
pub use filter::*;
pub use models::*;
pub use traits::*;
