//! # Core Module
//!
//! Shared types, configuration, storage and reply formatting for the bot.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Add outcome module for user-facing results and reply embeds
//! - 1.1.0: Add response module with reply chunking
//! - 1.0.0: Initial creation with config and store modules

pub mod config;
pub mod embeds;
pub mod outcome;
pub mod response;
pub mod store;

// Re-export commonly used items
pub use config::{Config, StatePaths};
pub use embeds::{fill_reply_embed, reply_embed, Tone};
pub use outcome::Outcome;
pub use response::{chunk_reply, chunk_text, EMBED_LIMIT, REPLY_CHUNK_LIMIT};
pub use store::{DocumentStore, FileStore, MemoryStore, SharedStore};
