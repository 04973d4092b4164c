//! Grimoire Core Library
//!
//! Models, permissions, integrity digest, storage, and the chain
//! session service for the Grimoire story platform.

pub mod digest;
pub mod error;
pub mod invariants;
pub mod models;
pub mod permissions;
pub mod service;
pub mod storage;

pub use digest::{story_digest, word_count};
pub use error::{Error, Result};
pub use models::*;
pub use permissions::*;
pub use service::ChainService;
pub use storage::{
    Database, ParticipantRepository, SegmentRepository, SessionRepository, Storage,
};
