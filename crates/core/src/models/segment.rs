//! Segment model - one contributed block of story text

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A story segment in a chain session
///
/// `author` is a free-text pen name chosen by the contributor;
/// `author_id` is the stable identity and never changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub id: Uuid,
    pub session_id: Uuid,
    pub author: String,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl Segment {
    pub fn new(session_id: Uuid, author: String, author_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            author,
            author_id,
            content,
            created_at: Utc::now(),
            edited_at: None,
        }
    }

    pub fn is_edited(&self) -> bool {
        self.edited_at.is_some()
    }
}
