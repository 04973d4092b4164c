//! Chain session model - the core collaborative story unit

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Participant, Segment};

/// Maximum length of a session title
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum length of a session description
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Default participant cap for new sessions
pub const DEFAULT_MAX_PARTICIPANTS: u32 = 10;

/// A chain session: an ordered segment log plus participant
/// membership and ownership
///
/// Segments and participants are embedded in the session document;
/// deleting the session removes them with it. Segment order is
/// append order and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSession {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub is_public: bool,
    pub max_participants: u32,
    pub created_at: DateTime<Utc>,
    pub participants: Vec<Participant>,
    pub segments: Vec<Segment>,
}

impl ChainSession {
    /// Create a new session. The owner is a participant from creation.
    pub fn new(title: String, owner_id: Uuid, owner_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description: None,
            owner_id,
            owner_name: owner_name.clone(),
            is_public: true,
            max_participants: DEFAULT_MAX_PARTICIPANTS,
            created_at: Utc::now(),
            participants: vec![Participant::new(owner_id, owner_name)],
            segments: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn segment(&self, segment_id: Uuid) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == segment_id)
    }

    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.participants.iter().any(|p| p.user_id == user_id)
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() as u32 >= self.max_participants
    }
}

/// Session summary for the directory listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub segment_count: u64,
    pub participant_count: u64,
    pub created_at: DateTime<Utc>,
}
