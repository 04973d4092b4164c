//! Storage repository traits
//!
//! These traits define the store interface the chain service writes
//! through, allowing for different implementations (SQLite, mock,
//! future network backend). Tests inject fakes at this seam.

use uuid::Uuid;

use crate::error::Result;
use crate::models::{ChainSession, Participant, Segment, SessionSummary};

/// Session repository operations
pub trait SessionRepository {
    /// Persist a new session with its embedded participants and segments
    fn create_session(&self, session: &ChainSession) -> Result<()>;

    /// Load a session by ID with its segments and participants assembled
    fn find_session_by_id(&self, id: Uuid) -> Result<Option<ChainSession>>;

    /// Delete a session and everything embedded in it
    fn delete_session(&self, session_id: Uuid) -> Result<()>;

    /// List all sessions as directory summaries
    fn list_sessions(&self) -> Result<Vec<SessionSummary>>;
}

/// Segment repository operations
pub trait SegmentRepository {
    /// Append a segment to the tail of a session's log
    fn append_segment(&self, segment: &Segment) -> Result<()>;

    /// Find a segment by ID
    fn find_segment_by_id(&self, segment_id: Uuid) -> Result<Option<Segment>>;

    /// List a session's segments in append order
    fn list_segments(&self, session_id: Uuid) -> Result<Vec<Segment>>;

    /// Replace a segment's content, stamping the edit time
    fn update_segment_content(&self, segment_id: Uuid, new_content: &str) -> Result<()>;

    /// Remove a segment; survivors keep their relative order
    fn delete_segment(&self, segment_id: Uuid) -> Result<()>;

    /// Count segments in a session
    fn count_segments(&self, session_id: Uuid) -> Result<u64>;
}

/// Participant repository operations
pub trait ParticipantRepository {
    /// Record a participant; a no-op if the user is already present
    fn add_participant(&self, session_id: Uuid, participant: &Participant) -> Result<()>;

    /// Look up a participant entry
    fn get_participant(&self, session_id: Uuid, user_id: Uuid) -> Result<Option<Participant>>;

    /// List participants in join order
    fn list_participants(&self, session_id: Uuid) -> Result<Vec<Participant>>;

    /// Count participants in a session
    fn count_participants(&self, session_id: Uuid) -> Result<u64>;
}

/// Combined storage interface
///
/// Provides access to all repository operations.
/// Implementations may be backed by SQLite, mocks, or network.
pub trait Storage: SessionRepository + SegmentRepository + ParticipantRepository {}

// Blanket implementation: any type implementing all traits implements Storage
impl<T> Storage for T where T: SessionRepository + SegmentRepository + ParticipantRepository {}
