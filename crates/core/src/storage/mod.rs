//! SQLite storage layer for Grimoire
//!
//! Stands in for the hosted document store the original platform
//! leaned on: add/update/delete plus assembled document reads, with
//! write-order append positions assigned at acceptance.

mod migrations;
mod parse;
mod participants;
mod segments;
mod sessions;
mod traits;

use rusqlite::Connection;
use std::path::Path;
use tracing::instrument;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{ChainSession, Participant, Segment, SessionSummary};

pub use participants::ParticipantStore;
pub use segments::SegmentStore;
pub use sessions::SessionStore;
pub use traits::{ParticipantRepository, SegmentRepository, SessionRepository, Storage};

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
    }

    /// Get session store
    pub fn sessions(&self) -> SessionStore<'_> {
        SessionStore::new(&self.conn)
    }

    /// Get segment store
    pub fn segments(&self) -> SegmentStore<'_> {
        SegmentStore::new(&self.conn)
    }

    /// Get participant store
    pub fn participants(&self) -> ParticipantStore<'_> {
        ParticipantStore::new(&self.conn)
    }
}

// Implement repository traits for Database
// This enables using Database through the trait interface

impl SessionRepository for Database {
    fn create_session(&self, session: &ChainSession) -> Result<()> {
        self.sessions().create(session)
    }

    fn find_session_by_id(&self, id: Uuid) -> Result<Option<ChainSession>> {
        self.sessions().find_by_id(id)
    }

    fn delete_session(&self, session_id: Uuid) -> Result<()> {
        self.sessions().delete(session_id)
    }

    fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        self.sessions().list()
    }
}

impl SegmentRepository for Database {
    fn append_segment(&self, segment: &Segment) -> Result<()> {
        self.segments().append(segment)
    }

    fn find_segment_by_id(&self, segment_id: Uuid) -> Result<Option<Segment>> {
        self.segments().find_by_id(segment_id)
    }

    fn list_segments(&self, session_id: Uuid) -> Result<Vec<Segment>> {
        self.segments().list_for_session(session_id)
    }

    fn update_segment_content(&self, segment_id: Uuid, new_content: &str) -> Result<()> {
        self.segments().update_content(segment_id, new_content)
    }

    fn delete_segment(&self, segment_id: Uuid) -> Result<()> {
        self.segments().delete(segment_id)
    }

    fn count_segments(&self, session_id: Uuid) -> Result<u64> {
        self.segments().count_for_session(session_id)
    }
}

impl ParticipantRepository for Database {
    fn add_participant(&self, session_id: Uuid, participant: &Participant) -> Result<()> {
        self.participants().add(session_id, participant)
    }

    fn get_participant(&self, session_id: Uuid, user_id: Uuid) -> Result<Option<Participant>> {
        self.participants().get(session_id, user_id)
    }

    fn list_participants(&self, session_id: Uuid) -> Result<Vec<Participant>> {
        self.participants().list_for_session(session_id)
    }

    fn count_participants(&self, session_id: Uuid) -> Result<u64> {
        self.participants().count_for_session(session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_disk_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grimoire.db");

        let session = ChainSession::new(
            "The Long Night".to_string(),
            Uuid::new_v4(),
            "Keeper".to_string(),
        );

        {
            let db = Database::open(&path).unwrap();
            assert!(db.schema_version() > 0);
            db.sessions().create(&session).unwrap();
        }

        // A fresh handle sees the migrated schema and the stored rows
        let db = Database::open(&path).unwrap();
        assert!(db.schema_version() > 0);
        let found = db.sessions().find_by_id(session.id).unwrap().unwrap();
        assert_eq!(found.title, "The Long Night");
        assert_eq!(found.owner_id, session.owner_id);
    }
}
