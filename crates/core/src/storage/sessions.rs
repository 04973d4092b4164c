//! Chain session storage operations

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_uuid, OptionalExt};
use super::{ParticipantStore, SegmentStore};
use crate::error::Result;
use crate::models::{ChainSession, SessionSummary};

pub struct SessionStore<'a> {
    conn: &'a Connection,
}

impl<'a> SessionStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Persist a new session together with its embedded participants
    /// and segments. The owner participant goes in atomically with the
    /// session row.
    #[instrument(skip(self, session), fields(session_title = %session.title))]
    pub fn create(&self, session: &ChainSession) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO chain_sessions (id, title, description, owner_id, owner_name, is_public, max_participants, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                session.id.to_string(),
                session.title,
                session.description,
                session.owner_id.to_string(),
                session.owner_name,
                session.is_public as i32,
                session.max_participants,
                session.created_at.to_rfc3339(),
            ],
        )?;

        let participants = ParticipantStore::new(self.conn);
        for participant in &session.participants {
            participants.add(session.id, participant)?;
        }

        let segments = SegmentStore::new(self.conn);
        for segment in &session.segments {
            segments.append(segment)?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Load a session by ID with segments and participants assembled
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<ChainSession>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, owner_id, owner_name, is_public, max_participants, created_at
             FROM chain_sessions WHERE id = ?1",
        )?;

        let shell = stmt
            .query_row(params![id.to_string()], |row| {
                Ok(ChainSession {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    owner_id: parse_uuid(&row.get::<_, String>(3)?)?,
                    owner_name: row.get(4)?,
                    is_public: row.get::<_, i32>(5)? != 0,
                    max_participants: row.get(6)?,
                    created_at: parse_datetime(&row.get::<_, String>(7)?)?,
                    participants: Vec::new(),
                    segments: Vec::new(),
                })
            })
            .optional()?;

        let Some(mut session) = shell else {
            return Ok(None);
        };

        session.participants = ParticipantStore::new(self.conn).list_for_session(id)?;
        session.segments = SegmentStore::new(self.conn).list_for_session(id)?;

        Ok(Some(session))
    }

    /// Delete a session; embedded segments and participants cascade
    #[instrument(skip(self))]
    pub fn delete(&self, session_id: Uuid) -> Result<()> {
        self.conn.execute(
            "DELETE FROM chain_sessions WHERE id = ?1",
            params![session_id.to_string()],
        )?;
        Ok(())
    }

    /// List every session as a directory summary, oldest first
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<SessionSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.id, s.title, s.description, s.owner_id, s.owner_name, s.created_at,
                    (SELECT COUNT(*) FROM segments g WHERE g.session_id = s.id),
                    (SELECT COUNT(*) FROM participants p WHERE p.session_id = s.id)
             FROM chain_sessions s
             ORDER BY s.created_at, s.id",
        )?;

        let summaries = stmt
            .query_map([], |row| {
                Ok(SessionSummary {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    owner_id: parse_uuid(&row.get::<_, String>(3)?)?,
                    owner_name: row.get(4)?,
                    created_at: parse_datetime(&row.get::<_, String>(5)?)?,
                    segment_count: row.get::<_, i64>(6)? as u64,
                    participant_count: row.get::<_, i64>(7)? as u64,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;
    use crate::storage::Database;

    fn make_session(title: &str) -> ChainSession {
        ChainSession::new(title.to_string(), Uuid::new_v4(), "Keeper".to_string())
    }

    #[test]
    fn test_create_and_find() {
        let db = Database::open_in_memory().unwrap();
        let session = make_session("The Hollow House").with_description("A slow burn".to_string());

        db.sessions().create(&session).unwrap();

        let found = db.sessions().find_by_id(session.id).unwrap().unwrap();
        assert_eq!(found.title, "The Hollow House");
        assert_eq!(found.description.as_deref(), Some("A slow burn"));
        assert_eq!(found.owner_id, session.owner_id);
        assert!(found.is_public);
        // The creating owner is a participant from creation
        assert_eq!(found.participants.len(), 1);
        assert_eq!(found.participants[0].user_id, session.owner_id);
        assert!(found.segments.is_empty());
    }

    #[test]
    fn test_find_missing_returns_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.sessions().find_by_id(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_delete_cascades_to_embedded_rows() {
        let db = Database::open_in_memory().unwrap();
        let session = make_session("Ash and Ember");
        db.sessions().create(&session).unwrap();

        let segment = Segment::new(
            session.id,
            "Keeper".to_string(),
            session.owner_id,
            "It began with a knock.".to_string(),
        );
        db.segments().append(&segment).unwrap();

        db.sessions().delete(session.id).unwrap();

        assert!(db.sessions().find_by_id(session.id).unwrap().is_none());
        assert!(db.segments().find_by_id(segment.id).unwrap().is_none());
        assert_eq!(db.participants().count_for_session(session.id).unwrap(), 0);
    }

    #[test]
    fn test_list_reports_counts() {
        let db = Database::open_in_memory().unwrap();
        let session = make_session("Counting Crows");
        db.sessions().create(&session).unwrap();

        for text in ["One for sorrow.", "Two for mirth."] {
            let segment = Segment::new(
                session.id,
                "Keeper".to_string(),
                session.owner_id,
                text.to_string(),
            );
            db.segments().append(&segment).unwrap();
        }

        let listed = db.sessions().list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].segment_count, 2);
        assert_eq!(listed[0].participant_count, 1);
    }
}
