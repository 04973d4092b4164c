//! Participant storage operations

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::Participant;

pub struct ParticipantStore<'a> {
    conn: &'a Connection,
}

impl<'a> ParticipantStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Record a participant. Re-joining is a no-op: the original entry
    /// and its joined_at survive.
    #[instrument(skip(self, participant), fields(user_id = %participant.user_id))]
    pub fn add(&self, session_id: Uuid, participant: &Participant) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO participants (session_id, user_id, display_name, joined_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                session_id.to_string(),
                participant.user_id.to_string(),
                participant.display_name,
                participant.joined_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Look up a participant entry
    #[instrument(skip(self))]
    pub fn get(&self, session_id: Uuid, user_id: Uuid) -> Result<Option<Participant>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, display_name, joined_at
             FROM participants WHERE session_id = ?1 AND user_id = ?2",
        )?;

        let participant = stmt
            .query_row(
                params![session_id.to_string(), user_id.to_string()],
                Self::map_participant,
            )
            .optional()?;

        Ok(participant)
    }

    /// List a session's participants in join order
    #[instrument(skip(self))]
    pub fn list_for_session(&self, session_id: Uuid) -> Result<Vec<Participant>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, display_name, joined_at
             FROM participants WHERE session_id = ?1
             ORDER BY joined_at, user_id",
        )?;

        let participants = stmt
            .query_map(params![session_id.to_string()], Self::map_participant)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(participants)
    }

    fn map_participant(row: &rusqlite::Row<'_>) -> rusqlite::Result<Participant> {
        Ok(Participant {
            user_id: parse_uuid(&row.get::<_, String>(0)?)?,
            display_name: row.get(1)?,
            joined_at: parse_datetime(&row.get::<_, String>(2)?)?,
        })
    }

    /// Get participant count for a session
    pub fn count_for_session(&self, session_id: Uuid) -> Result<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM participants WHERE session_id = ?1",
            params![session_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
