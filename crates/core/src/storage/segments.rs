//! Segment storage operations

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_datetime_opt, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::Segment;

pub struct SegmentStore<'a> {
    conn: &'a Connection,
}

impl<'a> SegmentStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Append a segment to the tail of its session's log.
    ///
    /// The position is assigned here, at write acceptance, so segments
    /// land in arrival order regardless of who issued them.
    #[instrument(skip(self, segment), fields(segment_id = %segment.id))]
    pub fn append(&self, segment: &Segment) -> Result<()> {
        self.conn.execute(
            "INSERT INTO segments (id, session_id, author, author_id, content, position, created_at, edited_at)
             VALUES (?1, ?2, ?3, ?4, ?5,
                     (SELECT COALESCE(MAX(position), -1) + 1 FROM segments WHERE session_id = ?2),
                     ?6, ?7)",
            params![
                segment.id.to_string(),
                segment.session_id.to_string(),
                segment.author,
                segment.author_id.to_string(),
                segment.content,
                segment.created_at.to_rfc3339(),
                segment.edited_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    /// Get segment by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Segment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, author, author_id, content, created_at, edited_at
             FROM segments WHERE id = ?1",
        )?;

        let segment = stmt
            .query_row(params![id.to_string()], Self::map_segment)
            .optional()?;

        Ok(segment)
    }

    /// List a session's segments in append order
    #[instrument(skip(self))]
    pub fn list_for_session(&self, session_id: Uuid) -> Result<Vec<Segment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, author, author_id, content, created_at, edited_at
             FROM segments WHERE session_id = ?1
             ORDER BY position",
        )?;

        let segments = stmt
            .query_map(params![session_id.to_string()], Self::map_segment)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(segments)
    }

    fn map_segment(row: &rusqlite::Row<'_>) -> rusqlite::Result<Segment> {
        Ok(Segment {
            id: parse_uuid(&row.get::<_, String>(0)?)?,
            session_id: parse_uuid(&row.get::<_, String>(1)?)?,
            author: row.get(2)?,
            author_id: parse_uuid(&row.get::<_, String>(3)?)?,
            content: row.get(4)?,
            created_at: parse_datetime(&row.get::<_, String>(5)?)?,
            edited_at: parse_datetime_opt(row.get::<_, Option<String>>(6)?)?,
        })
    }

    /// Replace a segment's content in place, stamping the edit time.
    /// Position, author, and creation time are untouched.
    #[instrument(skip(self, new_content))]
    pub fn update_content(&self, segment_id: Uuid, new_content: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE segments SET content = ?1, edited_at = ?2 WHERE id = ?3",
            params![new_content, Utc::now().to_rfc3339(), segment_id.to_string()],
        )?;
        Ok(())
    }

    /// Remove a segment. Surviving segments keep their positions, so
    /// relative order is preserved without renumbering.
    #[instrument(skip(self))]
    pub fn delete(&self, segment_id: Uuid) -> Result<()> {
        self.conn.execute(
            "DELETE FROM segments WHERE id = ?1",
            params![segment_id.to_string()],
        )?;
        Ok(())
    }

    /// Get segment count for a session
    pub fn count_for_session(&self, session_id: Uuid) -> Result<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM segments WHERE session_id = ?1",
            params![session_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
