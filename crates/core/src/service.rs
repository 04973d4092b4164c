//! Chain session service
//!
//! Every rule the platform enforces runs here, before a write is
//! issued to the store. The store itself stays dumb CRUD, so checks
//! are advisory across concurrent clients: simultaneous writes race
//! and the last one wins.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::invariants::assert_session_invariants;
use crate::models::{
    ChainSession, Identity, Participant, Segment, SessionSummary, MAX_DESCRIPTION_LEN,
    MAX_TITLE_LEN,
};
use crate::permissions::{ChainAction, ChainPolicy, ChainRole};
use crate::storage::Storage;

/// The chain session service: create, read, and mutate sessions and
/// their embedded segments and participants through an injected store.
pub struct ChainService<S> {
    store: S,
}

impl<S: Storage> ChainService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a new session owned by `owner`, who joins at creation.
    #[instrument(skip(self, description, owner), fields(owner_id = %owner.user_id))]
    pub fn create_session(
        &self,
        title: &str,
        description: Option<&str>,
        owner: &Identity,
    ) -> Result<Uuid> {
        let title = validate_title(title)?;
        let description = description.map(validate_description).transpose()?;

        let mut session =
            ChainSession::new(title, owner.user_id, owner.display_name.clone());
        if let Some(desc) = description {
            session = session.with_description(desc);
        }
        assert_session_invariants(&session);

        self.store.create_session(&session)?;
        info!(session_id = %session.id, "Session created");
        Ok(session.id)
    }

    /// Load a full session document
    pub fn session(&self, session_id: Uuid) -> Result<ChainSession> {
        let session = self
            .store
            .find_session_by_id(session_id)?
            .ok_or_else(|| Error::NotFound(format!("session {session_id}")))?;
        assert_session_invariants(&session);
        Ok(session)
    }

    /// List the session directory
    pub fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        self.store.list_sessions()
    }

    /// Append a segment to the tail of a session's log.
    ///
    /// `author` is the contributor's pen name, free text; the stable
    /// `author_id` always comes from the authenticated identity.
    #[instrument(skip(self, author, content, actor), fields(actor_id = %actor.user_id))]
    pub fn add_segment(
        &self,
        session_id: Uuid,
        author: &str,
        actor: &Identity,
        content: &str,
    ) -> Result<Uuid> {
        let content = validate_content(content)?;
        // Existence check up front so an appended segment never dangles
        let session = self.session(session_id)?;

        let role = ChainRole::of(&session, actor.user_id);
        if !ChainPolicy::can_perform(role, ChainAction::AddSegment) {
            return Err(Error::Authorization(
                "You cannot contribute to this session".to_string(),
            ));
        }

        let author = if author.trim().is_empty() {
            actor.display_name.clone()
        } else {
            author.trim().to_string()
        };

        let segment = Segment::new(session_id, author, actor.user_id, content);
        self.store.append_segment(&segment)?;
        info!(session_id = %session_id, segment_id = %segment.id, "Segment appended");
        Ok(segment.id)
    }

    /// Replace a segment's content. Author-or-owner only; position,
    /// authorship, and creation time are preserved.
    #[instrument(skip(self, new_content))]
    pub fn update_segment(
        &self,
        session_id: Uuid,
        segment_id: Uuid,
        actor_id: Uuid,
        new_content: &str,
    ) -> Result<()> {
        let new_content = validate_content(new_content)?;
        let session = self.session(session_id)?;
        let segment = session
            .segment(segment_id)
            .ok_or_else(|| Error::NotFound(format!("segment {segment_id}")))?;

        let action = if segment.author_id == actor_id {
            ChainAction::EditOwnSegment
        } else {
            ChainAction::EditOtherSegments
        };
        if !ChainPolicy::can_perform(ChainRole::of(&session, actor_id), action) {
            warn!(segment_id = %segment_id, "Rejected segment edit by non-author");
            return Err(Error::Authorization(
                "You can only edit your own segments".to_string(),
            ));
        }

        self.store.update_segment_content(segment_id, &new_content)
    }

    /// Remove a segment. Author-or-owner only; survivors keep their
    /// relative order.
    #[instrument(skip(self))]
    pub fn delete_segment(&self, session_id: Uuid, segment_id: Uuid, actor_id: Uuid) -> Result<()> {
        let session = self.session(session_id)?;
        let segment = session
            .segment(segment_id)
            .ok_or_else(|| Error::NotFound(format!("segment {segment_id}")))?;

        let action = if segment.author_id == actor_id {
            ChainAction::DeleteOwnSegment
        } else {
            ChainAction::DeleteOtherSegments
        };
        if !ChainPolicy::can_perform(ChainRole::of(&session, actor_id), action) {
            warn!(segment_id = %segment_id, "Rejected segment delete by non-author");
            return Err(Error::Authorization(
                "You can only delete your own segments".to_string(),
            ));
        }

        self.store.delete_segment(segment_id)
    }

    /// Join a session. Idempotent: if the user is already in the
    /// registry nothing happens, not even a capacity check.
    #[instrument(skip(self, user), fields(user_id = %user.user_id))]
    pub fn join_session(&self, session_id: Uuid, user: &Identity) -> Result<()> {
        let session = self.session(session_id)?;

        if session.is_participant(user.user_id) {
            return Ok(());
        }

        let role = ChainRole::of(&session, user.user_id);
        if !ChainPolicy::can_perform(role, ChainAction::JoinSession) {
            return Err(Error::Authorization(
                "You cannot join this session".to_string(),
            ));
        }

        if session.is_full() {
            return Err(Error::Validation(format!(
                "Session \"{}\" is full",
                session.title
            )));
        }

        let participant = Participant::new(user.user_id, user.display_name.clone());
        self.store.add_participant(session_id, &participant)?;
        info!(session_id = %session_id, "Participant joined");
        Ok(())
    }

    /// Export a session as a pretty-printed JSON document, for
    /// archiving a finished story outside the store.
    pub fn export_session(&self, session_id: Uuid) -> Result<String> {
        let session = self.session(session_id)?;
        Ok(serde_json::to_string_pretty(&session)?)
    }

    /// Delete a session and everything embedded in it. Owner only.
    #[instrument(skip(self))]
    pub fn delete_session(&self, session_id: Uuid, actor_id: Uuid) -> Result<()> {
        let session = self.session(session_id)?;

        let role = ChainRole::of(&session, actor_id);
        if !ChainPolicy::can_perform(role, ChainAction::DeleteSession) {
            warn!(session_id = %session_id, "Rejected session delete by non-owner");
            return Err(Error::Authorization(
                "Only the session owner can delete the session".to_string(),
            ));
        }

        self.store.delete_session(session_id)?;
        info!(session_id = %session_id, "Session deleted");
        Ok(())
    }
}

/// Validate a session title: non-empty after trimming, capped length
fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("Title cannot be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(Error::Validation(format!(
            "Title cannot exceed {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a session description: capped length
fn validate_description(description: &str) -> Result<String> {
    let trimmed = description.trim();
    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(Error::Validation(format!(
            "Description cannot exceed {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate segment content: non-empty after trimming
fn validate_content(content: &str) -> Result<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(
            "Segment content cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
