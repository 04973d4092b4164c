//! Client actions over the chain service
//!
//! Wraps `ChainService` with the signed-in identity and publishes a
//! change event after every committed write. Reads go straight
//! through; mutations refuse to run without an identity.

use std::sync::Arc;

use grimoire_core::{ChainSession, Identity, SessionSummary};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::feed::{ChangeFeed, StoreEvent};
use crate::state::AppState;

pub struct ChainClient {
    state: Arc<AppState>,
    feed: ChangeFeed,
}

impl ChainClient {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            feed: ChangeFeed::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    fn require_identity(&self) -> Result<Identity> {
        self.state.identity().ok_or_else(Error::not_signed_in)
    }

    /// Create a session owned by the signed-in user
    #[instrument(skip(self, title, description))]
    pub fn create_session(&self, title: &str, description: Option<&str>) -> Result<Uuid> {
        let identity = self.require_identity()?;
        let service = self.state.service.lock().unwrap();
        let session_id = service.create_session(title, description, &identity)?;
        drop(service);

        self.feed.publish(StoreEvent::DirectoryChanged);
        Ok(session_id)
    }

    /// Contribute a segment, signed with the current pen name
    #[instrument(skip(self, content))]
    pub fn add_segment(&self, session_id: Uuid, content: &str) -> Result<Uuid> {
        let identity = self.require_identity()?;
        let pen_name = self.state.pen_name().unwrap_or_default();

        let service = self.state.service.lock().unwrap();
        let segment_id = service.add_segment(session_id, &pen_name, &identity, content)?;
        drop(service);

        self.feed.publish(StoreEvent::SessionChanged(session_id));
        Ok(segment_id)
    }

    /// Edit a segment (author or session owner only)
    #[instrument(skip(self, new_content))]
    pub fn update_segment(
        &self,
        session_id: Uuid,
        segment_id: Uuid,
        new_content: &str,
    ) -> Result<()> {
        let identity = self.require_identity()?;
        let service = self.state.service.lock().unwrap();
        service.update_segment(session_id, segment_id, identity.user_id, new_content)?;
        drop(service);

        self.feed.publish(StoreEvent::SessionChanged(session_id));
        Ok(())
    }

    /// Delete a segment (author or session owner only)
    #[instrument(skip(self))]
    pub fn delete_segment(&self, session_id: Uuid, segment_id: Uuid) -> Result<()> {
        let identity = self.require_identity()?;
        let service = self.state.service.lock().unwrap();
        service.delete_segment(session_id, segment_id, identity.user_id)?;
        drop(service);

        self.feed.publish(StoreEvent::SessionChanged(session_id));
        Ok(())
    }

    /// Join a session (idempotent)
    #[instrument(skip(self))]
    pub fn join_session(&self, session_id: Uuid) -> Result<()> {
        let identity = self.require_identity()?;
        let service = self.state.service.lock().unwrap();
        service.join_session(session_id, &identity)?;
        drop(service);

        self.feed.publish(StoreEvent::SessionChanged(session_id));
        Ok(())
    }

    /// Delete a session (owner only)
    #[instrument(skip(self))]
    pub fn delete_session(&self, session_id: Uuid) -> Result<()> {
        let identity = self.require_identity()?;
        let service = self.state.service.lock().unwrap();
        service.delete_session(session_id, identity.user_id)?;
        drop(service);

        if self.state.current_session_id() == Some(session_id) {
            self.state.set_current_session(None);
        }
        self.feed.publish(StoreEvent::SessionRemoved(session_id));
        Ok(())
    }

    /// Load a full session document
    pub fn session(&self, session_id: Uuid) -> Result<ChainSession> {
        let service = self.state.service.lock().unwrap();
        Ok(service.session(session_id)?)
    }

    /// List the session directory
    pub fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let service = self.state.service.lock().unwrap();
        Ok(service.list_sessions()?)
    }
}
