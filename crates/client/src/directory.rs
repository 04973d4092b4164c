//! Live view of the session directory

use grimoire_core::SessionSummary;
use uuid::Uuid;

use crate::client::ChainClient;
use crate::error::Result;
use crate::feed::StoreEvent;

/// The listable collection of all chain sessions, kept current by
/// re-reading on change events. Any event can move a summary's counts,
/// so every event triggers a refresh.
#[derive(Default)]
pub struct DirectoryView {
    entries: Vec<SessionSummary>,
}

impl DirectoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SessionSummary] {
        &self.entries
    }

    pub fn entry(&self, session_id: Uuid) -> Option<&SessionSummary> {
        self.entries.iter().find(|e| e.id == session_id)
    }

    /// Re-read the directory from the store
    pub fn refresh(&mut self, client: &ChainClient) -> Result<()> {
        self.entries = client.list_sessions()?;
        Ok(())
    }

    /// React to a feed event
    pub fn apply_event(&mut self, _event: &StoreEvent, client: &ChainClient) -> Result<()> {
        self.refresh(client)
    }
}
