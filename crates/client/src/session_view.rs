//! Live view of one chain session
//!
//! Tracks a single session from this client's perspective:
//! `Uninitialized -> Loading -> Ready`, updated in place on change
//! events, and `Gone` once the session is deleted. Also carries the
//! local in-progress draft, which feeds into the word count and the
//! displayed story digest.

use grimoire_core::{story_digest, word_count, ChainSession, Error as CoreError, Participant, Segment};
use uuid::Uuid;

use crate::client::ChainClient;
use crate::error::{Error, Result};
use crate::feed::StoreEvent;

/// Where a session view is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    /// Created, nothing fetched yet
    Uninitialized,
    /// A load has been requested
    Loading,
    /// Live, holding the latest known snapshot
    Ready,
    /// The session was deleted; no longer retrievable
    Gone,
}

pub struct SessionView {
    session_id: Uuid,
    phase: ViewPhase,
    snapshot: Option<ChainSession>,
    draft: String,
}

impl SessionView {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            phase: ViewPhase::Uninitialized,
            snapshot: None,
            draft: String::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// Open the view: mark it loading and fetch the first snapshot
    pub fn open(&mut self, client: &ChainClient) -> Result<()> {
        self.phase = ViewPhase::Loading;
        self.refresh(client)
    }

    /// Re-fetch the session. A missing session moves the view to
    /// `Gone`; that is a normal outcome, not an error.
    pub fn refresh(&mut self, client: &ChainClient) -> Result<()> {
        match client.session(self.session_id) {
            Ok(session) => {
                self.snapshot = Some(session);
                self.phase = ViewPhase::Ready;
                Ok(())
            }
            Err(Error::Core(CoreError::NotFound(_))) => {
                self.mark_gone();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// React to a feed event. Irrelevant events are ignored; relevant
    /// ones update the view in place.
    pub fn apply_event(&mut self, event: &StoreEvent, client: &ChainClient) -> Result<()> {
        if !event.concerns(self.session_id) {
            return Ok(());
        }
        match event {
            StoreEvent::SessionRemoved(_) => {
                self.mark_gone();
                Ok(())
            }
            _ => self.refresh(client),
        }
    }

    fn mark_gone(&mut self) {
        self.phase = ViewPhase::Gone;
        self.snapshot = None;
    }

    pub fn session(&self) -> Option<&ChainSession> {
        self.snapshot.as_ref()
    }

    pub fn segments(&self) -> &[Segment] {
        self.snapshot.as_ref().map(|s| s.segments.as_slice()).unwrap_or(&[])
    }

    pub fn participants(&self) -> &[Participant] {
        self.snapshot
            .as_ref()
            .map(|s| s.participants.as_slice())
            .unwrap_or(&[])
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    fn contents(&self) -> Vec<&str> {
        self.segments().iter().map(|s| s.content.as_str()).collect()
    }

    fn draft_opt(&self) -> Option<&str> {
        if self.draft.trim().is_empty() {
            None
        } else {
            Some(self.draft.as_str())
        }
    }

    /// Story word count over segments plus the pending draft
    pub fn word_count(&self) -> usize {
        word_count(&self.contents(), self.draft_opt())
    }

    /// The displayed story digest, draft included
    pub fn digest(&self) -> String {
        story_digest(&self.contents(), self.draft_opt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::state::AppState;
    use grimoire_core::{Database, Identity};
    use std::sync::Arc;

    fn signed_in_client() -> ChainClient {
        let db = Database::open_in_memory().unwrap();
        let state = Arc::new(AppState::with_database(db, ClientConfig::default()));
        let client = ChainClient::new(state);
        client.state().sign_in(Identity::new(Uuid::new_v4(), "Keeper"));
        client
    }

    #[test]
    fn test_phase_walk_to_ready() {
        let client = signed_in_client();
        let session_id = client.create_session("Watched", None).unwrap();

        let mut view = SessionView::new(session_id);
        assert_eq!(view.phase(), ViewPhase::Uninitialized);

        view.open(&client).unwrap();
        assert_eq!(view.phase(), ViewPhase::Ready);
        assert_eq!(view.session().unwrap().title, "Watched");
    }

    #[test]
    fn test_opening_missing_session_goes_gone() {
        let client = signed_in_client();
        let mut view = SessionView::new(Uuid::new_v4());
        view.open(&client).unwrap();
        assert_eq!(view.phase(), ViewPhase::Gone);
        assert!(view.session().is_none());
    }

    #[test]
    fn test_view_updates_in_place_on_events() {
        let client = signed_in_client();
        let session_id = client.create_session("Live", None).unwrap();
        let mut rx = client.feed().subscribe();

        let mut view = SessionView::new(session_id);
        view.open(&client).unwrap();
        assert!(view.segments().is_empty());

        client.add_segment(session_id, "A knock at the door.").unwrap();
        let event = rx.try_recv().unwrap();
        view.apply_event(&event, &client).unwrap();

        assert_eq!(view.phase(), ViewPhase::Ready);
        assert_eq!(view.segments().len(), 1);
        assert_eq!(view.segments()[0].content, "A knock at the door.");
    }

    #[test]
    fn test_unrelated_events_are_ignored() {
        let client = signed_in_client();
        let session_id = client.create_session("Mine", None).unwrap();
        let other_id = client.create_session("Other", None).unwrap();
        let mut rx = client.feed().subscribe();

        let mut view = SessionView::new(session_id);
        view.open(&client).unwrap();

        client.add_segment(other_id, "Elsewhere.").unwrap();
        let event = rx.try_recv().unwrap();
        view.apply_event(&event, &client).unwrap();

        assert!(view.segments().is_empty());
    }

    #[test]
    fn test_delete_moves_view_to_gone() {
        let client = signed_in_client();
        let session_id = client.create_session("Doomed", None).unwrap();
        let mut rx = client.feed().subscribe();

        let mut view = SessionView::new(session_id);
        view.open(&client).unwrap();

        client.delete_session(session_id).unwrap();
        let event = rx.try_recv().unwrap();
        view.apply_event(&event, &client).unwrap();

        assert_eq!(view.phase(), ViewPhase::Gone);
        assert!(view.session().is_none());
    }

    #[test]
    fn test_word_count_and_digest_include_draft() {
        let client = signed_in_client();
        let session_id = client.create_session("Counted", None).unwrap();
        client.add_segment(session_id, "Hello world").unwrap();

        let mut view = SessionView::new(session_id);
        view.open(&client).unwrap();

        assert_eq!(view.word_count(), 2);
        let settled = view.digest();

        view.set_draft("and more words");
        assert_eq!(view.word_count(), 5);
        assert_ne!(view.digest(), settled);

        // A whitespace-only draft does not count
        view.set_draft("   ");
        assert_eq!(view.word_count(), 2);
        assert_eq!(view.digest(), settled);
    }
}
