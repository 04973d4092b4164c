//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{ChainSession, Participant, Segment};

/// Validate that a session's state is internally consistent
pub fn assert_session_invariants(session: &ChainSession) {
    // Title must not be empty
    debug_assert!(
        !session.title.trim().is_empty(),
        "Session {} has empty title",
        session.id
    );

    // The owner is a participant from creation onwards
    debug_assert!(
        session.is_participant(session.owner_id),
        "Session {} owner {} is not in the participant registry",
        session.id,
        session.owner_id
    );

    // Each user appears at most once
    let mut seen = HashSet::new();
    for p in &session.participants {
        debug_assert!(
            seen.insert(p.user_id),
            "Session {} lists participant {} more than once",
            session.id,
            p.user_id
        );
    }

    // Segment ids are unique within the session
    let mut ids = HashSet::new();
    for s in &session.segments {
        debug_assert!(
            ids.insert(s.id),
            "Session {} contains duplicate segment {}",
            session.id,
            s.id
        );
        debug_assert!(
            s.session_id == session.id,
            "Segment {} belongs to session {} but is embedded in {}",
            s.id,
            s.session_id,
            session.id
        );
    }
}

/// Validate that a segment is well-formed
pub fn assert_segment_invariants(segment: &Segment) {
    debug_assert!(
        segment.author_id != Uuid::nil(),
        "Segment {} has nil author_id",
        segment.id
    );

    debug_assert!(
        !segment.content.trim().is_empty(),
        "Segment {} has empty content",
        segment.id
    );
}

/// Validate that a participant entry is well-formed
pub fn assert_participant_invariants(participant: &Participant) {
    debug_assert!(
        participant.user_id != Uuid::nil(),
        "Participant entry has nil user_id"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_session() -> ChainSession {
        ChainSession::new(
            "Whispers in the Walls".to_string(),
            Uuid::new_v4(),
            "Keeper".to_string(),
        )
    }

    #[test]
    fn test_valid_session() {
        let session = make_session();
        assert_session_invariants(&session);
    }

    #[test]
    fn test_session_with_segments() {
        let mut session = make_session();
        session.segments.push(Segment::new(
            session.id,
            "Keeper".to_string(),
            session.owner_id,
            "The candle went out.".to_string(),
        ));
        assert_session_invariants(&session);
    }

    #[test]
    #[should_panic(expected = "more than once")]
    fn test_duplicate_participant_detected() {
        let mut session = make_session();
        let dup = session.participants[0].clone();
        session.participants.push(dup);
        assert_session_invariants(&session);
    }

    #[test]
    #[should_panic(expected = "not in the participant registry")]
    fn test_missing_owner_detected() {
        let mut session = make_session();
        session.participants.clear();
        assert_session_invariants(&session);
    }

    #[test]
    fn test_valid_participant() {
        let participant = Participant::new(Uuid::new_v4(), "Wanderer".to_string());
        assert_participant_invariants(&participant);
    }
}
