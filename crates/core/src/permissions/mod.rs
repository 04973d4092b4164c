//! Permission rules for chain session operations
//!
//! Enforcement is client-side only: these checks run before a write is
//! issued, mirroring what a server-side rule set would have to repeat.

use uuid::Uuid;

use crate::models::ChainSession;

/// Actions that can be performed on a chain session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainAction {
    // Session management
    DeleteSession,

    // Segments
    AddSegment,
    EditOwnSegment,
    DeleteOwnSegment,
    EditOtherSegments,
    DeleteOtherSegments,

    // Membership
    JoinSession,
}

/// How the acting user relates to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChainRole {
    /// Anyone who has not joined
    Visitor = 1,
    /// A joined contributor
    Participant = 2,
    /// The session creator
    Owner = 3,
}

impl ChainRole {
    /// Determine the role a user holds in a session
    pub fn of(session: &ChainSession, user_id: Uuid) -> ChainRole {
        if session.owner_id == user_id {
            ChainRole::Owner
        } else if session.is_participant(user_id) {
            ChainRole::Participant
        } else {
            ChainRole::Visitor
        }
    }
}

/// Permission matrix for chain roles
pub struct ChainPolicy;

impl ChainPolicy {
    /// Check if a role may perform an action
    pub fn can_perform(role: ChainRole, action: ChainAction) -> bool {
        match action {
            // Session management - owner only
            ChainAction::DeleteSession => role == ChainRole::Owner,

            // Everyone may contribute and manage their own segments
            ChainAction::AddSegment => true,
            ChainAction::EditOwnSegment => true,
            ChainAction::DeleteOwnSegment => true,

            // Other people's segments - owner only
            ChainAction::EditOtherSegments => role == ChainRole::Owner,
            ChainAction::DeleteOtherSegments => role == ChainRole::Owner,

            ChainAction::JoinSession => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_session(owner_id: Uuid) -> ChainSession {
        ChainSession::new("Test Chain".to_string(), owner_id, "Keeper".to_string())
    }

    #[test]
    fn test_owner_permissions() {
        assert!(ChainPolicy::can_perform(ChainRole::Owner, ChainAction::DeleteSession));
        assert!(ChainPolicy::can_perform(ChainRole::Owner, ChainAction::EditOtherSegments));
        assert!(ChainPolicy::can_perform(ChainRole::Owner, ChainAction::DeleteOtherSegments));
        assert!(ChainPolicy::can_perform(ChainRole::Owner, ChainAction::AddSegment));
    }

    #[test]
    fn test_participant_permissions() {
        assert!(ChainPolicy::can_perform(ChainRole::Participant, ChainAction::AddSegment));
        assert!(ChainPolicy::can_perform(ChainRole::Participant, ChainAction::EditOwnSegment));
        assert!(ChainPolicy::can_perform(ChainRole::Participant, ChainAction::DeleteOwnSegment));
        assert!(!ChainPolicy::can_perform(ChainRole::Participant, ChainAction::DeleteSession));
        assert!(!ChainPolicy::can_perform(ChainRole::Participant, ChainAction::EditOtherSegments));
        assert!(!ChainPolicy::can_perform(ChainRole::Participant, ChainAction::DeleteOtherSegments));
    }

    #[test]
    fn test_visitor_permissions() {
        assert!(ChainPolicy::can_perform(ChainRole::Visitor, ChainAction::JoinSession));
        assert!(!ChainPolicy::can_perform(ChainRole::Visitor, ChainAction::DeleteSession));
        assert!(!ChainPolicy::can_perform(ChainRole::Visitor, ChainAction::EditOtherSegments));
    }

    #[test]
    fn test_role_of() {
        let owner_id = Uuid::new_v4();
        let joined_id = Uuid::new_v4();
        let mut session = make_session(owner_id);
        session
            .participants
            .push(crate::models::Participant::new(joined_id, "Wanderer".to_string()));

        assert_eq!(ChainRole::of(&session, owner_id), ChainRole::Owner);
        assert_eq!(ChainRole::of(&session, joined_id), ChainRole::Participant);
        assert_eq!(ChainRole::of(&session, Uuid::new_v4()), ChainRole::Visitor);
    }
}
