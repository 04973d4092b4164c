//! Identity handed over by the external auth provider

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in user as the identity provider reports them.
///
/// Grimoire does not run its own authentication; every mutating
/// operation takes one of these and trusts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Uuid,
    pub display_name: String,
}

impl Identity {
    pub fn new(user_id: Uuid, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
        }
    }
}
