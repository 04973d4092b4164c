//! Application state management

use std::sync::{Arc, Mutex};

use grimoire_core::{ChainService, Database, Identity};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::Result;

/// Main application state
///
/// Holds the service handle, the signed-in identity the provider
/// handed over, and which session the user is looking at.
pub struct AppState {
    pub service: Arc<Mutex<ChainService<Database>>>,
    identity: Arc<Mutex<Option<Identity>>>,
    current_session_id: Arc<Mutex<Option<Uuid>>>,
    config: ClientConfig,
}

impl AppState {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let data_dir = config.resolve_data_dir()?;
        std::fs::create_dir_all(&data_dir)?;

        let db = Database::open(data_dir.join("grimoire.db"))?;
        Ok(Self::with_database(db, config))
    }

    /// Build state over an already-open database (tests use in-memory)
    pub fn with_database(db: Database, config: ClientConfig) -> Self {
        Self {
            service: Arc::new(Mutex::new(ChainService::new(db))),
            identity: Arc::new(Mutex::new(None)),
            current_session_id: Arc::new(Mutex::new(None)),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Record the identity the auth provider yielded
    pub fn sign_in(&self, identity: Identity) {
        *self.identity.lock().unwrap() = Some(identity);
    }

    pub fn sign_out(&self) {
        *self.identity.lock().unwrap() = None;
        *self.current_session_id.lock().unwrap() = None;
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity.lock().unwrap().clone()
    }

    pub fn set_current_session(&self, session_id: Option<Uuid>) {
        *self.current_session_id.lock().unwrap() = session_id;
    }

    pub fn current_session_id(&self) -> Option<Uuid> {
        *self.current_session_id.lock().unwrap()
    }

    /// The pen name to sign segments with: the configured one if set,
    /// otherwise the identity's display name.
    pub fn pen_name(&self) -> Option<String> {
        if let Some(name) = &self.config.pen_name {
            return Some(name.clone());
        }
        self.identity().map(|i| i.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        let db = Database::open_in_memory().unwrap();
        AppState::with_database(db, ClientConfig::default())
    }

    #[test]
    fn test_sign_in_and_out() {
        let state = state();
        assert!(state.identity().is_none());

        let identity = Identity::new(Uuid::new_v4(), "Keeper");
        state.sign_in(identity.clone());
        assert_eq!(state.identity(), Some(identity));

        state.set_current_session(Some(Uuid::new_v4()));
        state.sign_out();
        assert!(state.identity().is_none());
        assert!(state.current_session_id().is_none());
    }

    #[test]
    fn test_pen_name_prefers_config() {
        let db = Database::open_in_memory().unwrap();
        let state = AppState::with_database(
            db,
            ClientConfig {
                data_dir: None,
                pen_name: Some("The Raven".to_string()),
            },
        );
        state.sign_in(Identity::new(Uuid::new_v4(), "Keeper"));
        assert_eq!(state.pen_name().as_deref(), Some("The Raven"));
    }

    #[test]
    fn test_pen_name_falls_back_to_identity() {
        let state = state();
        assert!(state.pen_name().is_none());

        state.sign_in(Identity::new(Uuid::new_v4(), "Keeper"));
        assert_eq!(state.pen_name().as_deref(), Some("Keeper"));
    }
}
