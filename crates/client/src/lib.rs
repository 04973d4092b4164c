//! Grimoire Client Library
//!
//! The single-client live-view layer over the Grimoire chain session
//! service: signed-in state, change-notification feed, the session
//! directory, and the per-session view with its lifecycle phases.

pub mod client;
pub mod config;
pub mod directory;
pub mod error;
pub mod feed;
pub mod logging;
pub mod session_view;
pub mod state;

pub use client::ChainClient;
pub use config::ClientConfig;
pub use directory::DirectoryView;
pub use error::{Error, Result};
pub use feed::{ChangeFeed, StoreEvent};
pub use logging::init_logging;
pub use session_view::{SessionView, ViewPhase};
pub use state::AppState;
