//! Data models for Grimoire

mod identity;
mod participant;
mod segment;
mod session;

pub use identity::*;
pub use participant::*;
pub use segment::*;
pub use session::*;
