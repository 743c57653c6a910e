//! Content override engine: editing a nested JSON content document against a
//! defaults baseline, with per-field change detection and selective reset.
//!
//! Everything in this crate is pure and synchronous. The async editing flow
//! (fetching sections, saving drafts) lives in `content-studio-core`, which
//! drives an [`session::EditingSession`] over a content API.

pub mod diff;
pub mod path;
pub mod reset;
pub mod session;
pub mod styles;

pub use session::{Confirmation, EditingSession, SessionError, SessionState};
