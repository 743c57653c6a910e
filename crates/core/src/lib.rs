//! Domain model and client side of the studio content API.
//!
//! `section` holds the content-section and homepage-registry models,
//! `events` the in-process bus published after successful writes, and
//! `client` the `ContentApi` boundary plus the async [`client::Editor`]
//! that drives an editing session against it.

pub mod client;
pub mod envelope;
pub mod events;
pub mod section;
