//! Core state machines – pointer tracking, trail history, follower chain,
//! and copy feedback.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Time is
//! always passed in as an `Instant` so every transition is testable without
//! sleeping.

pub mod clipboard;
pub mod feedback;
pub mod follower;
pub mod pointer;
pub mod profile;
pub mod scene;
pub mod trail;
