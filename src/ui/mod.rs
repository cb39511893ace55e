//! UI / rendering layer. Everything that touches Ratatui widgets.
//!
//! This layer takes the *core* state and turns it into pixels on the
//! terminal: the effect surface underneath, the profile card on top.

pub mod effects;
pub mod layout;
pub mod profile_card;
pub mod surface;
pub mod theme;
