//! UI state types for the TUI layer.
//!
//! Pure data types with no IO, no async, no ratatui dependency.
//! Owned by the engine, read by the tui crate.

mod animation;
mod modal;
mod view_state;

pub use animation::AnimPhase;
pub use modal::{ModalEffect, ModalEffectKind};
pub use view_state::{EditTarget, Tab, UiOptions, ViewState};
