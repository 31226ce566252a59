//! Tick events and action rejections surfaced to the presentation layer.
//!
//! The core never prints or displays anything itself: state transitions
//! worth telling the player about come back as values carrying the message
//! text, and invalid actions are rejected with a typed error rather than a
//! panic or a silent no-op.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Something user-visible that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickEvent {
    /// The energy store hit zero: the fire is out and intensity collapsed.
    Extinguished,
}

impl TickEvent {
    /// Transient message to show the player.
    pub fn message(self) -> &'static str {
        match self {
            TickEvent::Extinguished => "The fire has gone out",
        }
    }
}

/// Rejection of a player action. Never fatal; state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionError {
    /// `start` was called with an empty energy store.
    NoFuel,
    /// `start` was called while the fire is already burning.
    AlreadyBurning,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::NoFuel => write!(f, "Add some fuel first (tinder/kindling/log)"),
            ActionError::AlreadyBurning => write!(f, "Fire is already burning"),
        }
    }
}

impl std::error::Error for ActionError {}
