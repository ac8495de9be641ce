//! Activation modes and transition styles

use serde::{Deserialize, Serialize};
use std::fmt;

/// The event class that makes a trigger fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivationMode {
    /// Fire when an entity steps onto the tile
    #[default]
    OnEnter,
    /// Fire when an entity steps off the tile
    OnExit,
    /// Fire when an entity presses interact on or facing the tile
    OnInteract,
}

impl fmt::Display for ActivationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnEnter => write!(f, "ON_ENTER"),
            Self::OnExit => write!(f, "ON_EXIT"),
            Self::OnInteract => write!(f, "ON_INTERACT"),
        }
    }
}

/// Screen transition requested by a teleport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitionType {
    #[default]
    Fade,
    Instant,
    Slide,
    Iris,
}
