//! Spawn point: named arrival anchor

use super::is_blank;
use crate::mode::ActivationMode;
use serde::{Deserialize, Serialize};
use tile_grid::Direction;

/// Named tile that warps and doors land on. Never fires.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpawnPointTriggerData {
    activation_mode: ActivationMode,
    one_shot: bool,
    player_only: bool,
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    facing_direction: Option<Direction>,
}

trigger_common!(SpawnPointTriggerData);

impl SpawnPointTriggerData {
    /// Spawn point named `id`
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Name warps and doors refer to
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Direction an arriving entity should face, if fixed
    pub fn facing_direction(&self) -> Option<Direction> {
        self.facing_direction
    }

    #[must_use]
    pub fn with_id(&self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_facing_direction(&self, facing_direction: Option<Direction>) -> Self {
        Self {
            facing_direction,
            ..self.clone()
        }
    }

    /// Check the spawn point has an id
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if is_blank(&self.id) {
            errors.push("Spawn point requires an id".to_string());
        }
        errors
    }
}
