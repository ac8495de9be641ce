//! Stairs: mono-directional elevation change

use crate::mode::ActivationMode;
use serde::{Deserialize, Serialize};
use tile_grid::{Direction, TileCoord};

/// Changes the entity's elevation when it leaves the tile in `exit_direction`.
///
/// Leaving in any other direction does nothing. A two-way staircase is two
/// tiles configured with opposite directions and opposite changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StairsTriggerData {
    activation_mode: ActivationMode,
    one_shot: bool,
    player_only: bool,
    exit_direction: Option<Direction>,
    elevation_change: i32,
}

trigger_common!(StairsTriggerData);

impl StairsTriggerData {
    /// Stairs leaving toward `exit_direction`, changing elevation by `elevation_change`
    pub fn new(exit_direction: Direction, elevation_change: i32) -> Self {
        Self {
            exit_direction: Some(exit_direction),
            elevation_change,
            ..Self::default()
        }
    }

    /// One floor up when leaving toward `exit_direction`
    pub fn up(exit_direction: Direction) -> Self {
        Self::new(exit_direction, 1)
    }

    /// One floor down when leaving toward `exit_direction`
    pub fn down(exit_direction: Direction) -> Self {
        Self::new(exit_direction, -1)
    }

    /// Direction that takes the stairs
    pub fn exit_direction(&self) -> Option<Direction> {
        self.exit_direction
    }

    /// Signed floor delta
    pub fn elevation_change(&self) -> i32 {
        self.elevation_change
    }

    /// Whether leaving in `direction` fires these stairs
    pub fn triggers_for(&self, direction: Direction) -> bool {
        self.exit_direction == Some(direction)
    }

    /// Whether the stairs lead to a higher floor
    pub fn goes_up(&self) -> bool {
        self.elevation_change > 0
    }

    /// Whether the stairs lead to a lower floor
    pub fn goes_down(&self) -> bool {
        self.elevation_change < 0
    }

    /// Elevation after taking the stairs from `current`, clamped to the
    /// packable elevation range
    pub fn target_elevation(&self, current: i32) -> i32 {
        TileCoord::clamp_elevation(current.saturating_add(self.elevation_change))
    }

    #[must_use]
    pub fn with_exit_direction(&self, exit_direction: Option<Direction>) -> Self {
        Self {
            exit_direction,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_elevation_change(&self, elevation_change: i32) -> Self {
        Self {
            elevation_change,
            ..self.clone()
        }
    }

    /// Check direction and delta are set
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.exit_direction.is_none() {
            errors.push("Stairs require an exit direction".to_string());
        }
        if self.elevation_change == 0 {
            errors.push("Stairs elevation change cannot be 0".to_string());
        }
        errors
    }
}

impl Default for StairsTriggerData {
    fn default() -> Self {
        Self {
            activation_mode: ActivationMode::OnExit,
            one_shot: false,
            player_only: false,
            exit_direction: Some(Direction::Up),
            elevation_change: 1,
        }
    }
}
