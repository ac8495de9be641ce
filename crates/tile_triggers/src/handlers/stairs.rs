//! Stairs handler

use super::TriggerHandler;
use crate::context::TriggerContext;
use crate::data::StairsTriggerData;
use tile_grid::GridEntity;

/// Notified after an elevation change: `(entity, from, to, data)`
pub type ElevationChangedCallback =
    Box<dyn Fn(&dyn GridEntity, i32, i32, &StairsTriggerData) + Send + Sync>;

/// Applies `elevation_change` to the entity's grid movement when it leaves
/// in the configured direction. Other directions are ignored.
#[derive(Default)]
pub struct StairsHandler {
    on_elevation_changed: Option<ElevationChangedCallback>,
}

impl StairsHandler {
    /// Create a stairs handler with no notification
    pub fn new() -> Self {
        Self::default()
    }

    /// Optional notification after the elevation is written
    pub fn on_elevation_changed<F>(mut self, f: F) -> Self
    where
        F: Fn(&dyn GridEntity, i32, i32, &StairsTriggerData) + Send + Sync + 'static,
    {
        self.on_elevation_changed = Some(Box::new(f));
        self
    }
}

impl TriggerHandler for StairsHandler {
    fn handle(&self, ctx: &mut TriggerContext<'_>) {
        let Some(stairs) = ctx.data_as::<StairsTriggerData>() else {
            log::error!(
                "StairsHandler received {} data at {}",
                ctx.data.type_name(),
                ctx.coord
            );
            return;
        };

        let Some(direction) = ctx.exit_direction else {
            log::error!(
                "Stairs at {} fired by {} without an exit direction; stairs must use ON_EXIT",
                ctx.coord,
                ctx.mode
            );
            return;
        };

        if !stairs.triggers_for(direction) {
            log::debug!("Stairs at {} ignore exit {}", ctx.coord, direction);
            return;
        }

        let coord = ctx.coord;
        let Some(movement) = ctx.entity.grid_movement_mut() else {
            log::warn!("Stairs at {} fired by an entity without grid movement", coord);
            return;
        };

        let from = movement.elevation();
        let to = stairs.target_elevation(from);
        if i64::from(to) - i64::from(from) != i64::from(stairs.elevation_change()) {
            log::warn!("Stairs at {}: elevation {} {:+} clamped to {}", coord, from, stairs.elevation_change(), to);
        }
        movement.set_elevation(to);
        log::debug!("Stairs at {}: elevation {} -> {}", coord, from, to);

        if let Some(notify) = &self.on_elevation_changed {
            notify(&*ctx.entity, from, to, stairs);
        }
    }
}

impl std::fmt::Debug for StairsHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StairsHandler")
            .field("on_elevation_changed", &self.on_elevation_changed.is_some())
            .finish()
    }
}
