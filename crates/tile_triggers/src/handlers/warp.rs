//! Warp handler

use super::TriggerHandler;
use crate::context::TriggerContext;
use crate::data::WarpTriggerData;
use tile_grid::GridEntity;

/// Scene-transition request: `(entity, target_scene, target_spawn_id, data)`.
///
/// An empty `target_scene` means the current scene.
pub type WarpCallback = Box<dyn Fn(&dyn GridEntity, &str, &str, &WarpTriggerData) + Send + Sync>;

/// Forwards warp intent to the game's scene-transition code.
///
/// Never touches the scene itself.
#[derive(Default)]
pub struct WarpHandler {
    on_warp: Option<WarpCallback>,
}

impl WarpHandler {
    /// Create a warp handler with no callback
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scene-transition callback
    pub fn on_warp<F>(mut self, f: F) -> Self
    where
        F: Fn(&dyn GridEntity, &str, &str, &WarpTriggerData) + Send + Sync + 'static,
    {
        self.on_warp = Some(Box::new(f));
        self
    }
}

impl TriggerHandler for WarpHandler {
    fn handle(&self, ctx: &mut TriggerContext<'_>) {
        let Some(warp) = ctx.data_as::<WarpTriggerData>() else {
            log::error!(
                "WarpHandler received {} data at {}",
                ctx.data.type_name(),
                ctx.coord
            );
            return;
        };

        let Some(on_warp) = &self.on_warp else {
            log::warn!("Warp at {} fired but no scene-transition callback is set", ctx.coord);
            return;
        };

        if warp.is_cross_scene() {
            log::debug!(
                "{} warping to '{}' in scene '{}'",
                ctx.entity.name(),
                warp.target_spawn_id(),
                warp.target_scene()
            );
        } else {
            log::debug!(
                "{} warping to '{}' in the current scene",
                ctx.entity.name(),
                warp.target_spawn_id()
            );
        }

        on_warp(&*ctx.entity, warp.target_scene(), warp.target_spawn_id(), warp);
    }
}

impl std::fmt::Debug for WarpHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WarpHandler")
            .field("on_warp", &self.on_warp.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DoorTriggerData, TriggerData};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tile_grid::{SimpleEntity, TileCoord};

    #[test]
    fn test_forwards_destination() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();
        let handler = WarpHandler::new().on_warp(move |entity, scene, spawn, _| {
            assert_eq!(entity.name(), "Player");
            assert_eq!(scene, "cave");
            assert_eq!(spawn, "entrance");
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        let mut player = SimpleEntity::new(1, "Player");
        let data: TriggerData = WarpTriggerData::new("cave", "entrance").into();
        handler.handle(&mut TriggerContext::enter(&mut player, TileCoord::new(0, 0, 0), &data));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_callback_is_noop() {
        let mut player = SimpleEntity::new(1, "Player");
        let data: TriggerData = WarpTriggerData::same_scene("a").into();
        WarpHandler::new().handle(&mut TriggerContext::enter(&mut player, TileCoord::new(0, 0, 0), &data));
    }

    #[test]
    fn test_wrong_data_is_ignored() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();
        let handler = WarpHandler::new().on_warp(move |_, _, _, _| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        let mut player = SimpleEntity::new(1, "Player");
        let data: TriggerData = DoorTriggerData::new().into();
        handler.handle(&mut TriggerContext::enter(&mut player, TileCoord::new(0, 0, 0), &data));

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
