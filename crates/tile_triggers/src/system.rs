//! Trigger system for dispatching tile events

use crate::config::TriggerConfig;
use crate::context::TriggerContext;
use crate::data::{TriggerData, TriggerKind};
use crate::filter::PlayerFilter;
use crate::handlers::TriggerHandler;
use crate::map::TriggerDataMap;
use crate::mode::ActivationMode;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tile_grid::{CollisionGrid, Direction, GridEntity, PackedCoord, TileCoord};

/// The scene data a dispatch reads: collision types and trigger configuration
#[derive(Clone, Copy)]
pub struct TriggerScene<'a> {
    pub collision: &'a dyn CollisionGrid,
    pub triggers: &'a TriggerDataMap,
}

impl<'a> TriggerScene<'a> {
    /// Borrow a scene's collision grid and trigger map
    pub fn new(collision: &'a dyn CollisionGrid, triggers: &'a TriggerDataMap) -> Self {
        Self {
            collision,
            triggers,
        }
    }
}

/// Routes enter/exit/interact events on trigger tiles to per-kind handlers.
///
/// A tile fires only when all of these hold:
/// 1. its collision type is a trigger type
/// 2. it has trigger data
/// 3. the data's activation mode matches the event
/// 4. a `one_shot` tile has not fired yet
/// 5. a `player_only` tile is entered by the player
/// 6. a handler is registered for the data's kind
///
/// Failing 1-5 is a silent no-op; failing 6 is logged. Dispatch never panics
/// and never returns an error.
pub struct TriggerSystem {
    /// Registered handlers (kind -> handler)
    handlers: HashMap<TriggerKind, Box<dyn TriggerHandler>>,
    /// Decides who passes `player_only`
    player_filter: PlayerFilter,
    /// One-shot tiles that already fired
    fired: HashSet<PackedCoord>,
    /// Total handler invocations
    dispatch_count: u64,
}

impl TriggerSystem {
    /// Create a new trigger system with the default player heuristic
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            player_filter: PlayerFilter::default(),
            fired: HashSet::new(),
            dispatch_count: 0,
        }
    }

    /// Create a trigger system whose player filter comes from `config`
    pub fn with_config(config: &TriggerConfig) -> Self {
        Self {
            player_filter: config.player_filter(),
            ..Self::new()
        }
    }

    /// Register a handler, replacing any previous one for `kind`
    pub fn register_handler(&mut self, kind: TriggerKind, handler: impl TriggerHandler + 'static) {
        if self.handlers.insert(kind, Box::new(handler)).is_some() {
            log::debug!("Replaced {} handler", kind);
        }
    }

    /// Builder form of [`register_handler`](Self::register_handler)
    pub fn with_handler(mut self, kind: TriggerKind, handler: impl TriggerHandler + 'static) -> Self {
        self.register_handler(kind, handler);
        self
    }

    /// Unregister a handler; returns whether one was registered
    pub fn unregister_handler(&mut self, kind: TriggerKind) -> bool {
        self.handlers.remove(&kind).is_some()
    }

    /// Check if a handler is registered for `kind`
    pub fn has_handler(&self, kind: TriggerKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Get handler count
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Kinds with a registered handler, sorted
    pub fn registered_kinds(&self) -> Vec<TriggerKind> {
        let mut kinds: Vec<_> = self.handlers.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Replace player detection
    pub fn set_player_filter(&mut self, filter: PlayerFilter) {
        self.player_filter = filter;
    }

    /// Replace player detection with an arbitrary predicate
    pub fn set_player_predicate<F>(&mut self, predicate: F)
    where
        F: Fn(&dyn GridEntity) -> bool + Send + Sync + 'static,
    {
        self.player_filter = PlayerFilter::custom(predicate);
    }

    /// Current player detection
    pub fn player_filter(&self) -> &PlayerFilter {
        &self.player_filter
    }

    /// Check if an entity passes the player filter
    pub fn is_player(&self, entity: &dyn GridEntity) -> bool {
        self.player_filter.passes(entity)
    }

    /// Entity stepped onto a tile. Returns whether a handler ran.
    pub fn on_tile_enter(
        &mut self,
        scene: TriggerScene<'_>,
        entity: &mut dyn GridEntity,
        x: i32,
        y: i32,
        elevation: i32,
    ) -> bool {
        let coord = TileCoord::new(x, y, elevation);
        self.dispatch(scene, entity, coord, ActivationMode::OnEnter, None)
    }

    /// Entity stepped off a tile toward `exit_direction`. Returns whether a
    /// handler ran.
    pub fn on_tile_exit(
        &mut self,
        scene: TriggerScene<'_>,
        entity: &mut dyn GridEntity,
        x: i32,
        y: i32,
        elevation: i32,
        exit_direction: Direction,
    ) -> bool {
        let coord = TileCoord::new(x, y, elevation);
        self.dispatch(scene, entity, coord, ActivationMode::OnExit, Some(exit_direction))
    }

    /// Entity pressed interact while standing at `(x, y)` facing `facing`.
    ///
    /// The entity's own tile is tried first; the faced tile only if the own
    /// tile did not fire. Returns whether a trigger fired.
    pub fn try_interact(
        &mut self,
        scene: TriggerScene<'_>,
        entity: &mut dyn GridEntity,
        x: i32,
        y: i32,
        elevation: i32,
        facing: Direction,
    ) -> bool {
        let own = TileCoord::new(x, y, elevation);
        if self.dispatch(scene, entity, own, ActivationMode::OnInteract, None) {
            return true;
        }
        let Some(faced) = own.checked_neighbor(facing) else {
            log::debug!("{} faces {} off the edge of the world at {}", entity.name(), facing, own);
            return false;
        };
        self.dispatch(scene, entity, faced, ActivationMode::OnInteract, None)
    }

    /// Whether the one-shot trigger at `coord` already fired
    pub fn has_fired(&self, coord: TileCoord) -> bool {
        coord.is_packable() && self.fired.contains(&coord.pack())
    }

    /// Re-arm one one-shot tile; returns whether it had fired
    pub fn reset_one_shot(&mut self, coord: TileCoord) -> bool {
        coord.is_packable() && self.fired.remove(&coord.pack())
    }

    /// Re-arm every one-shot tile (scene reload)
    pub fn reset_all_one_shots(&mut self) {
        self.fired.clear();
    }

    /// Total handler invocations since creation
    pub fn dispatch_count(&self) -> u64 {
        self.dispatch_count
    }

    fn dispatch(
        &mut self,
        scene: TriggerScene<'_>,
        entity: &mut dyn GridEntity,
        coord: TileCoord,
        mode: ActivationMode,
        exit_direction: Option<Direction>,
    ) -> bool {
        // Out-of-range components would alias a tile on the opposite edge
        if !coord.is_packable() {
            log::debug!("Ignoring {} event at unpackable tile {}", mode, coord);
            return false;
        }

        let collision = scene.collision.get_at(coord);
        if !collision.is_trigger() {
            return false;
        }

        // Trigger tiles without data are common while editing
        let Some(data) = scene.triggers.get(coord) else {
            log::debug!("{:?} tile at {} has no trigger data", collision, coord);
            return false;
        };

        if data.activation_mode() != mode {
            return false;
        }

        if data.one_shot() && self.fired.contains(&coord.pack()) {
            log::debug!("One-shot {} at {} already fired", data.kind(), coord);
            return false;
        }

        if data.player_only() && !self.player_filter.passes(&*entity) {
            log::debug!("{} at {} is player-only; ignoring {}", data.kind(), coord, entity.name());
            return false;
        }

        let Some(handler) = self.handlers.get(&data.kind()) else {
            log::error!("No handler registered for {} trigger at {}", data.kind(), coord);
            return false;
        };

        log::debug!("{} fires {} at {} ({})", entity.name(), data.kind(), coord, mode);
        let mut ctx = build_context(entity, coord, data, mode, exit_direction);
        handler.handle(&mut ctx);

        self.dispatch_count += 1;
        if data.one_shot() {
            self.fired.insert(coord.pack());
        }
        true
    }
}

fn build_context<'a>(
    entity: &'a mut dyn GridEntity,
    coord: TileCoord,
    data: &'a TriggerData,
    mode: ActivationMode,
    exit_direction: Option<Direction>,
) -> TriggerContext<'a> {
    match (mode, exit_direction) {
        (ActivationMode::OnExit, Some(direction)) => TriggerContext::exit(entity, coord, data, direction),
        (ActivationMode::OnInteract, _) => TriggerContext::interact(entity, coord, data),
        _ => TriggerContext::enter(entity, coord, data),
    }
}

impl Default for TriggerSystem {
    fn default() -> Self {
        Self::new()
    }
}

// Manual Debug implementation (skip handlers)
impl fmt::Debug for TriggerSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerSystem")
            .field("handlers", &self.registered_kinds())
            .field("player_filter", &self.player_filter)
            .field("fired_one_shots", &self.fired.len())
            .field("dispatch_count", &self.dispatch_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DoorTriggerData, StairsTriggerData, WarpTriggerData};
    use crate::handlers::handler_fn;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tile_grid::{CollisionMap, CollisionType, SimpleEntity};

    fn counting_handler(counter: &Arc<AtomicU32>) -> impl TriggerHandler + 'static {
        let counter = counter.clone();
        handler_fn(move |_ctx| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_handler_registry() {
        let mut system = TriggerSystem::new();
        let counter = Arc::new(AtomicU32::new(0));

        system.register_handler(TriggerKind::Warp, counting_handler(&counter));
        system.register_handler(TriggerKind::Warp, counting_handler(&counter));
        system.register_handler(TriggerKind::Door, counting_handler(&counter));

        assert_eq!(system.handler_count(), 2);
        assert!(system.has_handler(TriggerKind::Warp));
        assert!(!system.has_handler(TriggerKind::Stairs));
        assert_eq!(system.registered_kinds(), vec![TriggerKind::Warp, TriggerKind::Door]);

        assert!(system.unregister_handler(TriggerKind::Warp));
        assert!(!system.unregister_handler(TriggerKind::Warp));
        assert_eq!(system.handler_count(), 1);
    }

    #[test]
    fn test_non_trigger_tile_never_dispatches() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut system = TriggerSystem::new().with_handler(TriggerKind::Warp, counting_handler(&counter));

        let coord = TileCoord::new(1, 1, 0);
        let collision = CollisionMap::new().with(coord, CollisionType::Solid);
        let triggers = TriggerDataMap::new().with(coord, WarpTriggerData::same_scene("a"));
        let mut player = SimpleEntity::new(1, "Player");

        assert!(!system.on_tile_enter(TriggerScene::new(&collision, &triggers), &mut player, 1, 1, 0));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_trigger_tile_without_data_is_noop() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut system = TriggerSystem::new().with_handler(TriggerKind::Warp, counting_handler(&counter));

        let collision = CollisionMap::new().with(TileCoord::new(1, 1, 0), CollisionType::Warp);
        let triggers = TriggerDataMap::new();
        let mut player = SimpleEntity::new(1, "Player");

        assert!(!system.on_tile_enter(TriggerScene::new(&collision, &triggers), &mut player, 1, 1, 0));
    }

    #[test]
    fn test_missing_handler_is_logged_noop() {
        let mut system = TriggerSystem::new();
        let coord = TileCoord::new(0, 0, 0);
        let collision = CollisionMap::new().with(coord, CollisionType::Warp);
        let triggers = TriggerDataMap::new().with(coord, WarpTriggerData::same_scene("a"));
        let mut player = SimpleEntity::new(1, "Player");

        assert!(!system.on_tile_enter(TriggerScene::new(&collision, &triggers), &mut player, 0, 0, 0));
        assert_eq!(system.dispatch_count(), 0);
    }

    #[test]
    fn test_mode_gating() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut system = TriggerSystem::new()
            .with_handler(TriggerKind::Warp, counting_handler(&counter))
            .with_handler(TriggerKind::Stairs, counting_handler(&counter));

        let enter_tile = TileCoord::new(0, 0, 0);
        let exit_tile = TileCoord::new(1, 0, 0);
        let collision = CollisionMap::new()
            .with(enter_tile, CollisionType::Warp)
            .with(exit_tile, CollisionType::Stairs);
        let triggers = TriggerDataMap::new()
            .with(enter_tile, WarpTriggerData::same_scene("a"))
            .with(exit_tile, StairsTriggerData::up(Direction::Up));
        let scene = TriggerScene::new(&collision, &triggers);
        let mut player = SimpleEntity::new(1, "Player");

        assert!(!system.on_tile_exit(scene, &mut player, 0, 0, 0, Direction::Up));
        assert!(!system.on_tile_enter(scene, &mut player, 1, 0, 0));
        assert!(!system.try_interact(scene, &mut player, 0, 0, 0, Direction::Right));
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        assert!(system.on_tile_enter(scene, &mut player, 0, 0, 0));
        assert!(system.on_tile_exit(scene, &mut player, 1, 0, 0, Direction::Up));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_player_only_gating() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut system = TriggerSystem::new().with_handler(TriggerKind::Warp, counting_handler(&counter));

        let coord = TileCoord::new(0, 0, 0);
        let collision = CollisionMap::new().with(coord, CollisionType::Warp);
        let triggers = TriggerDataMap::new()
            .with(coord, WarpTriggerData::same_scene("a").with_player_only(true));
        let scene = TriggerScene::new(&collision, &triggers);

        let mut npc = SimpleEntity::new(2, "Villager");
        assert!(!system.on_tile_enter(scene, &mut npc, 0, 0, 0));

        let mut player = SimpleEntity::new(1, "player");
        assert!(system.on_tile_enter(scene, &mut player, 0, 0, 0));

        system.set_player_predicate(|e| e.id() == 2);
        assert!(system.on_tile_enter(scene, &mut npc, 0, 0, 0));
        assert!(!system.on_tile_enter(scene, &mut player, 0, 0, 0));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_one_shot_fires_once_until_reset() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut system = TriggerSystem::new().with_handler(TriggerKind::Door, counting_handler(&counter));

        let coord = TileCoord::new(3, 3, 0);
        let collision = CollisionMap::new().with(coord, CollisionType::Door);
        let triggers = TriggerDataMap::new().with(
            coord,
            DoorTriggerData::new()
                .with_activation_mode(ActivationMode::OnEnter)
                .with_one_shot(true),
        );
        let scene = TriggerScene::new(&collision, &triggers);
        let mut player = SimpleEntity::new(1, "Player");

        assert!(system.on_tile_enter(scene, &mut player, 3, 3, 0));
        assert!(system.has_fired(coord));
        assert!(!system.on_tile_enter(scene, &mut player, 3, 3, 0));

        assert!(system.reset_one_shot(coord));
        assert!(system.on_tile_enter(scene, &mut player, 3, 3, 0));
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        system.reset_all_one_shots();
        assert!(!system.has_fired(coord));
    }

    #[test]
    fn test_one_shot_not_consumed_without_handler() {
        let mut system = TriggerSystem::new();
        let coord = TileCoord::new(0, 0, 0);
        let collision = CollisionMap::new().with(coord, CollisionType::Warp);
        let triggers = TriggerDataMap::new().with(coord, WarpTriggerData::same_scene("a").with_one_shot(true));
        let mut player = SimpleEntity::new(1, "Player");

        assert!(!system.on_tile_enter(TriggerScene::new(&collision, &triggers), &mut player, 0, 0, 0));
        assert!(!system.has_fired(coord));
    }

    /// Collision grid that reports every tile at the west edge as a door,
    /// so an aliased key would fire.
    struct WestEdgeDoors;

    impl CollisionGrid for WestEdgeDoors {
        fn get(&self, x: i32, _y: i32, _elevation: i32) -> CollisionType {
            if TileCoord::new(x, 0, 0).pack() == TileCoord::new(TileCoord::MIN_X, 0, 0).pack() {
                CollisionType::Door
            } else {
                CollisionType::None
            }
        }
    }

    #[test]
    fn test_interact_at_world_edge_does_not_wrap() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut system = TriggerSystem::new().with_handler(TriggerKind::Door, counting_handler(&counter));

        let west_edge = TileCoord::new(TileCoord::MIN_X, 0, 0);
        let collision = CollisionMap::new().with(west_edge, CollisionType::Door);
        let triggers = TriggerDataMap::new().with(west_edge, DoorTriggerData::new());
        let scene = TriggerScene::new(&collision, &triggers);
        let mut player = SimpleEntity::new(1, "Player");

        assert!(!system.try_interact(scene, &mut player, TileCoord::MAX_X, 0, 0, Direction::Right));
        assert!(system.try_interact(scene, &mut player, TileCoord::MIN_X + 1, 0, 0, Direction::Left));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unpackable_tile_never_dispatches() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut system = TriggerSystem::new().with_handler(TriggerKind::Door, counting_handler(&counter));

        let west_edge = TileCoord::new(TileCoord::MIN_X, 0, 0);
        let triggers = TriggerDataMap::new().with(
            west_edge,
            DoorTriggerData::new().with_activation_mode(ActivationMode::OnEnter),
        );
        let scene = TriggerScene::new(&WestEdgeDoors, &triggers);
        let mut player = SimpleEntity::new(1, "Player");

        assert!(!system.on_tile_enter(scene, &mut player, TileCoord::MAX_X + 1, 0, 0));
        assert!(!system.on_tile_enter(scene, &mut player, TileCoord::MIN_X, 0, 1 << 16));
        assert!(system.on_tile_enter(scene, &mut player, TileCoord::MIN_X, 0, 0));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_config_player_pattern() {
        let config = TriggerConfig {
            player_name_pattern: "Hero".to_string(),
            ..TriggerConfig::default()
        };
        let system = TriggerSystem::with_config(&config);
        assert!(system.is_player(&SimpleEntity::new(1, "the_hero")));
        assert!(!system.is_player(&SimpleEntity::new(2, "Player")));
    }
}
