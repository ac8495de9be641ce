//! Tile Triggers - Tile-Grid Trigger System
//!
//! This crate attaches behavior to special tiles of a grid map and fires it
//! when entities move over or interact with them.
//!
//! # Features
//!
//! - Warp, door, stairs and spawn-point trigger data
//! - Enter/Exit/Interact activation modes
//! - Player-only and one-shot triggers
//! - Sparse per-scene trigger storage keyed by packed coordinates
//! - Self-describing `{"type", "data"}` JSON envelopes
//!
//! # Example
//!
//! ```ignore
//! use tile_triggers::prelude::*;
//!
//! let mut system = TriggerSystem::new();
//! system.register_handler(
//!     TriggerKind::Warp,
//!     WarpHandler::new().on_warp(|_entity, scene, spawn, _data| {
//!         println!("warp to {scene}:{spawn}");
//!     }),
//! );
//!
//! let coord = TileCoord::new(5, 5, 0);
//! let collision = CollisionMap::new().with(coord, CollisionType::Warp);
//! let triggers = TriggerDataMap::new().with(coord, WarpTriggerData::same_scene("spawnA"));
//!
//! let mut player = SimpleEntity::new(1, "Player");
//! system.on_tile_enter(TriggerScene::new(&collision, &triggers), &mut player, 5, 5, 0);
//! ```

pub mod config;
pub mod context;
pub mod data;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod map;
pub mod mode;
pub mod registry;
pub mod system;

pub mod prelude {
    pub use crate::config::TriggerConfig;
    pub use crate::context::TriggerContext;
    pub use crate::data::{
        DoorDestination, DoorTriggerData, SpawnPointTriggerData, StairsTriggerData, TriggerData,
        TriggerKind, TriggerVariant, WarpTriggerData,
    };
    pub use crate::error::{Result, TriggerError};
    pub use crate::filter::PlayerFilter;
    pub use crate::handlers::{handler_fn, DoorHandler, StairsHandler, TriggerHandler, WarpHandler};
    pub use crate::map::TriggerDataMap;
    pub use crate::mode::{ActivationMode, TransitionType};
    pub use crate::registry::{TriggerTypeRegistry, VariantEntry};
    pub use crate::system::{TriggerScene, TriggerSystem};
    pub use tile_grid::prelude::{
        CollisionGrid, CollisionMap, CollisionType, Direction, GridEntity, GridMovement, PackedCoord,
        SimpleEntity, TileCoord,
    };
}

pub use prelude::*;
