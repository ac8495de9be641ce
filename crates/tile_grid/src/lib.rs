//! # tile_grid - Tile Grid Primitives
//!
//! The spatial vocabulary shared by everything that walks on a tile map:
//!
//! - [`TileCoord`]: `(x, y, elevation)` address packed into one `u64` key
//! - [`Direction`]: the four cardinal moves with their grid deltas
//! - [`CollisionType`]: what occupies a tile, and whether it can fire a trigger
//! - Collaborator traits ([`CollisionGrid`], [`GridMovement`], [`GridEntity`])
//!   that the trigger layer consumes without knowing the scene model
//!
//! Small in-memory implementations ([`CollisionMap`], [`SimpleEntity`]) make
//! the crate usable headless.

pub mod collision;
pub mod coord;
pub mod direction;
pub mod entity;
pub mod error;

pub use collision::*;
pub use coord::*;
pub use direction::*;
pub use entity::*;
pub use error::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::collision::{CollisionGrid, CollisionMap, CollisionType};
    pub use crate::coord::{PackedCoord, TileCoord};
    pub use crate::direction::Direction;
    pub use crate::entity::{GridEntity, GridMovement, SimpleEntity, SimpleMovement};
    pub use crate::error::{GridError, Result};
}
