//! Collision types and the collision-type grid

use crate::coord::{PackedCoord, TileCoord};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What occupies a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollisionType {
    /// Open floor
    #[default]
    None,
    /// Blocks movement
    Solid,
    /// Needs swimming
    Water,
    /// One-way drop
    Ledge,
    /// Teleports on contact
    Warp,
    /// Door (may be locked)
    Door,
    /// Changes elevation
    Stairs,
    /// Named arrival anchor, never fires
    SpawnPoint,
    /// Generic scripted trigger
    Trigger,
}

impl CollisionType {
    /// Whether a tile of this type can dispatch trigger behavior
    pub const fn is_trigger(self) -> bool {
        matches!(self, Self::Warp | Self::Door | Self::Stairs | Self::Trigger)
    }

    /// Whether an entity may stand on a tile of this type
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Solid | Self::Water)
    }
}

/// Read access to the collision-type grid
pub trait CollisionGrid {
    /// Collision type at a tile; unknown tiles are [`CollisionType::None`]
    fn get(&self, x: i32, y: i32, elevation: i32) -> CollisionType;

    fn get_at(&self, coord: TileCoord) -> CollisionType {
        self.get(coord.x, coord.y, coord.elevation)
    }
}

/// Sparse in-memory collision grid
#[derive(Debug, Clone, Default)]
pub struct CollisionMap {
    tiles: HashMap<PackedCoord, CollisionType>,
}

impl CollisionMap {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a tile; `CollisionType::None` clears it.
    ///
    /// Coordinates outside the packable range are logged and ignored, since
    /// their key would alias a tile on the opposite edge.
    pub fn set(&mut self, coord: TileCoord, collision: CollisionType) {
        if let Err(e) = self.try_set(coord, collision) {
            log::warn!("Ignoring {:?} at {}: {}", collision, coord, e);
        }
    }

    /// Set a tile, rejecting coordinates outside the packable range
    pub fn try_set(&mut self, coord: TileCoord, collision: CollisionType) -> Result<()> {
        coord.ensure_packable()?;
        if collision == CollisionType::None {
            self.tiles.remove(&coord.pack());
        } else {
            self.tiles.insert(coord.pack(), collision);
        }
        Ok(())
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, coord: TileCoord, collision: CollisionType) -> Self {
        self.set(coord, collision);
        self
    }

    /// Clear a tile, returning what was there
    pub fn remove(&mut self, coord: TileCoord) -> Option<CollisionType> {
        if !coord.is_packable() {
            return None;
        }
        self.tiles.remove(&coord.pack())
    }

    /// Number of non-`None` tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check if every tile is `None`
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Remove every tile
    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}

impl CollisionGrid for CollisionMap {
    fn get(&self, x: i32, y: i32, elevation: i32) -> CollisionType {
        let coord = TileCoord::new(x, y, elevation);
        if !coord.is_packable() {
            return CollisionType::None;
        }
        self.tiles
            .get(&coord.pack())
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    #[test]
    fn test_trigger_types() {
        assert!(CollisionType::Warp.is_trigger());
        assert!(CollisionType::Door.is_trigger());
        assert!(CollisionType::Stairs.is_trigger());
        assert!(CollisionType::Trigger.is_trigger());
        assert!(!CollisionType::SpawnPoint.is_trigger());
        assert!(!CollisionType::Solid.is_trigger());
        assert!(!CollisionType::None.is_trigger());
    }

    #[test]
    fn test_collision_map() {
        let mut map = CollisionMap::new().with(TileCoord::new(1, 1, 0), CollisionType::Warp);
        assert_eq!(map.get(1, 1, 0), CollisionType::Warp);
        assert_eq!(map.get(1, 1, 1), CollisionType::None);

        map.set(TileCoord::new(1, 1, 0), CollisionType::None);
        assert!(map.is_empty());
    }

    #[test]
    fn test_unpackable_tiles_never_alias() {
        let west_edge = TileCoord::new(TileCoord::MIN_X, 0, 0);
        let past_east_edge = TileCoord::new(TileCoord::MAX_X + 1, 0, 0);
        let mut map = CollisionMap::new().with(west_edge, CollisionType::Door);

        assert_eq!(map.get_at(past_east_edge), CollisionType::None);
        assert!(matches!(
            map.try_set(past_east_edge, CollisionType::Solid),
            Err(GridError::OutOfRange { axis: "x", .. })
        ));

        map.set(past_east_edge, CollisionType::Solid);
        assert_eq!(map.get_at(west_edge), CollisionType::Door);
        assert_eq!(map.remove(past_east_edge), None);
        assert_eq!(map.len(), 1);
    }
}
