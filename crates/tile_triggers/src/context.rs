//! Per-dispatch trigger context

use crate::data::{TriggerData, TriggerVariant};
use crate::mode::ActivationMode;
use std::fmt;
use tile_grid::{Direction, GridEntity, TileCoord};

/// Everything a handler needs for one firing.
///
/// Built by [`TriggerSystem`](crate::system::TriggerSystem) and dropped when
/// the dispatch returns; never stored across frames.
pub struct TriggerContext<'a> {
    /// The entity that fired the trigger
    pub entity: &'a mut dyn GridEntity,
    /// Trigger tile
    pub coord: TileCoord,
    /// Configuration of the trigger tile
    pub data: &'a TriggerData,
    /// Event class that fired
    pub mode: ActivationMode,
    /// Direction the entity left in; only set for exit events
    pub exit_direction: Option<Direction>,
}

impl<'a> TriggerContext<'a> {
    /// Context for an entity stepping onto the tile
    pub fn enter(entity: &'a mut dyn GridEntity, coord: TileCoord, data: &'a TriggerData) -> Self {
        Self {
            entity,
            coord,
            data,
            mode: ActivationMode::OnEnter,
            exit_direction: None,
        }
    }

    /// Context for an entity leaving the tile toward `exit_direction`
    pub fn exit(
        entity: &'a mut dyn GridEntity,
        coord: TileCoord,
        data: &'a TriggerData,
        exit_direction: Direction,
    ) -> Self {
        Self {
            entity,
            coord,
            data,
            mode: ActivationMode::OnExit,
            exit_direction: Some(exit_direction),
        }
    }

    /// Context for an interact press
    pub fn interact(entity: &'a mut dyn GridEntity, coord: TileCoord, data: &'a TriggerData) -> Self {
        Self {
            entity,
            coord,
            data,
            mode: ActivationMode::OnInteract,
            exit_direction: None,
        }
    }

    /// Tile x
    pub fn x(&self) -> i32 {
        self.coord.x
    }

    /// Tile y
    pub fn y(&self) -> i32 {
        self.coord.y
    }

    /// Tile elevation
    pub fn elevation(&self) -> i32 {
        self.coord.elevation
    }

    /// Trigger data as a concrete variant
    pub fn data_as<T: TriggerVariant>(&self) -> Option<&'a T> {
        T::from_data(self.data)
    }

    /// Whether an enter event fired
    pub fn is_enter(&self) -> bool {
        self.mode == ActivationMode::OnEnter
    }

    /// Whether an exit event fired
    pub fn is_exit(&self) -> bool {
        self.mode == ActivationMode::OnExit
    }

    /// Whether an interact press fired
    pub fn is_interact(&self) -> bool {
        self.mode == ActivationMode::OnInteract
    }
}

// Manual Debug implementation (entity is a trait object)
impl fmt::Debug for TriggerContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerContext")
            .field("entity", &self.entity.name())
            .field("coord", &self.coord)
            .field("kind", &self.data.kind())
            .field("mode", &self.mode)
            .field("exit_direction", &self.exit_direction)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{StairsTriggerData, WarpTriggerData};
    use tile_grid::SimpleEntity;

    #[test]
    fn test_exit_context_carries_direction() {
        let mut entity = SimpleEntity::new(1, "Player");
        let data: TriggerData = StairsTriggerData::default().into();
        let ctx = TriggerContext::exit(&mut entity, TileCoord::new(1, 2, 3), &data, Direction::Up);

        assert!(ctx.is_exit());
        assert_eq!(ctx.exit_direction, Some(Direction::Up));
        assert_eq!((ctx.x(), ctx.y(), ctx.elevation()), (1, 2, 3));
        assert!(ctx.data_as::<StairsTriggerData>().is_some());
    }

    #[test]
    fn test_enter_context_has_no_direction() {
        let mut entity = SimpleEntity::new(1, "Player");
        let data: TriggerData = WarpTriggerData::same_scene("a").into();
        let ctx = TriggerContext::enter(&mut entity, TileCoord::new(0, 0, 0), &data);

        assert!(ctx.is_enter());
        assert!(ctx.exit_direction.is_none());
        assert!(ctx.data_as::<StairsTriggerData>().is_none());
    }
}
