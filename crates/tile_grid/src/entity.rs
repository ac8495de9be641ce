//! Collaborator traits for entities standing on the grid

/// Elevation access on an entity's grid-movement component
pub trait GridMovement {
    fn elevation(&self) -> i32;
    fn set_elevation(&mut self, elevation: i32);
}

/// The parts of a scene entity the trigger layer looks at
pub trait GridEntity {
    /// Stable entity id
    fn id(&self) -> u64;

    /// Display/debug name
    fn name(&self) -> &str;

    /// Grid-movement component, if the entity has one
    fn grid_movement(&self) -> Option<&dyn GridMovement> {
        None
    }

    fn grid_movement_mut(&mut self) -> Option<&mut dyn GridMovement> {
        None
    }
}

/// Minimal grid-movement state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleMovement {
    pub elevation: i32,
}

impl GridMovement for SimpleMovement {
    fn elevation(&self) -> i32 {
        self.elevation
    }

    fn set_elevation(&mut self, elevation: i32) {
        self.elevation = elevation;
    }
}

/// Headless entity with a name and optional movement component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleEntity {
    pub id: u64,
    pub name: String,
    pub movement: Option<SimpleMovement>,
}

impl SimpleEntity {
    /// Create an entity that can move (elevation 0)
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            movement: Some(SimpleMovement::default()),
        }
    }

    /// Set starting elevation
    pub fn with_elevation(mut self, elevation: i32) -> Self {
        self.movement = Some(SimpleMovement { elevation });
        self
    }

    /// Remove the movement component
    pub fn without_movement(mut self) -> Self {
        self.movement = None;
        self
    }

    /// Current elevation, if the entity can move
    pub fn elevation(&self) -> Option<i32> {
        self.movement.map(|m| m.elevation)
    }
}

impl GridEntity for SimpleEntity {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn grid_movement(&self) -> Option<&dyn GridMovement> {
        self.movement.as_ref().map(|m| m as &dyn GridMovement)
    }

    fn grid_movement_mut(&mut self) -> Option<&mut dyn GridMovement> {
        self.movement.as_mut().map(|m| m as &mut dyn GridMovement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_entity_movement() {
        let mut entity = SimpleEntity::new(1, "Player").with_elevation(2);
        assert_eq!(entity.grid_movement().map(|m| m.elevation()), Some(2));

        if let Some(movement) = entity.grid_movement_mut() {
            movement.set_elevation(3);
        }
        assert_eq!(entity.elevation(), Some(3));
    }

    #[test]
    fn test_entity_without_movement() {
        let mut entity = SimpleEntity::new(2, "Crate").without_movement();
        assert!(entity.grid_movement().is_none());
        assert!(entity.grid_movement_mut().is_none());
    }
}
