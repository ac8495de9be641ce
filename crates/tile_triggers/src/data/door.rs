//! Door: optional lock, optional teleport

use super::is_blank;
use crate::mode::{ActivationMode, TransitionType};
use serde::{Deserialize, Deserializer, Serialize};

/// Where an opened door sends the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorDestination {
    /// No spawn id: the door just unlocks/opens where it stands
    UnlockInPlace,
    /// Spawn id without scene: teleport within the current scene
    SameScene,
    /// Spawn id and scene: teleport to another scene
    CrossScene,
}

/// Door that may require a key and may teleport once opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DoorTriggerData {
    activation_mode: ActivationMode,
    one_shot: bool,
    player_only: bool,
    locked: bool,
    required_key: String,
    consume_key: bool,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "blank_as_none")]
    locked_message: Option<String>,
    target_scene: String,
    target_spawn_id: String,
    transition: TransitionType,
}

trigger_common!(DoorTriggerData);

impl DoorTriggerData {
    /// Unlocked door that opens in place
    pub fn new() -> Self {
        Self::default()
    }

    /// Door locked behind `required_key`
    pub fn locked_with(required_key: impl Into<String>) -> Self {
        Self {
            locked: true,
            required_key: required_key.into(),
            ..Self::default()
        }
    }

    /// Whether a key is needed to open
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Key id checked against the entity's inventory
    pub fn required_key(&self) -> &str {
        &self.required_key
    }

    /// Whether opening removes the key
    pub fn consume_key(&self) -> bool {
        self.consume_key
    }

    /// Custom message shown when the key is missing, if one was set.
    /// Blank messages count as unset.
    pub fn locked_message(&self) -> Option<&str> {
        self.locked_message.as_deref().filter(|m| !is_blank(m))
    }

    /// Destination scene; empty means the current scene
    pub fn target_scene(&self) -> &str {
        &self.target_scene
    }

    /// Destination spawn point; empty means unlock in place
    pub fn target_spawn_id(&self) -> &str {
        &self.target_spawn_id
    }

    /// Screen transition for the teleport
    pub fn transition(&self) -> TransitionType {
        self.transition
    }

    /// Whether the door teleports once opened
    pub fn has_destination(&self) -> bool {
        !is_blank(&self.target_spawn_id)
    }

    /// Whether the teleport leaves the current scene
    pub fn is_cross_scene(&self) -> bool {
        self.has_destination() && !is_blank(&self.target_scene)
    }

    /// Classify the door by its destination fields
    pub fn destination(&self) -> DoorDestination {
        if !self.has_destination() {
            DoorDestination::UnlockInPlace
        } else if self.is_cross_scene() {
            DoorDestination::CrossScene
        } else {
            DoorDestination::SameScene
        }
    }

    #[must_use]
    pub fn with_locked(&self, locked: bool) -> Self {
        Self {
            locked,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_required_key(&self, required_key: impl Into<String>) -> Self {
        Self {
            required_key: required_key.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_consume_key(&self, consume_key: bool) -> Self {
        Self {
            consume_key,
            ..self.clone()
        }
    }

    /// Set the locked message; a blank string clears it
    #[must_use]
    pub fn with_locked_message(&self, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            locked_message: (!is_blank(&message)).then_some(message),
            ..self.clone()
        }
    }

    /// Teleport target once opened; empty spawn id means unlock in place
    #[must_use]
    pub fn with_destination(
        &self,
        target_scene: impl Into<String>,
        target_spawn_id: impl Into<String>,
    ) -> Self {
        Self {
            target_scene: target_scene.into(),
            target_spawn_id: target_spawn_id.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_transition(&self, transition: TransitionType) -> Self {
        Self {
            transition,
            ..self.clone()
        }
    }

    /// Check a locked door names its key
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.locked && is_blank(&self.required_key) {
            errors.push("Locked door requires a key".to_string());
        }
        errors
    }
}

impl Default for DoorTriggerData {
    fn default() -> Self {
        Self {
            activation_mode: ActivationMode::OnInteract,
            one_shot: false,
            player_only: false,
            locked: false,
            required_key: String::new(),
            consume_key: false,
            locked_message: None,
            target_scene: String::new(),
            target_spawn_id: String::new(),
            transition: TransitionType::Fade,
        }
    }
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let message = Option::<String>::deserialize(deserializer)?;
    Ok(message.filter(|m| !is_blank(m)))
}
