//! Warp: teleport on contact

use super::is_blank;
use crate::mode::{ActivationMode, TransitionType};
use serde::{Deserialize, Serialize};

/// Teleports the entity to a spawn point, in this scene or another.
///
/// An empty `target_scene` means the current scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WarpTriggerData {
    activation_mode: ActivationMode,
    one_shot: bool,
    player_only: bool,
    target_scene: String,
    target_spawn_id: String,
    transition: TransitionType,
}

trigger_common!(WarpTriggerData);

impl WarpTriggerData {
    /// Warp to `target_spawn_id` in `target_scene`
    pub fn new(target_scene: impl Into<String>, target_spawn_id: impl Into<String>) -> Self {
        Self {
            target_scene: target_scene.into(),
            target_spawn_id: target_spawn_id.into(),
            ..Self::default()
        }
    }

    /// Warp to a spawn point in the current scene
    pub fn same_scene(target_spawn_id: impl Into<String>) -> Self {
        Self::new("", target_spawn_id)
    }

    /// Destination scene; empty means the current scene
    pub fn target_scene(&self) -> &str {
        &self.target_scene
    }

    /// Destination spawn point
    pub fn target_spawn_id(&self) -> &str {
        &self.target_spawn_id
    }

    /// Screen transition
    pub fn transition(&self) -> TransitionType {
        self.transition
    }

    /// Whether a spawn id is set
    pub fn has_destination(&self) -> bool {
        !is_blank(&self.target_spawn_id)
    }

    /// Whether the warp leaves the current scene
    pub fn is_cross_scene(&self) -> bool {
        !is_blank(&self.target_scene)
    }

    #[must_use]
    pub fn with_target_scene(&self, target_scene: impl Into<String>) -> Self {
        Self {
            target_scene: target_scene.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_target_spawn_id(&self, target_spawn_id: impl Into<String>) -> Self {
        Self {
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

    /// Check the warp has a spawn id
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.has_destination() {
            errors.push("Warp requires a target spawn id".to_string());
        }
        errors
    }
}

impl Default for WarpTriggerData {
    fn default() -> Self {
        Self {
            activation_mode: ActivationMode::OnEnter,
            one_shot: false,
            player_only: false,
            target_scene: String::new(),
            target_spawn_id: String::new(),
            transition: TransitionType::Fade,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_scene_warp() {
        let warp = WarpTriggerData::same_scene("spawnA");
        assert!(warp.has_destination());
        assert!(!warp.is_cross_scene());
        assert!(warp.validate().is_empty());
    }

    #[test]
    fn test_cross_scene_warp() {
        let warp = WarpTriggerData::new("cave", "entrance");
        assert!(warp.is_cross_scene());
        assert_eq!(warp.target_scene(), "cave");
    }

    #[test]
    fn test_blank_spawn_is_invalid() {
        let warp = WarpTriggerData::same_scene("   ");
        assert_eq!(warp.validate().len(), 1);
        assert!(WarpTriggerData::default().validate().len() == 1);
    }

    #[test]
    fn test_with_does_not_mutate() {
        let warp = WarpTriggerData::same_scene("a");
        let moved = warp.with_target_spawn_id("b").with_transition(TransitionType::Instant);
        assert_eq!(warp.target_spawn_id(), "a");
        assert_eq!(warp.transition(), TransitionType::Fade);
        assert_eq!(moved.target_spawn_id(), "b");
        assert_eq!(moved.transition(), TransitionType::Instant);
    }
}
