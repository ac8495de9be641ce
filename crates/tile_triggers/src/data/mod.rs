//! Trigger configuration data
//!
//! Each trigger tile carries one immutable [`TriggerData`] value. The variant
//! set is closed: [`TriggerKind::ALL`] lists every variant, and every `match`
//! over [`TriggerData`] is exhaustive.
//!
//! Values are never mutated in place. The `with_*` builders take `&self` and
//! return a modified copy, so an instance shared with editor undo history is
//! never changed behind its back.

use crate::mode::ActivationMode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use tile_grid::CollisionType;

/// Accessors and copy-on-write builders shared by every variant
macro_rules! trigger_common {
    ($ty:ty) => {
        impl $ty {
            /// Event class that fires this trigger
            pub fn activation_mode(&self) -> $crate::mode::ActivationMode {
                self.activation_mode
            }

            /// Whether the trigger fires at most once per scene load
            pub fn one_shot(&self) -> bool {
                self.one_shot
            }

            /// Whether only the player may fire the trigger
            pub fn player_only(&self) -> bool {
                self.player_only
            }

            #[must_use]
            pub fn with_activation_mode(&self, activation_mode: $crate::mode::ActivationMode) -> Self {
                Self {
                    activation_mode,
                    ..self.clone()
                }
            }

            #[must_use]
            pub fn with_one_shot(&self, one_shot: bool) -> Self {
                Self {
                    one_shot,
                    ..self.clone()
                }
            }

            #[must_use]
            pub fn with_player_only(&self, player_only: bool) -> Self {
                Self {
                    player_only,
                    ..self.clone()
                }
            }
        }
    };
}

mod door;
mod spawn;
mod stairs;
mod warp;

pub use door::{DoorDestination, DoorTriggerData};
pub use spawn::SpawnPointTriggerData;
pub use stairs::StairsTriggerData;
pub use warp::WarpTriggerData;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Discriminant of the closed variant set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TriggerKind {
    Warp,
    Door,
    Stairs,
    SpawnPoint,
}

impl TriggerKind {
    pub const ALL: [TriggerKind; 4] = [Self::Warp, Self::Door, Self::Stairs, Self::SpawnPoint];

    /// Wire name used in the `"type"` field of an envelope
    pub const fn name(self) -> &'static str {
        match self {
            Self::Warp => "Warp",
            Self::Door => "Door",
            Self::Stairs => "Stairs",
            Self::SpawnPoint => "SpawnPoint",
        }
    }

    /// Collision type a tile holding this kind should carry
    pub const fn collision_type(self) -> CollisionType {
        match self {
            Self::Warp => CollisionType::Warp,
            Self::Door => CollisionType::Door,
            Self::Stairs => CollisionType::Stairs,
            Self::SpawnPoint => CollisionType::SpawnPoint,
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Implemented by each concrete variant struct.
///
/// Lets generic code (the type registry, [`TriggerDataMap::get_by_type`]
/// lookups, handlers) move between a variant and [`TriggerData`].
///
/// [`TriggerDataMap::get_by_type`]: crate::map::TriggerDataMap::get_by_type
pub trait TriggerVariant:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Into<TriggerData> + Send + Sync + 'static
{
    const KIND: TriggerKind;

    /// Borrow the variant out of `data` if it is this kind
    fn from_data(data: &TriggerData) -> Option<&Self>;

    /// Editor-time configuration problems; empty when valid
    fn validate(&self) -> Vec<String>;

    fn collision_type(&self) -> CollisionType {
        Self::KIND.collision_type()
    }
}

/// Per-tile trigger configuration
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerData {
    Warp(WarpTriggerData),
    Door(DoorTriggerData),
    Stairs(StairsTriggerData),
    SpawnPoint(SpawnPointTriggerData),
}

impl TriggerData {
    /// Discriminant of the variant
    pub fn kind(&self) -> TriggerKind {
        match self {
            Self::Warp(_) => TriggerKind::Warp,
            Self::Door(_) => TriggerKind::Door,
            Self::Stairs(_) => TriggerKind::Stairs,
            Self::SpawnPoint(_) => TriggerKind::SpawnPoint,
        }
    }

    /// Wire name of the variant
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Event class that fires the trigger
    pub fn activation_mode(&self) -> ActivationMode {
        match self {
            Self::Warp(d) => d.activation_mode(),
            Self::Door(d) => d.activation_mode(),
            Self::Stairs(d) => d.activation_mode(),
            Self::SpawnPoint(d) => d.activation_mode(),
        }
    }

    /// Whether the trigger fires at most once
    pub fn one_shot(&self) -> bool {
        match self {
            Self::Warp(d) => d.one_shot(),
            Self::Door(d) => d.one_shot(),
            Self::Stairs(d) => d.one_shot(),
            Self::SpawnPoint(d) => d.one_shot(),
        }
    }

    /// Whether only the player may fire the trigger
    pub fn player_only(&self) -> bool {
        match self {
            Self::Warp(d) => d.player_only(),
            Self::Door(d) => d.player_only(),
            Self::Stairs(d) => d.player_only(),
            Self::SpawnPoint(d) => d.player_only(),
        }
    }

    /// Collision type the tile should carry
    pub fn collision_type(&self) -> CollisionType {
        self.kind().collision_type()
    }

    /// Editor-time validation. Never fails; returns readable problems.
    pub fn validate(&self) -> Vec<String> {
        match self {
            Self::Warp(d) => d.validate(),
            Self::Door(d) => d.validate(),
            Self::Stairs(d) => d.validate(),
            Self::SpawnPoint(d) => d.validate(),
        }
    }

    /// Check if [`validate`](Self::validate) found no problems
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Borrow as a concrete variant
    pub fn as_variant<T: TriggerVariant>(&self) -> Option<&T> {
        T::from_data(self)
    }

    /// Default instance of every kind, in [`TriggerKind::ALL`] order
    pub fn defaults() -> Vec<TriggerData> {
        TriggerKind::ALL
            .iter()
            .map(|kind| match kind {
                TriggerKind::Warp => WarpTriggerData::default().into(),
                TriggerKind::Door => DoorTriggerData::default().into(),
                TriggerKind::Stairs => StairsTriggerData::default().into(),
                TriggerKind::SpawnPoint => SpawnPointTriggerData::default().into(),
            })
            .collect()
    }
}

macro_rules! variant_conversions {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for TriggerData {
            fn from(data: $ty) -> Self {
                TriggerData::$variant(data)
            }
        }

        impl TriggerVariant for $ty {
            const KIND: TriggerKind = TriggerKind::$variant;

            fn from_data(data: &TriggerData) -> Option<&Self> {
                match data {
                    TriggerData::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn validate(&self) -> Vec<String> {
                <$ty>::validate(self)
            }
        }
    };
}

variant_conversions!(Warp, WarpTriggerData);
variant_conversions!(Door, DoorTriggerData);
variant_conversions!(Stairs, StairsTriggerData);
variant_conversions!(SpawnPoint, SpawnPointTriggerData);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        for (data, kind) in TriggerData::defaults().iter().zip(TriggerKind::ALL) {
            assert_eq!(data.kind(), kind);
            assert_eq!(data.collision_type(), kind.collision_type());
        }
    }

    #[test]
    fn test_every_kind_has_unique_name() {
        let mut names: Vec<_> = TriggerKind::ALL.iter().map(|k| k.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), TriggerKind::ALL.len());
    }

    #[test]
    fn test_as_variant() {
        let data: TriggerData = WarpTriggerData::same_scene("spawnA").into();
        assert!(data.as_variant::<WarpTriggerData>().is_some());
        assert!(data.as_variant::<DoorTriggerData>().is_none());
    }

    #[test]
    fn test_common_builders_copy() {
        let original = StairsTriggerData::default();
        let updated = original.with_one_shot(true).with_player_only(true);

        assert!(!original.one_shot());
        assert!(!original.player_only());
        assert!(updated.one_shot());
        assert!(updated.player_only());
        assert_eq!(updated.activation_mode(), original.activation_mode());
    }

    #[test]
    fn test_dispatch_fields_through_enum() {
        let data: TriggerData = DoorTriggerData::default()
            .with_activation_mode(ActivationMode::OnEnter)
            .with_player_only(true)
            .into();
        assert_eq!(data.activation_mode(), ActivationMode::OnEnter);
        assert!(data.player_only());
        assert!(!data.one_shot());
    }
}
