//! Sparse per-tile trigger store
//!
//! Keys are [`TileCoord::pack`] values. On disk the map is a JSON object from
//! `"x,y,elevation"` to a type envelope (see [`crate::registry`]):
//!
//! ```json
//! {
//!   "5,5,0": { "type": "Warp", "data": { "targetSpawnId": "spawnA" } },
//!   "2,9,1": { "type": "Stairs", "data": { "exitDirection": "DOWN", "elevationChange": -1 } }
//! }
//! ```
//!
//! Loading is lenient: an entry with a bad key or an undecodable envelope is
//! logged and skipped, and the rest of the map still loads.

use crate::data::{SpawnPointTriggerData, TriggerData, TriggerKind, TriggerVariant};
use crate::error::{Result, TriggerError};
use crate::registry::TriggerTypeRegistry;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tile_grid::{PackedCoord, TileCoord};

/// Trigger configuration for every trigger tile of a scene
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerDataMap {
    entries: HashMap<PackedCoord, TriggerData>,
}

/// Sort order for unpacked views: row-major, then floor
fn sort_key(coord: &TileCoord) -> (i32, i32, i32) {
    (coord.y, coord.x, coord.elevation)
}

impl TriggerDataMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the trigger at a tile
    pub fn get(&self, coord: TileCoord) -> Option<&TriggerData> {
        if !coord.is_packable() {
            return None;
        }
        self.entries.get(&coord.pack())
    }

    /// Store `data` at `coord`, returning what was there before.
    ///
    /// Coordinates outside the packable range are logged and ignored, since
    /// their key would alias a tile on the opposite edge.
    pub fn set(&mut self, coord: TileCoord, data: impl Into<TriggerData>) -> Option<TriggerData> {
        match self.try_set(coord, data) {
            Ok(previous) => previous,
            Err(e) => {
                log::warn!("Ignoring trigger at {}: {}", coord, e);
                None
            }
        }
    }

    /// Store `data` at `coord`, rejecting coordinates outside the packable range
    pub fn try_set(&mut self, coord: TileCoord, data: impl Into<TriggerData>) -> Result<Option<TriggerData>> {
        let coord = coord.ensure_packable()?;
        Ok(self.entries.insert(coord.pack(), data.into()))
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, coord: TileCoord, data: impl Into<TriggerData>) -> Self {
        self.set(coord, data);
        self
    }

    /// Remove the trigger at a tile
    pub fn remove(&mut self, coord: TileCoord) -> Option<TriggerData> {
        if !coord.is_packable() {
            return None;
        }
        self.entries.remove(&coord.pack())
    }

    /// Check if a tile has a trigger
    pub fn has(&self, coord: TileCoord) -> bool {
        self.get(coord).is_some()
    }

    /// Get trigger count
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map holds no triggers
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every trigger
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Packed keys, unordered
    pub fn keys(&self) -> impl Iterator<Item = PackedCoord> + '_ {
        self.entries.keys().copied()
    }

    /// Raw packed entries, unordered
    pub fn iter(&self) -> impl Iterator<Item = (PackedCoord, &TriggerData)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Every entry with its unpacked coordinate, sorted by y, x, elevation
    pub fn get_all(&self) -> Vec<(TileCoord, &TriggerData)> {
        let mut all: Vec<_> = self
            .entries
            .iter()
            .map(|(packed, data)| (TileCoord::unpack(*packed), data))
            .collect();
        all.sort_by_key(|(coord, _)| sort_key(coord));
        all
    }

    /// Entries of one concrete variant, sorted like [`get_all`](Self::get_all)
    pub fn get_by_type<T: TriggerVariant>(&self) -> Vec<(TileCoord, &T)> {
        self.get_all()
            .into_iter()
            .filter_map(|(coord, data)| T::from_data(data).map(|variant| (coord, variant)))
            .collect()
    }

    /// Entries of one kind, sorted like [`get_all`](Self::get_all)
    pub fn get_by_kind(&self, kind: TriggerKind) -> Vec<(TileCoord, &TriggerData)> {
        self.get_all()
            .into_iter()
            .filter(|(_, data)| data.kind() == kind)
            .collect()
    }

    /// Replace this map's contents with a copy of `other`
    pub fn copy_from(&mut self, other: &TriggerDataMap) {
        self.entries.clone_from(&other.entries);
    }

    /// Coordinate of the spawn point named `id`
    pub fn find_spawn_point(&self, id: &str) -> Option<TileCoord> {
        self.get_by_type::<SpawnPointTriggerData>()
            .into_iter()
            .find(|(_, spawn)| spawn.id() == id)
            .map(|(coord, _)| coord)
    }

    /// Validation problems for every invalid entry, for editor tooling
    pub fn validate_all(&self) -> Vec<(TileCoord, Vec<String>)> {
        self.get_all()
            .into_iter()
            .filter_map(|(coord, data)| {
                let errors = data.validate();
                (!errors.is_empty()).then_some((coord, errors))
            })
            .collect()
    }

    /// Encode as a `"x,y,elevation"` → envelope JSON object
    pub fn to_json_value(&self) -> Result<Value> {
        let registry = TriggerTypeRegistry::global();
        let mut object = Map::new();
        for (coord, data) in self.get_all() {
            object.insert(coord.to_key(), registry.encode(data)?);
        }
        Ok(Value::Object(object))
    }

    /// Decode from a JSON object, skipping bad entries.
    ///
    /// Only a non-object top level is an error.
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            TriggerError::MalformedEnvelope(format!(
                "trigger map must be a JSON object, found {}",
                json_kind(value)
            ))
        })?;

        let registry = TriggerTypeRegistry::global();
        let mut map = Self::new();
        let mut skipped = 0usize;

        for (key, envelope) in object {
            let coord: TileCoord = match key.parse() {
                Ok(coord) => coord,
                Err(e) => {
                    log::warn!("Skipping trigger entry: {}", e);
                    skipped += 1;
                    continue;
                }
            };

            match registry.decode(envelope) {
                Ok(data) => {
                    if map.set(coord, data).is_some() {
                        log::debug!("Trigger key '{}' duplicates {}, keeping the later entry", key, coord);
                    }
                }
                Err(e) => {
                    log::warn!("Skipping trigger at {}: {}", key, e);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            log::warn!(
                "Loaded {} trigger(s), skipped {} malformed entr{}",
                map.len(),
                skipped,
                if skipped == 1 { "y" } else { "ies" }
            );
        } else {
            log::debug!("Loaded {} trigger(s)", map.len());
        }

        Ok(map)
    }

    /// Encode as pretty-printed JSON text
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json_value()?)?)
    }

    /// Decode from JSON text, skipping bad entries
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(&value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Serialize for TriggerDataMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let all = self.get_all();
        let mut map = serializer.serialize_map(Some(all.len()))?;
        for (coord, data) in all {
            map.serialize_entry(&coord.to_key(), data)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TriggerDataMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json_value(&value).map_err(serde::de::Error::custom)
    }
}

impl FromIterator<(TileCoord, TriggerData)> for TriggerDataMap {
    fn from_iter<I: IntoIterator<Item = (TileCoord, TriggerData)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (coord, data) in iter {
            map.set(coord, data);
        }
        map
    }
}
