//! Type registry for polymorphic trigger serialization
//!
//! A [`TriggerData`] is written as an envelope that keeps its concrete type:
//!
//! ```json
//! { "type": "Door", "data": { "locked": true, "requiredKey": "k1" } }
//! ```
//!
//! The name → codec table is built once from [`VARIANTS`]. Each variant
//! registers with a single [`VariantEntry::of`] line; field encoding is left
//! to the variant's serde derive, so this module never changes when a
//! variant gains fields.

use crate::data::{
    DoorTriggerData, SpawnPointTriggerData, StairsTriggerData, TriggerData, TriggerKind,
    TriggerVariant, WarpTriggerData,
};
use crate::error::{Result, TriggerError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

type EncodeFn = fn(&TriggerData) -> Result<Value>;
type DecodeFn = fn(Value) -> Result<TriggerData>;

/// Codec entry for one variant
#[derive(Clone, Copy)]
pub struct VariantEntry {
    /// Variant discriminant
    pub kind: TriggerKind,
    /// Wire name
    pub name: &'static str,
    encode: EncodeFn,
    decode: DecodeFn,
}

impl VariantEntry {
    /// Build the entry for a concrete variant type
    pub const fn of<T: TriggerVariant>() -> Self {
        Self {
            kind: T::KIND,
            name: T::KIND.name(),
            encode: encode_variant::<T>,
            decode: decode_variant::<T>,
        }
    }
}

impl fmt::Debug for VariantEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantEntry")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .finish()
    }
}

fn encode_variant<T: TriggerVariant>(data: &TriggerData) -> Result<Value> {
    let variant = T::from_data(data).ok_or(TriggerError::TypeMismatch {
        expected: T::KIND.name(),
        found: data.type_name(),
    })?;
    Ok(serde_json::to_value(variant)?)
}

fn decode_variant<T: TriggerVariant>(value: Value) -> Result<TriggerData> {
    let variant: T = serde_json::from_value(value)?;
    Ok(variant.into())
}

/// Every serializable variant, one line each
pub static VARIANTS: &[VariantEntry] = &[
    VariantEntry::of::<WarpTriggerData>(),
    VariantEntry::of::<DoorTriggerData>(),
    VariantEntry::of::<StairsTriggerData>(),
    VariantEntry::of::<SpawnPointTriggerData>(),
];

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    #[serde(rename = "type")]
    type_name: &'a str,
    data: Value,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    data: Value,
}

/// Name-indexed view over [`VARIANTS`]
pub struct TriggerTypeRegistry {
    by_name: BTreeMap<&'static str, VariantEntry>,
    by_kind: BTreeMap<TriggerKind, VariantEntry>,
}

impl TriggerTypeRegistry {
    /// Build a registry from a set of entries
    pub fn from_entries(entries: &[VariantEntry]) -> Self {
        let mut by_name = BTreeMap::new();
        let mut by_kind = BTreeMap::new();
        for entry in entries {
            by_name.insert(entry.name, *entry);
            by_kind.insert(entry.kind, *entry);
        }
        Self { by_name, by_kind }
    }

    /// Process-wide registry over [`VARIANTS`], built on first use
    pub fn global() -> &'static TriggerTypeRegistry {
        static REGISTRY: OnceLock<TriggerTypeRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| Self::from_entries(VARIANTS))
    }

    /// Registered wire names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        self.by_name.keys().copied().collect()
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> Vec<TriggerKind> {
        self.by_kind.keys().copied().collect()
    }

    /// Look up an entry by wire name
    pub fn get_by_name(&self, name: &str) -> Option<&VariantEntry> {
        self.by_name.get(name)
    }

    /// Check if a wire name is registered
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Get registered type count
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Check if no types are registered
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Encode into a `{"type", "data"}` envelope
    pub fn encode(&self, data: &TriggerData) -> Result<Value> {
        let entry = self.by_kind.get(&data.kind()).ok_or_else(|| TriggerError::UnknownType {
            name: data.type_name().to_string(),
            known: self.known_names(),
        })?;
        let fields = (entry.encode)(data)?;
        Ok(serde_json::to_value(EnvelopeRef {
            type_name: entry.name,
            data: fields,
        })?)
    }

    /// Decode an envelope.
    ///
    /// Fails with [`TriggerError::UnknownType`], listing every registered
    /// name, when `"type"` does not resolve.
    pub fn decode(&self, value: &Value) -> Result<TriggerData> {
        let envelope: Envelope = serde_json::from_value(value.clone())
            .map_err(|e| TriggerError::MalformedEnvelope(e.to_string()))?;

        let entry = self
            .by_name
            .get(envelope.type_name.as_str())
            .ok_or_else(|| TriggerError::UnknownType {
                name: envelope.type_name.clone(),
                known: self.known_names(),
            })?;

        // A bare `"data": null` decodes as the variant's defaults
        let fields = match envelope.data {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };
        (entry.decode)(fields)
    }

    /// Encode to envelope JSON text
    pub fn encode_to_string(&self, data: &TriggerData) -> Result<String> {
        Ok(serde_json::to_string(&self.encode(data)?)?)
    }

    /// Decode envelope JSON text
    pub fn decode_str(&self, json: &str) -> Result<TriggerData> {
        let value: Value = serde_json::from_str(json)?;
        self.decode(&value)
    }

    fn known_names(&self) -> Vec<String> {
        self.by_name.keys().map(|name| name.to_string()).collect()
    }
}

impl fmt::Debug for TriggerTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerTypeRegistry")
            .field("types", &self.names())
            .finish()
    }
}

impl Serialize for TriggerData {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        TriggerTypeRegistry::global()
            .encode(self)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TriggerData {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        TriggerTypeRegistry::global()
            .decode(&value)
            .map_err(serde::de::Error::custom)
    }
}
