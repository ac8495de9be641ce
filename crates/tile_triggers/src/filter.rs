//! Player detection for player-only triggers

use std::collections::HashSet;
use std::fmt;
use tile_grid::GridEntity;

/// Predicate deciding whether an entity counts as the player
pub type PlayerPredicate = Box<dyn Fn(&dyn GridEntity) -> bool + Send + Sync>;

/// Decides which entities may fire `player_only` triggers.
///
/// The default matches names containing "Player" (case-insensitive). That is a
/// prototype heuristic: an NPC called "PlayerGhost" also matches. Games with a
/// real player marker should use [`PlayerFilter::ids`] or
/// [`PlayerFilter::custom`].
pub enum PlayerFilter {
    /// Case-insensitive substring match on the entity name
    NameContains(String),
    /// Exact entity ids
    Ids(HashSet<u64>),
    /// Arbitrary predicate
    Custom(PlayerPredicate),
}

impl PlayerFilter {
    pub const DEFAULT_NAME_PATTERN: &'static str = "Player";

    /// Match names containing `pattern`, ignoring case
    pub fn name_contains(pattern: impl Into<String>) -> Self {
        Self::NameContains(pattern.into().to_lowercase())
    }

    /// Match only the given entity ids
    pub fn ids<I: IntoIterator<Item = u64>>(ids: I) -> Self {
        Self::Ids(ids.into_iter().collect())
    }

    /// Match with an arbitrary predicate
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&dyn GridEntity) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Box::new(f))
    }

    /// Check if an entity passes this filter
    pub fn passes(&self, entity: &dyn GridEntity) -> bool {
        match self {
            Self::NameContains(pattern) => entity.name().to_lowercase().contains(pattern.as_str()),
            Self::Ids(ids) => ids.contains(&entity.id()),
            Self::Custom(predicate) => predicate(entity),
        }
    }
}

impl Default for PlayerFilter {
    fn default() -> Self {
        Self::name_contains(Self::DEFAULT_NAME_PATTERN)
    }
}

impl fmt::Debug for PlayerFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameContains(pattern) => f.debug_tuple("NameContains").field(pattern).finish(),
            Self::Ids(ids) => f.debug_tuple("Ids").field(ids).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
