//! Packed tile coordinates
//!
//! A [`TileCoord`] is packed into a single `u64` so sparse tile stores can key
//! on a primitive instead of a boxed coordinate:
//!
//! | bits  | field     | range                 |
//! |-------|-----------|-----------------------|
//! | 0-19  | x         | -524288 ..= 524287    |
//! | 20-39 | y         | -524288 ..= 524287    |
//! | 40-55 | elevation | -32768 ..= 32767      |
//!
//! Each field is stored two's-complement in its slot and sign-extended on
//! unpack. Bits 56-63 are always zero.

use crate::direction::Direction;
use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Packed form of a [`TileCoord`]
pub type PackedCoord = u64;

const X_BITS: u32 = 20;
const Y_BITS: u32 = 20;
const ELEVATION_BITS: u32 = 16;

const X_SHIFT: u32 = 0;
const Y_SHIFT: u32 = X_SHIFT + X_BITS;
const ELEVATION_SHIFT: u32 = Y_SHIFT + Y_BITS;

const X_MASK: u64 = (1 << X_BITS) - 1;
const Y_MASK: u64 = (1 << Y_BITS) - 1;
const ELEVATION_MASK: u64 = (1 << ELEVATION_BITS) - 1;

/// Sign-extend the low `bits` of `value`
const fn sign_extend(value: u64, bits: u32) -> i32 {
    let shift = 64 - bits;
    (((value << shift) as i64) >> shift) as i32
}

/// Grid address of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
    pub elevation: i32,
}

impl TileCoord {
    pub const MIN_X: i32 = -(1 << (X_BITS - 1));
    pub const MAX_X: i32 = (1 << (X_BITS - 1)) - 1;
    pub const MIN_Y: i32 = -(1 << (Y_BITS - 1));
    pub const MAX_Y: i32 = (1 << (Y_BITS - 1)) - 1;
    pub const MIN_ELEVATION: i32 = -(1 << (ELEVATION_BITS - 1));
    pub const MAX_ELEVATION: i32 = (1 << (ELEVATION_BITS - 1)) - 1;

    /// Create a coordinate without range checking.
    ///
    /// Components outside the packable range are truncated by [`pack`](Self::pack);
    /// use [`try_new`](Self::try_new) when the input is untrusted.
    pub const fn new(x: i32, y: i32, elevation: i32) -> Self {
        Self { x, y, elevation }
    }

    /// Create a coordinate, rejecting components that would not survive packing
    pub fn try_new(x: i32, y: i32, elevation: i32) -> Result<Self> {
        check_range("x", x, Self::MIN_X, Self::MAX_X)?;
        check_range("y", y, Self::MIN_Y, Self::MAX_Y)?;
        check_range("elevation", elevation, Self::MIN_ELEVATION, Self::MAX_ELEVATION)?;
        Ok(Self::new(x, y, elevation))
    }

    /// Whether every component fits its packed bit range
    pub const fn is_packable(&self) -> bool {
        self.x >= Self::MIN_X
            && self.x <= Self::MAX_X
            && self.y >= Self::MIN_Y
            && self.y <= Self::MAX_Y
            && self.elevation >= Self::MIN_ELEVATION
            && self.elevation <= Self::MAX_ELEVATION
    }

    /// Pack into a single 64-bit key
    pub const fn pack(&self) -> PackedCoord {
        ((self.x as u64 & X_MASK) << X_SHIFT)
            | ((self.y as u64 & Y_MASK) << Y_SHIFT)
            | ((self.elevation as u64 & ELEVATION_MASK) << ELEVATION_SHIFT)
    }

    /// Unpack a key produced by [`pack`](Self::pack)
    pub const fn unpack(packed: PackedCoord) -> Self {
        Self {
            x: sign_extend((packed >> X_SHIFT) & X_MASK, X_BITS),
            y: sign_extend((packed >> Y_SHIFT) & Y_MASK, Y_BITS),
            elevation: sign_extend((packed >> ELEVATION_SHIFT) & ELEVATION_MASK, ELEVATION_BITS),
        }
    }

    /// The same coordinate, or [`GridError::OutOfRange`] if it would not
    /// survive packing
    pub fn ensure_packable(&self) -> Result<Self> {
        Self::try_new(self.x, self.y, self.elevation)
    }

    /// Same elevation, shifted in the plane. May leave the packable range.
    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy), self.elevation)
    }

    /// The adjacent tile in `direction`. May leave the packable range.
    pub const fn neighbor(&self, direction: Direction) -> Self {
        self.offset(direction.dx(), direction.dy())
    }

    /// Shift in the plane, or `None` past the edge of the packable range
    pub fn checked_offset(&self, dx: i32, dy: i32) -> Option<Self> {
        let shifted = Self::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?, self.elevation);
        shifted.is_packable().then_some(shifted)
    }

    /// The adjacent tile in `direction`, or `None` past the edge of the world
    pub fn checked_neighbor(&self, direction: Direction) -> Option<Self> {
        self.checked_offset(direction.dx(), direction.dy())
    }

    /// Clamp an elevation into the packable range
    pub const fn clamp_elevation(elevation: i32) -> i32 {
        if elevation < Self::MIN_ELEVATION {
            Self::MIN_ELEVATION
        } else if elevation > Self::MAX_ELEVATION {
            Self::MAX_ELEVATION
        } else {
            elevation
        }
    }

    /// Same plane position on another floor
    pub const fn with_elevation(&self, elevation: i32) -> Self {
        Self::new(self.x, self.y, elevation)
    }

    /// Human-readable `"x,y,elevation"` key used by scene files
    pub fn to_key(&self) -> String {
        self.to_string()
    }
}

fn check_range(axis: &'static str, value: i32, min: i32, max: i32) -> Result<()> {
    if value < min || value > max {
        return Err(GridError::OutOfRange {
            axis,
            value,
            min,
            max,
        });
    }
    Ok(())
}

impl From<PackedCoord> for TileCoord {
    fn from(packed: PackedCoord) -> Self {
        Self::unpack(packed)
    }
}

impl From<(i32, i32, i32)> for TileCoord {
    fn from((x, y, elevation): (i32, i32, i32)) -> Self {
        Self::new(x, y, elevation)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.elevation)
    }
}

impl FromStr for TileCoord {
    type Err = GridError;

    fn from_str(key: &str) -> Result<Self> {
        let invalid = |reason: String| GridError::InvalidCoordKey {
            key: key.to_string(),
            reason,
        };

        let parts: Vec<&str> = key.split(',').collect();
        if parts.len() != 3 {
            return Err(invalid(format!("expected 3 segments, found {}", parts.len())));
        }

        let mut values = [0i32; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|e| invalid(format!("segment '{}': {}", part.trim(), e)))?;
        }

        Self::try_new(values[0], values[1], values[2]).map_err(|e| invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_origin_is_zero() {
        assert_eq!(TileCoord::new(0, 0, 0).pack(), 0);
    }

    #[test]
    fn test_pack_layout() {
        let packed = TileCoord::new(1, 2, 3).pack();
        assert_eq!(packed & X_MASK, 1);
        assert_eq!((packed >> Y_SHIFT) & Y_MASK, 2);
        assert_eq!((packed >> ELEVATION_SHIFT) & ELEVATION_MASK, 3);
        assert_eq!(packed >> 56, 0);
    }

    #[test]
    fn test_negative_components_sign_extend() {
        let coord = TileCoord::new(-1, -2, -3);
        assert_eq!(TileCoord::unpack(coord.pack()), coord);
    }

    #[test]
    fn test_extremes_round_trip() {
        let min = TileCoord::new(-524288, -524288, -32768);
        let max = TileCoord::new(524287, 524287, 32767);
        assert_eq!(TileCoord::unpack(min.pack()), min);
        assert_eq!(TileCoord::unpack(max.pack()), max);
        assert_ne!(min.pack(), max.pack());
    }

    #[test]
    fn test_try_new_range() {
        assert!(TileCoord::try_new(TileCoord::MAX_X, 0, 0).is_ok());
        assert!(matches!(
            TileCoord::try_new(TileCoord::MAX_X + 1, 0, 0),
            Err(GridError::OutOfRange { axis: "x", .. })
        ));
        assert!(matches!(
            TileCoord::try_new(0, 0, TileCoord::MIN_ELEVATION - 1),
            Err(GridError::OutOfRange { axis: "elevation", .. })
        ));
    }

    #[test]
    fn test_key_parse() {
        let coord: TileCoord = "5, -7,2".parse().unwrap();
        assert_eq!(coord, TileCoord::new(5, -7, 2));
        assert_eq!(coord.to_key(), "5,-7,2");
    }

    #[test]
    fn test_key_parse_rejects_malformed() {
        assert!("1,2".parse::<TileCoord>().is_err());
        assert!("1,2,3,4".parse::<TileCoord>().is_err());
        assert!("a,2,3".parse::<TileCoord>().is_err());
        assert!("1,2,99999".parse::<TileCoord>().is_err());
        assert!("".parse::<TileCoord>().is_err());
    }

    #[test]
    fn test_checked_neighbor_stops_at_world_edge() {
        let east_edge = TileCoord::new(TileCoord::MAX_X, 0, 0);
        assert_eq!(east_edge.checked_neighbor(Direction::Right), None);
        assert_eq!(
            east_edge.checked_neighbor(Direction::Left),
            Some(TileCoord::new(TileCoord::MAX_X - 1, 0, 0))
        );

        let north_edge = TileCoord::new(0, TileCoord::MIN_Y, 0);
        assert_eq!(north_edge.checked_neighbor(Direction::Up), None);
        assert_eq!(TileCoord::new(i32::MAX, 0, 0).checked_offset(1, 0), None);

        // Unchecked stepping past the edge aliases the opposite side
        let past_edge = east_edge.neighbor(Direction::Right);
        assert!(!past_edge.is_packable());
        assert_eq!(past_edge.pack(), TileCoord::new(TileCoord::MIN_X, 0, 0).pack());
    }

    #[test]
    fn test_ensure_packable() {
        assert!(TileCoord::new(1, 2, 3).ensure_packable().is_ok());
        assert!(matches!(
            TileCoord::new(0, TileCoord::MAX_Y + 1, 0).ensure_packable(),
            Err(GridError::OutOfRange { axis: "y", .. })
        ));
    }

    #[test]
    fn test_clamp_elevation() {
        assert_eq!(TileCoord::clamp_elevation(5), 5);
        assert_eq!(TileCoord::clamp_elevation(40_000), TileCoord::MAX_ELEVATION);
        assert_eq!(TileCoord::clamp_elevation(i32::MIN), TileCoord::MIN_ELEVATION);
    }

    #[test]
    fn test_neighbor() {
        let coord = TileCoord::new(3, 3, 1);
        assert_eq!(coord.neighbor(Direction::Up), TileCoord::new(3, 2, 1));
        assert_eq!(coord.neighbor(Direction::Right), TileCoord::new(4, 3, 1));
    }
}
