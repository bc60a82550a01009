//! Hex geometry primitives: [`HexCoordinates`] and [`HexDirection`].
//!
//! Coordinates are axial `(x, z)` with the implicit cube component
//! `y = -x - z`. Grid storage uses an offset layout in which odd rows are
//! shifted half a cell to the right; [`HexCoordinates::from_offset`] and
//! [`HexCoordinates::to_offset`] convert between the two losslessly.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// HexDirection
// ---------------------------------------------------------------------------

/// One of the six neighbor directions of a hex cell, clockwise from
/// north-east.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HexDirection {
    NE = 0,
    E = 1,
    SE = 2,
    SW = 3,
    W = 4,
    NW = 5,
}

impl HexDirection {
    /// All directions in slot order.
    pub const ALL: [HexDirection; 6] = [
        HexDirection::NE,
        HexDirection::E,
        HexDirection::SE,
        HexDirection::SW,
        HexDirection::W,
        HexDirection::NW,
    ];

    /// Slot index of this direction (0..6).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for a slot index. Indices wrap modulo 6.
    #[inline]
    pub const fn from_index(i: usize) -> Self {
        Self::ALL[i % 6]
    }

    /// The direction pointing back.
    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Counter-clockwise neighbor direction.
    #[inline]
    pub const fn previous(self) -> Self {
        Self::from_index(self.index() + 5)
    }

    /// Clockwise neighbor direction.
    #[inline]
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Axial offset of one step in this direction.
    #[inline]
    pub const fn delta(self) -> HexCoordinates {
        match self {
            HexDirection::NE => HexCoordinates::new(0, 1),
            HexDirection::E => HexCoordinates::new(1, 0),
            HexDirection::SE => HexCoordinates::new(1, -1),
            HexDirection::SW => HexCoordinates::new(0, -1),
            HexDirection::W => HexCoordinates::new(-1, 0),
            HexDirection::NW => HexCoordinates::new(-1, 1),
        }
    }
}

impl fmt::Display for HexDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HexDirection::NE => "NE",
            HexDirection::E => "E",
            HexDirection::SE => "SE",
            HexDirection::SW => "SW",
            HexDirection::W => "W",
            HexDirection::NW => "NW",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// HexCoordinates
// ---------------------------------------------------------------------------

/// Axial hex coordinates. `z` is the row, `x` the axial column.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoordinates {
    pub x: i32,
    pub z: i32,
}

impl HexCoordinates {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, z: 0 };

    /// Create axial coordinates.
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Convert offset coordinates (column, row) to axial.
    #[inline]
    pub const fn from_offset(ox: i32, oz: i32) -> Self {
        Self {
            x: ox - oz / 2,
            z: oz,
        }
    }

    /// Convert back to offset coordinates (column, row).
    #[inline]
    pub const fn to_offset(self) -> (i32, i32) {
        (self.x + self.z / 2, self.z)
    }

    /// The derived cube component.
    #[inline]
    pub const fn y(self) -> i32 {
        -self.x - self.z
    }

    /// Number of hex steps between `self` and `other`.
    #[inline]
    pub const fn distance_to(self, other: Self) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y() - other.y()).abs();
        let dz = (self.z - other.z).abs();
        (dx + dy + dz) / 2
    }

    /// The coordinates one step away in direction `d`.
    #[inline]
    pub const fn step(self, d: HexDirection) -> Self {
        let delta = d.delta();
        Self {
            x: self.x + delta.x,
            z: self.z + delta.z,
        }
    }

    /// All six neighbors in direction slot order.
    pub fn neighbors(self) -> [HexCoordinates; 6] {
        HexDirection::ALL.map(|d| self.step(d))
    }
}

impl fmt::Display for HexCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y(), self.z)
    }
}

impl Add for HexCoordinates {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl Sub for HexCoordinates {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.z - rhs.z)
    }
}

/// Hex distance between two axial coordinate pairs.
#[inline]
pub const fn hex_distance(a: HexCoordinates, b: HexCoordinates) -> i32 {
    a.distance_to(b)
}
