//! Geometry primitives: [`Coord`], [`Extent`], [`Position`] and
//! [`GridTransform`].
//!
//! Grids are 3D lattices indexed by integer [`Coord`]s. Searches run on a
//! single `y` plane, but every type here supports the full lattice.

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// An integer cell coordinate. `y` is the plane index; `x` and `z` span the
/// plane.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coord {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return a coordinate shifted by `(dx, 0, dz)` within the same plane.
    #[inline]
    pub const fn shift(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y,
            z: self.z + dz,
        }
    }

    /// Per-axis absolute difference.
    #[inline]
    pub fn abs_diff(self, other: Self) -> (i32, i32, i32) {
        (
            (self.x - other.x).abs(),
            (self.y - other.y).abs(),
            (self.z - other.z).abs(),
        )
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y
            .cmp(&other.y)
            .then(self.z.cmp(&other.z))
            .then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for Coord {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl From<(i32, i32, i32)> for Coord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

// ---------------------------------------------------------------------------
// Extent
// ---------------------------------------------------------------------------

/// Grid dimensions. Valid coordinates lie in
/// `[0, size_x) × [0, size_y) × [0, size_z)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub size_x: i32,
    pub size_y: i32,
    pub size_z: i32,
}

impl Extent {
    /// Create a new extent. Negative sizes are clamped to zero.
    #[inline]
    pub const fn new(size_x: i32, size_y: i32, size_z: i32) -> Self {
        Self {
            size_x: if size_x < 0 { 0 } else { size_x },
            size_y: if size_y < 0 { 0 } else { size_y },
            size_z: if size_z < 0 { 0 } else { size_z },
        }
    }

    /// Whether the coordinate lies inside the extent.
    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        c.x >= 0
            && c.x < self.size_x
            && c.y >= 0
            && c.y < self.size_y
            && c.z >= 0
            && c.z < self.size_z
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        self.size_x as usize * self.size_y as usize * self.size_z as usize
    }

    /// Whether the extent holds no cells.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Flat index of `c` (x fastest, then z, then y), or `None` if outside.
    #[inline]
    pub fn index(self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        let plane = self.size_x as usize * self.size_z as usize;
        Some(c.y as usize * plane + c.z as usize * self.size_x as usize + c.x as usize)
    }

    /// Inverse of [`index`](Self::index). The index must be `< len()`.
    #[inline]
    pub fn coord(self, idx: usize) -> Coord {
        let sx = self.size_x as usize;
        let plane = sx * self.size_z as usize;
        let y = idx / plane;
        let rem = idx % plane;
        Coord::new((rem % sx) as i32, y as i32, (rem / sx) as i32)
    }

    /// Iterate over every coordinate in index order.
    pub fn iter(self) -> impl Iterator<Item = Coord> {
        (0..self.len()).map(move |i| self.coord(i))
    }
}

// ---------------------------------------------------------------------------
// Position / GridTransform
// ---------------------------------------------------------------------------

/// A world-space position.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<Coord> for Position {
    fn from(c: Coord) -> Self {
        Self::new(c.x as f32, c.y as f32, c.z as f32)
    }
}

/// Maps grid coordinates to world positions: `origin + coord * cell_size`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridTransform {
    pub origin: Position,
    pub cell_size: Position,
}

impl GridTransform {
    /// Origin at zero, unit cells.
    pub const IDENTITY: Self = Self {
        origin: Position::new(0.0, 0.0, 0.0),
        cell_size: Position::new(1.0, 1.0, 1.0),
    };

    /// World position of the cell's anchor point.
    #[inline]
    pub fn to_world(&self, c: Coord) -> Position {
        Position::new(
            self.origin.x + c.x as f32 * self.cell_size.x,
            self.origin.y + c.y as f32 * self.cell_size.y,
            self.origin.z + c.z as f32 * self.cell_size.z,
        )
    }
}

impl Default for GridTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn coord_json() {
        let c = Coord::new(3, 0, 7);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"x":3,"y":0,"z":7}"#);
        let back: Coord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
