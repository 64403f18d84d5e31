//! Per-side blocking state of a cell.
//!
//! Every cell has four sides. A side may be fully open, partially blocked
//! (e.g. a low wall) or blocked. Only [`DirectionStatus::Blocked`] prevents
//! entry; `Partial` is carried through for hosts that want to inspect it.

/// One side of a cell. North is `+z`, east is `+x`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// All four sides, in storage order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Storage slot of this side.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::West => 2,
            Direction::East => 3,
        }
    }

    /// The side of the destination cell crossed by a step of `dx` along x.
    ///
    /// Moving east enters through the west side and vice versa. Returns
    /// `None` for `dx == 0`.
    #[inline]
    pub fn entered_along_x(dx: i32) -> Option<Direction> {
        match dx.signum() {
            1 => Some(Direction::West),
            -1 => Some(Direction::East),
            _ => None,
        }
    }

    /// The side of the destination cell crossed by a step of `dz` along z.
    #[inline]
    pub fn entered_along_z(dz: i32) -> Option<Direction> {
        match dz.signum() {
            1 => Some(Direction::South),
            -1 => Some(Direction::North),
            _ => None,
        }
    }
}

/// Blocking state of a single side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectionStatus {
    #[default]
    Walkable,
    Partial,
    Blocked,
}
