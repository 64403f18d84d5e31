//! The live world grid as seen by the engine.
//!
//! The engine never owns or mutates the host's grid. It reads it once per
//! job through [`WorldGrid`] to build a private snapshot. [`TileGrid`] is a
//! plain owned implementation for hosts that have nothing better.

use crate::direction::{Direction, DirectionStatus};
use crate::geom::{Coord, Extent, GridTransform};

/// Read accessor over a host grid.
pub trait WorldGrid {
    /// Dimensions of the grid.
    fn extent(&self) -> Extent;

    /// Whether the cell can be traversed. Out-of-range cells are not
    /// walkable.
    fn is_walkable(&self, c: Coord) -> bool;

    /// Blocking state of one side of a cell. Defaults to fully open.
    fn direction_status(&self, _c: Coord, _d: Direction) -> DirectionStatus {
        DirectionStatus::Walkable
    }

    /// Mapping from cell coordinates to world positions.
    fn transform(&self) -> GridTransform {
        GridTransform::IDENTITY
    }
}

impl<W: WorldGrid + ?Sized> WorldGrid for &W {
    fn extent(&self) -> Extent {
        (**self).extent()
    }

    fn is_walkable(&self, c: Coord) -> bool {
        (**self).is_walkable(c)
    }

    fn direction_status(&self, c: Coord, d: Direction) -> DirectionStatus {
        (**self).direction_status(c, d)
    }

    fn transform(&self) -> GridTransform {
        (**self).transform()
    }
}

/// A single cell of a [`TileGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub walkable: bool,
    pub sides: [DirectionStatus; 4],
}

impl Tile {
    pub const OPEN: Tile = Tile {
        walkable: true,
        sides: [DirectionStatus::Walkable; 4],
    };

    pub const BLOCKED: Tile = Tile {
        walkable: false,
        sides: [DirectionStatus::Walkable; 4],
    };
}

/// A dense, owned 3D grid of [`Tile`]s.
#[derive(Debug, Clone)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    extent: Extent,
    transform: GridTransform,
}

impl TileGrid {
    /// Create a grid with every cell walkable.
    pub fn new(extent: Extent) -> Self {
        Self {
            tiles: vec![Tile::OPEN; extent.len()],
            extent,
            transform: GridTransform::IDENTITY,
        }
    }

    /// Parse a single-plane grid from text. Each line is one `z` row
    /// (first line is `z = 0`), each character one `x` column. `#` marks a
    /// blocked cell; anything else is walkable. Short lines are padded
    /// with walkable cells.
    pub fn from_ascii(text: &str) -> Self {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(Extent::new(width as i32, 1, rows.len() as i32));
        for (z, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    grid.set_walkable(Coord::new(x as i32, 0, z as i32), false);
                }
            }
        }
        grid
    }

    /// Replace the coordinate-to-world mapping.
    pub fn with_transform(mut self, transform: GridTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Get the tile at a coordinate, or `None` if out of bounds.
    pub fn at(&self, c: Coord) -> Option<Tile> {
        self.extent.index(c).map(|i| self.tiles[i])
    }

    /// Set a tile. Does nothing if out of bounds.
    pub fn set(&mut self, c: Coord, tile: Tile) {
        if let Some(i) = self.extent.index(c) {
            self.tiles[i] = tile;
        }
    }

    /// Set the walkable flag of a tile. Does nothing if out of bounds.
    pub fn set_walkable(&mut self, c: Coord, walkable: bool) {
        if let Some(i) = self.extent.index(c) {
            self.tiles[i].walkable = walkable;
        }
    }

    /// Set one side of a tile. Does nothing if out of bounds.
    pub fn set_direction(&mut self, c: Coord, d: Direction, status: DirectionStatus) {
        if let Some(i) = self.extent.index(c) {
            self.tiles[i].sides[d.index()] = status;
        }
    }

    /// Number of walkable cells.
    pub fn count_walkable(&self) -> usize {
        self.tiles.iter().filter(|t| t.walkable).count()
    }
}

impl WorldGrid for TileGrid {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn is_walkable(&self, c: Coord) -> bool {
        self.at(c).is_some_and(|t| t.walkable)
    }

    fn direction_status(&self, c: Coord, d: Direction) -> DirectionStatus {
        self.at(c)
            .map(|t| t.sides[d.index()])
            .unwrap_or(DirectionStatus::Walkable)
    }

    fn transform(&self) -> GridTransform {
        self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_open() {
        let g = TileGrid::new(Extent::new(4, 1, 3));
        assert_eq!(g.count_walkable(), 12);
        assert!(g.is_walkable(Coord::new(3, 0, 2)));
        assert!(!g.is_walkable(Coord::new(4, 0, 0)));
        assert_eq!(g.at(Coord::new(-1, 0, 0)), None);
    }

    #[test]
    fn set_walkable_ignores_out_of_bounds() {
        let mut g = TileGrid::new(Extent::new(3, 1, 3));
        g.set_walkable(Coord::new(1, 0, 1), false);
        assert!(!g.is_walkable(Coord::new(1, 0, 1)));
        g.set_walkable(Coord::new(9, 0, 9), false);
        assert_eq!(g.count_walkable(), 8);
    }

    #[test]
    fn from_ascii_rows_are_z() {
        let g = TileGrid::from_ascii(
            "
            ..#
            #..
            ",
        );
        assert_eq!(g.extent(), Extent::new(3, 1, 2));
        assert!(!g.is_walkable(Coord::new(2, 0, 0)));
        assert!(!g.is_walkable(Coord::new(0, 0, 1)));
        assert!(g.is_walkable(Coord::new(1, 0, 1)));
    }

    #[test]
    fn direction_status_defaults_open() {
        let mut g = TileGrid::new(Extent::new(2, 1, 2));
        let c = Coord::new(1, 0, 0);
        assert_eq!(g.direction_status(c, Direction::West), DirectionStatus::Walkable);
        g.set_direction(c, Direction::West, DirectionStatus::Blocked);
        assert_eq!(g.direction_status(c, Direction::West), DirectionStatus::Blocked);
        assert_eq!(g.direction_status(c, Direction::East), DirectionStatus::Walkable);
        assert_eq!(
            g.direction_status(Coord::new(5, 0, 5), Direction::North),
            DirectionStatus::Walkable
        );
    }
}
