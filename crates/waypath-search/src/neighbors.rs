use waypath_core::Coord;

use crate::grid::SearchGrid;

/// When a diagonal step is allowed, given the two axis-aligned cells it
/// passes between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagonalPolicy {
    /// Diagonals are always allowed, even between two obstacles.
    Always,
    /// Only the four axis-aligned steps.
    Never,
    /// At least one of the two adjacent axis cells must be walkable.
    #[default]
    IfAtMostOneObstacle,
    /// Both adjacent axis cells must be walkable.
    OnlyWhenNoObstacles,
}

impl DiagonalPolicy {
    /// Whether a diagonal step passing beside cells with walkability
    /// `side_a` and `side_b` is permitted.
    #[inline]
    pub fn allows(self, side_a: bool, side_b: bool) -> bool {
        match self {
            DiagonalPolicy::Always => true,
            DiagonalPolicy::Never => false,
            DiagonalPolicy::IfAtMostOneObstacle => side_a || side_b,
            DiagonalPolicy::OnlyWhenNoObstacles => side_a && side_b,
        }
    }
}

/// Axis offsets `(dx, dz)`: north, east, south, west.
pub(crate) const AXIS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Diagonal offsets: north-west, north-east, south-east, south-west.
/// Diagonal `i` lies between axis cells `(i + 3) % 4` and `i`.
pub(crate) const DIAGONAL: [(i32, i32); 4] = [(-1, 1), (1, 1), (1, -1), (-1, -1)];

/// Reusable neighbor enumeration over a [`SearchGrid`].
pub struct Neighbors {
    buf: Vec<usize>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Walkable neighbors of `c` in its `y` plane, as grid indices.
    ///
    /// Axis neighbors come first (N, E, S, W), then the diagonals permitted
    /// by `policy`. With `side_rules`, a step may not cross a blocked side
    /// of the cell it enters, and a diagonal also needs both adjacent axis
    /// cells to be enterable.
    pub fn collect(
        &mut self,
        grid: &SearchGrid,
        c: Coord,
        policy: DiagonalPolicy,
        side_rules: bool,
    ) -> &[usize] {
        self.buf.clear();
        let check_sides = side_rules && grid.has_side_blocking();
        let mut open = [false; 4];
        for (i, &(dx, dz)) in AXIS.iter().enumerate() {
            if let Some(n) = grid.walkable_idx(c.shift(dx, dz)) {
                if !check_sides || grid.can_enter(c, n) {
                    self.buf.push(n);
                    open[i] = true;
                }
            }
        }

        if policy == DiagonalPolicy::Never {
            return &self.buf;
        }

        for (i, &(dx, dz)) in DIAGONAL.iter().enumerate() {
            let (a, b) = (open[(i + 3) % 4], open[i]);
            if !policy.allows(a, b) {
                continue;
            }
            let Some(n) = grid.walkable_idx(c.shift(dx, dz)) else {
                continue;
            };
            if side_rules && !(a && b && (!check_sides || grid.can_enter(c, n))) {
                continue;
            }
            self.buf.push(n);
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypath_core::{Direction, DirectionStatus, Extent, TileGrid};

    fn coords(grid: &SearchGrid, idx: &[usize]) -> Vec<Coord> {
        idx.iter().map(|&i| grid.node(i).coord()).collect()
    }

    #[test]
    fn policy_table() {
        use DiagonalPolicy::*;
        assert!(Always.allows(false, false));
        assert!(!Never.allows(true, true));
        assert!(IfAtMostOneObstacle.allows(true, false));
        assert!(!IfAtMostOneObstacle.allows(false, false));
        assert!(OnlyWhenNoObstacles.allows(true, true));
        assert!(!OnlyWhenNoObstacles.allows(false, true));
    }

    #[test]
    fn open_center_has_eight() {
        let grid = SearchGrid::from_fn(Extent::new(3, 1, 3), |_| true);
        let mut nb = Neighbors::new();
        let c = Coord::new(1, 0, 1);
        let got = coords(&grid, nb.collect(&grid, c, DiagonalPolicy::Always, false));
        assert_eq!(
            got,
            vec![
                Coord::new(1, 0, 2),
                Coord::new(2, 0, 1),
                Coord::new(1, 0, 0),
                Coord::new(0, 0, 1),
                Coord::new(0, 0, 2),
                Coord::new(2, 0, 2),
                Coord::new(2, 0, 0),
                Coord::new(0, 0, 0),
            ]
        );
        assert_eq!(nb.collect(&grid, c, DiagonalPolicy::Never, false).len(), 4);
    }

    #[test]
    fn corner_is_clipped_by_edges() {
        let grid = SearchGrid::from_fn(Extent::new(3, 1, 3), |_| true);
        let mut nb = Neighbors::new();
        let got = nb.collect(&grid, Coord::ZERO, DiagonalPolicy::Always, false);
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn obstacles_gate_diagonals() {
        // North of the center is blocked.
        let world = TileGrid::from_ascii(
            "
            ...
            ...
            .#.
            ",
        );
        let grid = SearchGrid::build(&world);
        let c = Coord::new(1, 0, 1);
        let mut nb = Neighbors::new();

        let always = nb.collect(&grid, c, DiagonalPolicy::Always, false).len();
        let one = nb.collect(&grid, c, DiagonalPolicy::IfAtMostOneObstacle, false).len();
        let none = coords(
            &grid,
            nb.collect(&grid, c, DiagonalPolicy::OnlyWhenNoObstacles, false),
        );
        assert_eq!(always, 7);
        assert_eq!(one, 7);
        assert_eq!(none.len(), 5);
        assert!(!none.contains(&Coord::new(0, 0, 2)));
        assert!(!none.contains(&Coord::new(2, 0, 2)));
    }

    #[test]
    fn two_obstacles_close_the_corner() {
        let world = TileGrid::from_ascii(
            "
            .#
            #.
            ",
        );
        let grid = SearchGrid::build(&world);
        let mut nb = Neighbors::new();
        assert_eq!(
            coords(&grid, nb.collect(&grid, Coord::ZERO, DiagonalPolicy::Always, false)),
            vec![Coord::new(1, 0, 1)]
        );
        assert!(nb
            .collect(&grid, Coord::ZERO, DiagonalPolicy::IfAtMostOneObstacle, false)
            .is_empty());
    }

    #[test]
    fn side_rules_block_entry() {
        let mut world = TileGrid::new(Extent::new(3, 1, 3));
        world.set_direction(Coord::new(2, 0, 1), Direction::West, DirectionStatus::Blocked);
        let grid = SearchGrid::build(&world);
        let c = Coord::new(1, 0, 1);
        let mut nb = Neighbors::new();

        let ignored = coords(&grid, nb.collect(&grid, c, DiagonalPolicy::Always, false));
        assert!(ignored.contains(&Coord::new(2, 0, 1)));

        let ruled = coords(&grid, nb.collect(&grid, c, DiagonalPolicy::Always, true));
        assert!(!ruled.contains(&Coord::new(2, 0, 1)));
        // Diagonals beside the blocked entry are gone too.
        assert!(!ruled.contains(&Coord::new(2, 0, 2)));
        assert!(!ruled.contains(&Coord::new(2, 0, 0)));
        assert!(ruled.contains(&Coord::new(0, 0, 2)));
    }

    #[test]
    fn side_rules_gate_diagonals_on_plain_grids() {
        let world = TileGrid::from_ascii(
            "
            .#.
            ...
            ",
        );
        let grid = SearchGrid::build(&world);
        assert!(!grid.has_side_blocking());
        let mut nb = Neighbors::new();
        let policy = DiagonalPolicy::IfAtMostOneObstacle;

        let free = coords(&grid, nb.collect(&grid, Coord::ZERO, policy, false));
        assert!(free.contains(&Coord::new(1, 0, 1)));
        let ruled = coords(&grid, nb.collect(&grid, Coord::ZERO, policy, true));
        assert_eq!(ruled, vec![Coord::new(0, 0, 1)]);
    }
}
