//! Jump Point Search (JPS) expansion.
//!
//! JPS shares the outer open/closed loop with A* but never pushes
//! intermediate cells: from each expanded node it walks straight or
//! diagonal lines and only adds *jump points*, the cells where an optimal
//! path may change direction. The pruning and forced-neighbor rules below
//! are derived for each [`DiagonalPolicy`], so JPS returns paths of the
//! same cost as A* under every policy.
//!
//! Directional side rules are not applied here.

use waypath_core::Coord;

use crate::distance::grid_distance;
use crate::neighbors::DiagonalPolicy;
use crate::searcher::{PathSearcher, Waypoint};

/// A unit step `(dx, dz)` in the x/z plane.
type Dir = (i32, i32);

impl PathSearcher {
    /// Expand the jump points reachable from `ci`.
    pub(crate) fn identify_successors(&mut self, ci: usize) {
        let (cp, cur_g, parent) = {
            let cur = self.grid.node(ci);
            (cur.coord(), cur.g_cost(), cur.parent())
        };

        let mut dirs = std::mem::take(&mut self.dir_buf);
        dirs.clear();
        match parent {
            Some(pi) => {
                let pc = self.grid.node(pi).coord();
                let d = ((cp.x - pc.x).signum(), (cp.z - pc.z).signum());
                self.pruned_dirs(cp, d, &mut dirs);
            }
            None => {
                let mut nbuf = std::mem::take(&mut self.neighbors);
                for &ni in nbuf.collect(&self.grid, cp, self.options.diagonal, false) {
                    let n = self.grid.node(ni).coord();
                    dirs.push((n.x - cp.x, n.z - cp.z));
                }
                self.neighbors = nbuf;
            }
        }

        for &d in &dirs {
            let Some(jp) = self.jump(cp, d) else {
                continue;
            };
            let Some(ji) = self.grid.idx(jp) else {
                continue;
            };
            if self.in_closed[ji] {
                continue;
            }
            let tentative_g = cur_g + grid_distance(cp, jp) as f32;
            if tentative_g < self.grid.node(ji).g_cost() || !self.in_open[ji] {
                self.relax(ci, ji, tentative_g);
            }
        }
        self.dir_buf = dirs;
    }

    // -----------------------------------------------------------------------
    // Pruning
    // -----------------------------------------------------------------------

    #[inline]
    fn w(&self, n: Coord, dx: i32, dz: i32) -> bool {
        self.grid.is_walkable(n.shift(dx, dz))
    }

    /// Whether a single step from `n` along `d` is a legal move.
    fn can_step(&self, n: Coord, (dx, dz): Dir) -> bool {
        if !self.w(n, dx, dz) {
            return false;
        }
        if dx == 0 || dz == 0 {
            return true;
        }
        self.options.diagonal.allows(self.w(n, dx, 0), self.w(n, 0, dz))
    }

    /// Natural and forced directions out of `n` when it was entered
    /// travelling along `d`.
    fn pruned_dirs(&self, n: Coord, d: Dir, out: &mut Vec<Dir>) {
        let (dx, dz) = d;
        let policy = self.options.diagonal;

        if dx != 0 && dz != 0 {
            for nd in [(0, dz), (dx, 0), d] {
                if self.can_step(n, nd) {
                    out.push(nd);
                }
            }
        } else {
            if self.can_step(n, d) {
                out.push(d);
            }
            // 4-connected travel along z turns onto x at every cell.
            if policy == DiagonalPolicy::Never && dx == 0 {
                for nd in [(1, 0), (-1, 0)] {
                    if self.can_step(n, nd) {
                        out.push(nd);
                    }
                }
            }
        }
        self.forced(n, d, |nd| out.push(nd));
    }

    /// Report every forced neighbor of `n` for travel along `d`.
    ///
    /// A neighbor is forced when it is reachable from `n` but no path from
    /// the previous cell that avoids `n` reaches it as cheaply (for diagonal
    /// travel) or at most as cheaply with the diagonal first (for straight
    /// travel).
    fn forced(&self, n: Coord, (dx, dz): Dir, mut emit: impl FnMut(Dir)) {
        let policy = self.options.diagonal;
        let w = |ox: i32, oz: i32| self.w(n, ox, oz);

        if dx != 0 && dz != 0 {
            if w(-dx, dz) && !w(-dx, 0) && policy.allows(false, w(0, dz)) {
                emit((-dx, dz));
            }
            if w(dx, -dz) && !w(0, -dz) && policy.allows(w(dx, 0), false) {
                emit((dx, -dz));
            }
            return;
        }

        for s in [1, -1] {
            // Offset of the side cell, perpendicular to travel.
            let (sx, sz) = if dx != 0 { (0, s) } else { (s, 0) };
            let side = w(sx, sz);
            let ahead_side = w(dx + sx, dz + sz);
            let behind_side = w(sx - dx, sz - dz);

            if policy == DiagonalPolicy::Never {
                // z travel turns onto x naturally; x travel only when the
                // cell behind the turn is blocked.
                if dx != 0 && side && !behind_side {
                    emit((sx, sz));
                }
                continue;
            }

            let cut_from_behind = side && policy.allows(true, behind_side);
            if side && !behind_side && !policy.allows(true, false) {
                emit((sx, sz));
            }
            if ahead_side && policy.allows(w(dx, dz), side) && !cut_from_behind {
                emit((dx + sx, dz + sz));
            }
        }
    }

    fn has_forced(&self, n: Coord, d: Dir) -> bool {
        let mut any = false;
        self.forced(n, d, |_| any = true);
        any
    }

    // -----------------------------------------------------------------------
    // Jumping
    // -----------------------------------------------------------------------

    /// Walk from `from` along `d` and return the first jump point, or
    /// `None` once a wall, grid edge or disallowed diagonal ends the line.
    ///
    /// The line is walked with `jump_stack` instead of recursion. Diagonal
    /// travel (and 4-connected travel along z) probes its straight
    /// components from every cell; those probes share the same stack above
    /// the caller's entries.
    pub(crate) fn jump(&mut self, from: Coord, d: Dir) -> Option<Coord> {
        let (dx, dz) = d;
        let diagonal = dx != 0 && dz != 0;
        let probe_x = self.options.diagonal == DiagonalPolicy::Never && dx == 0;

        let base = self.jump_stack.len();
        if self.can_step(from, d) {
            self.jump_stack.push(from.shift(dx, dz));
        }

        let mut found = None;
        while self.jump_stack.len() > base {
            let Some(n) = self.jump_stack.pop() else {
                break;
            };
            if n == self.target || self.has_forced(n, d) {
                found = Some(n);
                break;
            }
            let probes = if diagonal {
                [(dx, 0), (0, dz)]
            } else {
                [(1, 0), (-1, 0)]
            };
            if (diagonal || probe_x) && probes.iter().any(|&p| self.jump(n, p).is_some()) {
                found = Some(n);
                break;
            }
            if self.can_step(n, d) {
                self.jump_stack.push(n.shift(dx, dz));
            }
        }
        self.jump_stack.truncate(base);
        found
    }
}

/// Fill in every intermediate cell between consecutive waypoints.
///
/// Returns the cells after `start` up to and including the last waypoint.
/// Each segment moves diagonally first and then straight, which reproduces
/// the exact walk for the straight and diagonal segments jump point search
/// produces.
pub fn expand_waypoints(start: Coord, waypoints: &[Waypoint]) -> Vec<Coord> {
    let mut cells = Vec::new();
    let mut c = start;
    for wp in waypoints {
        let b = wp.coord;
        while c.x != b.x || c.z != b.z {
            c = c.shift((b.x - c.x).signum(), (b.z - c.z).signum());
            cells.push(c);
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use rand::{RngExt, SeedableRng};
    use waypath_core::{Coord, Extent, TileGrid};

    use super::expand_waypoints;
    use crate::distance::{chebyshev, path_cost};
    use crate::{
        Algorithm, DiagonalPolicy, PathResult, SearchGrid, SearchOptions, SearchOutcome, find_path,
    };

    const POLICIES: [DiagonalPolicy; 4] = [
        DiagonalPolicy::Always,
        DiagonalPolicy::Never,
        DiagonalPolicy::IfAtMostOneObstacle,
        DiagonalPolicy::OnlyWhenNoObstacles,
    ];

    fn search(
        grid: SearchGrid,
        from: Coord,
        to: Coord,
        policy: DiagonalPolicy,
        algorithm: Algorithm,
    ) -> PathResult {
        let opts = SearchOptions::default()
            .with_diagonal(policy)
            .with_algorithm(algorithm);
        find_path(grid, from, to, opts)
    }

    fn jps(grid: SearchGrid, from: Coord, to: Coord, policy: DiagonalPolicy) -> PathResult {
        search(grid, from, to, policy, Algorithm::JumpPoint)
    }

    /// The expanded walk is contiguous and only takes moves the grid
    /// allows under `policy`.
    fn assert_legal_walk(grid: &SearchGrid, start: Coord, cells: &[Coord], policy: DiagonalPolicy) {
        let mut prev = start;
        for &c in cells {
            assert_eq!(chebyshev(prev, c), 1, "{prev} -> {c}");
            assert!(grid.is_walkable(c), "{c} is blocked");
            let (dx, dz) = (c.x - prev.x, c.z - prev.z);
            if dx != 0 && dz != 0 {
                let a = grid.is_walkable(prev.shift(dx, 0));
                let b = grid.is_walkable(prev.shift(0, dz));
                assert!(policy.allows(a, b), "{prev} -> {c} cuts a corner");
            }
            prev = c;
        }
    }

    #[test]
    fn open_grid_matches_astar() {
        let from = Coord::new(0, 0, 0);
        let to = Coord::new(4, 0, 4);
        let grid = || SearchGrid::from_fn(Extent::new(5, 1, 5), |_| true);

        let res = jps(grid(), from, to, DiagonalPolicy::Always);
        assert_eq!(res.outcome, SearchOutcome::Found);
        assert_eq!(res.cost, 56.0);
        assert_eq!(res.coords(), vec![to]);

        let res = jps(grid(), from, to, DiagonalPolicy::Never);
        assert_eq!(res.cost, 80.0);
        assert_eq!(expand_waypoints(from, &res.waypoints).len(), 8);
    }

    #[test]
    fn jump_points_are_sparser() {
        let world = TileGrid::from_ascii(
            "
            ..........
            ..........
            ....#.....
            ....#.....
            ....#.....
            ..........
            ",
        );
        let from = Coord::new(0, 0, 3);
        let to = Coord::new(9, 0, 3);
        for policy in POLICIES {
            let a = search(SearchGrid::build(&world), from, to, policy, Algorithm::AStar);
            let j = jps(SearchGrid::build(&world), from, to, policy);
            assert!(j.is_found());
            assert_eq!(a.cost, j.cost, "{policy:?}");
            assert!(j.waypoints.len() < a.waypoints.len(), "{policy:?}");
            assert_eq!(j.waypoints.last().map(|w| w.coord), Some(to));

            let grid = SearchGrid::build(&world);
            let cells = expand_waypoints(from, &j.waypoints);
            assert_legal_walk(&grid, from, &cells, policy);
            assert_eq!(path_cost(from, cells.iter().copied()) as f32, j.cost);
        }
    }

    #[test]
    fn corridor_is_one_jump() {
        let grid = SearchGrid::from_fn(Extent::new(200, 1, 1), |_| true);
        let res = jps(grid, Coord::ZERO, Coord::new(199, 0, 0), DiagonalPolicy::Always);
        assert_eq!(res.coords(), vec![Coord::new(199, 0, 0)]);
        assert_eq!(res.expanded, 2);
        assert_eq!(res.cost, 1990.0);
    }

    #[test]
    fn unreachable_is_empty_for_both() {
        let world = TileGrid::from_ascii(
            "
            ..#..
            ..#..
            ..#..
            ",
        );
        let from = Coord::new(0, 0, 1);
        let to = Coord::new(4, 0, 1);
        for policy in POLICIES {
            for algorithm in [Algorithm::AStar, Algorithm::JumpPoint] {
                let res = search(SearchGrid::build(&world), from, to, policy, algorithm);
                assert_eq!(res.outcome, SearchOutcome::Unreachable);
                assert!(res.is_empty());
            }
        }
    }

    #[test]
    fn no_corner_cut_under_strict_policy() {
        let world = TileGrid::from_ascii(
            "
            .#.
            ...
            ",
        );
        let from = Coord::new(0, 0, 0);
        let to = Coord::new(2, 0, 0);
        let grid = SearchGrid::build(&world);

        let res = jps(SearchGrid::build(&world), from, to, DiagonalPolicy::OnlyWhenNoObstacles);
        assert_eq!(res.cost, 40.0);
        let cells = expand_waypoints(from, &res.waypoints);
        assert_legal_walk(&grid, from, &cells, DiagonalPolicy::OnlyWhenNoObstacles);

        let res = jps(SearchGrid::build(&world), from, to, DiagonalPolicy::IfAtMostOneObstacle);
        assert_eq!(res.cost, 28.0);
    }

    #[test]
    fn never_policy_takes_no_diagonals() {
        let world = TileGrid::from_ascii(
            "
            ......
            .##...
            ...#..
            ......
            ",
        );
        let from = Coord::new(0, 0, 0);
        let to = Coord::new(5, 0, 3);
        let res = jps(SearchGrid::build(&world), from, to, DiagonalPolicy::Never);
        assert!(res.is_found());
        let mut prev = from;
        for w in &res.waypoints {
            assert!(w.coord.x == prev.x || w.coord.z == prev.z, "{prev} -> {}", w.coord);
            prev = w.coord;
        }
        assert_eq!(res.cost, 80.0);
    }

    #[test]
    fn start_equals_target() {
        let c = Coord::new(2, 0, 2);
        let res = jps(
            SearchGrid::from_fn(Extent::new(4, 1, 4), |_| true),
            c,
            c,
            DiagonalPolicy::Always,
        );
        assert_eq!(res.outcome, SearchOutcome::Found);
        assert!(res.is_empty());
    }

    #[test]
    fn expand_waypoints_fills_segments() {
        let wp = |x, z| crate::Waypoint {
            coord: Coord::new(x, 0, z),
            position: Coord::new(x, 0, z).into(),
            steps: 0,
        };
        let cells = expand_waypoints(Coord::ZERO, &[wp(2, 2), wp(2, 4), wp(5, 5)]);
        assert_eq!(
            cells,
            vec![
                Coord::new(1, 0, 1),
                Coord::new(2, 0, 2),
                Coord::new(2, 0, 3),
                Coord::new(2, 0, 4),
                Coord::new(3, 0, 5),
                Coord::new(4, 0, 5),
                Coord::new(5, 0, 5),
            ]
        );
        assert!(expand_waypoints(Coord::ZERO, &[]).is_empty());
    }

    #[test]
    fn random_grids_agree_with_astar() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
        let extent = Extent::new(16, 1, 12);
        for round in 0..60 {
            let mut world = TileGrid::new(extent);
            for c in extent.iter() {
                if rng.random_bool(0.3) {
                    world.set_walkable(c, false);
                }
            }
            let pick = |rng: &mut rand::rngs::StdRng| {
                Coord::new(rng.random_range(0..16), 0, rng.random_range(0..12))
            };
            let from = pick(&mut rng);
            let to = pick(&mut rng);
            world.set_walkable(from, true);
            world.set_walkable(to, true);

            for policy in POLICIES {
                let a = search(SearchGrid::build(&world), from, to, policy, Algorithm::AStar);
                let j = jps(SearchGrid::build(&world), from, to, policy);
                assert_eq!(a.outcome, j.outcome, "round {round} {policy:?} {from} -> {to}");
                assert_eq!(a.cost, j.cost, "round {round} {policy:?} {from} -> {to}");
                if j.is_found() {
                    let grid = SearchGrid::build(&world);
                    let cells = expand_waypoints(from, &j.waypoints);
                    assert_legal_walk(&grid, from, &cells, policy);
                    assert_eq!(cells.last().copied().unwrap_or(from), to);
                }
            }
        }
    }
}
