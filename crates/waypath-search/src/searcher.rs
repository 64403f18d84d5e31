use waypath_core::{Coord, Position};

use crate::distance::{chebyshev, grid_distance};
use crate::grid::SearchGrid;
use crate::neighbors::{DiagonalPolicy, Neighbors};
use crate::trace::{SearchTrace, Snapshot};

/// Which expansion strategy a [`PathSearcher`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Plain A*: expand every permitted neighbor.
    #[default]
    AStar,
    /// Jump Point Search: expand only jump points.
    JumpPoint,
}

/// Per-search settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOptions {
    pub diagonal: DiagonalPolicy,
    pub algorithm: Algorithm,
    /// Record a [`SearchTrace`] of every expansion.
    pub record_trace: bool,
    /// Honor blocked cell sides. Only A* applies these rules.
    pub side_rules: bool,
}

impl SearchOptions {
    pub fn with_diagonal(mut self, diagonal: DiagonalPolicy) -> Self {
        self.diagonal = diagonal;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }

    pub fn with_side_rules(mut self, side_rules: bool) -> Self {
        self.side_rules = side_rules;
        self
    }
}

/// Whether the target was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    Found,
    Unreachable,
}

/// One point of a returned path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub coord: Coord,
    /// World position of `coord`, per the snapshot's transform.
    pub position: Position,
    /// Grid steps from the start to this waypoint.
    pub steps: u32,
}

/// Everything a finished search produces.
///
/// `waypoints` excludes the start and includes the target. An empty list
/// means "no path" unless `outcome` is [`SearchOutcome::Found`], which only
/// happens when start and target coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    pub outcome: SearchOutcome,
    pub waypoints: Vec<Waypoint>,
    /// Total path cost (the target's `g` cost); `0` when unreachable.
    pub cost: f32,
    /// Number of nodes moved to the closed set.
    pub expanded: usize,
    pub trace: Option<SearchTrace>,
}

impl PathResult {
    /// A result with no path and nothing expanded.
    pub fn unreachable() -> Self {
        Self {
            outcome: SearchOutcome::Unreachable,
            waypoints: Vec::new(),
            cost: 0.0,
            expanded: 0,
            trace: None,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.outcome == SearchOutcome::Found
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Waypoint coordinates in order.
    pub fn coords(&self) -> Vec<Coord> {
        self.waypoints.iter().map(|w| w.coord).collect()
    }
}

/// Runs one search over a private [`SearchGrid`].
///
/// The searcher owns its grid, open list and closed set, so any number of
/// searchers can run on different threads without sharing state.
pub struct PathSearcher {
    pub(crate) grid: SearchGrid,
    pub(crate) start: Coord,
    pub(crate) target: Coord,
    pub(crate) options: SearchOptions,
    pub(crate) open: Vec<usize>,
    pub(crate) in_open: Vec<bool>,
    pub(crate) closed: Vec<usize>,
    pub(crate) in_closed: Vec<bool>,
    pub(crate) trace: Option<SearchTrace>,
    pub(crate) neighbors: Neighbors,
    pub(crate) dir_buf: Vec<(i32, i32)>,
    pub(crate) jump_stack: Vec<Coord>,
}

impl PathSearcher {
    pub fn new(grid: SearchGrid, start: Coord, target: Coord, options: SearchOptions) -> Self {
        let len = grid.extent().len();
        Self {
            grid,
            start,
            target,
            options,
            open: Vec::new(),
            in_open: vec![false; len],
            closed: Vec::new(),
            in_closed: vec![false; len],
            trace: options.record_trace.then(SearchTrace::new),
            neighbors: Neighbors::new(),
            dir_buf: Vec::with_capacity(8),
            jump_stack: Vec::new(),
        }
    }

    /// The snapshot being searched.
    pub fn grid(&self) -> &SearchGrid {
        &self.grid
    }

    /// Run the search to completion.
    pub fn run(self) -> PathResult {
        self.run_into_grid().0
    }

    /// Run the search and hand back the snapshot with its search state
    /// cleared, ready for another [`PathSearcher`].
    pub fn run_into_grid(mut self) -> (PathResult, SearchGrid) {
        let res = self.search();
        let mut grid = self.grid;
        grid.reset();
        (res, grid)
    }

    fn search(&mut self) -> PathResult {
        let Some(start_idx) = self.grid.walkable_idx(self.start) else {
            log::debug!("search start {} is absent or blocked", self.start);
            return PathResult::unreachable();
        };
        let Some(target_idx) = self.grid.idx(self.target) else {
            log::debug!("search target {} is outside the grid", self.target);
            return PathResult::unreachable();
        };
        if self.options.algorithm == Algorithm::JumpPoint && self.options.side_rules {
            log::debug!("jump point search ignores blocked cell sides");
        }

        {
            let start = self.grid.node_mut(start_idx);
            start.g_cost = 0.0;
            start.h_cost = 0;
            start.parent = None;
            start.steps = 0;
        }
        self.push_open(start_idx);

        let found = loop {
            let Some(ci) = self.pop_best() else {
                break false;
            };
            self.closed.push(ci);
            self.in_closed[ci] = true;

            if ci == target_idx {
                break true;
            }

            match self.options.algorithm {
                Algorithm::AStar => self.expand_astar(ci),
                Algorithm::JumpPoint => self.identify_successors(ci),
            }

            if let Some(trace) = self.trace.as_mut() {
                trace.push(Snapshot::capture(&self.grid, ci, &self.open, &self.closed));
            }
        };

        let expanded = self.closed.len();
        log::trace!(
            "{:?} search {} -> {}: {} expanded, found = {}",
            self.options.algorithm,
            self.start,
            self.target,
            expanded,
            found
        );

        if !found {
            return PathResult {
                expanded,
                trace: self.trace.take(),
                ..PathResult::unreachable()
            };
        }

        PathResult {
            outcome: SearchOutcome::Found,
            waypoints: self.retrace(start_idx, target_idx),
            cost: self.grid.node(target_idx).g_cost,
            expanded,
            trace: self.trace.take(),
        }
    }

    // -----------------------------------------------------------------------
    // Open / closed bookkeeping
    // -----------------------------------------------------------------------

    #[inline]
    pub(crate) fn push_open(&mut self, idx: usize) {
        if !self.in_open[idx] {
            self.in_open[idx] = true;
            self.open.push(idx);
        }
    }

    /// Remove and return the open node with the lowest `f` cost.
    ///
    /// A* breaks `f` ties on the lower `h` cost; jump point search does not.
    /// Remaining ties keep the earliest node in open-list order.
    fn pop_best(&mut self) -> Option<usize> {
        let first = *self.open.first()?;
        let mut best_pos = 0;
        let mut best = self.grid.node(first);
        let astar = self.options.algorithm == Algorithm::AStar;
        for (pos, &i) in self.open.iter().enumerate().skip(1) {
            let n = self.grid.node(i);
            let better = n.f_cost() < best.f_cost()
                || (astar && n.f_cost() == best.f_cost() && n.h_cost() < best.h_cost());
            if better {
                best_pos = pos;
                best = n;
            }
        }
        let idx = self.open.remove(best_pos);
        self.in_open[idx] = false;
        Some(idx)
    }

    /// Link `child` to `parent` with the given tentative cost.
    pub(crate) fn relax(&mut self, parent: usize, child: usize, g_cost: f32) {
        let target = self.target;
        let (pc, ps) = {
            let p = self.grid.node(parent);
            (p.coord(), p.steps())
        };
        let n = self.grid.node_mut(child);
        n.g_cost = g_cost;
        n.h_cost = grid_distance(n.coord, target);
        n.parent = Some(parent);
        n.steps = ps + chebyshev(pc, n.coord) as u32;
        self.push_open(child);
    }

    /// Follow parent links from the target back to (but excluding) the start.
    fn retrace(&self, start_idx: usize, target_idx: usize) -> Vec<Waypoint> {
        let transform = self.grid.transform();
        let mut path = Vec::new();
        let mut ci = target_idx;
        while ci != start_idx {
            let n = self.grid.node(ci);
            path.push(Waypoint {
                coord: n.coord(),
                position: transform.to_world(n.coord()),
                steps: n.steps(),
            });
            match n.parent() {
                Some(p) => ci = p,
                None => break,
            }
        }
        path.reverse();
        path
    }
}

/// Build a searcher over `grid` and run it.
pub fn find_path(
    grid: SearchGrid,
    start: Coord,
    target: Coord,
    options: SearchOptions,
) -> PathResult {
    PathSearcher::new(grid, start, target, options).run()
}
