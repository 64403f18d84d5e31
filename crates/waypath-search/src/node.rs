use waypath_core::{Coord, Direction, DirectionStatus};

/// Per-cell search state.
///
/// Nodes live inside one [`SearchGrid`](crate::SearchGrid) and are never
/// shared between jobs. `parent` is an index into the same grid and is only
/// used to walk the found path backwards.
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub(crate) coord: Coord,
    pub(crate) walkable: bool,
    pub(crate) g_cost: f32,
    pub(crate) h_cost: i32,
    pub(crate) parent: Option<usize>,
    pub(crate) steps: u32,
    pub(crate) sides: [DirectionStatus; 4],
}

impl SearchNode {
    pub(crate) fn new(coord: Coord, walkable: bool) -> Self {
        Self {
            coord,
            walkable,
            g_cost: 0.0,
            h_cost: 0,
            parent: None,
            steps: 0,
            sides: [DirectionStatus::Walkable; 4],
        }
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub fn is_walkable(&self) -> bool {
        self.walkable
    }

    /// Accumulated cost from the start.
    #[inline]
    pub fn g_cost(&self) -> f32 {
        self.g_cost
    }

    /// Heuristic estimate to the target.
    #[inline]
    pub fn h_cost(&self) -> i32 {
        self.h_cost
    }

    /// Expansion priority: `g + h`.
    #[inline]
    pub fn f_cost(&self) -> f32 {
        self.g_cost + self.h_cost as f32
    }

    /// Index of the node this one was reached from.
    #[inline]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Grid steps from the start along the current parent chain.
    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    #[inline]
    pub fn direction(&self, d: Direction) -> DirectionStatus {
        self.sides[d.index()]
    }

    #[inline]
    pub fn set_direction(&mut self, d: Direction, status: DirectionStatus) {
        self.sides[d.index()] = status;
    }

    pub(crate) fn reset(&mut self) {
        self.g_cost = 0.0;
        self.h_cost = 0;
        self.parent = None;
        self.steps = 0;
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for SearchNode {}
