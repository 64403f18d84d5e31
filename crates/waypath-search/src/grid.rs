use waypath_core::{Coord, Direction, DirectionStatus, Extent, GridTransform, WorldGrid};

use crate::node::SearchNode;

/// Job-private snapshot of a world grid.
///
/// Walkability and side blocking are copied once at build time and never
/// change afterwards; a new snapshot is needed to observe later world
/// edits. The per-cell [`SearchNode`]s carry the mutable search state of
/// exactly one search, so a snapshot can be moved to a worker thread and
/// searched without any locking.
#[derive(Debug, Clone)]
pub struct SearchGrid {
    pub(crate) extent: Extent,
    pub(crate) transform: GridTransform,
    pub(crate) nodes: Vec<SearchNode>,
    pub(crate) has_side_blocking: bool,
}

impl SearchGrid {
    /// Copy walkability, side blocking and the world transform of every
    /// cell in `world`.
    pub fn build<W: WorldGrid + ?Sized>(world: &W) -> Self {
        let extent = world.extent();
        let mut has_side_blocking = false;
        let nodes = extent
            .iter()
            .map(|c| {
                let mut node = SearchNode::new(c, world.is_walkable(c));
                for d in Direction::ALL {
                    let status = world.direction_status(c, d);
                    if status != DirectionStatus::Walkable {
                        node.set_direction(d, status);
                        has_side_blocking |= status == DirectionStatus::Blocked;
                    }
                }
                node
            })
            .collect();
        Self {
            extent,
            transform: world.transform(),
            nodes,
            has_side_blocking,
        }
    }

    /// Build a snapshot from a walkability predicate, with identity
    /// transform and all sides open.
    pub fn from_fn(extent: Extent, walkable: impl Fn(Coord) -> bool) -> Self {
        let nodes = extent
            .iter()
            .map(|c| SearchNode::new(c, walkable(c)))
            .collect();
        Self {
            extent,
            transform: GridTransform::IDENTITY,
            nodes,
            has_side_blocking: false,
        }
    }

    #[inline]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    #[inline]
    pub fn transform(&self) -> GridTransform {
        self.transform
    }

    /// Whether any cell side is [`DirectionStatus::Blocked`].
    #[inline]
    pub fn has_side_blocking(&self) -> bool {
        self.has_side_blocking
    }

    /// The node at `c`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, c: Coord) -> Option<&SearchNode> {
        self.extent.index(c).map(|i| &self.nodes[i])
    }

    /// Whether `c` exists and is walkable.
    #[inline]
    pub fn is_walkable(&self, c: Coord) -> bool {
        self.get(c).is_some_and(SearchNode::is_walkable)
    }

    /// Clear all search state so the snapshot can be searched again.
    pub fn reset(&mut self) {
        for n in &mut self.nodes {
            n.reset();
        }
    }

    // -----------------------------------------------------------------------
    // Index helpers
    // -----------------------------------------------------------------------

    #[inline]
    pub(crate) fn idx(&self, c: Coord) -> Option<usize> {
        self.extent.index(c)
    }

    #[inline]
    pub(crate) fn walkable_idx(&self, c: Coord) -> Option<usize> {
        self.idx(c).filter(|&i| self.nodes[i].walkable)
    }

    #[inline]
    pub(crate) fn node(&self, idx: usize) -> &SearchNode {
        &self.nodes[idx]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, idx: usize) -> &mut SearchNode {
        &mut self.nodes[idx]
    }

    /// Whether a step from `from` into `to` crosses no blocked side of `to`.
    pub(crate) fn can_enter(&self, from: Coord, to: usize) -> bool {
        let node = &self.nodes[to];
        let dx = node.coord.x - from.x;
        let dz = node.coord.z - from.z;
        [Direction::entered_along_x(dx), Direction::entered_along_z(dz)]
            .into_iter()
            .flatten()
            .all(|side| node.direction(side) != DirectionStatus::Blocked)
    }
}
