//! Grid search for the waypath engine.
//!
//! A search runs over a [`SearchGrid`], a private snapshot of a host's
//! [`WorldGrid`](waypath_core::WorldGrid) that carries the per-cell search
//! state. Two expansion strategies share one open/closed loop:
//!
//! - **A\*** expands every neighbor permitted by the [`DiagonalPolicy`]
//!   (and, optionally, by blocked cell sides).
//! - **Jump Point Search** expands only jump points, giving sparser
//!   waypoint lists of the same total cost. Use [`expand_waypoints`] to
//!   recover every intermediate cell.
//!
//! Costs use a weighted octile metric ([`grid_distance`]): 10 per straight
//! step, 14 per diagonal step.
//!
//! ```
//! use waypath_core::{Coord, TileGrid};
//! use waypath_search::{SearchGrid, SearchOptions, find_path};
//!
//! let world = TileGrid::from_ascii(
//!     "
//!     ....
//!     .##.
//!     ....
//!     ",
//! );
//! let res = find_path(
//!     SearchGrid::build(&world),
//!     Coord::new(0, 0, 0),
//!     Coord::new(3, 0, 2),
//!     SearchOptions::default(),
//! );
//! assert!(res.is_found());
//! assert_eq!(res.waypoints.last().map(|w| w.coord), Some(Coord::new(3, 0, 2)));
//! ```
//!
//! With [`SearchOptions::record_trace`] set, the result carries a
//! [`SearchTrace`] that a [`SearchTraceRecorder`] can replay step by step.

mod astar;
mod distance;
mod grid;
mod jps;
mod neighbors;
mod node;
mod searcher;
mod trace;

pub use distance::{DIAGONAL_COST, STRAIGHT_COST, chebyshev, grid_distance, manhattan, path_cost};
pub use grid::SearchGrid;
pub use jps::expand_waypoints;
pub use neighbors::{DiagonalPolicy, Neighbors};
pub use node::SearchNode;
pub use searcher::{
    Algorithm, PathResult, PathSearcher, SearchOptions, SearchOutcome, Waypoint, find_path,
};
pub use trace::{Marker, SearchTrace, SearchTraceRecorder, Snapshot, TraceCanvas, TraceNode};
