//! **waypath-core**: shared grid types for the waypath pathfinding engine.
//!
//! This crate provides the coordinate and extent primitives used across the
//! workspace, the [`WorldGrid`] read interface through which the engine
//! consumes a host's live grid, and [`TileGrid`], a simple owned world grid.

pub mod direction;
pub mod geom;
pub mod world;

pub use direction::{Direction, DirectionStatus};
pub use geom::{Coord, Extent, GridTransform, Position};
pub use world::{Tile, TileGrid, WorldGrid};
