//! Shared pieces of the terminal path demo.
//!
//! Demonstrates: random world generation, batched background path jobs,
//! A* versus JPS waypoint density, and step-by-step replay of a search
//! trace onto an ASCII canvas.

use rand::{Rng, RngExt};
use waypath_core::{Coord, Extent, Tile, TileGrid, WorldGrid};
use waypath_search::{Marker, PathResult, TraceCanvas, TraceNode};

pub const WIDTH: i32 = 48;
pub const DEPTH: i32 = 20;
/// Share of cells left walkable by [`random_world`].
pub const WALKABLE_RATIO: f64 = 0.9;

const WALL: char = '#';
const FLOOR: char = '.';
const PATH: char = '*';
const START: char = 'S';
const TARGET: char = 'T';

// ---------------------------------------------------------------------------
// World generation
// ---------------------------------------------------------------------------

/// A single-plane world where each cell is walkable with probability
/// `walkable`.
pub fn random_world(rng: &mut impl Rng, extent: Extent, walkable: f64) -> TileGrid {
    let mut world = TileGrid::new(extent);
    for c in extent.iter() {
        if !rng.random_bool(walkable) {
            world.set(c, Tile::BLOCKED);
        }
    }
    world
}

/// A random walkable cell, or `None` if the world has none.
pub fn random_floor(rng: &mut impl Rng, world: &TileGrid) -> Option<Coord> {
    let extent = world.extent();
    let floors: Vec<Coord> = extent.iter().filter(|&c| world.is_walkable(c)).collect();
    if floors.is_empty() {
        return None;
    }
    Some(floors[rng.random_range(0..floors.len())])
}

// ---------------------------------------------------------------------------
// AsciiCanvas
// ---------------------------------------------------------------------------

/// A character view of one `y` plane of a world.
///
/// Trace markers are drawn over the base layer and can be cleared back to
/// it, so the canvas can follow a [`SearchTraceRecorder`](waypath_search::SearchTraceRecorder).
#[derive(Debug, Clone)]
pub struct AsciiCanvas {
    width: i32,
    depth: i32,
    base: Vec<char>,
    cells: Vec<char>,
}

impl AsciiCanvas {
    /// Draw walls and floors of `world` at `y = 0`.
    pub fn new(world: &impl WorldGrid) -> Self {
        let extent = world.extent();
        let (width, depth) = (extent.size_x, extent.size_z);
        let mut base = Vec::with_capacity((width * depth).max(0) as usize);
        for z in 0..depth {
            for x in 0..width {
                let walkable = world.is_walkable(Coord::new(x, 0, z));
                base.push(if walkable { FLOOR } else { WALL });
            }
        }
        Self {
            width,
            depth,
            cells: base.clone(),
            base,
        }
    }

    fn idx(&self, c: Coord) -> Option<usize> {
        if c.x < 0 || c.z < 0 || c.x >= self.width || c.z >= self.depth {
            return None;
        }
        Some((c.z * self.width + c.x) as usize)
    }

    /// The character currently shown at `c`.
    pub fn at(&self, c: Coord) -> Option<char> {
        self.idx(c).map(|i| self.cells[i])
    }

    /// Overwrite a cell; the base layer is kept for [`TraceCanvas::clear`].
    pub fn put(&mut self, c: Coord, ch: char) {
        if let Some(i) = self.idx(c) {
            self.cells[i] = ch;
        }
    }

    /// Draw a finished path with its endpoints.
    pub fn draw_path(&mut self, start: Coord, result: &PathResult) {
        for w in &result.waypoints {
            self.put(w.coord, PATH);
        }
        self.put(start, START);
        if let Some(last) = result.waypoints.last() {
            self.put(last.coord, TARGET);
        }
    }

    /// Rows from `z = depth - 1` down to `z = 0`.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.depth as usize);
        for z in (0..self.depth).rev() {
            let row = (z * self.width) as usize;
            out.extend(&self.cells[row..row + self.width as usize]);
            out.push('\n');
        }
        out
    }
}

impl TraceCanvas for AsciiCanvas {
    fn mark(&mut self, node: &TraceNode, marker: Marker) {
        let ch = match marker {
            Marker::Open => 'o',
            Marker::Closed => 'x',
            Marker::Current => '@',
        };
        self.put(node.coord, ch);
    }

    fn clear(&mut self, coord: Coord) {
        if let Some(i) = self.idx(coord) {
            self.cells[i] = self.base[i];
        }
    }
}
