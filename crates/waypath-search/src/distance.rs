use waypath_core::Coord;

/// Cost of one straight step.
pub const STRAIGHT_COST: i32 = 10;
/// Cost of one diagonal step (≈ 10·√2).
pub const DIAGONAL_COST: i32 = 14;

/// Weighted octile distance used both as step cost and heuristic.
///
/// Diagonal steps in the x/z plane cost 14, straight steps 10, and every
/// unit of `y` difference 10.
#[inline]
pub fn grid_distance(a: Coord, b: Coord) -> i32 {
    let (dx, dy, dz) = a.abs_diff(b);
    if dx > dz {
        DIAGONAL_COST * dz + STRAIGHT_COST * (dx - dz) + STRAIGHT_COST * dy
    } else {
        DIAGONAL_COST * dx + STRAIGHT_COST * (dz - dx) + STRAIGHT_COST * dy
    }
}

/// Chebyshev (L∞) distance in the x/z plane: the number of 8-way steps.
#[inline]
pub fn chebyshev(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs().max((a.z - b.z).abs())
}

/// Manhattan (L1) distance in the x/z plane: the number of 4-way steps.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs() + (a.z - b.z).abs()
}

/// Total [`grid_distance`] cost of walking `start` then each of `waypoints`
/// in order.
pub fn path_cost(start: Coord, waypoints: impl IntoIterator<Item = Coord>) -> i32 {
    let mut prev = start;
    let mut total = 0;
    for c in waypoints {
        total += grid_distance(prev, c);
        prev = c;
    }
    total
}
