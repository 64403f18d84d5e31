use crate::distance::grid_distance;
use crate::searcher::PathSearcher;

impl PathSearcher {
    /// Relax every permitted neighbor of `ci`.
    pub(crate) fn expand_astar(&mut self, ci: usize) {
        let cur = self.grid.node(ci);
        let (cp, cur_g) = (cur.coord(), cur.g_cost());
        let (policy, side_rules) = (self.options.diagonal, self.options.side_rules);

        let mut nbuf = std::mem::take(&mut self.neighbors);
        for &ni in nbuf.collect(&self.grid, cp, policy, side_rules) {
            if self.in_closed[ni] {
                continue;
            }
            let neighbor = self.grid.node(ni);
            let tentative_g = cur_g + grid_distance(cp, neighbor.coord()) as f32;
            if tentative_g < neighbor.g_cost() || !self.in_open[ni] {
                self.relax(ci, ni, tentative_g);
            }
        }
        self.neighbors = nbuf;
    }
}
