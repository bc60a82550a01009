use hexfog_core::{HexDirection, HexGrid};

use crate::search::{HexPath, HexSearch, turn_of};
use crate::traits::MovePolicy;

impl HexSearch {
    /// Find the cheapest path from `from` to `to` in turn-quantized cost.
    ///
    /// Movement points do not roll over between turns: when entering a cell
    /// would cross into a new turn, the entry is charged as if it started at
    /// the beginning of that turn. With `limit_search`, cells that cannot be
    /// reached within the first turn are pruned.
    ///
    /// Returns `None` when no path exists, and also when `from == to`
    /// (staying in place is not a move).
    ///
    /// # Panics
    ///
    /// Panics if `policy.speed()` is not positive or an index is out of
    /// bounds for `grid`.
    pub fn find_path<P: MovePolicy>(
        &mut self,
        grid: &HexGrid,
        from: usize,
        to: usize,
        policy: &P,
        limit_search: bool,
    ) -> Option<HexPath> {
        let goal = grid.cell(to).coordinates();
        if from == to {
            return None;
        }
        let speed = policy.speed();
        assert!(speed > 0, "find_path: speed must be positive, got {speed}");

        let phase = self.begin(grid.len());

        {
            let origin = grid.cell(from);
            let node = &mut self.nodes[from];
            node.phase = phase;
            node.distance = 0;
            node.cost = 0;
            node.heuristic = policy.estimate(origin.coordinates(), goal);
            node.predecessor = None;
            node.priority = node.heuristic;
            self.frontier.enqueue(from, node.priority);
        }

        let mut expanded = 0usize;
        let found = 'search: loop {
            let Some(ci) = self.frontier.dequeue_min() else {
                break 'search false;
            };
            self.nodes[ci].phase += 1;
            expanded += 1;

            if ci == to {
                break 'search true;
            }

            let current = grid.cell(ci);
            let current_distance = self.nodes[ci].distance;
            let current_cost = self.nodes[ci].cost;
            let current_turn = turn_of(current_distance, speed);

            for d in HexDirection::ALL {
                let Some(ni) = current.neighbor(d) else {
                    continue;
                };
                if self.nodes[ni].phase > phase {
                    continue;
                }
                let neighbor = grid.cell(ni);
                if !policy.is_valid_destination(neighbor) {
                    continue;
                }
                let move_cost = policy.move_cost(current, neighbor, d);
                if move_cost < 0 {
                    continue;
                }

                let mut distance = current_distance + move_cost;
                if limit_search && distance > speed {
                    continue;
                }
                let turn = turn_of(distance, speed);
                if turn > current_turn {
                    distance = turn * speed + move_cost;
                }

                let n = &mut self.nodes[ni];
                if n.phase < phase {
                    n.phase = phase;
                    n.distance = distance;
                    n.cost = current_cost + move_cost;
                    n.predecessor = Some(ci);
                    n.heuristic = policy.estimate(neighbor.coordinates(), goal);
                    n.priority = distance + n.heuristic;
                    self.frontier.enqueue(ni, n.priority);
                } else if distance < n.distance {
                    n.distance = distance;
                    n.cost = current_cost + move_cost;
                    n.predecessor = Some(ci);
                    n.priority = distance + n.heuristic;
                    self.frontier.decrease_priority(ni, n.priority);
                }
            }
        };

        log::trace!(
            "find_path {from} -> {to}: expanded {expanded}, found {found} (phase {phase})"
        );

        if !found {
            return None;
        }

        let mut cells = Vec::new();
        let mut ci = Some(to);
        while let Some(c) = ci {
            cells.push(c);
            ci = self.nodes[c].predecessor;
        }
        cells.reverse();
        let dest = &self.nodes[to];
        Some(HexPath::new(cells, dest.distance, dest.cost))
    }
}
