use hexfog_core::{HexDirection, HexGrid};

use crate::search::{HexSearch, RangeNode};
use crate::traits::MovePolicy;

impl HexSearch {
    /// Every cell a mover standing on `from` can reach this turn.
    ///
    /// Uses the same relaxation as [`find_path`](Self::find_path) with the
    /// search limited to one turn and no destination. The origin is included
    /// at distance 0. Results are in nondecreasing distance order.
    pub fn movement_range<P: MovePolicy>(
        &mut self,
        grid: &HexGrid,
        from: usize,
        policy: &P,
    ) -> &[RangeNode] {
        self.range_results.clear();
        let speed = policy.speed();
        assert!(speed > 0, "movement_range: speed must be positive, got {speed}");

        let phase = self.begin(grid.len());
        {
            let node = &mut self.nodes[from];
            node.phase = phase;
            node.distance = 0;
            node.cost = 0;
            node.heuristic = 0;
            node.predecessor = None;
            node.priority = 0;
            self.frontier.enqueue(from, 0);
        }

        while let Some(ci) = self.frontier.dequeue_min() {
            self.nodes[ci].phase += 1;
            let current = grid.cell(ci);
            let current_distance = self.nodes[ci].distance;
            self.range_results.push(RangeNode {
                cell: ci,
                distance: current_distance,
            });

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
                // Within one turn no boundary is crossed, so no quantization.
                let distance = current_distance + move_cost;
                if distance > speed {
                    continue;
                }

                let n = &mut self.nodes[ni];
                if n.phase < phase {
                    n.phase = phase;
                    n.distance = distance;
                    n.cost = distance;
                    n.heuristic = 0;
                    n.predecessor = Some(ci);
                    n.priority = distance;
                    self.frontier.enqueue(ni, distance);
                } else if distance < n.distance {
                    n.distance = distance;
                    n.cost = distance;
                    n.predecessor = Some(ci);
                    n.priority = distance;
                    self.frontier.decrease_priority(ni, distance);
                }
            }
        }

        log::trace!(
            "movement_range from {from}: {} cells within {speed}",
            self.range_results.len()
        );
        &self.range_results
    }
}

#[cfg(test)]
mod tests {
    use hexfog_core::{EdgeType, HexCell};

    use super::*;
    use crate::traits::{FnPolicy, IMPASSABLE};

    fn policy(speed: i32) -> impl MovePolicy {
        FnPolicy::new(
            speed,
            |c: &HexCell| !c.is_underwater(),
            |f: &HexCell, t: &HexCell, _d| match f.edge_type(t) {
                EdgeType::Cliff => IMPASSABLE,
                EdgeType::Flat => 5,
                EdgeType::Slope => 10,
            },
        )
    }

    #[test]
    fn flat_range_is_a_hex_disc() {
        let grid = HexGrid::new(11, 11).unwrap();
        let center = grid.offset_index(5, 5).unwrap();
        let mut s = HexSearch::for_grid(&grid);
        let reached = s.movement_range(&grid, center, &policy(10)).to_vec();
        // Radius two around an interior cell: 1 + 6 + 12.
        assert_eq!(reached.len(), 19);
        assert_eq!(reached[0], RangeNode { cell: center, distance: 0 });
        for node in &reached {
            assert_eq!(node.distance, grid.distance(center, node.cell) * 5);
        }
        assert!(reached.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn range_agrees_with_limited_path_search() {
        let mut grid = HexGrid::new(9, 9).unwrap();
        for i in (0..grid.len()).step_by(4) {
            grid.set_elevation(i, 1);
        }
        let origin = grid.offset_index(4, 4).unwrap();
        let p = policy(24);
        let mut s = HexSearch::for_grid(&grid);
        let reached: Vec<RangeNode> = s.movement_range(&grid, origin, &p).to_vec();
        for node in reached.iter().filter(|n| n.cell != origin) {
            let path = s.find_path(&grid, origin, node.cell, &p, true);
            assert_eq!(path.map(|p| p.distance()), Some(node.distance));
        }
        let in_range: Vec<usize> = reached.iter().map(|n| n.cell).collect();
        for i in 0..grid.len() {
            if i != origin && !in_range.contains(&i) {
                assert!(s.find_path(&grid, origin, i, &p, true).is_none(), "cell {i}");
            }
        }
    }
}
