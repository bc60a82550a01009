//! Range- and elevation-limited visibility fill.
//!
//! Sight spreads one step at a time from the vantage cell. A cell is seen
//! when it is close enough outright, or when its step distance plus its view
//! elevation stays within the vantage's effective range (base range plus the
//! vantage's own view elevation). The step distance may never exceed the
//! straight hex distance, so sight cannot bend around low terrain.

use hexfog_core::{HexDirection, HexGrid};

use crate::search::HexSearch;

/// Cells this close to the vantage are seen regardless of elevation.
pub const ALWAYS_VISIBLE_DISTANCE: i32 = 3;

impl HexSearch {
    /// Cells visible from `vantage` with base sight `range`.
    ///
    /// The vantage itself is always first in the result. Cells that are not
    /// explorable are never entered.
    pub fn visible_cells(&mut self, grid: &HexGrid, vantage: usize, range: i32) -> &[usize] {
        self.visible.clear();

        let phase = self.begin(grid.len());
        let origin = grid.cell(vantage);
        let range = range + origin.view_elevation();
        let from_coordinates = origin.coordinates();
        {
            let node = &mut self.nodes[vantage];
            node.phase = phase;
            node.distance = 0;
            node.cost = 0;
            node.heuristic = 0;
            node.predecessor = None;
            node.priority = 0;
            self.frontier.enqueue(vantage, 0);
        }

        while let Some(ci) = self.frontier.dequeue_min() {
            self.nodes[ci].phase += 1;
            self.visible.push(ci);
            let current = grid.cell(ci);
            let distance = self.nodes[ci].distance + 1;

            for d in HexDirection::ALL {
                let Some(ni) = current.neighbor(d) else {
                    continue;
                };
                let neighbor = grid.cell(ni);
                if self.nodes[ni].phase > phase || !neighbor.is_explorable() {
                    continue;
                }
                if (distance > ALWAYS_VISIBLE_DISTANCE
                    && distance + neighbor.view_elevation() > range)
                    || distance > from_coordinates.distance_to(neighbor.coordinates())
                {
                    continue;
                }

                let n = &mut self.nodes[ni];
                if n.phase < phase {
                    n.phase = phase;
                    n.distance = distance;
                    n.heuristic = 0;
                    n.predecessor = Some(ci);
                    n.priority = distance;
                    self.frontier.enqueue(ni, distance);
                } else if distance < n.distance {
                    n.distance = distance;
                    n.predecessor = Some(ci);
                    n.priority = distance;
                    self.frontier.decrease_priority(ni, distance);
                }
            }
        }

        log::trace!(
            "visible_cells from {vantage} (range {range}): {} cells",
            self.visible.len()
        );
        &self.visible
    }
}
