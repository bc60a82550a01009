use hexfog_core::HexGrid;

use crate::frontier::Frontier;

/// Distance reported for cells the last search did not reach.
pub const UNREACHABLE: i32 = i32::MAX;

/// A cell reached by a range query, with its distance from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeNode {
    pub cell: usize,
    pub distance: i32,
}

/// A found path, origin and destination included.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexPath {
    cells: Vec<usize>,
    distance: i32,
    cost: i32,
}

impl HexPath {
    pub(crate) fn new(cells: Vec<usize>, distance: i32, cost: i32) -> Self {
        Self {
            cells,
            distance,
            cost,
        }
    }

    /// Cells from origin to destination.
    #[inline]
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<usize> {
        self.cells
    }

    /// First cell of the path.
    pub fn origin(&self) -> usize {
        self.cells[0]
    }

    /// Last cell of the path.
    pub fn destination(&self) -> usize {
        self.cells[self.cells.len() - 1]
    }

    /// Number of cells, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Turn-quantized distance of the destination.
    #[inline]
    pub fn distance(&self) -> i32 {
        self.distance
    }

    /// Movement points actually spent on edges.
    #[inline]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Number of turns needed to walk the path at `speed`.
    pub fn turns(&self, speed: i32) -> i32 {
        turn_of(self.distance, speed) + 1
    }
}

/// Zero-based turn in which a cell at `distance` is entered.
#[inline]
pub const fn turn_of(distance: i32, speed: i32) -> i32 {
    (distance - 1) / speed
}

/// Per-cell search scratch, valid only when `phase` belongs to the current
/// search.
#[derive(Clone, Debug, Default)]
pub(crate) struct Node {
    pub(crate) phase: u32,
    pub(crate) distance: i32,
    pub(crate) heuristic: i32,
    pub(crate) cost: i32,
    pub(crate) predecessor: Option<usize>,
    pub(crate) priority: i32,
}

// ---------------------------------------------------------------------------
// HexSearch
// ---------------------------------------------------------------------------

/// Search arena for one grid.
///
/// `HexSearch` owns the per-cell scratch nodes, the shared phase counter and
/// the single [`Frontier`] used by the pathfinder, the movement range query
/// and the visibility fill. Every search advances the phase by two: a node
/// stamped with the current phase is on the frontier, one stamped
/// `phase + 1` is finalized, anything older is untouched. Nothing is cleared
/// between searches.
pub struct HexSearch {
    pub(crate) nodes: Vec<Node>,
    pub(crate) phase: u32,
    pub(crate) frontier: Frontier,
    pub(crate) range_results: Vec<RangeNode>,
    pub(crate) visible: Vec<usize>,
}

impl HexSearch {
    /// Create an arena for grids of up to `capacity` cells.
    pub fn new(capacity: usize) -> Self {
        Self {
            nodes: vec![Node::default(); capacity],
            phase: 0,
            frontier: Frontier::new(capacity),
            range_results: Vec::new(),
            visible: Vec::new(),
        }
    }

    /// Create an arena sized for `grid`.
    pub fn for_grid(grid: &HexGrid) -> Self {
        Self::new(grid.len())
    }

    /// Number of cells the arena can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Current search phase.
    #[inline]
    pub fn phase(&self) -> u32 {
        self.phase
    }

    /// Start a new search: grow if needed, advance the phase, empty the
    /// frontier.
    pub(crate) fn begin(&mut self, len: usize) -> u32 {
        if len > self.nodes.len() {
            log::debug!("growing search arena {} -> {len}", self.nodes.len());
            self.nodes.resize(len, Node::default());
            self.frontier = Frontier::new(len);
        }
        if self.phase >= u32::MAX - 2 {
            for n in &mut self.nodes {
                n.phase = 0;
            }
            self.phase = 0;
        }
        self.phase += 2;
        self.frontier.clear();
        self.phase
    }

    /// Whether `cell` was discovered by the most recent search.
    #[inline]
    pub fn was_reached(&self, cell: usize) -> bool {
        self.phase > 0 && self.nodes.get(cell).is_some_and(|n| n.phase >= self.phase)
    }

    /// Whether `cell` was dequeued (finalized) by the most recent search.
    #[inline]
    pub fn was_finalized(&self, cell: usize) -> bool {
        self.phase > 0 && self.nodes.get(cell).is_some_and(|n| n.phase == self.phase + 1)
    }

    /// Distance of `cell` in the most recent search, or [`UNREACHABLE`].
    pub fn distance_at(&self, cell: usize) -> i32 {
        if self.was_reached(cell) {
            self.nodes[cell].distance
        } else {
            UNREACHABLE
        }
    }

    /// Predecessor of `cell` in the most recent search.
    pub fn predecessor(&self, cell: usize) -> Option<usize> {
        if self.was_reached(cell) {
            self.nodes[cell].predecessor
        } else {
            None
        }
    }
}
