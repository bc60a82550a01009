//! The [`HexCell`] type and the [`EdgeType`] classification between cells.

use crate::coords::{HexCoordinates, HexDirection};

/// Identifier of a unit occupying a cell.
pub type UnitId = usize;

/// Identifier of an item lying on a cell.
pub type ItemId = usize;

/// Terrain classification of the edge between two adjacent cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeType {
    /// Same elevation.
    Flat,
    /// One elevation step up or down.
    Slope,
    /// Two or more elevation steps.
    Cliff,
}

impl EdgeType {
    /// Classify the edge between cells at elevations `a` and `b`.
    pub const fn between(a: i32, b: i32) -> Self {
        let delta = b - a;
        if delta == 0 {
            EdgeType::Flat
        } else if delta == 1 || delta == -1 {
            EdgeType::Slope
        } else {
            EdgeType::Cliff
        }
    }
}

/// A single cell of the hex grid.
///
/// Topology (index, coordinates, neighbor slots) is fixed when the grid is
/// built. Terrain, occupancy and visibility are mutable content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HexCell {
    index: usize,
    coordinates: HexCoordinates,
    neighbors: [Option<usize>; 6],
    elevation: i32,
    water_level: i32,
    explorable: bool,
    explored: bool,
    visibility: u32,
    unit: Option<UnitId>,
    item: Option<ItemId>,
}

impl HexCell {
    pub(crate) fn new(index: usize, coordinates: HexCoordinates, explorable: bool) -> Self {
        Self {
            index,
            coordinates,
            neighbors: [None; 6],
            elevation: 0,
            water_level: 0,
            explorable,
            explored: false,
            visibility: 0,
            unit: None,
            item: None,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn coordinates(&self) -> HexCoordinates {
        self.coordinates
    }

    /// Index of the neighbor in direction `d`, or `None` at the map edge.
    #[inline]
    pub fn neighbor(&self, d: HexDirection) -> Option<usize> {
        self.neighbors[d.index()]
    }

    /// All six neighbor slots in direction order.
    #[inline]
    pub fn neighbor_slots(&self) -> &[Option<usize>; 6] {
        &self.neighbors
    }

    pub(crate) fn set_neighbor_slot(&mut self, d: HexDirection, other: usize) {
        self.neighbors[d.index()] = Some(other);
    }

    #[inline]
    pub fn elevation(&self) -> i32 {
        self.elevation
    }

    #[inline]
    pub fn water_level(&self) -> i32 {
        self.water_level
    }

    /// Whether the water surface lies above the terrain.
    #[inline]
    pub fn is_underwater(&self) -> bool {
        self.water_level > self.elevation
    }

    /// Elevation used for sight lines: the water surface when submerged.
    #[inline]
    pub fn view_elevation(&self) -> i32 {
        self.elevation.max(self.water_level)
    }

    /// Static map-border policy: cells outside the border are never
    /// explored or seen.
    #[inline]
    pub fn is_explorable(&self) -> bool {
        self.explorable
    }

    #[inline]
    pub fn is_explored(&self) -> bool {
        self.explored && self.explorable
    }

    /// Number of vantage points currently seeing this cell.
    #[inline]
    pub fn visibility(&self) -> u32 {
        self.visibility
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visibility > 0 && self.explorable
    }

    #[inline]
    pub fn unit(&self) -> Option<UnitId> {
        self.unit
    }

    #[inline]
    pub fn item(&self) -> Option<ItemId> {
        self.item
    }

    /// Edge classification towards `other`.
    #[inline]
    pub fn edge_type(&self, other: &HexCell) -> EdgeType {
        EdgeType::between(self.elevation, other.elevation)
    }

    pub(crate) fn set_elevation(&mut self, elevation: i32) {
        self.elevation = elevation;
    }

    pub(crate) fn set_water_level(&mut self, level: i32) {
        self.water_level = level;
    }

    pub(crate) fn set_explorable(&mut self, explorable: bool) {
        self.explorable = explorable;
    }

    pub(crate) fn set_explored(&mut self, explored: bool) {
        self.explored = explored;
    }

    pub(crate) fn set_unit(&mut self, unit: Option<UnitId>) {
        self.unit = unit;
    }

    pub(crate) fn set_item(&mut self, item: Option<ItemId>) {
        self.item = item;
    }

    /// Returns `true` when the cell just became visible.
    pub(crate) fn increase_visibility(&mut self) -> bool {
        self.visibility += 1;
        if self.visibility == 1 {
            self.explored = true;
            return true;
        }
        false
    }

    /// Returns `true` when the cell just stopped being visible.
    ///
    /// # Panics
    ///
    /// Panics if the counter is already zero: every decrease must pair with
    /// an earlier increase.
    pub(crate) fn decrease_visibility(&mut self) -> bool {
        assert!(self.visibility > 0, "visibility underflow at cell {}", self.index);
        self.visibility -= 1;
        self.visibility == 0
    }

    pub(crate) fn reset_visibility(&mut self) -> bool {
        let was_visible = self.visibility > 0;
        self.visibility = 0;
        was_visible
    }
}
