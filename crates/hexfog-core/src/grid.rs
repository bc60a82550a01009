//! The [`HexGrid`] type: a fixed-shape graph of [`HexCell`]s.
//!
//! Cells are stored row-major in offset layout (`index = ox + oz * width`).
//! Neighbor links are wired once at construction and are always symmetric.

use crate::cell::{HexCell, ItemId, UnitId};
use crate::config::{MapConfig, NO_BORDER};
use crate::coords::{HexCoordinates, HexDirection};
use crate::error::GridError;

/// A hex grid of cells with immutable topology and mutable content.
#[derive(Debug, Clone)]
pub struct HexGrid {
    cells: Vec<HexCell>,
    width: i32,
    height: i32,
}

impl HexGrid {
    /// Build a `width` x `height` grid where every cell is explorable.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        Self::from_config(&MapConfig {
            width,
            height,
            border: NO_BORDER,
            ..MapConfig::default()
        })
    }

    /// Build a grid from a [`MapConfig`].
    ///
    /// Only non-positive sizes are rejected here; see
    /// [`MapConfig::validate`] for the chunk alignment check.
    pub fn from_config(cfg: &MapConfig) -> Result<Self, GridError> {
        let (width, height) = (cfg.width, cfg.height);
        if width <= 0 || height <= 0 {
            log::warn!("rejected grid size {width}x{height}");
            return Err(GridError::InvalidSize { width, height });
        }
        let mut grid = Self {
            cells: Vec::with_capacity((width * height) as usize),
            width,
            height,
        };
        let border = cfg.border;
        for oz in 0..height {
            for ox in 0..width {
                let explorable =
                    ox > border && oz > border && ox < width - border && oz < height - border;
                grid.create_cell(ox, oz, explorable);
            }
        }
        log::debug!("built {width}x{height} hex grid (border {border})");
        Ok(grid)
    }

    fn create_cell(&mut self, ox: i32, oz: i32, explorable: bool) {
        let i = self.cells.len();
        let w = self.width as usize;
        self.cells.push(HexCell::new(
            i,
            HexCoordinates::from_offset(ox, oz),
            explorable,
        ));

        if ox > 0 {
            self.link(i, HexDirection::W, i - 1);
        }
        if oz > 0 {
            if oz & 1 == 0 {
                self.link(i, HexDirection::SE, i - w);
                if ox > 0 {
                    self.link(i, HexDirection::SW, i - w - 1);
                }
            } else {
                self.link(i, HexDirection::SW, i - w);
                if ox < self.width - 1 {
                    self.link(i, HexDirection::SE, i - w + 1);
                }
            }
        }
    }

    /// Set a neighbor link together with its reverse.
    fn link(&mut self, a: usize, d: HexDirection, b: usize) {
        self.cells[a].set_neighbor_slot(d, b);
        self.cells[b].set_neighbor_slot(d.opposite(), a);
    }

    // -----------------------------------------------------------------------
    // Shape
    // -----------------------------------------------------------------------

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// The cell at index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    #[inline]
    pub fn cell(&self, i: usize) -> &HexCell {
        &self.cells[i]
    }

    /// The cell at index `i`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, i: usize) -> Option<&HexCell> {
        self.cells.get(i)
    }

    /// Index of the cell at offset `(ox, oz)`, or `None` outside the grid.
    pub fn offset_index(&self, ox: i32, oz: i32) -> Option<usize> {
        if ox < 0 || oz < 0 || ox >= self.width || oz >= self.height {
            return None;
        }
        Some((ox + oz * self.width) as usize)
    }

    /// The cell at offset `(ox, oz)`.
    ///
    /// # Panics
    ///
    /// Panics if the offset lies outside the grid.
    pub fn cell_at_offset(&self, ox: i32, oz: i32) -> &HexCell {
        match self.offset_index(ox, oz) {
            Some(i) => &self.cells[i],
            None => panic!(
                "offset ({ox}, {oz}) outside {}x{} grid",
                self.width, self.height
            ),
        }
    }

    /// Index of the cell at axial `coords`, or `None` outside the grid.
    pub fn index_of(&self, coords: HexCoordinates) -> Option<usize> {
        let (ox, oz) = coords.to_offset();
        self.offset_index(ox, oz)
    }

    /// The cell at axial `coords`, or `None` outside the grid.
    pub fn cell_at(&self, coords: HexCoordinates) -> Option<&HexCell> {
        self.index_of(coords).map(|i| &self.cells[i])
    }

    /// Index of the neighbor of `i` in direction `d`.
    #[inline]
    pub fn neighbor(&self, i: usize, d: HexDirection) -> Option<usize> {
        self.cells[i].neighbor(d)
    }

    /// Existing neighbors of `i` with their directions.
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = (HexDirection, usize)> + '_ {
        HexDirection::ALL
            .into_iter()
            .filter_map(move |d| self.cells[i].neighbor(d).map(|n| (d, n)))
    }

    /// Iterate over all cells in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, HexCell> {
        self.cells.iter()
    }

    /// Hex distance between two cells.
    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> i32 {
        self.cells[a]
            .coordinates()
            .distance_to(self.cells[b].coordinates())
    }

    // -----------------------------------------------------------------------
    // Content mutation
    // -----------------------------------------------------------------------

    pub fn set_elevation(&mut self, i: usize, elevation: i32) {
        self.cells[i].set_elevation(elevation);
    }

    pub fn set_water_level(&mut self, i: usize, level: i32) {
        self.cells[i].set_water_level(level);
    }

    pub fn set_explorable(&mut self, i: usize, explorable: bool) {
        self.cells[i].set_explorable(explorable);
    }

    pub fn set_explored(&mut self, i: usize, explored: bool) {
        self.cells[i].set_explored(explored);
    }

    /// Mark every cell explored. Useful for editors and tests.
    pub fn explore_all(&mut self) {
        for c in &mut self.cells {
            c.set_explored(true);
        }
    }

    pub fn set_unit(&mut self, i: usize, unit: Option<UnitId>) {
        self.cells[i].set_unit(unit);
    }

    pub fn set_item(&mut self, i: usize, item: Option<ItemId>) {
        self.cells[i].set_item(item);
    }

    /// Add one viewer to cell `i`. Returns `true` if it just became visible.
    pub fn increase_visibility(&mut self, i: usize) -> bool {
        self.cells[i].increase_visibility()
    }

    /// Remove one viewer from cell `i`. Returns `true` if it just went dark.
    ///
    /// Panics if cell `i` has no viewer left.
    pub fn decrease_visibility(&mut self, i: usize) -> bool {
        self.cells[i].decrease_visibility()
    }

    /// Drop all viewers from every cell. Explored flags are kept.
    pub fn reset_visibility(&mut self) {
        for c in &mut self.cells {
            c.reset_visibility();
        }
    }
}

impl<'a> IntoIterator for &'a HexGrid {
    type Item = &'a HexCell;
    type IntoIter = std::slice::Iter<'a, HexCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_size() {
        assert_eq!(
            HexGrid::new(0, 5).unwrap_err(),
            GridError::InvalidSize {
                width: 0,
                height: 5
            }
        );
        assert!(HexGrid::new(4, -1).is_err());
    }

    #[test]
    fn links_are_symmetric() {
        let g = HexGrid::new(7, 6).unwrap();
        for c in &g {
            for (d, n) in g.neighbors(c.index()) {
                assert_eq!(g.neighbor(n, d.opposite()), Some(c.index()));
            }
        }
    }

    #[test]
    fn links_match_coordinates() {
        let g = HexGrid::new(6, 5).unwrap();
        for c in &g {
            for d in HexDirection::ALL {
                let expected = g.index_of(c.coordinates().step(d));
                assert_eq!(c.neighbor(d), expected, "cell {} dir {d}", c.index());
            }
        }
    }

    #[test]
    fn interior_cell_has_six_neighbors() {
        let g = HexGrid::new(5, 5).unwrap();
        let i = g.offset_index(2, 2).unwrap();
        assert_eq!(g.neighbors(i).count(), 6);
        assert_eq!(g.neighbors(0).count(), 2);
    }

    #[test]
    fn border_policy() {
        let cfg = MapConfig {
            width: 10,
            height: 10,
            border: 2,
            ..MapConfig::default()
        };
        let g = HexGrid::from_config(&cfg).unwrap();
        assert!(!g.cell_at_offset(2, 5).is_explorable());
        assert!(g.cell_at_offset(3, 3).is_explorable());
        assert!(!g.cell_at_offset(8, 5).is_explorable());
        assert!(g.cell_at_offset(7, 7).is_explorable());
    }

    #[test]
    fn zero_border_excludes_first_row_and_column() {
        let cfg = MapConfig {
            width: 10,
            height: 10,
            border: 0,
            ..MapConfig::default()
        };
        let g = HexGrid::from_config(&cfg).unwrap();
        assert!(!g.cell_at_offset(0, 5).is_explorable());
        assert!(!g.cell_at_offset(5, 0).is_explorable());
        assert!(g.cell_at_offset(9, 9).is_explorable());
        assert!(g.cell_at_offset(1, 1).is_explorable());
        assert_eq!(g.iter().filter(|c| c.is_explorable()).count(), 81);
    }

    #[test]
    fn no_border_explores_everything() {
        assert!(HexGrid::new(6, 4).unwrap().iter().all(HexCell::is_explorable));
        let g = HexGrid::from_config(&MapConfig::default()).unwrap();
        assert!(g.iter().all(HexCell::is_explorable));
    }

    #[test]
    fn coordinate_lookup() {
        let g = HexGrid::new(20, 15).unwrap();
        let c = g.cell_at_offset(5, 5);
        assert_eq!(c.index(), 105);
        assert_eq!(g.cell_at(c.coordinates()).map(HexCell::index), Some(105));
        assert!(g.cell_at(HexCoordinates::new(-1, 0)).is_none());
        assert!(g.get(300).is_none());
    }

    #[test]
    #[should_panic(expected = "outside 3x3 grid")]
    fn out_of_bounds_offset_panics() {
        let g = HexGrid::new(3, 3).unwrap();
        g.cell_at_offset(3, 0);
    }
}
