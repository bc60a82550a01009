//! Random terrain for test and demo maps.
//!
//! Elevations start as uniform noise and are then smoothed by averaging each
//! cell with its hex neighbors, which produces hills with mostly gentle
//! slopes and the occasional cliff.

use hexfog_core::HexGrid;
use rand::Rng;

/// Terrain generator over any [`Rng`].
pub struct TerrainGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> TerrainGen<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Fill `grid` with elevations in `0..=max_elevation`, then apply
    /// `passes` rounds of neighbor smoothing.
    ///
    /// Returns the highest elevation left on the map.
    pub fn elevations(&mut self, grid: &mut HexGrid, max_elevation: i32, passes: usize) -> i32 {
        let max_elevation = max_elevation.max(0);
        for i in 0..grid.len() {
            let e = self.rng.random_range(0..=max_elevation);
            grid.set_elevation(i, e);
        }

        let mut scratch = vec![0; grid.len()];
        for _ in 0..passes {
            for (i, slot) in scratch.iter_mut().enumerate() {
                let mut sum = grid.cell(i).elevation();
                let mut n = 1;
                for (_, j) in grid.neighbors(i) {
                    sum += grid.cell(j).elevation();
                    n += 1;
                }
                // Round to nearest.
                *slot = (2 * sum + n) / (2 * n);
            }
            for (i, &e) in scratch.iter().enumerate() {
                grid.set_elevation(i, e);
            }
        }

        let top = grid.iter().map(|c| c.elevation()).max().unwrap_or(0);
        log::debug!(
            "terrain: {}x{} elevations, {passes} smoothing passes, top {top}",
            grid.width(),
            grid.height()
        );
        top
    }

    /// Set the water level of every cell to `level`.
    ///
    /// Returns the number of cells left underwater.
    pub fn flood(&mut self, grid: &mut HexGrid, level: i32) -> usize {
        for i in 0..grid.len() {
            grid.set_water_level(i, level);
        }
        grid.iter().filter(|c| c.is_underwater()).count()
    }

    /// A uniformly chosen cell that is dry and holds no unit or item.
    pub fn free_cell(&mut self, grid: &HexGrid) -> Option<usize> {
        let free: Vec<usize> = grid
            .iter()
            .filter(|c| !c.is_underwater() && c.unit().is_none() && c.item().is_none())
            .map(|c| c.index())
            .collect();
        if free.is_empty() {
            return None;
        }
        Some(free[self.rng.random_range(0..free.len())])
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn elevations_stay_in_bounds() {
        let mut grid = HexGrid::new(20, 15).unwrap();
        let mut tg = TerrainGen::with_rng(StdRng::seed_from_u64(3));
        let top = tg.elevations(&mut grid, 4, 3);
        assert!((0..=4).contains(&top));
        assert!(grid.iter().all(|c| (0..=4).contains(&c.elevation())));
    }

    #[test]
    fn smoothing_flattens() {
        let bumpiness = |g: &HexGrid| -> i32 {
            (0..g.len())
                .flat_map(|i| g.neighbors(i).map(move |(_, j)| (i, j)))
                .map(|(i, j)| (g.cell(i).elevation() - g.cell(j).elevation()).abs())
                .sum()
        };
        let mut rough = HexGrid::new(15, 15).unwrap();
        let mut smooth = HexGrid::new(15, 15).unwrap();
        TerrainGen::with_rng(StdRng::seed_from_u64(9)).elevations(&mut rough, 6, 0);
        TerrainGen::with_rng(StdRng::seed_from_u64(9)).elevations(&mut smooth, 6, 2);
        assert!(bumpiness(&smooth) < bumpiness(&rough));
    }

    #[test]
    fn same_seed_same_map() {
        let mut a = HexGrid::new(10, 10).unwrap();
        let mut b = HexGrid::new(10, 10).unwrap();
        TerrainGen::with_rng(StdRng::seed_from_u64(42)).elevations(&mut a, 5, 1);
        TerrainGen::with_rng(StdRng::seed_from_u64(42)).elevations(&mut b, 5, 1);
        assert!(a.iter().zip(b.iter()).all(|(x, y)| x.elevation() == y.elevation()));
    }

    #[test]
    fn flood_and_free_cells() {
        let mut grid = HexGrid::new(5, 5).unwrap();
        let mut tg = TerrainGen::with_rng(StdRng::seed_from_u64(1));
        assert_eq!(tg.flood(&mut grid, 1), 25);
        assert_eq!(tg.free_cell(&grid), None);
        grid.set_elevation(7, 2);
        assert_eq!(tg.free_cell(&grid), Some(7));
        assert_eq!(tg.flood(&mut grid, 0), 0);
    }
}
