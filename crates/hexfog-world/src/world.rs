//! Game state on a hex grid: units, items, fog of war and the current path.

use hexfog_core::{HexGrid, ItemId, MapConfig, UnitId};
use hexfog_paths::{HexPath, HexSearch, RangeNode};

use crate::error::WorldError;
use crate::movement::UnitMover;
use crate::unit::{Item, ItemKind, Unit, UnitConfig};

/// The path most recently requested through [`World::find_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentPath {
    pub unit: UnitId,
    pub from: usize,
    pub to: usize,
    /// `None` when the search found no route.
    pub path: Option<HexPath>,
}

/// A hex map with units, items and per-cell visibility counters.
///
/// Visibility changes only through [`increase_visibility`] and
/// [`decrease_visibility`]. Every unit move calls them in that order for
/// the old and new location: decrement first, then increment.
///
/// [`increase_visibility`]: World::increase_visibility
/// [`decrease_visibility`]: World::decrease_visibility
pub struct World {
    grid: HexGrid,
    search: HexSearch,
    units: Vec<Option<Unit>>,
    items: Vec<Option<Item>>,
    unit_config: UnitConfig,
    current: Option<CurrentPath>,
    changed: Vec<usize>,
}

impl World {
    /// Wrap an existing grid.
    pub fn new(grid: HexGrid) -> Self {
        Self::build(grid, UnitConfig::default())
    }

    /// Wrap an existing grid; new units take their stats from `unit_config`.
    ///
    /// Fails with [`WorldError::InvalidSpeed`] unless the speed is positive.
    pub fn with_config(grid: HexGrid, unit_config: UnitConfig) -> Result<Self, WorldError> {
        if unit_config.speed <= 0 {
            log::warn!("rejected unit speed {}", unit_config.speed);
            return Err(WorldError::InvalidSpeed(unit_config.speed));
        }
        Ok(Self::build(grid, unit_config))
    }

    fn build(grid: HexGrid, unit_config: UnitConfig) -> Self {
        let search = HexSearch::for_grid(&grid);
        Self {
            grid,
            search,
            units: Vec::new(),
            items: Vec::new(),
            unit_config,
            current: None,
            changed: Vec::new(),
        }
    }

    /// Build a fresh map, checking the chunk alignment first.
    pub fn create_map(cfg: &MapConfig) -> Result<Self, WorldError> {
        cfg.validate()?;
        let grid = HexGrid::from_config(cfg)?;
        Ok(Self::new(grid))
    }

    #[inline]
    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    /// Mutable grid access for terrain edits.
    ///
    /// Changing elevation under a seeing unit does not refresh its
    /// contribution; call [`reset_visibility`](Self::reset_visibility) after
    /// bulk edits.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut HexGrid {
        &mut self.grid
    }

    #[inline]
    pub fn unit_config(&self) -> UnitConfig {
        self.unit_config
    }

    fn check_cell(&self, cell: usize) -> Result<(), WorldError> {
        if cell < self.grid.len() {
            Ok(())
        } else {
            Err(WorldError::OutOfBounds(cell))
        }
    }

    // -----------------------------------------------------------------------
    // Visibility
    // -----------------------------------------------------------------------

    /// Cells visible from `cell` with sight `range`, without touching the
    /// counters.
    pub fn visible_from(&mut self, cell: usize, range: i32) -> &[usize] {
        self.search.visible_cells(&self.grid, cell, range)
    }

    /// Add one viewer at `cell` to every cell it can see.
    ///
    /// Returns the cells that just came out of the fog.
    pub fn increase_visibility(&mut self, cell: usize, range: i32) -> &[usize] {
        self.changed.clear();
        let cells = self.search.visible_cells(&self.grid, cell, range);
        for &c in cells {
            if self.grid.increase_visibility(c) {
                self.changed.push(c);
            }
        }
        &self.changed
    }

    /// Remove one viewer at `cell` from every cell it can see.
    ///
    /// Returns the cells that just went back into the fog. Panics if one of
    /// those cells has no viewer left, i.e. the call has no matching
    /// [`increase_visibility`](Self::increase_visibility).
    pub fn decrease_visibility(&mut self, cell: usize, range: i32) -> &[usize] {
        self.changed.clear();
        let cells = self.search.visible_cells(&self.grid, cell, range);
        for &c in cells {
            if self.grid.decrease_visibility(c) {
                self.changed.push(c);
            }
        }
        &self.changed
    }

    /// Zero every counter, then re-add the sight of all owned units.
    pub fn reset_visibility(&mut self) {
        self.grid.reset_visibility();
        let viewers: Vec<(usize, i32)> = self
            .units()
            .filter(|u| u.owned)
            .map(|u| (u.location, u.vision_range))
            .collect();
        for (location, range) in viewers {
            self.increase_visibility(location, range);
        }
    }

    // -----------------------------------------------------------------------
    // Units
    // -----------------------------------------------------------------------

    /// Place a new unit. Owned units immediately reveal their surroundings.
    pub fn add_unit(&mut self, location: usize, owned: bool) -> Result<UnitId, WorldError> {
        self.check_cell(location)?;
        if let Some(other) = self.grid.cell(location).unit() {
            return Err(WorldError::Occupied {
                cell: location,
                unit: other,
            });
        }
        let id = self.units.len();
        let unit = Unit::new(id, location, owned, &self.unit_config);
        self.grid.set_unit(location, Some(id));
        if owned {
            self.increase_visibility(location, unit.vision_range);
        }
        log::debug!("unit {id} added at cell {location} (owned: {owned})");
        self.units.push(Some(unit));
        Ok(id)
    }

    /// Take a unit off the map, withdrawing its sight.
    pub fn remove_unit(&mut self, id: UnitId) -> Result<Unit, WorldError> {
        let unit = self
            .units
            .get_mut(id)
            .and_then(Option::take)
            .ok_or(WorldError::UnknownUnit(id))?;
        if unit.owned {
            self.decrease_visibility(unit.location, unit.vision_range);
        }
        self.grid.set_unit(unit.location, None);
        if self.current.as_ref().is_some_and(|c| c.unit == id) {
            self.current = None;
        }
        log::debug!("unit {id} removed from cell {}", unit.location);
        Ok(unit)
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id).and_then(Option::as_ref)
    }

    /// All units on the map, in id order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter().flatten()
    }

    fn unit_or_err(&self, id: UnitId) -> Result<&Unit, WorldError> {
        self.unit(id).ok_or(WorldError::UnknownUnit(id))
    }

    /// Move a unit to `to` in one step.
    ///
    /// Sight is withdrawn from the old cell before it is added at the new
    /// one.
    pub fn relocate_unit(&mut self, id: UnitId, to: usize) -> Result<(), WorldError> {
        self.check_cell(to)?;
        let unit = self.unit_or_err(id)?.clone();
        if unit.location == to {
            return Ok(());
        }
        if let Some(other) = self.grid.cell(to).unit() {
            return Err(WorldError::Occupied { cell: to, unit: other });
        }
        if unit.owned {
            self.decrease_visibility(unit.location, unit.vision_range);
        }
        self.grid.set_unit(unit.location, None);
        self.grid.set_unit(to, Some(id));
        self.set_location(id, to);
        if unit.owned {
            self.increase_visibility(to, unit.vision_range);
        }
        log::debug!("unit {id} relocated {} -> {to}", unit.location);
        Ok(())
    }

    /// Exchange the cells of two units.
    pub fn swap_units(&mut self, a: UnitId, b: UnitId) -> Result<(), WorldError> {
        let ua = self.unit_or_err(a)?.clone();
        let ub = self.unit_or_err(b)?.clone();
        if a == b {
            return Ok(());
        }
        for u in [&ua, &ub] {
            if u.owned {
                self.decrease_visibility(u.location, u.vision_range);
            }
        }
        self.grid.set_unit(ua.location, Some(b));
        self.grid.set_unit(ub.location, Some(a));
        self.set_location(a, ub.location);
        self.set_location(b, ua.location);
        if ua.owned {
            self.increase_visibility(ub.location, ua.vision_range);
        }
        if ub.owned {
            self.increase_visibility(ua.location, ub.vision_range);
        }
        log::debug!("units {a} and {b} swapped");
        Ok(())
    }

    fn set_location(&mut self, id: UnitId, cell: usize) {
        if let Some(Some(u)) = self.units.get_mut(id) {
            u.location = cell;
        }
    }

    // -----------------------------------------------------------------------
    // Paths and travel
    // -----------------------------------------------------------------------

    /// Search a route for `unit` to `to` and remember it as the current
    /// path.
    ///
    /// With `limit_search` only destinations reachable this turn succeed.
    /// Returns the path, or `None` when there is none (including `to` being
    /// the unit's own cell).
    pub fn find_path(
        &mut self,
        unit: UnitId,
        to: usize,
        limit_search: bool,
    ) -> Result<Option<&HexPath>, WorldError> {
        self.check_cell(to)?;
        let u = self.unit_or_err(unit)?;
        let (from, mover) = (u.location, UnitMover::new(u.speed));
        let path = self
            .search
            .find_path(&self.grid, from, to, &mover, limit_search);
        match &path {
            Some(p) => log::debug!(
                "path for unit {unit}: {from} -> {to}, {} cells, {} turns",
                p.len(),
                p.turns(mover.speed)
            ),
            None => log::debug!("no path for unit {unit}: {from} -> {to}"),
        }
        self.current = Some(CurrentPath {
            unit,
            from,
            to,
            path,
        });
        Ok(self.current.as_ref().and_then(|c| c.path.as_ref()))
    }

    /// The last requested path, if any was requested since the last clear.
    pub fn current_path(&self) -> Option<&CurrentPath> {
        self.current.as_ref()
    }

    /// Whether the last search found a route.
    pub fn has_path(&self) -> bool {
        self.current.as_ref().is_some_and(|c| c.path.is_some())
    }

    pub fn clear_path(&mut self) {
        self.current = None;
    }

    /// Cells `unit` can reach this turn, with their costs.
    pub fn movement_range(&mut self, unit: UnitId) -> Result<&[RangeNode], WorldError> {
        let u = self.unit_or_err(unit)?;
        let (from, mover) = (u.location, UnitMover::new(u.speed));
        Ok(self.search.movement_range(&self.grid, from, &mover))
    }

    /// Walk `unit` along the current path.
    ///
    /// The unit passes through every cell on the route: each one is briefly
    /// seen from, so the fog lifts (and cells become explored) along the way
    /// before the unit's sight settles at the destination. The current path
    /// is consumed. Returns the destination cell.
    pub fn travel(&mut self, unit: UnitId) -> Result<usize, WorldError> {
        let u = self.unit_or_err(unit)?.clone();
        let path = match &self.current {
            Some(CurrentPath {
                unit: owner,
                path: Some(p),
                ..
            }) if *owner == unit && p.origin() == u.location => p.clone(),
            _ => return Err(WorldError::NoPath),
        };
        let to = path.destination();
        let cells = path.cells();
        if let Some((cell, other)) = cells[1..]
            .iter()
            .find_map(|&c| self.grid.cell(c).unit().map(|other| (c, other)))
        {
            return Err(WorldError::Occupied { cell, unit: other });
        }
        self.current = None;

        self.grid.set_unit(u.location, None);
        self.grid.set_unit(to, Some(unit));
        self.set_location(unit, to);

        if u.owned {
            self.decrease_visibility(cells[0], u.vision_range);
            for &c in &cells[1..cells.len() - 1] {
                self.increase_visibility(c, u.vision_range);
                self.decrease_visibility(c, u.vision_range);
            }
            self.increase_visibility(to, u.vision_range);
        }
        log::debug!(
            "unit {unit} travelled {} -> {to} over {} cells",
            u.location,
            path.len()
        );
        Ok(to)
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Drop an item on `location`, replacing nothing: a cell holds at most
    /// one item and a second one is rejected.
    pub fn add_item(&mut self, kind: ItemKind, location: usize) -> Result<Option<ItemId>, WorldError> {
        self.check_cell(location)?;
        if self.grid.cell(location).item().is_some() {
            return Ok(None);
        }
        let id = self.items.len();
        self.grid.set_item(location, Some(id));
        self.items.push(Some(Item { id, kind, location }));
        if kind == ItemKind::Treasure {
            log::debug!(
                "treasure at {}",
                self.grid.cell(location).coordinates()
            );
        }
        Ok(Some(id))
    }

    /// Remove the item lying on `cell`, if any.
    pub fn remove_item(&mut self, cell: usize) -> Result<Option<Item>, WorldError> {
        self.check_cell(cell)?;
        let Some(id) = self.grid.cell(cell).item() else {
            return Ok(None);
        };
        self.grid.set_item(cell, None);
        Ok(self.items.get_mut(id).and_then(Option::take))
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id).and_then(Option::as_ref)
    }

    /// All items on the map, in id order.
    pub fn items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::terrain::TerrainGen;

    fn explored_world(width: i32, height: i32) -> World {
        let mut grid = HexGrid::new(width, height).unwrap();
        grid.explore_all();
        World::new(grid)
    }

    /// Recompute every counter from scratch and compare.
    fn assert_counters_consistent(world: &mut World) {
        let mut expected = vec![0u32; world.grid().len()];
        let viewers: Vec<(usize, i32)> = world
            .units()
            .filter(|u| u.owned)
            .map(|u| (u.location, u.vision_range))
            .collect();
        for (loc, range) in viewers {
            for &c in world.visible_from(loc, range) {
                expected[c] += 1;
            }
        }
        for (i, e) in expected.iter().enumerate() {
            assert_eq!(world.grid().cell(i).visibility(), *e, "cell {i}");
        }
    }

    #[test]
    fn create_map_checks_chunks() {
        assert!(World::create_map(&MapConfig::default()).is_ok());
        let err = World::create_map(&MapConfig::with_size(7, 15)).err();
        assert!(matches!(err, Some(WorldError::Grid(_))));
    }

    #[test]
    fn adding_owned_unit_reveals_cells() {
        let grid = HexGrid::new(12, 12).unwrap();
        let mut world = World::new(grid);
        let at = world.grid().offset_index(6, 6).unwrap();
        let id = world.add_unit(at, true).unwrap();
        assert_eq!(world.unit(id).map(|u| u.location), Some(at));
        assert_eq!(world.grid().cell(at).unit(), Some(id));
        assert!(world.grid().cell(at).is_visible());
        assert!(world.grid().cell(at).is_explored());
        let revealed = world.grid().iter().filter(|c| c.is_visible()).count();
        // Flat map, sight 3: a radius-three disc.
        assert_eq!(revealed, 37);
    }

    #[test]
    fn foreign_units_do_not_reveal() {
        let mut world = World::new(HexGrid::new(8, 8).unwrap());
        world.add_unit(20, false).unwrap();
        assert!(world.grid().iter().all(|c| !c.is_visible()));
    }

    #[test]
    fn occupied_cell_rejected() {
        let mut world = explored_world(5, 5);
        let a = world.add_unit(3, true).unwrap();
        assert_eq!(
            world.add_unit(3, true),
            Err(WorldError::Occupied { cell: 3, unit: a })
        );
        assert_eq!(world.add_unit(99, true), Err(WorldError::OutOfBounds(99)));
    }

    #[test]
    fn relocation_moves_sight() {
        let mut world = World::new(HexGrid::new(20, 5).unwrap());
        let start = world.grid().offset_index(2, 2).unwrap();
        let end = world.grid().offset_index(16, 2).unwrap();
        let id = world.add_unit(start, true).unwrap();
        world.relocate_unit(id, end).unwrap();
        assert!(!world.grid().cell(start).is_visible());
        assert!(world.grid().cell(start).is_explored());
        assert!(world.grid().cell(end).is_visible());
        assert_eq!(world.grid().cell(start).unit(), None);
        assert_eq!(world.grid().cell(end).unit(), Some(id));
        assert_counters_consistent(&mut world);
    }

    #[test]
    fn paired_updates_return_deltas() {
        let mut world = World::new(HexGrid::new(10, 10).unwrap());
        let a = world.grid().offset_index(3, 3).unwrap();
        let mut lit = world.increase_visibility(a, 2).to_vec();
        assert!(lit.contains(&a));
        // A second viewer on the same cell changes no fog state.
        assert!(world.increase_visibility(a, 2).is_empty());
        assert!(world.decrease_visibility(a, 2).is_empty());
        let mut dark = world.decrease_visibility(a, 2).to_vec();
        lit.sort_unstable();
        dark.sort_unstable();
        assert_eq!(lit, dark);
        assert!(world.grid().iter().all(|c| c.visibility() == 0));
    }

    #[test]
    fn swap_exchanges_locations() {
        let mut world = explored_world(10, 10);
        let a = world.add_unit(11, true).unwrap();
        let b = world.add_unit(77, false).unwrap();
        world.swap_units(a, b).unwrap();
        assert_eq!(world.unit(a).map(|u| u.location), Some(77));
        assert_eq!(world.unit(b).map(|u| u.location), Some(11));
        assert_eq!(world.grid().cell(77).unit(), Some(a));
        assert_eq!(world.grid().cell(11).unit(), Some(b));
        assert_counters_consistent(&mut world);
    }

    #[test]
    fn remove_unit_withdraws_sight() {
        let mut world = explored_world(8, 8);
        let id = world.add_unit(27, true).unwrap();
        let removed = world.remove_unit(id).unwrap();
        assert_eq!(removed.location, 27);
        assert!(world.grid().iter().all(|c| c.visibility() == 0));
        assert_eq!(world.grid().cell(27).unit(), None);
        assert_eq!(world.remove_unit(id), Err(WorldError::UnknownUnit(id)));
    }

    #[test]
    fn find_path_and_travel() {
        let mut world = explored_world(20, 15);
        let from = world.grid().offset_index(0, 0).unwrap();
        let to = world.grid().offset_index(5, 5).unwrap();
        let id = world.add_unit(from, true).unwrap();

        let path = world.find_path(id, to, false).unwrap().cloned().unwrap();
        assert_eq!(path.cost(), 8 * 5);
        assert_eq!(path.turns(24), 2);
        assert!(world.has_path());

        assert_eq!(world.travel(id).unwrap(), to);
        assert!(!world.has_path());
        assert_eq!(world.unit(id).map(|u| u.location), Some(to));
        assert_eq!(world.grid().cell(from).unit(), None);
        assert!(path.cells().iter().all(|&c| world.grid().cell(c).is_explored()));
        assert_counters_consistent(&mut world);
        assert_eq!(world.travel(id), Err(WorldError::NoPath));
    }

    #[test]
    fn travel_stops_at_unit_on_route() {
        let mut world = explored_world(6, 1);
        let id = world.add_unit(0, true).unwrap();
        assert!(world.find_path(id, 5, false).unwrap().is_some());
        let blocker = world.add_unit(3, false).unwrap();
        assert_eq!(
            world.travel(id),
            Err(WorldError::Occupied {
                cell: 3,
                unit: blocker
            })
        );
        assert_eq!(world.unit(id).map(|u| u.location), Some(0));
        assert_eq!(world.grid().cell(0).unit(), Some(id));
        assert_eq!(world.grid().cell(5).unit(), None);
        assert!(world.has_path());
        assert_counters_consistent(&mut world);
    }

    #[test]
    fn zero_speed_config_rejected() {
        let grid = HexGrid::new(4, 4).unwrap();
        let cfg = UnitConfig {
            speed: 0,
            ..UnitConfig::default()
        };
        assert_eq!(
            World::with_config(grid.clone(), cfg).err(),
            Some(WorldError::InvalidSpeed(0))
        );
        let cfg = UnitConfig {
            speed: 12,
            ..UnitConfig::default()
        };
        let world = World::with_config(grid, cfg).unwrap();
        assert_eq!(world.unit_config().speed, 12);
    }

    #[test]
    #[should_panic(expected = "visibility underflow")]
    fn unpaired_decrease_panics() {
        let mut world = explored_world(5, 5);
        world.decrease_visibility(12, 2);
    }

    #[test]
    fn path_to_own_cell_is_none() {
        let mut world = explored_world(5, 5);
        let id = world.add_unit(6, true).unwrap();
        assert!(world.find_path(id, 6, false).unwrap().is_none());
        assert!(!world.has_path());
        assert_eq!(world.current_path().map(|c| c.to), Some(6));
        world.clear_path();
        assert!(world.current_path().is_none());
    }

    #[test]
    fn units_block_paths() {
        let mut world = explored_world(5, 1);
        let id = world.add_unit(0, true).unwrap();
        world.add_unit(2, false).unwrap();
        assert!(world.find_path(id, 4, false).unwrap().is_none());
    }

    #[test]
    fn unexplored_cells_block_paths() {
        let mut world = World::new(HexGrid::new(12, 1).unwrap());
        let id = world.add_unit(0, true).unwrap();
        // Sight 3 explores cells 0..=3 on a single row.
        assert!(world.find_path(id, 3, false).unwrap().is_some());
        assert!(world.find_path(id, 6, false).unwrap().is_none());
    }

    #[test]
    fn movement_range_for_unit() {
        let mut world = explored_world(11, 11);
        let at = world.grid().offset_index(5, 5).unwrap();
        let id = world.add_unit(at, true).unwrap();
        let reach = world.movement_range(id).unwrap();
        // Speed 24 covers four flat steps.
        assert!(reach.iter().all(|n| n.distance <= 24));
        assert_eq!(reach.len(), 1 + 6 + 12 + 18 + 24);
    }

    #[test]
    fn reset_visibility_rebuilds_counters() {
        let mut world = explored_world(10, 10);
        world.add_unit(33, true).unwrap();
        world.add_unit(36, true).unwrap();
        world.grid_mut().set_elevation(35, 2);
        world.reset_visibility();
        assert_counters_consistent(&mut world);
    }

    #[test]
    fn items_occupy_cells() {
        let mut world = explored_world(5, 5);
        let id = world.add_item(ItemKind::Treasure, 4).unwrap().unwrap();
        assert_eq!(world.add_item(ItemKind::Coin, 4).unwrap(), None);
        assert_eq!(world.grid().cell(4).item(), Some(id));
        assert_eq!(world.items().count(), 1);
        let item = world.remove_item(4).unwrap().unwrap();
        assert_eq!(item.kind, ItemKind::Treasure);
        assert_eq!(world.grid().cell(4).item(), None);
        assert_eq!(world.remove_item(4).unwrap(), None);
        assert!(world.item(id).is_none());
    }

    #[test]
    fn random_moves_keep_counters_consistent() {
        let mut grid = HexGrid::new(15, 15).unwrap();
        let mut tg = TerrainGen::with_rng(StdRng::seed_from_u64(11));
        tg.elevations(&mut grid, 3, 2);
        let mut world = World::new(grid);
        let ids: Vec<UnitId> = [16, 112, 200]
            .into_iter()
            .map(|c| world.add_unit(c, true).unwrap())
            .collect();
        for step in 0..60usize {
            let id = ids[step % ids.len()];
            let target = (step * 37 + 5) % world.grid().len();
            match world.relocate_unit(id, target) {
                Ok(()) | Err(WorldError::Occupied { .. }) => {}
                Err(e) => panic!("{e}"),
            }
        }
        assert_counters_consistent(&mut world);
    }
}
