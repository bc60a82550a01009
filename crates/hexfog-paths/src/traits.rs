use hexfog_core::{HexCell, HexCoordinates, HexDirection};

/// Cost returned by [`MovePolicy::move_cost`] for an edge that cannot be
/// crossed. Any negative cost is treated the same way.
pub const IMPASSABLE: i32 = -1;

/// Mover-specific rules consumed by the pathfinder.
pub trait MovePolicy {
    /// Movement points available per turn. Must be > 0.
    fn speed(&self) -> i32;

    /// Whether a mover may enter `cell` at all.
    fn is_valid_destination(&self, cell: &HexCell) -> bool;

    /// Cost of stepping from `from` into adjacent `to` through `direction`.
    /// A negative value marks the edge as impassable.
    fn move_cost(&self, from: &HexCell, to: &HexCell, direction: HexDirection) -> i32;

    /// Lower bound on the remaining cost from `from` to `to`.
    /// Must never overestimate (admissible).
    fn estimate(&self, from: HexCoordinates, to: HexCoordinates) -> i32 {
        from.distance_to(to)
    }
}

/// A [`MovePolicy`] assembled from a speed and two closures.
pub struct FnPolicy<V, C> {
    speed: i32,
    valid: V,
    cost: C,
}

impl<V, C> FnPolicy<V, C>
where
    V: Fn(&HexCell) -> bool,
    C: Fn(&HexCell, &HexCell, HexDirection) -> i32,
{
    pub fn new(speed: i32, valid: V, cost: C) -> Self {
        Self { speed, valid, cost }
    }
}

impl<V, C> MovePolicy for FnPolicy<V, C>
where
    V: Fn(&HexCell) -> bool,
    C: Fn(&HexCell, &HexCell, HexDirection) -> i32,
{
    fn speed(&self) -> i32 {
        self.speed
    }

    fn is_valid_destination(&self, cell: &HexCell) -> bool {
        (self.valid)(cell)
    }

    fn move_cost(&self, from: &HexCell, to: &HexCell, direction: HexDirection) -> i32 {
        (self.cost)(from, to, direction)
    }
}
