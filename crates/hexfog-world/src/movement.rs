//! Movement rules for units.

use hexfog_core::{EdgeType, HexCell, HexDirection};
use hexfog_paths::{IMPASSABLE, MovePolicy};

/// Cost of crossing a flat edge.
pub const FLAT_COST: i32 = 5;

/// Cost of crossing a slope.
pub const SLOPE_COST: i32 = 10;

/// Movement policy of a regular land unit.
///
/// A unit may enter explored dry cells that no other unit occupies. Flat
/// edges cost [`FLAT_COST`], slopes [`SLOPE_COST`], cliffs are impassable.
/// The search estimate is the plain hex distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitMover {
    pub speed: i32,
}

impl UnitMover {
    pub fn new(speed: i32) -> Self {
        Self { speed }
    }
}

impl MovePolicy for UnitMover {
    fn speed(&self) -> i32 {
        self.speed
    }

    fn is_valid_destination(&self, cell: &HexCell) -> bool {
        cell.is_explored() && !cell.is_underwater() && cell.unit().is_none()
    }

    fn move_cost(&self, from: &HexCell, to: &HexCell, _direction: HexDirection) -> i32 {
        match from.edge_type(to) {
            EdgeType::Cliff => IMPASSABLE,
            EdgeType::Flat => FLAT_COST,
            EdgeType::Slope => SLOPE_COST,
        }
    }
}
