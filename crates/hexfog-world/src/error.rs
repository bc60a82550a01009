use std::fmt;

use hexfog_core::{GridError, UnitId};

/// Errors returned by [`World`](crate::World) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// Building the grid failed.
    Grid(GridError),
    /// A cell index outside the grid.
    OutOfBounds(usize),
    /// The cell already holds a unit.
    Occupied { cell: usize, unit: UnitId },
    /// No unit with this id is on the map.
    UnknownUnit(UnitId),
    /// Units need a positive speed.
    InvalidSpeed(i32),
    /// There is no current path, or it does not start at the unit.
    NoPath,
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "world: {e}"),
            Self::OutOfBounds(cell) => write!(f, "world: cell {cell} is outside the grid"),
            Self::Occupied { cell, unit } => {
                write!(f, "world: cell {cell} is occupied by unit {unit}")
            }
            Self::UnknownUnit(id) => write!(f, "world: unknown unit {id}"),
            Self::InvalidSpeed(speed) => write!(f, "world: unit speed must be positive, got {speed}"),
            Self::NoPath => write!(f, "world: no path to travel"),
        }
    }
}

impl std::error::Error for WorldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for WorldError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
