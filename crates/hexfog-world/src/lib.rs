//! Game layer on a hex grid: units, items, movement rules and fog of war.
//!
//! [`World`] owns a [`HexGrid`](hexfog_core::HexGrid) together with one
//! [`HexSearch`](hexfog_paths::HexSearch) arena and keeps cell occupancy and
//! visibility counters in step with every unit move.

pub mod error;
pub mod movement;
pub mod terrain;
pub mod unit;
pub mod world;

pub use error::WorldError;
pub use movement::{FLAT_COST, SLOPE_COST, UnitMover};
pub use terrain::TerrainGen;
pub use unit::{DEFAULT_SPEED, DEFAULT_VISION_RANGE, Item, ItemKind, Unit, UnitConfig};
pub use world::{CurrentPath, World};
