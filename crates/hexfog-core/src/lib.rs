//! Hex grid core types.
//!
//! This crate provides the data the search and game layers share: axial
//! coordinates and directions, terrain edge classification, cells, and the
//! fixed-topology cell graph. It holds no search state.

pub mod cell;
pub mod config;
pub mod coords;
pub mod error;
pub mod grid;

pub use cell::{EdgeType, HexCell, ItemId, UnitId};
pub use config::{MapConfig, NO_BORDER};
pub use coords::{HexCoordinates, HexDirection, hex_distance};
pub use error::GridError;
pub use grid::HexGrid;
