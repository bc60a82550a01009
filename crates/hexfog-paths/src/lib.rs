//! Search algorithms over a [`HexGrid`](hexfog_core::HexGrid).
//!
//! - **Turn-quantized A\*** ([`HexSearch::find_path`])
//! - **Movement range** for the current turn ([`HexSearch::movement_range`])
//! - **Visibility fill** ([`HexSearch::visible_cells`])
//!
//! All three run through [`HexSearch`], which owns the per-cell scratch
//! nodes and one shared [`Frontier`]. Scratch data is invalidated by a phase
//! counter instead of being cleared, so repeated queries do not allocate.
//!
//! Searches take `&mut self`: a second search on the same arena cannot start
//! before the first has returned.

mod astar;
mod frontier;
mod range;
mod search;
mod traits;
mod visibility;

pub use frontier::Frontier;
pub use search::{HexPath, HexSearch, RangeNode, UNREACHABLE, turn_of};
pub use traits::{FnPolicy, IMPASSABLE, MovePolicy};
pub use visibility::ALWAYS_VISIBLE_DISTANCE;
