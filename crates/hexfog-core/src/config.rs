//! Map construction parameters.

use crate::error::GridError;

/// Border value that leaves every cell explorable.
pub const NO_BORDER: i32 = -1;

/// Parameters for building a [`HexGrid`](crate::HexGrid).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapConfig {
    /// Cells per row.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
    /// A cell at offset `(ox, oz)` is explorable only when
    /// `border < ox < width - border` and `border < oz < height - border`.
    /// With 0 the first row and column are excluded; use [`NO_BORDER`] to
    /// keep every cell.
    pub border: i32,
    /// Chunk width the renderer groups cells by.
    pub chunk_size_x: i32,
    /// Chunk height the renderer groups cells by.
    pub chunk_size_z: i32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 15,
            border: NO_BORDER,
            chunk_size_x: 5,
            chunk_size_z: 5,
        }
    }
}

impl MapConfig {
    /// A config with the given size and default border and chunking.
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check the size against the chunk granularity.
    ///
    /// The grid itself only rejects non-positive sizes; chunk alignment is a
    /// constraint of whoever renders the map, so callers run this first.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GridError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.chunk_size_x <= 0
            || self.chunk_size_z <= 0
            || self.width % self.chunk_size_x != 0
            || self.height % self.chunk_size_z != 0
        {
            log::warn!(
                "unsupported map size {}x{} for {}x{} chunks",
                self.width,
                self.height,
                self.chunk_size_x,
                self.chunk_size_z
            );
            return Err(GridError::UnsupportedSize {
                width: self.width,
                height: self.height,
                chunk_x: self.chunk_size_x,
                chunk_z: self.chunk_size_z,
            });
        }
        Ok(())
    }

    /// Number of chunks along each axis. Only meaningful after
    /// [`validate`](Self::validate) succeeded.
    pub fn chunk_counts(&self) -> (i32, i32) {
        (
            self.width / self.chunk_size_x.max(1),
            self.height / self.chunk_size_z.max(1),
        )
    }
}
