use std::fmt;

/// Errors raised while building or configuring a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A dimension was zero or negative.
    InvalidSize { width: i32, height: i32 },
    /// The dimensions are not a multiple of the chunk size.
    UnsupportedSize {
        width: i32,
        height: i32,
        chunk_x: i32,
        chunk_z: i32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "grid: invalid size {width}x{height}")
            }
            Self::UnsupportedSize {
                width,
                height,
                chunk_x,
                chunk_z,
            } => write!(
                f,
                "grid: unsupported map size {width}x{height} (chunks are {chunk_x}x{chunk_z})"
            ),
        }
    }
}

impl std::error::Error for GridError {}
