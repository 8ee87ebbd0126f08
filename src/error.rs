//! Error types for slicing, image handling and terminal output.

use std::fmt;

use thiserror::Error;

/// Errors that can occur while loading, slicing or displaying a sprite sheet.
#[derive(Error, Debug)]
pub enum Error {
    /// The caller asked for something that can't be done with the given image.
    /// Nothing was allocated or written when this is returned.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    #[cfg(feature = "images")]
    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` for caller-input errors.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

/// The reason an argument was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("grid must have at least one row and column, got {rows}x{cols}")]
    EmptyGrid { rows: u32, cols: u32 },

    #[error("cell must be at least 1x1 pixels, got {width}x{height}")]
    EmptyCell { width: u32, height: u32 },

    #[error("region needs {required} pixels along {axis} but the image has {available}")]
    OutOfBounds {
        axis: Axis,
        required: u64,
        available: u32,
    },

    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// An image axis, used to report which bound was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
