//! # `spritesheet`
//!
//! `spritesheet` cuts a sprite sheet into a grid of equally sized sprites.
//!
//! The core is [`sheet::SpriteSheet::extract()`], which validates a grid against the
//! source image and copies every cell into its own [`raster::Image`], row by row.
//! The remaining modules make up a small terminal viewer that draws one sprite at a
//! time using unicode Braille characters and ANSI colors.
pub mod cell;
pub mod color;
pub mod error;
pub mod event;
pub mod raster;
pub mod screen;
pub mod sheet;
pub mod units;
pub mod viewer;

pub use error::{ArgumentError, Error, Result};
pub use raster::{Image, PixelFormat};
pub use sheet::{GridSpec, SliceOptions, SpriteSheet};
pub use units::{Extent, Offset};
