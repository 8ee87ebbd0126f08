//! Module for slicing a sprite sheet into a grid of equally sized [`Image`]s.
//!
//! A sheet is described by a [`GridSpec`]: `rows` by `cols` cells of a fixed
//! [`Extent`], whose top left corner sits at an [`Offset`] inside the source image.
//! Sprites are produced row-major, so the sprite at index `row * cols + col` is the
//! cell with its top left pixel at `(offset.x + col * cell.width, offset.y + row * cell.height)`.

use crate::{
    error::{ArgumentError, Axis, Result},
    raster::{check_span, Image, PixelFormat},
    units::{from_index, Extent, Offset, Rect},
};

/// The layout of sprites within a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
    pub cell: Extent,
    pub offset: Offset,
}

impl GridSpec {
    pub const fn new(cell: Extent, offset: Offset, rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            cell,
            offset,
        }
    }

    /// A grid containing a single sprite.
    pub const fn single(cell: Extent, offset: Offset) -> Self {
        Self::new(cell, offset, 1, 1)
    }

    /// Number of sprites in the grid.
    pub const fn len(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The source rectangle of the cell at the given row and column.
    ///
    /// Returns `None` if the rectangle's position overflows a `u32`. Whether it lies
    /// inside a particular image is up to [`GridSpec::validate()`].
    pub fn cell_rect(&self, row: u32, col: u32) -> Option<Rect> {
        let dx = col.checked_mul(self.cell.width)?;
        let dy = row.checked_mul(self.cell.height)?;
        let origin = Offset::new(
            self.offset.x.checked_add(dx)?,
            self.offset.y.checked_add(dy)?,
        );
        Some(Rect::new(origin, self.cell))
    }

    /// The top left pixel of the sprite at a row-major index.
    /// Returns `None` for a grid without columns, or if the position overflows.
    pub fn cell_origin(&self, i: usize) -> Option<Offset> {
        let (col, row) = from_index(i, self.cols)?;
        self.cell_rect(row, col).map(|rect| rect.origin)
    }

    /// Checks that the grid is non-empty and lies entirely within an image of size `bounds`.
    /// Does not allocate.
    pub fn validate(&self, bounds: Extent) -> std::result::Result<(), ArgumentError> {
        if self.rows < 1 || self.cols < 1 {
            return Err(ArgumentError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.cell.is_empty() {
            return Err(ArgumentError::EmptyCell {
                width: self.cell.width,
                height: self.cell.height,
            });
        }
        check_span(
            Axis::X,
            self.offset.x,
            self.cols as u64 * self.cell.width as u64,
            bounds.width,
        )?;
        check_span(
            Axis::Y,
            self.offset.y,
            self.rows as u64 * self.cell.height as u64,
            bounds.height,
        )
    }
}

/// Options applied to every sprite produced by [`SpriteSheet::extract()`].
/// These never change which pixels get copied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceOptions {
    /// `Some(true)` gives every sprite an alpha channel, `Some(false)` makes every sprite opaque,
    /// and `None` keeps the source image's pixel format.
    pub supports_transparency: Option<bool>,
}

impl SliceOptions {
    pub const fn with_transparency(supports_transparency: bool) -> Self {
        Self {
            supports_transparency: Some(supports_transparency),
        }
    }

    fn format_for(&self, source: PixelFormat) -> PixelFormat {
        self.supports_transparency
            .map_or(source, PixelFormat::with_alpha)
    }
}

/// A source image that sprites are cut out of. The source is only ever read.
#[derive(Debug, Clone, Copy)]
pub struct SpriteSheet<'a> {
    source: &'a Image,
}

impl<'a> SpriteSheet<'a> {
    pub fn new(source: &'a Image) -> Self {
        Self { source }
    }

    /// Creates `rows` x `cols` individual sprites of `cell` size from the sheet, starting at `offset`.
    ///
    /// Returns the sprites in row-major order. Fails with [`crate::Error::InvalidArgument`] if
    /// `rows` or `cols` is zero, if `cell` is empty, or if the grid extends past the source image.
    /// Nothing is allocated when it fails.
    pub fn extract(
        &self,
        cell: Extent,
        offset: Offset,
        rows: u32,
        cols: u32,
        options: SliceOptions,
    ) -> Result<Vec<Image>> {
        self.extract_grid(&GridSpec::new(cell, offset, rows, cols), options)
    }

    /// Like [`SpriteSheet::extract()`], with the layout given as a [`GridSpec`].
    pub fn extract_grid(&self, grid: &GridSpec, options: SliceOptions) -> Result<Vec<Image>> {
        grid.validate(self.source.extent())?;

        let format = options.format_for(self.source.format());
        let mut sprites = Vec::with_capacity(grid.len());
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                // The whole grid fits in a u32 image after validation
                let origin = Offset::new(
                    grid.offset.x + col * grid.cell.width,
                    grid.offset.y + row * grid.cell.height,
                );
                sprites.push(self.source.copy_region(origin, grid.cell, format)?);
            }
        }
        log::debug!(
            "Extracted {} sprites of {}x{} ({}x{} grid at {},{}, {:?})",
            sprites.len(),
            grid.cell.width,
            grid.cell.height,
            grid.rows,
            grid.cols,
            grid.offset.x,
            grid.offset.y,
            format
        );
        Ok(sprites)
    }
}
