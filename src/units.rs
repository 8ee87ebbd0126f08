//! Pixel geometry shared by images, sprite sheets and the screen.
//! Mixing up pixels and buffer indices is a no no.
//!
//! Units used in this crate:
//!
//! Pixel x/y position/length: u32
//! Pixel buffer index/length: usize
//! Braille subcell pixel x/y position: u8

/// A size in pixels, as a `(width, height)` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    /// Creates a new [`Extent`] from a width and height in pixels.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension is zero.
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered by this extent.
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A pixel position, measured from the top left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: u32,
    pub y: u32,
}

impl Offset {
    /// The top left corner.
    pub const ORIGIN: Offset = Offset::new(0, 0);

    /// Creates a new [`Offset`] from pixel coordinates.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle of pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub origin: Offset,
    pub extent: Extent,
}

impl Rect {
    pub const fn new(origin: Offset, extent: Extent) -> Self {
        Self { origin, extent }
    }

    /// Exclusive right edge. Saturates instead of overflowing.
    pub const fn right(&self) -> u32 {
        self.origin.x.saturating_add(self.extent.width)
    }

    /// Exclusive bottom edge. Saturates instead of overflowing.
    pub const fn bottom(&self) -> u32 {
        self.origin.y.saturating_add(self.extent.height)
    }

    /// Returns `true` if the two rectangles share at least one pixel.
    pub const fn overlaps(&self, other: &Rect) -> bool {
        self.origin.x < other.right()
            && other.origin.x < self.right()
            && self.origin.y < other.bottom()
            && other.origin.y < self.bottom()
    }
}

/// Converts from a (x, y) position to a row-major array index.
pub(crate) const fn index(x: u32, y: u32, width: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Converts from a row-major array index to a (x, y) position.
/// Returns `None` if `width` is zero or the row doesn't fit in a `u32`.
pub fn from_index(i: usize, width: u32) -> Option<(u32, u32)> {
    let x = i.checked_rem(width as usize)?;
    let y = u32::try_from(i / width as usize).ok()?;
    Some((x as u32, y))
}
