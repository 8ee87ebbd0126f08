//! Module responsible for formatting black & white bitmaps into Unicode braille characters.
//!
//! See the [`Cell`] documentation for more.

use std::ops::BitOr;

/// A cell is exactly 2 pixels wide, since it consists of one braille character.
pub const PIXEL_WIDTH: u8 = 2;
/// A cell is exactly 4 pixels tall, since it consists of one braille character.
pub const PIXEL_HEIGHT: u8 = 4;

/// The unicode scalar value for the first ("empty") braille codepoint.
pub const BRAILLE_BASE_CODEPOINT: u32 = 0x2800;
/// The number of bytes required to encode a braille unicode character into utf-8. This is a constant value,
/// because the characters have codepoints between `U+0800` and `U+FFFF`.
pub const BRAILLE_UTF8_BYTES: usize = 3;

/// A 2x4 block of pixels. The bits are stored row by row:
/// ```txt
/// 0 1
/// 2 3
/// 4 5
/// 6 7
/// ```
///
/// That is, the top left pixel of a cell is stored into the 0th bit, the top right pixel is the 1st
/// bit, and so on.
///
/// The Unicode braille block numbers its dots column by column instead:
/// ```txt
/// 0 3
/// 1 4
/// 2 5
/// 6 7
/// ```
/// so the cell with the top left and top right dots set is the character at
/// [`BRAILLE_BASE_CODEPOINT`] plus `0b1001`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
#[repr(transparent)]
pub struct Cell {
    pub bits: u8,
}

impl Cell {
    pub const fn new(bits: u8) -> Self {
        Self { bits }
    }

    /// A cell with every pixel set.
    pub const fn full() -> Self {
        Self { bits: u8::MAX }
    }

    /// The cell with only the pixel at (x, y) set, or `None` if the position is outside the cell.
    pub const fn from_bit_position(x: u8, y: u8) -> Option<Self> {
        if x < PIXEL_WIDTH && y < PIXEL_HEIGHT {
            Some(Self::new(1 << (y * PIXEL_WIDTH + x)))
        } else {
            None
        }
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Computes the Unicode codepoint offset format of the braille character.
    pub const fn braille_offset(self) -> u8 {
        (self.bits & 0b11100001)
            | ((self.bits & 0b10) << 2)
            | ((self.bits & 0b100) >> 1)
            | ((self.bits & 0b1000) << 1)
            | ((self.bits & 0b10000) >> 2)
    }

    pub fn to_braille(self) -> char {
        // Every offset in 0..=255 lands inside the braille block.
        char::from_u32(BRAILLE_BASE_CODEPOINT + self.braille_offset() as u32).unwrap_or(' ')
    }

    /// Encodes the cell as the UTF-8 bytes of its braille character.
    pub fn to_braille_utf8(self) -> [u8; BRAILLE_UTF8_BYTES] {
        let mut b = [0; BRAILLE_UTF8_BYTES];
        self.to_braille().encode_utf8(&mut b);
        b
    }
}

impl BitOr for Cell {
    type Output = Cell;

    fn bitor(self, rhs: Self) -> Self::Output {
        Cell::new(self.bits | rhs.bits)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn unique_offset() {
        let map: HashSet<_> = (0u8..=255).map(|n| Cell::new(n).braille_offset()).collect();
        assert_eq!(map.len(), 256)
    }

    #[test]
    fn correct_braille() {
        assert_eq!(Cell::new(0).to_braille(), '⠀');
        assert_eq!(Cell::new(0b11).to_braille(), '⠉');
        assert_eq!(Cell::full().to_braille(), '⣿');
        assert_eq!(Cell::new(1).to_braille_utf8(), [226, 160, 129]);
        assert_eq!(Cell::new(2).to_braille_utf8(), [226, 160, 136]);
        assert_eq!(Cell::new(128).to_braille_utf8(), [226, 162, 128]);
    }

    #[test]
    fn bit_positions() {
        assert_eq!(Cell::from_bit_position(0, 0), Some(Cell::new(1)));
        assert_eq!(Cell::from_bit_position(1, 3), Some(Cell::new(128)));
        assert_eq!(Cell::from_bit_position(2, 0), None);
        let corners = [(0, 0), (1, 0), (0, 3), (1, 3)]
            .into_iter()
            .filter_map(|(x, y)| Cell::from_bit_position(x, y))
            .fold(Cell::default(), |a, b| a | b);
        assert_eq!(corners.to_braille(), '⣉');
    }
}
