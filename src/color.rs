//! ANSI 256-color approximations of RGB pixels, used when drawing [`crate::raster::Image`]s to the screen.
//!
//! This uses [`crossterm::style::Color`] to talk to the terminal.

use std::cmp::Ordering;

use crossterm::style;

use crate::cell::Cell;

/// An 8-bit ANSI terminal color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color(pub u8);

// Component and greyscale steps used by most terminals.
// RGB must begin with 0 and end with 255
const RGB: [u8; 6] = [0, 95, 135, 175, 215, 255];
const GREYSCALE: [u8; 24] = {
    let mut x = [0u8; 24];
    let mut i = 0u8;
    while i < 24 {
        x[i as usize] = i * 10 + 8;
        i += 1;
    }
    x
};

/// Index of the step in `scale` closest to `target`.
fn nearest_step(scale: &[u8], target: u8) -> u8 {
    let next = scale
        .iter()
        .position(|&step| step >= target)
        .unwrap_or(scale.len() - 1);
    match target.cmp(&scale[next]) {
        Ordering::Greater | Ordering::Equal => next as u8,
        Ordering::Less if next == 0 => 0,
        Ordering::Less => {
            let prev = next - 1;
            if target - scale[prev] > scale[next] - target {
                next as u8
            } else {
                prev as u8
            }
        }
    }
}

fn dist(a: (u8, u8, u8), b: (u8, u8, u8)) -> f32 {
    let d = |x: u8, y: u8| (x as f32 - y as f32).abs().powi(3);
    (d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)).cbrt()
}

impl Color {
    pub const fn new(color: u8) -> Self {
        Self(color)
    }

    /// Returns an ANSI color that is visually similar to the specified RGB value.
    ///
    /// Picks whichever of the nearest 6x6x6 cube color and the nearest greyscale
    /// step is closer to the input. Prefers the cube color on a tie.
    pub fn from_rgb_approximate(r: u8, g: u8, b: u8) -> Self {
        let components = Self::from_ansi_components(
            nearest_step(&RGB, r),
            nearest_step(&RGB, g),
            nearest_step(&RGB, b),
        );
        let greyscale = Self::from_ansi_greyscale(nearest_step(
            &GREYSCALE,
            ((r as u16 + g as u16 + b as u16) / 3) as u8,
        ));

        if dist(components.to_rgb_approximate(), (r, g, b))
            > dist(greyscale.to_rgb_approximate(), (r, g, b))
        {
            greyscale
        } else {
            components
        }
    }

    /// A color from the 6x6x6 cube. Components above 5 are clipped.
    pub fn from_ansi_components(r: u8, g: u8, b: u8) -> Self {
        Self(r.min(5) * 36 + g.min(5) * 6 + b.min(5) + 16)
    }

    /// A color from the 24 step greyscale ramp. Steps above 23 are clipped.
    pub fn from_ansi_greyscale(step: u8) -> Self {
        Self(232 + step.min(23))
    }

    /// Returns the approximate RGB color associated with this ANSI color.
    /// Terminal themes may render the 16 standard colors differently.
    pub fn to_rgb_approximate(self) -> (u8, u8, u8) {
        match self.0 {
            0 => (0, 0, 0),
            1 => (128, 0, 0),
            2 => (0, 128, 0),
            3 => (128, 128, 0),
            4 => (0, 0, 128),
            5 => (128, 0, 128),
            6 => (0, 128, 128),
            7 => (192, 192, 192),
            8 => (128, 128, 128),
            9 => (255, 0, 0),
            10 => (0, 255, 0),
            11 => (255, 255, 0),
            12 => (0, 0, 255),
            13 => (255, 0, 255),
            14 => (0, 255, 255),
            15 => (255, 255, 255),
            16..=231 => {
                let offset = self.0 - 16;
                (
                    RGB[(offset / 36) as usize],
                    RGB[(offset / 6 % 6) as usize],
                    RGB[(offset % 6) as usize],
                )
            }
            232..=255 => {
                let grey = GREYSCALE[(self.0 - 232) as usize];
                (grey, grey, grey)
            }
        }
    }

    pub fn to_crossterm_color(self) -> style::Color {
        style::Color::AnsiValue(self.0)
    }
}

/// A [`Cell`] with an optional foreground [`Color`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ColoredCell {
    pub cell: Cell,
    pub color: Option<Color>,
}
