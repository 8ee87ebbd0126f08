//! Module for writing output to the terminal.
//! Contains the [`Screen`] type and its public interface.

use std::{
    io::{self, Write},
    thread,
    time::{Duration, Instant},
};

use crossterm::{
    cursor, event, execute, queue,
    style::{self, Print},
    terminal,
};
use log::LevelFilter;
use smallvec::{smallvec, SmallVec};

use crate::{
    cell::{Cell, BRAILLE_UTF8_BYTES, PIXEL_HEIGHT, PIXEL_WIDTH},
    color::{Color, ColoredCell},
    error::Result,
    event::Event,
    raster::Image,
    units::index,
};

/// Pixels with an alpha value at or below this are not drawn.
pub const ALPHA_THRESHOLD: u8 = 128;

/// Type used to write to the screen. Contains public methods
/// to write pixels and images to the screen, as well as colors.
///
/// The point (0, 0) represents the top left pixel of the screen.
///
/// The [`Screen::rasterize`] method can be used to generate
/// bytes that can be written to a terminal.
pub struct Screen {
    cells: Vec<ColoredCell>,
    width: u32,
    height: u32,
    status: String,
    /// Log level to restore once the alternate screen is left.
    paused_log: Option<LevelFilter>,
}

/// A blit type used to select the type of operation
/// when writing to the screen. In the case of single pixels,
/// this is used to determine whether the output pixel is
/// set to 1, set to 0 or flipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blit {
    /// Sets the output bits to 0
    Unset,
    /// Set the output bits to 1
    Set,
    /// Flips the output bits, i.e. sets 1 to 0 and 0 to 1
    Toggle,
}

/// Returned by the frame closure of [`Screen::start_loop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Occurrences of each color within one cell. A cell holds at most 8 pixels.
type ColorTally = SmallVec<[(Color, u8); 8]>;

impl Screen {
    /// Create a new empty screen with the given dimensions in pixels.
    /// Partial cells at the right and bottom edges are still allocated.
    pub fn new_pixels(width: u32, height: u32) -> Self {
        Self {
            cells: vec![
                ColoredCell::default();
                width.div_ceil(PIXEL_WIDTH as u32) as usize
                    * height.div_ceil(PIXEL_HEIGHT as u32) as usize
            ],
            width,
            height,
            status: String::new(),
            paused_log: None,
        }
    }

    /// Height of the screen in cells.
    pub fn cell_height(&self) -> u32 {
        self.height.div_ceil(PIXEL_HEIGHT as u32)
    }
    /// Width of the screen in cells.
    pub fn cell_width(&self) -> u32 {
        self.width.div_ceil(PIXEL_WIDTH as u32)
    }
    pub fn pixel_height(&self) -> u32 {
        self.height
    }
    pub fn pixel_width(&self) -> u32 {
        self.width
    }

    /// The cell index and the single-bit cell of a pixel. The caller checks bounds.
    fn pixel_index(&self, x: u32, y: u32) -> (usize, Cell) {
        let i = index(
            x / PIXEL_WIDTH as u32,
            y / PIXEL_HEIGHT as u32,
            self.cell_width(),
        );
        let bit = Cell::from_bit_position(
            (x % PIXEL_WIDTH as u32) as u8,
            (y % PIXEL_HEIGHT as u32) as u8,
        )
        .unwrap_or_default();
        (i, bit)
    }

    #[allow(unused)]
    fn pixel_at(&self, x: u32, y: u32) -> bool {
        let (i, bit) = self.pixel_index(x, y);
        self.cells[i].cell.bits & bit.bits != 0
    }

    /// Transforms the pixel value at the given coordinates with a generic given blitting strategy.
    /// Returns `true` if a value was changed, and `false` if the given coordinate was out of bounds.
    pub fn transform_pixel(&mut self, x: u32, y: u32, blit: Blit) -> bool {
        if x < self.width && y < self.height {
            let (i, bit) = self.pixel_index(x, y);
            let orig = self.cells[i].cell.bits;
            self.cells[i].cell.bits = match blit {
                Blit::Set => orig | bit.bits,
                Blit::Unset => orig & !bit.bits,
                Blit::Toggle => orig ^ bit.bits,
            };
            true
        } else {
            false
        }
    }

    /// Sets the pixel value at the given coordinates.
    ///
    /// **Ignores** out-of-bounds input.
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        self.transform_pixel(x, y, if value { Blit::Set } else { Blit::Unset });
    }

    /// Flips the pixel value at the given coordinates.
    ///
    /// **Ignores** out-of-bounds input.
    pub fn toggle(&mut self, x: u32, y: u32) {
        self.transform_pixel(x, y, Blit::Toggle);
    }

    /// Clears every pixel, color and the status line.
    pub fn clear(&mut self) {
        self.cells.fill(ColoredCell::default());
        self.status.clear();
    }

    /// Sets the line of text printed below the pixels.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Draws an image with its top left corner at (x, y).
    ///
    /// Pixels with an alpha value above [`ALPHA_THRESHOLD`] are blitted; parts of the image
    /// outside the screen are clipped. Each cell that receives pixels takes on the most common
    /// color among them, approximated to the ANSI palette.
    pub fn draw_image(&mut self, image: &Image, x: u32, y: u32, blit: Blit) {
        let mut tallies: Vec<ColorTally> = vec![smallvec![]; self.cells.len()];
        for (px, py, [r, g, b, a]) in image.pixels() {
            if a <= ALPHA_THRESHOLD {
                continue;
            }
            let (Some(sx), Some(sy)) = (x.checked_add(px), y.checked_add(py)) else {
                continue;
            };
            if !self.transform_pixel(sx, sy, blit) {
                continue;
            }
            let (i, _) = self.pixel_index(sx, sy);
            let color = Color::from_rgb_approximate(r, g, b);
            let tally = &mut tallies[i];
            match tally.iter_mut().find(|(c, _)| *c == color) {
                Some((_, n)) => *n += 1,
                None => tally.push((color, 1)),
            }
        }
        if blit == Blit::Unset {
            return;
        }
        for (cell, tally) in self.cells.iter_mut().zip(tallies) {
            // ties go to the first color seen, i.e. the topmost
            if let Some(&(color, _)) = tally.iter().rev().max_by_key(|(_, n)| *n) {
                cell.color = Some(color);
            }
        }
    }

    /// Converts the screen to a utf-8 sequence of bytes that can be rendered in a terminal.
    /// Includes color escapes and `\r\n` line endings, followed by the status line if there is one.
    pub fn rasterize(&self) -> io::Result<Vec<u8>> {
        let width = self.cell_width() as usize;
        // extra 2 bytes per row for the line endings
        let mut buf = Vec::with_capacity(
            self.cells.len() * BRAILLE_UTF8_BYTES + self.cell_height() as usize * 2,
        );
        let mut current = None;
        for row in self.cells.chunks(width.max(1)) {
            for cell in row {
                if cell.color != current {
                    match cell.color {
                        Some(color) => {
                            queue!(buf, style::SetForegroundColor(color.to_crossterm_color()))?
                        }
                        None => queue!(buf, style::ResetColor)?,
                    }
                    current = cell.color;
                }
                buf.extend_from_slice(&cell.cell.to_braille_utf8());
            }
            buf.extend_from_slice(b"\r\n");
        }
        if current.is_some() {
            queue!(buf, style::ResetColor)?;
        }
        if !self.status.is_empty() {
            queue!(buf, Print(&self.status), Print("\r\n"))?;
        }
        Ok(buf)
    }

    /// Switches the terminal to raw mode on the alternate screen.
    /// Logging stays off until [`Screen::exit_screen`] so log lines don't land on the frame.
    pub fn enter_screen(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        self.pause_log();
        Ok(())
    }

    /// Restores the terminal to its state before [`Screen::enter_screen`], including the log level.
    pub fn exit_screen(&mut self) -> io::Result<()> {
        let result = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen)
            .and_then(|()| terminal::disable_raw_mode());
        self.resume_log();
        result
    }

    fn pause_log(&mut self) {
        self.paused_log.get_or_insert_with(log::max_level);
        log::set_max_level(LevelFilter::Off);
    }

    fn resume_log(&mut self) {
        if let Some(level) = self.paused_log.take() {
            log::set_max_level(level);
        }
    }

    /// Writes the current frame to stdout, starting at the top left corner of the terminal.
    pub fn render_screen(&self) -> io::Result<()> {
        let frame = self.rasterize()?;
        let mut stdout = io::stdout().lock();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::All)
        )?;
        stdout.write_all(&frame)?;
        stdout.flush()
    }

    /// Runs a fixed-tick loop at `fps` frames per second until `frame` returns [`Flow::Exit`] or an error.
    ///
    /// Each tick drains pending input, calls `frame` with the events that arrived, renders the screen,
    /// and sleeps for the rest of the tick. The terminal is restored even if `frame` fails.
    pub fn start_loop<F>(&mut self, fps: u32, mut frame: F) -> Result<()>
    where
        F: FnMut(&mut Screen, &[Event]) -> Result<Flow>,
    {
        self.enter_screen()?;
        let result = self.run_loop(fps, &mut frame);
        self.exit_screen()?;
        result
    }

    fn run_loop<F>(&mut self, fps: u32, frame: &mut F) -> Result<()>
    where
        F: FnMut(&mut Screen, &[Event]) -> Result<Flow>,
    {
        let tick = Duration::from_secs(1) / fps.max(1);
        loop {
            let start = Instant::now();

            let mut events: SmallVec<[Event; 4]> = smallvec![];
            while event::poll(Duration::ZERO)? {
                events.extend(Event::from_crossterm_event(event::read()?));
            }
            if frame(self, &events)? == Flow::Exit {
                return Ok(());
            }
            self.render_screen()?;

            if let Some(rest) = tick.checked_sub(start.elapsed()) {
                thread::sleep(rest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixelFormat;

    #[test]
    fn simple_screen_size() {
        let screen = Screen::new_pixels(16, 24);
        assert_eq!(screen.cell_width(), 8);
        assert_eq!(screen.cell_height(), 6);
    }

    #[test]
    fn odd_screen_size() {
        let screen = Screen::new_pixels(3, 3);
        assert_eq!(screen.cell_width(), 2);
        assert_eq!(screen.cell_height(), 1);
    }

    #[test]
    fn make_square() {
        let mut screen = Screen::new_pixels(8, 8);
        for i in 0..8 {
            screen.set(i, 0, true);
            screen.set(i, 7, true);
            screen.set(0, i, true);
            screen.set(7, i, true);
        }
        assert_eq!(
            String::from_utf8(screen.rasterize().unwrap()).unwrap(),
            "⡏⠉⠉⢹\r\n⣇⣀⣀⣸\r\n"
        )
    }

    #[test]
    fn blit_types() {
        let mut screen = Screen::new_pixels(1, 1);
        assert!(!screen.pixel_at(0, 0));
        screen.set(0, 0, true);
        assert!(screen.pixel_at(0, 0));
        screen.set(0, 0, false);
        assert!(!screen.pixel_at(0, 0));
        screen.toggle(0, 0);
        assert!(screen.pixel_at(0, 0));
        screen.toggle(0, 0);
        assert!(!screen.pixel_at(0, 0));
        assert!(!screen.transform_pixel(1, 0, Blit::Set));
    }

    #[test]
    fn draw_image_alpha_and_clipping() {
        let mut image = Image::new(4, 4, PixelFormat::Rgba);
        image.put_pixel(0, 0, [255, 0, 0, 255]);
        image.put_pixel(1, 0, [255, 0, 0, 100]);
        image.put_pixel(3, 3, [0, 0, 255, 255]);

        let mut screen = Screen::new_pixels(4, 4);
        screen.draw_image(&image, 1, 0, Blit::Set);
        assert!(screen.pixel_at(1, 0));
        assert!(!screen.pixel_at(2, 0));
        // (3, 3) lands at (4, 3), off screen
        assert!(screen.cells.iter().filter(|c| !c.cell.is_empty()).count() == 1);
        assert_eq!(
            screen.cells[0].color,
            Some(Color::from_rgb_approximate(255, 0, 0))
        );
        assert_eq!(screen.cells[1].color, None);
    }

    #[test]
    fn draw_opaque_image_fills_cells() {
        let image = Image::new(2, 4, PixelFormat::Rgb);
        let mut screen = Screen::new_pixels(2, 4);
        screen.draw_image(&image, 0, 0, Blit::Set);
        assert_eq!(screen.cells[0].cell, Cell::full());
        assert_eq!(
            screen.cells[0].color,
            Some(Color::from_ansi_components(0, 0, 0))
        );
    }

    #[test]
    fn majority_color_wins() {
        let mut image = Image::new(2, 4, PixelFormat::Rgb);
        for y in 0..4 {
            for x in 0..2 {
                let px = if y == 0 {
                    [255, 0, 0, 255]
                } else {
                    [0, 255, 0, 255]
                };
                image.put_pixel(x, y, px);
            }
        }
        let mut screen = Screen::new_pixels(2, 4);
        screen.draw_image(&image, 0, 0, Blit::Set);
        assert_eq!(
            screen.cells[0].color,
            Some(Color::from_rgb_approximate(0, 255, 0))
        );
    }

    #[test]
    fn log_paused_while_on_screen() {
        log::set_max_level(LevelFilter::Debug);
        let mut screen = Screen::new_pixels(2, 4);
        screen.pause_log();
        screen.pause_log();
        assert_eq!(log::max_level(), LevelFilter::Off);
        screen.resume_log();
        assert_eq!(log::max_level(), LevelFilter::Debug);
        screen.resume_log();
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }

    #[test]
    fn rasterize_colors_and_status() {
        let mut screen = Screen::new_pixels(2, 4);
        screen.draw_image(&Image::new(2, 4, PixelFormat::Rgb), 0, 0, Blit::Set);
        screen.set_status("7");
        let out = String::from_utf8(screen.rasterize().unwrap()).unwrap();
        assert!(out.starts_with("\x1b[38;5;16m⣿\r\n"));
        assert!(out.ends_with("\x1b[0m7\r\n"));

        screen.clear();
        assert_eq!(
            String::from_utf8(screen.rasterize().unwrap()).unwrap(),
            "\u{2800}\r\n"
        );
    }
}
