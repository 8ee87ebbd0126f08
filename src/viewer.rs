//! A terminal sprite viewer: shows one sprite of a sheet at a time and steps
//! through them with the arrow keys.

use crate::{
    error::Result,
    event::Event,
    raster::Image,
    screen::{Blit, Flow, Screen},
    sheet::{GridSpec, SliceOptions, SpriteSheet},
    units::{Extent, Offset},
};

/// Screen width in braille pixels (80 terminal columns).
pub const SCREEN_WIDTH: u32 = 160;
/// Screen height in braille pixels (22 terminal rows, leaving room for the status line).
pub const SCREEN_HEIGHT: u32 = 88;
pub const FRAME_RATE: u32 = 30;

pub const GRID_ROWS: u32 = 8;
pub const GRID_COLS: u32 = 10;
pub const CELL_SIZE: Extent = Extent::new(64, 64);
pub const SHEET_OFFSET: Offset = Offset::ORIGIN;

/// Startup settings of the viewer. Nothing here changes once the viewer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub frame_rate: u32,
    pub grid: GridSpec,
    /// Whether extracted sprites keep an alpha channel.
    pub transparency: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            frame_rate: FRAME_RATE,
            grid: GridSpec::new(CELL_SIZE, SHEET_OFFSET, GRID_ROWS, GRID_COLS),
            transparency: true,
        }
    }
}

impl ViewerConfig {
    pub fn slice_options(&self) -> SliceOptions {
        SliceOptions::with_transparency(self.transparency)
    }
}

/// The index of the sprite on display. Stays within `0..len`, without wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    index: usize,
    len: usize,
}

impl Selection {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1).min(self.len.saturating_sub(1));
    }

    pub fn previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }
}

/// Sprites cut out of a sheet, plus the current [`Selection`].
pub struct Viewer {
    sprites: Vec<Image>,
    selection: Selection,
    config: ViewerConfig,
}

impl Viewer {
    pub fn new(sprites: Vec<Image>, config: ViewerConfig) -> Self {
        Self {
            selection: Selection::new(sprites.len()),
            sprites,
            config,
        }
    }

    /// Slices `sheet` according to `config.grid`. This is the only time the sheet is read.
    pub fn from_sheet(sheet: &Image, config: ViewerConfig) -> Result<Self> {
        let sheet = SpriteSheet::new(sheet);
        let sprites = sheet.extract_grid(&config.grid, config.slice_options())?;
        Ok(Self::new(sprites, config))
    }

    pub fn sprites(&self) -> &[Image] {
        &self.sprites
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected(&self) -> Option<&Image> {
        self.sprites.get(self.selection.index())
    }

    /// Applies input to the selection.
    pub fn handle(&mut self, events: &[Event]) -> Flow {
        for event in events {
            match event {
                Event::Previous => self.selection.previous(),
                Event::Next => self.selection.next(),
                Event::Quit => return Flow::Exit,
            }
            log::trace!("Selected sprite {}", self.selection.index());
        }
        Flow::Continue
    }

    /// Draws the selected sprite in the middle of the screen, with its index on the status line.
    pub fn draw(&self, screen: &mut Screen) {
        screen.clear();
        if let Some(sprite) = self.selected() {
            let x = screen.pixel_width().saturating_sub(sprite.width()) / 2;
            let y = screen.pixel_height().saturating_sub(sprite.height()) / 2;
            screen.draw_image(sprite, x, y, Blit::Set);
        }
        screen.set_status(self.selection.index().to_string());
    }

    /// Takes over the terminal until the user quits.
    pub fn run(mut self) -> Result<()> {
        log::info!(
            "Viewing {} sprites at {} fps",
            self.sprites.len(),
            self.config.frame_rate
        );
        let mut screen = Screen::new_pixels(self.config.screen_width, self.config.screen_height);
        screen.start_loop(self.config.frame_rate, |screen, events| {
            let flow = self.handle(events);
            if flow == Flow::Continue {
                self.draw(screen);
            }
            Ok(flow)
        })
    }
}
