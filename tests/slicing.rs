use proptest::prelude::*;
use spritesheet::{
    ArgumentError, Error, Extent, GridSpec, Image, Offset, PixelFormat, SliceOptions, SpriteSheet,
};

/// A sheet whose pixels can be traced back to their position.
fn numbered_sheet(width: u32, height: u32) -> Image {
    let mut img = Image::new(width, height, PixelFormat::Rgba);
    for y in 0..height {
        for x in 0..width {
            let px = [x as u8, y as u8, (x / 256) as u8, 255 - (y / 256) as u8];
            img.put_pixel(x, y, px);
        }
    }
    img
}

/// A grid that fits inside its sheet, plus the sheet size.
fn fitting_grid() -> impl Strategy<Value = (GridSpec, Extent)> {
    let cells = (1u32..5, 1u32..5, 1u32..9, 1u32..9);
    let placement = (0u32..6, 0u32..6, 0u32..4, 0u32..4);
    (cells, placement).prop_map(|((rows, cols, w, h), (x, y, pad_x, pad_y))| {
        let grid = GridSpec::new(Extent::new(w, h), Offset::new(x, y), rows, cols);
        let sheet = Extent::new(x + cols * w + pad_x, y + rows * h + pad_y);
        (grid, sheet)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fitting_grids_extract_every_cell((grid, size) in fitting_grid()) {
        let img = numbered_sheet(size.width, size.height);
        let sprites = SpriteSheet::new(&img)
            .extract_grid(&grid, SliceOptions::default())
            .unwrap();

        prop_assert_eq!(sprites.len(), (grid.rows * grid.cols) as usize);
        for (i, sprite) in sprites.iter().enumerate() {
            prop_assert_eq!(sprite.extent(), grid.cell);
            let origin = grid.cell_origin(i).unwrap();
            let (row, col) = (i as u32 / grid.cols, i as u32 % grid.cols);
            prop_assert_eq!(origin, Offset::new(
                grid.offset.x + col * grid.cell.width,
                grid.offset.y + row * grid.cell.height,
            ));
            for (x, y, px) in sprite.pixels() {
                prop_assert_eq!(Some(px), img.pixel(origin.x + x, origin.y + y));
            }
        }
    }

    #[test]
    fn cells_never_overlap((grid, _) in fitting_grid()) {
        let rects: Vec<_> = (0..grid.rows)
            .flat_map(|row| (0..grid.cols).map(move |col| (row, col)))
            .map(|(row, col)| grid.cell_rect(row, col).unwrap())
            .collect();
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                prop_assert!(!a.overlaps(b));
            }
        }
    }

    #[test]
    fn one_pixel_too_wide_fails((grid, size) in fitting_grid()) {
        let exact = Extent::new(
            grid.offset.x + grid.cols * grid.cell.width,
            grid.offset.y + grid.rows * grid.cell.height,
        );
        let img = numbered_sheet(size.width, size.height);
        let sheet = SpriteSheet::new(&img);

        let snug = GridSpec {
            offset: Offset::new(grid.offset.x + size.width - exact.width, grid.offset.y),
            ..grid
        };
        prop_assert!(sheet.extract_grid(&snug, SliceOptions::default()).is_ok());

        let past = GridSpec {
            offset: Offset::new(snug.offset.x + 1, grid.offset.y),
            ..grid
        };
        let err = sheet.extract_grid(&past, SliceOptions::default()).unwrap_err();
        prop_assert!(err.is_invalid_argument());
    }
}

#[test]
fn sheet_of_640_pixels() {
    let img = Image::new(640, 640, PixelFormat::Rgba);
    let sheet = SpriteSheet::new(&img);
    let cell = Extent::new(64, 64);

    let sprites = sheet
        .extract(
            cell,
            Offset::ORIGIN,
            8,
            10,
            SliceOptions::with_transparency(true),
        )
        .unwrap();
    assert_eq!(sprites.len(), 80);
    assert!(sprites.iter().all(|s| s.extent() == cell));

    assert!(sheet
        .extract(cell, Offset::ORIGIN, 9, 10, SliceOptions::default())
        .is_ok());

    let err = sheet
        .extract(cell, Offset::ORIGIN, 11, 10, SliceOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidArgument(ArgumentError::OutOfBounds { required: 704, .. })
    ));
}

#[test]
fn zero_rows_or_cols() {
    let img = Image::new(64, 64, PixelFormat::Rgb);
    let sheet = SpriteSheet::new(&img);
    for (rows, cols) in [(0, 1), (1, 0)] {
        let err = sheet
            .extract(
                Extent::new(8, 8),
                Offset::ORIGIN,
                rows,
                cols,
                SliceOptions::default(),
            )
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}

#[test]
fn source_is_untouched() {
    let img = numbered_sheet(32, 16);
    let before = img.clone();
    let _ = SpriteSheet::new(&img)
        .extract(
            Extent::new(8, 8),
            Offset::ORIGIN,
            2,
            4,
            SliceOptions::with_transparency(false),
        )
        .unwrap();
    assert_eq!(img, before);
}
