use std::{env, path::PathBuf, process};

use spritesheet::{
    viewer::{Viewer, ViewerConfig},
    Extent, Image, Offset,
};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn usage(program: &str) -> String {
    format!("Usage: {program} <image> [rows cols [cell_width cell_height [offset_x offset_y]]]")
}

fn run() -> Result<(), String> {
    let mut args = env::args();
    let program = args
        .next()
        .unwrap_or_else(|| "spritesheet-viewer".to_string());
    let args: Vec<String> = args.collect();
    let (path, config) = parse_args(&args).map_err(|e| format!("{e}\n{}", usage(&program)))?;

    let sheet =
        Image::open(&path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    log::info!(
        "Loaded {} ({}x{})",
        path.display(),
        sheet.width(),
        sheet.height()
    );
    let viewer = Viewer::from_sheet(&sheet, config)
        .map_err(|e| format!("Failed to slice {}: {e}", path.display()))?;
    drop(sheet);
    viewer.run().map_err(|e| e.to_string())
}

/// Parses `<image> [rows cols [cell_width cell_height [offset_x offset_y]]]`.
/// Anything not given keeps its [`ViewerConfig::default()`] value.
fn parse_args(args: &[String]) -> Result<(PathBuf, ViewerConfig), String> {
    let (path, numbers) = args.split_first().ok_or("Missing image path")?;
    let numbers = numbers
        .iter()
        .map(|arg| {
            arg.parse::<u32>()
                .map_err(|e| format!("Invalid number {arg:?}: {e}"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut config = ViewerConfig::default();
    let grid = &mut config.grid;
    match *numbers.as_slice() {
        [] => {}
        [rows, cols] => {
            (grid.rows, grid.cols) = (rows, cols);
        }
        [rows, cols, width, height] => {
            (grid.rows, grid.cols) = (rows, cols);
            grid.cell = Extent::new(width, height);
        }
        [rows, cols, width, height, x, y] => {
            (grid.rows, grid.cols) = (rows, cols);
            grid.cell = Extent::new(width, height);
            grid.offset = Offset::new(x, y);
        }
        _ => {
            let count = numbers.len();
            return Err(format!("Expected 0, 2, 4 or 6 numbers, got {count}"));
        }
    }
    Ok((PathBuf::from(path), config))
}
