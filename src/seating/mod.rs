//! Seat layout simulation built on the automaton engine

pub mod rules;
pub mod seat;
pub mod simulation;

pub use rules::{SeatRule, Visibility};
pub use seat::Seat;
pub use simulation::{ReportSummary, SeatingReport, SeatingSimulation};

use crate::automaton::{io, Grid};
use anyhow::{Context, Result};
use std::path::Path;

/// The ten-row sample layout used by `setup` and in tests
pub const EXAMPLE_LAYOUT: &str = "\
L.LL.LL.LL
LLLLLLL.LL
L.L.L..L..
LLLL.LL.LL
L.LL.LL.LL
L.LLLLL.LL
..L.L.....
LLLLLLLLLL
L.LLLLLL.L
L.LLLLL.LL
";

pub fn parse_layout(content: &str) -> Result<Grid<Seat>> {
    io::parse_grid(content, Seat::from_symbol)
}

/// Load every layout in a file. Layouts are separated by blank lines.
pub fn load_layouts<P: AsRef<Path>>(path: P) -> Result<Vec<Grid<Seat>>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read layout file: {}", path.as_ref().display()))?;

    io::parse_grids(&content, Seat::from_symbol)
        .with_context(|| format!("Failed to parse layouts from: {}", path.as_ref().display()))
}

pub fn layout_to_string(layout: &Grid<Seat>) -> String {
    io::grid_to_string(layout, |seat| seat.symbol())
}

pub fn save_layout<P: AsRef<Path>>(layout: &Grid<Seat>, path: P) -> Result<()> {
    io::save_grid_to_file(layout, |seat| seat.symbol(), path)
}

/// Write the example layout into `output_dir`
pub fn create_example_layouts<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    std::fs::write(dir.join("example.txt"), EXAMPLE_LAYOUT)
        .context("Failed to write example.txt")?;

    // Two small layouts in one file
    std::fs::write(dir.join("pair.txt"), "L.L\nLLL\nL.L\n\n#L#\nL.L\n#L#\n")
        .context("Failed to write pair.txt")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_layout() {
        let layout = parse_layout(EXAMPLE_LAYOUT).unwrap();
        assert_eq!(layout.dimensions(), (10, 10));
        assert_eq!(layout.get(0, 1), Some(&Seat::Floor));
        assert_eq!(layout.get(0, 0), Some(&Seat::Empty));
        assert_eq!(layout_to_string(&layout), EXAMPLE_LAYOUT);

        assert!(parse_layout("L.L\nLXL\n").is_err());
    }

    #[test]
    fn test_create_and_load_examples() {
        let temp_dir = tempdir().unwrap();
        create_example_layouts(temp_dir.path()).unwrap();

        let example = load_layouts(temp_dir.path().join("example.txt")).unwrap();
        assert_eq!(example.len(), 1);
        assert_eq!(example[0].count(|seat| seat.is_seat()), 71);

        let pair = load_layouts(temp_dir.path().join("pair.txt")).unwrap();
        assert_eq!(pair.len(), 2);
        assert_eq!(pair[1].count(|seat| seat.is_occupied()), 4);
    }

    #[test]
    fn test_save_layout() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("out/layout.txt");
        let layout = parse_layout("#.L\nL.#\n").unwrap();

        save_layout(&layout, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "#.L\nL.#\n");
        assert!(load_layouts(temp_dir.path().join("missing.txt")).is_err());
    }

    #[test]
    fn test_blank_layout_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("blank.txt");
        std::fs::write(&path, "\n\n").unwrap();

        let err = load_layouts(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("No grids found"));
    }
}
