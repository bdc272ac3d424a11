//! Text encoding of grids: one row per line, one character per cell

use super::Grid;
use crate::utils::chunk_when;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse a single grid, converting each character with `parse_cell`.
/// Surrounding whitespace and blank lines are ignored.
pub fn parse_grid<T, F>(content: &str, parse_cell: F) -> Result<Grid<T>>
where
    F: Fn(char) -> Option<T>,
{
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Grid text is empty or contains no valid rows");
    }

    let mut rows = Vec::with_capacity(lines.len());
    for (row_idx, line) in lines.iter().enumerate() {
        let row = line
            .chars()
            .enumerate()
            .map(|(col_idx, ch)| {
                parse_cell(ch).with_context(|| {
                    format!("Invalid character '{}' at position ({}, {})", ch, row_idx, col_idx)
                })
            })
            .collect::<Result<Vec<T>>>()?;
        rows.push(row);
    }

    Ok(Grid::from_rows(rows)?)
}

/// Parse every grid in `content`; grids are separated by one or more blank lines
pub fn parse_grids<T, F>(content: &str, parse_cell: F) -> Result<Vec<Grid<T>>>
where
    F: Fn(char) -> Option<T>,
{
    let lines: Vec<&str> = content.lines().map(str::trim).collect();

    let grids = chunk_when(lines, |line| line.is_empty())
        .into_iter()
        .filter(|block| block.iter().any(|line| !line.is_empty()))
        .enumerate()
        .map(|(idx, block)| {
            parse_grid(&block.join("\n"), &parse_cell)
                .with_context(|| format!("Failed to parse grid #{}", idx + 1))
        })
        .collect::<Result<Vec<Grid<T>>>>()?;

    anyhow::ensure!(!grids.is_empty(), "No grids found");
    Ok(grids)
}

/// Render a grid back to text
pub fn grid_to_string<T, F>(grid: &Grid<T>, render_cell: F) -> String
where
    F: Fn(&T) -> char,
{
    let mut result = String::with_capacity(grid.height() * (grid.width() + 1));

    for row in grid.rows() {
        result.extend(row.iter().map(&render_cell));
        result.push('\n');
    }

    result
}

/// Load a single grid from a text file
pub fn load_grid_from_file<T, F, P>(path: P, parse_cell: F) -> Result<Grid<T>>
where
    F: Fn(char) -> Option<T>,
    P: AsRef<Path>,
{
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_grid(&content, parse_cell)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

/// Save a grid to a text file, creating parent directories as needed
pub fn save_grid_to_file<T, F, P>(grid: &Grid<T>, render_cell: F, path: P) -> Result<()>
where
    F: Fn(&T) -> char,
    P: AsRef<Path>,
{
    let content = grid_to_string(grid, render_cell);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn bit(ch: char) -> Option<bool> {
        match ch {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        }
    }

    fn render(cell: &bool) -> char {
        if *cell {
            '1'
        } else {
            '0'
        }
    }

    #[test]
    fn test_parse_grid() {
        let grid = parse_grid("010\n101\n010\n", bit).unwrap();

        assert_eq!(grid.dimensions(), (3, 3));
        assert_eq!(grid.count(|&cell| cell), 4);
        assert_eq!(grid.get(1, 0), Some(&true));
        assert_eq!(grid.get(1, 1), Some(&false));
    }

    #[test]
    fn test_grid_to_string() {
        let grid = Grid::from_rows(vec![vec![false, true], vec![true, true]]).unwrap();
        assert_eq!(grid_to_string(&grid, render), "01\n11\n");
    }

    #[test]
    fn test_invalid_input() {
        let err = parse_grid("010\n1X1\n010\n", bit).unwrap_err();
        assert!(err.to_string().contains("(1, 1)"));

        assert!(parse_grid("010\n11\n010\n", bit).is_err());
        assert!(parse_grid("", bit).is_err());
        assert!(parse_grid("\n   \n", bit).is_err());
    }

    #[test]
    fn test_parse_multiple_grids() {
        let content = "\n01\n10\n\n\n111\n000\n\n";
        let grids = parse_grids(content, bit).unwrap();

        assert_eq!(grids.len(), 2);
        assert_eq!(grids[0].dimensions(), (2, 2));
        assert_eq!(grids[1].dimensions(), (2, 3));
        assert_eq!(grids[1].count(|&cell| cell), 3);
    }

    #[test]
    fn test_parse_multiple_grids_reports_index() {
        let err = parse_grids("01\n10\n\n0x\n", bit).unwrap_err();
        assert!(err.to_string().contains("#2"));
    }

    #[test]
    fn test_parse_grids_rejects_blank_content() {
        assert!(parse_grids("", bit).is_err());
        let err = parse_grids("\n  \n\n", bit).unwrap_err();
        assert!(err.to_string().contains("No grids found"));
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/grid.txt");

        let original = Grid::from_rows(vec![vec![true, false, true], vec![false, true, false]])
            .unwrap();
        save_grid_to_file(&original, render, &file_path).unwrap();

        let loaded = load_grid_from_file(&file_path, bit).unwrap();
        assert_eq!(original, loaded);

        assert!(load_grid_from_file(temp_dir.path().join("missing.txt"), bit).is_err());
    }
}
