//! Rectangular grid of cells with clipped neighbour lookup

use super::AutomatonError;
use itertools::iproduct;
use serde::Serialize;
use std::fmt;

/// The 8 offsets of the Moore neighbourhood, row-major, centre excluded.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A rectangular, row-major grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Create a grid from rows of equal length
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, AutomatonError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if height == 0 || width == 0 {
            return Err(AutomatonError::EmptyGrid);
        }

        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(AutomatonError::RaggedRow {
                row,
                length: cells.len(),
                expected: width,
            });
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Create a `height` x `width` grid with every cell set to `value`
    pub fn filled(height: usize, width: usize, value: T) -> Result<Self, AutomatonError>
    where
        T: Clone,
    {
        if width == 0 || height == 0 {
            return Err(AutomatonError::EmptyGrid);
        }

        Ok(Self {
            width,
            height,
            cells: vec![value; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(height, width)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Whether a signed coordinate lies inside the grid
    #[inline]
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.height && col < self.width {
            Some(&self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// Set a cell value in place. Meant for building seeds, not for evolution.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), AutomatonError> {
        if row >= self.height || col >= self.width {
            return Err(AutomatonError::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        let idx = self.index(row, col);
        self.cells[idx] = value;
        Ok(())
    }

    fn offset(&self, row: usize, col: usize, (dr, dc): (isize, isize)) -> Option<&T> {
        let r = row as isize + dr;
        let c = col as isize + dc;
        if self.contains(r, c) {
            Some(&self.cells[self.index(r as usize, c as usize)])
        } else {
            None
        }
    }

    /// Values of the cells surrounding `(row, col)`, clipped at the edges
    pub fn neighbours(&self, row: usize, col: usize) -> impl Iterator<Item = &T> + '_ {
        iproduct!(-1isize..=1, -1isize..=1)
            .filter(|&offset| offset != (0, 0))
            .filter_map(move |offset| self.offset(row, col, offset))
    }

    /// Count neighbours matching a predicate
    pub fn count_neighbours<P>(&self, row: usize, col: usize, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.neighbours(row, col).filter(|&cell| predicate(cell)).count()
    }

    /// Cells met walking away from `(row, col)` in one direction, up to the edge
    pub fn ray(
        &self,
        row: usize,
        col: usize,
        direction: (isize, isize),
    ) -> impl Iterator<Item = &T> + '_ {
        (1isize..)
            .map(move |step| self.offset(row, col, (direction.0 * step, direction.1 * step)))
            .take_while(Option::is_some)
            .flatten()
    }

    /// All cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.cells.iter()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Count cells matching a predicate
    pub fn count<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.cells.iter().filter(|&cell| predicate(cell)).count()
    }

    /// Build a grid of the same dimensions from a function of each cell and its coordinates
    pub fn map_indexed<U, F>(&self, mut f: F) -> Grid<U>
    where
        F: FnMut(&T, usize, usize) -> U,
    {
        let width = self.width;
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| f(cell, idx / width, idx % width))
            .collect();

        Grid {
            width,
            height: self.height,
            cells,
        }
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for Grid<T> {
    type Error = AutomatonError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
