//! Seat occupancy rules

use super::Seat;
use crate::automaton::{Grid, Rule, DIRECTIONS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which seats a passenger takes into account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    /// The 8 immediately surrounding positions
    Adjacent,
    /// The first seat met in each of the 8 directions, skipping floor
    LineOfSight,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Adjacent => write!(f, "adjacent"),
            Visibility::LineOfSight => write!(f, "line-of-sight"),
        }
    }
}

/// Seat update rule.
///
/// Floor never changes. An empty seat with no visible occupied seat becomes
/// occupied; an occupied seat with at least `tolerance` visible occupied
/// seats is vacated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRule {
    pub visibility: Visibility,
    pub tolerance: usize,
}

impl SeatRule {
    pub fn new(visibility: Visibility, tolerance: usize) -> Self {
        Self {
            visibility,
            tolerance,
        }
    }

    pub fn adjacent() -> Self {
        Self::new(Visibility::Adjacent, 4)
    }

    pub fn line_of_sight() -> Self {
        Self::new(Visibility::LineOfSight, 5)
    }

    /// Number of occupied seats visible from `(row, col)`
    pub fn visible_occupied(&self, grid: &Grid<Seat>, row: usize, col: usize) -> usize {
        match self.visibility {
            Visibility::Adjacent => grid.count_neighbours(row, col, |seat| seat.is_occupied()),
            Visibility::LineOfSight => DIRECTIONS
                .iter()
                .filter(|&&direction| {
                    grid.ray(row, col, direction)
                        .find(|seat| seat.is_seat())
                        .is_some_and(|seat| seat.is_occupied())
                })
                .count(),
        }
    }
}

impl Rule<Seat> for SeatRule {
    fn next_value(&self, grid: &Grid<Seat>, value: &Seat, row: usize, col: usize) -> Seat {
        match value {
            Seat::Floor => Seat::Floor,
            Seat::Empty if self.visible_occupied(grid, row, col) == 0 => Seat::Occupied,
            Seat::Occupied if self.visible_occupied(grid, row, col) >= self.tolerance => Seat::Empty,
            other => *other,
        }
    }
}
