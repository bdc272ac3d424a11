//! Seat cell type

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single position in a seat layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    Floor,
    Empty,
    Occupied,
}

impl Seat {
    pub fn symbol(self) -> char {
        match self {
            Seat::Floor => '.',
            Seat::Empty => 'L',
            Seat::Occupied => '#',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Seat::Floor),
            'L' => Some(Seat::Empty),
            '#' => Some(Seat::Occupied),
            _ => None,
        }
    }

    pub fn is_occupied(self) -> bool {
        self == Seat::Occupied
    }

    pub fn is_seat(self) -> bool {
        self != Seat::Floor
    }
}

impl TryFrom<char> for Seat {
    type Error = char;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Self::from_symbol(symbol).ok_or(symbol)
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
