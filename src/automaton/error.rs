//! Error type for grid construction and fixed-point search

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    #[error("row {row} has length {length}, expected {expected}")]
    RaggedRow {
        row: usize,
        length: usize,
        expected: usize,
    },

    #[error("coordinates ({row}, {col}) out of bounds for {height}x{width} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    /// No two consecutive generations were equal within the configured cap.
    #[error("automaton did not stabilize within {generations} generations")]
    NonConvergence { generations: usize },
}
