//! Generic cellular automaton engine

pub mod engine;
pub mod error;
pub mod grid;
pub mod io;

pub use engine::{Automaton, FixedPoint, Generations, Rule, DEFAULT_MAX_GENERATIONS};
pub use error::AutomatonError;
pub use grid::{Grid, DIRECTIONS};
