//! Generation stepping and fixed-point search

use super::{AutomatonError, Grid};
use itertools::Itertools;
use log::{debug, trace, warn};

/// Default cap on the number of evolutions `stabilize` will attempt
pub const DEFAULT_MAX_GENERATIONS: usize = 10_000;

/// Computes the next value of a single cell.
///
/// Implementations must be pure: the result may depend only on the grid
/// and the coordinates, otherwise the fixed-point check is meaningless.
pub trait Rule<T> {
    fn next_value(&self, grid: &Grid<T>, value: &T, row: usize, col: usize) -> T;
}

impl<T, F> Rule<T> for F
where
    F: Fn(&Grid<T>, &T, usize, usize) -> T,
{
    fn next_value(&self, grid: &Grid<T>, value: &T, row: usize, col: usize) -> T {
        self(grid, value, row, col)
    }
}

/// A grid paired with the rule that evolves it
#[derive(Debug, Clone)]
pub struct Automaton<T, R> {
    grid: Grid<T>,
    rule: R,
    max_generations: usize,
}

/// A generation equal to its immediate predecessor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPoint<T> {
    /// Index of the stable generation; the initial grid is generation 0.
    pub generation: usize,
    pub grid: Grid<T>,
}

impl<T, R> Automaton<T, R>
where
    T: Clone + PartialEq,
    R: Rule<T>,
{
    pub fn new(grid: Grid<T>, rule: R) -> Self {
        Self {
            grid,
            rule,
            max_generations: DEFAULT_MAX_GENERATIONS,
        }
    }

    /// Limit how many evolutions `stabilize` may perform before giving up
    pub fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = max_generations;
        self
    }

    pub fn grid(&self) -> &Grid<T> {
        &self.grid
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn max_generations(&self) -> usize {
        self.max_generations
    }

    /// The generation following the current grid
    pub fn evolve(&self) -> Grid<T> {
        step(&self.rule, &self.grid)
    }

    /// Replace the current grid with its successor
    pub fn advance(&mut self) {
        self.grid = self.evolve();
    }

    /// Lazy sequence of generations starting with the current grid
    pub fn generations(&self) -> Generations<'_, T, R> {
        Generations {
            rule: &self.rule,
            seed: Some(self.grid.clone()),
            last: None,
        }
    }

    /// Run until two consecutive generations are equal
    pub fn stabilize(&self) -> Result<FixedPoint<T>, AutomatonError> {
        self.stabilize_with(|_, _| {})
    }

    /// Like [`stabilize`](Self::stabilize), calling `observer` once for every
    /// generation produced, the initial grid included
    pub fn stabilize_with<F>(&self, mut observer: F) -> Result<FixedPoint<T>, AutomatonError>
    where
        F: FnMut(usize, &Grid<T>),
    {
        let found = self
            .generations()
            .take(self.max_generations.saturating_add(1))
            .enumerate()
            .inspect(|(generation, grid)| {
                trace!("generation {}", generation);
                observer(*generation, grid);
            })
            .tuple_windows::<(_, _)>()
            .find(|((_, before), (_, after))| before == after)
            .map(|(_, (generation, grid))| FixedPoint { generation, grid });

        match found {
            Some(fixed_point) => {
                debug!("stabilized at generation {}", fixed_point.generation);
                Ok(fixed_point)
            }
            None => {
                warn!(
                    "no fixed point within {} generations",
                    self.max_generations
                );
                Err(AutomatonError::NonConvergence {
                    generations: self.max_generations,
                })
            }
        }
    }
}

/// Apply a rule to every cell, reading only from `current`
fn step<T, R: Rule<T>>(rule: &R, current: &Grid<T>) -> Grid<T> {
    current.map_indexed(|value, row, col| rule.next_value(current, value, row, col))
}

/// Unbounded iterator over successive generations
pub struct Generations<'a, T, R> {
    rule: &'a R,
    seed: Option<Grid<T>>,
    last: Option<Grid<T>>,
}

impl<T, R> Iterator for Generations<'_, T, R>
where
    T: Clone,
    R: Rule<T>,
{
    type Item = Grid<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = match (self.seed.take(), &self.last) {
            (Some(seed), _) => seed,
            (None, Some(last)) => step(self.rule, last),
            (None, None) => return None,
        };
        self.last = Some(next.clone());
        Some(next)
    }
}
