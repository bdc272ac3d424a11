//! Running a seat layout to its fixed point

use super::{Seat, SeatRule, Visibility};
use crate::automaton::{Automaton, Grid};
use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::time::{Duration, Instant};

/// A named seat layout paired with the rule that governs it
pub struct SeatingSimulation {
    name: String,
    automaton: Automaton<Seat, SeatRule>,
}

/// Outcome of a finished simulation
#[derive(Debug, Clone, Serialize)]
pub struct SeatingReport {
    pub name: String,
    pub visibility: Visibility,
    pub tolerance: usize,
    pub width: usize,
    pub height: usize,
    /// Generation at which the layout stopped changing
    pub generations: usize,
    pub occupied: usize,
    pub final_layout: Grid<Seat>,
    #[serde(skip)]
    pub duration: Duration,
}

/// Compact form of a report, used for summary files
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub name: String,
    pub visibility: Visibility,
    pub generations: usize,
    pub occupied: usize,
    pub duration_ms: u64,
}

impl SeatingSimulation {
    pub fn new(name: impl Into<String>, layout: Grid<Seat>, rule: SeatRule) -> Self {
        Self {
            name: name.into(),
            automaton: Automaton::new(layout, rule),
        }
    }

    pub fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.automaton = self.automaton.with_max_generations(max_generations);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> &Grid<Seat> {
        self.automaton.grid()
    }

    pub fn run(&self) -> Result<SeatingReport> {
        self.run_with(|_, _| {})
    }

    /// Run to the fixed point, calling `observer` once per generation
    pub fn run_with<F>(&self, observer: F) -> Result<SeatingReport>
    where
        F: FnMut(usize, &Grid<Seat>),
    {
        let start_time = Instant::now();
        let rule = *self.automaton.rule();

        let fixed_point = self
            .automaton
            .stabilize_with(observer)
            .with_context(|| {
                format!("Layout '{}' ({} rule) did not settle", self.name, rule.visibility)
            })?;

        let duration = start_time.elapsed();
        let occupied = fixed_point.grid.count(|seat| seat.is_occupied());

        info!(
            "{}: settled after {} generations with {} occupied seats ({:.3}s)",
            self.name,
            fixed_point.generation,
            occupied,
            duration.as_secs_f64()
        );

        Ok(SeatingReport {
            name: self.name.clone(),
            visibility: rule.visibility,
            tolerance: rule.tolerance,
            width: fixed_point.grid.width(),
            height: fixed_point.grid.height(),
            generations: fixed_point.generation,
            occupied,
            final_layout: fixed_point.grid,
            duration,
        })
    }
}

impl SeatingReport {
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            name: self.name.clone(),
            visibility: self.visibility,
            generations: self.generations,
            occupied: self.occupied,
            duration_ms: u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write report: {}", path.as_ref().display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::io::parse_grid;
    use crate::automaton::AutomatonError;
    use crate::seating::EXAMPLE_LAYOUT;

    fn example() -> Grid<Seat> {
        parse_grid(EXAMPLE_LAYOUT, Seat::from_symbol).unwrap()
    }

    #[test]
    fn test_adjacent_rule_settles() {
        let report = SeatingSimulation::new("example", example(), SeatRule::adjacent())
            .run()
            .unwrap();

        assert_eq!(report.occupied, 37);
        assert_eq!(report.generations, 6);
        assert_eq!((report.width, report.height), (10, 10));
    }

    #[test]
    fn test_line_of_sight_rule_settles() {
        let report = SeatingSimulation::new("example", example(), SeatRule::line_of_sight())
            .run()
            .unwrap();

        assert_eq!(report.occupied, 26);
        assert_eq!(report.generations, 7);
    }

    #[test]
    fn test_first_generation_fills_every_seat() {
        let simulation = SeatingSimulation::new("example", example(), SeatRule::adjacent());
        let mut first = None;
        simulation
            .run_with(|generation, grid| {
                if generation == 1 {
                    first = Some(grid.clone());
                }
            })
            .unwrap();

        let first = first.unwrap();
        assert_eq!(first.count(|seat| seat.is_occupied()), 71);
        assert_eq!(first.count(|&seat| seat == Seat::Empty), 0);
    }

    #[test]
    fn test_cap_surfaces_non_convergence() {
        let err = SeatingSimulation::new("example", example(), SeatRule::adjacent())
            .with_max_generations(3)
            .run()
            .unwrap_err();

        assert!(err.to_string().contains("did not settle"));
        assert!(matches!(
            err.downcast_ref::<AutomatonError>(),
            Some(AutomatonError::NonConvergence { generations: 3 })
        ));
    }

    #[test]
    fn test_report_json() {
        let report = SeatingSimulation::new("example", example(), SeatRule::adjacent())
            .run()
            .unwrap();
        let json = report.to_json().unwrap();

        assert!(json.contains("\"occupied\": 37"));
        assert!(json.contains("\"visibility\": \"adjacent\""));
        assert_eq!(report.summary().occupied, 37);
    }

    #[test]
    fn test_summary_saturates_long_duration() {
        let mut report = SeatingSimulation::new("example", example(), SeatRule::adjacent())
            .run()
            .unwrap();

        report.duration = Duration::from_millis(1500);
        assert_eq!(report.summary().duration_ms, 1500);

        report.duration = Duration::MAX;
        assert_eq!(report.summary().duration_ms, u64::MAX);
    }
}
