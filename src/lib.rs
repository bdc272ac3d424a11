//! Seating Automaton
//!
//! A generic cellular automaton engine (grid of cells, pure update rule,
//! bounded fixed-point search) and the seat layout simulation built on it.

pub mod automaton;
pub mod config;
pub mod seating;
pub mod utils;

pub use automaton::{Automaton, AutomatonError, Grid, Rule};
pub use config::Settings;
pub use seating::{SeatingReport, SeatingSimulation};

use anyhow::Result;

/// Build one simulation per layout found in the configured layout files.
/// Files holding several layouts get `name#1`, `name#2`, ... labels.
pub fn load_simulations(settings: &Settings) -> Result<Vec<SeatingSimulation>> {
    let rule = settings.simulation.rule();
    let mut simulations = Vec::new();

    for path in &settings.input.layout_files {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("layout");
        let layouts = seating::load_layouts(path)?;
        let count = layouts.len();

        for (idx, layout) in layouts.into_iter().enumerate() {
            let label = if count == 1 {
                name.to_string()
            } else {
                format!("{}#{}", name, idx + 1)
            };
            simulations.push(
                SeatingSimulation::new(label, layout, rule)
                    .with_max_generations(settings.simulation.max_generations),
            );
        }
    }

    Ok(simulations)
}
