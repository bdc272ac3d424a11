//! Configuration settings for the seating simulator

use crate::automaton::DEFAULT_MAX_GENERATIONS;
use crate::seating::{SeatRule, Visibility};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub max_generations: usize,
    pub visibility: Visibility,
    pub tolerance: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub layout_files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_evolution: bool,
    /// Reports are only written when this is set
    #[serde(default)]
    pub output_directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                max_generations: DEFAULT_MAX_GENERATIONS,
                visibility: Visibility::Adjacent,
                tolerance: 4,
            },
            input: InputConfig {
                layout_files: vec![PathBuf::from("input/layouts/example.txt")],
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                show_evolution: false,
                output_directory: None,
            },
        }
    }
}

impl SimulationConfig {
    pub fn rule(&self) -> SeatRule {
        SeatRule::new(self.visibility, self.tolerance)
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.simulation.max_generations == 0 {
            anyhow::bail!("Maximum generations must be positive");
        }

        if !(1..=8).contains(&self.simulation.tolerance) {
            anyhow::bail!(
                "Tolerance must be between 1 and 8, got {}",
                self.simulation.tolerance
            );
        }

        if self.input.layout_files.is_empty() {
            anyhow::bail!("At least one layout file is required");
        }

        if let Some(missing) = self.input.layout_files.iter().find(|path| !path.exists()) {
            anyhow::bail!("Layout file does not exist: {}", missing.display());
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(max_generations) = cli_overrides.max_generations {
            self.simulation.max_generations = max_generations;
        }
        if let Some(visibility) = cli_overrides.visibility {
            self.simulation.visibility = visibility;
            // Switching visibility without an explicit tolerance picks that variant's default
            if cli_overrides.tolerance.is_none() {
                self.simulation.tolerance = match visibility {
                    Visibility::Adjacent => SeatRule::adjacent().tolerance,
                    Visibility::LineOfSight => SeatRule::line_of_sight().tolerance,
                };
            }
        }
        if let Some(tolerance) = cli_overrides.tolerance {
            self.simulation.tolerance = tolerance;
        }
        if !cli_overrides.layout_files.is_empty() {
            self.input.layout_files = cli_overrides.layout_files.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = Some(output_dir.clone());
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if cli_overrides.show_evolution {
            self.output.show_evolution = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub max_generations: Option<usize>,
    pub visibility: Option<Visibility>,
    pub tolerance: Option<usize>,
    pub layout_files: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub show_evolution: bool,
}
