//! Command line front end for the seating simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, LevelFilter};
use rayon::prelude::*;
use seating_automaton::{
    config::{CliOverrides, OutputFormat, Settings},
    load_simulations,
    seating::{self, create_example_layouts, SeatingReport, SeatingSimulation, Visibility},
    utils::{ColorOutput, ReportFormatter},
};
use simple_logger::SimpleLogger;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "seating")]
#[command(about = "Run seat layouts through a cellular automaton until they settle")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum VisibilityArg {
    Adjacent,
    LineOfSight,
}

impl From<VisibilityArg> for Visibility {
    fn from(arg: VisibilityArg) -> Self {
        match arg {
            VisibilityArg::Adjacent => Visibility::Adjacent,
            VisibilityArg::LineOfSight => Visibility::LineOfSight,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate seat layouts until they stop changing
    Simulate {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Layout files (override config)
        #[arg(short, long)]
        layout: Vec<PathBuf>,

        /// Which seats are taken into account (overrides config)
        #[arg(long, value_enum)]
        visibility: Option<VisibilityArg>,

        /// Occupied seats that make a passenger leave (overrides config)
        #[arg(short, long)]
        tolerance: Option<usize>,

        /// Give up after this many generations (overrides config)
        #[arg(short, long)]
        max_generations: Option<usize>,

        /// Directory to save reports to (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Print every generation
        #[arg(long)]
        show_evolution: bool,
    },

    /// Create an example configuration and layouts
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Print layouts with coordinates and seat counts
    Inspect {
        /// Layout file
        #[arg(short, long)]
        layout: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("Failed to initialise logger")?;

    match cli.command {
        Commands::Simulate {
            config,
            layout,
            visibility,
            tolerance,
            max_generations,
            output,
            format,
            show_evolution,
        } => {
            let overrides = CliOverrides {
                max_generations,
                visibility: visibility.map(Visibility::from),
                tolerance,
                layout_files: layout,
                output_dir: output,
                format: format.map(OutputFormat::from),
                show_evolution,
            };
            simulate_command(&config, &overrides)
        }
        Commands::Setup { directory, force } => setup_command(&directory, force),
        Commands::Inspect { layout } => inspect_command(&layout),
    }
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn simulate_command(config_path: &Path, overrides: &CliOverrides) -> Result<()> {
    let mut settings = load_settings(config_path)?;
    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;

    debug!("Settings: {:?}", settings);

    let rule = settings.simulation.rule();
    println!(
        "{}",
        ColorOutput::info(&format!(
            "Simulating {} file(s) with the {} rule (tolerance {})",
            settings.input.layout_files.len(),
            rule.visibility,
            rule.tolerance
        ))
    );

    let simulations = load_simulations(&settings)?;

    let start_time = Instant::now();
    let reports = if settings.output.show_evolution {
        // Frames must not interleave, so evolutions are printed one layout at a time
        simulations
            .iter()
            .map(|simulation| {
                simulation.run_with(|generation, grid| {
                    println!(
                        "{}",
                        ReportFormatter::format_generation(simulation.name(), generation, grid)
                    );
                })
            })
            .collect::<Result<Vec<SeatingReport>>>()?
    } else {
        simulations
            .par_iter()
            .map(SeatingSimulation::run)
            .collect::<Result<Vec<SeatingReport>>>()?
    };

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Settled {} layout(s) in {:.3}s",
            reports.len(),
            start_time.elapsed().as_secs_f64()
        ))
    );

    for report in &reports {
        println!("\n{}", ReportFormatter::format_report(report));
    }
    println!("{}", ReportFormatter::format_summary(&reports));

    if let Some(output_dir) = &settings.output.output_directory {
        ReportFormatter::save_reports(&reports, output_dir, settings.output.format)
            .context("Failed to save reports")?;
        println!(
            "{}",
            ColorOutput::success(&format!("Reports saved to {}", output_dir.display()))
        );
    }

    Ok(())
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/layouts");

    for dir in [&config_dir, &input_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let mut line_of_sight = Settings::default();
    line_of_sight.simulation.visibility = Visibility::LineOfSight;
    line_of_sight.simulation.tolerance = 5;
    line_of_sight.input.layout_files = vec![
        PathBuf::from("input/layouts/example.txt"),
        PathBuf::from("input/layouts/pair.txt"),
    ];
    line_of_sight.to_file(config_dir.join("line_of_sight.yaml"))?;

    create_example_layouts(&input_dir).context("Failed to create example layouts")?;
    println!("Created example layouts in: {}", input_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your layouts to {}", input_dir.display());
    println!("3. Run: seating simulate --config config/default.yaml");

    Ok(())
}

fn inspect_command(layout_path: &Path) -> Result<()> {
    let layouts = seating::load_layouts(layout_path)
        .with_context(|| format!("Failed to load layouts from {}", layout_path.display()))?;

    for (idx, layout) in layouts.iter().enumerate() {
        println!(
            "{}",
            ColorOutput::heading(&format!(
                "Layout {} ({}x{}):",
                idx + 1,
                layout.width(),
                layout.height()
            ))
        );
        println!("{}", ReportFormatter::format_grid_with_coords(layout));
        println!(
            "  Seats: {}  Occupied: {}  Floor: {}\n",
            layout.count(|seat| seat.is_seat()),
            layout.count(|seat| seat.is_occupied()),
            layout.count(|seat| !seat.is_seat())
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "seating",
            "simulate",
            "--config",
            "test.yaml",
            "--layout",
            "a.txt",
            "--layout",
            "b.txt",
            "--visibility",
            "line-of-sight",
            "--max-generations",
            "5",
        ])
        .unwrap();

        match cli.command {
            Commands::Simulate {
                layout,
                visibility,
                max_generations,
                ..
            } => {
                assert_eq!(layout.len(), 2);
                assert!(matches!(visibility, Some(VisibilityArg::LineOfSight)));
                assert_eq!(max_generations, Some(5));
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_setup_then_simulate() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path(), false).unwrap();

        let config_path = temp_dir.path().join("config/default.yaml");
        assert!(config_path.exists());
        assert!(temp_dir.path().join("input/layouts/example.txt").exists());

        let overrides = CliOverrides {
            layout_files: vec![
                temp_dir.path().join("input/layouts/example.txt"),
                temp_dir.path().join("input/layouts/pair.txt"),
            ],
            output_dir: Some(temp_dir.path().join("out")),
            format: Some(OutputFormat::Json),
            ..Default::default()
        };
        simulate_command(&config_path, &overrides).unwrap();

        assert!(temp_dir.path().join("out/summary.json").exists());
        assert!(temp_dir.path().join("out/report_003.json").exists());
    }

    #[test]
    fn test_inspect() {
        let temp_dir = tempdir().unwrap();
        create_example_layouts(temp_dir.path()).unwrap();
        assert!(inspect_command(&temp_dir.path().join("pair.txt")).is_ok());
        assert!(inspect_command(&temp_dir.path().join("missing.txt")).is_err());
    }
}
