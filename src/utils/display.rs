//! Display and output formatting utilities

use crate::automaton::Grid;
use crate::config::OutputFormat;
use crate::seating::{layout_to_string, Seat, SeatingReport};
use anyhow::{Context, Result};
use std::fmt::Display;
use std::path::Path;

/// Formats simulation reports for the console and for files
pub struct ReportFormatter;

impl ReportFormatter {
    /// Format a single report for console output
    pub fn format_report(report: &SeatingReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== {} ===\n", report.name));
        output.push_str(&format!("Rule: {} (tolerance {})\n", report.visibility, report.tolerance));
        output.push_str(&format!("Layout: {}x{}\n", report.width, report.height));
        output.push_str(&format!("Stable after: {} generations\n", report.generations));
        output.push_str(&format!("Occupied seats: {}\n", report.occupied));
        output.push_str(&format!("Time: {:.3}s\n", report.duration.as_secs_f64()));
        output.push('\n');
        output.push_str("Final layout:\n");
        output.push_str(&layout_to_string(&report.final_layout));

        output
    }

    /// Format several reports as a summary table
    pub fn format_summary(reports: &[SeatingReport]) -> String {
        let mut output = String::new();

        output.push_str("Summary:\n");
        output.push_str("Layout           | Rule          | Gens | Occupied\n");
        output.push_str("-----------------|---------------|------|---------\n");

        for report in reports {
            output.push_str(&format!(
                "{:16} | {:13} | {:4} | {}\n",
                report.name,
                report.visibility.to_string(),
                report.generations,
                report.occupied
            ));
        }

        output
    }

    /// Format one generation as printed by the evolution observer
    pub fn format_generation(name: &str, generation: usize, grid: &Grid<Seat>) -> String {
        format!(
            "{} - generation {} ({} occupied):\n{}",
            name,
            generation,
            grid.count(|seat| seat.is_occupied()),
            grid
        )
    }

    /// Format a grid with row and column numbers
    pub fn format_grid_with_coords<T: Display>(grid: &Grid<T>) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{}", x % 10));
        }
        output.push('\n');

        for (y, row) in grid.rows().enumerate() {
            output.push_str(&format!("{:2} ", y));
            for cell in row {
                output.push_str(&cell.to_string());
            }
            output.push('\n');
        }

        output
    }

    /// Save reports to `output_dir` in the requested format
    pub fn save_reports<P: AsRef<Path>>(
        reports: &[SeatingReport],
        output_dir: P,
        format: OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        match format {
            OutputFormat::Text => {
                for (i, report) in reports.iter().enumerate() {
                    let filepath = output_dir.join(format!("report_{:03}.txt", i + 1));
                    std::fs::write(&filepath, Self::format_report(report))
                        .with_context(|| format!("Failed to write {}", filepath.display()))?;
                }
                std::fs::write(output_dir.join("summary.txt"), Self::format_summary(reports))
                    .context("Failed to write summary.txt")?;
            }
            OutputFormat::Json => {
                for (i, report) in reports.iter().enumerate() {
                    report.save_to_file(output_dir.join(format!("report_{:03}.json", i + 1)))?;
                }

                let summaries: Vec<_> = reports.iter().map(SeatingReport::summary).collect();
                let summary_json = serde_json::to_string_pretty(&summaries)?;
                std::fs::write(output_dir.join("summary.json"), summary_json)
                    .context("Failed to write summary.json")?;
            }
        }

        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }

    pub fn heading(text: &str) -> String {
        Self::colored(text, Color::Cyan)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Cyan => 36,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seating::{parse_layout, SeatRule, SeatingSimulation, EXAMPLE_LAYOUT};
    use tempfile::tempdir;

    fn example_report() -> SeatingReport {
        let layout = parse_layout(EXAMPLE_LAYOUT).unwrap();
        SeatingSimulation::new("example", layout, SeatRule::adjacent())
            .run()
            .unwrap()
    }

    #[test]
    fn test_grid_with_coords() {
        let grid = parse_layout("L.#\n#.L\n").unwrap();
        let formatted = ReportFormatter::format_grid_with_coords(&grid);

        assert_eq!(formatted, "   012\n 0 L.#\n 1 #.L\n");
    }

    #[test]
    fn test_report_formatting() {
        let report = example_report();

        let details = ReportFormatter::format_report(&report);
        assert!(details.contains("Occupied seats: 37"));
        assert!(details.contains("Rule: adjacent (tolerance 4)"));

        let summary = ReportFormatter::format_summary(&[report]);
        assert!(summary.contains("example"));
        assert!(summary.lines().count() == 4);
    }

    #[test]
    fn test_save_reports() {
        let temp_dir = tempdir().unwrap();
        let reports = vec![example_report()];

        ReportFormatter::save_reports(&reports, temp_dir.path().join("text"), OutputFormat::Text)
            .unwrap();
        assert!(temp_dir.path().join("text/report_001.txt").exists());
        assert!(temp_dir.path().join("text/summary.txt").exists());

        ReportFormatter::save_reports(&reports, temp_dir.path().join("json"), OutputFormat::Json)
            .unwrap();
        let summary = std::fs::read_to_string(temp_dir.path().join("json/summary.json")).unwrap();
        assert!(summary.contains("\"occupied\": 37"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
