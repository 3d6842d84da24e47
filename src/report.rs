//! Text rendering and saving of batch results.
//!
//! Per heuristic the report shows mean and population standard deviation of
//! path cost, nodes expanded and seconds per search, followed by the
//! solved/failed tally. Failed searches are excluded from the averages.

use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::batch::{BatchReport, HeuristicSummary};

/// Formats the whole batch report.
pub fn format_report(report: &BatchReport) -> String {
    let mut output = format!("Compared heuristics on {} puzzles\n", report.puzzles);
    for summary in &report.summaries {
        output.push('\n');
        output.push_str(&format_summary(summary));
    }
    output
}

/// Formats the block for a single heuristic.
pub fn format_summary(summary: &HeuristicSummary) -> String {
    let cost = summary.cost_stats();
    let expanded = summary.expanded_stats();
    let time = summary.time_stats();

    // writing to a String cannot fail
    let mut output = String::new();
    let _ = writeln!(output, "{} Heuristic:", summary.heuristic);
    let _ = writeln!(
        output,
        "Average cost: {:.2}, Std Dev: {:.2}",
        cost.mean, cost.std_dev
    );
    let _ = writeln!(
        output,
        "Average expanded nodes: {:.2}, Std Dev: {:.2}",
        expanded.mean, expanded.std_dev
    );
    let _ = writeln!(
        output,
        "Average time: {:.4} seconds, Std Dev: {:.4}",
        time.mean, time.std_dev
    );
    let _ = writeln!(
        output,
        "Solved: {}, Failed: {}",
        summary.solved(),
        summary.failed
    );
    output
}

/// Writes the formatted report to `path`, replacing any existing file.
pub fn save(path: &Path, report: &BatchReport) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(format_report(report).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::batch::Trial;
    use crate::heuristics::Heuristic;

    fn trial(cost: u32, expanded: usize, millis: u64) -> Trial {
        Trial {
            cost,
            expanded,
            elapsed: Duration::from_millis(millis),
        }
    }

    fn sample_report() -> BatchReport {
        BatchReport {
            puzzles: 3,
            summaries: vec![
                HeuristicSummary {
                    heuristic: Heuristic::Hamming,
                    trials: vec![trial(2, 3, 10), trial(4, 7, 30)],
                    failed: 1,
                },
                HeuristicSummary {
                    heuristic: Heuristic::Manhattan,
                    trials: vec![trial(2, 2, 5), trial(4, 5, 15)],
                    failed: 0,
                },
            ],
        }
    }

    #[test]
    fn test_report_snapshot() {
        insta::assert_snapshot!(format_report(&sample_report()), @r"
        Compared heuristics on 3 puzzles

        Hamming Heuristic:
        Average cost: 3.00, Std Dev: 1.00
        Average expanded nodes: 5.00, Std Dev: 2.00
        Average time: 0.0200 seconds, Std Dev: 0.0100
        Solved: 2, Failed: 1

        Manhattan Heuristic:
        Average cost: 3.00, Std Dev: 1.00
        Average expanded nodes: 3.50, Std Dev: 1.50
        Average time: 0.0100 seconds, Std Dev: 0.0050
        Solved: 2, Failed: 0
        ");
    }

    #[test]
    fn test_empty_summary() {
        let summary = HeuristicSummary::new(Heuristic::Manhattan);
        let text = format_summary(&summary);
        assert!(text.contains("Average cost: 0.00, Std Dev: 0.00"));
        assert!(text.ends_with("Solved: 0, Failed: 0\n"));
    }

    #[test]
    fn test_save_writes_report() {
        let path = std::env::temp_dir().join(format!("eight-puzzle-report-{}.txt", std::process::id()));
        save(&path, &sample_report()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(written, format_report(&sample_report()));
    }
}
