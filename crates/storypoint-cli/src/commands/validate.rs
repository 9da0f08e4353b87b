//! Validate command - check a historical data file and show its summary.

use std::path::PathBuf;

use colored::Colorize;
use storypoint::validation::REQUIRED_COLUMNS;
use storypoint::{Diagnostics, Estimator};

pub fn run(file: PathBuf, json: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut diagnostics = Diagnostics::new();

    let history = match Estimator::new().load_history(&file, &mut diagnostics) {
        Ok(history) => history,
        Err(e) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "valid": false, "error": e.to_string() })
                );
            } else {
                println!(
                    "{} {}",
                    "✗".red().bold(),
                    "CSV validation failed. Please check the format.".red()
                );
                println!("  {}", e);
                println!("  Required columns: {}", REQUIRED_COLUMNS.join(", "));
            }
            return Err(e.user_message().into());
        }
    };

    let summary = history.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} Loaded and validated {} stories",
        "✓".green().bold(),
        summary.row_count.to_string().white().bold()
    );
    if let (Some(min), Some(max)) = (summary.min_points, summary.max_points) {
        println!("  Story points range: {} - {}", min, max);
    }
    if summary.dropped_rows > 0 {
        println!(
            "  {} {} rows dropped (missing or invalid values)",
            "Note:".yellow(),
            summary.dropped_rows
        );
    }

    if verbose {
        println!();
        for story in history.stories() {
            println!("  {:>2}  {}", story.story_points, story.summary);
        }
        for event in diagnostics.events() {
            println!("  {} {}", "note:".dimmed(), event);
        }
    }

    Ok(())
}
