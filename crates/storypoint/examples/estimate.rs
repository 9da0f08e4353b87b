//! Example: build a prompt from a historical CSV and estimate a story.
//!
//! Usage:
//!   cargo run --example estimate -- <history.csv> "<summary>"
//!
//! Requires `GEMINI_API_KEY`.

use std::env;

use storypoint::{Diagnostics, Estimator, GeminiProvider, NewStoryRequest};

fn main() -> storypoint::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: cargo run --example estimate -- <history.csv> \"<summary>\"");
        std::process::exit(1);
    }

    let estimator = Estimator::new().with_llm(GeminiProvider::from_env()?);

    let mut diagnostics = Diagnostics::new();
    let history = estimator.load_history(&args[1], &mut diagnostics)?;
    let summary = history.summary();
    println!(
        "Loaded {} stories (points {} - {})",
        summary.row_count,
        summary.min_points.unwrap_or_default(),
        summary.max_points.unwrap_or_default()
    );

    let story = NewStoryRequest::new(args[2].as_str(), "", "");
    let estimation = estimator.estimate(&story, &history, &mut diagnostics)?;

    for event in diagnostics.events() {
        println!("note: {}", event);
    }

    let separator = "=".repeat(30);
    println!("{}", separator);
    println!("{}", estimation.response);
    println!("{}", separator);

    Ok(())
}
