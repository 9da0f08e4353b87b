//! Estimate command - the interactive estimation flow.

use colored::Colorize;
use storypoint::{Estimator, GeminiModel, GeminiProvider};

use super::input;
use crate::cli::{PromptArgs, StoryArgs};
use crate::logging::TracingSink;

pub fn run(
    story_args: StoryArgs,
    prompt_args: PromptArgs,
    model: GeminiModel,
    api_key: Option<String>,
    show_prompt: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{}",
        "Welcome to the AI Story Point Estimator (Gemini Powered).".cyan().bold()
    );

    let api_key = input::resolve_api_key(api_key)?;
    let config = input::build_config(&prompt_args, model);
    let provider = GeminiProvider::with_config(api_key, config.llm.clone())?;
    let estimator = Estimator::with_config(config).with_llm(provider);

    let data_path = input::resolve_data_path(story_args.data.clone())?;
    let mut sink = TracingSink;
    let history = estimator
        .load_history(&data_path, &mut sink)
        .map_err(|e| e.user_message())?;

    if verbose {
        let summary = history.summary();
        println!(
            "Loaded {} stories from {}",
            summary.row_count,
            data_path.display()
        );
    }

    let story = input::resolve_story(&story_args, true)?;
    if story.is_missing_summary() {
        return Err("Summary is required.".into());
    }

    if show_prompt {
        println!();
        println!("{}", estimator.build_prompt(&story, &history, &mut sink));
    }

    println!();
    println!("{}", "Analyzing and Estimating...".yellow());

    let estimation = estimator
        .estimate(&story, &history, &mut sink)
        .map_err(|e| format!("Error calling Gemini API: {}", e))?;

    let separator = "=".repeat(30);
    println!();
    println!("{}", separator);
    println!("{}", estimation.response);
    println!("{}", separator);

    if verbose {
        println!(
            "Model: {}  Examples used: {}",
            estimation.model, estimation.examples_used
        );
    }

    Ok(())
}
