//! Prompt command - print the prompt without calling the model.

use std::path::PathBuf;

use storypoint::{Estimator, GeminiModel};

use super::input;
use crate::cli::{DEFAULT_DATA_PATH, PromptArgs, StoryArgs};
use crate::logging::TracingSink;

pub fn run(
    story_args: StoryArgs,
    prompt_args: PromptArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let estimator =
        Estimator::with_config(input::build_config(&prompt_args, GeminiModel::default()));

    let data_path = story_args
        .data
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
    let mut sink = TracingSink;
    let history = estimator
        .load_history(&data_path, &mut sink)
        .map_err(|e| e.user_message())?;

    let story = input::resolve_story(&story_args, false)?;
    if story.is_missing_summary() {
        return Err("Summary is required.".into());
    }

    let prompt = estimator.build_prompt(&story, &history, &mut sink);
    if verbose {
        tracing::debug!(
            examples = prompt.examples_used,
            chars = prompt.text.chars().count(),
            "built prompt"
        );
    }
    println!("{}", prompt);

    Ok(())
}
