//! Shared input handling: interactive prompts, API key and config resolution.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;
use storypoint::llm::API_KEY_ENV;
use storypoint::{
    EstimatorConfig, GeminiModel, LlmConfig, NewStoryRequest, PromptConfig, SanitizerConfig,
};

use crate::cli::{DEFAULT_DATA_PATH, PromptArgs, StoryArgs};

/// Print `label` and read one trimmed line from stdin.
pub fn ask(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Flag, then environment, then an interactive prompt.
pub fn resolve_api_key(flag: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    let key = match flag.or_else(|| std::env::var(API_KEY_ENV).ok()) {
        Some(k) => k.trim().to_string(),
        None => ask("Enter your Gemini API Key: ")?,
    };

    if key.is_empty() {
        return Err("API key is required.".into());
    }
    Ok(key)
}

/// Data path from the flag, or asked for with a default.
pub fn resolve_data_path(flag: Option<PathBuf>) -> io::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }

    let answer = ask(&format!(
        "Enter path to historical data CSV (default: {}): ",
        DEFAULT_DATA_PATH
    ))?;
    Ok(if answer.is_empty() {
        PathBuf::from(DEFAULT_DATA_PATH)
    } else {
        PathBuf::from(answer)
    })
}

/// Story fields from flags. When no field was given and `interactive` is
/// set, all three are asked for.
pub fn resolve_story(args: &StoryArgs, interactive: bool) -> io::Result<NewStoryRequest> {
    let any_given =
        args.summary.is_some() || args.description.is_some() || args.acceptance_criteria.is_some();

    if any_given || !interactive {
        return Ok(NewStoryRequest::new(
            args.summary.clone().unwrap_or_default(),
            args.description.clone().unwrap_or_default(),
            args.acceptance_criteria.clone().unwrap_or_default(),
        ));
    }

    println!();
    println!("{}", "--- New Story Details ---".cyan().bold());
    let summary = ask("Summary: ")?;
    let description = ask("Description: ")?;
    let acceptance_criteria = ask("Acceptance Criteria: ")?;

    Ok(NewStoryRequest::new(summary, description, acceptance_criteria))
}

/// Build the pipeline configuration. An unreadable instructions file falls
/// back to the built-in header.
pub fn build_config(args: &PromptArgs, model: GeminiModel) -> EstimatorConfig {
    let prompt = match &args.instructions {
        Some(path) => PromptConfig::from_file(path).unwrap_or_else(|e| {
            tracing::warn!("{}; using default instructions", e);
            PromptConfig::default()
        }),
        None => PromptConfig::default(),
    };

    EstimatorConfig {
        sanitizer: SanitizerConfig {
            max_len: args.max_len,
        },
        prompt,
        llm: LlmConfig::with_model(model),
        ..EstimatorConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_story_from_flags() {
        let args = StoryArgs {
            summary: Some("Add Login Page".to_string()),
            ..StoryArgs::default()
        };
        let story = resolve_story(&args, true).unwrap();

        assert_eq!(story.summary, "Add Login Page");
        assert_eq!(story.description, "");
    }

    #[test]
    fn test_build_config_falls_back_on_missing_instructions() {
        let args = PromptArgs {
            instructions: Some(PathBuf::from("/nonexistent/system_prompt.md")),
            max_len: 100,
        };
        let config = build_config(&args, GeminiModel::Gemini15Pro);

        assert_eq!(config.prompt, PromptConfig::default());
        assert_eq!(config.sanitizer.max_len, 100);
        assert_eq!(config.llm.model, GeminiModel::Gemini15Pro);
    }

    #[test]
    fn test_explicit_api_key_wins() {
        assert_eq!(resolve_api_key(Some("  abc ".to_string())).unwrap(), "abc");
        assert!(resolve_api_key(Some("   ".to_string())).is_err());
    }
}
