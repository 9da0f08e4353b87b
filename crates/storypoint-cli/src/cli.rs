//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use storypoint::GeminiModel;
use storypoint::sanitize::DEFAULT_MAX_LEN;

/// Default location of the historical data file.
pub const DEFAULT_DATA_PATH: &str = "data/historical_stories.csv";

/// Storypoint: AI story point estimator
#[derive(Parser)]
#[command(name = "storypoint")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate story points for a new story (prompts for missing input)
    Estimate {
        #[command(flatten)]
        story: StoryArgs,

        #[command(flatten)]
        prompt: PromptArgs,

        /// Model to use
        #[arg(short, long, default_value_t = GeminiModel::default())]
        model: GeminiModel,

        /// Gemini API key (default: $GEMINI_API_KEY, then prompt)
        #[arg(long)]
        api_key: Option<String>,

        /// Print the prompt before sending it
        #[arg(long)]
        show_prompt: bool,
    },

    /// Validate a historical data file and show its summary
    Validate {
        /// Path to the historical data file (CSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the prompt that would be sent, without calling the model
    Prompt {
        #[command(flatten)]
        story: StoryArgs,

        #[command(flatten)]
        prompt: PromptArgs,
    },

    /// List the models that can be selected
    Models,

    /// Open the web form
    Serve {
        /// Port for web server
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,

        /// Gemini API key used when the form leaves it blank
        #[arg(long)]
        api_key: Option<String>,

        #[command(flatten)]
        prompt: PromptArgs,
    },
}

/// The story to estimate and where its history lives.
#[derive(Args, Clone, Debug, Default)]
pub struct StoryArgs {
    /// Path to the historical data file (CSV)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Story summary
    #[arg(short, long)]
    pub summary: Option<String>,

    /// Story description
    #[arg(long)]
    pub description: Option<String>,

    /// Acceptance criteria
    #[arg(long)]
    pub acceptance_criteria: Option<String>,
}

/// Prompt template options.
#[derive(Args, Clone, Debug)]
pub struct PromptArgs {
    /// File with custom instructions for the prompt header
    #[arg(long, value_name = "FILE")]
    pub instructions: Option<PathBuf>,

    /// Maximum characters kept per text field
    #[arg(long, default_value_t = DEFAULT_MAX_LEN)]
    pub max_len: usize,
}
