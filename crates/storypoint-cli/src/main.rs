//! Storypoint CLI - AI story point estimator.

mod cli;
mod commands;
mod logging;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Estimate {
            story,
            prompt,
            model,
            api_key,
            show_prompt,
        } => commands::estimate::run(story, prompt, model, api_key, show_prompt, cli.verbose),

        Commands::Validate { file, json } => commands::validate::run(file, json, cli.verbose),

        Commands::Prompt { story, prompt } => commands::prompt::run(story, prompt, cli.verbose),

        Commands::Models => commands::models::run(),

        Commands::Serve {
            port,
            no_open,
            api_key,
            prompt,
        } => commands::serve::run(port, no_open, api_key, prompt, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
