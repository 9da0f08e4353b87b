//! Serve command - open the estimation form in a browser.

use colored::Colorize;
use storypoint::GeminiModel;
use storypoint::llm::API_KEY_ENV;

use super::input::build_config;
use crate::cli::PromptArgs;
use crate::server::{app, state::AppState};

pub fn run(
    port: u16,
    no_open: bool,
    api_key: Option<String>,
    prompt: PromptArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&prompt, GeminiModel::default());
    let api_key = api_key.or_else(|| std::env::var(API_KEY_ENV).ok());
    let has_key = api_key.as_deref().is_some_and(|k| !k.trim().is_empty());
    let state = AppState::new(config, api_key);

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting estimator at".cyan().bold(),
        url.white().bold()
    );
    println!();
    if verbose {
        println!("  Max field length: {}", prompt.max_len);
        if let Some(path) = &prompt.instructions {
            println!("  Instructions: {}", path.display());
        }
    }
    if has_key {
        println!("  API key: from server (the form may override it)");
    } else {
        println!("  API key: enter it in the form");
    }
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        tokio::spawn(async {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
            std::process::exit(0);
        });

        app::run_server(state, port).await
    })
}
