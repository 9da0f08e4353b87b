//! Models command - list the selectable models.

use colored::Colorize;
use storypoint::GeminiModel;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    for model in GeminiModel::ALL {
        if model == GeminiModel::default() {
            println!("{} {}", model.as_str().white().bold(), "(default)".dimmed());
        } else {
            println!("{}", model);
        }
    }
    Ok(())
}
