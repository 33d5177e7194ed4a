//! Terminal styling utilities for a modern, visually appealing CLI

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("lendcast").cyan().bold(),
        style("Loan default classifiers: train, persist, evaluate").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the run configuration card
pub fn print_config(model: &str, config_path: &Path, artifact: &Path) {
    println!("    {} Model:    {}", TARGET, style(model).yellow());
    println!("    {} Config:   {}", FOLDER, config_path.display());
    println!("    {} Artifact: {}", SAVE, artifact.display());
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize) {
    println!(
        "      {} {}",
        style(count).yellow().bold(),
        description
    );
}

/// Print the final completion message
pub fn print_completion(message: &str) {
    println!();
    println!("    {} {}", ROCKET, style(message).green().bold());
    println!();
}
