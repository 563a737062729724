// ABOUTME: First-time configuration wizard.
// ABOUTME: Prompts for the backend URL, tests it, and saves the config.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use colored::Colorize;

use super::client_for;
use crate::config::{normalize_base_url, Config};

/// Run the setup wizard
pub async fn run(config: &Config) -> Result<()> {
    println!("{}", "Seltest Setup".bold());
    println!("=============\n");

    print!("Backend API URL [{}]: ", config.api.base_url);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let mut updated = config.clone();
    updated.api.base_url = resolve_url(&input, &config.api.base_url);

    // Test connection
    println!("\nTesting connection to {}...", updated.api.base_url);
    let client = client_for(&updated)?;
    match client.list_models().await {
        Ok(models) => {
            println!("{}", "Connected successfully!".green());
            println!("  Found {} model(s)", models.len());
        }
        Err(e) => {
            eprintln!("{} {}", "Connection failed:".red(), e);
            eprintln!("\nPlease check:");
            eprintln!("  - Is the backend running?");
            eprintln!("  - Is the URL correct?");
            bail!("could not reach {}", updated.api.base_url);
        }
    }

    let path = updated.save().context("Failed to save configuration")?;

    println!("\nConfiguration saved to {}", path.display());
    println!(
        "\nYou're all set! Run '{}' to start the wizard.",
        "seltest".cyan()
    );

    Ok(())
}

/// Blank input keeps the current URL.
fn resolve_url(input: &str, current: &str) -> String {
    let input = input.trim();
    if input.is_empty() {
        current.to_string()
    } else {
        normalize_base_url(input)
    }
}
