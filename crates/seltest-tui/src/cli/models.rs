// ABOUTME: Models command implementation.
// ABOUTME: Lists the backend's models and marks the current selection.

use colored::Colorize;
use seltest_client::ModelInfo;

use super::{backend_error, client_for};
use crate::config::Config;
use crate::error::Result;

pub async fn run(config: &Config) -> Result<()> {
    let client = client_for(config)?;
    let models = client
        .list_models()
        .await
        .map_err(|e| backend_error(e, config))?;

    // Older backends have no current-model endpoint
    let current = match client.current_model().await {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::debug!(error = %e, "No current model");
            None
        }
    };

    if models.is_empty() {
        println!("No models available.");
        return Ok(());
    }

    println!("Available models:");
    for model in &models {
        if is_current(model, current.as_deref()) {
            println!("  {} {} ({})", "●".green(), model.name.bold(), model.id);
        } else {
            println!("  {} {} ({})", "○".dimmed(), model.name, model.id.dimmed());
        }
    }

    Ok(())
}

fn is_current(model: &ModelInfo, current: Option<&str>) -> bool {
    current == Some(model.id.as_str())
}
