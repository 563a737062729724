// ABOUTME: Context command implementation.
// ABOUTME: Shows the app context the backend currently holds, without revealing the password.

use colored::Colorize;
use seltest_client::AppContext;

use super::{backend_error, client_for};
use crate::config::Config;
use crate::error::Result;

pub async fn run(config: &Config) -> Result<()> {
    let client = client_for(config)?;
    let context = client
        .app_context()
        .await
        .map_err(|e| backend_error(e, config))?;

    if context.url.is_empty() {
        println!("No app context set. Run the wizard or `seltest generate` first.");
        return Ok(());
    }

    println!("{}", "App context:".bold());
    for (label, value) in describe(&context) {
        println!("  {:<12} {}", format!("{}:", label).dimmed(), value);
    }
    Ok(())
}

/// Label/value rows for display. Only the username is shown.
fn describe(context: &AppContext) -> Vec<(&'static str, String)> {
    let credentials = if !context.has_credentials() {
        "none".to_string()
    } else if context.username.is_empty() {
        "password only".to_string()
    } else {
        format!("user {}", context.username)
    };
    vec![
        ("URL", context.url.clone()),
        ("Pages", context.page_list().join(", ")),
        ("Credentials", credentials),
    ]
}
