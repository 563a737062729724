// ABOUTME: Entry point for the seltest binary
// ABOUTME: Handles CLI args, logging, config loading, and wizard launch

use anyhow::Result;
use clap::Parser;
use seltest_tui::cli::{context, generate, models, setup, Cli, Command};
use seltest_tui::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The wizard owns the terminal, so its logs go to a file
    match &cli.command {
        None => seltest_log::init_file("wizard"),
        Some(Command::Generate(_)) => seltest_log::init_for("seltest_client"),
        Some(_) => seltest_log::init(),
    }

    let config = Config::load(&cli.overrides())?;

    match cli.command {
        None => seltest_tui::run::run_wizard(&config).await?,
        Some(Command::Models) => models::run(&config).await?,
        Some(Command::Setup) => setup::run(&config).await?,
        Some(Command::Context) => context::run(&config).await?,
        Some(Command::Generate(args)) => generate::run(&config, args).await?,
    }

    Ok(())
}
