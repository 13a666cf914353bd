mod app;
mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod mcp;
mod page_range;
mod pdf;
mod split;
mod validate;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use split::SplitOptions;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = Config::resolve(cli.config.as_deref())?;
    logging::init(&cfg.logging, cli.log_level.as_deref())?;
    let options = SplitOptions::from(&cfg);

    match cli.command {
        Commands::Extract {
            path,
            pages,
            output,
        } => {
            commands::extract::run(&path, &pages, &output, &options)?;
        }
        Commands::Interactive => {
            commands::interactive::run(options)?;
        }
        Commands::Mcp => {
            mcp::run_server(options).await?;
        }
    }

    Ok(())
}
