//! signal-cli: terminal client for the Signal content API.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod io;
mod print;

#[cfg(test)]
mod tests;

use clap::Parser;

use args::{Cli, Commands};
use client::{CliError, build_ctx_from_cli};
use handlers::{contact, newsletter, posts, site, subscribers};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = build_ctx_from_cli(&cli)?;

    match cli.command {
        Commands::Config => site::config(&ctx).await?,
        Commands::VerifyKey => site::verify_key(&ctx).await?,
        Commands::Posts(cmd) => posts::handle(&ctx, cmd.action).await?,
        Commands::Subscribers(cmd) => subscribers::handle(&ctx, cmd.action).await?,
        Commands::Newsletter(cmd) => newsletter::handle(&ctx, cmd.action).await?,
        Commands::Contact(cmd) => contact::handle(&ctx, cmd.action).await?,
    }

    Ok(())
}
