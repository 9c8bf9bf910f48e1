//! Command-line surface for `signal-cli`.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "signal-cli", version, about = "Signal content API CLI", long_about = None)]
pub struct Cli {
    /// Content API base URL, e.g. <https://api.example.com/>
    #[arg(long, env = "SIGNAL_SITE_URL")]
    pub site: Option<String>,

    /// Path to file containing API key (takes precedence over env)
    #[arg(long, env = "SIGNAL_API_KEY_FILE")]
    pub key_file: Option<PathBuf>,

    /// API key from env (no CLI flag, so it stays out of shell history)
    #[arg(hide = true, env = "SIGNAL_API_KEY")]
    pub api_key_env: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show whether the server has an API key configured
    Config,
    /// Check the API key against the server
    VerifyKey,
    /// Post management
    Posts(PostsArgs),
    /// Newsletter subscribers
    Subscribers(SubscribersArgs),
    /// Newsletter delivery
    Newsletter(NewsletterArgs),
    /// Contact form relay
    Contact(ContactArgs),
}

#[derive(Parser, Debug)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub action: PostsCmd,
}

#[derive(Subcommand, Debug)]
pub enum PostsCmd {
    /// List all posts, most recent first
    List,
    /// Full-text search
    Search { term: String },
    /// Get a post by id
    Get { id: String },
    /// Create a post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        /// HTML body
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Delete a post
    Delete { id: String },
}

#[derive(Parser, Debug)]
pub struct SubscribersArgs {
    #[command(subcommand)]
    pub action: SubscribersCmd,
}

#[derive(Subcommand, Debug)]
pub enum SubscribersCmd {
    List,
    /// Subscribe an address
    Add { email: String },
    /// Unsubscribe an address
    Remove { email: String },
}

#[derive(Parser, Debug)]
pub struct NewsletterArgs {
    #[command(subcommand)]
    pub action: NewsletterCmd,
}

#[derive(Subcommand, Debug)]
pub enum NewsletterCmd {
    /// Send a newsletter to every subscriber
    Send {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: Option<String>,
        #[arg(long)]
        message_file: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
pub struct ContactArgs {
    #[command(subcommand)]
    pub action: ContactCmd,
}

#[derive(Subcommand, Debug)]
pub enum ContactCmd {
    /// Relay a contact message
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: Option<String>,
        #[arg(long)]
        message_file: Option<PathBuf>,
    },
}
