//! Quill CLI - Blog content renderer.
//!
//! Provides commands for:
//! - `render`: Render local HTML files through the content pipeline
//! - `post`: Fetch a post from the blog API and render it
//! - `posts`: List posts with excerpts
//! - `tags`: List tags
//! - `recent`: List recent posts

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{PostArgs, PostsArgs, RenderArgs, SidebarArgs};
use output::Output;

/// Quill - Blog content renderer.
#[derive(Parser)]
#[command(name = "quill", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render local HTML files.
    Render(RenderArgs),
    /// Fetch and render a single post.
    Post(PostArgs),
    /// List posts.
    Posts(PostsArgs),
    /// List tags.
    Tags(SidebarArgs),
    /// List recent posts.
    Recent(SidebarArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Post(args) => args.execute(),
        Commands::Posts(args) => args.execute(),
        Commands::Tags(args) => args.execute_tags(),
        Commands::Recent(args) => args.execute_recent(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
