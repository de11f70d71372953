mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    init, pull, push, sections, validate, InitArgs, PullArgs, PushArgs, SectionsArgs,
    ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// Storefront CLI - manage page builder designs
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a config file and a starter design
    Init(InitArgs),

    /// List the available section and block types
    Sections(SectionsArgs),

    /// Check that a design export can be imported
    Validate(ValidateArgs),

    /// Download a store's design from the design server
    Pull(PullArgs),

    /// Upload a design export to the design server
    Push(PushArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Sections(args) => sections(args),
        Command::Validate(args) => validate(args, &cwd),
        Command::Pull(args) => pull(args, &cwd).await,
        Command::Push(args) => push(args, &cwd).await,
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
