mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, delete, init, list, new_table, rename, show, ApplyArgs, DeleteArgs, InitArgs, NewArgs,
    RenameArgs, ShowArgs,
};

/// Gridnest CLI - nested tables from the command line
#[derive(Parser, Debug)]
#[command(name = "gridnest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Gridnest project
    Init(InitArgs),

    /// Create a root table
    New(NewArgs),

    /// List root tables
    List,

    /// Print a table and everything nested in it
    Show(ShowArgs),

    /// Rename a root table
    Rename(RenameArgs),

    /// Delete a root table and its nested tables
    Delete(DeleteArgs),

    /// Apply mutations to a table and save it
    Apply(ApplyArgs),
}

fn main() {
    // Quiet unless RUST_LOG asks for more
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::New(args) => new_table(args, &cwd),
                Command::List => list(&cwd),
                Command::Show(args) => show(args, &cwd),
                Command::Rename(args) => rename(args, &cwd),
                Command::Delete(args) => delete(args, &cwd),
                Command::Apply(args) => apply(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
