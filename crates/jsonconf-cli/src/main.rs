//! jsonconf CLI
//!
//! Command-line access to templated JSON configuration files.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::CliContext;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A subscriber may already be installed when embedded in a test harness
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("Verbose mode enabled");

    let ctx = CliContext::new(cli.root, cli.config_dir);
    match cli.command {
        Some(cmd) => execute_command(&ctx, cmd),
        None => {
            println!("{} JSON configuration CLI", "jsonconf".green().bold());
            println!();
            println!("Run {} for available commands.", "jsonconf --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(ctx: &CliContext, cmd: Commands) -> Result<()> {
    let config = ctx.open()?;
    match cmd {
        Commands::Get {
            name,
            pointer,
            default,
        } => commands::run_get(&config, &name, &pointer, default.as_deref()),
        Commands::Set {
            name,
            pointer,
            value,
        } => commands::run_set(&config, &name, &pointer, &value),
        Commands::Delete { name, pointer } => commands::run_delete(&config, &name, &pointer),
        Commands::Merge {
            name,
            pointer,
            value,
        } => commands::run_merge(&config, &name, &pointer, &value),
        Commands::List { name, pointer } => commands::run_list(&config, &name, &pointer),
        Commands::Append {
            name,
            pointer,
            value,
        } => commands::run_append(&config, &name, &pointer, &value),
        Commands::Push {
            name,
            pointer,
            value,
        } => commands::run_push(&config, &name, &pointer, &value),
        Commands::Shift { name, pointer } => commands::run_shift(&config, &name, &pointer),
        Commands::Pop { name, pointer } => commands::run_pop(&config, &name, &pointer),
        Commands::Clear { name, pointer } => commands::run_clear(&config, &name, &pointer),
        Commands::Package { pointer, default } => {
            commands::run_package(&config, &pointer, default.as_deref())
        }
        Commands::Path { name } => commands::run_path(&config, &name),
    }
}
