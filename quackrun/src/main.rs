// quackrun/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use quackrun_core::QuackError;

fn init_tracing() {
    // RUST_LOG=debug quackrun query ... to see SQL text and timings.
    // Logs go to stderr so stdout only carries result tables.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), QuackError> {
    tracing::debug!(command = ?cli.command, "Dispatching");

    match cli.command {
        Commands::Query { sql } => {
            let settings = commands::load_settings(&cli.global, None)?;
            commands::query::execute(&settings.runner, sql)
        }
        Commands::Export { sql, output } => {
            let output_given = output.is_some();
            let settings = commands::load_settings(&cli.global, output)?;
            commands::export::execute(&settings.runner, sql, output_given)
        }
        Commands::ListContents => {
            let settings = commands::load_settings(&cli.global, None)?;
            commands::preset::execute(&settings, "list-contents")
        }
        Commands::TopCustomers => {
            let settings = commands::load_settings(&cli.global, None)?;
            commands::preset::execute(&settings, "top-customers")
        }
        Commands::Counts => {
            let settings = commands::load_settings(&cli.global, None)?;
            commands::preset::execute(&settings, "counts")
        }
        Commands::Run { name } => {
            let settings = commands::load_settings(&cli.global, None)?;
            commands::preset::execute(&settings, &name)
        }
        Commands::Presets => {
            let settings = commands::load_settings(&cli.global, None)?;
            commands::presets::execute(&settings)
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    // Connections are released inside `run`, before the process exits.
    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("❌ {:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
