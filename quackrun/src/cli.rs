// quackrun/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quackrun")]
#[command(about = "Run ad-hoc and preset SQL against a local DuckDB file", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to the DuckDB database file [default: dev.duckdb]
    #[arg(long, global = true, env = "QUACKRUN_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Configuration file [default: ./quackrun.yaml if present]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Open the database read-only
    #[arg(long, global = true)]
    pub read_only: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// ⚡ Executes a SQL query and prints the result table
    Query {
        /// SQL text (default: a sample of main_staging.stg_sales_fact)
        sql: Option<String>,
    },

    /// 📤 Exports query results to a CSV file
    Export {
        /// SQL text, usually a COPY ... TO statement (default: quarter-over-quarter growth)
        sql: Option<String>,

        /// Target of the default export [default: qoqtrend.csv]
        #[arg(long, short, env = "QUACKRUN_OUTPUT")]
        output: Option<String>,
    },

    /// 📋 Lists every table and schema in the database
    ListContents,

    /// 🏆 Shows the top customers by spend and the order distribution
    TopCustomers,

    /// 🔢 Prints row counts of the intermediate and staging models
    Counts,

    /// ▶️  Runs a named preset (built-in or from the config file)
    Run {
        /// Preset name, see `quackrun presets`
        name: String,
    },

    /// 📚 Lists available presets
    Presets,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_query_without_sql() -> Result<()> {
        let args = Cli::parse_from(["quackrun", "query"]);
        match args.command {
            Commands::Query { sql } => {
                assert_eq!(sql, None);
                assert!(!args.global.read_only);
                Ok(())
            }
            _ => bail!("Expected Query command"),
        }
    }

    #[test]
    fn test_cli_parse_query_with_sql_and_globals() -> Result<()> {
        let args = Cli::parse_from([
            "quackrun",
            "query",
            "SELECT 1",
            "--db-path",
            "/tmp/x.duckdb",
            "--read-only",
        ]);
        match args.command {
            Commands::Query { sql } => {
                assert_eq!(sql.as_deref(), Some("SELECT 1"));
                assert_eq!(
                    args.global.db_path.as_deref(),
                    Some(std::path::Path::new("/tmp/x.duckdb"))
                );
                assert!(args.global.read_only);
                Ok(())
            }
            _ => bail!("Expected Query command"),
        }
    }

    #[test]
    fn test_cli_parse_export_output() -> Result<()> {
        let args = Cli::parse_from(["quackrun", "export", "-o", "growth.csv"]);
        match args.command {
            Commands::Export { sql, output } => {
                assert_eq!(sql, None);
                assert_eq!(output.as_deref(), Some("growth.csv"));
                Ok(())
            }
            _ => bail!("Expected Export command"),
        }
    }

    #[test]
    fn test_cli_parse_run() -> Result<()> {
        let args = Cli::parse_from(["quackrun", "run", "top-customers"]);
        match args.command {
            Commands::Run { name } => {
                assert_eq!(name, "top-customers");
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_rejects_second_positional() {
        assert!(Cli::try_parse_from(["quackrun", "query", "SELECT 1", "SELECT 2"]).is_err());
    }
}
