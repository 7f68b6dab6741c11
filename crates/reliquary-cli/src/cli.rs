//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reliquary - Browse an item catalog and total the stats of your builds.
#[derive(Debug, Parser)]
#[command(name = "reliquary")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file (overrides the config file)
    #[arg(long, global = true, env = "RELIQUARY_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Saved-builds database (overrides the config file)
    #[arg(long, global = true, env = "RELIQUARY_DATABASE")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the catalog grouped by tier
    Catalog,

    /// Show the stats card of one item
    Show(ShowArgs),

    /// List saved builds
    Builds,

    /// Show totals and counts of a saved build
    Totals(BuildArgs),

    /// Delete a saved build
    Delete(BuildArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Item name
    pub name: String,

    /// Tier (defaults to the lowest tier of the item)
    #[arg(short, long)]
    pub tier: Option<u32>,
}

/// Arguments naming a saved build.
#[derive(Debug, Parser)]
pub struct BuildArgs {
    /// Build name
    pub name: String,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_means_repl() {
        let cli = Cli::parse_from(["reliquary"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_show_command() {
        let cli = Cli::parse_from(["reliquary", "show", "Ring of Dawn", "-t", "2"]);
        match cli.command {
            Some(Command::Show(args)) => {
                assert_eq!(args.name, "Ring of Dawn");
                assert_eq!(args.tier, Some(2));
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_global_overrides() {
        let cli = Cli::parse_from([
            "reliquary",
            "builds",
            "--catalog",
            "items.csv",
            "--database",
            "b.db",
            "--format",
            "json",
            "--no-color",
        ]);
        assert!(matches!(cli.command, Some(Command::Builds)));
        assert_eq!(cli.catalog, Some(PathBuf::from("items.csv")));
        assert_eq!(cli.database, Some(PathBuf::from("b.db")));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.no_color);
    }
}
