//! Reliquary CLI - Browse an item catalog and total the stats of your builds.

use clap::Parser;
use reliquary_cli::commands;
use reliquary_cli::repl;
use reliquary_cli::{Cli, Command, Config, Formatter, Session};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RELIQUARY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> reliquary_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Command-line overrides
    if let Some(catalog) = cli.catalog {
        config.catalog_path = catalog;
    }
    if let Some(database) = cli.database {
        config.database_path = Some(database);
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Only these commands fail without a readable catalog
    let needs_catalog = matches!(
        cli.command,
        Some(Command::Catalog | Command::Show(_) | Command::Totals(_))
    );
    let mut session = Session::open(&config, !needs_catalog).await?;

    // Handle commands
    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&mut session, &config, &formatter).await?;
        }
        Some(Command::Catalog) => {
            commands::execute_catalog(&session, &formatter)?;
        }
        Some(Command::Show(args)) => {
            commands::execute_show(args, &session, &formatter)?;
        }
        Some(Command::Builds) => {
            commands::execute_builds(&session, &formatter)?;
        }
        Some(Command::Totals(args)) => {
            commands::execute_totals(args, &session, &formatter)?;
        }
        Some(Command::Delete(args)) => {
            commands::execute_delete(args, &mut session, &formatter)?;
        }
    }

    Ok(())
}
