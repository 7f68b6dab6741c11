//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{Formatter, STALE_MARKER};
use crate::session::Session;
use reliquary_domain::traits::SnapshotBackend;
use reliquary_domain::Tier;
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt;
use std::path::PathBuf;

/// Run the interactive REPL.
pub async fn run_repl<B>(session: &mut Session<B>, config: &Config, formatter: &Formatter) -> Result<()>
where
    B: SnapshotBackend,
    B::Error: fmt::Display,
{
    println!("{}", formatter.info("Reliquary REPL - Type 'help' for commands, 'exit' to quit"));
    println!(
        "{}",
        formatter.info(&format!(
            "{} items from {}, {} saved build(s)",
            session.engine().catalog().len(),
            session.catalog_path().display(),
            session.store().len()
        ))
    );
    println!();

    // Initialize readline editor
    let mut editor = DefaultEditor::new().map_err(|e| CliError::Io(std::io::Error::other(
        format!("Failed to initialize editor: {}", e),
    )))?;
    editor.set_max_history_size(config.settings.history_size).ok();

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = format!("reliquary [{}]> ", session.engine().selection().len());

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, session, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Catalog,
    Show { name: String, tier: Option<Tier> },
    Add { name: String, tier: Option<Tier> },
    Remove(usize),
    SetTier { position: usize, tier: Tier },
    Clear,
    List,
    Totals,
    Save(Option<String>),
    Load(String),
    Delete(String),
    Builds,
    Reload(Option<PathBuf>),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    let args = &parts[1..];
    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "catalog" => Ok(ReplCommand::Catalog),
        "show" => {
            let (name, tier) = parse_item(args, "Usage: show <name> [tier]")?;
            Ok(ReplCommand::Show { name, tier })
        }
        "add" => {
            let (name, tier) = parse_item(args, "Usage: add <name> [tier]")?;
            Ok(ReplCommand::Add { name, tier })
        }
        "remove" | "rm" => match args {
            [position] => Ok(ReplCommand::Remove(parse_position(position)?)),
            _ => Err(CliError::InvalidInput("Usage: remove <position>".to_string())),
        },
        "tier" => match args {
            [position, tier] => Ok(ReplCommand::SetTier {
                position: parse_position(position)?,
                tier: parse_tier(tier)?,
            }),
            _ => Err(CliError::InvalidInput("Usage: tier <position> <tier>".to_string())),
        },
        "clear" => Ok(ReplCommand::Clear),
        "list" | "ls" => Ok(ReplCommand::List),
        "totals" => Ok(ReplCommand::Totals),
        "save" => Ok(ReplCommand::Save((!args.is_empty()).then(|| args.join(" ")))),
        "load" => Ok(ReplCommand::Load(required_name(args, "Usage: load <build>")?)),
        "delete" => Ok(ReplCommand::Delete(required_name(args, "Usage: delete <build>")?)),
        "builds" => Ok(ReplCommand::Builds),
        "reload" => Ok(ReplCommand::Reload((!args.is_empty()).then(|| PathBuf::from(args.join(" "))))),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

/// Execute a REPL command.
async fn execute_repl_command<B>(cmd: ReplCommand, session: &mut Session<B>, formatter: &Formatter) -> Result<()>
where
    B: SnapshotBackend,
    B::Error: fmt::Display,
{
    match cmd {
        ReplCommand::Catalog => commands::execute_catalog(session, formatter)?,
        ReplCommand::Show { name, tier } => {
            let card = commands::show::card(session, &name, tier)?;
            println!("{}", formatter.format_card(&card)?);
        }
        ReplCommand::Add { name, tier } => {
            let entry = session.add(&name, tier)?;
            println!("{}", formatter.success(&format!("Added {}", entry.key())));
        }
        ReplCommand::Remove(position) => {
            let entry = session.remove(position)?;
            println!("{}", formatter.success(&format!("Removed {}", entry.key())));
        }
        ReplCommand::SetTier { position, tier } => {
            if session.set_tier(position, tier)? {
                println!("{}", formatter.success(&format!("Entry {} set to tier {}", position, tier)));
            } else {
                println!(
                    "{}",
                    formatter.warning(&format!("Entry {} set to tier {}, {}", position, tier, STALE_MARKER))
                );
            }
        }
        ReplCommand::Clear => {
            session.clear();
            println!("{}", formatter.success("Selection cleared"));
        }
        ReplCommand::List => println!("{}", formatter.format_selection(session.engine())?),
        ReplCommand::Totals => println!("{}", formatter.format_totals(session.engine())?),
        ReplCommand::Save(name) => {
            let name = session.save(name.as_deref())?;
            println!("{}", formatter.success(&format!("Saved build '{}'", name)));
        }
        ReplCommand::Load(name) => {
            let len = session.load(&name)?;
            println!("{}", formatter.success(&format!("Loaded build '{}' ({} entries)", name, len)));
            let stale = session.engine().unresolved().len();
            if stale > 0 {
                println!("{}", formatter.warning(&format!("{} entr(ies) {}", stale, STALE_MARKER)));
            }
        }
        ReplCommand::Delete(name) => {
            if session.delete(&name)? {
                println!("{}", formatter.success(&format!("Deleted build '{}'", name)));
            } else {
                println!("{}", formatter.warning(&format!("No saved build named '{}'", name)));
            }
        }
        ReplCommand::Builds => commands::execute_builds(session, formatter)?,
        ReplCommand::Reload(path) => {
            let len = session.reload(path).await?;
            println!(
                "{}",
                formatter.success(&format!("Loaded {} items from {}", len, session.catalog_path().display()))
            );
        }
        ReplCommand::Exit | ReplCommand::Help => {}
    }

    Ok(())
}

/// Split `<name words...> [tier]`; a trailing number is the tier.
fn parse_item(args: &[&str], usage: &str) -> Result<(String, Option<Tier>)> {
    match args {
        [] => Err(CliError::InvalidInput(usage.to_string())),
        [name @ .., last] if !name.is_empty() && last.parse::<f64>().is_ok() => {
            Ok((name.join(" "), Some(parse_tier(last)?)))
        }
        _ => Ok((args.join(" "), None)),
    }
}

fn required_name(args: &[&str], usage: &str) -> Result<String> {
    if args.is_empty() {
        return Err(CliError::InvalidInput(usage.to_string()));
    }
    Ok(args.join(" "))
}

fn parse_position(s: &str) -> Result<usize> {
    s.parse()
        .map_err(|_| CliError::InvalidInput(format!("Invalid position: {}", s)))
}

fn parse_tier(s: &str) -> Result<Tier> {
    Tier::parse(s).ok_or_else(|| CliError::InvalidInput(format!("Invalid tier: {}", s)))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  catalog                  - List items grouped by tier");
    println!("  show <name> [tier]       - Show the stats card of an item");
    println!("  add <name> [tier]        - Add an item to the selection (default: lowest tier)");
    println!("  remove <pos>             - Remove the entry at a position (1-based)");
    println!("  tier <pos> <tier>        - Change the tier of an entry");
    println!("  clear                    - Empty the selection");
    println!("  list                     - Show the selection");
    println!("  totals                   - Show summed stats and item counts");
    println!("  save [name]              - Save the selection (default: Build_<timestamp>)");
    println!("  load <name>              - Replace the selection with a saved build");
    println!("  delete <name>            - Delete a saved build");
    println!("  builds                   - List saved builds");
    println!("  reload [path]            - Re-read the catalog, keeping the selection");
    println!("  help, ?                  - Show this help");
    println!("  exit, quit, q            - Exit REPL");
    println!();
}
