//! Show command implementation.

use crate::cli::ShowArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use reliquary_domain::traits::SnapshotBackend;
use reliquary_domain::Tier;
use reliquary_overlay::{TooltipContent, DEFAULT_TITLE};
use std::fmt;

/// Execute the show command.
pub fn execute_show<B>(args: ShowArgs, session: &Session<B>, formatter: &Formatter) -> Result<()>
where
    B: SnapshotBackend,
    B::Error: fmt::Display,
{
    let tier = args
        .tier
        .map(|t| Tier::new(t).ok_or_else(|| CliError::InvalidInput("Tier must be at least 1".to_string())))
        .transpose()?;

    let card = card(session, &args.name, tier)?;
    println!("{}", formatter.format_card(&card)?);
    Ok(())
}

/// Stats card of one catalog record.
pub fn card<B>(session: &Session<B>, name: &str, tier: Option<Tier>) -> Result<TooltipContent>
where
    B: SnapshotBackend,
    B::Error: fmt::Display,
{
    let record = session.find(name, tier)?;
    Ok(TooltipContent::for_record(record, DEFAULT_TITLE))
}
