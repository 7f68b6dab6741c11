//! Saved-build command implementations.

use crate::cli::BuildArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use reliquary_domain::traits::SnapshotBackend;
use std::fmt;

/// Execute the builds command.
pub fn execute_builds<B>(session: &Session<B>, formatter: &Formatter) -> Result<()>
where
    B: SnapshotBackend,
    B::Error: fmt::Display,
{
    let builds = session
        .store()
        .snapshots()
        .iter()
        .map(|(name, selection)| (name.as_str(), selection.len()));
    println!("{}", formatter.format_builds(builds)?);
    Ok(())
}

/// Execute the totals command.
pub fn execute_totals<B>(args: BuildArgs, session: &Session<B>, formatter: &Formatter) -> Result<()>
where
    B: SnapshotBackend,
    B::Error: fmt::Display,
{
    let engine = session.build_engine(&args.name)?;
    println!("{}", formatter.format_totals(&engine)?);
    Ok(())
}

/// Execute the delete command.
pub fn execute_delete<B>(args: BuildArgs, session: &mut Session<B>, formatter: &Formatter) -> Result<()>
where
    B: SnapshotBackend,
    B::Error: fmt::Display,
{
    if session.delete(&args.name)? {
        println!("{}", formatter.success(&format!("Deleted build '{}'", args.name)));
    } else {
        println!("{}", formatter.warning(&format!("No saved build named '{}'", args.name)));
    }
    Ok(())
}
