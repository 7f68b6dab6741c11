//! Catalog command implementation.

use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use reliquary_domain::traits::SnapshotBackend;
use std::fmt;

/// Execute the catalog command.
pub fn execute_catalog<B>(session: &Session<B>, formatter: &Formatter) -> Result<()>
where
    B: SnapshotBackend,
    B::Error: fmt::Display,
{
    println!("{}", formatter.format_catalog(session.engine().catalog())?);
    Ok(())
}
