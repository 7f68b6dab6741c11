//! Loading catalogs from files

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::parser::parse_catalog;
use reliquary_domain::Catalog;
use std::path::Path;
use tracing::info;

/// Read and parse a catalog file
///
/// The read is the only suspension point; parsing runs to completion once the
/// text is available. A leading UTF-8 byte order mark is ignored.
pub async fn load_catalog<P: AsRef<Path>>(path: P, config: &ParserConfig) -> Result<Catalog, ParseError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await?;
    let catalog = parse_catalog(text.trim_start_matches('\u{feff}'), config)?;

    info!("Loaded {} records from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Blocking variant of [`load_catalog`]
pub fn load_catalog_blocking<P: AsRef<Path>>(path: P, config: &ParserConfig) -> Result<Catalog, ParseError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let catalog = parse_catalog(text.trim_start_matches('\u{feff}'), config)?;

    info!("Loaded {} records from {}", catalog.len(), path.display());
    Ok(catalog)
}
