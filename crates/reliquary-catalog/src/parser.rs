//! Parse delimiter-separated text into item records

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::rows::split_rows;
use reliquary_domain::record::Attributes;
use reliquary_domain::{Catalog, ItemRecord, Tier};
use tracing::debug;

/// Role of one source column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Tier,
    Ignored,
    Attribute,
}

/// Parse a source text into a catalog
///
/// The first non-blank row is the header. A blank name cell inherits the
/// nearest non-blank name above it; rows with nothing to inherit are dropped.
/// Unreadable tier cells become tier 1 and unreadable attribute cells become 0.
///
/// # Errors
///
/// Returns [`ParseError::MissingColumn`] if the header has no name column.
/// An empty source yields an empty catalog.
pub fn parse_catalog(text: &str, config: &ParserConfig) -> Result<Catalog, ParseError> {
    Ok(Catalog::from_records(parse_records(text, config)?))
}

/// Parse a source text into records, in source order, duplicates included
pub fn parse_records(text: &str, config: &ParserConfig) -> Result<Vec<ItemRecord>, ParseError> {
    config.validate().map_err(ParseError::Config)?;

    let mut rows = split_rows(text, config.delimiter).into_iter();
    let header = match rows.next() {
        Some(header) => header,
        None => return Ok(Vec::new()),
    };

    let header: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();
    let columns: Vec<Column> = header
        .iter()
        .map(|h| {
            if *h == config.name_column {
                Column::Name
            } else if *h == config.tier_column {
                Column::Tier
            } else if config.is_ignored(h) {
                Column::Ignored
            } else {
                Column::Attribute
            }
        })
        .collect();

    if !columns.contains(&Column::Name) {
        return Err(ParseError::MissingColumn(config.name_column.clone()));
    }

    let mut records = Vec::new();
    let mut last_name: Option<String> = None;

    for (line, row) in rows.enumerate() {
        let mut name = None;
        let mut tier = Tier::FIRST;
        let mut attributes = Attributes::new();

        for (index, column) in columns.iter().enumerate() {
            let cell = row.get(index).map(String::as_str).unwrap_or("");
            match column {
                Column::Name => {
                    let trimmed = cell.trim();
                    if !trimmed.is_empty() {
                        name = Some(trimmed.to_string());
                    }
                }
                Column::Tier => tier = Tier::parse_or_first(cell),
                Column::Ignored => {}
                Column::Attribute => {
                    attributes.insert(header[index].clone(), coerce_number(cell));
                }
            }
        }

        // Forward fill from the last named row
        match name {
            Some(name) => last_name = Some(name),
            None if last_name.is_none() => {
                debug!("Dropping row {} without a name to inherit", line + 2);
                continue;
            }
            None => {}
        }

        if let Some(name) = &last_name {
            records.push(ItemRecord::new(name.clone(), tier, attributes));
        }
    }

    debug!("Parsed {} records from {} columns", records.len(), columns.len());
    Ok(records)
}

/// Read a numeric cell, coercing anything unreadable to 0
pub fn coerce_number(cell: &str) -> f64 {
    match cell.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}
