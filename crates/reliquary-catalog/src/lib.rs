//! Reliquary Catalog
//!
//! Reads tabular item sources into a [`Catalog`](reliquary_domain::Catalog).
//!
//! # Overview
//!
//! A source is delimiter-separated text with a header row. One column holds the
//! item name, one the tier, and every other column (except configured index
//! columns) is a numeric attribute.
//!
//! ```text
//! №,Имя,Тир,Сила,Ловкость
//! 1,Кольцо,1,10,0
//! 2,,2,20,5        <- inherits "Кольцо"
//! ```
//!
//! # Key Features
//!
//! - **Forward fill**: blank name cells inherit the nearest name above
//! - **Numeric coercion**: unreadable cells become 0, unreadable tiers become 1
//! - **Quoted fields**: `"a,b"` and doubled quotes are honoured
//! - **Last wins**: duplicate `(name, tier)` rows keep the later values
//!
//! # Example Usage
//!
//! ```
//! use reliquary_catalog::{parse_catalog, ParserConfig};
//! use reliquary_domain::Tier;
//!
//! let text = "name,tier,power\nRing,1,10\n,2,20\n";
//! let catalog = parse_catalog(text, &ParserConfig::english()).unwrap();
//!
//! let ring = catalog.get("Ring", Tier::new(2).unwrap()).unwrap();
//! assert_eq!(ring.attribute("power"), Some(20.0));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod parser;
mod rows;

#[cfg(test)]
mod tests;

pub use config::ParserConfig;
pub use error::ParseError;
pub use loader::{load_catalog, load_catalog_blocking};
pub use parser::{coerce_number, parse_catalog, parse_records};
pub use rows::split_rows;
