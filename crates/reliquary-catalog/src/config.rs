//! Configuration for the catalog parser
//!
//! Column roles are chosen by header name. The defaults match the artifact
//! tables this tool was written for (`Имя` = name, `Тир` = tier, `№` = row
//! number).

use serde::{Deserialize, Serialize};

/// Configuration for [`parse_catalog`](crate::parse_catalog)
///
/// # Examples
///
/// ```
/// use reliquary_catalog::ParserConfig;
///
/// let config = ParserConfig::default();
/// assert_eq!(config.delimiter, ',');
/// assert_eq!(config.name_column, "Имя");
///
/// let config = ParserConfig::english();
/// assert_eq!(config.tier_column, "tier");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Field delimiter
    pub delimiter: char,

    /// Header of the item name column
    pub name_column: String,

    /// Header of the tier column
    pub tier_column: String,

    /// Headers of columns that are neither identity nor attributes
    pub ignored_columns: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            name_column: "Имя".to_string(),
            tier_column: "Тир".to_string(),
            ignored_columns: vec!["№".to_string()],
        }
    }
}

impl ParserConfig {
    /// English column names (`name`, `tier`, `#`)
    pub fn english() -> Self {
        Self {
            delimiter: ',',
            name_column: "name".to_string(),
            tier_column: "tier".to_string(),
            ignored_columns: vec!["#".to_string()],
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.delimiter == '"' || self.delimiter == '\n' || self.delimiter == '\r' {
            return Err(format!("delimiter cannot be {:?}", self.delimiter));
        }
        if self.name_column.is_empty() {
            return Err("name_column cannot be empty".to_string());
        }
        if self.name_column == self.tier_column {
            return Err("name_column and tier_column must differ".to_string());
        }
        Ok(())
    }

    /// Whether a header names a non-attribute column
    pub(crate) fn is_ignored(&self, header: &str) -> bool {
        self.ignored_columns.iter().any(|c| c == header)
    }
}
