//! Tooltip content and measurement

use crate::geometry::Size;
use reliquary_domain::ItemRecord;

/// Default heading of an item card
pub const DEFAULT_TITLE: &str = "Total stats";

/// Anything the overlay can show must report its rendered size
pub trait Measure {
    /// Rendered size once mounted
    fn measure(&self) -> Size;
}

impl Measure for Size {
    fn measure(&self) -> Size {
        *self
    }
}

/// Fixed text metrics used to measure [`TooltipContent`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Width of one character cell
    pub cell_width: f64,
    /// Height of one line
    pub line_height: f64,
    /// Padding on every side
    pub padding: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            line_height: 16.0,
            padding: 5.0,
        }
    }
}

/// Text card shown for an item: a title and one line per attribute
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    /// Heading line
    pub title: String,
    /// Body lines
    pub lines: Vec<String>,
    /// Metrics used for measuring
    pub metrics: TextMetrics,
}

impl TooltipContent {
    /// Create content from a title and lines
    pub fn new(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lines,
            metrics: TextMetrics::default(),
        }
    }

    /// Card for an item: `"<attribute>: <value>"` for each non-zero attribute
    pub fn for_record(record: &ItemRecord, title: impl Into<String>) -> Self {
        let lines = record
            .non_zero_attributes()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect();
        Self::new(title, lines)
    }

    /// Replace the measuring metrics
    pub fn with_metrics(mut self, metrics: TextMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Every line, title first
    pub fn all_lines(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.title.as_str()).chain(self.lines.iter().map(String::as_str))
    }
}

impl Measure for TooltipContent {
    fn measure(&self) -> Size {
        let m = self.metrics;
        let columns = self.all_lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let rows = 1 + self.lines.len();
        Size::new(
            columns as f64 * m.cell_width + 2.0 * m.padding,
            rows as f64 * m.line_height + 2.0 * m.padding,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reliquary_domain::record::Attributes;
    use reliquary_domain::Tier;

    #[test]
    fn test_for_record_skips_zero_attributes() {
        let mut attributes = Attributes::new();
        attributes.insert("power".to_string(), 12.0);
        attributes.insert("luck".to_string(), 0.0);
        attributes.insert("speed".to_string(), 1.5);
        let record = ItemRecord::new("Ring", Tier::FIRST, attributes);

        let content = TooltipContent::for_record(&record, DEFAULT_TITLE);
        assert_eq!(content.lines, vec!["power: 12".to_string(), "speed: 1.5".to_string()]);
    }

    #[test]
    fn test_measure() {
        let content = TooltipContent::new("abcd", vec!["ab".to_string(), "abcdefgh".to_string()]);
        // 8 columns * 8 + 10, 3 rows * 16 + 10
        assert_eq!(content.measure(), Size::new(74.0, 58.0));
    }
}
