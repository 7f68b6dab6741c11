//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use reliquary_domain::{AggregationEngine, Catalog, ItemRecord};
use reliquary_overlay::TooltipContent;
use serde_json::{json, Map, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Marker shown next to selection entries the catalog no longer knows.
pub const STALE_MARKER: &str = "not in catalog";

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the catalog, one column per tier.
    pub fn format_catalog(&self, catalog: &Catalog) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let records: Vec<Value> = catalog.records().iter().map(record_json).collect();
                Ok(serde_json::to_string_pretty(&records)?)
            }
            OutputFormat::Quiet => Ok(catalog
                .records()
                .iter()
                .map(|r| format!("{}\t{}", r.name, r.tier))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if catalog.is_empty() {
                    return Ok(self.colorize("Catalog is empty.", "yellow"));
                }

                let groups = catalog.grouped_by_tier();
                let depth = groups.iter().map(|(_, group)| group.len()).max().unwrap_or(0);

                let mut builder = Builder::default();
                builder.push_record(groups.iter().map(|(tier, _)| format!("Tier {}", tier)));
                for row in 0..depth {
                    builder.push_record(
                        groups
                            .iter()
                            .map(|(_, group)| group.get(row).map(|r| r.name.clone()).unwrap_or_default()),
                    );
                }

                Ok(self.render(builder))
            }
        }
    }

    /// Format an item card.
    pub fn format_card(&self, content: &TooltipContent) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "title": content.title,
                "lines": content.lines,
            }))?),
            OutputFormat::Quiet => Ok(content.lines.join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record([content.title.clone()]);
                for line in &content.lines {
                    builder.push_record([line.clone()]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format the current selection, marking entries that no longer resolve.
    pub fn format_selection(&self, engine: &AggregationEngine) -> Result<String> {
        let stale = engine.unresolved();

        match self.format {
            OutputFormat::Json => {
                let entries: Vec<Value> = engine
                    .selection()
                    .iter()
                    .enumerate()
                    .map(|(i, e)| {
                        json!({
                            "position": i + 1,
                            "name": e.name,
                            "tier": e.tier.get(),
                            "resolved": !stale.contains(&i),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&entries)?)
            }
            OutputFormat::Quiet => Ok(engine
                .selection()
                .iter()
                .map(|e| e.key().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if engine.selection().is_empty() {
                    return Ok(self.colorize("Selection is empty.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Item", "Tier", "Status"]);
                for (i, entry) in engine.selection().iter().enumerate() {
                    let status = if stale.contains(&i) { STALE_MARKER } else { "" };
                    builder.push_record([
                        (i + 1).to_string(),
                        entry.name.clone(),
                        entry.tier.to_string(),
                        status.to_string(),
                    ]);
                }

                Ok(self.render(builder))
            }
        }
    }

    /// Format totals and per-item counts of a selection.
    pub fn format_totals(&self, engine: &AggregationEngine) -> Result<String> {
        let totals = engine.compute_totals();
        let counts = engine.compute_counts();

        match self.format {
            OutputFormat::Json => {
                let totals: Map<String, Value> = totals.iter().map(|(k, v)| (k.to_string(), json!(v))).collect();
                let counts: Map<String, Value> = counts.iter().map(|(k, v)| (k.clone(), json!(v))).collect();
                let stale: Vec<Value> = engine
                    .unresolved()
                    .into_iter()
                    .filter_map(|i| engine.selection().get(i))
                    .map(|e| json!(e.key().to_string()))
                    .collect();

                Ok(serde_json::to_string_pretty(&json!({
                    "totals": totals,
                    "counts": counts,
                    "unresolved": stale,
                }))?)
            }
            OutputFormat::Quiet => Ok(totals
                .non_zero()
                .map(|(k, v)| format!("{}\t{}", k, v))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if counts.is_empty() {
                    return Ok(self.colorize("Selection is empty.", "yellow"));
                }

                let mut stats = Builder::default();
                stats.push_record(["Attribute", "Total"]);
                for (name, value) in totals.non_zero() {
                    stats.push_record([name.to_string(), value.to_string()]);
                }

                let mut items = Builder::default();
                items.push_record(["Item", "Count"]);
                for (key, count) in &counts {
                    items.push_record([key.clone(), count.to_string()]);
                }

                let mut out = format!("{}\n{}", self.render(stats), self.render(items));
                let stale = engine.unresolved().len();
                if stale > 0 {
                    out.push('\n');
                    out.push_str(&self.warning(&format!("{} entr(ies) {} and not counted", stale, STALE_MARKER)));
                }
                Ok(out)
            }
        }
    }

    /// Format saved build names with their entry counts.
    pub fn format_builds<'a, I>(&self, builds: I) -> Result<String>
    where
        I: IntoIterator<Item = (&'a str, usize)>,
    {
        let builds: Vec<(&str, usize)> = builds.into_iter().collect();

        match self.format {
            OutputFormat::Json => {
                let list: Vec<Value> = builds
                    .iter()
                    .map(|(name, len)| json!({ "name": name, "entries": len }))
                    .collect();
                Ok(serde_json::to_string_pretty(&list)?)
            }
            OutputFormat::Quiet => Ok(builds.iter().map(|(name, _)| *name).collect::<Vec<_>>().join("\n")),
            OutputFormat::Table => {
                if builds.is_empty() {
                    return Ok(self.colorize("No saved builds.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Build", "Entries"]);
                for (name, len) in &builds {
                    builder.push_record([name.to_string(), len.to_string()]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn record_json(record: &ItemRecord) -> Value {
    let attributes: Map<String, Value> = record
        .attributes
        .iter()
        .map(|(k, v)| (k.clone(), json!(v)))
        .collect();
    json!({
        "name": record.name,
        "tier": record.tier.get(),
        "attributes": attributes,
    })
}
