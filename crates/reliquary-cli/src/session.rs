//! Live state shared by the REPL and the one-shot commands.

use crate::config::Config;
use crate::error::{CliError, Result};
use reliquary_catalog::{load_catalog, ParserConfig};
use reliquary_domain::traits::SnapshotBackend;
use reliquary_domain::{AggregationEngine, Catalog, ItemRecord, SelectionEntry, Tier};
use reliquary_store::{SnapshotStore, SqliteBackend};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Open the saved-builds database named by the config.
pub fn open_store(config: &Config) -> Result<SnapshotStore<SqliteBackend>> {
    let path = config.database_path()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    debug!("Opening build store at {}", path.display());
    Ok(SnapshotStore::load_all(SqliteBackend::new(&path)?))
}

impl Session<SqliteBackend> {
    /// Open the store and load the catalog named by the config.
    ///
    /// With `lenient`, an unreadable catalog is logged and replaced by an
    /// empty one so the REPL can still start and `reload` later.
    pub async fn open(config: &Config, lenient: bool) -> Result<Self> {
        let store = open_store(config)?;
        let catalog = match load_catalog(&config.catalog_path, &config.parser).await {
            Ok(catalog) => catalog,
            Err(e) if lenient => {
                warn!("Starting with an empty catalog: {}", e);
                Catalog::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self::new(
            catalog,
            store,
            config.catalog_path.clone(),
            config.parser.clone(),
        ))
    }
}

/// Catalog, current selection and saved builds.
///
/// Positions taken by the methods here are 1-based, as typed by the user.
pub struct Session<B> {
    engine: AggregationEngine,
    store: SnapshotStore<B>,
    catalog_path: PathBuf,
    parser: ParserConfig,
}

impl<B> Session<B>
where
    B: SnapshotBackend,
    B::Error: fmt::Display,
{
    /// Create a session over an already loaded catalog.
    pub fn new(catalog: Catalog, store: SnapshotStore<B>, catalog_path: PathBuf, parser: ParserConfig) -> Self {
        Self {
            engine: AggregationEngine::new(catalog),
            store,
            catalog_path,
            parser,
        }
    }

    /// Aggregation engine holding the catalog and the selection.
    pub fn engine(&self) -> &AggregationEngine {
        &self.engine
    }

    /// Saved builds.
    pub fn store(&self) -> &SnapshotStore<B> {
        &self.store
    }

    /// File the catalog was last loaded from.
    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Find a catalog record; without a tier the lowest tier of `name` is used.
    pub fn find(&self, name: &str, tier: Option<Tier>) -> Result<&ItemRecord> {
        let catalog = self.engine.catalog();
        let found = match tier {
            Some(tier) => catalog.get(name, tier),
            None => catalog.find_by_name(name).min_by_key(|r| r.tier),
        };

        found.ok_or_else(|| {
            CliError::UnknownItem(match tier {
                Some(tier) => format!("{} (tier {})", name, tier),
                None => name.to_string(),
            })
        })
    }

    /// Append an item to the selection.
    pub fn add(&mut self, name: &str, tier: Option<Tier>) -> Result<SelectionEntry> {
        let record = self.find(name, tier)?.clone();
        self.engine.select(&record);
        debug!("Selected {}", record.key());
        Ok(SelectionEntry::from(&record))
    }

    /// Remove the entry at a 1-based position.
    pub fn remove(&mut self, position: usize) -> Result<SelectionEntry> {
        let index = self.index(position)?;
        let entry = self.engine.selection().entries()[index].clone();
        self.engine.remove(index);
        Ok(entry)
    }

    /// Change the tier of the entry at a 1-based position.
    ///
    /// The tier is not checked against the catalog; returns whether the
    /// entry still resolves afterwards.
    pub fn set_tier(&mut self, position: usize, tier: Tier) -> Result<bool> {
        let index = self.index(position)?;
        self.engine.set_tier(index, tier);
        Ok(self.engine.resolve(index).is_some())
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.engine.clear();
    }

    /// Save the selection; returns the name it was stored under.
    pub fn save(&mut self, name: Option<&str>) -> Result<String> {
        Ok(self.store.save(name, self.engine.selection())?)
    }

    /// Replace the selection with a saved build.
    pub fn load(&mut self, name: &str) -> Result<usize> {
        if !self.store.contains(name) {
            return Err(CliError::UnknownBuild(name.to_string()));
        }
        let selection = self.store.load(name, self.engine.selection());
        let len = selection.len();
        self.engine.replace_selection(selection);
        Ok(len)
    }

    /// Delete a saved build; returns whether it existed.
    pub fn delete(&mut self, name: &str) -> Result<bool> {
        let existed = self.store.contains(name);
        self.store.delete(name)?;
        Ok(existed)
    }

    /// Engine over a saved build, leaving the current selection alone.
    pub fn build_engine(&self, name: &str) -> Result<AggregationEngine> {
        let selection = self
            .store
            .get(name)
            .ok_or_else(|| CliError::UnknownBuild(name.to_string()))?;
        let mut engine = AggregationEngine::new(self.engine.catalog().clone());
        engine.replace_selection(selection.clone());
        Ok(engine)
    }

    /// Re-read the catalog, optionally from a new file; the selection is kept.
    pub async fn reload(&mut self, path: Option<PathBuf>) -> Result<usize> {
        let path = path.unwrap_or_else(|| self.catalog_path.clone());
        let catalog = load_catalog(&path, &self.parser).await?;
        let len = catalog.len();

        self.engine.replace_catalog(catalog);
        self.catalog_path = path;
        info!("Catalog reloaded from {} ({} records)", self.catalog_path.display(), len);
        Ok(len)
    }

    fn index(&self, position: usize) -> Result<usize> {
        let len = self.engine.selection().len();
        if position == 0 || position > len {
            return Err(CliError::InvalidInput(format!(
                "No entry at position {} (selection has {})",
                position, len
            )));
        }
        Ok(position - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reliquary_catalog::parse_catalog;
    use reliquary_store::MemoryBackend;
    use std::fs;
    use tempfile::TempDir;

    const CSV: &str = "name,tier,power,luck\nRing,1,10,0\n,2,20,1\nAmulet,1,3,3\n";

    fn session() -> Session<MemoryBackend> {
        let parser = ParserConfig::english();
        let catalog = parse_catalog(CSV, &parser).unwrap();
        let store = SnapshotStore::load_all(MemoryBackend::new());
        Session::new(catalog, store, PathBuf::from("catalog.csv"), parser)
    }

    fn tier(n: u32) -> Tier {
        Tier::new(n).unwrap()
    }

    #[test]
    fn test_add_defaults_to_lowest_tier() {
        let mut session = session();
        let entry = session.add("Ring", None).unwrap();
        assert_eq!(entry.tier, Tier::FIRST);

        let entry = session.add("Ring", Some(tier(2))).unwrap();
        assert_eq!(entry.tier, tier(2));
        assert_eq!(session.engine().compute_totals().get("power"), Some(30.0));
    }

    #[test]
    fn test_find_with_owned_name() {
        let session = session();
        let record = {
            let name = format!("{} ", "Ring").trim_end().to_string();
            session.find(&name, None).unwrap()
        };
        assert_eq!(record.tier, Tier::FIRST);
        assert_eq!(record.attribute("power"), Some(10.0));
    }

    #[test]
    fn test_add_unknown_item() {
        let mut session = session();
        assert!(matches!(session.add("Crown", None), Err(CliError::UnknownItem(_))));
        assert!(matches!(session.add("Ring", Some(tier(9))), Err(CliError::UnknownItem(_))));
        assert!(session.engine().selection().is_empty());
    }

    #[test]
    fn test_positions_are_one_based() {
        let mut session = session();
        session.add("Ring", None).unwrap();
        session.add("Amulet", None).unwrap();

        assert!(session.remove(0).is_err());
        assert!(session.remove(3).is_err());
        let removed = session.remove(1).unwrap();
        assert_eq!(removed.name, "Ring");
        assert_eq!(session.engine().selection().len(), 1);
    }

    #[test]
    fn test_set_tier_reports_stale_entries() {
        let mut session = session();
        session.add("Ring", None).unwrap();

        assert!(session.set_tier(1, tier(2)).unwrap());
        assert_eq!(session.engine().compute_totals().get("power"), Some(20.0));

        assert!(!session.set_tier(1, tier(3)).unwrap());
        assert_eq!(session.engine().unresolved(), vec![0]);
    }

    #[test]
    fn test_save_load_and_delete() {
        let mut session = session();
        session.add("Ring", None).unwrap();
        let name = session.save(Some("first")).unwrap();
        assert_eq!(name, "first");

        session.clear();
        assert_eq!(session.load("first").unwrap(), 1);
        assert_eq!(session.engine().selection().len(), 1);

        assert!(matches!(session.load("missing"), Err(CliError::UnknownBuild(_))));
        assert!(session.delete("first").unwrap());
        assert!(!session.delete("first").unwrap());
    }

    #[test]
    fn test_build_engine_leaves_selection_alone() {
        let mut session = session();
        session.add("Amulet", None).unwrap();
        session.save(Some("b")).unwrap();
        session.add("Ring", None).unwrap();

        let engine = session.build_engine("b").unwrap();
        assert_eq!(engine.selection().len(), 1);
        assert_eq!(session.engine().selection().len(), 2);
    }

    #[tokio::test]
    async fn test_reload_keeps_selection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.csv");
        fs::write(&path, "name,tier,power\nRing,1,99\n").unwrap();

        let mut session = session();
        session.add("Ring", None).unwrap();
        session.add("Amulet", None).unwrap();

        assert_eq!(session.reload(Some(path.clone())).await.unwrap(), 1);
        assert_eq!(session.catalog_path(), path.as_path());
        assert_eq!(session.engine().selection().len(), 2);
        assert_eq!(session.engine().compute_totals().get("power"), Some(99.0));
        assert_eq!(session.engine().unresolved(), vec![1]);
    }
}
