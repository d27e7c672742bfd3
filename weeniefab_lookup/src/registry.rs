use std::collections::HashMap;
use std::sync::OnceLock;

use observability_deps::tracing::{info, warn};

use crate::{
    LookupEntry, LookupTable, SourceLocator, SourceOrigin, canonical_key, key::fold_key,
    loader::parse_tables,
};

/// What the one load pass of a [`LookupRegistry`] produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// `None` when no source was found or it could not be read
    pub origin: Option<SourceOrigin>,
    pub tables: usize,
    pub dropped_cells: usize,
}

#[derive(Debug, Default)]
struct LoadedTables {
    tables: HashMap<String, LookupTable>,
    summary: LoadSummary,
}

/// Id to label lookup tables, loaded once from a [`SourceLocator`] on first access.
///
/// Concurrent first callers block until the single load pass completes, and the tables never
/// change afterwards. A missing or unreadable source yields a registry with no tables rather
/// than an error; [`get`](Self::get) then returns empty slices.
#[derive(Debug)]
pub struct LookupRegistry {
    locator: Box<dyn SourceLocator>,
    loaded: OnceLock<LoadedTables>,
}

impl LookupRegistry {
    pub fn new(locator: impl SourceLocator + 'static) -> Self {
        Self {
            locator: Box::new(locator),
            loaded: OnceLock::new(),
        }
    }

    /// Load the tables if that has not happened yet. Safe to call any number of times.
    pub fn initialize(&self) -> &LoadSummary {
        &self.loaded().summary
    }

    pub fn is_initialized(&self) -> bool {
        self.loaded.get().is_some()
    }

    /// The entries of the table addressed by `key`, or an empty slice.
    ///
    /// `key` is matched case-insensitively, first as given and then in its canonical form, so
    /// `"Table 3 - Damage Type"`, `"damage type"` and `"DAMAGE_TYPE"` all address the same table.
    pub fn get(&self, key: &str) -> &[LookupEntry] {
        self.table(key)
            .map(LookupTable::entries)
            .unwrap_or_default()
    }

    pub fn table(&self, key: &str) -> Option<&LookupTable> {
        let tables = &self.loaded().tables;
        tables
            .get(&fold_key(key))
            .or_else(|| tables.get(&fold_key(&canonical_key(key))))
    }

    /// Canonical keys of all loaded tables, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.tables().map(LookupTable::key).collect();
        keys.sort_unstable();
        keys
    }

    pub fn tables(&self) -> impl Iterator<Item = &LookupTable> {
        self.loaded().tables.values()
    }

    fn loaded(&self) -> &LoadedTables {
        self.loaded.get_or_init(|| self.load())
    }

    fn load(&self) -> LoadedTables {
        let source = match self.locator.locate() {
            Ok(Some(source)) => source,
            Ok(None) => {
                info!(locator = ?self.locator, "no lookup table source found");
                return LoadedTables::default();
            }
            Err(e) => {
                warn!(error = %e, "unable to open lookup table source");
                return LoadedTables::default();
            }
        };

        let (origin, reader) = source.into_parts();
        match parse_tables(reader) {
            Ok(parsed) => {
                info!(
                    %origin,
                    tables = parsed.tables.len(),
                    dropped_cells = parsed.dropped_cells,
                    "loaded lookup tables"
                );
                LoadedTables {
                    summary: LoadSummary {
                        origin: Some(origin),
                        tables: parsed.tables.len(),
                        dropped_cells: parsed.dropped_cells,
                    },
                    tables: parsed.tables,
                }
            }
            Err(e) => {
                warn!(%origin, error = %e, "failed reading lookup table source");
                LoadedTables::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AppDirLocator, EmbeddedResource, LookupSource, SourceError};
    use pretty_assertions::assert_eq;
    use std::io::{self, BufRead, Read};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const CSV: &str = "\
Table 3 - Damage_Type,Table 7 - Item Type,Unnamed: 2
1 - Slash,0x1 - Melee Weapon,x
2 - Pierce,0x2 - Armor,
4 - Bludgeon,,
1 - Duplicate,0x10 - Food,
";

    #[derive(Debug)]
    struct StaticLocator {
        csv: &'static str,
        calls: Arc<AtomicUsize>,
    }

    impl StaticLocator {
        fn new(csv: &'static str) -> Self {
            Self {
                csv,
                calls: Default::default(),
            }
        }
    }

    impl SourceLocator for StaticLocator {
        fn locate(&self) -> Result<Option<LookupSource>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // widen the window for racing initializers
            std::thread::sleep(std::time::Duration::from_millis(20));
            Ok(Some(LookupSource::new(
                SourceOrigin::Embedded("test".to_string()),
                self.csv.as_bytes(),
            )))
        }
    }

    #[test_log::test]
    fn lookups_are_prefix_and_case_insensitive() {
        let registry = LookupRegistry::new(StaticLocator::new(CSV));

        let by_prefixed = registry.get("Table 3 - Damage Type");
        let by_spaced = registry.get("Damage Type");
        let by_key = registry.get("DAMAGE_TYPE");

        assert_eq!(by_prefixed.len(), 3);
        assert_eq!(by_prefixed, by_spaced);
        assert_eq!(by_prefixed, by_key);
        assert_eq!(by_key[0].label, "Slash");
    }

    #[test_log::test]
    fn unknown_key_is_empty() {
        let registry = LookupRegistry::new(StaticLocator::new(CSV));
        assert!(registry.get("Nope").is_empty());
        assert!(registry.table("Nope").is_none());
    }

    #[test_log::test]
    fn keys_and_summary() {
        let registry = LookupRegistry::new(StaticLocator::new(CSV));
        assert!(!registry.is_initialized());

        assert_eq!(registry.keys(), vec!["Damage_Type", "Item_Type"]);
        assert!(registry.is_initialized());
        assert_eq!(
            registry.initialize(),
            &LoadSummary {
                origin: Some(SourceOrigin::Embedded("test".to_string())),
                tables: 2,
                dropped_cells: 0,
            }
        );
        assert_eq!(
            registry
                .get("item type")
                .iter()
                .map(|e| e.id)
                .collect::<Vec<_>>(),
            vec![1, 2, 16]
        );
    }

    #[test_log::test]
    fn missing_source_loads_zero_tables() {
        let dir = tempfile::tempdir().unwrap();
        let registry = LookupRegistry::new(AppDirLocator::new(dir.path()));

        assert_eq!(registry.initialize(), &LoadSummary::default());
        assert!(registry.get("Damage_Type").is_empty());
        assert!(registry.keys().is_empty());
    }

    #[test_log::test]
    fn embedded_resource_source() {
        let dir = tempfile::tempdir().unwrap();
        let registry = LookupRegistry::new(AppDirLocator::new(dir.path()).with_resource(
            EmbeddedResource {
                name: "app.lookuptables.csv",
                contents: CSV.as_bytes(),
            },
        ));

        assert_eq!(registry.get("damage_type").len(), 3);
    }

    #[derive(Debug)]
    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    impl BufRead for FailingReader {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            Err(io::Error::other("disk on fire"))
        }

        fn consume(&mut self, _amt: usize) {}
    }

    #[derive(Debug)]
    struct BrokenLocator;

    impl SourceLocator for BrokenLocator {
        fn locate(&self) -> Result<Option<LookupSource>, SourceError> {
            Ok(Some(LookupSource::new(
                SourceOrigin::File("broken.csv".into()),
                FailingReader,
            )))
        }
    }

    #[test_log::test]
    fn unreadable_source_loads_zero_tables() {
        let registry = LookupRegistry::new(BrokenLocator);
        assert!(registry.get("Damage_Type").is_empty());
        assert_eq!(registry.initialize().origin, None);
    }

    #[test_log::test]
    fn concurrent_first_access_loads_once() {
        let locator = StaticLocator::new(CSV);
        let calls = Arc::clone(&locator.calls);
        let registry = LookupRegistry::new(locator);

        let lens: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|_| s.spawn(|| registry.get("Damage_Type").len()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(lens.iter().all(|&len| len == 3), "{lens:?}");

        registry.initialize();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
