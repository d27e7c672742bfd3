//! Lookup table source config.
use std::path::PathBuf;

use observability_deps::tracing::debug;
use weeniefab_lookup::{AppDirLocator, FileLocator, LookupRegistry, SourceError};

/// CLI config for where lookup tables are read from.
#[derive(Debug, Clone, Default, clap::Parser)]
pub struct LookupSourceConfig {
    /// Read lookup tables from this file instead of searching the application directory.
    #[clap(long = "lookup-file", env = "WEENIEFAB_LOOKUP_FILE", action)]
    pub lookup_file: Option<PathBuf>,

    /// Application directory searched for `Lookups/lookuptables.csv` and `lookuptables.csv`.
    ///
    /// Defaults to the directory of the running executable.
    #[clap(long = "app-dir", env = "WEENIEFAB_APP_DIR", action)]
    pub app_dir: Option<PathBuf>,
}

impl LookupSourceConfig {
    /// Build a registry over the configured source. Nothing is read until first access.
    pub fn registry(&self) -> Result<LookupRegistry, SourceError> {
        if let Some(path) = &self.lookup_file {
            debug!(path = %path.display(), "lookup tables from file");
            return Ok(LookupRegistry::new(FileLocator::new(path)));
        }

        let locator = match &self.app_dir {
            Some(dir) => AppDirLocator::new(dir),
            None => AppDirLocator::for_current_exe()?,
        };
        debug!(app_dir = %locator.app_dir().display(), "lookup tables from application directory");
        Ok(LookupRegistry::new(locator))
    }
}
