//! Lookup tables for labeled dropdowns.
//!
//! The source is a spreadsheet export with one lookup category per column. Each cell holds a
//! loosely formatted `id - label` pair; see [`parse_cell`] for the accepted shapes. Columns are
//! parsed into [`LookupTable`]s addressed by a case-insensitive [`canonical_key`], and served
//! from a [`LookupRegistry`] that loads its source exactly once.
//!
//! ```
//! use weeniefab_lookup::{LookupRegistry, LookupSource, SourceError, SourceLocator, SourceOrigin};
//!
//! #[derive(Debug)]
//! struct Inline;
//!
//! impl SourceLocator for Inline {
//!     fn locate(&self) -> Result<Option<LookupSource>, SourceError> {
//!         let csv: &'static [u8] = b"Table 3 - Damage Type\n1 - Slash\n2 - Pierce\n";
//!         Ok(Some(LookupSource::new(SourceOrigin::Embedded("inline".into()), csv)))
//!     }
//! }
//!
//! let registry = LookupRegistry::new(Inline);
//! assert_eq!(registry.get("damage type")[1].label, "Pierce");
//! assert!(registry.get("spell school").is_empty());
//! ```

mod cell;
mod key;
mod loader;
mod registry;
mod row;
mod source;
mod table;

pub use cell::{CellError, parse_cell};
pub use key::canonical_key;
pub use registry::{LoadSummary, LookupRegistry};
pub use source::{
    AppDirLocator, EmbeddedResource, FileLocator, LOOKUP_DIR_NAME, LOOKUP_FILE_NAME,
    LookupSource, SourceError, SourceLocator, SourceOrigin,
};
pub use table::{LookupEntry, LookupTable};
