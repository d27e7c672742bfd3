//! The identifier catalog: which data identifiers the world database actually uses.
//!
//! A [`DidCatalogService`] reads distinct identifier values per [`DidType`] from a [`DidStore`],
//! annotates each with whether the content archive has it, and filters them for search boxes.
//! The world database is optional at runtime; the first failed store call trips a shared
//! [`Connectivity`] latch and the catalog goes quiet for the rest of the process.
//!
//! [`DidType`]: weeniefab_id::DidType

pub mod archive;
pub mod connectivity;
pub mod interface;
pub mod mem;
pub mod mysql;
pub mod sqlite;

mod option;
mod search;
mod service;

pub use archive::ArchiveIndex;
pub use connectivity::Connectivity;
pub use interface::{DID_PROPERTY_TABLE, DidStore, StoreError};
pub use mem::MemDidStore;
pub use mysql::{MySqlConnectionOptions, MySqlDidStore};
pub use option::DidOption;
pub use search::SearchQuery;
pub use service::{CatalogError, DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_TAKE, DidCatalogService};
pub use sqlite::{SqliteConnectionOptions, SqliteDidStore};
