use std::sync::Arc;

use observability_deps::tracing::{debug, warn};
use weeniefab_id::{Did, DidType, ParseDidError, parse_did};

use crate::{ArchiveIndex, Connectivity, DidOption, DidStore, SearchQuery, StoreError};

/// Row cap for a full listing of one identifier type
pub const DEFAULT_LIST_LIMIT: u32 = 100_000;

/// Result cap for a search
pub const DEFAULT_SEARCH_TAKE: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("world database is offline")]
    Offline,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A specialized `Error` for catalog errors
pub(crate) type Result<T, E = CatalogError> = std::result::Result<T, E>;

/// Identifier values known to the world database, annotated with archive presence.
///
/// The `try_*` methods report why nothing came back; [`list_values`](Self::list_values) and
/// [`search_values`](Self::search_values) log that instead and return an empty list, which is
/// what a dropdown wants. Any store failure trips the shared [`Connectivity`] latch, after which
/// no call touches the store again.
#[derive(Debug, Clone)]
pub struct DidCatalogService {
    store: Arc<dyn DidStore>,
    connectivity: Arc<Connectivity>,
    archive: Option<Arc<dyn ArchiveIndex>>,
}

impl DidCatalogService {
    pub fn new(store: Arc<dyn DidStore>, connectivity: Arc<Connectivity>) -> Self {
        Self {
            store,
            connectivity,
            archive: None,
        }
    }

    pub fn with_archive(mut self, archive: Arc<dyn ArchiveIndex>) -> Self {
        self.archive = Some(archive);
        self
    }

    pub fn connectivity(&self) -> &Arc<Connectivity> {
        &self.connectivity
    }

    /// The distinct stored values of `did_type`, ascending, at most `limit` of them
    pub async fn try_list_values(&self, did_type: DidType, limit: u32) -> Result<Vec<DidOption>> {
        if !self.connectivity.is_online() {
            return Err(CatalogError::Offline);
        }

        match self.store.distinct_values(did_type, limit).await {
            Ok(dids) => Ok(dids.into_iter().map(|did| self.option(did)).collect()),
            Err(e) => {
                self.connectivity.go_offline();
                Err(e.into())
            }
        }
    }

    pub async fn list_values(&self, did_type: DidType, limit: u32) -> Vec<DidOption> {
        let result = self.try_list_values(did_type, limit).await;
        self.degrade(did_type, result)
    }

    /// Up to `take` of the values of `did_type` matching `query`, see [`SearchQuery`]
    pub async fn try_search_values(
        &self,
        did_type: DidType,
        query: &str,
        take: usize,
    ) -> Result<Vec<DidOption>> {
        let candidates = self.try_list_values(did_type, DEFAULT_LIST_LIMIT).await?;
        Ok(SearchQuery::classify(query).filter(candidates, take))
    }

    pub async fn search_values(
        &self,
        did_type: DidType,
        query: &str,
        take: usize,
    ) -> Vec<DidOption> {
        let result = self.try_search_values(did_type, query, take).await;
        self.degrade(did_type, result)
    }

    /// Check the store is reachable, tripping the latch if it is not. An offline latch stays
    /// offline whatever the outcome.
    pub async fn probe(&self) -> bool {
        if !self.connectivity.is_online() {
            return false;
        }

        match self.store.ping().await {
            Ok(()) => self.connectivity.is_online(),
            Err(e) => {
                debug!(store = %self.store, error = %e, "store probe failed");
                self.connectivity.go_offline();
                false
            }
        }
    }

    pub fn parse_identifier(&self, text: &str) -> Result<Did, ParseDidError> {
        parse_did(text)
    }

    fn option(&self, did: Did) -> DidOption {
        let exists_in_archive = self
            .archive
            .as_ref()
            .is_some_and(|archive| archive.contains(did));
        DidOption::new(did, exists_in_archive)
    }

    fn degrade(&self, did_type: DidType, result: Result<Vec<DidOption>>) -> Vec<DidOption> {
        match result {
            Ok(options) => options,
            Err(CatalogError::Offline) => {
                debug!(%did_type, "world database offline, no identifier values");
                vec![]
            }
            Err(CatalogError::Store(e)) => {
                warn!(
                    %did_type,
                    store = %self.store,
                    error = %e,
                    "failed listing identifier values"
                );
                vec![]
            }
        }
    }
}
