//! An in-memory [`DidStore`], for tests and for running without a world database.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use async_trait::async_trait;
use parking_lot::RwLock;
use weeniefab_id::{Did, DidType};

use crate::interface::{DidStore, Result};

#[derive(Debug, Default)]
pub struct MemDidStore {
    values: RwLock<BTreeMap<DidType, BTreeSet<Did>>>,
}

impl MemDidStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(self, did_type: DidType, dids: impl IntoIterator<Item = Did>) -> Self {
        self.values.write().entry(did_type).or_default().extend(dids);
        self
    }

    pub fn insert(&self, did_type: DidType, did: Did) {
        self.values.write().entry(did_type).or_default().insert(did);
    }
}

impl Display for MemDidStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Memory")
    }
}

#[async_trait]
impl DidStore for MemDidStore {
    async fn distinct_values(&self, did_type: DidType, limit: u32) -> Result<Vec<Did>> {
        Ok(self
            .values
            .read()
            .get(&did_type)
            .map(|dids| dids.iter().copied().take(limit as usize).collect())
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
