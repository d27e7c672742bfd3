//! Presence checks against the content archive.
//!
//! The archive itself is owned elsewhere; the catalog only asks whether an id exists in it.

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;
use std::sync::Arc;

use weeniefab_id::Did;

pub trait ArchiveIndex: std::fmt::Debug + Send + Sync {
    fn contains(&self, did: Did) -> bool;
}

impl<S> ArchiveIndex for HashSet<u32, S>
where
    S: BuildHasher + Send + Sync,
{
    fn contains(&self, did: Did) -> bool {
        HashSet::contains(self, &did.as_u32())
    }
}

impl<S> ArchiveIndex for HashSet<Did, S>
where
    S: BuildHasher + Send + Sync,
{
    fn contains(&self, did: Did) -> bool {
        HashSet::contains(self, &did)
    }
}

impl ArchiveIndex for BTreeSet<u32> {
    fn contains(&self, did: Did) -> bool {
        BTreeSet::contains(self, &did.as_u32())
    }
}

impl ArchiveIndex for BTreeSet<Did> {
    fn contains(&self, did: Did) -> bool {
        BTreeSet::contains(self, &did)
    }
}

impl<T> ArchiveIndex for Arc<T>
where
    T: ArchiveIndex + ?Sized,
{
    fn contains(&self, did: Did) -> bool {
        (**self).contains(did)
    }
}
