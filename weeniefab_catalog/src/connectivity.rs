use std::sync::atomic::{AtomicBool, Ordering};

use observability_deps::tracing::warn;

/// A one-way online/offline latch for the world database.
///
/// Starts online. The first store failure trips it offline and from then on catalog calls skip
/// the store entirely. There is no way back short of building a new latch.
#[derive(Debug)]
pub struct Connectivity {
    online: AtomicBool,
}

impl Connectivity {
    pub fn new() -> Self {
        Self {
            online: AtomicBool::new(true),
        }
    }

    /// A latch that is offline from the start, for running without a world database.
    pub fn offline() -> Self {
        Self {
            online: AtomicBool::new(false),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    /// Trip the latch. Returns `true` only for the call that performed the transition.
    pub fn go_offline(&self) -> bool {
        let was_online = self.online.swap(false, Ordering::AcqRel);
        if was_online {
            warn!("world database unavailable, identifier lookups disabled for this session");
        }
        was_online
    }
}

impl Default for Connectivity {
    fn default() -> Self {
        Self::new()
    }
}
