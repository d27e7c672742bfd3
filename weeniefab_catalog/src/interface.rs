//! The store interface the identifier catalog reads from.

use async_trait::async_trait;
use weeniefab_id::{Did, DidType};

/// Table holding every data identifier property of every weenie in the world database
pub const DID_PROPERTY_TABLE: &str = "weenie_properties_d_i_d";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unreachable: {source}")]
    Unreachable { source: sqlx::Error },

    #[error("store query failed: {source}")]
    QueryFailed { source: sqlx::Error },

    #[error("value {value} stored for did type {did_type} does not fit in 32 bits")]
    ValueOutOfRange { did_type: DidType, value: i64 },
}

impl StoreError {
    /// Sort a driver error into "could not talk to the store" or "the store said no"
    pub fn from_sqlx(source: sqlx::Error) -> Self {
        match source {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Unreachable { source },
            _ => Self::QueryFailed { source },
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }
}

/// A specialized `Error` for store errors
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Read access to the data identifier properties of the world database.
///
/// `Display` should describe the backend without credentials; it ends up in logs.
#[async_trait]
pub trait DidStore: std::fmt::Debug + std::fmt::Display + Send + Sync {
    /// The distinct values stored for `did_type`, ascending, at most `limit` of them
    async fn distinct_values(&self, did_type: DidType, limit: u32) -> Result<Vec<Did>>;

    /// Cheap round trip to check the store is reachable
    async fn ping(&self) -> Result<()>;
}
