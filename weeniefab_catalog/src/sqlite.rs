//! A SQLite backed [`DidStore`], for local copies of the world database.

use std::fmt::Display;

use async_trait::async_trait;
use observability_deps::tracing::debug;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use weeniefab_id::{Did, DidType};

use crate::interface::{DidStore, Result, StoreError};

/// SQLite connection options.
#[derive(Debug, Clone)]
pub struct SqliteConnectionOptions {
    /// local file path to .sqlite file
    pub file_path: String,

    /// Maximum number of concurrent connections.
    pub max_conns: u32,
}

impl SqliteConnectionOptions {
    /// Default value for [`max_conns`](Self::max_conns).
    pub const DEFAULT_MAX_CONNS: u32 = 2;

    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            max_conns: Self::DEFAULT_MAX_CONNS,
        }
    }
}

/// SQLite store. The database is opened read-only.
#[derive(Debug)]
pub struct SqliteDidStore {
    pool: Pool<Sqlite>,
    options: SqliteConnectionOptions,
}

impl SqliteDidStore {
    pub fn connect_lazy(options: SqliteConnectionOptions) -> Self {
        let connect_options = SqliteConnectOptions::new()
            .filename(&options.file_path)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_conns)
            .connect_lazy_with(connect_options);

        Self { pool, options }
    }
}

impl Display for SqliteDidStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sqlite(path={})", self.options.file_path)
    }
}

#[async_trait]
impl DidStore for SqliteDidStore {
    async fn distinct_values(&self, did_type: DidType, limit: u32) -> Result<Vec<Did>> {
        debug!(%did_type, limit, "querying distinct did values");

        let rows: Vec<i64> = sqlx::query_scalar(&format!(
            "SELECT DISTINCT value FROM {table} WHERE type = ? ORDER BY value LIMIT ?;",
            table = crate::DID_PROPERTY_TABLE,
        ))
        .bind(did_type.as_u32())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)?;

        rows.into_iter()
            .map(|value| {
                u32::try_from(value)
                    .map(Did::new)
                    .map_err(|_| StoreError::ValueOutOfRange { did_type, value })
            })
            .collect()
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1;")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(StoreError::from_sqlx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sqlx::Connection;
    use sqlx::sqlite::SqliteConnection;
    use std::path::Path;

    async fn seed(path: &Path, rows: &[(u32, i64)]) {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let mut conn = SqliteConnection::connect_with(&options).await.unwrap();

        sqlx::query(
            "CREATE TABLE weenie_properties_d_i_d (
                object_id INTEGER NOT NULL,
                type INTEGER NOT NULL,
                value INTEGER NOT NULL
            );",
        )
        .execute(&mut conn)
        .await
        .unwrap();

        for (object_id, &(did_type, value)) in rows.iter().enumerate() {
            sqlx::query(
                "INSERT INTO weenie_properties_d_i_d (object_id, type, value) VALUES (?, ?, ?);",
            )
            .bind(object_id as i64)
            .bind(did_type)
            .bind(value)
            .execute(&mut conn)
            .await
            .unwrap();
        }

        conn.close().await.unwrap();
    }

    fn store(path: &Path) -> SqliteDidStore {
        SqliteDidStore::connect_lazy(SqliteConnectionOptions::new(path.to_string_lossy()))
    }

    #[test_log::test(tokio::test)]
    async fn distinct_ascending_and_limited() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.sqlite");
        seed(
            &path,
            &[(1, 30), (1, 10), (8, 0x0600_0001), (1, 20), (1, 10), (1, 0xFFFF_FFFF)],
        )
        .await;

        let store = store(&path);
        assert!(store.to_string().starts_with("Sqlite(path="));
        store.ping().await.unwrap();

        assert_eq!(
            store.distinct_values(DidType::new(1), 100).await.unwrap(),
            [10, 20, 30, u32::MAX].map(Did::new)
        );
        assert_eq!(
            store.distinct_values(DidType::new(1), 2).await.unwrap(),
            [10, 20].map(Did::new)
        );
        assert_eq!(
            store.distinct_values(DidType::new(8), 100).await.unwrap(),
            [Did::new(0x0600_0001)]
        );
        assert!(
            store
                .distinct_values(DidType::new(3), 100)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[test_log::test(tokio::test)]
    async fn out_of_range_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.sqlite");
        seed(&path, &[(1, 5), (1, -1)]).await;

        let err = store(&path)
            .distinct_values(DidType::new(1), 100)
            .await
            .unwrap_err();
        assert!(
            matches!(err, StoreError::ValueOutOfRange { value: -1, .. }),
            "{err}"
        );
    }

    #[test_log::test(tokio::test)]
    async fn missing_database_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir.path().join("absent.sqlite"));

        assert!(store.ping().await.is_err());
        assert!(store.distinct_values(DidType::new(1), 10).await.is_err());
    }

    #[test_log::test(tokio::test)]
    async fn missing_table_is_a_query_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.sqlite");
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        SqliteConnection::connect_with(&options)
            .await
            .unwrap()
            .close()
            .await
            .unwrap();

        let err = store(&path)
            .distinct_values(DidType::new(1), 10)
            .await
            .unwrap_err();
        assert!(!err.is_unreachable(), "{err}");
    }
}
