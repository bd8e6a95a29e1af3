use std::time::Duration;

use async_trait::async_trait;
use sqlx::{
    query::{Query, QueryAs},
    sqlite::{SqliteArguments, SqlitePoolOptions, SqliteRow},
    Executor, FromRow, Pool, Sqlite,
};

/// Failure reported by a [`Store`]; the driver error is kept as the source.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database driver error: {0}")]
    Driver(#[from] sqlx::Error),

    #[error("row {0} was not returned after insert")]
    MissingRow(i64),
}

/// Positional statement parameter. Every caller-supplied value reaches the
/// store through one of these, bound to a `?` placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum Param {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Outcome of a mutating statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Execution {
    pub inserted_id: i64,
    pub rows_affected: u64,
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn execute(&self, statement: &str, params: &[Param]) -> Result<Execution, StoreError>;

    async fn query<T>(&self, statement: &str, params: &[Param]) -> Result<Vec<T>, StoreError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin;
}

pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    pub async fn connect(db_uri: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = if is_in_memory(db_uri) {
            // each connection to an in-memory database opens a fresh one
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = options.connect(db_uri).await?;

        tracing::info!(db_uri, "connected to store");

        Ok(Self { pool })
    }

    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::connect("sqlite::memory:", 1).await
    }
}

#[async_trait]
impl Store for SqliteStore {
    #[tracing::instrument(skip(self, params))]
    async fn execute(&self, statement: &str, params: &[Param]) -> Result<Execution, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let result = conn.execute(bind(sqlx::query(statement), params)).await?;

        Ok(Execution {
            inserted_id: result.last_insert_rowid(),
            rows_affected: result.rows_affected(),
        })
    }

    #[tracing::instrument(skip(self, params))]
    async fn query<T>(&self, statement: &str, params: &[Param]) -> Result<Vec<T>, StoreError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let mut conn = self.pool.acquire().await?;

        let rows = bind_as(sqlx::query_as::<_, T>(statement), params)
            .fetch_all(&mut conn)
            .await?;

        tracing::debug!(rows = rows.len(), "query returned");

        Ok(rows)
    }
}

fn is_in_memory(db_uri: &str) -> bool {
    db_uri.contains(":memory:") || db_uri.contains("mode=memory")
}

fn bind<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &[Param],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            Param::Integer(value) => query.bind(*value),
            Param::Real(value) => query.bind(*value),
            Param::Text(value) => query.bind(value.clone()),
        };
    }

    query
}

fn bind_as<'q, T>(
    mut query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
    params: &[Param],
) -> QueryAs<'q, Sqlite, T, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            Param::Integer(value) => query.bind(*value),
            Param::Real(value) => query.bind(*value),
            Param::Text(value) => query.bind(value.clone()),
        };
    }

    query
}

#[cfg(test)]
#[derive(Debug, PartialEq, sqlx::FromRow)]
struct Note {
    id: i64,
    body: String,
}

#[cfg(test)]
async fn note_store() -> SqliteStore {
    let store = SqliteStore::in_memory().await.unwrap();

    store
        .execute(
            "CREATE TABLE notes (id INTEGER PRIMARY KEY AUTOINCREMENT, body TEXT NOT NULL)",
            &[],
        )
        .await
        .unwrap();

    store
}

#[test]
fn execute_reports_inserted_id_and_rows_affected() {
    use tokio_test::block_on;

    block_on(async {
        let store = note_store().await;

        let first = store
            .execute("INSERT INTO notes (body) VALUES (?)", &["a".into()])
            .await
            .unwrap();
        let second = store
            .execute("INSERT INTO notes (body) VALUES (?)", &["b".into()])
            .await
            .unwrap();

        assert_eq!(first, Execution { inserted_id: 1, rows_affected: 1 });
        assert_eq!(second.inserted_id, 2);
    });
}

#[test]
fn query_binds_parameters_instead_of_interpolating() {
    use tokio_test::block_on;

    block_on(async {
        let store = note_store().await;

        store
            .execute("INSERT INTO notes (body) VALUES (?)", &["it's fine".into()])
            .await
            .unwrap();

        let notes: Vec<Note> = store
            .query("SELECT id, body FROM notes WHERE id = ?", &["1 OR 1 = 1".into()])
            .await
            .unwrap();
        assert!(notes.is_empty());

        let notes: Vec<Note> = store
            .query("SELECT id, body FROM notes WHERE body = ?", &["it's fine".into()])
            .await
            .unwrap();
        assert_eq!(
            notes,
            vec![Note {
                id: 1,
                body: "it's fine".into()
            }]
        );
    });
}

#[test]
fn driver_failures_are_rejected_with_cause() {
    use tokio_test::block_on;

    block_on(async {
        let store = note_store().await;

        let err = store
            .execute("INSERT INTO missing (body) VALUES (?)", &["a".into()])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Driver(_)));

        let result: Result<Vec<Note>, StoreError> =
            store.query("SELECT id, body FROM missing", &[]).await;
        assert!(matches!(result, Err(StoreError::Driver(_))));
    });
}

#[test]
fn in_memory_uris_are_detected() {
    assert!(is_in_memory("sqlite::memory:"));
    assert!(is_in_memory("sqlite:file:rides?mode=memory&cache=shared"));
    assert!(!is_in_memory("sqlite://rides.db?mode=rwc"));
}
