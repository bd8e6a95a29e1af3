mod ride_api;

use crate::{api::API, db::Store, error::Error};

const CREATE_RIDES_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS rides (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        start_lat REAL NOT NULL,
        start_long REAL NOT NULL,
        end_lat REAL NOT NULL,
        end_long REAL NOT NULL,
        rider_name TEXT NOT NULL,
        driver_name TEXT NOT NULL,
        driver_vehicle TEXT NOT NULL,
        created DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
";

/// Ride service. Holds the injected store and nothing else, so concurrent
/// requests share no mutable state here.
pub struct Engine<S> {
    store: S,
}

impl<S: Store> Engine<S> {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(store: S) -> Result<Self, Error> {
        store.execute(CREATE_RIDES_TABLE, &[]).await?;

        Ok(Self { store })
    }
}

impl<S: Store + 'static> API for Engine<S> {}
