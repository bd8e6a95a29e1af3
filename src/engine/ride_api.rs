use super::Engine;

use async_trait::async_trait;

use crate::{
    api::RideAPI,
    db::{Store, StoreError},
    entities::{Ride, RideSubmission},
    error::{rides_not_found_error, Error},
    validation::{validate_pagination, validate_submission},
};

const INSERT_RIDE: &str = "
    INSERT INTO rides (start_lat, start_long, end_lat, end_long, rider_name, driver_name, driver_vehicle)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";

const SELECT_RIDE_BY_ID: &str = "
    SELECT id, start_lat, start_long, end_lat, end_long, rider_name, driver_name, driver_vehicle, created
    FROM rides
    WHERE id = ?
";

const SELECT_RIDE_PAGE: &str = "
    SELECT id, start_lat, start_long, end_lat, end_long, rider_name, driver_name, driver_vehicle, created
    FROM rides
    ORDER BY id
    LIMIT ? OFFSET ?
";

#[async_trait]
impl<S: Store> RideAPI for Engine<S> {
    #[tracing::instrument(skip(self))]
    async fn submit_ride(&self, submission: RideSubmission) -> Result<Vec<Ride>, Error> {
        let ride = validate_submission(&submission).map_err(|violation| {
            tracing::info!(violation = violation.id(), "rejecting ride submission");
            violation
        })?;

        let execution = self
            .store
            .execute(
                INSERT_RIDE,
                &[
                    ride.start_lat.into(),
                    ride.start_long.into(),
                    ride.end_lat.into(),
                    ride.end_long.into(),
                    ride.rider_name.into(),
                    ride.driver_name.into(),
                    ride.driver_vehicle.into(),
                ],
            )
            .await?;

        // re-read so the caller sees store-assigned fields
        let rides: Vec<Ride> = self
            .store
            .query(SELECT_RIDE_BY_ID, &[execution.inserted_id.into()])
            .await?;

        if rides.is_empty() {
            return Err(StoreError::MissingRow(execution.inserted_id).into());
        }

        tracing::info!(id = execution.inserted_id, "stored ride");

        Ok(rides)
    }

    #[tracing::instrument(skip(self))]
    async fn list_rides(
        &self,
        page: Option<String>,
        per_page: Option<String>,
    ) -> Result<Vec<Ride>, Error> {
        let page =
            validate_pagination(page.as_deref(), per_page.as_deref()).map_err(|violation| {
                tracing::info!(violation = violation.id(), "rejecting pagination");
                violation
            })?;

        let rides: Vec<Ride> = self
            .store
            .query(SELECT_RIDE_PAGE, &[page.limit().into(), page.offset().into()])
            .await?;

        if rides.is_empty() {
            tracing::debug!(offset = page.offset(), "no rides in page");
            return Err(rides_not_found_error());
        }

        Ok(rides)
    }

    #[tracing::instrument(skip(self))]
    async fn find_ride(&self, id: String) -> Result<Vec<Ride>, Error> {
        let rides: Vec<Ride> = self.store.query(SELECT_RIDE_BY_ID, &[id.into()]).await?;

        if rides.is_empty() {
            return Err(rides_not_found_error());
        }

        Ok(rides)
    }
}
