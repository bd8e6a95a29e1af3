use std::sync::Arc;

use async_trait::async_trait;

use crate::entities::{Ride, RideSubmission};
use crate::error::Error;

#[async_trait]
pub trait RideAPI {
    /// Validates and stores a ride, returning the stored record as a
    /// single-element list.
    async fn submit_ride(&self, submission: RideSubmission) -> Result<Vec<Ride>, Error>;

    /// Lists rides in id order; `page` is zero-based.
    async fn list_rides(
        &self,
        page: Option<String>,
        per_page: Option<String>,
    ) -> Result<Vec<Ride>, Error>;

    async fn find_ride(&self, id: String) -> Result<Vec<Ride>, Error>;
}

pub trait API: RideAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
