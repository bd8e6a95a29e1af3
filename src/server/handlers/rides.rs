use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Extension, Json, Path, Query};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::{Ride, RideSubmission};
use crate::error::{validation_error, Error};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListParams {
    page: Option<String>,
    #[serde(rename = "perPage")]
    per_page: Option<String>,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    body: Result<Json<RideSubmission>, JsonRejection>,
) -> Result<Json<Vec<Ride>>, Error> {
    let Json(submission) = body.map_err(|rejection| {
        tracing::info!(%rejection, "unreadable ride submission");
        validation_error("Request body must be a JSON object")
    })?;

    let rides = api.submit_ride(submission).await?;

    Ok(rides.into())
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Ride>>, Error> {
    let Query(params) = params.map_err(|rejection| {
        tracing::info!(%rejection, "unreadable pagination query");
        validation_error("Query string is malformed")
    })?;

    let rides = api.list_rides(params.page, params.per_page).await?;

    Ok(rides.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Ride>>, Error> {
    let Path(id) = id.map_err(|rejection| {
        tracing::info!(%rejection, "unreadable ride id");
        validation_error("Ride id is malformed")
    })?;

    let rides = api.find_ride(id).await?;

    Ok(rides.into())
}
