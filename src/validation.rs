use serde_json::Value;

use crate::entities::{NewRide, Page, RideSubmission};

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// First rule an input broke. Checks stop at the first violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.message())]
pub enum Violation {
    StartCoordinates,
    EndCoordinates,
    RiderName,
    DriverName,
    DriverVehicle,
    Page,
    PerPage,
}

impl Violation {
    pub fn id(&self) -> &'static str {
        match self {
            Self::StartCoordinates => "start_coordinates",
            Self::EndCoordinates => "end_coordinates",
            Self::RiderName => "rider_name",
            Self::DriverName => "driver_name",
            Self::DriverVehicle => "driver_vehicle",
            Self::Page => "page",
            Self::PerPage => "per_page",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::StartCoordinates => "Start latitude and longitude must be between -90 - 90 and -180 to 180 degrees respectively",
            Self::EndCoordinates => "End latitude and longitude must be between -90 - 90 and -180 to 180 degrees respectively",
            Self::RiderName => "Rider name must be a non empty string",
            Self::DriverName => "Driver name must be a non empty string",
            Self::DriverVehicle => "Driver vehicle must be a non empty string",
            Self::Page => "invalid parameter: page must be a non-negative integer",
            Self::PerPage => "invalid parameter: perPage must be a non-negative integer",
        }
    }
}

pub fn validate_submission(submission: &RideSubmission) -> Result<NewRide, Violation> {
    let (start_lat, start_long) = coordinates(
        submission.start_lat.as_ref(),
        submission.start_long.as_ref(),
    )
    .ok_or(Violation::StartCoordinates)?;

    let (end_lat, end_long) = coordinates(submission.end_lat.as_ref(), submission.end_long.as_ref())
        .ok_or(Violation::EndCoordinates)?;

    let rider_name = non_empty_string(submission.rider_name.as_ref()).ok_or(Violation::RiderName)?;
    let driver_name =
        non_empty_string(submission.driver_name.as_ref()).ok_or(Violation::DriverName)?;
    let driver_vehicle =
        non_empty_string(submission.driver_vehicle.as_ref()).ok_or(Violation::DriverVehicle)?;

    Ok(NewRide {
        start_lat,
        start_long,
        end_lat,
        end_long,
        rider_name,
        driver_name,
        driver_vehicle,
    })
}

pub fn validate_pagination(page: Option<&str>, per_page: Option<&str>) -> Result<Page, Violation> {
    let page = non_negative_integer(page).ok_or(Violation::Page)?;
    let per_page = non_negative_integer(per_page).ok_or(Violation::PerPage)?;

    // offset must stay representable
    per_page.checked_mul(page).ok_or(Violation::Page)?;

    Ok(Page { page, per_page })
}

fn coordinates(lat: Option<&Value>, long: Option<&Value>) -> Option<(f64, f64)> {
    let lat = degrees(lat).filter(|lat| (-MAX_LATITUDE..=MAX_LATITUDE).contains(lat));
    let long = degrees(long).filter(|long| (-MAX_LONGITUDE..=MAX_LONGITUDE).contains(long));

    Some((lat?, long?))
}

/// Numbers pass through, numeric text is parsed, anything else has no value.
fn degrees(value: Option<&Value>) -> Option<f64> {
    let degrees = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    degrees.filter(|degrees| degrees.is_finite())
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}

fn non_negative_integer(value: Option<&str>) -> Option<i64> {
    value?.trim().parse::<i64>().ok().filter(|value| *value >= 0)
}
