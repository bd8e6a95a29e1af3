use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: i64,
    pub start_lat: f64,
    pub start_long: f64,
    pub end_lat: f64,
    pub end_long: f64,
    pub rider_name: String,
    pub driver_name: String,
    pub driver_vehicle: String,
    pub created: NaiveDateTime,
}

/// Untrusted submission body. Fields stay as raw JSON until validated, so a
/// coordinate sent as text or a name sent as a number is a validation
/// outcome rather than a decode failure.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RideSubmission {
    pub start_lat: Option<Value>,
    pub start_long: Option<Value>,
    pub end_lat: Option<Value>,
    pub end_long: Option<Value>,
    pub rider_name: Option<Value>,
    pub driver_name: Option<Value>,
    pub driver_vehicle: Option<Value>,
}

/// A submission that passed validation and may be persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct NewRide {
    pub start_lat: f64,
    pub start_long: f64,
    pub end_lat: f64,
    pub end_long: f64,
    pub rider_name: String,
    pub driver_name: String,
    pub driver_vehicle: String,
}

#[test]
fn ride_serializes_with_camel_case_fields() {
    use chrono::NaiveDate;

    let ride = Ride {
        id: 1,
        start_lat: 0.0,
        start_long: 0.0,
        end_lat: 0.5,
        end_long: 0.5,
        rider_name: "riderName".into(),
        driver_name: "driverName".into(),
        driver_vehicle: "driverVehicle".into(),
        created: NaiveDate::from_ymd_opt(2022, 3, 1)
            .and_then(|date| date.and_hms_opt(10, 0, 0))
            .unwrap(),
    };

    let value = serde_json::to_value(&ride).unwrap();

    assert_eq!(value["id"], 1);
    assert_eq!(value["startLat"], 0.0);
    assert_eq!(value["endLong"], 0.5);
    assert_eq!(value["riderName"], "riderName");
    assert_eq!(value["driverVehicle"], "driverVehicle");
    assert_eq!(value["created"], "2022-03-01T10:00:00");
}

#[test]
fn submission_tolerates_missing_and_mistyped_fields() {
    let submission: RideSubmission = serde_json::from_value(serde_json::json!({
        "start_lat": "12.5",
        "rider_name": 7,
    }))
    .unwrap();

    assert_eq!(submission.start_lat, Some(Value::from("12.5")));
    assert_eq!(submission.rider_name, Some(Value::from(7)));
    assert!(submission.driver_vehicle.is_none());
}
