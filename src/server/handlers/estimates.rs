use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::api::EstimateAPI;
use crate::entities::{Coordinates, EstimateResult, VehicleClass};
use crate::error::{invalid_input_error, Error};
use crate::server::{request_span, DynAPI};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateParams {
    pub pickup: String,
    #[serde(alias = "dropoff")]
    pub destination: String,
    #[serde(alias = "vehicle_type")]
    pub vehicle_class: VehicleClass,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateFromCoordinatesParams {
    pub pickup: Coordinates,
    #[serde(alias = "destination")]
    pub dropoff: Coordinates,
    #[serde(alias = "vehicle_class")]
    pub vehicle_type: VehicleClass,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<EstimateResult>, Error> {
    let estimate = api
        .request_estimate(&params.pickup, &params.destination, params.vehicle_class)
        .instrument(request_span("estimates::create"))
        .await?;

    Ok(estimate.into())
}

pub async fn create_from_coordinates(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateFromCoordinatesParams>,
) -> Result<Json<EstimateResult>, Error> {
    if !params.pickup.is_valid() || !params.dropoff.is_valid() {
        return Err(invalid_input_error());
    }

    let estimate = api
        .get_estimate(params.pickup, params.dropoff, params.vehicle_type)
        .instrument(request_span("estimates::create_from_coordinates"))
        .await;

    Ok(estimate.into())
}
