use axum::extract::{Extension, Json};
use tracing::Instrument;

use crate::api::GeocodeAPI;
use crate::entities::Coordinates;
use crate::error::Error;
use crate::external::GeocodeRequest;
use crate::server::{request_span, DynAPI};

pub async fn resolve(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<GeocodeRequest>,
) -> Result<Json<Coordinates>, Error> {
    let coordinates = api
        .resolve(&params.address)
        .instrument(request_span("geocode::resolve"))
        .await?;

    Ok(coordinates.into())
}
