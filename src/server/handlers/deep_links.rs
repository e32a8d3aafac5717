use axum::extract::{Json, Path, Query};
use serde::{Deserialize, Serialize};

use crate::engine::deep_link::{
    booking_links, build_link_named, BookingLinks, UNRECOGNIZED_PROVIDER_LINK, WEB_FALLBACK_DELAY,
};
use crate::entities::{Coordinates, Provider};
use crate::error::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct FindParams {
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub dropoff_lat: f64,
    pub dropoff_lng: f64,
}

pub async fn find(
    Path(provider): Path<String>,
    Query(params): Query<FindParams>,
) -> Result<Json<BookingLinks>, Error> {
    let pickup = Coordinates::new(params.pickup_lat, params.pickup_lng)?;
    let dropoff = Coordinates::new(params.dropoff_lat, params.dropoff_lng)?;

    let links = match provider.parse::<Provider>() {
        Ok(provider) => booking_links(provider, pickup, dropoff),
        Err(_) => BookingLinks {
            native: build_link_named(&provider, pickup, dropoff),
            web: UNRECOGNIZED_PROVIDER_LINK.into(),
            fallback_after_ms: WEB_FALLBACK_DELAY.as_millis() as u64,
        },
    };

    Ok(links.into())
}
