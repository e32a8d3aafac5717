use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, Provider};

/// Returned for provider names outside the roster.
pub const UNRECOGNIZED_PROVIDER_LINK: &str = "#";

/// Time the OS gets to hand the native link to the app before the web page opens.
pub const WEB_FALLBACK_DELAY: Duration = Duration::from_millis(1500);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingLinks {
    pub native: String,
    pub web: String,
    pub fallback_after_ms: u64,
}

pub fn build_link(provider: Provider, pickup: Coordinates, destination: Coordinates) -> String {
    let (p, d) = (pickup, destination);

    match provider {
        Provider::Grab => format!(
            "grab://open?screenType=BOOKING&sourceLatitude={}&sourceLongitude={}&dropoffLatitude={}&dropoffLongitude={}",
            p.latitude, p.longitude, d.latitude, d.longitude
        ),
        Provider::Be => format!(
            "be://booking?pickup_lat={}&pickup_lng={}&dropoff_lat={}&dropoff_lng={}",
            p.latitude, p.longitude, d.latitude, d.longitude
        ),
        Provider::XanhSm => format!(
            "xanhsm://booking?p_lat={}&p_lng={}&d_lat={}&d_lng={}",
            p.latitude, p.longitude, d.latitude, d.longitude
        ),
    }
}

pub fn build_link_named(provider: &str, pickup: Coordinates, destination: Coordinates) -> String {
    match provider.parse::<Provider>() {
        Ok(provider) => build_link(provider, pickup, destination),
        Err(_) => UNRECOGNIZED_PROVIDER_LINK.into(),
    }
}

pub fn booking_links(
    provider: Provider,
    pickup: Coordinates,
    destination: Coordinates,
) -> BookingLinks {
    BookingLinks {
        native: build_link(provider, pickup, destination),
        web: provider.web_url().into(),
        fallback_after_ms: WEB_FALLBACK_DELAY.as_millis() as u64,
    }
}
