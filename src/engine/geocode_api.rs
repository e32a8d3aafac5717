use super::{fallback, salt_for, Engine};

use async_trait::async_trait;
use rand::Rng;

use crate::{
    api::GeocodeAPI,
    entities::Coordinates,
    error::{invalid_input_error, unresolved_location_error, Error},
};

/// Ho Chi Minh City centre, used as the last known position.
pub const REFERENCE_POINT: Coordinates = Coordinates {
    latitude: 10.7769,
    longitude: 106.7009,
};

/// Total width of the box the fallback point is drawn from, in degrees.
const FALLBACK_SPREAD_DEG: f64 = 0.1;

/// A guessed position within ±0.05° of [`REFERENCE_POINT`]. Only acceptable
/// because the result feeds an estimate, never a booking.
pub fn approximate_location<R: Rng + ?Sized>(rng: &mut R) -> Coordinates {
    Coordinates {
        latitude: REFERENCE_POINT.latitude + (rng.gen::<f64>() - 0.5) * FALLBACK_SPREAD_DEG,
        longitude: REFERENCE_POINT.longitude + (rng.gen::<f64>() - 0.5) * FALLBACK_SPREAD_DEG,
    }
}

#[async_trait]
impl GeocodeAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn resolve(&self, address: &str) -> Result<Coordinates, Error> {
        if address.trim().is_empty() {
            return Err(invalid_input_error());
        }

        let remote = self
            .remote_geocode_source()
            .map(|source| async move { source.geocode(address).await.map(Ok::<_, Error>) });

        fallback::attempt_or_else("geocode", remote, || {
            if self.config.strict_geocoding {
                tracing::warn!("no coordinates for address");
                return Err(unresolved_location_error());
            }

            let mut rng = self.rng(salt_for(address));
            Ok(approximate_location(&mut rng))
        })
        .await
    }
}
