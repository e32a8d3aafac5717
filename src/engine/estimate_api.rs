use super::{deep_link, fallback, pricing, ranking, route_metrics, Engine};

use async_trait::async_trait;
use rand::Rng;

use crate::{
    api::{EstimateAPI, GeocodeAPI},
    entities::{Coordinates, EstimateResult, Provider, Quote, VehicleClass},
    error::{invalid_input_error, upstream_error, Error},
    external::{EstimateRequest, RemoteEstimate},
};

const MIN_BASE_ETA: i64 = 2;
const MAX_BASE_ETA: i64 = 6;

/// The local pipeline: route metrics, one fare per provider, booking links,
/// then ranking. Reproducible for a given hour and random source.
pub fn estimate_locally<R: Rng + ?Sized>(
    pickup: Coordinates,
    destination: Coordinates,
    vehicle_class: VehicleClass,
    hour: u32,
    rng: &mut R,
) -> EstimateResult {
    let metrics = route_metrics::estimate(pickup, destination, hour, rng);

    // one pickup ETA per request, skewed per provider
    let base_eta = rng.gen_range(MIN_BASE_ETA..=MAX_BASE_ETA);

    let quotes = Provider::ALL
        .into_iter()
        .map(|provider| {
            let eta = (base_eta + provider.eta_offset()).max(1) as u32;

            Quote::new(
                provider,
                vehicle_class,
                pricing::price(provider, vehicle_class, &metrics),
                eta,
                deep_link::build_link(provider, pickup, destination),
            )
        })
        .collect();

    EstimateResult {
        distance_km: metrics.distance_km,
        traffic_factor: metrics.traffic_factor,
        quotes: ranking::rank(quotes),
    }
}

/// Maps a remote body onto the canonical result. Unknown providers and
/// repeats of a provider are dropped; a body with nothing usable left counts
/// as a failed source. Prices are rounded like local fares.
fn normalize(
    remote: RemoteEstimate,
    pickup: Coordinates,
    destination: Coordinates,
    vehicle_class: VehicleClass,
) -> Result<EstimateResult, Error> {
    let mut quotes: Vec<Quote> = Vec::with_capacity(remote.results.len());
    let mut remote_ranked = true;

    for item in remote.results {
        let provider: Provider = match item.provider.parse() {
            Ok(provider) => provider,
            Err(_) => {
                tracing::warn!(provider = %item.provider, "dropping quote from unknown provider");
                continue;
            }
        };

        if quotes.iter().any(|quote| quote.provider == provider) {
            tracing::warn!(%provider, "dropping repeated quote for provider");
            continue;
        }

        if !item.price.is_finite() || item.price < 0.0 || !item.eta.is_finite() {
            tracing::warn!(%provider, "dropping quote with unusable price or eta");
            continue;
        }

        let booking_link = item
            .deep_link
            .filter(|link| !link.trim().is_empty())
            .unwrap_or_else(|| deep_link::build_link(provider, pickup, destination));

        let mut quote = Quote::new(
            provider,
            vehicle_class,
            pricing::round_to_denomination(item.price),
            item.eta.round().max(1.0) as u32,
            booking_link,
        );

        match item.score.filter(|score| score.is_finite()) {
            Some(score) => quote.rank_score = score,
            None => remote_ranked = false,
        }

        quotes.push(quote);
    }

    if quotes.is_empty() {
        return Err(upstream_error());
    }

    // identical scores carry no ordering, usually a remote that defaults them to zero
    let distinct_scores = quotes
        .windows(2)
        .any(|pair| pair[0].rank_score != pair[1].rank_score);

    let quotes = if remote_ranked && distinct_scores {
        ranking::sort_by_score(quotes)
    } else {
        ranking::rank(quotes)
    };

    let distance_km = remote
        .distance_km
        .filter(|distance| distance.is_finite() && *distance > 0.0)
        .unwrap_or_else(|| route_metrics::route_distance_km(pickup, destination));

    let traffic_factor = remote
        .traffic_factor
        .filter(|factor| factor.is_finite() && *factor > 0.0)
        .unwrap_or(1.0);

    Ok(EstimateResult {
        distance_km,
        traffic_factor,
        quotes,
    })
}

#[async_trait]
impl EstimateAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn get_estimate(
        &self,
        pickup: Coordinates,
        destination: Coordinates,
        vehicle_class: VehicleClass,
    ) -> EstimateResult {
        let remote = self.remote_estimate_source().map(|source| async move {
            let request = EstimateRequest {
                pickup,
                dropoff: destination,
                vehicle_type: vehicle_class,
            };
            let data = source.fetch_estimate(&request).await?;

            normalize(data, pickup, destination, vehicle_class)
        });

        fallback::attempt_or_else("estimate", remote, || {
            let mut rng = self.rng(0);
            estimate_locally(pickup, destination, vehicle_class, (self.clock)(), &mut rng)
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn request_estimate(
        &self,
        pickup_text: &str,
        destination_text: &str,
        vehicle_class: VehicleClass,
    ) -> Result<EstimateResult, Error> {
        if pickup_text.trim().is_empty() || destination_text.trim().is_empty() {
            return Err(invalid_input_error());
        }

        let (pickup, destination) =
            futures::try_join!(self.resolve(pickup_text), self.resolve(destination_text))?;

        Ok(self.get_estimate(pickup, destination, vehicle_class).await)
    }
}
