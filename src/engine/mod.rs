pub mod deep_link;
mod estimate_api;
pub mod fallback;
mod geocode_api;
pub mod pricing;
pub mod ranking;
pub mod route_metrics;

pub use estimate_api::estimate_locally;
pub use geocode_api::{approximate_location, REFERENCE_POINT};

use std::sync::Arc;

use chrono::Timelike;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    api::API,
    config::Config,
    external::{EstimateSource, GeocodeSource, HttpEstimateSource, HttpGeocodeSource},
};

/// Local hour of day, 0-23.
pub type Clock = fn() -> u32;

pub fn local_hour() -> u32 {
    chrono::Local::now().hour()
}

/// Stateless between requests: every call builds its own random source and
/// reads the clock afresh.
#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    estimate_source: Option<Arc<dyn EstimateSource>>,
    geocode_source: Option<Arc<dyn GeocodeSource>>,
    clock: Clock,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new")]
    pub fn new(config: Config) -> Self {
        let estimate_source = config
            .estimate_url
            .clone()
            .map(|url| Arc::new(HttpEstimateSource::new(url)) as Arc<dyn EstimateSource>);
        let geocode_source = config
            .geocode_url
            .clone()
            .map(|url| Arc::new(HttpGeocodeSource::new(url)) as Arc<dyn GeocodeSource>);

        tracing::info!(
            remote_estimates = config.remote_estimates_enabled(),
            remote_geocoding = config.remote_geocoding_enabled(),
            strict_geocoding = config.strict_geocoding,
            "engine configured"
        );

        Self {
            config,
            estimate_source,
            geocode_source,
            clock: local_hour,
        }
    }

    pub fn with_estimate_source(mut self, source: Arc<dyn EstimateSource>) -> Self {
        self.estimate_source = Some(source);
        self
    }

    pub fn with_geocode_source(mut self, source: Arc<dyn GeocodeSource>) -> Self {
        self.geocode_source = Some(source);
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn remote_estimate_source(&self) -> Option<&dyn EstimateSource> {
        self.estimate_source
            .as_deref()
            .filter(|_| self.config.use_backend)
    }

    fn remote_geocode_source(&self) -> Option<&dyn GeocodeSource> {
        self.geocode_source
            .as_deref()
            .filter(|_| self.config.use_backend)
    }

    /// Seeded runs mix `salt` into the seed so that distinct inputs draw
    /// distinct values.
    fn rng(&self, salt: u64) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ salt),
            None => StdRng::from_entropy(),
        }
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over the normalized text, stable across builds and platforms.
fn salt_for(text: &str) -> u64 {
    text.trim()
        .to_lowercase()
        .bytes()
        .fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        })
}

impl API for Engine {}
