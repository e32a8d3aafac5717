use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    entities::{Coordinates, VehicleClass},
    error::{upstream_error, Error},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub pickup: Coordinates,
    pub dropoff: Coordinates,
    pub vehicle_type: VehicleClass,
}

/// Estimate body as returned by a remote source. Both known naming schemes
/// (`results`/`estimated_price`/`eta_min` and `options`/`price_vnd`/`duration_min`)
/// decode into the same shape.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RemoteEstimate {
    #[serde(default, alias = "distance")]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub traffic_factor: Option<f64>,
    #[serde(alias = "options")]
    pub results: Vec<RemoteQuote>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RemoteQuote {
    #[serde(alias = "service")]
    pub provider: String,
    #[serde(alias = "estimated_price", alias = "price_vnd")]
    pub price: f64,
    #[serde(alias = "eta_min", alias = "duration_min")]
    pub eta: f64,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, alias = "deeplink")]
    pub deep_link: Option<String>,
}

#[async_trait]
pub trait EstimateSource: Debug + Send + Sync {
    async fn fetch_estimate(&self, request: &EstimateRequest) -> Result<RemoteEstimate, Error>;
}

#[derive(Clone, Debug)]
pub struct HttpEstimateSource {
    client: reqwest::Client,
    url: String,
}

impl HttpEstimateSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl EstimateSource for HttpEstimateSource {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn fetch_estimate(&self, request: &EstimateRequest) -> Result<RemoteEstimate, Error> {
        let res = self.client.post(&self.url).json(request).send().await?;

        let status_code = res.status().as_u16();
        if !(200..300).contains(&status_code) {
            tracing::warn!(status_code, "estimate source rejected request");
            return Err(upstream_error());
        }

        let data: RemoteEstimate = res.json().await?;

        Ok(data)
    }
}
