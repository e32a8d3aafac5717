use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    entities::Coordinates,
    error::{upstream_error, Error},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeocodeRequest {
    pub address: String,
}

#[async_trait]
pub trait GeocodeSource: Debug + Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Coordinates, Error>;
}

#[derive(Clone, Debug)]
pub struct HttpGeocodeSource {
    client: reqwest::Client,
    url: String,
}

impl HttpGeocodeSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl GeocodeSource for HttpGeocodeSource {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn geocode(&self, address: &str) -> Result<Coordinates, Error> {
        let res = self
            .client
            .post(&self.url)
            .json(&GeocodeRequest {
                address: address.into(),
            })
            .send()
            .await?;

        let status_code = res.status().as_u16();
        if !(200..300).contains(&status_code) {
            tracing::warn!(status_code, "geocode source rejected request");
            return Err(upstream_error());
        }

        let coordinates: Coordinates = res.json().await?;

        // the backend answers 0,0 when it could not geocode
        if !coordinates.is_valid() || (coordinates.latitude == 0.0 && coordinates.longitude == 0.0)
        {
            return Err(upstream_error());
        }

        Ok(coordinates)
    }
}
