use async_trait::async_trait;

use crate::entities::{Coordinates, EstimateResult, VehicleClass};
use crate::error::Error;

#[async_trait]
pub trait EstimateAPI {
    /// Never fails: a remote source error falls back to the local pipeline.
    async fn get_estimate(
        &self,
        pickup: Coordinates,
        destination: Coordinates,
        vehicle_class: VehicleClass,
    ) -> EstimateResult;

    async fn request_estimate(
        &self,
        pickup_text: &str,
        destination_text: &str,
        vehicle_class: VehicleClass,
    ) -> Result<EstimateResult, Error>;
}

#[async_trait]
pub trait GeocodeAPI {
    async fn resolve(&self, address: &str) -> Result<Coordinates, Error>;
}

pub trait API: EstimateAPI + GeocodeAPI {}
