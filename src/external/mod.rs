mod estimate_service;
mod geocode_service;

pub use estimate_service::{
    EstimateRequest, EstimateSource, HttpEstimateSource, RemoteEstimate, RemoteQuote,
};
pub use geocode_service::{GeocodeRequest, GeocodeSource, HttpGeocodeSource};
