mod location;
mod provider;
mod quote;
mod route;
mod search_history;
mod vehicle;

pub use location::Coordinates;
pub use provider::{PricingModel, Provider};
pub use quote::{EstimateResult, Quote};
pub use route::{RouteMetrics, TrafficLevel};
pub use search_history::{SearchHistory, MAX_SEARCH_HISTORY, SEARCH_HISTORY_KEY};
pub use vehicle::VehicleClass;
