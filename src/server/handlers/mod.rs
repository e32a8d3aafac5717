pub mod deep_links;
pub mod estimates;
pub mod geocode;
