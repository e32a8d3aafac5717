use serde::{Deserialize, Serialize};

use crate::entities::{Provider, TrafficLevel, VehicleClass};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub provider: Provider,
    pub vehicle_class: VehicleClass,
    pub price_amount: u64,
    pub eta_minutes: u32,
    pub rank_score: f64,
    pub booking_link: String,
}

impl Quote {
    pub fn new(
        provider: Provider,
        vehicle_class: VehicleClass,
        price_amount: u64,
        eta_minutes: u32,
        booking_link: String,
    ) -> Self {
        Self {
            provider,
            vehicle_class,
            price_amount,
            eta_minutes: eta_minutes.max(1),
            rank_score: 0.0,
            booking_link,
        }
    }
}

/// Quotes ordered best first (ascending rank score).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub distance_km: f64,
    pub traffic_factor: f64,
    pub quotes: Vec<Quote>,
}

impl EstimateResult {
    pub fn traffic_level(&self) -> TrafficLevel {
        TrafficLevel::from_factor(self.traffic_factor)
    }

    pub fn best(&self) -> Option<&Quote> {
        self.quotes.first()
    }
}
