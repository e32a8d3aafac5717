use crate::entities::{PricingModel, Provider, RouteMetrics, VehicleClass};

/// Quoted prices are whole multiples of this amount.
pub const PRICE_DENOMINATION: f64 = 1000.0;

pub fn price(provider: Provider, vehicle_class: VehicleClass, metrics: &RouteMetrics) -> u64 {
    fare(&provider.pricing(vehicle_class), metrics)
}

/// Surge is all-or-nothing: the whole fare is multiplied once the traffic
/// factor is strictly above the threshold.
pub fn fare(model: &PricingModel, metrics: &RouteMetrics) -> u64 {
    let mut fare = model.base_fare
        + metrics.distance_km * model.per_km_rate
        + f64::from(metrics.duration_minutes) * model.per_minute_rate;

    if is_surging(model, metrics) {
        fare *= model.surge_multiplier;
    }

    round_to_denomination(fare)
}

pub fn is_surging(model: &PricingModel, metrics: &RouteMetrics) -> bool {
    metrics.traffic_factor > model.surge_threshold
}

/// Half-up rounding to the nearest [`PRICE_DENOMINATION`]. Negative and
/// non-finite amounts become zero.
pub fn round_to_denomination(amount: f64) -> u64 {
    if !amount.is_finite() || amount <= 0.0 {
        return 0;
    }

    // drop accumulated float error first, 57499.99999999999 must count as 57500
    let amount = (amount * 100.0).round() / 100.0;
    let units = (amount / PRICE_DENOMINATION).round();
    units as u64 * PRICE_DENOMINATION as u64
}
