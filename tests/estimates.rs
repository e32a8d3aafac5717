//! Estimate orchestration against mocked remote sources.

use std::sync::Arc;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rerides::api::EstimateAPI;
use rerides::config::Config;
use rerides::engine::{estimate_locally, pricing, route_metrics, Engine};
use rerides::entities::{Coordinates, Provider, VehicleClass};
use rerides::error::{invalid_input_error, upstream_error, Error};
use rerides::external::{EstimateRequest, EstimateSource, RemoteEstimate};
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

// =============================================================================
// Helpers
// =============================================================================

const SEED: u64 = 20_240_601;

fn rush_hour() -> u32 {
    8
}

fn midday() -> u32 {
    13
}

fn pickup() -> Coordinates {
    Coordinates::new(10.776, 106.700).unwrap()
}

fn destination() -> Coordinates {
    Coordinates::new(10.800, 106.650).unwrap()
}

fn local_config() -> Config {
    Config {
        seed: Some(SEED),
        ..Config::default()
    }
}

fn remote_config(server: &MockServer) -> Config {
    Config {
        use_backend: true,
        estimate_url: Some(format!("{}/api/estimate", server.uri())),
        seed: Some(SEED),
        ..Config::default()
    }
}

#[derive(Debug)]
struct BrokenSource;

#[async_trait]
impl EstimateSource for BrokenSource {
    async fn fetch_estimate(&self, _: &EstimateRequest) -> Result<RemoteEstimate, Error> {
        Err(upstream_error())
    }
}

// =============================================================================
// Local pipeline
// =============================================================================

#[tokio::test]
async fn scenario_car_trip_across_the_city() {
    let engine = Engine::new(local_config()).with_clock(rush_hour);

    let result = engine
        .get_estimate(pickup(), destination(), VehicleClass::Car)
        .await;

    assert_eq!(result.quotes.len(), 3);
    assert!(result.distance_km >= route_metrics::MIN_DISTANCE_KM);
    for quote in &result.quotes {
        assert_eq!(quote.price_amount % 1000, 0);
        assert!(quote.eta_minutes >= 1);
        assert!(!quote.booking_link.is_empty());
        assert_eq!(quote.vehicle_class, VehicleClass::Car);
    }
    for pair in result.quotes.windows(2) {
        assert!(pair[0].rank_score <= pair[1].rank_score);
    }
}

#[tokio::test]
async fn remote_disabled_prices_match_fare_calculator() {
    let engine = Engine::new(local_config()).with_clock(midday);

    let result = engine
        .get_estimate(pickup(), destination(), VehicleClass::Bike)
        .await;
    let metrics = route_metrics::estimate(
        pickup(),
        destination(),
        midday(),
        &mut StdRng::seed_from_u64(SEED),
    );

    assert_eq!(result.quotes.len(), Provider::ALL.len());
    assert_eq!(result.distance_km, metrics.distance_km);
    assert_eq!(result.traffic_factor, metrics.traffic_factor);
    for quote in &result.quotes {
        assert_eq!(
            quote.price_amount,
            pricing::price(quote.provider, VehicleClass::Bike, &metrics)
        );
    }
}

#[tokio::test]
async fn configured_but_disabled_backend_is_not_called() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config {
        use_backend: false,
        ..remote_config(&server)
    };
    let engine = Engine::new(config).with_clock(midday);

    let result = engine
        .get_estimate(pickup(), destination(), VehicleClass::Car)
        .await;
    assert_eq!(result.quotes.len(), 3);
}

// =============================================================================
// Fallback
// =============================================================================

#[tokio::test]
async fn always_failing_source_equals_local_pipeline() {
    let config = Config {
        use_backend: true,
        ..local_config()
    };
    let engine = Engine::new(config)
        .with_estimate_source(Arc::new(BrokenSource))
        .with_clock(rush_hour);

    let result = engine
        .get_estimate(pickup(), destination(), VehicleClass::Car)
        .await;
    let expected = estimate_locally(
        pickup(),
        destination(),
        VehicleClass::Car,
        rush_hour(),
        &mut StdRng::seed_from_u64(SEED),
    );

    assert_eq!(result, expected);
}

#[tokio::test]
async fn server_error_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/estimate"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let engine = Engine::new(remote_config(&server)).with_clock(midday);
    let result = engine
        .get_estimate(pickup(), destination(), VehicleClass::Bike)
        .await;

    let expected = estimate_locally(
        pickup(),
        destination(),
        VehicleClass::Bike,
        midday(),
        &mut StdRng::seed_from_u64(SEED),
    );
    assert_eq!(result, expected);
}

#[tokio::test]
async fn malformed_body_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/estimate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let engine = Engine::new(remote_config(&server)).with_clock(midday);
    let result = engine
        .get_estimate(pickup(), destination(), VehicleClass::Car)
        .await;

    assert_eq!(result.quotes.len(), 3);
    assert!(result.quotes.iter().all(|quote| quote.price_amount % 1000 == 0));
}

#[tokio::test]
async fn unknown_providers_only_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"service": "Gojek", "estimated_price": 40000, "eta_min": 5}
            ]
        })))
        .mount(&server)
        .await;

    let engine = Engine::new(remote_config(&server)).with_clock(midday);
    let result = engine
        .get_estimate(pickup(), destination(), VehicleClass::Car)
        .await;

    let providers: Vec<Provider> = result.quotes.iter().map(|quote| quote.provider).collect();
    assert_eq!(providers.len(), 3);
    assert!(Provider::ALL.iter().all(|provider| providers.contains(provider)));
}

#[tokio::test]
async fn unreachable_backend_falls_back() {
    let config = Config {
        use_backend: true,
        // nothing listens on the discard port
        estimate_url: Some("http://127.0.0.1:9/api/estimate".into()),
        ..local_config()
    };
    let engine = Engine::new(config).with_clock(rush_hour);

    let result = engine
        .get_estimate(pickup(), destination(), VehicleClass::Car)
        .await;
    let expected = estimate_locally(
        pickup(),
        destination(),
        VehicleClass::Car,
        rush_hour(),
        &mut StdRng::seed_from_u64(SEED),
    );
    assert_eq!(result, expected);
}

// =============================================================================
// Remote success
// =============================================================================

#[tokio::test]
async fn remote_results_scheme_is_used_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/estimate"))
        .and(body_json(json!({
            "pickup": {"lat": 10.776, "lng": 106.7},
            "dropoff": {"lat": 10.8, "lng": 106.65},
            "vehicle_type": "car"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "distance_km": 6.2,
            "traffic_factor": 1,
            "results": [
                {"service": "Grab", "vehicle_type": "car", "estimated_price": 45000, "eta_min": 15, "score": 0, "deep_link": null},
                {"service": "Be", "vehicle_type": "car", "estimated_price": 43000, "eta_min": 17, "score": 1, "deep_link": null},
                {"service": "Xanh SM", "vehicle_type": "car", "estimated_price": 44000, "eta_min": 16, "score": 1, "deep_link": null}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = Engine::new(remote_config(&server));
    let result = engine
        .get_estimate(pickup(), destination(), VehicleClass::Car)
        .await;

    assert_eq!(result.distance_km, 6.2);
    assert_eq!(result.traffic_factor, 1.0);

    let order: Vec<(Provider, u64)> = result
        .quotes
        .iter()
        .map(|quote| (quote.provider, quote.price_amount))
        .collect();
    assert_eq!(
        order,
        vec![
            (Provider::Grab, 45000),
            (Provider::Be, 43000),
            (Provider::XanhSm, 44000)
        ]
    );
    assert!(result.quotes.iter().all(|quote| !quote.booking_link.is_empty()));
}

#[tokio::test]
async fn remote_options_scheme_is_ranked_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/estimate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "best_option": "be",
            "options": [
                {"provider": "grab", "distance_km": 5.4, "duration_min": 12.0, "price_vnd": 52300, "traffic_level": "heavy", "deeplink": "grab://open"},
                {"provider": "be", "distance_km": 5.4, "duration_min": 12.0, "price_vnd": 47800, "traffic_level": "heavy", "deeplink": "be://open"},
                {"provider": "xanh_sm", "distance_km": 5.4, "duration_min": 12.0, "price_vnd": 49100, "traffic_level": "heavy", "deeplink": "xanhsm://open"}
            ]
        })))
        .mount(&server)
        .await;

    let engine = Engine::new(remote_config(&server));
    let result = engine
        .get_estimate(pickup(), destination(), VehicleClass::Bike)
        .await;

    let order: Vec<(Provider, u64)> = result
        .quotes
        .iter()
        .map(|quote| (quote.provider, quote.price_amount))
        .collect();
    assert_eq!(
        order,
        vec![
            (Provider::Be, 48_000),
            (Provider::XanhSm, 49_000),
            (Provider::Grab, 52_000)
        ]
    );
    assert!(result
        .quotes
        .iter()
        .all(|quote| quote.vehicle_class == VehicleClass::Bike));
    assert_eq!(result.quotes[0].booking_link, "be://open");
    assert!((result.quotes[0].rank_score - 1.0).abs() < 1e-9);
    assert_eq!(
        result.distance_km,
        route_metrics::route_distance_km(pickup(), destination())
    );
}

#[tokio::test]
async fn remote_repeats_and_zero_scores_are_cleaned_up() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/estimate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"service": "Grab", "estimated_price": 45200, "eta_min": 15, "score": 0},
                {"service": "Be", "estimated_price": 43700, "eta_min": 15, "score": 0},
                {"service": "grab", "estimated_price": 39000, "eta_min": 9, "score": 0}
            ]
        })))
        .mount(&server)
        .await;

    let engine = Engine::new(remote_config(&server));
    let result = engine
        .get_estimate(pickup(), destination(), VehicleClass::Car)
        .await;

    let order: Vec<(Provider, u64)> = result
        .quotes
        .iter()
        .map(|quote| (quote.provider, quote.price_amount))
        .collect();
    assert_eq!(order, vec![(Provider::Be, 44_000), (Provider::Grab, 45_000)]);
    assert!(result.quotes[0].rank_score < result.quotes[1].rank_score);
}

// =============================================================================
// Text requests
// =============================================================================

#[tokio::test]
async fn blank_text_is_rejected_before_any_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let engine = Engine::new(remote_config(&server));

    let result = engine
        .request_estimate("  ", "Landmark 81", VehicleClass::Car)
        .await;
    assert_eq!(result, Err(invalid_input_error()));

    let result = engine
        .request_estimate("Ben Thanh Market", "", VehicleClass::Car)
        .await;
    assert_eq!(result, Err(invalid_input_error()));
}
