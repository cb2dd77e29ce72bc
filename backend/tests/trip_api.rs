use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use trip_backend::{
    AppState, create_router,
    history::HistoryStore,
    models::{HistoryEntry, MonthlyAggregate, StationSource, TripResult},
    planner::TripPlanner,
    providers::{
        PlaceCandidate, PlaceSearch, ProviderError, StraightLineResolver, UnavailablePlaceSearch,
    },
};

struct StubPlaces;

#[async_trait]
impl PlaceSearch for StubPlaces {
    async fn search(
        &self,
        reference: &trip_backend::models::Coordinate,
        _radius_km: f64,
    ) -> Result<Vec<PlaceCandidate>, ProviderError> {
        let near = |id: &str, dlat: f64| PlaceCandidate {
            id: id.to_string(),
            name: format!("Station {id}"),
            coordinate: trip_backend::models::Coordinate::new(reference.lat + dlat, reference.lon),
        };
        Ok(vec![near("node/2", 0.03), near("node/1", 0.01), near("node/9", 0.2)])
    }
}

async fn test_app(place_search: Arc<dyn PlaceSearch>) -> (axum::Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let history = HistoryStore::open(dir.path()).await.expect("history");
    let planner = TripPlanner::new(Arc::new(StraightLineResolver), place_search).with_radii(5.0, 10.0);
    let state = AppState {
        planner: Arc::new(planner),
        history: Arc::new(history),
    };
    (create_router(state), dir)
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn trip_payload() -> Value {
    json!({
        "vehicle_id": "car-1",
        "fuel_type": "petrol",
        "mileage": 15.0,
        "origin": {"lat": 45.0, "lon": 5.0, "name": "Home"},
        "destination": {"lat": 45.5, "lon": 5.5, "name": "Lake"},
        "unit_price": 2.0
    })
}

#[tokio::test]
async fn trip_endpoint_returns_cost_and_ranked_stations() {
    let (app, _dir) = test_app(Arc::new(StubPlaces)).await;

    let response = app
        .oneshot(json_request("POST", "/api/trips", &trip_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let trip: TripResult = read_json(response).await;
    assert!(trip.distance_km > 60.0 && trip.distance_km < 70.0);
    assert!((trip.estimated_cost - trip.distance_km / 15.0 * 2.0).abs() < 1e-9);
    assert_eq!(trip.station_source, StationSource::Search);
    let ids: Vec<&str> = trip.stations.stations.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["node/1", "node/2"]);
    assert!(trip.stations.best_price_id.is_some());
    assert!(!trip.duration.is_empty());
    assert!(trip.polyline.len() >= 2);
}

#[tokio::test]
async fn trip_endpoint_rejects_zero_mileage() {
    let (app, _dir) = test_app(Arc::new(StubPlaces)).await;
    let mut payload = trip_payload();
    payload["mileage"] = json!(0.0);

    let response = app
        .oneshot(json_request("POST", "/api/trips", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = read_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("mileage"));
}

#[tokio::test]
async fn trip_endpoint_falls_back_when_search_fails() {
    let (app, _dir) = test_app(Arc::new(UnavailablePlaceSearch)).await;

    let response = app
        .oneshot(json_request("POST", "/api/trips", &trip_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let trip: TripResult = read_json(response).await;
    assert_eq!(trip.station_source, StationSource::Fallback);
    assert!(!trip.stations.stations.is_empty());
    assert!(
        trip.stations
            .stations
            .iter()
            .all(|s| s.distance_km.is_some_and(|d| d <= 10.0))
    );
}

#[tokio::test]
async fn nearby_stations_honours_explicit_radius() {
    let (app, _dir) = test_app(Arc::new(StubPlaces)).await;
    let payload = json!({
        "reference": {"lat": 45.0, "lon": 5.0},
        "fuel_type": "diesel",
        "radius_km": 2.0
    });

    let response = app
        .oneshot(json_request("POST", "/api/stations/nearby", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = read_json(response).await;
    assert_eq!(body["source"], "search");
    let stations = body["stations"].as_array().unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0]["id"], "node/1");
    assert_eq!(body["best_price_id"], "node/1");
}

#[tokio::test]
async fn nearby_stations_rejects_non_positive_radius() {
    let (app, _dir) = test_app(Arc::new(StubPlaces)).await;
    let payload = json!({
        "reference": {"lat": 45.0, "lon": 5.0},
        "fuel_type": "electric",
        "radius_km": 0.0
    });

    let response = app
        .oneshot(json_request("POST", "/api/stations/nearby", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn nearby_stations_rejects_out_of_range_reference() {
    let (app, _dir) = test_app(Arc::new(UnavailablePlaceSearch)).await;
    let payload = json!({
        "reference": {"lat": 95.0, "lon": 500.0},
        "fuel_type": "petrol"
    });

    let response = app
        .oneshot(json_request("POST", "/api/stations/nearby", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = read_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("reference"));
}

#[tokio::test]
async fn history_rejects_negative_cost_and_distance() {
    let (app, _dir) = test_app(Arc::new(StubPlaces)).await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/trips", &trip_payload()))
        .await
        .unwrap();
    let trip: Value = read_json(response).await;

    let mut negative_cost = trip.clone();
    negative_cost["estimated_cost"] = json!(-12.5);
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/history", &negative_cost))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("estimated cost"));

    let mut negative_distance = trip;
    negative_distance["distance_km"] = json!(-1.0);
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/history", &negative_distance))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(empty_request("GET", "/api/history"))
        .await
        .unwrap();
    let entries: Vec<HistoryEntry> = read_json(response).await;
    assert!(entries.is_empty());
}

#[tokio::test]
async fn history_round_trip_and_monthly_summary() {
    let (app, _dir) = test_app(Arc::new(StubPlaces)).await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/trips", &trip_payload()))
        .await
        .unwrap();
    let trip: TripResult = read_json(response).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/history",
            &serde_json::to_value(&trip).unwrap(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let saved: HistoryEntry = read_json(response).await;
    assert_eq!(saved.origin_name, "Home");
    assert_eq!(saved.destination_name, "Lake");
    assert_eq!(saved.cost, trip.estimated_cost);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/history"))
        .await
        .unwrap();
    let entries: Vec<HistoryEntry> = read_json(response).await;
    assert_eq!(entries.last(), Some(&saved));

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/history/monthly"))
        .await
        .unwrap();
    let months: Vec<MonthlyAggregate> = read_json(response).await;
    assert_eq!(months.len(), 1);
    assert_eq!(months[0].label, saved.timestamp.format("%b %Y").to_string());
    assert!((months[0].total_cost - trip.estimated_cost).abs() < 1e-9);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/api/history"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(empty_request("GET", "/api/history"))
        .await
        .unwrap();
    let entries: Vec<HistoryEntry> = read_json(response).await;
    assert!(entries.is_empty());
}

#[tokio::test]
async fn gpx_endpoint_encodes_trip() {
    let (app, _dir) = test_app(Arc::new(StubPlaces)).await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/trips", &trip_payload()))
        .await
        .unwrap();
    let trip: Value = read_json(response).await;

    let response = app
        .oneshot(json_request("POST", "/api/trips/gpx", &trip))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert!(!body["gpx_base64"].as_str().unwrap().is_empty());
}
