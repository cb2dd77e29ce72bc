pub mod config;
pub mod cost;
pub mod error;
pub mod geo;
pub mod gpx_export;
pub mod history;
pub mod history_handlers;
pub mod models;
pub mod planner;
pub mod pricing;
pub mod providers;
pub mod ranking;
pub mod stations;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::error::TripError;
use crate::gpx_export::encode_trip_as_gpx;
use crate::history::HistoryStore;
use crate::models::{
    ApiError, GpxResponse, NearbyStationsRequest, NearbyStationsResponse, TripRequest, TripResult,
};
use crate::planner::TripPlanner;
use crate::providers::{
    HttpProviderConfig, OsrmRouteResolver, OverpassPlaceSearch, PlaceSearch, RouteResolver,
    StraightLineResolver, UnavailablePlaceSearch,
};

#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TripPlanner>,
    pub history: Arc<HistoryStore>,
}

impl AppState {
    /// Wires collaborators, prices and the history store from configuration.
    pub async fn from_config(config: &AppConfig) -> Result<Self, TripError> {
        config.validate()?;
        let prices = config.prices();

        let route_resolver: Arc<dyn RouteResolver> = match &config.osrm_url {
            Some(url) => {
                tracing::info!("resolving routes with OSRM at {url}");
                Arc::new(OsrmRouteResolver::new(
                    HttpProviderConfig::new(url.as_str()).with_timeout(config.timeout()),
                )?)
            }
            None => {
                tracing::warn!("no OSRM endpoint configured, using straight-line routes");
                Arc::new(StraightLineResolver)
            }
        };

        let place_search: Arc<dyn PlaceSearch> = match &config.overpass_url {
            Some(url) => {
                tracing::info!("searching stations with Overpass at {url}");
                Arc::new(OverpassPlaceSearch::new(
                    HttpProviderConfig::new(url.as_str()).with_timeout(config.timeout()),
                )?)
            }
            None => {
                tracing::warn!("no Overpass endpoint configured, using fallback stations");
                Arc::new(UnavailablePlaceSearch)
            }
        };

        let planner = TripPlanner::new(route_resolver, place_search)
            .with_prices(prices)
            .with_radii(config.search_radius_km, config.fallback_radius_km);
        let history = HistoryStore::open(&config.history_dir).await?;

        Ok(Self {
            planner: Arc::new(planner),
            history: Arc::new(history),
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/trips", post(plan_trip_handler))
        .route("/api/trips/gpx", post(gpx_handler))
        .route("/api/stations/nearby", post(nearby_stations_handler))
        .route(
            "/api/history",
            get(history_handlers::list_history)
                .post(history_handlers::save_trip)
                .delete(history_handlers::clear_history),
        )
        .route("/api/history/monthly", get(history_handlers::monthly_summary))
        .layer(cors)
        .with_state(state)
}

async fn plan_trip_handler(
    State(state): State<AppState>,
    Json(req): Json<TripRequest>,
) -> Result<Json<TripResult>, (StatusCode, Json<ApiError>)> {
    state
        .planner
        .plan(req)
        .await
        .map(Json)
        .map_err(trip_error_to_api_error)
}

async fn nearby_stations_handler(
    State(state): State<AppState>,
    Json(req): Json<NearbyStationsRequest>,
) -> Result<Json<NearbyStationsResponse>, (StatusCode, Json<ApiError>)> {
    planner::check_coordinate("reference", &req.reference).map_err(trip_error_to_api_error)?;
    let radius_km = req.radius_km.unwrap_or(state.planner.search_radius_km());
    cost::check_positive("radius", radius_km).map_err(trip_error_to_api_error)?;

    let (ranked, source) = state
        .planner
        .nearby_stations(&req.reference, req.fuel_type, radius_km)
        .await;

    Ok(Json(NearbyStationsResponse { ranked, source }))
}

async fn gpx_handler(
    Json(trip): Json<TripResult>,
) -> Result<Json<GpxResponse>, (StatusCode, Json<ApiError>)> {
    let gpx_base64 =
        encode_trip_as_gpx(&trip.polyline, &trip.stations.stations).map_err(trip_error_to_api_error)?;
    Ok(Json(GpxResponse { gpx_base64 }))
}

pub(crate) fn trip_error_to_api_error(err: TripError) -> (StatusCode, Json<ApiError>) {
    let status = match &err {
        TripError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        TripError::Provider(_) => StatusCode::BAD_GATEWAY,
        TripError::History(_) | TripError::Gpx(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!("request failed: {err}");
    }

    (
        status,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}
