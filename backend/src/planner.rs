use std::sync::Arc;

use crate::{
    cost::{check_positive, estimate_cost},
    error::TripError,
    models::{
        Coordinate, FuelType, RankedStations, Station, StationSource, TripRequest, TripResult,
    },
    pricing::PriceTable,
    providers::{PlaceCandidate, PlaceSearch, ResolvedRoute, RouteResolver},
    ranking::rank_stations,
    stations::fallback_stations,
};

pub const DEFAULT_SEARCH_RADIUS_KM: f64 = 5.0;
pub const DEFAULT_FALLBACK_RADIUS_KM: f64 = 10.0;

/// Turns trip requests into trip results using the configured collaborators.
///
/// The search radius is what place search is asked for; the fallback radius
/// filters the mock list used when search fails. They are independent.
#[derive(Clone)]
pub struct TripPlanner {
    route_resolver: Arc<dyn RouteResolver>,
    place_search: Arc<dyn PlaceSearch>,
    prices: PriceTable,
    search_radius_km: f64,
    fallback_radius_km: f64,
}

impl TripPlanner {
    pub fn new(route_resolver: Arc<dyn RouteResolver>, place_search: Arc<dyn PlaceSearch>) -> Self {
        Self {
            route_resolver,
            place_search,
            prices: PriceTable::default(),
            search_radius_km: DEFAULT_SEARCH_RADIUS_KM,
            fallback_radius_km: DEFAULT_FALLBACK_RADIUS_KM,
        }
    }

    pub fn with_prices(mut self, prices: PriceTable) -> Self {
        self.prices = prices;
        self
    }

    pub fn with_radii(mut self, search_radius_km: f64, fallback_radius_km: f64) -> Self {
        self.search_radius_km = search_radius_km;
        self.fallback_radius_km = fallback_radius_km;
        self
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    pub fn search_radius_km(&self) -> f64 {
        self.search_radius_km
    }

    pub fn fallback_radius_km(&self) -> f64 {
        self.fallback_radius_km
    }

    pub async fn plan(&self, request: TripRequest) -> Result<TripResult, TripError> {
        validate(&request)?;
        tracing::info!(
            "planning trip for {}: {} -> {}",
            request.vehicle_id,
            request.origin.display_name(),
            request.destination.display_name()
        );

        let route = self
            .route_resolver
            .resolve(&request.origin, &request.destination, request.speed_band)
            .await
            .inspect_err(|err| tracing::warn!("route lookup failed: {err}"))?;

        let (stations, source) = self
            .nearby_stations(&request.origin, request.fuel_type, self.search_radius_km)
            .await;

        let unit_price = request
            .unit_price
            .unwrap_or_else(|| self.prices.base_price(request.fuel_type));

        let result = build_trip_result(request, route, stations, source, unit_price)?;
        tracing::info!(
            "trip planned: {:.1}km, cost {:.2}, {} stations ({:?})",
            result.distance_km,
            result.estimated_cost,
            result.stations.stations.len(),
            result.station_source
        );
        Ok(result)
    }

    /// Ranked stations around `reference`.
    ///
    /// When place search fails the fixed fallback list is ranked instead,
    /// using the fallback radius.
    pub async fn nearby_stations(
        &self,
        reference: &Coordinate,
        fuel_type: FuelType,
        radius_km: f64,
    ) -> (RankedStations, StationSource) {
        match self.place_search.search(reference, radius_km).await {
            Ok(candidates) => {
                let stations = self.price_candidates(candidates, fuel_type);
                (
                    rank_stations(reference, stations, radius_km),
                    StationSource::Search,
                )
            }
            Err(err) => {
                tracing::warn!("place search failed, using fallback stations: {err}");
                let stations = fallback_stations(reference, &self.prices, fuel_type);
                (
                    rank_stations(reference, stations, self.fallback_radius_km),
                    StationSource::Fallback,
                )
            }
        }
    }

    fn price_candidates(&self, candidates: Vec<PlaceCandidate>, fuel_type: FuelType) -> Vec<Station> {
        candidates
            .into_iter()
            .map(|place| Station {
                unit_price: self.prices.price_for(fuel_type, &place.id),
                id: place.id,
                name: place.name,
                coordinate: place.coordinate,
                distance_km: None,
            })
            .collect()
    }
}

/// Rejects requests the cost estimator or the collaborators cannot handle.
pub fn validate(request: &TripRequest) -> Result<(), TripError> {
    check_positive("mileage", request.mileage)?;
    if let Some(price) = request.unit_price {
        check_positive("unit price", price)?;
    }
    check_coordinate("origin", &request.origin)?;
    check_coordinate("destination", &request.destination)
}

pub(crate) fn check_coordinate(field: &'static str, coord: &Coordinate) -> Result<(), TripError> {
    let lat_ok = coord.lat.is_finite() && (-90.0..=90.0).contains(&coord.lat);
    let lon_ok = coord.lon.is_finite() && (-180.0..=180.0).contains(&coord.lon);
    if lat_ok && lon_ok {
        Ok(())
    } else {
        Err(TripError::invalid(
            field,
            format!("coordinate out of range: {}, {}", coord.lat, coord.lon),
        ))
    }
}

/// Assembles the result of one planning operation.
pub fn build_trip_result(
    request: TripRequest,
    route: ResolvedRoute,
    stations: RankedStations,
    station_source: StationSource,
    unit_price: f64,
) -> Result<TripResult, TripError> {
    let distance_km = route.distance_km();
    let estimated_cost = estimate_cost(distance_km, request.mileage, unit_price)?;

    Ok(TripResult {
        request,
        distance_km,
        estimated_cost,
        duration: route.duration,
        stations,
        polyline: route.polyline,
        station_source,
    })
}
