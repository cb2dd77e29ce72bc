//! Route resolver backed by the OSRM Route service.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{HttpProviderConfig, ProviderError, ResolvedRoute, RouteResolver, format_duration};
use crate::models::{Coordinate, SpeedBand};

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteServiceResponse {
    /// `"Ok"` on success, otherwise an error code such as `"NoRoute"`.
    pub code: String,
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
    pub geometry: Option<GeoJsonLine>,
}

#[derive(Debug, Deserialize)]
pub struct GeoJsonLine {
    /// `[lon, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

impl RouteServiceResponse {
    /// Converts the first route into the typed boundary value.
    pub fn into_resolved(self) -> Result<ResolvedRoute, ProviderError> {
        if self.code == "NoRoute" {
            return Err(ProviderError::NoRoute);
        }
        if self.code != "Ok" {
            return Err(ProviderError::Service {
                code: self.code,
                message: self.message.unwrap_or_default(),
            });
        }

        let route = self.routes.into_iter().next().ok_or(ProviderError::NoRoute)?;
        if !route.distance.is_finite() || route.distance < 0.0 {
            return Err(ProviderError::Parse(format!(
                "invalid route distance {}",
                route.distance
            )));
        }

        let polyline = route
            .geometry
            .map(|line| {
                line.coordinates
                    .into_iter()
                    .map(|[lon, lat]| Coordinate::new(lat, lon))
                    .collect()
            })
            .unwrap_or_default();

        Ok(ResolvedRoute {
            distance_m: route.distance,
            duration: format_duration(route.duration),
            polyline,
        })
    }
}

pub struct OsrmRouteResolver {
    client: Client,
    config: HttpProviderConfig,
}

impl OsrmRouteResolver {
    pub fn new(config: HttpProviderConfig) -> Result<Self, ProviderError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    /// `{base_url}/route/v1/driving/{lon},{lat};{lon},{lat}?overview=full&geometries=geojson`
    fn build_route_url(&self, origin: &Coordinate, destination: &Coordinate) -> String {
        format!(
            "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
            self.config.base_url, origin.lon, origin.lat, destination.lon, destination.lat
        )
    }
}

#[async_trait]
impl RouteResolver for OsrmRouteResolver {
    async fn resolve(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        _speed_band: Option<SpeedBand>,
    ) -> Result<ResolvedRoute, ProviderError> {
        let url = self.build_route_url(origin, destination);
        tracing::debug!("requesting route from {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| ProviderError::from_reqwest(&err, &url, self.config.timeout))?
            .error_for_status()
            .map_err(|err| ProviderError::from_reqwest(&err, &url, self.config.timeout))?;

        let body: RouteServiceResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Parse(err.to_string()))?;

        let route = body.into_resolved()?;
        tracing::debug!(
            "route resolved: {:.0}m, {}, {} points",
            route.distance_m,
            route.duration,
            route.polyline.len()
        );
        Ok(route)
    }
}
