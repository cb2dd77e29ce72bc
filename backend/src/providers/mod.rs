//! Boundary to the external directions and place-search services.
//!
//! The planner only talks to these traits. Whatever the services send back is
//! turned into [`ResolvedRoute`] and [`PlaceCandidate`] values here, before any
//! cost or ranking logic sees it.

pub mod osrm;
pub mod overpass;
pub mod straight_line;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::models::{Coordinate, SpeedBand};

pub use osrm::OsrmRouteResolver;
pub use overpass::OverpassPlaceSearch;
pub use straight_line::StraightLineResolver;

pub const DEFAULT_USER_AGENT: &str = "fuel-trip-planner/0.1";

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },
    #[error("request to {url} failed with HTTP {status}")]
    Http { url: String, status: u16 },
    #[error("network error calling {url}: {message}")]
    Network { url: String, message: String },
    #[error("service answered {code}: {message}")]
    Service { code: String, message: String },
    #[error("unexpected response: {0}")]
    Parse(String),
    #[error("no route between the requested points")]
    NoRoute,
    #[error("{0} is not configured")]
    Unavailable(&'static str),
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl ProviderError {
    pub(crate) fn from_reqwest(error: &reqwest::Error, url: &str, timeout: Duration) -> Self {
        if error.is_timeout() {
            return Self::Timeout {
                url: url.to_owned(),
                timeout_secs: timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return Self::Http {
                url: url.to_owned(),
                status: status.as_u16(),
            };
        }
        if error.is_decode() {
            return Self::Parse(error.to_string());
        }
        Self::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Route as returned by the directions service.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute {
    pub distance_m: f64,
    pub duration: String,
    pub polyline: Vec<Coordinate>,
}

impl ResolvedRoute {
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }
}

/// A place found by search, before it is priced and ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCandidate {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
}

#[async_trait]
pub trait RouteResolver: Send + Sync {
    async fn resolve(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        speed_band: Option<SpeedBand>,
    ) -> Result<ResolvedRoute, ProviderError>;
}

#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Fuel stations within `radius_km` of `reference`.
    async fn search(
        &self,
        reference: &Coordinate,
        radius_km: f64,
    ) -> Result<Vec<PlaceCandidate>, ProviderError>;
}

/// Place search used when no search endpoint is configured; every call fails
/// so callers take their fallback path.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailablePlaceSearch;

#[async_trait]
impl PlaceSearch for UnavailablePlaceSearch {
    async fn search(
        &self,
        _reference: &Coordinate,
        _radius_km: f64,
    ) -> Result<Vec<PlaceCandidate>, ProviderError> {
        Err(ProviderError::Unavailable("place search"))
    }
}

/// Settings shared by the HTTP-backed collaborators.
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl HttpProviderConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn build_client(&self) -> Result<Client, ProviderError> {
        Client::builder()
            .user_agent(&self.user_agent)
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()
            .map_err(|err| ProviderError::Client(err.to_string()))
    }
}

/// Human readable travel time, rounded to whole minutes ("1 hr 5 mins").
pub fn format_duration(seconds: f64) -> String {
    let minutes = if seconds.is_finite() && seconds > 0.0 {
        (seconds / 60.0).round() as u64
    } else {
        0
    };
    let hours = minutes / 60;
    let rest = minutes % 60;

    let plural = |n: u64, unit: &str| {
        if n == 1 {
            format!("{n} {unit}")
        } else {
            format!("{n} {unit}s")
        }
    };

    match (hours, rest) {
        (0, m) => plural(m, "min"),
        (h, 0) => plural(h, "hr"),
        (h, m) => format!("{} {}", plural(h, "hr"), plural(m, "min")),
    }
}
