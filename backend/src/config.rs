use std::{net::SocketAddr, path::PathBuf, time::Duration};

use clap::Parser;

use crate::{
    cost::check_positive,
    error::TripError,
    planner::{DEFAULT_FALLBACK_RADIUS_KM, DEFAULT_SEARCH_RADIUS_KM},
    pricing::PriceTable,
};

#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Fuel cost estimates and nearby stations for driving trips"
)]
pub struct AppConfig {
    /// Address the HTTP API listens on
    #[arg(long, env = "TRIP_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Directory holding the trip history file
    #[arg(long, env = "TRIP_HISTORY_DIR", default_value = "data")]
    pub history_dir: PathBuf,

    /// OSRM base URL; without it routes are straight lines
    #[arg(long, env = "TRIP_OSRM_URL")]
    pub osrm_url: Option<String>,

    /// Overpass base URL; without it the fallback station list is used
    #[arg(long, env = "TRIP_OVERPASS_URL")]
    pub overpass_url: Option<String>,

    /// Radius passed to place search
    #[arg(long, env = "TRIP_SEARCH_RADIUS_KM", default_value_t = DEFAULT_SEARCH_RADIUS_KM)]
    pub search_radius_km: f64,

    /// Radius applied to the fallback station list
    #[arg(long, env = "TRIP_FALLBACK_RADIUS_KM", default_value_t = DEFAULT_FALLBACK_RADIUS_KM)]
    pub fallback_radius_km: f64,

    /// Timeout for calls to external services
    #[arg(long, env = "TRIP_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    #[arg(long, env = "TRIP_PRICE_PETROL", default_value_t = PriceTable::default().petrol)]
    pub price_petrol: f64,

    #[arg(long, env = "TRIP_PRICE_DIESEL", default_value_t = PriceTable::default().diesel)]
    pub price_diesel: f64,

    #[arg(long, env = "TRIP_PRICE_HYBRID", default_value_t = PriceTable::default().hybrid)]
    pub price_hybrid: f64,

    #[arg(long, env = "TRIP_PRICE_ELECTRIC", default_value_t = PriceTable::default().electric)]
    pub price_electric: f64,
}

impl AppConfig {
    pub fn prices(&self) -> PriceTable {
        PriceTable {
            petrol: self.price_petrol,
            diesel: self.price_diesel,
            hybrid: self.price_hybrid,
            electric: self.price_electric,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Rejects settings the planner cannot run with.
    pub fn validate(&self) -> Result<(), TripError> {
        self.prices().validate()?;
        check_positive("search radius", self.search_radius_km)?;
        check_positive("fallback radius", self.fallback_radius_km)?;
        if self.timeout_secs == 0 {
            return Err(TripError::invalid("timeout", "must be at least one second"));
        }
        Ok(())
    }
}
