use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod page;

pub use page::{Page, PageEvent, Session};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            name: None,
        }
    }

    pub fn named(lat: f64, lon: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            name: Some(name.into()),
        }
    }

    pub fn interpolate(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.lat + (other.lat - self.lat) * t,
            self.lon + (other.lon - self.lon) * t,
        )
    }

    /// Display name, or the formatted coordinates when the point is unnamed.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{:.4}, {:.4}", self.lat, self.lon),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Petrol,
    Diesel,
    Hybrid,
    Electric,
}

impl FuelType {
    pub fn unit_label(self) -> &'static str {
        match self {
            FuelType::Electric => "kWh",
            FuelType::Petrol | FuelType::Diesel | FuelType::Hybrid => "L",
        }
    }

    pub fn mileage_label(self) -> &'static str {
        match self {
            FuelType::Electric => "km/kWh",
            FuelType::Petrol | FuelType::Diesel | FuelType::Hybrid => "km/L",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedBand {
    Economy,
    #[default]
    Normal,
    Fast,
}

impl SpeedBand {
    pub fn cruising_speed_kmh(self) -> f64 {
        match self {
            SpeedBand::Economy => 60.0,
            SpeedBand::Normal => 80.0,
            SpeedBand::Fast => 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub vehicle_id: String,
    pub fuel_type: FuelType,
    /// km per litre, or km per kWh for electric vehicles.
    pub mileage: f64,
    pub origin: Coordinate,
    pub destination: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_band: Option<SpeedBand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub unit_price: f64,
    /// Filled in by the ranker, relative to its reference point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedStations {
    pub stations: Vec<Station>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_price_id: Option<String>,
}

impl RankedStations {
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn best_price(&self) -> Option<&Station> {
        let id = self.best_price_id.as_deref()?;
        self.stations.iter().find(|station| station.id == id)
    }
}

/// Where the stations of a trip came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationSource {
    Search,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripResult {
    pub request: TripRequest,
    pub distance_km: f64,
    pub estimated_cost: f64,
    pub duration: String,
    pub stations: RankedStations,
    pub polyline: Vec<Coordinate>,
    pub station_source: StationSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub vehicle_id: String,
    pub origin_name: String,
    pub destination_name: String,
    pub distance_km: f64,
    pub cost: f64,
}

impl HistoryEntry {
    pub fn from_trip(trip: &TripResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp,
            vehicle_id: trip.request.vehicle_id.clone(),
            origin_name: trip.request.origin.display_name(),
            destination_name: trip.request.destination.display_name(),
            distance_km: trip.distance_km,
            cost: trip.estimated_cost,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    pub label: String,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}
