use serde::{Deserialize, Serialize};

pub use shared::{
    ApiError, Coordinate, FuelType, HistoryEntry, MonthlyAggregate, RankedStations, SpeedBand,
    Station, StationSource, TripRequest, TripResult,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyStationsRequest {
    pub reference: Coordinate,
    pub fuel_type: FuelType,
    /// Overrides the configured search radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyStationsResponse {
    #[serde(flatten)]
    pub ranked: RankedStations,
    pub source: StationSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpxResponse {
    pub gpx_base64: String,
}
