use serde::{Deserialize, Serialize};

use crate::{cost::check_positive, error::TripError, models::FuelType};

/// Maximum relative deviation of a station price from the base price.
const MAX_SPREAD: f64 = 0.05;

/// Unit prices per fuel type (per litre, or per kWh for electric).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    pub petrol: f64,
    pub diesel: f64,
    pub hybrid: f64,
    pub electric: f64,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            petrol: 1.85,
            diesel: 1.75,
            hybrid: 1.85,
            electric: 0.30,
        }
    }
}

impl PriceTable {
    pub fn validate(&self) -> Result<(), TripError> {
        check_positive("petrol price", self.petrol)?;
        check_positive("diesel price", self.diesel)?;
        check_positive("hybrid price", self.hybrid)?;
        check_positive("electric price", self.electric)
    }

    pub fn base_price(&self, fuel_type: FuelType) -> f64 {
        match fuel_type {
            FuelType::Petrol => self.petrol,
            FuelType::Diesel => self.diesel,
            FuelType::Hybrid => self.hybrid,
            FuelType::Electric => self.electric,
        }
    }

    /// Price quoted by one station: the base price shifted by a fixed amount
    /// derived from the station id, so repeated searches agree.
    pub fn price_for(&self, fuel_type: FuelType, station_id: &str) -> f64 {
        let bucket = (fnv1a(station_id.as_bytes()) % 1001) as f64 / 1000.0;
        let spread = (bucket * 2.0 - 1.0) * MAX_SPREAD;
        let price = self.base_price(fuel_type) * (1.0 + spread);
        (price * 1000.0).round() / 1000.0
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(*byte)).wrapping_mul(PRIME))
}
