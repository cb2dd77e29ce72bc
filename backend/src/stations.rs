use crate::{
    models::{Coordinate, FuelType, Station},
    pricing::PriceTable,
};

/// Mock stations used when place search is unavailable: (id, name, lat offset, lon offset).
const FALLBACK_STATIONS: [(&str, &str, f64, f64); 6] = [
    ("fallback-1", "City Fuel Centre", 0.010, 0.012),
    ("fallback-2", "Highway Service Station", -0.025, 0.030),
    ("fallback-3", "Green Charge Point", 0.040, -0.015),
    ("fallback-4", "Ring Road Fuels", -0.005, -0.045),
    ("fallback-5", "Market Street Pumps", 0.060, 0.055),
    ("fallback-6", "Outer Depot Station", -0.095, 0.070),
];

/// The fixed fallback list placed around `reference` and priced for `fuel_type`.
pub fn fallback_stations(
    reference: &Coordinate,
    prices: &PriceTable,
    fuel_type: FuelType,
) -> Vec<Station> {
    FALLBACK_STATIONS
        .iter()
        .map(|&(id, name, dlat, dlon)| Station {
            id: id.to_string(),
            name: name.to_string(),
            coordinate: Coordinate::named(
                (reference.lat + dlat).clamp(-90.0, 90.0),
                wrap_longitude(reference.lon + dlon),
                name,
            ),
            unit_price: prices.price_for(fuel_type, id),
            distance_km: None,
        })
        .collect()
}

/// Brings a longitude back into [-180, 180] after an offset crossed the antimeridian.
fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}
