use crate::{
    geo::haversine_km,
    models::{Coordinate, RankedStations, Station},
};

/// Ranks `candidates` by distance from `reference`, dropping those beyond `radius_km`.
///
/// The sort is stable, so stations at equal distance keep their input order.
/// The best-price mark goes to the cheapest survivor (first one on ties) and
/// does not depend on the distance order.
pub fn rank_stations(
    reference: &Coordinate,
    candidates: Vec<Station>,
    radius_km: f64,
) -> RankedStations {
    let total = candidates.len();
    let mut stations: Vec<Station> = candidates
        .into_iter()
        .filter_map(|mut station| {
            let distance = haversine_km(reference, &station.coordinate);
            if distance.is_finite() && distance <= radius_km {
                station.distance_km = Some(distance);
                Some(station)
            } else {
                None
            }
        })
        .collect();

    stations.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let best_price_id = cheapest(&stations).map(|station| station.id.clone());

    tracing::debug!(
        "ranked {} of {} candidates within {:.1}km, best price: {:?}",
        stations.len(),
        total,
        radius_km,
        best_price_id
    );

    RankedStations {
        stations,
        best_price_id,
    }
}

fn cheapest(stations: &[Station]) -> Option<&Station> {
    stations.iter().fold(None, |best: Option<&Station>, station| match best {
        Some(current) if current.unit_price <= station.unit_price => Some(current),
        _ => Some(station),
    })
}
