use crate::models::Coordinate;

pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Great-circle distance in kilometres.
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    // Rounding can push h a hair above 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

pub fn path_length_km(path: &[Coordinate]) -> f64 {
    path.windows(2).map(|w| haversine_km(&w[0], &w[1])).sum()
}

/// `steps + 1` evenly spaced points from `start` to `end`, both included.
pub fn straight_line_path(start: &Coordinate, end: &Coordinate, steps: usize) -> Vec<Coordinate> {
    let steps = steps.max(1);
    let mut path = Vec::with_capacity(steps + 1);
    path.push(start.clone());
    for i in 1..steps {
        let t = i as f64 / steps as f64;
        path.push(start.interpolate(end, t));
    }
    path.push(end.clone());
    path
}
