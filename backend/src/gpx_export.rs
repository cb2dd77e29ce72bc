use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};

use crate::error::TripError;
use crate::models::{Coordinate, Station};

const CREATOR: &str = "fuel-trip-planner";

/// Base64 GPX with the trip polyline as a track and each station as a waypoint.
pub fn encode_trip_as_gpx(polyline: &[Coordinate], stations: &[Station]) -> Result<String, TripError> {
    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.into()),
        ..Default::default()
    };
    let mut track = Track {
        name: Some("trip".into()),
        ..Default::default()
    };

    let mut segment = TrackSegment::new();
    segment.points.extend(polyline.iter().map(to_waypoint));
    track.segments.push(segment);
    gpx.tracks.push(track);

    gpx.waypoints.extend(stations.iter().map(|station| {
        let mut waypoint = to_waypoint(&station.coordinate);
        waypoint.name = Some(station.name.clone());
        waypoint.description = Some(format!("unit price {:.3}", station.unit_price));
        waypoint
    }));

    let mut buffer = Vec::new();
    gpx::write(&gpx, &mut buffer)?;
    Ok(BASE64.encode(buffer))
}

fn to_waypoint(coord: &Coordinate) -> Waypoint {
    Waypoint::new(Point::new(coord.lon, coord.lat))
}
