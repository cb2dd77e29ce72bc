use async_trait::async_trait;

use super::{ProviderError, ResolvedRoute, RouteResolver, format_duration};
use crate::{
    geo::{haversine_km, straight_line_path},
    models::{Coordinate, SpeedBand},
};

const STEPS: usize = 32;

/// Offline resolver: great-circle distance and a straight polyline, with the
/// duration taken from the cruising speed of the requested band.
#[derive(Debug, Default, Clone, Copy)]
pub struct StraightLineResolver;

impl StraightLineResolver {
    pub fn route(
        origin: &Coordinate,
        destination: &Coordinate,
        speed_band: Option<SpeedBand>,
    ) -> ResolvedRoute {
        let distance_km = haversine_km(origin, destination);
        let speed_kmh = speed_band.unwrap_or_default().cruising_speed_kmh();
        let seconds = distance_km / speed_kmh * 3600.0;

        ResolvedRoute {
            distance_m: distance_km * 1000.0,
            duration: format_duration(seconds),
            polyline: straight_line_path(origin, destination, STEPS),
        }
    }
}

#[async_trait]
impl RouteResolver for StraightLineResolver {
    async fn resolve(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        speed_band: Option<SpeedBand>,
    ) -> Result<ResolvedRoute, ProviderError> {
        Ok(Self::route(origin, destination, speed_band))
    }
}
