//! Place search for fuel stations using the Overpass API.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{HttpProviderConfig, PlaceCandidate, PlaceSearch, ProviderError};
use crate::models::Coordinate;

const UNNAMED_STATION: &str = "Fuel station";

#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
    /// Set when the query ran into a server-side limit.
    pub remark: Option<String>,
}

/// Element as sent by Overpass: nodes carry `lat`/`lon`, ways carry `center`.
#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: u64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<OverpassCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct OverpassCenter {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassElement {
    /// Typed candidate, or `None` when the element has no position.
    pub fn into_candidate(self) -> Option<PlaceCandidate> {
        let (lat, lon) = match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => (lat, lon),
            (_, _, Some(center)) => (center.lat, center.lon),
            _ => return None,
        };
        let name = self
            .tags
            .get("name")
            .or_else(|| self.tags.get("brand"))
            .or_else(|| self.tags.get("operator"))
            .cloned()
            .unwrap_or_else(|| UNNAMED_STATION.to_string());

        Some(PlaceCandidate {
            id: format!("{}/{}", self.kind, self.id),
            coordinate: Coordinate::named(lat, lon, name.clone()),
            name,
        })
    }
}

impl OverpassResponse {
    pub fn into_candidates(self) -> Vec<PlaceCandidate> {
        if let Some(remark) = &self.remark {
            tracing::warn!("overpass remark: {remark}");
        }
        self.elements
            .into_iter()
            .filter_map(OverpassElement::into_candidate)
            .collect()
    }
}

pub struct OverpassPlaceSearch {
    client: Client,
    config: HttpProviderConfig,
}

impl OverpassPlaceSearch {
    pub fn new(config: HttpProviderConfig) -> Result<Self, ProviderError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    fn interpreter_url(&self) -> String {
        format!("{}/api/interpreter", self.config.base_url)
    }
}

/// Overpass QL for fuel amenities around a point.
pub fn build_fuel_query(reference: &Coordinate, radius_km: f64, timeout_secs: u64) -> String {
    let radius_m = (radius_km * 1000.0).round().max(0.0);
    format!(
        "[out:json][timeout:{timeout_secs}];\
         nw[\"amenity\"=\"fuel\"](around:{radius_m},{},{});\
         out center;",
        reference.lat, reference.lon
    )
}

#[async_trait]
impl PlaceSearch for OverpassPlaceSearch {
    async fn search(
        &self,
        reference: &Coordinate,
        radius_km: f64,
    ) -> Result<Vec<PlaceCandidate>, ProviderError> {
        let url = self.interpreter_url();
        let query = build_fuel_query(reference, radius_km, self.config.timeout.as_secs().max(1));
        tracing::debug!("searching fuel stations: {query}");

        let response = self
            .client
            .post(&url)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|err| ProviderError::from_reqwest(&err, &url, self.config.timeout))?
            .error_for_status()
            .map_err(|err| ProviderError::from_reqwest(&err, &url, self.config.timeout))?;

        let body: OverpassResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Parse(err.to_string()))?;

        let candidates = body.into_candidates();
        tracing::debug!("place search returned {} candidates", candidates.len());
        Ok(candidates)
    }
}
