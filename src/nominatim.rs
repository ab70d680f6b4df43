use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use ureq::Agent;

use crate::{agent, Config, Coordinate, ServiceError};

const SERVICE: &str = "Nominatim";

pub trait Geocoder {
    /// `Ok(None)` when the service answered but knows no such place.
    fn resolve(&self, location: &str) -> Result<Option<Coordinate>, ServiceError>;
}

pub struct Nominatim {
    agent: Agent,
    base: String,
}

impl Nominatim {
    pub fn new(config: &Config) -> Self {
        Self {
            agent: agent(config),
            base: config.nominatim_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Geocoder for Nominatim {
    fn resolve(&self, location: &str) -> Result<Option<Coordinate>, ServiceError> {
        log::debug!("Geocoding {location:?} via {SERVICE}");
        let places: Vec<Place> = self
            .agent
            .get(&format!("{}/search", self.base))
            .query("q", location)
            .query("format", "json")
            .query("limit", "1")
            .call()
            .map_err(|e| ServiceError::request(SERVICE, e))?
            .into_json()
            .map_err(|e| ServiceError::decode(SERVICE, e))?;

        Ok(places.into_iter().next().map(|place| {
            if let Some(x) = &place.display_name {
                log::info!("Resolved {location:?} to {x}");
            }
            Coordinate::new(place.lat, place.lon)
        }))
    }
}

#[serde_as]
#[derive(Deserialize)]
struct Place {
    #[serde_as(as = "DisplayFromStr")]
    lat: f64,
    #[serde_as(as = "DisplayFromStr")]
    lon: f64,
    #[serde(default)]
    display_name: Option<String>,
}
