use serde::Deserialize;
use ureq::Agent;

use crate::{agent, Config, Coordinate, OsmId, ServiceError, Shop, Tags};

const SERVICE: &str = "Overpass";

pub trait PointSource {
    /// Shops within `radius` metres of `center`.
    fn query(&self, center: Coordinate, radius: u32) -> Result<Vec<Shop>, ServiceError>;
}

pub struct Overpass {
    agent: Agent,
    base: String,
}

impl Overpass {
    pub fn new(config: &Config) -> Self {
        Self {
            agent: agent(config),
            base: config.overpass_url.trim_end_matches('/').to_string(),
        }
    }
}

pub fn shops_around(center: Coordinate, radius: u32) -> String {
    format!(
        r#"[out:json][timeout:25];nwr["shop"](around:{radius},{},{});out center;"#,
        center.lat, center.lon
    )
}

impl PointSource for Overpass {
    fn query(&self, center: Coordinate, radius: u32) -> Result<Vec<Shop>, ServiceError> {
        log::info!(
            "Fetching shops near Latitude: {}, Longitude: {}, Radius: {radius}",
            center.lat,
            center.lon
        );
        let payload = shops_around(center, radius);
        let response: OverpassResponse = self
            .agent
            .post(&format!("{}/api/interpreter", self.base))
            .send_form(&[("data", payload.as_str())])
            .map_err(|e| ServiceError::request(SERVICE, e))?
            .into_json()
            .map_err(|e| ServiceError::decode(SERVICE, e))?;

        let total = response.elements.len();
        let shops: Vec<Shop> = response
            .elements
            .into_iter()
            .filter_map(|x| x.refine())
            .collect();
        if shops.len() < total {
            log::warn!("Dropped {} elements without a position", total - shops.len());
        }
        log::info!("Found {} shops", shops.len());
        Ok(shops)
    }
}

#[derive(Deserialize)]
struct OverpassResponse {
    elements: Vec<RawElement>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum RawElement {
    Node {
        id: u64,
        #[serde(flatten)]
        center: Coordinate,
        #[serde(default)]
        tags: Tags,
    },
    Way {
        id: u64,
        #[serde(default)]
        center: Option<Coordinate>,
        #[serde(default)]
        tags: Tags,
    },
    Relation {
        id: u64,
        #[serde(default)]
        center: Option<Coordinate>,
        #[serde(default)]
        tags: Tags,
    },
}

impl RawElement {
    fn refine(self) -> Option<Shop> {
        let (id, coordinate, tags) = match self {
            Self::Node { id, center, tags } => (OsmId::Node(id), center, tags),
            Self::Way { id, center, tags } => (OsmId::Way(id), center?, tags),
            Self::Relation { id, center, tags } => (OsmId::Relation(id), center?, tags),
        };
        Some(Shop {
            id,
            coordinate,
            tags,
        })
    }
}
