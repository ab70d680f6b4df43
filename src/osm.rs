use std::collections::BTreeMap;

use geo::{HaversineDistance, Point};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OsmId {
    Node(u64),
    Way(u64),
    Relation(u64),
}

impl OsmId {
    pub fn link(&self) -> String {
        match self {
            Self::Node(x) => format!("https://www.openstreetmap.org/node/{x}"),
            Self::Way(x) => format!("https://www.openstreetmap.org/way/{x}"),
            Self::Relation(x) => format!("https://www.openstreetmap.org/relation/{x}"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn point(&self) -> Point {
        Point::new(self.lon, self.lat)
    }

    /// Great-circle distance in metres.
    pub fn distance(&self, other: &Coordinate) -> f64 {
        self.point().haversine_distance(&other.point())
    }
}

/// OSM tags with the one we match on pulled out.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, String>,
}

impl Tags {
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "name" => self.name.as_deref(),
            _ => self.other.get(key).map(|x| x.as_str()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: OsmId,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub tags: Tags,
}

impl Shop {
    pub fn name(&self) -> Option<&str> {
        self.tags.name.as_deref()
    }
}
