use std::time::Duration;

use ureq::{Agent, AgentBuilder};

pub mod config;
pub mod error;
pub mod matcher;
pub mod nominatim;
pub mod osm;
pub mod output;
pub mod overpass;
pub mod search;
pub mod similarity;

pub use config::Config;
pub use error::ServiceError;
pub use osm::{Coordinate, OsmId, Shop, Tags};

pub fn agent(config: &Config) -> Agent {
    AgentBuilder::new()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
}
