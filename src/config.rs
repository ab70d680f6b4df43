use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::matcher::MatchOptions;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Searched when no location is given on the command line.
    pub location: String,
    /// Metres.
    pub radius: u32,
    pub min_similarity: f64,
    pub max_results: usize,
    pub nominatim_url: String,
    pub overpass_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let matching = MatchOptions::default();
        Self {
            location: "Paris, France".to_string(),
            radius: 5000,
            min_similarity: matching.min_similarity,
            max_results: matching.max_results,
            nominatim_url: "https://nominatim.openstreetmap.org".to_string(),
            overpass_url: "https://overpass-api.de".to_string(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            timeout_secs: 60,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_similarity) {
            bail!(
                "min_similarity must be between 0 and 1, got {}",
                self.min_similarity
            );
        }
        if self.max_results == 0 {
            bail!("max_results must be at least 1");
        }
        if self.radius == 0 {
            bail!("radius must be at least 1 metre");
        }
        Ok(())
    }

    pub fn matching(&self) -> MatchOptions {
        MatchOptions {
            min_similarity: self.min_similarity,
            max_results: self.max_results,
        }
    }
}
