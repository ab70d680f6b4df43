use std::{
    fs::write,
    path::{is_separator, PathBuf},
};

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::{Coordinate, Shop};

const ADDRESS_TAGS: [&str; 4] = [
    "addr:housenumber",
    "addr:street",
    "addr:postcode",
    "addr:city",
];

pub trait ResultSink {
    fn persist(&self, shops: &[&Shop], label: &str) -> Result<()>;
}

/// Writes `matched_shops_<label>.json` into a directory, replacing any
/// earlier file for the same label.
pub struct JsonFile {
    dir: PathBuf,
}

impl JsonFile {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, label: &str) -> PathBuf {
        let label: String = label
            .chars()
            .map(|c| if is_separator(c) { '_' } else { c })
            .collect();
        self.dir.join(format!("matched_shops_{label}.json"))
    }
}

impl ResultSink for JsonFile {
    fn persist(&self, shops: &[&Shop], label: &str) -> Result<()> {
        let path = self.path(label);
        let mut contents = serde_json::to_string_pretty(shops)?;
        contents.push('\n');
        write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("Saved {} shops to {}", shops.len(), path.display());
        Ok(())
    }
}

/// One line summary of a matched shop.
pub fn describe(shop: &Shop, center: &Coordinate) -> String {
    let mut line = format!("- {}", shop.name().unwrap_or_default());

    let address = ADDRESS_TAGS
        .iter()
        .filter_map(|x| shop.tags.get(x))
        .join(" ");
    if !address.is_empty() {
        line.push_str(", ");
        line.push_str(&address);
    }

    let distance = center.distance(&shop.coordinate);
    line.push_str(&format!(" ({distance:.0}m) {}", shop.id.link()));
    line
}
