use anyhow::Result;

use crate::{
    matcher::match_shops, nominatim::Geocoder, output::ResultSink, overpass::PointSource, Config,
    Coordinate, Shop,
};

#[derive(Debug, PartialEq)]
pub enum Outcome {
    LocationNotFound,
    NoMatches { center: Coordinate },
    Matched { center: Coordinate, shops: Vec<Shop> },
}

pub struct Request<'a> {
    pub store_name: &'a str,
    pub location: &'a str,
    /// Metres.
    pub radius: u32,
}

/// Resolves, queries and matches, hands the outcome to `report`, and only
/// then persists any matches.
pub fn run(
    config: &Config,
    request: &Request,
    geocoder: &dyn Geocoder,
    source: &dyn PointSource,
    sink: &dyn ResultSink,
    report: impl FnOnce(&Outcome),
) -> Result<Outcome> {
    let outcome = find(config, request, geocoder, source)?;
    report(&outcome);

    if let Outcome::Matched { shops, .. } = &outcome {
        let shops: Vec<&Shop> = shops.iter().collect();
        sink.persist(&shops, request.store_name)?;
    }
    Ok(outcome)
}

fn find(
    config: &Config,
    request: &Request,
    geocoder: &dyn Geocoder,
    source: &dyn PointSource,
) -> Result<Outcome> {
    let Some(center) = geocoder.resolve(request.location)? else {
        return Ok(Outcome::LocationNotFound);
    };

    let shops = source.query(center, request.radius)?;
    let matched = match_shops(request.store_name, &shops, &config.matching());
    if matched.is_empty() {
        return Ok(Outcome::NoMatches { center });
    }

    Ok(Outcome::Matched {
        center,
        shops: matched.into_iter().cloned().collect(),
    })
}
