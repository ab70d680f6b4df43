use itertools::Itertools;

use crate::{osm::Shop, similarity};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MatchOptions {
    /// Lowest accepted score, in `[0, 1]`.
    pub min_similarity: f64,
    /// Cap on distinct names, not on shops.
    pub max_results: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            min_similarity: 0.8,
            max_results: 10,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Candidate<'a> {
    pub name: &'a str,
    pub score: f64,
}

/// Distinct names close enough to `query`, best first. Equal scores keep the
/// order in which the names first appeared.
pub fn close_matches<'a>(
    query: &str,
    names: impl IntoIterator<Item = &'a str>,
    options: &MatchOptions,
) -> Vec<Candidate<'a>> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<Candidate> = names
        .into_iter()
        .unique()
        .map(|name| Candidate {
            name,
            score: similarity::ratio(query, name),
        })
        .filter(|x| x.score >= options.min_similarity)
        .collect();

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(options.max_results);
    candidates
}

/// Every shop whose name is one of the close matches for `query`, grouped by
/// name in rank order and in input order within each name.
pub fn match_shops<'a>(query: &str, shops: &'a [Shop], options: &MatchOptions) -> Vec<&'a Shop> {
    let matches = close_matches(query, shops.iter().filter_map(|x| x.name()), options);

    let mut output = Vec::new();
    for candidate in matches {
        log::debug!("{:?} scored {:.3}", candidate.name, candidate.score);
        output.extend(shops.iter().filter(|x| x.name() == Some(candidate.name)));
    }
    output
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::osm::{Coordinate, OsmId, Tags};

    fn shop(id: u64, name: Option<&str>) -> Shop {
        Shop {
            id: OsmId::Node(id),
            coordinate: Coordinate::new(48.8566, 2.3522),
            tags: Tags {
                name: name.map(|x| x.to_string()),
                other: BTreeMap::new(),
            },
        }
    }

    fn ids(shops: &[&Shop]) -> Vec<OsmId> {
        shops.iter().map(|x| x.id).collect()
    }

    fn threshold(min_similarity: f64) -> MatchOptions {
        MatchOptions {
            min_similarity,
            ..Default::default()
        }
    }

    #[test]
    fn carrefour_default_threshold() {
        let shops = vec![
            shop(1, Some("Carrefour Express")),
            shop(2, Some("Carrefour Market")),
            shop(3, Some("Monoprix")),
        ];
        // 0.692 and 0.72 both fall short of 0.8
        assert!(match_shops("Carrefour", &shops, &MatchOptions::default()).is_empty());
    }

    #[test]
    fn carrefour_lower_threshold() {
        let shops = vec![
            shop(1, Some("Carrefour Express")),
            shop(2, Some("Carrefour Market")),
            shop(3, Some("Monoprix")),
        ];
        let matched = match_shops("Carrefour", &shops, &threshold(0.6));
        assert_eq!(ids(&matched), vec![OsmId::Node(2), OsmId::Node(1)]);
    }

    #[test]
    fn misspelling() {
        let shops = vec![
            shop(1, Some("Monoprix")),
            shop(2, Some("Franprix")),
            shop(3, Some("Picard")),
        ];
        // "Monoprx" vs "Monoprix": 14/15
        let matched = match_shops("Monoprx", &shops, &MatchOptions::default());
        assert_eq!(ids(&matched), vec![OsmId::Node(1)]);
    }

    #[test]
    fn exact_match_ranks_first() {
        let shops = vec![
            shop(1, Some("Carrefour Cit")),
            shop(2, Some("Carrefour City")),
            shop(3, Some("Carrefour Citi")),
        ];
        let matched = match_shops("Carrefour City", &shops, &MatchOptions::default());
        assert_eq!(matched[0].id, OsmId::Node(2));
        assert_eq!(matched.len(), 3);
    }

    #[test]
    fn exact_only_at_full_threshold() {
        let shops = vec![
            shop(1, Some("Lidl")),
            shop(2, Some("Lidl ")),
            shop(3, Some("lidl")),
        ];
        let matched = match_shops("Lidl", &shops, &threshold(1.0));
        assert_eq!(ids(&matched), vec![OsmId::Node(1)]);
    }

    #[test]
    fn self_match_survives_any_threshold() {
        for t in [0.0, 0.5, 0.99, 1.0] {
            let candidates = close_matches("Picard", ["Picard"], &threshold(t));
            assert_eq!(
                candidates,
                vec![Candidate {
                    name: "Picard",
                    score: 1.0
                }]
            );
        }
    }

    #[test]
    fn empty_inputs() {
        let none: Vec<Shop> = Vec::new();
        assert!(match_shops("Carrefour", &none, &MatchOptions::default()).is_empty());

        let shops = vec![shop(1, Some("")), shop(2, Some("Carrefour"))];
        assert!(match_shops("", &shops, &threshold(0.0)).is_empty());
    }

    #[test]
    fn unnamed_shops_are_skipped() {
        let shops = vec![shop(1, None), shop(2, Some("Picard")), shop(3, None)];
        let matched = match_shops("Picard", &shops, &threshold(0.0));
        assert_eq!(ids(&matched), vec![OsmId::Node(2)]);
    }

    #[test]
    fn duplicates_keep_input_order() {
        let shops = vec![
            shop(5, Some("Franprix")),
            shop(1, Some("Monoprix")),
            shop(9, Some("Franprix")),
            shop(3, Some("Franprix")),
        ];
        let matched = match_shops("Franprix", &shops, &MatchOptions::default());
        assert_eq!(
            ids(&matched),
            vec![OsmId::Node(5), OsmId::Node(9), OsmId::Node(3)]
        );
    }

    #[test]
    fn cap_counts_names_not_shops() {
        let shops = vec![
            shop(1, Some("Biocoop")),
            shop(2, Some("Biocoop")),
            shop(3, Some("Biocop")),
            shop(4, Some("Biocoop")),
        ];
        let options = MatchOptions {
            min_similarity: 0.8,
            max_results: 1,
        };
        let matched = match_shops("Biocoop", &shops, &options);
        assert_eq!(
            ids(&matched),
            vec![OsmId::Node(1), OsmId::Node(2), OsmId::Node(4)]
        );
    }

    #[test]
    fn ties_keep_first_appearance() {
        // both differ from the query by one trailing char
        let candidates = close_matches("Lidl", ["Lidl B", "Lidl A"], &threshold(0.5));
        let names: Vec<_> = candidates.iter().map(|x| x.name).collect();
        assert_eq!(names, vec!["Lidl B", "Lidl A"]);
        assert_eq!(candidates[0].score, candidates[1].score);
    }

    #[test]
    fn output_is_subset_of_input() {
        let shops = vec![
            shop(1, Some("Carrefour")),
            shop(2, None),
            shop(3, Some("Carrefour Bio")),
            shop(4, Some("Nicolas")),
        ];
        for t in [0.0, 0.3, 0.8, 1.0] {
            for x in match_shops("Carrefour", &shops, &threshold(t)) {
                assert!(shops.iter().any(|s| std::ptr::eq(s, x)));
            }
        }
    }
}
