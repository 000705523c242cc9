//! Developer free-content breakdown over the Games × Items inner join.

use std::collections::{BTreeMap, HashSet};

use super::models::{DeveloperSummary, DeveloperYearRow};
use super::{Answer, QueryEngine};
use crate::dataset::release_year;
use crate::normalization::label::closest_label;

impl QueryEngine {
    /// Ownership-record count plus, per release year, distinct free and total
    /// game counts with a floored percentage.
    ///
    /// `total_items` counts joined rows, i.e. (game, user) ownership pairs,
    /// not distinct games — inherited semantics. Years without a free release
    /// are omitted from the table rather than zero-filled.
    pub fn developer_free_content_ratio(&self, developer: &str) -> Answer<DeveloperSummary> {
        let tables = self.tables();

        let mut total_items = 0usize;
        let mut all_ids: BTreeMap<i32, HashSet<&str>> = BTreeMap::new();
        let mut free_ids: BTreeMap<i32, HashSet<&str>> = BTreeMap::new();

        for item in tables.items() {
            let Some(game) = tables.game_for_item(&item.item_id) else {
                continue;
            };
            if game.developer.as_deref() != Some(developer) {
                continue;
            }
            total_items += 1;

            let Some(year) = game.release_date.as_deref().and_then(release_year) else {
                continue;
            };
            all_ids.entry(year).or_default().insert(game.id.as_str());
            if game.price == Some(0.0) {
                free_ids.entry(year).or_default().insert(game.id.as_str());
            }
        }

        if total_items == 0 {
            let suggestion = closest_label(
                developer,
                tables.games().iter().filter_map(|g| g.developer.as_deref()),
            );
            return Answer::not_found_with_hint(
                format!("developer '{developer}' was not found in the dataset"),
                suggestion,
            );
        }

        // Inner join of the two per-year maps; BTreeMap iteration gives the
        // ascending-year output order.
        let years = all_ids
            .iter()
            .filter_map(|(year, all)| {
                let free = free_ids.get(year)?;
                Some(DeveloperYearRow {
                    year: *year,
                    free_count: free.len(),
                    total_count: all.len(),
                    percentage: (free.len() * 100 / all.len()) as u64,
                })
            })
            .collect();

        Answer::Found(DeveloperSummary {
            developer: developer.to_string(),
            total_items,
            years,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::dataset::{Game, GenreTag, OwnedItem, Review, Tables};
    use crate::engine::{Answer, QueryEngine};

    fn game(id: &str, developer: &str, price: Option<f64>, release_date: Option<&str>) -> Game {
        Game {
            id: id.to_string(),
            app_name: None,
            developer: Some(developer.to_string()),
            price,
            release_date: release_date.map(str::to_string),
        }
    }

    fn item(user_id: &str, item_id: &str) -> OwnedItem {
        OwnedItem {
            user_id: user_id.to_string(),
            user_url: format!("http://example/{user_id}"),
            item_id: item_id.to_string(),
            items_count: 1,
            playtime_forever: 0,
        }
    }

    fn engine(games: Vec<Game>, items: Vec<OwnedItem>) -> QueryEngine {
        QueryEngine::new(Arc::new(Tables::new(
            games,
            items,
            Vec::<Review>::new(),
            Vec::<GenreTag>::new(),
        )))
    }

    #[test]
    fn counts_ownership_records_not_distinct_games() {
        let engine = engine(
            vec![game("1", "Valve", Some(0.0), Some("2015-04-01"))],
            vec![item("u1", "1"), item("u2", "1"), item("u3", "1")],
        );

        let summary = engine.developer_free_content_ratio("Valve").found().unwrap();
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.years.len(), 1);
        assert_eq!(summary.years[0].free_count, 1);
        assert_eq!(summary.years[0].total_count, 1);
        assert_eq!(summary.years[0].percentage, 100);
    }

    #[test]
    fn percentage_floors_and_years_ascend() {
        let engine = engine(
            vec![
                game("1", "Valve", Some(0.0), Some("2016-01-01")),
                game("2", "Valve", Some(9.99), Some("2016-03-01")),
                game("3", "Valve", Some(19.99), Some("2016-06-01")),
                game("4", "Valve", Some(0.0), Some("2014-01-01")),
            ],
            vec![item("u1", "1"), item("u1", "2"), item("u1", "3"), item("u1", "4")],
        );

        let summary = engine.developer_free_content_ratio("Valve").found().unwrap();
        assert_eq!(summary.total_items, 4);
        assert_eq!(summary.years.len(), 2);
        assert_eq!(summary.years[0].year, 2014);
        assert_eq!(summary.years[0].percentage, 100);
        assert_eq!(summary.years[1].year, 2016);
        // 1 free of 3 -> 33.33% floors to 33.
        assert_eq!(summary.years[1].percentage, 33);
    }

    #[test]
    fn years_without_free_releases_are_omitted() {
        let engine = engine(
            vec![
                game("1", "Valve", Some(9.99), Some("2015-01-01")),
                game("2", "Valve", Some(0.0), Some("2016-01-01")),
            ],
            vec![item("u1", "1"), item("u1", "2")],
        );

        let summary = engine.developer_free_content_ratio("Valve").found().unwrap();
        assert_eq!(summary.years.len(), 1);
        assert_eq!(summary.years[0].year, 2016);
    }

    #[test]
    fn undated_games_count_items_but_not_years() {
        let engine = engine(
            vec![game("1", "Valve", Some(0.0), None)],
            vec![item("u1", "1"), item("u2", "1")],
        );

        let summary = engine.developer_free_content_ratio("Valve").found().unwrap();
        assert_eq!(summary.total_items, 2);
        assert!(summary.years.is_empty());
    }

    #[test]
    fn unmatched_developer_is_not_found_with_suggestion() {
        let engine = engine(
            vec![game("1", "Valve", Some(0.0), Some("2015-01-01"))],
            vec![item("u1", "1")],
        );

        match engine.developer_free_content_ratio("valve") {
            Answer::NotFound { suggestion, .. } => assert_eq!(suggestion.as_deref(), Some("Valve")),
            Answer::Found(_) => panic!("developer match is case-sensitive"),
        }
    }

    #[test]
    fn developer_with_catalog_entry_but_no_owners_is_not_found() {
        // The join drops the game because nobody owns it.
        let engine = engine(vec![game("1", "Valve", Some(0.0), Some("2015-01-01"))], vec![]);
        assert!(!engine.developer_free_content_ratio("Valve").is_found());
    }
}
