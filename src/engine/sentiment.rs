//! Sentiment distribution per release year over the Games × Reviews join.

use indexmap::IndexMap;
use itertools::Itertools;

use super::models::SentimentBreakdown;
use super::{Answer, QueryEngine};
use crate::dataset::release_year;

fn sentiment_label(code: i64) -> Option<&'static str> {
    match code {
        0 => Some("negativo"),
        1 => Some("neutro"),
        2 => Some("positivo"),
        _ => None,
    }
}

impl QueryEngine {
    /// Counts of sentiment labels among reviews of games released in `year`,
    /// ordered by descending count. Codes outside {0,1,2} carry no label and
    /// are skipped; labels with zero occurrences are omitted.
    pub fn sentiment_by_year(&self, year: i32) -> Answer<SentimentBreakdown> {
        let tables = self.tables();

        let mut matched = 0u64;
        let mut counts: IndexMap<&'static str, u64> = IndexMap::new();

        for review in tables.reviews() {
            let Some(game) = tables.game_for_item(&review.item_id) else {
                continue;
            };
            let Some(release) = game.release_date.as_deref().and_then(release_year) else {
                continue;
            };
            if release != year {
                continue;
            }
            matched += 1;
            if let Some(label) = sentiment_label(review.sentiment) {
                *counts.entry(label).or_insert(0) += 1;
            }
        }

        if matched == 0 {
            return Answer::not_found(format!(
                "no reviews found for games released in {year}"
            ));
        }

        let counts = counts
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1))
            .map(|(label, count)| (label.to_string(), count))
            .collect();

        Answer::Found(SentimentBreakdown { year, counts })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::dataset::{Game, GenreTag, OwnedItem, Review, Tables};
    use crate::engine::QueryEngine;

    fn game(id: &str, release_date: Option<&str>) -> Game {
        Game {
            id: id.to_string(),
            app_name: None,
            developer: None,
            price: None,
            release_date: release_date.map(str::to_string),
        }
    }

    fn review(user_id: &str, item_id: &str, sentiment: i64) -> Review {
        Review {
            user_id: user_id.to_string(),
            item_id: item_id.to_string(),
            posted: "2015-07-01".to_string(),
            recommend: true,
            sentiment,
        }
    }

    fn engine(games: Vec<Game>, reviews: Vec<Review>) -> QueryEngine {
        QueryEngine::new(Arc::new(Tables::new(
            games,
            Vec::<OwnedItem>::new(),
            reviews,
            Vec::<GenreTag>::new(),
        )))
    }

    #[test]
    fn single_positive_review_for_release_year() {
        let engine = engine(
            vec![game("1", Some("2015-04-01"))],
            vec![review("u1", "1", 2)],
        );

        let breakdown = engine.sentiment_by_year(2015).found().unwrap();
        assert_eq!(breakdown.counts.len(), 1);
        assert_eq!(breakdown.counts.get("positivo"), Some(&1));
    }

    #[test]
    fn counts_order_descending_and_omit_zero_labels() {
        let engine = engine(
            vec![game("1", Some("2015-04-01"))],
            vec![
                review("u1", "1", 0),
                review("u2", "1", 2),
                review("u3", "1", 2),
                review("u4", "1", 2),
            ],
        );

        let breakdown = engine.sentiment_by_year(2015).found().unwrap();
        let labels: Vec<&str> = breakdown.counts.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["positivo", "negativo"]);
        assert_eq!(breakdown.counts.get("positivo"), Some(&3));
        assert!(breakdown.counts.get("neutro").is_none());
    }

    #[test]
    fn invalid_codes_are_skipped_but_still_mark_the_year() {
        let engine = engine(
            vec![game("1", Some("2015-04-01"))],
            vec![review("u1", "1", 7), review("u2", "1", -1)],
        );

        // The year has reviews, so it is found, yet no label applies.
        let breakdown = engine.sentiment_by_year(2015).found().unwrap();
        assert!(breakdown.counts.is_empty());
    }

    #[test]
    fn year_filter_uses_release_date_not_posted() {
        let engine = engine(
            vec![game("1", Some("2014-11-01")), game("2", Some("2015-02-01"))],
            vec![review("u1", "1", 2), review("u2", "2", 0)],
        );

        let breakdown = engine.sentiment_by_year(2014).found().unwrap();
        assert_eq!(breakdown.counts.get("positivo"), Some(&1));
        assert!(breakdown.counts.get("negativo").is_none());
    }

    #[test]
    fn year_without_reviews_is_not_found() {
        let engine = engine(
            vec![game("1", Some("2015-04-01")), game("2", None)],
            vec![review("u1", "2", 2)],
        );

        // Game "2" has no release date, so its review never reaches any year.
        assert!(!engine.sentiment_by_year(2015).is_found());
        assert!(!engine.sentiment_by_year(2020).is_found());
    }

    #[test]
    fn reviews_of_unknown_games_are_dropped_by_the_join() {
        let engine = engine(vec![game("1", Some("2015-04-01"))], vec![review("u1", "404", 2)]);
        assert!(!engine.sentiment_by_year(2015).is_found());
    }
}
