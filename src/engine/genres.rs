//! Genre operations over the Genres × Items inner join: playtime ranking and
//! per-genre top users.
//!
//! Groups accumulate in insertion-ordered maps, so a stable descending sort
//! on the aggregate resolves ties to whichever group's first joined row
//! appears earlier in table order. That tie-break is observable behavior.

use std::collections::HashMap;

use indexmap::IndexMap;
use itertools::Itertools;

use super::models::{GenreRankSummary, RankedUser, TopUsersByGenre};
use super::{Answer, QueryEngine};
use crate::dataset::OwnedItem;
use crate::normalization::label::closest_label;

impl QueryEngine {
    /// 1-based rank of a genre among all genres, descending by total playtime
    /// summed over every joined (tag, item) row.
    pub fn genre_rank(&self, genre: &str) -> Answer<GenreRankSummary> {
        let by_game = self.items_by_game();

        let mut totals: IndexMap<&str, u64> = IndexMap::new();
        for tag in self.tables().genre_tags() {
            let Some(matched) = by_game.get(tag.id.as_str()) else {
                continue;
            };
            let minutes: u64 = matched.iter().map(|it| it.playtime_forever).sum();
            *totals.entry(tag.genre.as_str()).or_insert(0) += minutes;
        }

        let ranked = totals.iter().sorted_by(|a, b| b.1.cmp(a.1));
        for (idx, (label, minutes)) in ranked.enumerate() {
            if *label == genre {
                return Answer::Found(GenreRankSummary {
                    genre: genre.to_string(),
                    rank: idx + 1,
                    total_playtime_minutes: *minutes,
                });
            }
        }

        self.genre_not_found(genre)
    }

    /// Top 5 users by played hours within one genre, ranks 1..=n in stable
    /// descending order.
    pub fn top_users_by_genre(&self, genre: &str) -> Answer<TopUsersByGenre> {
        let by_game = self.items_by_game();

        let mut minutes_by_user: IndexMap<(&str, &str), u64> = IndexMap::new();
        for tag in self.tables().genre_tags() {
            if tag.genre != genre {
                continue;
            }
            let Some(matched) = by_game.get(tag.id.as_str()) else {
                continue;
            };
            for item in matched {
                *minutes_by_user
                    .entry((item.user_id.as_str(), item.user_url.as_str()))
                    .or_insert(0) += item.playtime_forever;
            }
        }

        if minutes_by_user.is_empty() {
            return self.genre_not_found(genre);
        }

        let top = minutes_by_user
            .iter()
            .sorted_by(|a, b| b.1.cmp(a.1))
            .take(5)
            .enumerate()
            .map(|(idx, ((user_id, user_url), minutes))| RankedUser {
                rank: idx + 1,
                user_id: user_id.to_string(),
                user_url: user_url.to_string(),
                hours: *minutes as f64 / 60.0,
            })
            .collect();

        Answer::Found(TopUsersByGenre {
            genre: genre.to_string(),
            top,
        })
    }

    /// Join-side index for the genre operations: item rows per catalog id.
    fn items_by_game(&self) -> HashMap<&str, Vec<&OwnedItem>> {
        let mut by_game: HashMap<&str, Vec<&OwnedItem>> = HashMap::new();
        for item in self.tables().items() {
            by_game.entry(item.item_id.as_str()).or_default().push(item);
        }
        by_game
    }

    fn genre_not_found<T>(&self, genre: &str) -> Answer<T> {
        let suggestion = closest_label(
            genre,
            self.tables().genre_tags().iter().map(|t| t.genre.as_str()),
        );
        Answer::not_found_with_hint(
            format!("genre '{genre}' was not found in the dataset"),
            suggestion,
        )
    }
}
