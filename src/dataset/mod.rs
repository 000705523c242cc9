//! Record types for the four preloaded tables and the immutable [`Tables`]
//! handle the query engine runs against.
//!
//! All tables are loaded once at startup (see [`loader`]) and never mutated;
//! `Tables` exposes read accessors and the shared join helpers only.

pub mod loader;

use std::collections::HashMap;

use serde::Serialize;

/// One catalog entry. Unique by `id`.
#[derive(Debug, Clone, Serialize)]
pub struct Game {
    pub id: String,
    pub app_name: Option<String>,
    pub developer: Option<String>,
    pub price: Option<f64>,
    /// "YYYY-MM-DD" or a partial prefix; `None` when the source had no date.
    pub release_date: Option<String>,
}

/// One (user, game) ownership record. `items_count` is repeated on every row
/// belonging to the same user.
#[derive(Debug, Clone, Serialize)]
pub struct OwnedItem {
    pub user_id: String,
    pub user_url: String,
    pub item_id: String,
    pub items_count: u32,
    /// Minutes.
    pub playtime_forever: u64,
}

/// One user review of one game.
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub user_id: String,
    pub item_id: String,
    pub posted: String,
    pub recommend: bool,
    /// 0 = negative, 1 = neutral, 2 = positive; anything else carries no label.
    pub sentiment: i64,
}

/// One genre tag. A game with N genres has N rows.
#[derive(Debug, Clone, Serialize)]
pub struct GenreTag {
    pub id: String,
    pub genre: String,
}

/// The read-only table set, constructed once before any query runs and handed
/// to the engine behind an `Arc`. The game-id index backs every inner join
/// against the catalog; rows referencing an id absent from it are silently
/// dropped by the joins, never reported as errors.
#[derive(Debug)]
pub struct Tables {
    games: Vec<Game>,
    items: Vec<OwnedItem>,
    reviews: Vec<Review>,
    genre_tags: Vec<GenreTag>,
    game_index: HashMap<String, usize>,
}

impl Tables {
    pub fn new(
        games: Vec<Game>,
        items: Vec<OwnedItem>,
        reviews: Vec<Review>,
        genre_tags: Vec<GenreTag>,
    ) -> Self {
        let mut game_index = HashMap::with_capacity(games.len());
        for (idx, game) in games.iter().enumerate() {
            // First row wins; ids are unique upstream.
            game_index.entry(game.id.clone()).or_insert(idx);
        }
        Self {
            games,
            items,
            reviews,
            genre_tags,
            game_index,
        }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn items(&self) -> &[OwnedItem] {
        &self.items
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn genre_tags(&self) -> &[GenreTag] {
        &self.genre_tags
    }

    /// Inner-join lookup: the catalog row an item/review/tag row points at,
    /// or `None` when the foreign key has no match.
    pub fn game_for_item(&self, item_id: &str) -> Option<&Game> {
        self.game_index.get(item_id).map(|&idx| &self.games[idx])
    }

    pub fn has_game(&self, id: &str) -> bool {
        self.game_index.contains_key(id)
    }
}

/// Year of a release date: the substring before the first '-', parsed as an
/// integer. Unparseable dates yield `None` and are excluded from year-based
/// aggregation.
pub fn release_year(date: &str) -> Option<i32> {
    let head = date.split('-').next().unwrap_or(date);
    head.trim().parse::<i32>().ok()
}
