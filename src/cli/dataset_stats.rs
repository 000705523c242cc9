use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::dataset::loader::{load_tables, DatasetPaths};
use crate::util::env as env_util;

#[derive(Debug, Clone, Default)]
pub struct DatasetStatsConfig {
    /// Optional override for the dataset directory.
    pub data_dir: Option<PathBuf>,
}

/// Print row counts and coverage gaps for the dataset as pretty JSON.
pub fn run(cfg: DatasetStatsConfig) -> Result<()> {
    env_util::init_env();

    let dir = env_util::data_dir(cfg.data_dir);
    let tables = load_tables(&DatasetPaths::from_dir(&dir))?;

    let unmatched_items = tables
        .items()
        .iter()
        .filter(|it| tables.game_for_item(&it.item_id).is_none())
        .count();
    let unmatched_reviews = tables
        .reviews()
        .iter()
        .filter(|r| tables.game_for_item(&r.item_id).is_none())
        .count();
    let unmatched_genre_tags = tables
        .genre_tags()
        .iter()
        .filter(|t| tables.game_for_item(&t.id).is_none())
        .count();

    let games_without_price = tables.games().iter().filter(|g| g.price.is_none()).count();
    let games_without_release_date = tables
        .games()
        .iter()
        .filter(|g| g.release_date.is_none())
        .count();

    let mut users: HashSet<&str> = tables.items().iter().map(|it| it.user_id.as_str()).collect();
    users.extend(tables.reviews().iter().map(|r| r.user_id.as_str()));
    let genres: HashSet<&str> = tables.genre_tags().iter().map(|t| t.genre.as_str()).collect();

    let out = json!({
        "generated_at": Utc::now().to_rfc3339(),
        "data_dir": dir.display().to_string(),
        "rows": {
            "games": tables.games().len(),
            "items": tables.items().len(),
            "reviews": tables.reviews().len(),
            "genre_tags": tables.genre_tags().len(),
        },
        "unmatched_item_rows": unmatched_items,
        "unmatched_review_rows": unmatched_reviews,
        "unmatched_genre_tag_rows": unmatched_genre_tags,
        "games_without_price": games_without_price,
        "games_without_release_date": games_without_release_date,
        "distinct_users": users.len(),
        "distinct_genres": genres.len(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    info!("dataset-stats done");
    Ok(())
}
