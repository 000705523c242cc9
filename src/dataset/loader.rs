//! CSV loading for the four tables.
//!
//! Structural problems (missing file, missing column, broken CSV framing) are
//! hard errors; malformed field values degrade instead: a price that does not
//! parse becomes absent, an item row without a usable key or count is skipped.
//! Skips are counted and logged so undercounting stays observable.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use atoi::atoi;
use csv::{ByteRecord, ReaderBuilder};
use serde::Deserialize;
use tracing::{info, warn};

use super::{Game, GenreTag, OwnedItem, Review, Tables};

/// Locations of the four CSV files making up one dataset.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub games: PathBuf,
    pub items: PathBuf,
    pub reviews: PathBuf,
    pub genres: PathBuf,
}

impl DatasetPaths {
    /// Conventional file names under a single data directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            games: dir.join("games.csv"),
            items: dir.join("items.csv"),
            reviews: dir.join("reviews.csv"),
            genres: dir.join("genres.csv"),
        }
    }
}

/// Load all four tables and build the immutable [`Tables`] handle.
pub fn load_tables(paths: &DatasetPaths) -> Result<Tables> {
    let games = read_games(open(&paths.games)?)
        .with_context(|| format!("reading {}", paths.games.display()))?;
    let items = read_items(open(&paths.items)?)
        .with_context(|| format!("reading {}", paths.items.display()))?;
    let reviews = read_reviews(open(&paths.reviews)?)
        .with_context(|| format!("reading {}", paths.reviews.display()))?;
    let genres = read_genre_tags(open(&paths.genres)?)
        .with_context(|| format!("reading {}", paths.genres.display()))?;

    info!(
        games = games.len(),
        items = items.len(),
        reviews = reviews.len(),
        genre_tags = genres.len(),
        "dataset loaded"
    );

    Ok(Tables::new(games, items, reviews, genres))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(BufReader::with_capacity(8 << 20, file))
}

#[derive(Debug, Deserialize)]
struct GameRow {
    id: String,
    #[serde(default)]
    app_name: Option<String>,
    #[serde(default)]
    developer: Option<String>,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
}

/// Catalog reader. `price` arrives as raw text because upstream dumps mix
/// numbers with markers like "Free Demo"; anything that is not a non-negative
/// number becomes an absent price.
pub fn read_games(reader: impl Read) -> Result<Vec<Game>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut out = Vec::with_capacity(4096);
    let mut unparsed_prices = 0u64;
    for row in rdr.deserialize::<GameRow>() {
        let row = row?;
        let price = match row.price.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<f64>() {
                Ok(v) if v >= 0.0 => Some(v),
                _ => {
                    unparsed_prices += 1;
                    None
                }
            },
        };
        out.push(Game {
            id: row.id,
            app_name: row.app_name.filter(|s| !s.is_empty()),
            developer: row.developer.filter(|s| !s.is_empty()),
            price,
            release_date: row.release_date.filter(|s| !s.is_empty()),
        });
    }

    if unparsed_prices > 0 {
        warn!(rows = unparsed_prices, "games: non-numeric prices treated as absent");
    }
    Ok(out)
}

/// Items reader. This is by far the largest table, so it reads byte records
/// against resolved header positions instead of going through serde.
pub fn read_items(reader: impl Read) -> Result<Vec<OwnedItem>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let headers = rdr.byte_headers()?.clone();
    let idx_user = header_pos(&headers, b"user_id")?;
    let idx_url = header_pos(&headers, b"user_url")?;
    let idx_item = header_pos(&headers, b"item_id")?;
    let idx_count = header_pos(&headers, b"items_count")?;
    let idx_play = header_pos(&headers, b"playtime_forever")?;

    let mut rec = ByteRecord::new();
    let mut out = Vec::with_capacity(4096);
    let mut skipped = 0u64;

    while rdr.read_byte_record(&mut rec)? {
        let user_id = std::str::from_utf8(&rec[idx_user]).unwrap_or("");
        let item_id = std::str::from_utf8(&rec[idx_item]).unwrap_or("");
        if user_id.is_empty() || item_id.is_empty() {
            skipped += 1;
            continue;
        }
        let Some(items_count) = atoi::<u32>(&rec[idx_count]) else {
            skipped += 1;
            continue;
        };
        let playtime_forever = atoi::<u64>(&rec[idx_play]).unwrap_or(0);
        let user_url = std::str::from_utf8(&rec[idx_url]).unwrap_or("").to_string();

        out.push(OwnedItem {
            user_id: user_id.to_string(),
            user_url,
            item_id: item_id.to_string(),
            items_count,
            playtime_forever,
        });
    }

    if skipped > 0 {
        warn!(rows = skipped, "items: rows without usable keys or counts skipped");
    }
    Ok(out)
}

#[derive(Debug, Deserialize)]
struct ReviewRow {
    user_id: String,
    item_id: String,
    #[serde(default)]
    posted: Option<String>,
    recommend: String,
    #[serde(default)]
    sentiment: Option<String>,
}

pub fn read_reviews(reader: impl Read) -> Result<Vec<Review>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut out = Vec::with_capacity(4096);
    for row in rdr.deserialize::<ReviewRow>() {
        let row = row?;
        // Codes outside 0..=2 carry no sentiment label; -1 marks unparsed ones.
        let sentiment = row
            .sentiment
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(-1);
        out.push(Review {
            user_id: row.user_id,
            item_id: row.item_id,
            posted: row.posted.unwrap_or_default(),
            recommend: parse_flag(&row.recommend),
            sentiment,
        });
    }
    Ok(out)
}

#[derive(Debug, Deserialize)]
struct GenreRow {
    id: String,
    genres: String,
}

pub fn read_genre_tags(reader: impl Read) -> Result<Vec<GenreTag>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut out = Vec::with_capacity(4096);
    let mut skipped = 0u64;
    for row in rdr.deserialize::<GenreRow>() {
        let row = row?;
        if row.genres.trim().is_empty() {
            skipped += 1;
            continue;
        }
        out.push(GenreTag {
            id: row.id,
            genre: row.genres,
        });
    }

    if skipped > 0 {
        warn!(rows = skipped, "genres: rows with empty labels skipped");
    }
    Ok(out)
}

fn header_pos(headers: &ByteRecord, name: &[u8]) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| anyhow!("{} col missing", String::from_utf8_lossy(name)))
}

/// Upstream exports booleans as True/False; 1/0 and yes/no also occur.
fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn games_prices_degrade_to_absent() {
        let csv = "id,app_name,developer,price,release_date\n\
                   10,Half-Life,Valve,9.99,1998-11-08\n\
                   20,Demo Thing,Valve,Free Demo,2001-06-01\n\
                   30,No Meta,,,\n";
        let games = read_games(csv.as_bytes()).unwrap();
        assert_eq!(games.len(), 3);
        assert_eq!(games[0].price, Some(9.99));
        assert_eq!(games[1].price, None);
        assert_eq!(games[2].price, None);
        assert_eq!(games[2].developer, None);
        assert_eq!(games[2].release_date, None);
    }

    #[test]
    fn items_skip_rows_without_keys_or_counts() {
        let csv = "user_id,user_url,item_id,items_count,playtime_forever\n\
                   u1,http://example/u1,10,3,120\n\
                   ,http://example/ghost,10,3,50\n\
                   u2,http://example/u2,20,not-a-number,50\n\
                   u3,http://example/u3,20,1,\n";
        let items = read_items(csv.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].user_id, "u1");
        assert_eq!(items[0].playtime_forever, 120);
        // Missing playtime degrades to zero rather than dropping the row.
        assert_eq!(items[1].user_id, "u3");
        assert_eq!(items[1].playtime_forever, 0);
    }

    #[test]
    fn reviews_parse_capitalized_flags() {
        let csv = "user_id,item_id,posted,recommend,sentiment\n\
                   u1,10,2015-05-01,True,2\n\
                   u2,10,2015-06-01,False,0\n\
                   u3,20,,1,bad\n";
        let reviews = read_reviews(csv.as_bytes()).unwrap();
        assert!(reviews[0].recommend);
        assert!(!reviews[1].recommend);
        assert!(reviews[2].recommend);
        assert_eq!(reviews[2].sentiment, -1);
        assert_eq!(reviews[2].posted, "");
    }

    #[test]
    fn genre_tags_drop_empty_labels() {
        let csv = "id,genres\n10,Action\n10,Indie\n20,\n";
        let tags = read_genre_tags(csv.as_bytes()).unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1].genre, "Indie");
    }
}
