// Output models for the query operations.

use indexmap::IndexMap;
use serde::Serialize;

/// Spend, recommendation rate and item count for one user.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub user_id: String,
    /// Sum of matched catalog prices, rounded to cents.
    pub spend: f64,
    /// Percentage of this user's reviews with the recommend flag set;
    /// absent (null) when the user has no reviews.
    pub recommend_rate: Option<f64>,
    pub items_count: u32,
}

/// Distinct reviewers and recommendation rate within a posted-date window.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewWindow {
    pub from: String,
    pub to: String,
    pub reviewers: usize,
    pub recommend_rate: Option<f64>,
}

/// A genre's position in the total-playtime ranking.
#[derive(Debug, Clone, Serialize)]
pub struct GenreRankSummary {
    pub genre: String,
    /// 1-based; rank 1 is the most-played genre.
    pub rank: usize,
    pub total_playtime_minutes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedUser {
    pub rank: usize,
    pub user_id: String,
    pub user_url: String,
    pub hours: f64,
}

/// Up to five users ordered by played hours within one genre.
#[derive(Debug, Clone, Serialize)]
pub struct TopUsersByGenre {
    pub genre: String,
    pub top: Vec<RankedUser>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeveloperYearRow {
    pub year: i32,
    /// Distinct free (price == 0) game ids released that year.
    pub free_count: usize,
    /// Distinct game ids released that year.
    pub total_count: usize,
    /// floor(free_count / total_count * 100).
    pub percentage: u64,
}

/// Ownership-record count and per-year free-content table for one developer.
/// Years without a single free release are omitted, not zero-filled.
#[derive(Debug, Clone, Serialize)]
pub struct DeveloperSummary {
    pub developer: String,
    pub total_items: usize,
    pub years: Vec<DeveloperYearRow>,
}

/// Sentiment label counts for reviews of games released in one year, ordered
/// by descending count. Labels with zero occurrences are omitted.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentBreakdown {
    pub year: i32,
    pub counts: IndexMap<String, u64>,
}
