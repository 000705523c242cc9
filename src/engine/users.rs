//! User-centric operations: per-user spend/stats and the review-window count.

use std::collections::HashSet;

use super::models::{ReviewWindow, UserSummary};
use super::{recommend_rate, round2, Answer, QueryEngine};

impl QueryEngine {
    /// Total spend, recommendation rate and item count for one user.
    ///
    /// The membership precondition checks Games.id alongside the two user-id
    /// columns; that catalog check is inherited behavior and kept as-is.
    pub fn user_spend_and_stats(&self, user_id: &str) -> Answer<UserSummary> {
        let tables = self.tables();

        let known = tables.has_game(user_id)
            || tables.items().iter().any(|it| it.user_id == user_id)
            || tables.reviews().iter().any(|r| r.user_id == user_id);
        if !known {
            return Answer::not_found(format!("user '{user_id}' was not found in the dataset"));
        }

        // Inner join against the catalog: item rows without a matching game
        // drop out of the sum. A missing price counts as 0.
        let spend: f64 = tables
            .items()
            .iter()
            .filter(|it| it.user_id == user_id)
            .filter_map(|it| tables.game_for_item(&it.item_id))
            .map(|game| game.price.unwrap_or(0.0))
            .sum();

        let (total, recommended) = tables
            .reviews()
            .iter()
            .filter(|r| r.user_id == user_id)
            .fold((0usize, 0usize), |(total, rec), review| {
                (total + 1, rec + usize::from(review.recommend))
            });

        // items_count repeats on every row for the user; any one row serves.
        // A user known only through reviews has no item row and reports 0.
        let items_count = tables
            .items()
            .iter()
            .find(|it| it.user_id == user_id)
            .map(|it| it.items_count)
            .unwrap_or(0);

        Answer::Found(UserSummary {
            user_id: user_id.to_string(),
            spend: round2(spend),
            recommend_rate: recommend_rate(recommended, total),
            items_count,
        })
    }

    /// Distinct reviewers and recommendation rate for reviews posted within
    /// [from, to]. Bounds compare as plain strings against `posted`; mixed
    /// date formats therefore compare incorrectly, which is inherited
    /// behavior. An empty window is a normal result, never not-found.
    pub fn review_count_in_range(&self, from: &str, to: &str) -> ReviewWindow {
        let mut users: HashSet<&str> = HashSet::new();
        let mut total = 0usize;
        let mut recommended = 0usize;

        for review in self.tables().reviews() {
            let posted = review.posted.as_str();
            if posted < from || posted > to {
                continue;
            }
            users.insert(review.user_id.as_str());
            total += 1;
            if review.recommend {
                recommended += 1;
            }
        }

        ReviewWindow {
            from: from.to_string(),
            to: to.to_string(),
            reviewers: users.len(),
            recommend_rate: recommend_rate(recommended, total).map(round2),
        }
    }
}
