//! The query/aggregation engine: six read-only operations over the immutable
//! table set. Each operation is a pure function of its inputs and the tables;
//! none can fail, they only distinguish found from not-found outcomes.

pub mod models;

mod developers;
mod genres;
mod sentiment;
mod users;

use std::sync::Arc;

use serde::Serialize;

use crate::dataset::Tables;

/// Read-only analytics over the injected table set. Cheap to clone and safe
/// to share across threads; the tables behind the `Arc` never change.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    tables: Arc<Tables>,
}

impl QueryEngine {
    pub fn new(tables: Arc<Tables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }
}

/// Outcome of a keyed query. Not-found is a normal result, not an error; it
/// serializes as a message object (optionally carrying a closest-label
/// suggestion), while a found value serializes as the value itself.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Answer<T> {
    Found(T),
    NotFound {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        suggestion: Option<String>,
    },
}

impl<T> Answer<T> {
    pub fn not_found(message: impl Into<String>) -> Self {
        Answer::NotFound {
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn not_found_with_hint(message: impl Into<String>, suggestion: Option<String>) -> Self {
        Answer::NotFound {
            message: message.into(),
            suggestion,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Answer::Found(_))
    }

    /// The found value, if any. Mostly a test convenience.
    pub fn found(self) -> Option<T> {
        match self {
            Answer::Found(value) => Some(value),
            Answer::NotFound { .. } => None,
        }
    }
}

/// recommended / total as a percentage. A zero denominator has no defined
/// rate and reports as absent rather than 0%.
pub(crate) fn recommend_rate(recommended: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(recommended as f64 / total as f64 * 100.0)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
