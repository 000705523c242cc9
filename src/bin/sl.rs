// Steamlens analytics CLI: one subcommand per query operation, JSON on stdout.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use steamlens::cli::dataset_stats::{self, DatasetStatsConfig};
use steamlens::dataset::loader::{load_tables, DatasetPaths};
use steamlens::util::env;
use steamlens::QueryEngine;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "sl", version, about = "Steamlens analytics CLI")]
struct Cli {
    /// Directory holding games.csv, items.csv, reviews.csv and genres.csv
    /// (defaults to STEAMLENS_DATA, then ./data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Spend, recommendation rate and item count for one user
    UserData {
        user_id: String,
    },
    /// Distinct reviewers and recommendation rate between two posted dates (inclusive)
    CountReviews {
        from: String,
        to: String,
    },
    /// Rank of a genre by total playtime across all users
    GenreRank {
        genre: String,
    },
    /// Top 5 users by played hours within a genre
    UserForGenre {
        genre: String,
    },
    /// Item count and free-content ratio per release year for a developer
    Developer {
        developer: String,
    },
    /// Review sentiment distribution for games released in a year
    SentimentAnalysis {
        year: i32,
    },
    /// Row counts and coverage gaps for the loaded dataset
    DatasetStats,
}

fn main() -> Result<()> {
    env::bootstrap_cli("sl");
    let _ = steamlens::logging::init_tracing("info");

    let cli = Cli::parse();

    if let Commands::DatasetStats = cli.command {
        return dataset_stats::run(DatasetStatsConfig {
            data_dir: cli.data_dir,
        });
    }

    let data_dir = env::data_dir(cli.data_dir);
    let started = Instant::now();
    let tables = load_tables(&DatasetPaths::from_dir(&data_dir))?;
    let engine = QueryEngine::new(Arc::new(tables));
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        data_dir = %data_dir.display(),
        "tables ready"
    );

    match cli.command {
        Commands::UserData { user_id } => {
            info!(user = %user_id, "user-data: query");
            print_json(&engine.user_spend_and_stats(&user_id))?;
        }
        Commands::CountReviews { from, to } => {
            info!(from = %from, to = %to, "count-reviews: query");
            print_json(&engine.review_count_in_range(&from, &to))?;
        }
        Commands::GenreRank { genre } => {
            info!(genre = %genre, "genre-rank: query");
            print_json(&engine.genre_rank(&genre))?;
        }
        Commands::UserForGenre { genre } => {
            info!(genre = %genre, "user-for-genre: query");
            print_json(&engine.top_users_by_genre(&genre))?;
        }
        Commands::Developer { developer } => {
            info!(developer = %developer, "developer: query");
            print_json(&engine.developer_free_content_ratio(&developer))?;
        }
        Commands::SentimentAnalysis { year } => {
            info!(year, "sentiment-analysis: query");
            print_json(&engine.sentiment_by_year(year))?;
        }
        // Handled before the tables were loaded.
        Commands::DatasetStats => unreachable!("dataset-stats returns early"),
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
