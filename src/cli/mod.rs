pub mod dataset_stats;
