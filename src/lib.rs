pub mod cli;
pub mod dataset;
pub mod engine;
pub mod logging;
pub mod normalization;

pub mod util {
    pub mod env;
}

pub use dataset::{loader, Tables};
pub use engine::{Answer, QueryEngine};
