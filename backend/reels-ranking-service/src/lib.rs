pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod recommender;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{RankingError, Result};
pub use recommender::ReelRecommender;
pub use services::{Explainer, FollowGraph, RankingLayer, RelationshipIndex, ScoringEngine};
