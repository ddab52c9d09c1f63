pub mod dataset;
pub mod explanation;
pub mod graph;
pub mod index;
pub mod ranking;
pub mod scoring;

pub use explanation::Explainer;
pub use graph::FollowGraph;
pub use index::RelationshipIndex;
pub use ranking::RankingLayer;
pub use scoring::ScoringEngine;
