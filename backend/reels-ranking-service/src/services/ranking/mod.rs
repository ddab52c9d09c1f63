//! Ranking Module
//!
//! Turns candidate scores into an ordered top-N list.
//!
//! # Ordering
//! - Descending score
//! - Ties broken by reel id ascending, so equal scores always come back in
//!   the same order

use crate::error::Result;
use crate::models::RankedReel;
use crate::services::scoring::{CandidateScores, ScoringEngine};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::info;

/// Ranking Layer - 候選集排序
pub struct RankingLayer {
    engine: Arc<ScoringEngine>,
}

impl RankingLayer {
    pub fn new(engine: Arc<ScoringEngine>) -> Self {
        Self { engine }
    }

    /// Top `limit` candidates with their scores.
    pub fn rank(&self, user_id: &str, limit: usize) -> Result<Vec<RankedReel>> {
        let (scores, stats) = self.engine.score_with_stats(user_id)?;
        let ranked = rank_candidates(scores, limit);

        info!(
            user_id = %user_id,
            candidates = stats.total_candidates,
            returned = ranked.len(),
            limit,
            "Ranking completed"
        );

        Ok(ranked)
    }

    /// Top `limit` reel ids, best first.
    pub fn recommend(&self, user_id: &str, limit: usize) -> Result<Vec<String>> {
        Ok(self
            .rank(user_id, limit)?
            .into_iter()
            .map(|ranked| ranked.reel_id)
            .collect())
    }
}

/// Sort by score descending, then reel id ascending, and keep `limit`.
pub fn rank_candidates(scores: CandidateScores, limit: usize) -> Vec<RankedReel> {
    let mut ranked: Vec<RankedReel> = scores
        .into_iter()
        .map(|(reel_id, score)| RankedReel { reel_id, score })
        .collect();

    // NaN cannot come out of the signals; treat it as equal rather than panic
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.reel_id.cmp(&b.reel_id))
    });
    ranked.truncate(limit);

    ranked
}
