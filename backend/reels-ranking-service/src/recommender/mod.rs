use crate::config::{ExplanationConfig, SignalWeights};
use crate::error::{RankingError, Result};
use crate::models::{RankedReel, ReelDetails, ReelRecord, ScoreBreakdown, UserRecord, UserSummary};
use crate::services::explanation::{Explainer, Explanation};
use crate::services::graph::FollowGraph;
use crate::services::index::RelationshipIndex;
use crate::services::scoring::{tag_counts, ScoringEngine};
use crate::services::RankingLayer;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Entry point for presentation callers.
///
/// Owns the read-only index and hands the same `Arc` to every layer.
pub struct ReelRecommender {
    index: Arc<RelationshipIndex>,
    scoring: Arc<ScoringEngine>,
    ranking: RankingLayer,
    explainer: Explainer,
}

impl ReelRecommender {
    pub fn new(
        index: RelationshipIndex,
        weights: SignalWeights,
        explanation: ExplanationConfig,
    ) -> Self {
        let index = Arc::new(index);
        let scoring = Arc::new(ScoringEngine::new(Arc::clone(&index), weights));

        Self {
            ranking: RankingLayer::new(Arc::clone(&scoring)),
            explainer: Explainer::new(Arc::clone(&index), explanation),
            index,
            scoring,
        }
    }

    /// Build the index from raw rows with default weights and thresholds.
    pub fn from_records(users: Vec<UserRecord>, reels: Vec<ReelRecord>) -> Self {
        Self::new(
            RelationshipIndex::build(users, reels),
            SignalWeights::default(),
            ExplanationConfig::default(),
        )
    }

    pub fn index(&self) -> &RelationshipIndex {
        &self.index
    }

    pub fn recommend(&self, user_id: &str, limit: usize) -> Result<Vec<String>> {
        info!(user_id = %user_id, limit, "Recommend request");
        self.ranking.recommend(user_id, limit)
    }

    pub fn rank(&self, user_id: &str, limit: usize) -> Result<Vec<RankedReel>> {
        self.ranking.rank(user_id, limit)
    }

    pub fn reel_details(&self, reel_id: &str) -> Result<ReelDetails> {
        self.index
            .reel(reel_id)
            .map(ReelDetails::from)
            .ok_or_else(|| RankingError::UnknownReel(reel_id.to_string()))
    }

    pub fn explain(&self, user_id: &str, reel_id: &str) -> Result<String> {
        self.explanation(user_id, reel_id)
            .map(|explanation| explanation.to_string())
    }

    pub fn explanation(&self, user_id: &str, reel_id: &str) -> Result<Explanation> {
        self.explainer.explain(user_id, reel_id)
    }

    pub fn score_breakdown(&self, user_id: &str, reel_id: &str) -> Result<ScoreBreakdown> {
        self.scoring.score_breakdown(user_id, reel_id)
    }

    pub fn second_degree(&self, user_id: &str) -> Result<HashSet<String>> {
        FollowGraph::new(&self.index).second_degree(user_id)
    }

    pub fn follow_count(&self, user_id: &str) -> Result<usize> {
        self.index
            .follows(user_id)
            .map(HashSet::len)
            .ok_or_else(|| RankingError::UnknownUser(user_id.to_string()))
    }

    pub fn liked_count(&self, user_id: &str) -> Result<usize> {
        self.index
            .liked(user_id)
            .map(HashSet::len)
            .ok_or_else(|| RankingError::UnknownUser(user_id.to_string()))
    }

    pub fn viewed_count(&self, user_id: &str) -> Result<usize> {
        self.index
            .viewed(user_id)
            .map(HashSet::len)
            .ok_or_else(|| RankingError::UnknownUser(user_id.to_string()))
    }

    /// Tag occurrences over liked reels, most frequent first, ties by tag.
    pub fn tag_frequencies(&self, user_id: &str) -> Result<Vec<(String, usize)>> {
        let mut frequencies: Vec<(String, usize)> =
            tag_counts(&self.index, user_id)?.into_iter().collect();
        frequencies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(frequencies)
    }

    pub fn user_summary(&self, user_id: &str) -> Result<UserSummary> {
        Ok(UserSummary {
            user_id: user_id.to_string(),
            follow_count: self.follow_count(user_id)?,
            liked_count: self.liked_count(user_id)?,
            viewed_count: self.viewed_count(user_id)?,
            tag_frequencies: self.tag_frequencies(user_id)?,
        })
    }
}
