//! Scoring Module
//!
//! Combines four additive signals into one score per candidate reel.
//!
//! # Signals (applied in this order)
//! - **Social**: flat bonus for reels created by directly followed users
//! - **Content**: tag-preference weight from liked reels, per matching tag
//! - **SecondDegree**: flat bonus for reels created by friends of friends
//! - **Popularity**: small engagement boost for every candidate in the catalog
//!
//! A reel the user already liked or viewed is never a candidate. Weights are
//! absolute units taken from [`SignalWeights`]; nothing is normalized.

mod content_signal;
mod popularity_signal;
mod second_degree_signal;
mod social_signal;

pub use content_signal::{tag_counts, tag_preferences, ContentSignal};
pub use popularity_signal::PopularitySignal;
pub use second_degree_signal::SecondDegreeSignal;
pub use social_signal::SocialSignal;

use crate::config::SignalWeights;
use crate::error::{RankingError, Result};
use crate::models::{ScoreBreakdown, ScoringStats, SignalKind};
use crate::services::index::RelationshipIndex;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Reel id → accumulated score. Ordered so repeated runs sum identically.
pub type CandidateScores = BTreeMap<String, f64>;

/// Per-request view of the index shared by every signal.
pub struct SignalContext<'a> {
    pub index: &'a RelationshipIndex,
    pub user_id: &'a str,
    interacted: HashSet<&'a str>,
}

impl<'a> SignalContext<'a> {
    pub fn new(index: &'a RelationshipIndex, user_id: &'a str) -> Result<Self> {
        let liked = index
            .liked(user_id)
            .ok_or_else(|| RankingError::UnknownUser(user_id.to_string()))?;
        let viewed = index
            .viewed(user_id)
            .ok_or_else(|| RankingError::UnknownUser(user_id.to_string()))?;

        let interacted = liked.iter().chain(viewed.iter()).map(String::as_str).collect();

        Ok(Self {
            index,
            user_id,
            interacted,
        })
    }

    /// Liked ∪ viewed reels never receive a score.
    pub fn is_candidate(&self, reel_id: &str) -> bool {
        !self.interacted.contains(reel_id)
    }
}

/// One independent scoring contribution.
pub trait Signal: Send + Sync {
    /// `(reel_id, amount)` pairs; a reel may appear more than once.
    fn contributions(&self, ctx: &SignalContext<'_>) -> Result<Vec<(String, f64)>>;
    fn kind(&self) -> SignalKind;
}

pub struct ScoringEngine {
    index: Arc<RelationshipIndex>,
    signals: Vec<Box<dyn Signal>>,
}

impl ScoringEngine {
    pub fn new(index: Arc<RelationshipIndex>, weights: SignalWeights) -> Self {
        let signals: Vec<Box<dyn Signal>> = vec![
            Box::new(SocialSignal::new(weights.social_weight)),
            Box::new(ContentSignal::new(weights.content_weight)),
            Box::new(SecondDegreeSignal::new(weights.second_degree_weight)),
            Box::new(PopularitySignal::new(
                weights.popularity_weight,
                weights.popularity_view_factor,
            )),
        ];

        Self { index, signals }
    }

    pub fn index(&self) -> &RelationshipIndex {
        &self.index
    }

    /// Score every candidate reel for `user_id`.
    pub fn score_candidates(&self, user_id: &str) -> Result<CandidateScores> {
        self.score_with_stats(user_id).map(|(scores, _)| scores)
    }

    pub fn score_with_stats(&self, user_id: &str) -> Result<(CandidateScores, ScoringStats)> {
        let ctx = SignalContext::new(&self.index, user_id)?;
        let mut scores = CandidateScores::new();
        let mut stats = ScoringStats::default();

        for signal in &self.signals {
            let contributions = signal.contributions(&ctx)?;

            let mut touched: HashSet<&str> = HashSet::new();
            for (reel_id, _) in &contributions {
                touched.insert(reel_id.as_str());
            }
            stats.record(signal.kind(), touched.len());

            for (reel_id, amount) in contributions {
                *scores.entry(reel_id).or_insert(0.0) += amount;
            }
        }

        stats.total_candidates = scores.len();

        debug!(
            user_id = %user_id,
            social = stats.social_count,
            content = stats.content_count,
            second_degree = stats.second_degree_count,
            popularity = stats.popularity_count,
            total = stats.total_candidates,
            "Scoring complete"
        );

        Ok((scores, stats))
    }

    /// Per-signal contributions for one reel; all zero when the reel is not a
    /// candidate for this user.
    pub fn score_breakdown(&self, user_id: &str, reel_id: &str) -> Result<ScoreBreakdown> {
        let ctx = SignalContext::new(&self.index, user_id)?;
        if !self.index.contains_reel(reel_id) {
            return Err(RankingError::UnknownReel(reel_id.to_string()));
        }

        let mut breakdown = ScoreBreakdown::default();
        for signal in &self.signals {
            for (candidate, amount) in signal.contributions(&ctx)? {
                if candidate == reel_id {
                    breakdown.add(signal.kind(), amount);
                }
            }
        }

        Ok(breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReelRecord, UserRecord};

    fn user(id: &str, follows: &str, liked: &str, viewed: &str) -> UserRecord {
        UserRecord {
            user_id: id.to_string(),
            followed_users: Some(follows.to_string()),
            liked_reels: Some(liked.to_string()),
            view_history: Some(viewed.to_string()),
        }
    }

    fn reel(id: &str, creator: &str, tags: &str, likes: u64, views: u64) -> ReelRecord {
        ReelRecord {
            reel_id: id.to_string(),
            creator_id: creator.to_string(),
            tags: Some(tags.to_string()),
            like_count: likes,
            view_count: views,
        }
    }

    fn engine(users: Vec<UserRecord>, reels: Vec<ReelRecord>) -> ScoringEngine {
        let index = Arc::new(RelationshipIndex::build(users, reels));
        ScoringEngine::new(index, SignalWeights::default())
    }

    #[test]
    fn test_interacted_reels_never_scored() {
        let engine = engine(
            vec![user("a", "b", "r1", "r2"), user("b", "", "", "")],
            vec![
                reel("r1", "b", "food", 10, 10),
                reel("r2", "b", "food", 10, 10),
                reel("r3", "b", "food", 10, 10),
            ],
        );

        let scores = engine.score_candidates("a").unwrap();
        assert_eq!(scores.len(), 1);
        assert!(scores.contains_key("r3"));
    }

    #[test]
    fn test_all_signals_sum() {
        // a follows b; b follows c; a liked r1 (food)
        // r2 by b: social + content + popularity
        // r3 by c: second-degree + popularity
        let engine = engine(
            vec![
                user("a", "b", "r1", ""),
                user("b", "c", "", ""),
                user("c", "", "", ""),
            ],
            vec![
                reel("r1", "x", "food", 0, 0),
                reel("r2", "b", "food", 100, 1000),
                reel("r3", "c", "anime", 0, 0),
            ],
        );

        let scores = engine.score_candidates("a").unwrap();
        let popularity = 0.0001 * (100.0 + 0.1 * 1000.0);
        assert!((scores["r2"] - (3.0 + 2.0 + popularity)).abs() < 1e-9);
        assert!((scores["r3"] - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_popularity_applies_without_other_signals() {
        let engine = engine(
            vec![user("a", "", "", "")],
            vec![reel("hot", "x", "", 1000, 5000), reel("cold", "y", "", 0, 0)],
        );

        let scores = engine.score_candidates("a").unwrap();
        assert!((scores["hot"] - 0.15).abs() < 1e-9);
        assert_eq!(scores["cold"], 0.0);
        assert!(scores["hot"] > scores["cold"]);
    }

    #[test]
    fn test_stats_count_touched_reels() {
        let engine = engine(
            vec![user("a", "b", "r1", ""), user("b", "", "", "")],
            vec![
                reel("r1", "x", "food,travel", 0, 0),
                reel("r2", "b", "food,travel", 0, 0),
                reel("r3", "y", "coding", 0, 0),
            ],
        );

        let (_, stats) = engine.score_with_stats("a").unwrap();
        assert_eq!(stats.social_count, 1);
        assert_eq!(stats.content_count, 1);
        assert_eq!(stats.second_degree_count, 0);
        assert_eq!(stats.popularity_count, 2);
        assert_eq!(stats.total_candidates, 2);
    }

    #[test]
    fn test_score_breakdown() {
        let engine = engine(
            vec![user("a", "b", "r1", ""), user("b", "", "", "")],
            vec![
                reel("r1", "x", "food,travel", 0, 0),
                reel("r2", "b", "food,travel", 600, 0),
            ],
        );

        let breakdown = engine.score_breakdown("a", "r2").unwrap();
        assert!((breakdown.social - 3.0).abs() < 1e-9);
        assert!((breakdown.content - 4.0).abs() < 1e-9);
        assert_eq!(breakdown.second_degree, 0.0);
        assert!((breakdown.popularity - 0.06).abs() < 1e-9);

        let scores = engine.score_candidates("a").unwrap();
        assert!((breakdown.total() - scores["r2"]).abs() < 1e-9);

        // liked reel is not a candidate
        assert_eq!(engine.score_breakdown("a", "r1").unwrap().total(), 0.0);
    }

    #[test]
    fn test_unknown_ids() {
        let engine = engine(vec![user("a", "", "", "")], vec![reel("r1", "x", "", 0, 0)]);

        assert_eq!(
            engine.score_candidates("ghost"),
            Err(RankingError::UnknownUser("ghost".to_string()))
        );
        assert_eq!(
            engine.score_breakdown("a", "nope"),
            Err(RankingError::UnknownReel("nope".to_string()))
        );
    }

    #[test]
    fn test_scores_are_repeatable() {
        let engine = engine(
            vec![
                user("a", "b", "r1,r2", "r3"),
                user("b", "c", "r4", ""),
                user("c", "a", "", ""),
            ],
            vec![
                reel("r1", "c", "food,travel,memes", 5, 50),
                reel("r2", "b", "food,anime", 7, 70),
                reel("r3", "b", "coding", 1, 1),
                reel("r4", "c", "travel,memes", 300, 900),
                reel("r5", "c", "food,memes,anime", 12, 40),
                reel("r6", "b", "travel", 0, 0),
            ],
        );

        let first = engine.score_candidates("a").unwrap();
        let second = engine.score_candidates("a").unwrap();
        assert_eq!(first, second);
    }
}
