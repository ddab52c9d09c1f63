use crate::config::ExplanationConfig;
use crate::error::{RankingError, Result};
use crate::services::graph::FollowGraph;
use crate::services::index::RelationshipIndex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

const FALLBACK: &str = "This reel matched your general preferences";

/// Why a reel fits a user, in the order the checks run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reason {
    FollowsCreator { creator_id: String },
    SecondDegreeCreator { creator_id: String },
    SharedTags { tags: Vec<String> },
    Popular { like_count: u64, view_count: u64 },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::FollowsCreator { creator_id } => {
                write!(f, "You follow the creator {}", creator_id)
            }
            Reason::SecondDegreeCreator { creator_id } => {
                write!(f, "{} is followed by someone you follow", creator_id)
            }
            Reason::SharedTags { tags } => {
                write!(f, "Contains tags you like: {}", tags.join(", "))
            }
            Reason::Popular {
                like_count,
                view_count,
            } => write!(
                f,
                "Popular content with {} likes and {} views",
                like_count, view_count
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub reasons: Vec<Reason>,
}

impl Explanation {
    pub fn is_fallback(&self) -> bool {
        self.reasons.is_empty()
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reasons.is_empty() {
            return f.write_str(FALLBACK);
        }

        let reasons: Vec<String> = self.reasons.iter().map(ToString::to_string).collect();
        write!(f, "Recommended because: {}", reasons.join("; "))
    }
}

/// Explanation Generator - 推薦理由
///
/// Re-checks the relationships behind each scoring signal for one
/// (user, reel) pair. It reads the index directly and never looks at scores.
pub struct Explainer {
    index: Arc<RelationshipIndex>,
    config: ExplanationConfig,
}

impl Explainer {
    pub fn new(index: Arc<RelationshipIndex>, config: ExplanationConfig) -> Self {
        Self { index, config }
    }

    pub fn explain(&self, user_id: &str, reel_id: &str) -> Result<Explanation> {
        let followed = self
            .index
            .follows(user_id)
            .ok_or_else(|| RankingError::UnknownUser(user_id.to_string()))?;
        let reel = self
            .index
            .reel(reel_id)
            .ok_or_else(|| RankingError::UnknownReel(reel_id.to_string()))?;

        let mut reasons = Vec::new();

        if followed.contains(&reel.creator_id) {
            reasons.push(Reason::FollowsCreator {
                creator_id: reel.creator_id.clone(),
            });
        }

        let second_degree = FollowGraph::new(&self.index).second_degree(user_id)?;
        if second_degree.contains(&reel.creator_id) {
            reasons.push(Reason::SecondDegreeCreator {
                creator_id: reel.creator_id.clone(),
            });
        }

        let shared = self.shared_tags(user_id, &reel.tags);
        if !shared.is_empty() {
            reasons.push(Reason::SharedTags { tags: shared });
        }

        if reel.like_count > self.config.popular_like_threshold
            || reel.view_count > self.config.popular_view_threshold
        {
            reasons.push(Reason::Popular {
                like_count: reel.like_count,
                view_count: reel.view_count,
            });
        }

        Ok(Explanation { reasons })
    }

    /// Tags of `reel_tags` that appear on any liked reel, sorted.
    fn shared_tags(&self, user_id: &str, reel_tags: &[String]) -> Vec<String> {
        let liked_tags: BTreeSet<&str> = self
            .index
            .liked(user_id)
            .into_iter()
            .flatten()
            .filter_map(|reel_id| self.index.reel(reel_id))
            .flat_map(|reel| reel.tags.iter().map(String::as_str))
            .collect();

        reel_tags
            .iter()
            .map(String::as_str)
            .filter(|tag| liked_tags.contains(tag))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
