use super::{Signal, SignalContext};
use crate::error::{RankingError, Result};
use crate::models::SignalKind;
use crate::services::index::RelationshipIndex;
use std::collections::BTreeMap;

/// Content Signal - 基於標籤偏好的打分
///
/// Algorithm:
/// 1. Count tag occurrences across the user's liked reels
/// 2. weight(tag) = occurrences / total liked reels
/// 3. Every candidate carrying the tag earns `weight * multiplier`,
///    once per matching tag
pub struct ContentSignal {
    multiplier: f64,
}

impl ContentSignal {
    pub fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }
}

impl Signal for ContentSignal {
    fn contributions(&self, ctx: &SignalContext<'_>) -> Result<Vec<(String, f64)>> {
        let preferences = tag_preferences(ctx.index, ctx.user_id)?;

        let mut contributions = Vec::new();
        for (tag, weight) in &preferences {
            let Some(reels) = ctx.index.reels_with_tag(tag) else {
                continue;
            };
            contributions.extend(
                reels
                    .iter()
                    .filter(|reel_id| ctx.is_candidate(reel_id))
                    .map(|reel_id| (reel_id.clone(), weight * self.multiplier)),
            );
        }

        Ok(contributions)
    }

    fn kind(&self) -> SignalKind {
        SignalKind::Content
    }
}

/// Tag occurrences over the user's liked reels that exist in the catalog.
/// A tag repeated on one reel counts each time.
pub fn tag_counts(index: &RelationshipIndex, user_id: &str) -> Result<BTreeMap<String, usize>> {
    let liked = index
        .liked(user_id)
        .ok_or_else(|| RankingError::UnknownUser(user_id.to_string()))?;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for reel in liked.iter().filter_map(|reel_id| index.reel(reel_id)) {
        for tag in &reel.tags {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    Ok(counts)
}

/// Preference weight per tag. The denominator is the whole liked set,
/// including liked ids missing from the catalog.
pub fn tag_preferences(index: &RelationshipIndex, user_id: &str) -> Result<BTreeMap<String, f64>> {
    let counts = tag_counts(index, user_id)?;
    let total_liked = index.liked(user_id).map_or(0, |liked| liked.len());

    Ok(counts
        .into_iter()
        .map(|(tag, count)| {
            let weight = if total_liked == 0 {
                0.0
            } else {
                count as f64 / total_liked as f64
            };
            (tag, weight)
        })
        .collect())
}
