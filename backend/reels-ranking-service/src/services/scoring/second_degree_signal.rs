use super::{Signal, SignalContext};
use crate::error::Result;
use crate::models::SignalKind;
use crate::services::graph::FollowGraph;

/// Second-Degree Signal - 二度關係打分
/// Reels created by friends of friends earn a flat bonus.
pub struct SecondDegreeSignal {
    weight: f64,
}

impl SecondDegreeSignal {
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Signal for SecondDegreeSignal {
    fn contributions(&self, ctx: &SignalContext<'_>) -> Result<Vec<(String, f64)>> {
        let connections = FollowGraph::new(ctx.index).second_degree(ctx.user_id)?;

        let mut contributions = Vec::new();
        for creator in &connections {
            let Some(created) = ctx.index.reels_created_by(creator) else {
                continue;
            };
            contributions.extend(
                created
                    .iter()
                    .filter(|reel_id| ctx.is_candidate(reel_id))
                    .map(|reel_id| (reel_id.clone(), self.weight)),
            );
        }

        Ok(contributions)
    }

    fn kind(&self) -> SignalKind {
        SignalKind::SecondDegree
    }
}
