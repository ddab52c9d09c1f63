use super::{Signal, SignalContext};
use crate::error::Result;
use crate::models::SignalKind;

/// Social Signal - 基於關注的打分
/// Every reel created by a directly followed user earns a flat bonus.
pub struct SocialSignal {
    weight: f64,
}

impl SocialSignal {
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Signal for SocialSignal {
    fn contributions(&self, ctx: &SignalContext<'_>) -> Result<Vec<(String, f64)>> {
        let Some(followed) = ctx.index.follows(ctx.user_id) else {
            return Ok(Vec::new());
        };

        let mut contributions = Vec::new();
        for creator in followed {
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
        SignalKind::Social
    }
}
