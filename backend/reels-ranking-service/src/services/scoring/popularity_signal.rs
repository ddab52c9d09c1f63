use super::{Signal, SignalContext};
use crate::error::Result;
use crate::models::{Reel, SignalKind};

/// Popularity Signal - 熱門加權
/// Applied to every candidate in the catalog, on top of any other bonus.
pub struct PopularitySignal {
    weight: f64,
    view_factor: f64,
}

impl PopularitySignal {
    pub fn new(weight: f64, view_factor: f64) -> Self {
        Self {
            weight,
            view_factor,
        }
    }

    /// `weight * (likes + view_factor * views)`
    pub fn popularity(&self, reel: &Reel) -> f64 {
        self.weight * (reel.like_count as f64 + self.view_factor * reel.view_count as f64)
    }
}

impl Signal for PopularitySignal {
    fn contributions(&self, ctx: &SignalContext<'_>) -> Result<Vec<(String, f64)>> {
        Ok(ctx
            .index
            .reels()
            .filter(|reel| ctx.is_candidate(&reel.reel_id))
            .map(|reel| (reel.reel_id.clone(), self.popularity(reel)))
            .collect())
    }

    fn kind(&self) -> SignalKind {
        SignalKind::Popularity
    }
}
