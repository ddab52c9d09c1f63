//! Synthetic Dataset Generator
//!
//! Produces reproducible user and reel rows for demos and load checks.
//! The same seed always yields the same rows.

use crate::models::{ReelRecord, UserRecord};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

pub const SAMPLE_TAGS: &[&str] = &[
    "travel",
    "food",
    "coding",
    "japanese songs",
    "cooking",
    "memes",
    "asian cuties",
    "anime",
];

#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub seed: u64,
    pub num_users: usize,
    pub num_reels: usize,
    pub follows_per_user: (usize, usize),
    pub likes_per_user: (usize, usize),
    pub views_per_user: (usize, usize),
    pub tags_per_reel: (usize, usize),
    pub max_likes: u64,
    /// view_count is drawn from like_count..=like_count + extra_views
    pub extra_views: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            num_users: 100,
            num_reels: 300,
            follows_per_user: (5, 15),
            likes_per_user: (5, 20),
            views_per_user: (10, 30),
            tags_per_reel: (1, 3),
            max_likes: 1000,
            extra_views: 5000,
        }
    }
}

impl DatasetConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    pub users: Vec<UserRecord>,
    pub reels: Vec<ReelRecord>,
}

impl SyntheticDataset {
    pub fn generate(config: &DatasetConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);

        let user_ids: Vec<String> = (0..config.num_users).map(|i| format!("user_{}", i)).collect();
        let reel_ids: Vec<String> = (0..config.num_reels).map(|i| format!("reel_{}", i)).collect();

        let users = user_ids
            .iter()
            .map(|user_id| generate_user(&mut rng, config, user_id, &user_ids, &reel_ids))
            .collect();

        let reels = reel_ids
            .iter()
            .map(|reel_id| generate_reel(&mut rng, config, reel_id, &user_ids))
            .collect();

        info!(
            seed = config.seed,
            users = config.num_users,
            reels = config.num_reels,
            "Synthetic dataset generated"
        );

        Self { users, reels }
    }
}

fn pick_count(rng: &mut StdRng, (low, high): (usize, usize), available: usize) -> usize {
    let high = high.min(available);
    let low = low.min(high);
    rng.gen_range(low..=high)
}

fn generate_user(
    rng: &mut StdRng,
    config: &DatasetConfig,
    user_id: &str,
    user_ids: &[String],
    reel_ids: &[String],
) -> UserRecord {
    let others: Vec<&String> = user_ids.iter().filter(|other| *other != user_id).collect();
    let follow_count = pick_count(rng, config.follows_per_user, others.len());
    let followed: Vec<&str> = others
        .choose_multiple(rng, follow_count)
        .map(|other| other.as_str())
        .collect();

    // Likes and views draw with replacement, so duplicates are expected
    let liked = draw_reels(rng, config.likes_per_user, reel_ids);
    let viewed = draw_reels(rng, config.views_per_user, reel_ids);

    UserRecord {
        user_id: user_id.to_string(),
        followed_users: Some(followed.join(",")),
        liked_reels: Some(liked.join(",")),
        view_history: Some(viewed.join(",")),
    }
}

fn draw_reels<'a>(
    rng: &mut StdRng,
    (low, high): (usize, usize),
    reel_ids: &'a [String],
) -> Vec<&'a str> {
    if reel_ids.is_empty() {
        return Vec::new();
    }

    let count = rng.gen_range(low..=high.max(low));
    (0..count)
        .filter_map(|_| reel_ids.choose(rng).map(String::as_str))
        .collect()
}

fn generate_reel(
    rng: &mut StdRng,
    config: &DatasetConfig,
    reel_id: &str,
    user_ids: &[String],
) -> ReelRecord {
    let creator_id = user_ids.choose(rng).cloned().unwrap_or_default();

    let tag_count = pick_count(rng, config.tags_per_reel, SAMPLE_TAGS.len());
    let tags: Vec<&str> = SAMPLE_TAGS.choose_multiple(rng, tag_count).copied().collect();

    let like_count = rng.gen_range(0..=config.max_likes);
    let view_count = rng.gen_range(like_count..=like_count + config.extra_views);

    ReelRecord {
        reel_id: reel_id.to_string(),
        creator_id,
        tags: Some(tags.join(",")),
        like_count,
        view_count,
    }
}
