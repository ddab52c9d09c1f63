use anyhow::{Context, Result};
use reels_ranking_service::{
    loader,
    models::{ReelRecord, UserRecord},
    services::dataset::{DatasetConfig, SyntheticDataset},
    Config, RankingError, ReelRecommender, RelationshipIndex,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const TOP_TAGS: usize = 5;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().context("Failed to load config")?;

    let (users, reels) = load_records(&config)?;
    let index = RelationshipIndex::build(users, reels);

    let requested: Vec<String> = match std::env::args().skip(1).collect::<Vec<_>>() {
        args if !args.is_empty() => args,
        _ => index
            .user_ids()
            .first()
            .map(|user_id| vec![user_id.to_string()])
            .unwrap_or_default(),
    };

    let limit = config.service.default_limit;
    let recommender = ReelRecommender::new(index, config.weights, config.explanation);

    for user_id in &requested {
        match print_user(&recommender, user_id, limit) {
            Ok(()) => {}
            Err(RankingError::UnknownUser(_)) => {
                warn!(user_id = %user_id, "Requested user is not in the index");
                println!("User not found: {}", user_id);
            }
            Err(e) => return Err(e.into()),
        }
        println!();
    }

    Ok(())
}

fn load_records(config: &Config) -> Result<(Vec<UserRecord>, Vec<ReelRecord>)> {
    match (&config.service.users_path, &config.service.reels_path) {
        (Some(users_path), Some(reels_path)) => {
            info!(users_path = %users_path, reels_path = %reels_path, "Loading records from files");
            Ok((loader::load_users(users_path)?, loader::load_reels(reels_path)?))
        }
        _ => {
            if let Some(missing) = config.service.missing_record_path() {
                warn!(missing, "Only one record path is set; using synthetic dataset");
            }
            let dataset =
                SyntheticDataset::generate(&DatasetConfig::with_seed(config.service.dataset_seed));
            Ok((dataset.users, dataset.reels))
        }
    }
}

fn print_user(
    recommender: &ReelRecommender,
    user_id: &str,
    limit: usize,
) -> reels_ranking_service::Result<()> {
    let summary = recommender.user_summary(user_id)?;

    println!("=== {} ===", summary.user_id);
    println!(
        "Follows: {} | Liked: {} | Viewed: {}",
        summary.follow_count, summary.liked_count, summary.viewed_count
    );

    let top_tags: Vec<String> = summary
        .tag_frequencies
        .iter()
        .take(TOP_TAGS)
        .map(|(tag, count)| format!("{} ({})", tag, count))
        .collect();
    if top_tags.is_empty() {
        println!("Top tags: none");
    } else {
        println!("Top tags: {}", top_tags.join(", "));
    }

    let ranked = recommender.rank(user_id, limit)?;
    if ranked.is_empty() {
        println!("No recommendations available");
        return Ok(());
    }

    println!("Top {} recommendations:", ranked.len());
    for (position, entry) in ranked.iter().enumerate() {
        let details = recommender.reel_details(&entry.reel_id)?;
        let explanation = recommender.explain(user_id, &entry.reel_id)?;

        println!(
            "{:>2}. {} (score {:.4}) by {} [{}]",
            position + 1,
            details.reel_id,
            entry.score,
            details.creator_id,
            details.tags.join(", ")
        );
        println!("    {}", explanation);
    }

    Ok(())
}
