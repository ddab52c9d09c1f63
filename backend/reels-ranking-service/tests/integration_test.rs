use reels_ranking_service::{
    models::{ReelRecord, UserRecord},
    services::dataset::{DatasetConfig, SyntheticDataset},
    services::scoring::tag_preferences,
    Config, RankingError, ReelRecommender, RelationshipIndex,
};
use std::collections::HashSet;

fn user(user_id: &str, follows: &str, liked: &str, viewed: &str) -> UserRecord {
    UserRecord {
        user_id: user_id.to_string(),
        followed_users: Some(follows.to_string()),
        liked_reels: Some(liked.to_string()),
        view_history: Some(viewed.to_string()),
    }
}

fn reel(reel_id: &str, creator_id: &str, tags: &str, likes: u64, views: u64) -> ReelRecord {
    ReelRecord {
        reel_id: reel_id.to_string(),
        creator_id: creator_id.to_string(),
        tags: Some(tags.to_string()),
        like_count: likes,
        view_count: views,
    }
}

fn synthetic_recommender() -> ReelRecommender {
    let dataset = SyntheticDataset::generate(&DatasetConfig::default());
    let config = Config::default();
    ReelRecommender::new(
        RelationshipIndex::build(dataset.users, dataset.reels),
        config.weights,
        config.explanation,
    )
}

#[test]
fn test_friend_of_friend_reel_outranks_unrelated_reel() {
    let recommender = ReelRecommender::from_records(
        vec![
            user("A", "B", "R1", ""),
            user("B", "C", "", ""),
            user("C", "", "", ""),
        ],
        vec![
            reel("R1", "B", "food", 10, 20),
            reel("R2", "C", "food", 600, 900),
            reel("R3", "D", "anime", 0, 0),
        ],
    );

    let ranked = recommender.rank("A", 5).unwrap();
    let ids: Vec<&str> = ranked.iter().map(|r| r.reel_id.as_str()).collect();
    assert_eq!(ids, vec!["R2", "R3"]);

    // content 2.0 + second degree 1.5 + popularity 0.0001 * (600 + 90)
    assert!((ranked[0].score - 3.569).abs() < 1e-9);
    assert_eq!(ranked[1].score, 0.0);

    let breakdown = recommender.score_breakdown("A", "R2").unwrap();
    assert_eq!(breakdown.social, 0.0);
    assert!((breakdown.content - 2.0).abs() < 1e-12);
    assert!((breakdown.second_degree - 1.5).abs() < 1e-12);

    assert_eq!(
        recommender.explain("A", "R2").unwrap(),
        "Recommended because: C is followed by someone you follow; \
         Contains tags you like: food; Popular content with 600 likes and 900 views"
    );
    assert_eq!(
        recommender.explain("A", "R3").unwrap(),
        "This reel matched your general preferences"
    );
}

#[test]
fn test_recommendations_respect_limit_and_history() {
    let recommender = synthetic_recommender();
    let index = recommender.index();

    for user_id in index.user_ids() {
        let liked = index.liked(user_id).unwrap();
        let viewed = index.viewed(user_id).unwrap();

        for limit in [0, 1, 5, 25] {
            let reels = recommender.recommend(user_id, limit).unwrap();
            assert!(reels.len() <= limit);
            for reel_id in &reels {
                assert!(!liked.contains(reel_id), "{} liked {}", user_id, reel_id);
                assert!(!viewed.contains(reel_id), "{} viewed {}", user_id, reel_id);
            }
        }
    }
}

#[test]
fn test_recommend_is_repeatable() {
    let recommender = synthetic_recommender();

    for user_id in ["user_0", "user_17", "user_99"] {
        let first = recommender.recommend(user_id, 10).unwrap();
        let second = recommender.recommend(user_id, 10).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
    }
}

#[test]
fn test_popularity_alone_orders_reels() {
    let recommender = ReelRecommender::from_records(
        vec![user("viewer", "", "", ""), user("maker", "", "", "")],
        vec![
            reel("quiet", "maker", "memes", 0, 0),
            reel("viral", "maker", "memes", 1000, 5000),
        ],
    );

    assert_eq!(recommender.recommend("viewer", 2).unwrap(), vec!["viral", "quiet"]);
}

#[test]
fn test_tag_preference_weights() {
    let index = RelationshipIndex::build(
        vec![user("fan", "", "X,Y", "")],
        vec![
            reel("X", "maker", "food", 0, 0),
            reel("Y", "maker", "food,travel", 0, 0),
        ],
    );

    let preferences = tag_preferences(&index, "fan").unwrap();
    assert_eq!(preferences["food"], 1.0);
    assert_eq!(preferences["travel"], 0.5);
}

#[test]
fn test_second_degree_skips_self_and_direct_follows() {
    let recommender = ReelRecommender::from_records(
        vec![
            user("A", "B,C", "", ""),
            user("B", "A,C,D", "", ""),
            user("C", "E", "", ""),
        ],
        vec![],
    );

    let expected: HashSet<String> = ["D", "E"].iter().map(|s| s.to_string()).collect();
    assert_eq!(recommender.second_degree("A").unwrap(), expected);
}

#[test]
fn test_unknown_identifiers_are_errors() {
    let recommender = ReelRecommender::from_records(
        vec![user("A", "", "", "")],
        vec![reel("R1", "A", "food", 1, 1)],
    );

    assert_eq!(
        recommender.recommend("ghost", 5),
        Err(RankingError::UnknownUser("ghost".to_string()))
    );
    assert_eq!(
        recommender.explain("ghost", "R1"),
        Err(RankingError::UnknownUser("ghost".to_string()))
    );
    assert_eq!(
        recommender.explain("A", "missing"),
        Err(RankingError::UnknownReel("missing".to_string()))
    );

    // A user with nothing is still a valid user
    assert_eq!(recommender.follow_count("A"), Ok(0));
    assert!(recommender.tag_frequencies("A").unwrap().is_empty());
}

#[test]
fn test_malformed_rows_degrade_to_empty() {
    let users: Vec<UserRecord> = serde_json::from_str(
        r#"[{"user_id": "A", "followed_users": 3.5, "liked_reels": null, "view_history": ["R1"]}]"#,
    )
    .unwrap();
    let reels: Vec<ReelRecord> =
        serde_json::from_str(r#"[{"reel_id": "R1", "creator_id": "A", "tags": false}]"#).unwrap();

    let recommender = ReelRecommender::from_records(users, reels);

    assert_eq!(recommender.follow_count("A"), Ok(0));
    assert_eq!(recommender.viewed_count("A"), Ok(0));
    assert!(recommender.reel_details("R1").unwrap().tags.is_empty());
    assert_eq!(recommender.recommend("A", 5).unwrap(), vec!["R1"]);
}

#[test]
fn test_padded_ids_still_match() {
    let recommender = ReelRecommender::from_records(
        vec![user("A", " B ", "", ""), user(" B", "", "", "")],
        vec![reel("R1", " B", "food", 0, 0)],
    );

    let ranked = recommender.rank("A", 5).unwrap();
    assert_eq!(ranked.len(), 1);
    assert!((ranked[0].score - 3.0).abs() < 1e-9);
    assert_eq!(
        recommender.explain("A", "R1").unwrap(),
        "Recommended because: You follow the creator B"
    );
}
