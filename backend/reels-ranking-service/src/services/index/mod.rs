use crate::models::{Reel, ReelRecord, UserRecord};
use crate::utils::split_field;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

/// Relationship Index - immutable lookup structures over users and reels
///
/// Built once from raw records; every other component reads it through a
/// shared reference and nothing mutates it afterwards.
#[derive(Debug, Default)]
pub struct RelationshipIndex {
    follows: HashMap<String, HashSet<String>>,
    liked: HashMap<String, HashSet<String>>,
    viewed: HashMap<String, HashSet<String>>,
    reels: BTreeMap<String, Reel>,
    // Derived
    tag_reels: HashMap<String, HashSet<String>>,
    creator_reels: HashMap<String, HashSet<String>>,
}

impl RelationshipIndex {
    /// Build the index. Later rows win when an identifier repeats.
    pub fn build<U, R>(users: U, reels: R) -> Self
    where
        U: IntoIterator<Item = UserRecord>,
        R: IntoIterator<Item = ReelRecord>,
    {
        let mut index = Self::default();

        for record in reels {
            let reel = Reel {
                tags: split_field(record.tags.as_deref()),
                reel_id: record.reel_id.trim().to_string(),
                creator_id: record.creator_id.trim().to_string(),
                like_count: record.like_count,
                view_count: record.view_count,
            };
            let reel_id = reel.reel_id.clone();
            if index.reels.insert(reel_id.clone(), reel).is_some() {
                debug!(reel_id = %reel_id, "Duplicate reel row replaced earlier entry");
            }
        }

        for reel in index.reels.values() {
            index
                .creator_reels
                .entry(reel.creator_id.clone())
                .or_default()
                .insert(reel.reel_id.clone());

            for tag in &reel.tags {
                index
                    .tag_reels
                    .entry(tag.clone())
                    .or_default()
                    .insert(reel.reel_id.clone());
            }
        }

        for record in users {
            let user_id = record.user_id.trim().to_string();
            let followed = to_set(record.followed_users.as_deref());
            let liked = to_set(record.liked_reels.as_deref());
            let viewed = to_set(record.view_history.as_deref());

            if index.follows.insert(user_id.clone(), followed).is_some() {
                debug!(user_id = %user_id, "Duplicate user row replaced earlier entry");
            }
            index.liked.insert(user_id.clone(), liked);
            index.viewed.insert(user_id, viewed);
        }

        info!(
            users = index.follows.len(),
            reels = index.reels.len(),
            tags = index.tag_reels.len(),
            creators = index.creator_reels.len(),
            "Relationship index built"
        );

        index
    }

    pub fn contains_user(&self, user_id: &str) -> bool {
        self.follows.contains_key(user_id)
    }

    pub fn contains_reel(&self, reel_id: &str) -> bool {
        self.reels.contains_key(reel_id)
    }

    pub fn follows(&self, user_id: &str) -> Option<&HashSet<String>> {
        self.follows.get(user_id)
    }

    pub fn liked(&self, user_id: &str) -> Option<&HashSet<String>> {
        self.liked.get(user_id)
    }

    pub fn viewed(&self, user_id: &str) -> Option<&HashSet<String>> {
        self.viewed.get(user_id)
    }

    pub fn reel(&self, reel_id: &str) -> Option<&Reel> {
        self.reels.get(reel_id)
    }

    pub fn reels_with_tag(&self, tag: &str) -> Option<&HashSet<String>> {
        self.tag_reels.get(tag)
    }

    pub fn reels_created_by(&self, user_id: &str) -> Option<&HashSet<String>> {
        self.creator_reels.get(user_id)
    }

    /// Full catalog in reel id order.
    pub fn reels(&self) -> impl Iterator<Item = &Reel> {
        self.reels.values()
    }

    /// Every user that has a row, sorted.
    pub fn user_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.follows.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn user_count(&self) -> usize {
        self.follows.len()
    }

    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }
}

fn to_set(field: Option<&str>) -> HashSet<String> {
    split_field(field).into_iter().collect()
}
