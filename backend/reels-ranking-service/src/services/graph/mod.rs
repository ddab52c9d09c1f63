use crate::error::{RankingError, Result};
use crate::services::index::RelationshipIndex;
use std::collections::HashSet;

/// Graph Reachability - follow-graph traversal over the relationship index
///
/// Nothing is cached: every call walks the follow sets again.
pub struct FollowGraph<'a> {
    index: &'a RelationshipIndex,
}

impl<'a> FollowGraph<'a> {
    pub fn new(index: &'a RelationshipIndex) -> Self {
        Self { index }
    }

    /// Users followed by someone `user_id` follows, minus `user_id` and its
    /// direct follows.
    pub fn second_degree(&self, user_id: &str) -> Result<HashSet<String>> {
        let direct = self
            .index
            .follows(user_id)
            .ok_or_else(|| RankingError::UnknownUser(user_id.to_string()))?;

        let mut connections: HashSet<String> = HashSet::new();
        for followed in direct {
            if let Some(next) = self.index.follows(followed) {
                connections.extend(next.iter().cloned());
            }
        }

        connections.remove(user_id);
        connections.retain(|candidate| !direct.contains(candidate));

        Ok(connections)
    }
}
