//! Ranking snapshots issued by the notification authority.
//!
//! A [`RankingSnapshot`] is immutable once issued and is replaced wholesale on
//! every ranking update. Looking up a key that has no ranking yields `None`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Ranking metadata for one notification key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    pub key: String,
    /// Position in the authority's ordering, 0 being the top.
    pub rank: i32,
    /// Group the authority placed the notification in, overriding the app's own group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_group_key: Option<String>,
}

impl Ranking {
    pub fn new(key: impl Into<String>, rank: i32) -> Self {
        Self {
            key: key.into(),
            rank,
            override_group_key: None,
        }
    }

    pub fn with_override_group_key(mut self, group_key: impl Into<String>) -> Self {
        self.override_group_key = Some(group_key.into());
        self
    }
}

/// Point-in-time mapping from notification key to [`Ranking`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSnapshot {
    rankings: HashMap<String, Ranking>,
}

impl RankingSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ranking(&self, key: &str) -> Option<&Ranking> {
        self.rankings.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rankings.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rankings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }

    /// Keys ordered by rank, ties broken by key.
    pub fn ordered_keys(&self) -> Vec<&str> {
        let mut rankings: Vec<&Ranking> = self.rankings.values().collect();
        rankings.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.key.cmp(&b.key)));
        rankings.into_iter().map(|r| r.key.as_str()).collect()
    }
}

impl FromIterator<Ranking> for RankingSnapshot {
    fn from_iter<I: IntoIterator<Item = Ranking>>(iter: I) -> Self {
        Self {
            rankings: iter.into_iter().map(|r| (r.key.clone(), r)).collect(),
        }
    }
}
