use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Raw user row as handed over by the ingestion side.
///
/// Relational columns are comma-separated identifier lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: String,
    #[serde(default, deserialize_with = "lenient_field")]
    pub followed_users: Option<String>,
    #[serde(default, deserialize_with = "lenient_field")]
    pub liked_reels: Option<String>,
    #[serde(default, deserialize_with = "lenient_field")]
    pub view_history: Option<String>,
}

/// Raw reel row as handed over by the ingestion side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReelRecord {
    pub reel_id: String,
    pub creator_id: String,
    #[serde(default, deserialize_with = "lenient_field")]
    pub tags: Option<String>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub view_count: u64,
}

/// Accepts any JSON value; only strings survive, everything else is `None`.
fn lenient_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Catalog entry held by the relationship index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reel {
    pub reel_id: String,
    pub creator_id: String,
    pub tags: Vec<String>,
    pub like_count: u64,
    pub view_count: u64,
}

/// Reel metadata returned to presentation callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReelDetails {
    pub reel_id: String,
    pub creator_id: String,
    pub tags: Vec<String>,
    pub like_count: u64,
    pub view_count: u64,
}

impl From<&Reel> for ReelDetails {
    fn from(reel: &Reel) -> Self {
        Self {
            reel_id: reel.reel_id.clone(),
            creator_id: reel.creator_id.clone(),
            tags: reel.tags.clone(),
            like_count: reel.like_count,
            view_count: reel.view_count,
        }
    }
}

/// One scoring contribution summed into a candidate's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Social,       // reels from directly followed creators
    Content,      // tag overlap with liked reels
    SecondDegree, // reels from friends of friends
    Popularity,   // catalog-wide engagement boost
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Social => "social",
            SignalKind::Content => "content",
            SignalKind::SecondDegree => "second_degree",
            SignalKind::Popularity => "popularity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedReel {
    pub reel_id: String,
    pub score: f64,
}

/// Per-signal contributions to a single reel's score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub social: f64,
    pub content: f64,
    pub second_degree: f64,
    pub popularity: f64,
}

impl ScoreBreakdown {
    pub fn add(&mut self, kind: SignalKind, amount: f64) {
        match kind {
            SignalKind::Social => self.social += amount,
            SignalKind::Content => self.content += amount,
            SignalKind::SecondDegree => self.second_degree += amount,
            SignalKind::Popularity => self.popularity += amount,
        }
    }

    pub fn total(&self) -> f64 {
        self.social + self.content + self.second_degree + self.popularity
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoringStats {
    pub social_count: usize,
    pub content_count: usize,
    pub second_degree_count: usize,
    pub popularity_count: usize,
    pub total_candidates: usize,
}

impl ScoringStats {
    pub fn record(&mut self, kind: SignalKind, touched: usize) {
        match kind {
            SignalKind::Social => self.social_count = touched,
            SignalKind::Content => self.content_count = touched,
            SignalKind::SecondDegree => self.second_degree_count = touched,
            SignalKind::Popularity => self.popularity_count = touched,
        }
    }
}

/// Summary figures that drive profile displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub user_id: String,
    pub follow_count: usize,
    pub liked_count: usize,
    pub viewed_count: usize,
    /// Tag occurrences across liked reels, most frequent first.
    pub tag_frequencies: Vec<(String, usize)>,
}
