use serde::Deserialize;

const ENV_PREFIX: &str = "REELS_";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub weights: SignalWeights,
    pub explanation: ExplanationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Number of recommendations printed per user
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// JSON array of user records; synthetic data is generated when unset
    #[serde(default)]
    pub users_path: Option<String>,
    /// JSON array of reel records
    #[serde(default)]
    pub reels_path: Option<String>,
    #[serde(default = "default_dataset_seed")]
    pub dataset_seed: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            users_path: None,
            reels_path: None,
            dataset_seed: default_dataset_seed(),
        }
    }
}

impl ServiceConfig {
    /// Variable left unset when only one of the two record paths is given.
    pub fn missing_record_path(&self) -> Option<&'static str> {
        match (&self.users_path, &self.reels_path) {
            (Some(_), None) => Some("REELS_REELS_PATH"),
            (None, Some(_)) => Some("REELS_USERS_PATH"),
            _ => None,
        }
    }
}

/// Absolute-unit weights for the four scoring signals.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignalWeights {
    /// Flat bonus for reels created by a directly followed user
    #[serde(default = "default_social_weight")]
    pub social_weight: f64,
    /// Multiplier applied to each matching tag preference
    #[serde(default = "default_content_weight")]
    pub content_weight: f64,
    /// Flat bonus for reels created by a second-degree connection
    #[serde(default = "default_second_degree_weight")]
    pub second_degree_weight: f64,
    #[serde(default = "default_popularity_weight")]
    pub popularity_weight: f64,
    /// Share of view_count counted next to like_count
    #[serde(default = "default_popularity_view_factor")]
    pub popularity_view_factor: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            social_weight: default_social_weight(),
            content_weight: default_content_weight(),
            second_degree_weight: default_second_degree_weight(),
            popularity_weight: default_popularity_weight(),
            popularity_view_factor: default_popularity_view_factor(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExplanationConfig {
    #[serde(default = "default_popular_like_threshold")]
    pub popular_like_threshold: u64,
    #[serde(default = "default_popular_view_threshold")]
    pub popular_view_threshold: u64,
}

impl Default for ExplanationConfig {
    fn default() -> Self {
        Self {
            popular_like_threshold: default_popular_like_threshold(),
            popular_view_threshold: default_popular_view_threshold(),
        }
    }
}

fn default_limit() -> usize {
    10
}

fn default_dataset_seed() -> u64 {
    42
}

fn default_social_weight() -> f64 {
    3.0
}

fn default_content_weight() -> f64 {
    2.0
}

fn default_second_degree_weight() -> f64 {
    1.5
}

fn default_popularity_weight() -> f64 {
    0.0001
}

fn default_popularity_view_factor() -> f64 {
    0.1
}

fn default_popular_like_threshold() -> u64 {
    500
}

fn default_popular_view_threshold() -> u64 {
    3000
}

impl Config {
    /// Load `REELS_*` variables, falling back to the built-in defaults.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenv::dotenv().ok();

        Ok(Config {
            service: envy::prefixed(ENV_PREFIX).from_env::<ServiceConfig>()?,
            weights: envy::prefixed(ENV_PREFIX).from_env::<SignalWeights>()?,
            explanation: envy::prefixed(ENV_PREFIX).from_env::<ExplanationConfig>()?,
        })
    }
}
