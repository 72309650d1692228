use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{ranking::DEFAULT_PARALLEL_THRESHOLD, RankingEngine, RelevanceScorer, RATING_SCALE_MAX};
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    /// Upper bound of the rating scale shared by `averageRating` and `minRating`
    #[serde(default = "default_rating_scale_max")]
    pub rating_scale_max: f64,
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
    pub default_limit: Option<usize>,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            rating_scale_max: default_rating_scale_max(),
            parallel_threshold: default_parallel_threshold(),
            default_limit: None,
        }
    }
}

fn default_rating_scale_max() -> f64 { RATING_SCALE_MAX }
fn default_parallel_threshold() -> usize { DEFAULT_PARALLEL_THRESHOLD }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_keyword_weight")]
    pub keyword: f64,
    #[serde(default = "default_site_type_weight")]
    pub site_type: f64,
    #[serde(default = "default_near_weight")]
    pub near: f64,
    #[serde(default = "default_nearby_weight")]
    pub nearby: f64,
    #[serde(default = "default_near_radius_km")]
    pub near_radius_km: f64,
    #[serde(default = "default_nearby_radius_km")]
    pub nearby_radius_km: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            keyword: default_keyword_weight(),
            site_type: default_site_type_weight(),
            near: default_near_weight(),
            nearby: default_nearby_weight(),
            near_radius_km: default_near_radius_km(),
            nearby_radius_km: default_nearby_radius_km(),
        }
    }
}

fn default_keyword_weight() -> f64 { 0.5 }
fn default_site_type_weight() -> f64 { 0.3 }
fn default_near_weight() -> f64 { 0.2 }
fn default_nearby_weight() -> f64 { 0.1 }
fn default_near_radius_km() -> f64 { 1.0 }
fn default_nearby_radius_km() -> f64 { 5.0 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            keyword: config.keyword,
            site_type: config.site_type,
            near: config.near,
            nearby: config.nearby,
            near_radius_km: config.near_radius_km,
            nearby_radius_km: config.nearby_radius_km,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// JSON file with the site list, used when no path is given on the command line
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SITE_RANKER__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SITE_RANKER__RANKING__RATING_SCALE_MAX -> ranking.rating_scale_max
            .add_source(environment())
            .build()?
            .try_deserialize::<Settings>()
            .and_then(Settings::validated)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize::<Settings>()
            .and_then(Settings::validated)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let scale = self.ranking.rating_scale_max;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::Message(format!(
                "ranking.rating_scale_max must be a positive number, got {}",
                scale
            )));
        }

        let weights = &self.scoring.weights;
        for (name, value) in [
            ("keyword", weights.keyword),
            ("site_type", weights.site_type),
            ("near", weights.near),
            ("nearby", weights.nearby),
            ("near_radius_km", weights.near_radius_km),
            ("nearby_radius_km", weights.nearby_radius_km),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Message(format!(
                    "scoring.weights.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if weights.near_radius_km > weights.nearby_radius_km {
            return Err(ConfigError::Message(format!(
                "scoring.weights.near_radius_km ({}) exceeds nearby_radius_km ({})",
                weights.near_radius_km, weights.nearby_radius_km
            )));
        }

        Ok(self)
    }

    /// Build the ranking engine described by these settings
    pub fn ranking_engine(&self) -> RankingEngine {
        let scorer = RelevanceScorer::new(
            ScoringWeights::from(&self.scoring.weights),
            self.ranking.rating_scale_max,
        );
        RankingEngine::new(scorer).with_parallel_threshold(self.ranking.parallel_threshold)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SITE_RANKER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
