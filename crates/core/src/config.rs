use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{LabelStatError, Result};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn profiled_env_bool(profile: &str, key: &str, default: bool) -> bool {
    match profiled_env_opt(profile, key) {
        Some(v) => match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            other => {
                tracing::warn!("Ignoring unrecognized boolean for {}: {:?}", key, other);
                default
            }
        },
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub aggregation: AggregationConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `LABELSTAT_PROFILE` env var. When set (e.g. `BENCH`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("LABELSTAT_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            aggregation: AggregationConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  aggregation: parallel={}, parallel_min_labels={}, worker_threads={}",
            self.aggregation.parallel,
            self.aggregation.parallel_min_labels,
            self.aggregation.worker_threads
        );
    }

    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "aggregation": {
                "parallel": self.aggregation.parallel,
                "parallel_min_labels": self.aggregation.parallel_min_labels,
                "worker_threads": self.aggregation.worker_threads,
            },
        })
    }
}

// ── Aggregation ───────────────────────────────────────────────

/// Controls how per-label reductions are scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Run per-label reductions on the rayon pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Below this many distinct labels reductions stay sequential.
    #[serde(default = "default_parallel_min_labels")]
    pub parallel_min_labels: usize,
    /// Dedicated pool size. 0 = rayon global pool.
    #[serde(default)]
    pub worker_threads: usize,
}

fn default_parallel() -> bool { true }
fn default_parallel_min_labels() -> usize { 8 }

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            parallel_min_labels: default_parallel_min_labels(),
            worker_threads: 0,
        }
    }
}

impl AggregationConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            parallel: profiled_env_bool(p, "LABELSTAT_PARALLEL", default_parallel()),
            parallel_min_labels: profiled_env_usize(
                p,
                "LABELSTAT_PARALLEL_MIN_LABELS",
                default_parallel_min_labels(),
            ),
            worker_threads: profiled_env_usize(p, "LABELSTAT_WORKER_THREADS", 0),
        }
    }

    /// Sequential-only configuration.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.parallel_min_labels == 0 {
            return Err(LabelStatError::Config(
                "parallel_min_labels must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether `label_count` groups should be reduced in parallel.
    pub fn use_parallel(&self, label_count: usize) -> bool {
        self.parallel && label_count >= self.parallel_min_labels
    }
}
