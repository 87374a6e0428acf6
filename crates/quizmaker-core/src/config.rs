//! Session configuration and loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::sampler::DEFAULT_MAX_DISTRACTORS;

/// Tunables for a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How long feedback stays on screen before the next question.
    #[serde(default = "default_feedback_delay_ms")]
    pub feedback_delay_ms: u64,
    /// Distractors shown next to the correct answer.
    #[serde(default = "default_max_distractors")]
    pub max_distractors: usize,
    /// Fixed RNG seed; `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Whether sound cues are requested at all.
    #[serde(default = "default_true")]
    pub sound: bool,
    /// Version suffix of the offline cache namespace.
    #[serde(default = "default_cache_version")]
    pub offline_cache_version: String,
}

fn default_feedback_delay_ms() -> u64 {
    1500
}
fn default_max_distractors() -> usize {
    DEFAULT_MAX_DISTRACTORS
}
fn default_true() -> bool {
    true
}
fn default_cache_version() -> String {
    "v1".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            feedback_delay_ms: default_feedback_delay_ms(),
            max_distractors: default_max_distractors(),
            seed: None,
            sound: true,
            offline_cache_version: default_cache_version(),
        }
    }
}

impl SessionConfig {
    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_feedback_delay_ms(mut self, ms: u64) -> Self {
        self.feedback_delay_ms = ms;
        self
    }

    pub fn with_max_distractors(mut self, n: usize) -> Self {
        self.max_distractors = n;
        self
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when `path` is `None`:
/// 1. `quizmaker.toml` in the current directory
/// 2. `~/.config/quizmaker/config.toml`
///
/// Environment variable overrides: `QUIZMAKER_SEED`, `QUIZMAKER_FEEDBACK_DELAY_MS`.
pub fn load_config_from(path: Option<&Path>) -> Result<SessionConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizmaker.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => SessionConfig::default(),
    };

    if let Ok(seed) = std::env::var("QUIZMAKER_SEED") {
        config.seed = Some(
            seed.trim()
                .parse()
                .with_context(|| format!("QUIZMAKER_SEED is not a number: {seed}"))?,
        );
    }
    if let Ok(ms) = std::env::var("QUIZMAKER_FEEDBACK_DELAY_MS") {
        config.feedback_delay_ms = ms
            .trim()
            .parse()
            .with_context(|| format!("QUIZMAKER_FEEDBACK_DELAY_MS is not a number: {ms}"))?;
    }

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config_str(content: &str) -> Result<SessionConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizmaker"))
}
