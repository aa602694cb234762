// src/config/engine.rs
//! Engine configuration (`config/engine.toml`), hot-reloaded on mtime change.
//!
//! TOML shape (every table and key optional):
//! ```toml
//! [weights]                 # metric ids, camelCase
//! requirementsCoverage = 30
//! pricingCompetitiveness = 25
//!
//! [category]
//! requiredCertifications = ["ISO 27001", "SOC 2"]
//! privacyStandards = ["GDPR"]
//!
//! [category.weights]
//! functional = 0.25
//! compliance = 0.30
//! ```

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
    time::{Duration, Instant, SystemTime},
};
use tracing::{info, warn};

use crate::category::CategoryConfig;
use crate::weights::MetricWeights;

pub const DEFAULT_ENGINE_CONFIG_PATH: &str = "config/engine.toml";
pub const ENV_ENGINE_CONFIG_PATH: &str = "ENGINE_CONFIG_PATH";
/// Minimum gap between two mtime checks of the config file.
pub const RELOAD_CHECK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default metric weights before buyer overrides.
    pub weights: MetricWeights,
    pub category: CategoryConfig,
}

impl EngineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading engine config from {}", path.display()))?;
        let cfg: EngineConfig = toml::from_str(&data)
            .with_context(|| format!("parsing engine config {}", path.display()))?;
        Ok(cfg.sanitized())
    }

    /// Resolve the config location:
    /// 1) $ENGINE_CONFIG_PATH (must exist)
    /// 2) config/engine.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_ENGINE_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_ENGINE_CONFIG_PATH} points to non-existent path"));
            }
            return Self::load_from_file(&pb);
        }
        let default_p = PathBuf::from(DEFAULT_ENGINE_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from_file(&default_p);
        }
        Ok(Self::default())
    }

    /// Negative or non-finite weights become 0; empty name lists fall back to defaults.
    fn sanitized(mut self) -> Self {
        self.weights = self.weights.sanitized();
        let defaults = CategoryConfig::default();
        self.category.required_certifications = clean_names(
            std::mem::take(&mut self.category.required_certifications),
            defaults.required_certifications,
        );
        self.category.privacy_standards = clean_names(
            std::mem::take(&mut self.category.privacy_standards),
            defaults.privacy_standards,
        );
        self
    }
}

fn clean_names(items: Vec<String>, fallback: Vec<String>) -> Vec<String> {
    let cleaned: Vec<String> = items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if cleaned.is_empty() {
        fallback
    } else {
        cleaned
    }
}

/// Hot-reload wrapper: reloads when the config file mtime changes.
/// The file is stat'ed at most once per check interval, however many
/// requests read the config. A failed reload keeps the last good configuration.
#[derive(Debug)]
pub struct HotReloadConfig {
    path: PathBuf,
    check_interval: Duration,
    inner: RwLock<State>,
}

#[derive(Debug)]
struct State {
    config: EngineConfig,
    last_modified: Option<SystemTime>,
    last_checked: Instant,
}

impl HotReloadConfig {
    pub fn new(path: impl Into<PathBuf>, initial: EngineConfig) -> Self {
        let path = path.into();
        let last_modified = fs::metadata(&path).and_then(|m| m.modified()).ok();
        Self {
            path,
            check_interval: RELOAD_CHECK_INTERVAL,
            inner: RwLock::new(State {
                config: initial,
                last_modified,
                last_checked: Instant::now(),
            }),
        }
    }

    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }

    /// Path from $ENGINE_CONFIG_PATH or the default location, loaded once up front.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(ENV_ENGINE_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ENGINE_CONFIG_PATH));
        let cfg = EngineConfig::load_default()?;
        info!(
            path = %path.display(),
            weight_sum = cfg.weights.sum(),
            "engine config loaded"
        );
        Ok(Self::new(path, cfg))
    }

    /// Latest configuration, reloading if the file changed since the last check.
    pub fn current(&self) -> EngineConfig {
        {
            let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            if guard.last_checked.elapsed() < self.check_interval {
                return guard.config.clone();
            }
        }

        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        // Another request may have checked while we waited for the lock.
        if guard.last_checked.elapsed() < self.check_interval {
            return guard.config.clone();
        }
        guard.last_checked = Instant::now();

        let mtime = fs::metadata(&self.path).and_then(|m| m.modified()).ok();
        if mtime.is_some() && guard.last_modified != mtime {
            match EngineConfig::load_from_file(&self.path) {
                Ok(cfg) => {
                    info!(path = %self.path.display(), "engine config reloaded");
                    guard.config = cfg;
                }
                Err(e) => warn!("engine config reload failed, keeping previous: {e:#}"),
            }
            guard.last_modified = mtime;
        }
        guard.config.clone()
    }
}
