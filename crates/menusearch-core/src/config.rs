//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars.
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Error;
use crate::types::FEATURE_DIM;

/// Tunables for ranking and for the interactive search console.
///
/// Every field has a default, so a partial `[search]` table is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Feature vector length. Items and queries must agree on it.
    pub dimension: usize,
    /// Share of the lexical score in the blended score.
    pub text_weight: f32,
    /// Share of the cosine similarity in the blended score.
    pub vector_weight: f32,
    /// Quiet period before a typed query is executed.
    pub debounce_ms: u64,
    /// Optional cap on the number of ranked results.
    pub max_results: Option<usize>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { dimension: FEATURE_DIM, text_weight: 0.4, vector_weight: 0.6, debounce_ms: 150, max_results: None }
    }
}

impl SearchSettings {
    pub fn validate(&self) -> crate::Result<()> {
        if self.dimension == 0 {
            return Err(Error::InvalidConfig("search.dimension must be greater than 0".into()));
        }
        for (key, w) in [("text_weight", self.text_weight), ("vector_weight", self.vector_weight)] {
            if !w.is_finite() || w < 0.0 {
                return Err(Error::InvalidConfig(format!("search.{key} must be a finite, non-negative number (got {w})")));
            }
        }
        if self.max_results == Some(0) {
            return Err(Error::InvalidConfig("search.max_results must be greater than 0 when set".into()));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    /// Load from the current directory using `RUST_ENV` (default `dev`).
    pub fn load() -> anyhow::Result<Self> {
        Self::load_in(Path::new("."))
    }

    pub fn load_in(base_dir: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(base_dir, &env_name)
    }

    pub fn load_for_env(base_dir: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(base_dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        config.search_settings()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// The `[search]` table layered over [`SearchSettings::default`], validated.
    pub fn search_settings(&self) -> anyhow::Result<SearchSettings> {
        let settings = if self.figment.contains("search") {
            self.get::<SearchSettings>("search")?
        } else {
            SearchSettings::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    /// `menu.path`, resolved against the directory the config was loaded from.
    pub fn menu_path(&self) -> Option<PathBuf> {
        self.get::<String>("menu.path").ok().map(|p| resolve_with_base(&self.base_dir, p))
    }

    /// `menu.dir`, resolved against the directory the config was loaded from.
    pub fn menu_dir(&self) -> Option<PathBuf> {
        self.get::<String>("menu.dir").ok().map(|p| resolve_with_base(&self.base_dir, p))
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
