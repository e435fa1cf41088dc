//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (`__` separates nested keys). Provides helpers to expand
//! `~` and `${VAR}` and to resolve relative paths against a known base directory.
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::MatchMode;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> Result<Self> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    /// Wrap an already assembled figment (used by tests and embedders).
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{key}': {e}")))
    }

    pub fn settings(&self) -> Result<Settings> {
        self.figment.extract().map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        let settings = self.settings()?;
        if settings.dataset.recipe_id_column.trim().is_empty() || settings.dataset.interaction_id_column.trim().is_empty() {
            return Err(Error::InvalidConfig("join key columns must not be empty".into()));
        }
        if settings.plot.width == 0 || settings.plot.height == 0 {
            return Err(Error::InvalidConfig("plot dimensions must be positive".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dataset: DatasetSettings,
    pub plot: PlotSettings,
}

/// Where the raw Food.com dumps live and which columns carry the join.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    pub data_dir: String,
    pub catalog_file: String,
    pub catalog_name_column: String,
    pub catalog_id_column: String,
    /// Files named `<prefix>*.csv` in `data_dir` form the recipe table.
    pub recipes_prefix: String,
    pub interactions_prefix: String,
    /// Explicit file lists; when non-empty they replace prefix discovery.
    pub recipe_files: Vec<String>,
    pub interaction_files: Vec<String>,
    pub recipe_id_column: String,
    pub ingredients_column: String,
    pub interaction_id_column: String,
    pub rating_column: String,
    /// Drop interactions with rating 0 (reviews without stars) before joining.
    pub skip_unrated: bool,
    pub match_mode: MatchMode,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            data_dir: "datasets-raw".to_string(),
            catalog_file: "ingr_map.csv".to_string(),
            catalog_name_column: "replaced".to_string(),
            catalog_id_column: "id".to_string(),
            recipes_prefix: "PP_recipes".to_string(),
            interactions_prefix: "RAW_interactions".to_string(),
            recipe_files: Vec::new(),
            interaction_files: Vec::new(),
            recipe_id_column: "i".to_string(),
            ingredients_column: "ingredient_ids".to_string(),
            interaction_id_column: "recipe_id".to_string(),
            rating_column: "rating".to_string(),
            skip_unrated: false,
            match_mode: MatchMode::Substring,
        }
    }
}

impl DatasetSettings {
    pub fn data_dir(&self) -> PathBuf { expand_path(&self.data_dir) }

    pub fn catalog_path(&self) -> PathBuf { resolve_with_base(&self.data_dir(), &self.catalog_file) }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    pub output: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PlotSettings {
    fn default() -> Self { Self { output: "plot.png".to_string(), width: 800, height: 600 } }
}

impl PlotSettings {
    pub fn output_path(&self) -> PathBuf { expand_path(&self.output) }
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
