//! Configuration system for sweepkit.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment -> overrides.
//! Configuration is loaded from `~/.config/sweepkit/config.toml` and/or `.sweepkit/config.toml`
//! in the workspace directory.

use crate::columns::{ColumnInformation, DEFAULT_LABEL_COLUMN};
use crate::error::ConfigError;
use crate::extension::{TrainerContext, TrainerName, WeightColumnPolicy};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepkitConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub columns: ColumnDefaults,
}

/// Which trainers the catalog offers to a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Trainers to consider. Empty means all.
    #[serde(default)]
    pub allowlist: Vec<TrainerName>,
    /// Trainers never to consider, applied after the allowlist.
    #[serde(default)]
    pub denylist: Vec<TrainerName>,
}

impl CatalogConfig {
    pub fn permits(&self, name: TrainerName) -> bool {
        (self.allowlist.is_empty() || self.allowlist.contains(&name))
            && !self.denylist.contains(&name)
    }
}

/// Settings passed to extensions when they build estimators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Behavior when a weight column meets a trainer without weight support.
    #[serde(default)]
    pub weight_policy: WeightColumnPolicy,
}

impl ContextConfig {
    pub fn trainer_context(&self) -> TrainerContext {
        TrainerContext::new(self.weight_policy)
    }
}

/// Column names used when the caller does not name them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefaults {
    #[serde(default = "default_label_column")]
    pub label_column: String,
    #[serde(default)]
    pub example_weight_column: Option<String>,
}

impl Default for ColumnDefaults {
    fn default() -> Self {
        Self {
            label_column: default_label_column(),
            example_weight_column: None,
        }
    }
}

fn default_label_column() -> String {
    DEFAULT_LABEL_COLUMN.to_string()
}

impl ColumnDefaults {
    pub fn column_information(&self) -> ColumnInformation {
        ColumnInformation {
            label_column: self.label_column.clone(),
            example_weight_column: self.example_weight_column.clone(),
            ..ColumnInformation::default()
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "sweepkit", "sweepkit")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn workspace_config_path(workspace: &Path) -> PathBuf {
    workspace.join(".sweepkit").join("config.toml")
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `SWEEPKIT_`)
/// 3. Workspace-local config (`.sweepkit/config.toml`)
/// 4. User config (`~/.config/sweepkit/config.toml`)
/// 5. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    overrides: Option<&SweepkitConfig>,
) -> Result<SweepkitConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(SweepkitConfig::default()));

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(ws) = workspace {
        let ws_config = workspace_config_path(ws);
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    // SWEEPKIT_CONTEXT__WEIGHT_POLICY, SWEEPKIT_COLUMNS__LABEL_COLUMN, etc.
    figment = figment.merge(Env::prefixed("SWEEPKIT_").split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    let config: SweepkitConfig = figment.extract().map_err(Box::new)?;
    validate(&config)?;
    Ok(config)
}

/// Load a single explicit configuration file on top of the defaults.
pub fn load_config_file(path: &Path) -> Result<SweepkitConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let config: SweepkitConfig = Figment::from(Serialized::defaults(SweepkitConfig::default()))
        .merge(Toml::file(path))
        .extract()
        .map_err(Box::new)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &SweepkitConfig) -> Result<(), ConfigError> {
    if config.columns.label_column.trim().is_empty() {
        return Err(ConfigError::Invalid {
            message: "columns.label_column must not be empty".to_string(),
        });
    }
    if let Some(name) = config
        .catalog
        .allowlist
        .iter()
        .find(|name| config.catalog.denylist.contains(name))
    {
        tracing::warn!(trainer = %name, "Trainer is both allowed and denied; denylist wins");
    }
    Ok(())
}

/// Check whether any sweepkit configuration file exists (user-level or workspace-level).
pub fn config_exists(workspace: Option<&Path>) -> bool {
    if user_config_path().is_some_and(|p| p.exists()) {
        return true;
    }
    workspace.is_some_and(|ws| workspace_config_path(ws).exists())
}
