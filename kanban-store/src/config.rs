//! Configuration using Figment
//!
//! Sources are merged in precedence order (later sources override earlier
//! ones):
//! 1. Default values (hardcoded)
//! 2. `kanban.toml`, `kanban.yaml`, `kanban.json` in the config directory
//! 3. Environment variables with the `KANBAN_` prefix (`__` for nesting,
//!    e.g. `KANBAN_DEFAULT_BOARD__TITLE`)

use crate::error::Result;
use crate::persist::DEFAULT_STORAGE_KEY;
use crate::types::{KanbanState, DEFAULT_COLUMN_TITLES};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "KANBAN_";

/// Base name of config files
const CONFIG_FILE_STEM: &str = "kanban";

/// Settings for the store and its persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanConfig {
    /// Directory holding persisted blobs
    pub storage_dir: PathBuf,
    /// Key the state is saved under
    pub storage_key: String,
    /// Board created when no saved state exists
    pub default_board: DefaultBoard,
}

/// The board seeded on first start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultBoard {
    pub title: String,
    pub columns: Vec<String>,
}

impl Default for DefaultBoard {
    fn default() -> Self {
        Self {
            title: "My Board".to_string(),
            columns: DEFAULT_COLUMN_TITLES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DefaultBoard {
    /// The state used when nothing has been saved yet
    pub fn initial_state(&self) -> KanbanState {
        KanbanState::seeded(&self.title, &self.columns)
    }
}

impl Default for KanbanConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".kanban"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_board: DefaultBoard::default(),
        }
    }
}

impl KanbanConfig {
    /// Load configuration, looking for config files in `dir`
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let config: Self = Self::figment(dir.as_ref()).extract()?;
        debug!(
            storage_dir = %config.storage_dir.display(),
            storage_key = %config.storage_key,
            "loaded kanban configuration"
        );
        Ok(config)
    }

    /// Build the figment with all sources in precedence order
    pub fn figment(dir: &Path) -> Figment {
        let stem = dir.join(CONFIG_FILE_STEM);
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(stem.with_extension("toml")))
            .merge(Yaml::file(stem.with_extension("yaml")))
            .merge(Json::file(stem.with_extension("json")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
