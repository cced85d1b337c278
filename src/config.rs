use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const PROJECT_DIR: &str = ".bidash";
pub const CONFIG_FILE: &str = "config.yaml";

/// Project settings read from `.bidash/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BidashConfig {
    /// Store database, relative to `.bidash/`.
    pub store_file: String,
    /// Filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
    /// BI count above which `check` warns.
    pub item_warning_threshold: usize,
}

impl Default for BidashConfig {
    fn default() -> Self {
        Self {
            store_file: "store.db".to_string(),
            log_level: "warn".to_string(),
            item_warning_threshold: 2000,
        }
    }
}

impl BidashConfig {
    /// Read the config of the project at `root`. A missing file gives the
    /// defaults; a malformed one is an error.
    pub fn load(root: &Path) -> Result<Self> {
        let path = config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&raw)?)
    }

    /// Write this config into the project at `root`.
    pub fn write(&self, root: &Path) -> Result<()> {
        fs::write(config_path(root), serde_yaml::to_string(self)?)?;
        Ok(())
    }

    pub fn store_path(&self, root: &Path) -> PathBuf {
        root.join(PROJECT_DIR).join(&self.store_file)
    }
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(PROJECT_DIR).join(CONFIG_FILE)
}
