//! Ambient configuration: default platform tags and resolution strategy,
//! loaded/saved as YAML the way the teacher's `Config` does.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_platform_tags() -> Vec<String> {
    vec!["unix".to_string(), "linux".to_string()]
}

fn default_checksum_algorithm() -> String {
    "blake3".to_string()
}

/// Binary-vs-source manifest ordering preference (see §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionStrategy {
    #[default]
    PreferBinary,
    PreferSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_platform_tags")]
    pub platform_tags: Vec<String>,

    #[serde(default)]
    pub resolution_strategy: ResolutionStrategy,

    #[serde(default = "default_checksum_algorithm")]
    pub checksum_algorithm: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            platform_tags: default_platform_tags(),
            resolution_strategy: ResolutionStrategy::default(),
            checksum_algorithm: default_checksum_algorithm(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// `~/.config/crucible/config.yaml`, mirroring the teacher's `config_file()`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crucible")
        .join("config.yaml")
}
