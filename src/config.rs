use crate::models::NOT_SPECIFIED;
use crate::slots::{SlotDefaults, DEFAULT_COMMENTS};
use crate::status::StatusClassifier;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TEACHING_COMMENTS: &str = "Weekly teaching hours";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub slots: SlotsConfig,
    #[serde(default)]
    pub status: StatusConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotsConfig {
    pub default_location: String,
    pub default_office_comments: String,
    pub default_teaching_comments: String,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self {
            default_location: NOT_SPECIFIED.to_string(),
            default_office_comments: DEFAULT_COMMENTS.to_string(),
            default_teaching_comments: DEFAULT_TEACHING_COMMENTS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Additional phrases that mark a field as "no real answer"
    #[serde(default)]
    pub extra_non_answers: Vec<String>,
}

impl SlotsConfig {
    pub fn office_defaults(&self) -> SlotDefaults {
        SlotDefaults {
            location: self.default_location.clone(),
            comments: self.default_office_comments.clone(),
        }
    }

    pub fn teaching_defaults(&self) -> SlotDefaults {
        SlotDefaults {
            location: self.default_location.clone(),
            comments: self.default_teaching_comments.clone(),
        }
    }
}

impl StatusConfig {
    pub fn classifier(&self) -> StatusClassifier {
        StatusClassifier::new(&self.extra_non_answers)
    }
}

impl Config {
    /// Load from the platform config directory, writing defaults on first use
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        // If config doesn't exist, create default
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(config_path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content).context("Failed to write config file")?;

        Ok(())
    }
}

fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "hours-normalizer", "hours-normalizer")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}
