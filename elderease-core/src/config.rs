//! Global ElderEase configuration.

use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::error::{ElderEaseError, ElderEaseResult};
use crate::slot::{DEFAULT_STORAGE_KEY, FileSlot};

static DEFAULT_DATA_DIR: &str = "~/.local/share/elderease";
static DEFAULT_CREATED_BY: &str = "current-user";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_created_by() -> String {
    DEFAULT_CREATED_BY.to_string()
}

/// Configuration at ~/.config/elderease/config.toml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ElderEaseConfig {
    /// Where the event slot lives
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Name of the slot holding the event list
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Recorded as the creator of new events
    #[serde(default = "default_created_by")]
    pub created_by: String,

    /// Extra attempts after a failed save
    #[serde(default)]
    pub save_retries: u32,
}

impl Default for ElderEaseConfig {
    fn default() -> Self {
        ElderEaseConfig {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
            created_by: default_created_by(),
            save_retries: 0,
        }
    }
}

impl ElderEaseConfig {
    pub fn config_path() -> ElderEaseResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ElderEaseError::Config("Could not determine config directory".into()))?
            .join("elderease");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented default file first if
    /// there isn't one yet.
    pub fn load() -> ElderEaseResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> ElderEaseResult<Self> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .build()
            .map_err(|e| ElderEaseError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ElderEaseError::Config(e.to_string()))
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn slot(&self) -> FileSlot {
        FileSlot::new(&self.data_path(), &self.storage_key)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ElderEaseResult<()> {
        let contents = format!(
            "\
# ElderEase configuration

# Where your events are stored:
# data_dir = \"{}\"

# Name of the event list inside data_dir:
# storage_key = \"{}\"

# Creator recorded on new events:
# created_by = \"{}\"

# Extra attempts when saving fails:
# save_retries = 0
",
            DEFAULT_DATA_DIR, DEFAULT_STORAGE_KEY, DEFAULT_CREATED_BY
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ElderEaseError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ElderEaseError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commented_default_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("elderease/config.toml");

        ElderEaseConfig::create_default_config(&path).unwrap();
        let config = ElderEaseConfig::load_from(&path).unwrap();

        assert_eq!(config, ElderEaseConfig::default());
        assert_eq!(config.storage_key, "elderEvents");
        assert_eq!(config.created_by, "current-user");
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ElderEaseConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ElderEaseConfig::default());
    }

    #[test]
    fn overrides_and_slot_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let data_dir = dir.path().join("data");
        std::fs::write(
            &path,
            format!(
                "data_dir = \"{}\"\nstorage_key = \"clubEvents\"\nsave_retries = 2\n",
                data_dir.display()
            ),
        )
        .unwrap();

        let config = ElderEaseConfig::load_from(&path).unwrap();

        assert_eq!(config.save_retries, 2);
        assert_eq!(config.created_by, "current-user");
        assert_eq!(config.slot().path(), data_dir.join("clubEvents.json"));
    }

    #[test]
    fn tilde_is_expanded() {
        let config = ElderEaseConfig::default();
        assert!(!config.data_path().to_string_lossy().starts_with('~'));
    }
}
