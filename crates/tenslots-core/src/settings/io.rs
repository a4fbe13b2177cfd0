//! YAML file-backed settings store
//!
//! Keeps every key in memory and writes the whole map back on flush.

use super::SettingsStore;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Settings store persisted as a flat YAML mapping
#[derive(Debug, Clone)]
pub struct YamlSettings {
    path: PathBuf,
    values: BTreeMap<String, String>,
    dirty: bool,
}

impl YamlSettings {
    /// Open a settings file
    ///
    /// If the file doesn't exist, starts empty.
    /// If the file exists but is invalid, logs a warning and starts empty.
    pub fn open(path: &Path) -> Self {
        log::info!("YamlSettings::open: Loading from {:?}", path);

        let values = if !path.exists() {
            log::info!("YamlSettings::open: File doesn't exist, starting empty");
            BTreeMap::new()
        } else {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_yaml::from_str::<BTreeMap<String, String>>(&contents) {
                    Ok(values) => values,
                    Err(e) => {
                        log::warn!("YamlSettings::open: Failed to parse settings: {}, starting empty", e);
                        BTreeMap::new()
                    }
                },
                Err(e) => {
                    log::warn!("YamlSettings::open: Failed to read settings file: {}, starting empty", e);
                    BTreeMap::new()
                }
            }
        };

        Self {
            path: path.to_path_buf(),
            values,
            dirty: false,
        }
    }

    /// File this store persists to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save to the YAML file
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self) -> Result<()> {
        log::info!("YamlSettings::save: Saving to {:?}", self.path);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory: {:?}", parent))?;
        }

        let yaml = serde_yaml::to_string(&self.values).context("Failed to serialize settings to YAML")?;

        std::fs::write(&self.path, yaml)
            .with_context(|| format!("Failed to write settings file: {:?}", self.path))?;

        log::info!("YamlSettings::save: Settings saved successfully");
        Ok(())
    }
}

impl SettingsStore for YamlSettings {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        if self.values.get(key).map(String::as_str) != Some(value) {
            self.values.insert(key.to_string(), value.to_string());
            self.dirty = true;
        }
    }

    fn flush(&mut self) -> Result<()> {
        if self.dirty {
            self.save()?;
            self.dirty = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_nonexistent_is_empty() {
        let store = YamlSettings::open(Path::new("/nonexistent/path/settings.yaml"));
        assert_eq!(store.read("kits"), None);
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.yaml");

        let mut store = YamlSettings::open(&path);
        store.write("kits", "Sketch,Paint");
        store.write("0slot1", "Round,Flat;Ink");
        store.flush().unwrap();

        let loaded = YamlSettings::open(&path);
        assert_eq!(loaded.read("kits").as_deref(), Some("Sketch,Paint"));
        assert_eq!(loaded.read("0slot1").as_deref(), Some("Round,Flat;Ink"));
    }

    #[test]
    fn test_invalid_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "- not\n- a\n- mapping\n").unwrap();

        let store = YamlSettings::open(&path);
        assert_eq!(store.read("kits"), None);
    }
}
