//! Settings persistence
//!
//! The host exposes a flat key → string settings store. This module provides:
//!
//! - The [`SettingsStore`] trait the codec reads and writes through
//! - [`MemorySettings`], an in-memory store for embedding and tests
//! - [`YamlSettings`], a YAML file-backed store
//! - [`load_library`] / [`save_library`], the comma/semicolon wire codec
//!
//! # Usage
//!
//! ```ignore
//! use tenslots_core::settings::{load_library, save_library, YamlSettings, default_settings_path};
//!
//! let mut store = YamlSettings::open(&default_settings_path());
//! let mut library = load_library(&store, &catalog);
//! // ... edits ...
//! if library.is_dirty() {
//!     save_library(&mut store, &library)?;
//!     library.mark_saved();
//! }
//! ```

mod codec;
mod io;
mod paths;

pub use codec::{load_library, save_library, slot_key, KITS_KEY, OPTIONS_KEY, SYNC_IDS_KEY, SYNC_STATES_KEY};
pub use io::YamlSettings;
pub use paths::{default_settings_dir, default_settings_path};

use std::collections::BTreeMap;

/// Flat key → string settings store
pub trait SettingsStore {
    /// Read a value; `None` if the key was never written
    fn read(&self, key: &str) -> Option<String>;

    /// Write a value
    fn write(&mut self, key: &str, value: &str);

    /// Persist pending writes
    fn flush(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// In-memory settings store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySettings {
    values: BTreeMap<String, String>,
}

impl MemorySettings {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored entries
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

impl SettingsStore for MemorySettings {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for Box<S> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) {
        (**self).write(key, value)
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        (**self).flush()
    }
}
