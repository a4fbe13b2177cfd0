//! Preset catalog contract
//!
//! The host application owns every brush preset. Existence in its catalog is
//! the only validity test for a stored preset name, and results are never
//! cached: the user can rename or delete presets outside the plugin at any
//! time.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// A brush preset resource as handed out by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    /// Preset name (unique within the catalog)
    pub name: String,
    /// Encoded thumbnail image, if the host provides one
    pub thumbnail: Option<Arc<[u8]>>,
}

impl Preset {
    /// Create a preset without a thumbnail
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            thumbnail: None,
        }
    }

    /// Attach an encoded thumbnail
    pub fn with_thumbnail(mut self, thumbnail: impl Into<Arc<[u8]>>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }
}

/// Authoritative preset lookup provided by the host
pub trait PresetCatalog {
    /// Look up a preset by name
    fn lookup(&self, name: &str) -> Option<Preset>;

    /// Check whether a preset name currently exists
    fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

impl PresetCatalog for HashMap<String, Preset> {
    fn lookup(&self, name: &str) -> Option<Preset> {
        self.get(name).cloned()
    }

    fn contains(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl PresetCatalog for BTreeMap<String, Preset> {
    fn lookup(&self, name: &str) -> Option<Preset> {
        self.get(name).cloned()
    }

    fn contains(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl<C: PresetCatalog + ?Sized> PresetCatalog for &C {
    fn lookup(&self, name: &str) -> Option<Preset> {
        (**self).lookup(name)
    }

    fn contains(&self, name: &str) -> bool {
        (**self).contains(name)
    }
}

/// Build a catalog from a list of names (thumbnails omitted)
pub fn catalog_from_names<I, S>(names: I) -> HashMap<String, Preset>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(|name| {
            let preset = Preset::new(name);
            (preset.name.clone(), preset)
        })
        .collect()
}
