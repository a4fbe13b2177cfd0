//! kit-inspect - print the kits stored in a Ten Brush Slots settings file as YAML
//!
//! ## Usage
//!
//! ```text
//! kit-inspect [SETTINGS_FILE]
//! ```
//!
//! Without an argument, reads the default settings file. Set `RUST_LOG=debug`
//! for verbose output.

use anyhow::{bail, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use tenslots_core::settings::{default_settings_path, load_library, YamlSettings};
use tenslots_core::sync::decode_id;
use tenslots_core::{Options, Preset, PresetCatalog, Slot, SyncMode, SyncParam, SLOT_KEYS};

/// Accepts every name, so nothing is filtered while inspecting
struct AcceptAll;

impl PresetCatalog for AcceptAll {
    fn lookup(&self, name: &str) -> Option<Preset> {
        Some(Preset::new(name))
    }
}

#[derive(Serialize)]
struct Report<'a> {
    settings: String,
    options: &'a Options,
    kits: Vec<KitReport<'a>>,
}

#[derive(Serialize)]
struct KitReport<'a> {
    name: &'a str,
    /// Non-empty slots by hotkey
    slots: BTreeMap<char, &'a Slot>,
    /// Entries that are not `always`
    sync: Vec<SyncEntry>,
}

#[derive(Serialize)]
struct SyncEntry {
    slot: char,
    param: SyncParam,
    mode: SyncMode,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let path = std::env::args()
        .nth(1)
        .map(Into::into)
        .unwrap_or_else(default_settings_path);
    if !path.exists() {
        bail!("Settings file not found: {:?}", path);
    }

    let store = YamlSettings::open(&path);
    let library = load_library(&store, &AcceptAll);

    let kits = library
        .kits()
        .iter()
        .map(|(name, kit)| {
            let slots = kit
                .slots()
                .iter()
                .enumerate()
                .filter(|(_, slot)| !slot.is_empty())
                .map(|(index, slot)| (SLOT_KEYS[index], slot))
                .collect();
            let sync = library
                .sync()
                .get(name)
                .map(|sync| sync.overrides())
                .unwrap_or_default()
                .into_iter()
                .filter_map(|(id, mode)| {
                    let (slot, param) = decode_id(id)?;
                    Some(SyncEntry {
                        slot: *SLOT_KEYS.get(slot)?,
                        param,
                        mode,
                    })
                })
                .collect();
            KitReport { name, slots, sync }
        })
        .collect();

    let report = Report {
        settings: path.display().to_string(),
        options: library.options(),
        kits,
    };
    print!("{}", serde_yaml::to_string(&report)?);
    Ok(())
}
