//! Settings wire codec
//!
//! Layout of the flat settings store:
//!
//! ```text
//! kits         = Sketch,Paint                 (kit names, store order)
//! 0slot1       = Round,Flat;Ink               (groups ';', presets ',')
//! 0slot2       = Airbrush
//! ...
//! 1slot0       =
//! options      = True,False,True,True,True,False
//! sync_ids     = 10,29;                       (one section per kit)
//! sync_states  = 0,1;
//! ```
//!
//! Presets that no longer exist in the catalog are dropped while loading,
//! which also drops groups left empty.

use super::SettingsStore;
use crate::catalog::PresetCatalog;
use crate::kit::{Group, Kit, KitStore, Slot, SLOT_COUNT, SLOT_KEYS};
use crate::library::Library;
use crate::options::Options;
use crate::sync::{KitSync, SyncStore};
use anyhow::{Context, Result};

/// Key holding the comma-joined kit names
pub const KITS_KEY: &str = "kits";

/// Key holding the options string
pub const OPTIONS_KEY: &str = "options";

/// Key holding per-kit sync ids
pub const SYNC_IDS_KEY: &str = "sync_ids";

/// Key holding per-kit sync states
pub const SYNC_STATES_KEY: &str = "sync_states";

/// Settings key for one slot of one kit
pub fn slot_key(kit_index: usize, slot: usize) -> String {
    let digit = SLOT_KEYS.get(slot).copied().unwrap_or('?');
    format!("{}slot{}", kit_index, digit)
}

fn decode_slot(value: &str, catalog: &impl PresetCatalog) -> Slot {
    value
        .split(';')
        .map(|group| {
            group
                .split(',')
                .filter(|name| !name.is_empty() && catalog.contains(name))
                .map(str::to_string)
                .collect::<Group>()
        })
        .filter(|group| !group.is_empty())
        .collect()
}

fn encode_slot(slot: &Slot) -> String {
    slot.iter()
        .map(|group| group.join(","))
        .collect::<Vec<_>>()
        .join(";")
}

/// Read the whole library from a settings store
///
/// Missing keys fall back to defaults: one empty kit named `""`, default
/// options, and `Always` for every sync entry.
pub fn load_library(store: &impl SettingsStore, catalog: &impl PresetCatalog) -> Library {
    let kits_value = store.read(KITS_KEY).unwrap_or_default();
    let names: Vec<&str> = kits_value.split(',').collect();
    log::info!("load_library: Loading {} kit(s)", names.len());

    let sync_ids = store.read(SYNC_IDS_KEY).unwrap_or_default();
    let sync_states = store.read(SYNC_STATES_KEY).unwrap_or_default();
    let mut id_sections = sync_ids.split(';');
    let mut state_sections = sync_states.split(';');

    let mut entries = Vec::with_capacity(names.len());
    let mut sync = SyncStore::new();
    for (index, name) in names.iter().enumerate() {
        let mut kit = Kit::new();
        for slot in 0..SLOT_COUNT {
            if let (Some(target), Some(value)) = (kit.slot_mut(slot), store.read(&slot_key(index, slot))) {
                *target = decode_slot(&value, catalog);
            }
        }

        let ids = id_sections.next().unwrap_or_default();
        let states = state_sections.next().unwrap_or_default();
        if sync.get(name).is_none() {
            sync.insert(name, KitSync::decode(ids, states));
        }
        entries.push((name.to_string(), kit));
    }

    let options = match store.read(OPTIONS_KEY) {
        Some(value) => Options::from_settings_string(&value).unwrap_or_else(|| {
            log::warn!("load_library: Ignoring malformed options '{}', using defaults", value);
            Options::default()
        }),
        None => Options::default(),
    };

    Library::new(KitStore::from_entries(entries), sync, options)
}

/// Write the whole library to a settings store and flush it
pub fn save_library(store: &mut impl SettingsStore, library: &Library) -> Result<()> {
    let kits = library.kits();
    let names: Vec<&str> = kits.names().collect();
    log::info!("save_library: Saving {} kit(s)", names.len());
    store.write(KITS_KEY, &names.join(","));

    let mut id_sections = Vec::with_capacity(names.len());
    let mut state_sections = Vec::with_capacity(names.len());
    for (index, (name, kit)) in kits.iter().enumerate() {
        for (slot, groups) in kit.slots().iter().enumerate() {
            store.write(&slot_key(index, slot), &encode_slot(groups));
        }

        let (ids, states) = library
            .sync()
            .get(name)
            .map(KitSync::encode)
            .unwrap_or_default();
        id_sections.push(ids);
        state_sections.push(states);
    }

    store.write(OPTIONS_KEY, &library.options().to_settings_string());
    store.write(SYNC_IDS_KEY, &id_sections.join(";"));
    store.write(SYNC_STATES_KEY, &state_sections.join(";"));

    store.flush().context("Failed to flush settings store")
}
