//! Sync Policy store
//!
//! When cycling inside a slot, six brush parameters can be carried forward
//! from the preset being left to the preset being activated. Each kit holds
//! one tri-state mode per (parameter, slot) pair:
//!
//! - `Always`: always copy the previous value forward
//! - `SameGroupOnly`: copy only when the switch stays inside one group
//! - `Never`: keep the new preset's own value
//!
//! # Wire format
//!
//! Only non-default entries are persisted. Each is packed into an id
//! `(slot + 1) * 7 + param` and a state code (`0` = never, `1` = same group).

use crate::kit::SLOT_COUNT;
use serde::Serialize;
use std::collections::HashMap;

/// Number of synchronised brush parameters
pub const PARAM_COUNT: usize = 6;

/// Multiplier used to pack (slot, param) into a single id
pub const ID_STRIDE: usize = 7;

/// How a parameter propagates across a preset switch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Leave the newly activated preset's own value
    Never,
    /// Copy forward only when staying in the same group
    SameGroupOnly,
    /// Always copy forward
    #[default]
    Always,
}

impl SyncMode {
    /// Whether the captured value should be carried forward
    pub fn applies(self, same_group: bool) -> bool {
        match self {
            Self::Never => false,
            Self::SameGroupOnly => same_group,
            Self::Always => true,
        }
    }

    /// Persisted state code
    pub fn code(self) -> u8 {
        match self {
            Self::Never => 0,
            Self::SameGroupOnly => 1,
            Self::Always => 2,
        }
    }

    /// Parse a persisted state code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Never),
            1 => Some(Self::SameGroupOnly),
            2 => Some(Self::Always),
            _ => None,
        }
    }
}

/// A brush parameter covered by the sync policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncParam {
    Size,
    Opacity,
    Flow,
    Erase,
    Rotation,
    Blending,
}

impl SyncParam {
    /// All parameters in persisted order
    pub const ALL: [SyncParam; PARAM_COUNT] = [
        Self::Size,
        Self::Opacity,
        Self::Flow,
        Self::Erase,
        Self::Rotation,
        Self::Blending,
    ];

    /// Index in persisted order
    pub fn index(self) -> usize {
        match self {
            Self::Size => 0,
            Self::Opacity => 1,
            Self::Flow => 2,
            Self::Erase => 3,
            Self::Rotation => 4,
            Self::Blending => 5,
        }
    }

    /// Parameter at a persisted index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Pack a (slot, param) pair into a persisted id
pub fn encode_id(slot: usize, param: SyncParam) -> usize {
    (slot + 1) * ID_STRIDE + param.index()
}

/// Unpack a persisted id; `None` for ids outside the ten slots
pub fn decode_id(id: usize) -> Option<(usize, SyncParam)> {
    let slot = (id / ID_STRIDE).checked_sub(1)?;
    if slot >= SLOT_COUNT {
        return None;
    }
    let param = SyncParam::from_index(id % ID_STRIDE)?;
    Some((slot, param))
}

/// Sync policy of one kit: six parallel arrays of ten modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitSync {
    modes: [[SyncMode; SLOT_COUNT]; PARAM_COUNT],
}

impl Default for KitSync {
    fn default() -> Self {
        Self {
            modes: [[SyncMode::Always; SLOT_COUNT]; PARAM_COUNT],
        }
    }
}

impl KitSync {
    /// Mode for a slot/parameter; out-of-range slots read as `Always`
    pub fn mode(&self, slot: usize, param: SyncParam) -> SyncMode {
        self.modes[param.index()]
            .get(slot)
            .copied()
            .unwrap_or_default()
    }

    /// Set the mode for a slot/parameter; out-of-range slots are ignored
    pub fn set_mode(&mut self, slot: usize, param: SyncParam, mode: SyncMode) {
        if let Some(entry) = self.modes[param.index()].get_mut(slot) {
            *entry = mode;
        }
    }

    /// Entries that differ from `Always`, ordered by id
    pub fn overrides(&self) -> Vec<(usize, SyncMode)> {
        let mut entries: Vec<(usize, SyncMode)> = (0..SLOT_COUNT)
            .flat_map(|slot| SyncParam::ALL.into_iter().map(move |param| (slot, param)))
            .filter_map(|(slot, param)| {
                let mode = self.mode(slot, param);
                (mode != SyncMode::Always).then(|| (encode_id(slot, param), mode))
            })
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }

    /// Encode as comma-joined (ids, states)
    pub fn encode(&self) -> (String, String) {
        let overrides = self.overrides();
        let ids = overrides
            .iter()
            .map(|(id, _)| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let states = overrides
            .iter()
            .map(|(_, mode)| mode.code().to_string())
            .collect::<Vec<_>>()
            .join(",");
        (ids, states)
    }

    /// Decode comma-joined (ids, states); bad entries are skipped
    pub fn decode(ids: &str, states: &str) -> Self {
        let mut sync = Self::default();
        let ids = ids.split(',').filter(|s| !s.is_empty());
        let states = states.split(',').filter(|s| !s.is_empty());

        for (id, state) in ids.zip(states) {
            let entry = id
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(decode_id)
                .zip(state.trim().parse::<u8>().ok().and_then(SyncMode::from_code));

            match entry {
                Some(((slot, param), mode)) => sync.set_mode(slot, param, mode),
                None => log::warn!("KitSync::decode: Skipping entry {}={}", id, state),
            }
        }
        sync
    }
}

/// Per-kit sync policies keyed by kit name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStore {
    kits: HashMap<String, KitSync>,
}

impl SyncStore {
    /// Create an empty store (every kit reads as all-`Always`)
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy of a kit, if one was recorded
    pub fn get(&self, kit: &str) -> Option<&KitSync> {
        self.kits.get(kit)
    }

    /// Mode for a kit/slot/parameter; unknown kits read as `Always`
    pub fn mode(&self, kit: &str, slot: usize, param: SyncParam) -> SyncMode {
        self.kits
            .get(kit)
            .map(|sync| sync.mode(slot, param))
            .unwrap_or_default()
    }

    /// Set a mode, creating the kit's policy if needed
    pub fn set_mode(&mut self, kit: &str, slot: usize, param: SyncParam, mode: SyncMode) {
        self.kits
            .entry(kit.to_string())
            .or_default()
            .set_mode(slot, param, mode);
    }

    /// Store a decoded policy for a kit
    pub fn insert(&mut self, kit: &str, sync: KitSync) {
        self.kits.insert(kit.to_string(), sync);
    }

    /// Initialise a kit with every mode `Always`
    pub fn new_kit(&mut self, kit: &str) {
        self.kits.insert(kit.to_string(), KitSync::default());
    }

    /// Move a kit's policy to a new name
    pub fn rename(&mut self, prev_name: &str, new_name: &str) {
        if let Some(sync) = self.kits.remove(prev_name) {
            self.kits.insert(new_name.to_string(), sync);
        }
    }

    /// Drop a kit's policy
    pub fn remove(&mut self, kit: &str) {
        self.kits.remove(kit);
    }

    /// Names with a recorded policy
    pub fn kit_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.kits.keys().map(String::as_str)
    }
}
