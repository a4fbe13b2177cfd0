//! Kit Store
//!
//! A kit is a named collection of exactly ten slots. Each slot is an ordered
//! list of groups and each group an ordered list of preset names. Kits are
//! kept in insertion order because kit cycling walks that order.
//!
//! ```text
//! KitStore ─┬─ "Sketch" ─► [slot 1] [[Round, Flat], [Ink]]
//!           │              [slot 2] [[Airbrush]]
//!           │              ...
//!           └─ "Paint"  ─► ...
//! ```

use crate::error::LibraryError;

/// Number of hotkey-addressable slots per kit
pub const SLOT_COUNT: usize = 10;

/// Hotkey digit for each slot, in slot order
pub const SLOT_KEYS: [char; SLOT_COUNT] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0'];

/// Characters the settings format uses as delimiters
pub const RESERVED_CHARS: [char; 2] = [',', ';'];

/// Ordered preset names within a slot
pub type Group = Vec<String>;

/// Ordered groups of a slot
pub type Slot = Vec<Group>;

/// Where a preset sits inside a kit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetLocation {
    /// Slot index (0-9)
    pub slot: usize,
    /// Group index within the slot
    pub group: usize,
    /// Position within the group
    pub position: usize,
}

/// Reject names the comma/semicolon settings format cannot carry
pub fn validate_preset_name(name: &str) -> Result<(), LibraryError> {
    match name.chars().find(|c| RESERVED_CHARS.contains(c)) {
        Some(reserved) => Err(LibraryError::InvalidPresetName {
            name: name.to_string(),
            reserved,
        }),
        None => Ok(()),
    }
}

/// Reject kit names the comma/semicolon settings format cannot carry
pub fn validate_kit_name(name: &str) -> Result<(), LibraryError> {
    match name.chars().find(|c| RESERVED_CHARS.contains(c)) {
        Some(reserved) => Err(LibraryError::InvalidKitName {
            name: name.to_string(),
            reserved,
        }),
        None => Ok(()),
    }
}

/// A collection of exactly ten slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Kit {
    slots: [Slot; SLOT_COUNT],
}

impl Kit {
    /// Create a kit with ten empty slots
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a kit from exactly ten slots
    ///
    /// Empty groups are dropped; the slot count itself is not adjusted.
    pub fn from_slots(slots: Vec<Slot>) -> Result<Self, LibraryError> {
        let actual = slots.len();
        let slots: [Slot; SLOT_COUNT] = slots
            .try_into()
            .map_err(|_| LibraryError::SlotCount {
                expected: SLOT_COUNT,
                actual,
            })?;

        let mut kit = Self { slots };
        kit.drop_empty_groups();
        Ok(kit)
    }

    /// All ten slots in order
    pub fn slots(&self) -> &[Slot; SLOT_COUNT] {
        &self.slots
    }

    /// Get a slot by index
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Mutable access to a slot by index
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    /// True if no slot holds any preset
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_empty())
    }

    /// First preset of the first group of a slot
    pub fn first_preset(&self, slot: usize) -> Option<&str> {
        self.slot(slot)?
            .first()
            .and_then(|group| group.first())
            .map(String::as_str)
    }

    /// Find a preset anywhere in the kit
    pub fn locate(&self, name: &str) -> Option<PresetLocation> {
        self.slots.iter().enumerate().find_map(|(slot, groups)| {
            locate_in_groups(groups, name, None).map(|(group, position)| PresetLocation {
                slot,
                group,
                position,
            })
        })
    }

    /// Find a preset within one slot
    ///
    /// `preferred_group` is searched first so a stale group hint still
    /// resolves to the nearest match.
    pub fn locate_in_slot(
        &self,
        slot: usize,
        name: &str,
        preferred_group: Option<usize>,
    ) -> Option<(usize, usize)> {
        locate_in_groups(self.slot(slot)?, name, preferred_group)
    }

    /// Check names and global uniqueness
    ///
    /// A preset may appear in at most one slot/group across the whole kit.
    pub fn validate(&self) -> Result<(), LibraryError> {
        let mut seen = std::collections::HashSet::new();
        for (slot, groups) in self.slots.iter().enumerate() {
            for name in groups.iter().flatten() {
                validate_preset_name(name)?;
                if !seen.insert(name.as_str()) {
                    return Err(LibraryError::DuplicatePreset {
                        name: name.clone(),
                        slot,
                    });
                }
            }
        }
        Ok(())
    }

    /// Remove groups that hold no presets
    pub fn drop_empty_groups(&mut self) {
        for slot in &mut self.slots {
            slot.retain(|group| !group.is_empty());
        }
    }

    /// Keep only presets accepted by `keep`, then drop emptied groups
    pub fn retain_presets(&mut self, mut keep: impl FnMut(&str) -> bool) {
        for slot in &mut self.slots {
            for group in slot.iter_mut() {
                group.retain(|name| keep(name));
            }
        }
        self.drop_empty_groups();
    }
}

fn locate_in_groups(
    groups: &[Group],
    name: &str,
    preferred_group: Option<usize>,
) -> Option<(usize, usize)> {
    if let Some(group) = preferred_group {
        if let Some(position) = groups
            .get(group)
            .and_then(|presets| presets.iter().position(|n| n == name))
        {
            return Some((group, position));
        }
    }

    groups.iter().enumerate().find_map(|(group, presets)| {
        presets
            .iter()
            .position(|n| n == name)
            .map(|position| (group, position))
    })
}

/// Ordered mapping from kit name to kit
///
/// Never empty: removing the last kit leaves one empty kit named `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitStore {
    entries: Vec<(String, Kit)>,
}

impl Default for KitStore {
    fn default() -> Self {
        Self {
            entries: vec![(String::new(), Kit::new())],
        }
    }
}

impl KitStore {
    /// Create a store holding one empty kit named `""`
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from ordered entries
    ///
    /// Later duplicates of a name are dropped. An empty list yields the
    /// default single empty kit.
    pub fn from_entries(entries: Vec<(String, Kit)>) -> Self {
        let mut store = Self {
            entries: Vec::with_capacity(entries.len()),
        };
        for (name, kit) in entries {
            if store.contains(&name) {
                log::warn!("KitStore::from_entries: Duplicate kit '{}' dropped", name);
                continue;
            }
            store.entries.push((name, kit));
        }
        store.ensure_not_empty();
        store
    }

    /// Number of kits
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kit names in store order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Kits in store order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Kit)> + '_ {
        self.entries.iter().map(|(name, kit)| (name.as_str(), kit))
    }

    /// Name of the first kit
    pub fn first_name(&self) -> &str {
        self.entries
            .first()
            .map(|(name, _)| name.as_str())
            .unwrap_or_default()
    }

    /// Index of a kit in store order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    /// Kit name at an index
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(name, _)| name.as_str())
    }

    /// Check whether a kit exists
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Get a kit by name
    pub fn get(&self, name: &str) -> Option<&Kit> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, kit)| kit)
    }

    /// Get a mutable kit by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Kit> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, kit)| kit)
    }

    /// Replace a kit's data, or append it if the name is new
    pub fn insert(&mut self, name: &str, kit: Kit) {
        match self.get_mut(name) {
            Some(existing) => *existing = kit,
            None => self.entries.push((name.to_string(), kit)),
        }
    }

    /// Rename a kit in place, keeping its position
    pub fn rename(&mut self, prev_name: &str, new_name: &str) -> Result<(), LibraryError> {
        if prev_name == new_name {
            return Ok(());
        }
        if self.contains(new_name) {
            return Err(LibraryError::KitExists(new_name.to_string()));
        }
        let entry = self
            .entries
            .iter_mut()
            .find(|(n, _)| n == prev_name)
            .ok_or_else(|| LibraryError::UnknownKit(prev_name.to_string()))?;
        entry.0 = new_name.to_string();
        Ok(())
    }

    /// Reorder kits to match `order`, which must name every kit exactly once
    pub fn reorder<S: AsRef<str>>(&mut self, order: &[S]) -> Result<(), LibraryError> {
        let mut seen = std::collections::HashSet::new();
        let complete = order.len() == self.entries.len()
            && order
                .iter()
                .all(|name| self.contains(name.as_ref()) && seen.insert(name.as_ref()));
        if !complete {
            return Err(LibraryError::KitOrderMismatch);
        }

        let mut remaining = std::mem::take(&mut self.entries);
        for name in order {
            if let Some(index) = remaining.iter().position(|(n, _)| n == name.as_ref()) {
                self.entries.push(remaining.swap_remove(index));
            }
        }
        Ok(())
    }

    /// Remove a kit; returns true if it existed
    ///
    /// Removing the last kit reinserts one empty kit named `""`.
    pub fn remove(&mut self, name: &str) -> bool {
        let removed = match self.position(name) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        };
        self.ensure_not_empty();
        removed
    }

    /// Reinsert the empty kit if the store ran dry; returns true if it did
    pub fn ensure_not_empty(&mut self) -> bool {
        if self.entries.is_empty() {
            self.entries.push((String::new(), Kit::new()));
            return true;
        }
        false
    }

    /// Derive a name not yet used by any kit
    ///
    /// Appends `(Copy)` until the name is free.
    pub fn unique_name(&self, base: &str) -> String {
        let mut name = base.to_string();
        while self.contains(&name) {
            name.push_str("(Copy)");
        }
        name
    }

    /// Swap a kit with its neighbour; returns false at the ends
    pub fn move_by(&mut self, name: &str, step: isize) -> bool {
        let Some(index) = self.position(name) else {
            return false;
        };
        let Some(target) = index.checked_add_signed(step) else {
            return false;
        };
        if target >= self.entries.len() || step == 0 {
            return false;
        }
        let entry = self.entries.remove(index);
        self.entries.insert(target, entry);
        true
    }
}
