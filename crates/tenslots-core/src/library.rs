//! Kit library aggregate
//!
//! Owns the Kit Store, the Sync Policy store and the options, and keeps them
//! consistent: every kit mutation moves the matching sync entry in the same
//! call, so no policy is ever left behind under a stale name.
//!
//! Mutations record which kits were edited and raise a dirty flag. The host
//! persistence layer checks [`Library::is_dirty`] when the editor closes and
//! calls [`Library::mark_saved`] after writing.

use crate::error::LibraryError;
use crate::kit::{validate_kit_name, Kit, KitStore, Slot};
use crate::options::Options;
use crate::sync::{SyncMode, SyncParam, SyncStore};

/// Direction for moving a kit one step in store order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KitMove {
    Up,
    Down,
}

/// Kits, sync policies and options with edit tracking
#[derive(Debug, Clone, Default)]
pub struct Library {
    kits: KitStore,
    sync: SyncStore,
    options: Options,
    /// Kits whose slot data changed since the last save
    edited_kits: Vec<String>,
    /// Set by any mutation that is not a plain slot-data edit
    settings_dirty: bool,
}

impl Library {
    /// Assemble a library from loaded parts (starts clean)
    pub fn new(kits: KitStore, sync: SyncStore, options: Options) -> Self {
        Self {
            kits,
            sync,
            options,
            edited_kits: Vec::new(),
            settings_dirty: false,
        }
    }

    /// The Kit Store
    pub fn kits(&self) -> &KitStore {
        &self.kits
    }

    /// The Sync Policy store
    pub fn sync(&self) -> &SyncStore {
        &self.sync
    }

    /// Behaviour switches
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get a kit by name
    pub fn kit(&self, name: &str) -> Option<&Kit> {
        self.kits.get(name)
    }

    /// Sync mode for a kit/slot/parameter
    pub fn sync_mode(&self, kit: &str, slot: usize, param: SyncParam) -> SyncMode {
        self.sync.mode(kit, slot, param)
    }

    /// Replace the options; marks dirty only if something changed
    pub fn set_options(&mut self, options: Options) {
        if self.options != options {
            self.options = options;
            self.settings_dirty = true;
        }
    }

    /// Put kits in the given order
    pub fn reorder_kits<S: AsRef<str>>(&mut self, order: &[S]) -> Result<(), LibraryError> {
        if self.kits.names().eq(order.iter().map(|s| s.as_ref())) {
            return Ok(());
        }
        self.kits.reorder(order)?;
        self.settings_dirty = true;
        log::debug!("reorder_kits: Kits reordered");
        Ok(())
    }

    /// Rename a kit, moving its sync policy and edit record along
    pub fn update_name(&mut self, prev_name: &str, new_name: &str) -> Result<(), LibraryError> {
        if prev_name == new_name {
            return Ok(());
        }
        validate_kit_name(new_name)?;
        self.kits.rename(prev_name, new_name)?;
        self.sync.rename(prev_name, new_name);

        if let Some(index) = self.edited_kits.iter().position(|k| k == prev_name) {
            self.edited_kits.remove(index);
            self.edited_kits.push(new_name.to_string());
        }
        self.settings_dirty = true;
        log::debug!("update_name: '{}' -> '{}'", prev_name, new_name);
        Ok(())
    }

    /// Replace a kit's slot data (creating the kit if the name is new)
    ///
    /// Validation happens here, at edit time: exactly ten slots, no reserved
    /// characters, no preset assigned twice. Empty groups are dropped.
    pub fn update_kit(&mut self, name: &str, slots: Vec<Slot>) -> Result<(), LibraryError> {
        validate_kit_name(name)?;
        let kit = Kit::from_slots(slots)?;
        kit.validate()?;

        if self.kits.get(name) == Some(&kit) {
            return Ok(());
        }
        if !self.kits.contains(name) {
            self.sync.new_kit(name);
        }
        self.kits.insert(name, kit);
        self.mark_edited(name);
        log::debug!("update_kit: '{}' updated", name);
        Ok(())
    }

    /// Add an empty kit under a unique name derived from `base`
    pub fn new_kit(&mut self, base: &str) -> Result<String, LibraryError> {
        validate_kit_name(base)?;
        let name = self.kits.unique_name(base);
        self.kits.insert(&name, Kit::new());
        self.sync.new_kit(&name);
        self.mark_edited(&name);
        self.settings_dirty = true;
        log::debug!("new_kit: '{}' added", name);
        Ok(name)
    }

    /// Delete a kit and its sync policy
    ///
    /// Deleting the last kit leaves one empty kit named `""`. Returns true
    /// if the kit existed.
    pub fn remove_kit(&mut self, name: &str) -> bool {
        let was_last = self.kits.len() == 1 && self.kits.contains(name);
        let removed = self.kits.remove(name);

        if removed {
            self.sync.remove(name);
            self.edited_kits.retain(|k| k != name);
            self.settings_dirty = true;
            log::debug!("remove_kit: '{}' removed", name);
        }

        if was_last {
            self.sync.new_kit("");
            self.mark_edited("");
            log::debug!("remove_kit: Store emptied, empty kit reinserted");
        }
        removed
    }

    /// Move a kit one step up or down; returns false at the ends
    pub fn move_kit(&mut self, name: &str, direction: KitMove) -> bool {
        let step = match direction {
            KitMove::Up => -1,
            KitMove::Down => 1,
        };
        let moved = self.kits.move_by(name, step);
        if moved {
            self.settings_dirty = true;
        }
        moved
    }

    /// Edit one entry of a kit's sync policy
    pub fn set_sync_mode(
        &mut self,
        kit: &str,
        slot: usize,
        param: SyncParam,
        mode: SyncMode,
    ) -> Result<(), LibraryError> {
        if !self.kits.contains(kit) {
            return Err(LibraryError::UnknownKit(kit.to_string()));
        }
        if self.sync.mode(kit, slot, param) != mode {
            self.sync.set_mode(kit, slot, param, mode);
            self.settings_dirty = true;
        }
        Ok(())
    }

    /// Kits edited since the last save, in edit order
    pub fn edited_kits(&self) -> &[String] {
        &self.edited_kits
    }

    /// Whether a kit was edited since the last save
    pub fn is_edited(&self, name: &str) -> bool {
        self.edited_kits.iter().any(|k| k == name)
    }

    /// Whether anything needs writing back
    pub fn is_dirty(&self) -> bool {
        self.settings_dirty || !self.edited_kits.is_empty()
    }

    /// Clear the edit record after persisting
    pub fn mark_saved(&mut self) {
        self.settings_dirty = false;
        self.edited_kits.clear();
    }

    fn mark_edited(&mut self, name: &str) {
        if !self.is_edited(name) {
            self.edited_kits.push(name.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::{Group, SLOT_COUNT};

    fn slots_with(slot: usize, groups: &[&[&str]]) -> Vec<Slot> {
        let mut slots = vec![Slot::new(); SLOT_COUNT];
        slots[slot] = groups
            .iter()
            .map(|g| g.iter().map(|s| s.to_string()).collect::<Group>())
            .collect();
        slots
    }

    fn library_with(names: &[&str]) -> Library {
        let kits = KitStore::from_entries(
            names
                .iter()
                .map(|name| (name.to_string(), Kit::new()))
                .collect(),
        );
        let mut sync = SyncStore::new();
        for name in names {
            sync.new_kit(name);
        }
        Library::new(kits, sync, Options::default())
    }

    #[test]
    fn test_remove_every_kit_leaves_empty_kit() {
        let mut library = library_with(&["A", "B"]);
        assert!(library.remove_kit("A"));
        assert!(library.remove_kit("B"));

        assert_eq!(library.kits().len(), 1);
        assert_eq!(library.kits().first_name(), "");
        assert!(library.kit("").unwrap().is_empty());
        assert!(library.sync().get("").is_some());
        assert!(library.sync().get("A").is_none());
        assert!(library.sync().get("B").is_none());
        assert!(library.is_dirty());
    }

    #[test]
    fn test_rename_moves_sync_atomically() {
        let mut library = library_with(&["A", "B"]);
        library
            .set_sync_mode("A", 3, SyncParam::Opacity, SyncMode::SameGroupOnly)
            .unwrap();
        library
            .update_kit("A", slots_with(0, &[&["Round"]]))
            .unwrap();

        library.update_name("A", "Alpha").unwrap();

        assert!(library.kit("A").is_none());
        assert!(library.sync().get("A").is_none());
        assert_eq!(
            library.sync_mode("Alpha", 3, SyncParam::Opacity),
            SyncMode::SameGroupOnly
        );
        assert_eq!(library.edited_kits(), &["Alpha".to_string()]);
        assert_eq!(library.kits().names().collect::<Vec<_>>(), vec!["Alpha", "B"]);
    }

    #[test]
    fn test_rename_rejects_reserved_chars() {
        let mut library = library_with(&["A"]);
        assert!(matches!(
            library.update_name("A", "A,B"),
            Err(LibraryError::InvalidKitName { reserved: ',', .. })
        ));
        assert!(library.kit("A").is_some());
    }

    #[test]
    fn test_update_kit_validates() {
        let mut library = library_with(&["A"]);
        let mut slots = slots_with(0, &[&["Round"]]);
        slots[4] = vec![vec!["Round".to_string()]];
        assert!(matches!(
            library.update_kit("A", slots),
            Err(LibraryError::DuplicatePreset { .. })
        ));
        assert!(!library.is_dirty());

        assert!(matches!(
            library.update_kit("A", slots_with(0, &[&["a,b"]])),
            Err(LibraryError::InvalidPresetName { .. })
        ));

        library
            .update_kit("A", slots_with(0, &[&["Round", "Flat"], &["Ink"]]))
            .unwrap();
        assert!(library.is_edited("A"));
        assert_eq!(library.kit("A").unwrap().first_preset(0), Some("Round"));
    }

    #[test]
    fn test_unchanged_update_is_not_an_edit() {
        let mut library = library_with(&["A"]);
        library
            .update_kit("A", slots_with(0, &[&["Round", "Flat"], &["Ink"]]))
            .unwrap();
        library.mark_saved();

        library
            .update_kit("A", slots_with(0, &[&["Round", "Flat"], &["Ink"], &[]]))
            .unwrap();
        assert!(!library.is_edited("A"));
        assert!(!library.is_dirty());

        library
            .update_kit("A", slots_with(0, &[&["Flat", "Round"], &["Ink"]]))
            .unwrap();
        assert!(library.is_edited("A"));
    }

    #[test]
    fn test_update_unknown_kit_creates_it_with_default_sync() {
        let mut library = library_with(&["A"]);
        library.update_kit("B", slots_with(1, &[&["Ink"]])).unwrap();
        assert_eq!(library.kits().names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert!(library.sync().get("B").is_some());
    }

    #[test]
    fn test_new_kit_unique_name() {
        let mut library = library_with(&["New"]);
        let name = library.new_kit("New").unwrap();
        assert_eq!(name, "New(Copy)");
        assert!(library.kit("New(Copy)").unwrap().is_empty());
        assert!(library.is_edited("New(Copy)"));
    }

    #[test]
    fn test_reorder_and_move_mark_dirty() {
        let mut library = library_with(&["A", "B", "C"]);
        library.reorder_kits(&["A", "B", "C"]).unwrap();
        assert!(!library.is_dirty());

        library.reorder_kits(&["C", "B", "A"]).unwrap();
        assert!(library.is_dirty());
        library.mark_saved();

        assert!(!library.move_kit("A", KitMove::Down));
        assert!(!library.is_dirty());
        assert!(library.move_kit("C", KitMove::Down));
        assert_eq!(library.kits().names().collect::<Vec<_>>(), vec!["B", "C", "A"]);
        assert!(library.is_dirty());
    }

    #[test]
    fn test_set_options_only_dirty_on_change() {
        let mut library = library_with(&["A"]);
        library.set_options(Options::default());
        assert!(!library.is_dirty());

        library.set_options(Options {
            auto_brush: false,
            ..Options::default()
        });
        assert!(library.is_dirty());
        library.mark_saved();
        assert!(!library.is_dirty());
    }
}
