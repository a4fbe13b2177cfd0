//! Slot Cycling Engine
//!
//! Decides, for a triggered hotkey and the current brush state, which preset
//! becomes active next, and keeps each window's memory of where it came
//! from.
//!
//! # Flow
//!
//! ```text
//! hotkey ─► resolve window ─► validate remembered preset against catalog
//!        ─► compute destination (ring arithmetic over groups/positions/kits)
//!        ─► activate + sync brush parameters on the view
//!        ─► update window memory and slot payload ─► floating notice
//! ```
//!
//! Failures never mutate state: an empty slot or a preset missing from the
//! catalog only produces a notice.

use crate::actions::{
    ActionId, ActionKind, ActionPayload, ActionRegistry, CycleOrder, SlotPayload,
};
use crate::host::{BrushView, PresetSnapshot};
use crate::notice::Notice;
use crate::ring;
use crate::window::{WindowId, WindowRegistry, WindowState};
use tenslots_core::{
    KitMove, Library, LibraryError, Options, Preset, PresetCatalog, Slot, SyncMode, SyncParam,
    SLOT_COUNT,
};

/// Result of handling one hotkey
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A preset was activated (or re-selected); carries its name
    Activated(String),
    /// The window's active kit changed; carries the new kit name
    KitChanged(String),
    /// The slot holds no preset
    Empty,
    /// The remembered or destination preset is not in the catalog
    Missing,
    /// Nothing happened (hidden view, closing window, nothing to cycle)
    Ignored,
}

/// What a second press of an already-active slot did
enum SecondPress {
    Cycled,
    Toggled,
    Unchanged,
    Missing,
}

/// Slot/kit cycling state machine
#[derive(Debug)]
pub struct SlotEngine {
    library: Library,
    windows: WindowRegistry,
    actions: ActionRegistry,
}

impl SlotEngine {
    /// Create an engine over a loaded library
    pub fn new(library: Library) -> Self {
        Self {
            library,
            windows: WindowRegistry::new(),
            actions: ActionRegistry::new(),
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub(crate) fn library_mut(&mut self) -> &mut Library {
        &mut self.library
    }

    pub fn windows(&self) -> &WindowRegistry {
        &self.windows
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// Cycling state of a window
    pub fn window(&self, window: WindowId) -> Option<&WindowState> {
        self.windows.get(window)
    }

    fn options(&self) -> Options {
        *self.library.options()
    }

    // ------------------------------------------------------------------
    // Window lifecycle
    // ------------------------------------------------------------------

    /// Create state for a new window and register its sixteen actions
    ///
    /// The window starts on the first kit in store order.
    pub fn open_window(&mut self, window: WindowId) -> bool {
        let kit = self.library.kits().first_name().to_string();
        if !self.windows.open(window, &kit) {
            log::warn!("open_window: {} already open", window);
            return false;
        }
        self.actions.register_window(window, self.library.kit(&kit));
        log::debug!("open_window: {} opened on kit '{}'", window, kit);
        true
    }

    /// First phase of window removal: stop dispatching its hotkeys
    pub fn close_window(&mut self, window: WindowId) -> bool {
        let marked = self.windows.mark_closing(window);
        if marked {
            log::debug!("close_window: {} closing", window);
        } else {
            log::warn!("close_window: Unknown {}", window);
        }
        marked
    }

    /// Second phase of window removal, once the host finished teardown
    pub fn reap(&mut self, window: WindowId) -> bool {
        if self.windows.reap(window) {
            self.actions.unregister_window(window);
            log::debug!("reap: {} removed", window);
            return true;
        }
        false
    }

    /// Remove every closing window
    pub fn reap_all(&mut self) -> Vec<WindowId> {
        let reaped = self.windows.reap_all();
        for window in &reaped {
            self.actions.unregister_window(*window);
            log::debug!("reap_all: {} removed", window);
        }
        reaped
    }

    // ------------------------------------------------------------------
    // Hotkeys
    // ------------------------------------------------------------------

    /// Dispatch a triggered action by its payload
    pub fn trigger<C, V>(&mut self, id: ActionId, catalog: &C, view: &mut V) -> Outcome
    where
        C: PresetCatalog + ?Sized,
        V: BrushView + ?Sized,
    {
        match self.actions.payload(&id).cloned() {
            Some(ActionPayload::Slot(_)) => match id.kind {
                ActionKind::Slot(slot) => self.activate_slot(id.window, slot, catalog, view),
                ActionKind::Cycle { .. } => Outcome::Ignored,
            },
            Some(ActionPayload::Cycle(cycle)) => {
                self.switch_preset(id.window, cycle.order, cycle.vector, catalog, view)
            }
            None => {
                log::warn!("trigger: No action {} for {}", id.kind, id.window);
                Outcome::Ignored
            }
        }
    }

    /// Handle a direct slot hotkey
    pub fn activate_slot<C, V>(
        &mut self,
        window: WindowId,
        slot: usize,
        catalog: &C,
        view: &mut V,
    ) -> Outcome
    where
        C: PresetCatalog + ?Sized,
        V: BrushView + ?Sized,
    {
        let Some(state) = self.windows.open_state(window) else {
            log::warn!("activate_slot: {} is not open", window);
            return Outcome::Ignored;
        };
        if !view.is_visible() || slot >= SLOT_COUNT {
            return Outcome::Ignored;
        }
        let kit = state.active_kit.clone();

        let Some(pointer) = self.actions.slot_payload(window, slot).cloned() else {
            self.notify(view, &kit, Notice::Empty);
            return Outcome::Empty;
        };
        let Some(preset) = catalog.lookup(&pointer.name) else {
            log::debug!("activate_slot: '{}' no longer in catalog", pointer.name);
            self.notify(view, &kit, Notice::Missing);
            return Outcome::Missing;
        };

        let options = self.options();
        let current = view.current_preset();
        let engaged = !options.auto_brush || view.brush_tool_selected();

        if pointer.name == current.name && engaged {
            log::debug!("activate_slot: Second press of slot {} in {}", slot, window);
            match self.second_press(window, slot, &pointer, catalog, view) {
                SecondPress::Missing => {
                    self.notify(view, &kit, Notice::Missing);
                    return Outcome::Missing;
                }
                SecondPress::Cycled | SecondPress::Toggled | SecondPress::Unchanged => {}
            }
        } else {
            let snapshot = (pointer.name != current.name).then(|| view.snapshot());
            if let Some(state) = self.windows.get_mut(window) {
                if let Some(snapshot) = snapshot {
                    state.prev_preset = Some(snapshot);
                    state.prev_slot = state.current_slot;
                }
                state.current_slot = slot;
            }
            log::debug!("activate_slot: Slot {} -> '{}' in {}", slot, preset.name, window);
            view.activate_preset(&preset);
        }

        self.finish_activation(window, view)
    }

    fn second_press<C, V>(
        &mut self,
        window: WindowId,
        slot: usize,
        pointer: &SlotPayload,
        catalog: &C,
        view: &mut V,
    ) -> SecondPress
    where
        C: PresetCatalog + ?Sized,
        V: BrushView + ?Sized,
    {
        let options = self.options();
        let Some(state) = self.windows.get(window) else {
            return SecondPress::Unchanged;
        };
        let previous = state.prev_preset.clone();
        let kit = self.library.kit(&state.active_kit);
        let groups = kit.and_then(|k| k.slot(slot)).map_or(0, Slot::len);
        let positions = kit
            .and_then(|k| {
                let (group, _) = k.locate_in_slot(slot, &pointer.name, Some(pointer.group))?;
                k.slot(slot)?.get(group).map(Vec::len)
            })
            .unwrap_or(0);
        let enforced = options.previous_enforced();

        if options.next_group_on_repress && groups > 1 && !enforced {
            return match self.cycle_group(window, slot, pointer, 1, catalog, view) {
                Some(_) => SecondPress::Cycled,
                None => SecondPress::Missing,
            };
        }

        if options.next_position_on_repress && positions > 1 && !enforced {
            return match self.cycle_position(window, slot, pointer, 1, catalog, view) {
                Some(_) => SecondPress::Cycled,
                None => SecondPress::Missing,
            };
        }

        if options.activate_previous {
            if let Some(previous) = previous {
                return self.toggle_previous(window, slot, previous, catalog, view);
            }
        }
        SecondPress::Unchanged
    }

    /// Swap back to the previous preset
    ///
    /// The kit may have been edited since the snapshot was taken, so the
    /// slot bookkeeping follows where the previous preset lives now: it
    /// becomes the current slot (falling back to the recorded previous slot),
    /// and the pressed slot becomes the previous one.
    fn toggle_previous<C, V>(
        &mut self,
        window: WindowId,
        slot: usize,
        previous: PresetSnapshot,
        catalog: &C,
        view: &mut V,
    ) -> SecondPress
    where
        C: PresetCatalog + ?Sized,
        V: BrushView + ?Sized,
    {
        let Some(preset) = catalog.lookup(&previous.name) else {
            log::debug!("toggle_previous: '{}' no longer in catalog", previous.name);
            return SecondPress::Missing;
        };
        let Some(state) = self.windows.get_mut(window) else {
            return SecondPress::Unchanged;
        };

        let located = self
            .library
            .kit(&state.active_kit)
            .and_then(|kit| kit.locate(&previous.name))
            .map(|location| location.slot);
        let current_slot = located.unwrap_or(state.prev_slot);
        log::debug!(
            "toggle_previous: '{}' in slot {} (recorded {}), pressed slot {}",
            previous.name,
            current_slot,
            state.prev_slot,
            slot
        );

        let snapshot = view.snapshot();
        state.current_slot = current_slot;
        state.prev_slot = slot;
        state.prev_preset = Some(snapshot);

        view.activate_preset(&preset);
        view.restore_params(&previous.params);
        SecondPress::Toggled
    }

    /// Handle a kit/group/position cycle hotkey
    pub fn switch_preset<C, V>(
        &mut self,
        window: WindowId,
        order: CycleOrder,
        vector: i64,
        catalog: &C,
        view: &mut V,
    ) -> Outcome
    where
        C: PresetCatalog + ?Sized,
        V: BrushView + ?Sized,
    {
        if self.windows.open_state(window).is_none() {
            log::warn!("switch_preset: {} is not open", window);
            return Outcome::Ignored;
        }
        if !view.is_visible() {
            return Outcome::Ignored;
        }

        if order == CycleOrder::Kit {
            if self.library.kits().len() <= 1 {
                return Outcome::Ignored;
            }
            return match self.cycle_kit(window, vector) {
                Some(kit) => {
                    self.notify(view, &kit, Notice::Kit);
                    Outcome::KitChanged(kit)
                }
                None => Outcome::Ignored,
            };
        }

        self.follow_live_preset(window, view);

        let Some(state) = self.windows.get(window) else {
            return Outcome::Ignored;
        };
        let kit_name = state.active_kit.clone();
        let slot_index = state.current_slot;

        let Some(pointer) = self.actions.slot_payload(window, slot_index).cloned() else {
            self.notify(view, &kit_name, Notice::Empty);
            return Outcome::Empty;
        };

        let Some(kit) = self.library.kit(&kit_name) else {
            return Outcome::Ignored;
        };
        let Some(slot) = kit.slot(slot_index) else {
            return Outcome::Ignored;
        };
        let group_count = slot.len();
        let group_len = kit
            .locate_in_slot(slot_index, &pointer.name, Some(pointer.group))
            .and_then(|(group, _)| slot.get(group))
            .map_or(0, Vec::len);

        let cycled = match order {
            CycleOrder::Group if group_count > 1 => {
                self.cycle_group(window, slot_index, &pointer, vector, catalog, view)
            }
            CycleOrder::Position if group_len > 1 => {
                self.cycle_position(window, slot_index, &pointer, vector, catalog, view)
            }
            _ => return Outcome::Ignored,
        };

        match cycled {
            Some(_) => self.finish_activation(window, view),
            None => {
                self.notify(view, &kit_name, Notice::Missing);
                Outcome::Missing
            }
        }
    }

    /// Re-anchor on the live preset if it was changed outside the engine
    fn follow_live_preset<V>(&mut self, window: WindowId, view: &V)
    where
        V: BrushView + ?Sized,
    {
        let live = view.current_preset().name;
        let Some(state) = self.windows.get_mut(window) else {
            return;
        };
        let remembered = self
            .actions
            .slot_payload(window, state.current_slot)
            .map(|payload| payload.name.as_str());
        if remembered == Some(live.as_str()) {
            return;
        }

        let Some(location) = self
            .library
            .kit(&state.active_kit)
            .and_then(|kit| kit.locate(&live))
        else {
            return;
        };
        log::debug!(
            "follow_live_preset: '{}' found in slot {} group {}",
            live,
            location.slot,
            location.group
        );
        state.current_slot = location.slot;
        self.actions.set_slot_payload(
            window,
            location.slot,
            Some(SlotPayload {
                group: location.group,
                name: live,
            }),
        );
    }

    /// Step the window's active kit through store order
    pub fn cycle_kit(&mut self, window: WindowId, vector: i64) -> Option<String> {
        let state = self.windows.get(window)?;
        let kits = self.library.kits();
        let index = kits.position(&state.active_kit).unwrap_or(0);
        let destination = ring::destination(index, kits.len(), vector)?;
        let name = kits.name_at(destination)?.to_string();
        self.set_active_kit(window, &name);
        log::debug!("cycle_kit: {} now on kit '{}'", window, name);
        Some(name)
    }

    /// Step to another group of `slot_index`
    ///
    /// The position is kept when the destination group is long enough and
    /// reset to 0 otherwise. On success `slot_index` becomes the current
    /// slot. Returns the activated preset name, or `None` (with nothing
    /// changed) when the destination cannot be resolved.
    pub fn cycle_group<C, V>(
        &mut self,
        window: WindowId,
        slot_index: usize,
        pointer: &SlotPayload,
        vector: i64,
        catalog: &C,
        view: &mut V,
    ) -> Option<String>
    where
        C: PresetCatalog + ?Sized,
        V: BrushView + ?Sized,
    {
        let state = self.windows.get(window)?;
        let kit = self.library.kit(&state.active_kit)?;
        let slot = kit.slot(slot_index)?;

        let (group, position) =
            kit.locate_in_slot(slot_index, &pointer.name, Some(pointer.group))?;
        let destination = ring::destination(group, slot.len(), vector)?;
        let presets = slot.get(destination)?;
        let position = if position >= presets.len() { 0 } else { position };
        let name = presets.get(position)?.clone();

        let preset = catalog.lookup(&name)?;
        log::debug!(
            "cycle_group: Slot {} group {} -> {} ('{}')",
            slot_index,
            group,
            destination,
            name
        );
        self.commit_cycle(
            window,
            slot_index,
            SlotPayload {
                group: destination,
                name,
            },
            &preset,
            destination == group,
            view,
        );
        Some(preset.name)
    }

    /// Step to another position within the pointer's group of `slot_index`
    pub fn cycle_position<C, V>(
        &mut self,
        window: WindowId,
        slot_index: usize,
        pointer: &SlotPayload,
        vector: i64,
        catalog: &C,
        view: &mut V,
    ) -> Option<String>
    where
        C: PresetCatalog + ?Sized,
        V: BrushView + ?Sized,
    {
        let state = self.windows.get(window)?;
        let kit = self.library.kit(&state.active_kit)?;

        let (group, position) =
            kit.locate_in_slot(slot_index, &pointer.name, Some(pointer.group))?;
        let presets = kit.slot(slot_index)?.get(group)?;
        let destination = ring::destination(position, presets.len(), vector)?;
        let name = presets.get(destination)?.clone();

        let preset = catalog.lookup(&name)?;
        log::debug!(
            "cycle_position: Slot {} group {} position {} -> {} ('{}')",
            slot_index,
            group,
            position,
            destination,
            name
        );
        self.commit_cycle(
            window,
            slot_index,
            SlotPayload { group, name },
            &preset,
            true,
            view,
        );
        Some(preset.name)
    }

    fn commit_cycle<V>(
        &mut self,
        window: WindowId,
        slot: usize,
        payload: SlotPayload,
        preset: &Preset,
        same_group: bool,
        view: &mut V,
    ) where
        V: BrushView + ?Sized,
    {
        self.actions.set_slot_payload(window, slot, Some(payload));
        let snapshot = view.snapshot();
        if let Some(state) = self.windows.get_mut(window) {
            state.current_slot = slot;
            state.prev_slot = slot;
            state.prev_preset = Some(snapshot);
        }
        self.activate_and_sync(window, preset, same_group, view);
    }

    /// Activate a preset, carrying brush parameters forward per sync policy
    ///
    /// Parameters are captured before activation. With sync enabled, each
    /// parameter whose mode applies is written back; `Never` parameters are
    /// left at the new preset's own values. Erase mode is a toggle, so it is
    /// only triggered when the captured state differs from the new one.
    pub fn activate_and_sync<V>(
        &mut self,
        window: WindowId,
        preset: &Preset,
        same_group: bool,
        view: &mut V,
    ) where
        V: BrushView + ?Sized,
    {
        let captured = view.capture_params();
        view.activate_preset(preset);

        if !self.library.options().sync_enabled {
            return;
        }
        let Some(state) = self.windows.get(window) else {
            return;
        };

        for param in SyncParam::ALL {
            let mode = self
                .library
                .sync_mode(&state.active_kit, state.current_slot, param);
            if !mode.applies(same_group) {
                continue;
            }
            match param {
                SyncParam::Size => view.set_brush_size(captured.size),
                SyncParam::Opacity => view.set_opacity(captured.opacity),
                SyncParam::Flow => view.set_flow(captured.flow),
                SyncParam::Rotation => view.set_rotation(captured.rotation),
                SyncParam::Blending => view.set_blending_mode(&captured.blending),
                SyncParam::Erase => {
                    if view.erase_mode() != captured.erase {
                        view.toggle_erase_mode();
                    }
                }
            }
        }
    }

    fn finish_activation<V>(&mut self, window: WindowId, view: &mut V) -> Outcome
    where
        V: BrushView + ?Sized,
    {
        if self.library.options().auto_brush {
            view.select_brush_tool();
        }
        let preset = view.current_preset();
        let kit = self
            .windows
            .get(window)
            .map(|state| state.active_kit.clone())
            .unwrap_or_default();
        let name = preset.name.clone();
        self.notify(view, &kit, Notice::Selected(preset));
        Outcome::Activated(name)
    }

    fn notify<V>(&self, view: &mut V, kit: &str, notice: Notice)
    where
        V: BrushView + ?Sized,
    {
        view.show_floating_message(notice.to_message(kit));
    }

    // ------------------------------------------------------------------
    // Kits
    // ------------------------------------------------------------------

    /// Point a window at a kit and reset its slot payloads
    ///
    /// Each slot then remembers group 0, position 0 of the kit's slot.
    pub fn set_active_kit(&mut self, window: WindowId, kit: &str) -> bool {
        if !self.library.kits().contains(kit) {
            log::warn!("set_active_kit: Unknown kit '{}'", kit);
            return false;
        }
        let Some(state) = self.windows.get_mut(window) else {
            return false;
        };
        state.active_kit = kit.to_string();
        self.actions.reset_slots(window, self.library.kit(kit));
        true
    }

    /// Reorder kits (affects kit cycling order only)
    pub fn reorder_kits<S: AsRef<str>>(&mut self, order: &[S]) -> Result<(), LibraryError> {
        self.library.reorder_kits(order)
    }

    /// Rename a kit, following it in every window that uses it
    pub fn rename_kit(&mut self, prev_name: &str, new_name: &str) -> Result<(), LibraryError> {
        self.library.update_name(prev_name, new_name)?;
        for (window, state) in self.windows.iter_mut() {
            if state.active_kit == prev_name {
                state.active_kit = new_name.to_string();
                log::debug!("rename_kit: {} follows '{}' -> '{}'", window, prev_name, new_name);
            }
        }
        Ok(())
    }

    /// Replace a kit's slot data
    pub fn update_kit(&mut self, name: &str, slots: Vec<Slot>) -> Result<(), LibraryError> {
        self.library.update_kit(name, slots)
    }

    /// Add an empty kit under a unique name
    pub fn new_kit(&mut self, base: &str) -> Result<String, LibraryError> {
        self.library.new_kit(base)
    }

    /// Move a kit one step in cycling order
    pub fn move_kit(&mut self, name: &str, direction: KitMove) -> bool {
        self.library.move_kit(name, direction)
    }

    /// Delete a kit; windows that used it move to the first kit
    pub fn remove_kit(&mut self, name: &str) -> bool {
        let removed = self.library.remove_kit(name);
        let fallback = self.library.kits().first_name().to_string();
        for window in self.windows.using_kit(name) {
            self.set_active_kit(window, &fallback);
            log::debug!("remove_kit: {} moved to kit '{}'", window, fallback);
        }
        removed
    }

    /// Edit one entry of a kit's sync policy
    pub fn set_sync_mode(
        &mut self,
        kit: &str,
        slot: usize,
        param: SyncParam,
        mode: SyncMode,
    ) -> Result<(), LibraryError> {
        self.library.set_sync_mode(kit, slot, param, mode)
    }

    /// Replace the behaviour switches
    pub fn set_options(&mut self, options: Options) {
        self.library.set_options(options);
    }

    /// Apply edits when the kit editor of `window` closes
    ///
    /// Windows cycling through an edited kit get fresh slot payloads, and
    /// the editing window switches to `selected_kit` if it changed.
    pub fn finish_editing(&mut self, window: WindowId, selected_kit: &str) {
        let edited: Vec<String> = self.library.edited_kits().to_vec();
        for kit in &edited {
            for other in self.windows.using_kit(kit) {
                self.actions.reset_slots(other, self.library.kit(kit));
            }
        }

        let needs_switch = self
            .windows
            .get(window)
            .is_some_and(|state| state.active_kit != selected_kit);
        if needs_switch {
            self.set_active_kit(window, selected_kit);
        }
    }
}
