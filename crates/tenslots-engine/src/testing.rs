//! Test doubles for the host view

use crate::host::{BrushParams, BrushView, ViewProvider};
use crate::notice::FloatingMessage;
use crate::window::WindowId;
use std::collections::HashMap;
use tenslots_core::catalog::catalog_from_names;
use tenslots_core::{Group, Kit, KitStore, Library, Options, Preset, Slot, SyncStore, SLOT_COUNT};

/// Route engine logs to the test harness (`RUST_LOG=debug cargo test`)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn default_params() -> BrushParams {
    BrushParams {
        size: 10.0,
        opacity: 1.0,
        flow: 1.0,
        erase: false,
        rotation: 0.0,
        blending: "normal".to_string(),
    }
}

/// In-memory view that records every parameter write
#[derive(Debug)]
pub struct FakeView {
    pub visible: bool,
    pub preset: Preset,
    pub params: BrushParams,
    /// Parameter defaults loaded when a preset is activated
    pub defaults: HashMap<String, BrushParams>,
    pub tool_selected: bool,
    pub messages: Vec<FloatingMessage>,
    pub writes: Vec<&'static str>,
    pub activations: Vec<String>,
}

impl FakeView {
    pub fn new(preset: &str) -> Self {
        Self {
            visible: true,
            preset: Preset::new(preset),
            params: default_params(),
            defaults: HashMap::new(),
            tool_selected: true,
            messages: Vec::new(),
            writes: Vec::new(),
            activations: Vec::new(),
        }
    }

    pub fn with_defaults(mut self, preset: &str, params: BrushParams) -> Self {
        self.defaults.insert(preset.to_string(), params);
        self
    }

    pub fn last_text(&self) -> Option<&str> {
        self.messages.last().map(|m| m.text.as_str())
    }
}

impl BrushView for FakeView {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn current_preset(&self) -> Preset {
        self.preset.clone()
    }

    fn activate_preset(&mut self, preset: &Preset) {
        self.preset = preset.clone();
        self.params = self
            .defaults
            .get(&preset.name)
            .cloned()
            .unwrap_or_else(default_params);
        self.activations.push(preset.name.clone());
    }

    fn brush_size(&self) -> f64 {
        self.params.size
    }

    fn set_brush_size(&mut self, size: f64) {
        self.writes.push("size");
        self.params.size = size;
    }

    fn opacity(&self) -> f64 {
        self.params.opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.writes.push("opacity");
        self.params.opacity = opacity;
    }

    fn flow(&self) -> f64 {
        self.params.flow
    }

    fn set_flow(&mut self, flow: f64) {
        self.writes.push("flow");
        self.params.flow = flow;
    }

    fn rotation(&self) -> f64 {
        self.params.rotation
    }

    fn set_rotation(&mut self, rotation: f64) {
        self.writes.push("rotation");
        self.params.rotation = rotation;
    }

    fn blending_mode(&self) -> String {
        self.params.blending.clone()
    }

    fn set_blending_mode(&mut self, mode: &str) {
        self.writes.push("blending");
        self.params.blending = mode.to_string();
    }

    fn erase_mode(&self) -> bool {
        self.params.erase
    }

    fn toggle_erase_mode(&mut self) {
        self.writes.push("erase");
        self.params.erase = !self.params.erase;
    }

    fn brush_tool_selected(&self) -> bool {
        self.tool_selected
    }

    fn select_brush_tool(&mut self) {
        self.tool_selected = true;
    }

    fn show_floating_message(&mut self, message: FloatingMessage) {
        self.messages.push(message);
    }
}

/// Views keyed by window
#[derive(Debug, Default)]
pub struct FakeViews {
    pub views: HashMap<WindowId, FakeView>,
}

impl ViewProvider for FakeViews {
    type View = FakeView;

    fn view_mut(&mut self, window: WindowId) -> Option<&mut FakeView> {
        self.views.get_mut(&window)
    }
}

pub fn catalog() -> HashMap<String, Preset> {
    catalog_from_names(["Basic", "Round", "Flat", "Ink", "Dry", "Airbrush", "Pencil"])
}

/// One slot from literal groups
pub fn slot(groups: &[&[&str]]) -> Slot {
    groups
        .iter()
        .map(|group| group.iter().map(|s| s.to_string()).collect::<Group>())
        .collect()
}

/// Ten slots, filled at the given indices
pub fn slots(filled: Vec<(usize, Slot)>) -> Vec<Slot> {
    let mut slots = vec![Slot::new(); SLOT_COUNT];
    for (index, groups) in filled {
        slots[index] = groups;
    }
    slots
}

pub fn library(kits: Vec<(&str, Vec<Slot>)>) -> Library {
    let mut sync = SyncStore::new();
    let entries = kits
        .into_iter()
        .map(|(name, slots)| {
            sync.new_kit(name);
            (name.to_string(), Kit::from_slots(slots).unwrap())
        })
        .collect();
    Library::new(KitStore::from_entries(entries), sync, Options::default())
}
