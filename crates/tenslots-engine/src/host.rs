//! Host view contract
//!
//! Everything the engine needs from the painting application's active view:
//! visibility, the live brush preset, activation, the secondary brush
//! parameters, the freehand brush tool, and floating on-canvas messages.

use crate::notice::FloatingMessage;
use tenslots_core::Preset;

/// Secondary brush parameters captured around a preset switch
#[derive(Debug, Clone, PartialEq)]
pub struct BrushParams {
    /// Brush size in pixels
    pub size: f64,
    /// Painting opacity (0.0-1.0)
    pub opacity: f64,
    /// Painting flow (0.0-1.0)
    pub flow: f64,
    /// Erase mode toggle state
    pub erase: bool,
    /// Brush rotation in degrees
    pub rotation: f64,
    /// Composite/blending mode id
    pub blending: String,
}

/// Snapshot of a preset and its brush parameters before a switch
#[derive(Debug, Clone, PartialEq)]
pub struct PresetSnapshot {
    /// Preset name
    pub name: String,
    /// Parameters as they were when the snapshot was taken
    pub params: BrushParams,
}

/// The host's active editor view for one window
pub trait BrushView {
    /// Whether the view is visible (hidden views ignore hotkeys)
    fn is_visible(&self) -> bool;

    /// The preset the brush currently uses
    fn current_preset(&self) -> Preset;

    /// Make a preset the current brush preset
    ///
    /// Loads the preset's own parameter defaults.
    fn activate_preset(&mut self, preset: &Preset);

    fn brush_size(&self) -> f64;
    fn set_brush_size(&mut self, size: f64);

    fn opacity(&self) -> f64;
    fn set_opacity(&mut self, opacity: f64);

    fn flow(&self) -> f64;
    fn set_flow(&mut self, flow: f64);

    fn rotation(&self) -> f64;
    fn set_rotation(&mut self, rotation: f64);

    fn blending_mode(&self) -> String;
    fn set_blending_mode(&mut self, mode: &str);

    /// Current erase-mode toggle state
    fn erase_mode(&self) -> bool;
    /// Flip the erase-mode toggle (the host only exposes a trigger)
    fn toggle_erase_mode(&mut self);

    /// Whether the freehand brush tool is selected
    fn brush_tool_selected(&self) -> bool;
    /// Select the freehand brush tool
    fn select_brush_tool(&mut self);

    /// Show a transient message on the canvas
    fn show_floating_message(&mut self, message: FloatingMessage);

    /// Capture all secondary brush parameters
    fn capture_params(&self) -> BrushParams {
        BrushParams {
            size: self.brush_size(),
            opacity: self.opacity(),
            flow: self.flow(),
            erase: self.erase_mode(),
            rotation: self.rotation(),
            blending: self.blending_mode(),
        }
    }

    /// Capture the current preset with its parameters
    fn snapshot(&self) -> PresetSnapshot {
        PresetSnapshot {
            name: self.current_preset().name,
            params: self.capture_params(),
        }
    }

    /// Write back every captured parameter
    fn restore_params(&mut self, params: &BrushParams) {
        self.set_brush_size(params.size);
        self.set_opacity(params.opacity);
        self.set_flow(params.flow);
        self.set_rotation(params.rotation);
        self.set_blending_mode(&params.blending);
        if self.erase_mode() != params.erase {
            self.toggle_erase_mode();
        }
    }
}

/// Resolves the active view of a window
pub trait ViewProvider {
    type View: BrushView;

    /// The window's active view, if it has one
    fn view_mut(&mut self, window: crate::window::WindowId) -> Option<&mut Self::View>;
}
