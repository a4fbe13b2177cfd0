//! Floating on-canvas notices
//!
//! Every user-visible outcome of a hotkey is reported as a short floating
//! message on the active view. Nothing is ever fatal to the host.

use std::sync::Arc;
use tenslots_core::Preset;

/// How long a notice stays on screen
pub const NOTICE_DURATION_MS: u32 = 1000;

/// Host priority for notices
pub const NOTICE_PRIORITY: u8 = 1;

/// Icon shown next to a floating message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    /// The preset's own thumbnail (host falls back to a generic icon on `None`)
    Thumbnail(Option<Arc<[u8]>>),
    /// Host warning icon
    Warning,
    /// Host freehand brush tool icon
    FreehandTool,
}

/// Message handed to the host view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatingMessage {
    pub text: String,
    pub icon: Icon,
    pub duration_ms: u32,
    pub priority: u8,
}

/// Outcome categories shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A preset was activated
    Selected(Preset),
    /// The remembered or destination preset no longer exists
    Missing,
    /// The slot has no preset
    Empty,
    /// The active kit changed
    Kit,
}

impl Notice {
    /// Render the notice for a kit (an empty kit name omits the prefix)
    pub fn to_message(&self, kit: &str) -> FloatingMessage {
        let (text, icon) = match self {
            Self::Selected(preset) => {
                let label = if kit.is_empty() {
                    preset.name.clone()
                } else {
                    format!("{}: {}", kit, preset.name)
                };
                (
                    format!("{}\nselected", label),
                    Icon::Thumbnail(preset.thumbnail.clone()),
                )
            }
            Self::Missing => (format!("{}Missing Preset", kit_prefix(kit)), Icon::Warning),
            Self::Empty => (format!("{}Empty Slot", kit_prefix(kit)), Icon::Warning),
            Self::Kit => {
                let text = if kit.is_empty() {
                    "Kit".to_string()
                } else {
                    format!("{} Kit", kit)
                };
                (text, Icon::FreehandTool)
            }
        };

        FloatingMessage {
            text,
            icon,
            duration_ms: NOTICE_DURATION_MS,
            priority: NOTICE_PRIORITY,
        }
    }
}

fn kit_prefix(kit: &str) -> String {
    if kit.is_empty() {
        String::new()
    } else {
        format!("{}: ", kit)
    }
}
