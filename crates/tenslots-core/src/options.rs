//! Behaviour switches
//!
//! Persisted as a fixed-order list of `True`/`False` joined by commas:
//!
//! ```text
//! activate_previous,enforce_previous,auto_brush,sync_enabled,next_group_on_repress,next_position_on_repress
//! ```

use serde::{Deserialize, Serialize};

/// Number of fields in the persisted options string
const FIELD_COUNT: usize = 6;

/// Plugin-wide behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Toggle back to the previous preset on a second press
    pub activate_previous: bool,
    /// Prefer the previous-preset toggle over group/position advance
    pub enforce_previous: bool,
    /// Select the freehand brush tool after every activation
    ///
    /// Also means a second press only counts while that tool is selected.
    pub auto_brush: bool,
    /// Apply the per-kit sync policy when cycling
    pub sync_enabled: bool,
    /// Advance to the next group on a second press
    pub next_group_on_repress: bool,
    /// Advance to the next position on a second press
    pub next_position_on_repress: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            activate_previous: true,
            enforce_previous: false,
            auto_brush: true,
            sync_enabled: true,
            next_group_on_repress: true,
            next_position_on_repress: false,
        }
    }
}

impl Options {
    /// True when the previous-preset toggle overrides advancing
    pub fn previous_enforced(&self) -> bool {
        self.activate_previous && self.enforce_previous
    }

    /// Render the persisted options string
    pub fn to_settings_string(&self) -> String {
        self.fields()
            .iter()
            .map(|value| if *value { "True" } else { "False" })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parse a persisted options string
    ///
    /// Returns `None` if the field count is wrong, so callers keep defaults.
    pub fn from_settings_string(value: &str) -> Option<Self> {
        let fields: Vec<bool> = value.split(',').map(|f| f.trim() == "True").collect();
        if fields.len() != FIELD_COUNT {
            return None;
        }
        Some(Self {
            activate_previous: fields[0],
            enforce_previous: fields[1],
            auto_brush: fields[2],
            sync_enabled: fields[3],
            next_group_on_repress: fields[4],
            next_position_on_repress: fields[5],
        })
    }

    fn fields(&self) -> [bool; FIELD_COUNT] {
        [
            self.activate_previous,
            self.enforce_previous,
            self.auto_brush,
            self.sync_enabled,
            self.next_group_on_repress,
            self.next_position_on_repress,
        ]
    }
}
