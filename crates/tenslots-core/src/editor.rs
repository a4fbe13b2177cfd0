//! Editor row conversion
//!
//! The kit editor shows each slot as a flat list of rows: presets with group
//! dividers between them. These helpers convert between that list and the
//! grouped slot representation, and move presets between slots so a name is
//! never assigned twice.

use crate::kit::{validate_preset_name, Group, Slot};
use crate::LibraryError;

/// One row of a slot in the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorRow {
    /// A preset, by name
    Preset(String),
    /// Splits the presets above from the presets below into separate groups
    Divider,
}

impl EditorRow {
    /// Preset name, if this row is a preset
    pub fn preset_name(&self) -> Option<&str> {
        match self {
            Self::Preset(name) => Some(name),
            Self::Divider => None,
        }
    }
}

/// Collapse editor rows into groups
///
/// Dividers close the current group; consecutive or trailing dividers never
/// produce empty groups. A name repeated within the slot keeps its first row.
pub fn slot_from_rows(rows: &[EditorRow]) -> Slot {
    let mut slot = Slot::new();
    let mut group = Group::new();
    let mut seen = std::collections::HashSet::new();

    for row in rows {
        match row {
            EditorRow::Divider => {
                if !group.is_empty() {
                    slot.push(std::mem::take(&mut group));
                }
            }
            EditorRow::Preset(name) => {
                if seen.insert(name.as_str()) {
                    group.push(name.clone());
                }
            }
        }
    }
    if !group.is_empty() {
        slot.push(group);
    }
    slot
}

/// Expand groups into editor rows with dividers between groups
pub fn slot_to_rows(slot: &Slot) -> Vec<EditorRow> {
    let mut rows = Vec::new();
    for (index, group) in slot.iter().enumerate() {
        if index > 0 {
            rows.push(EditorRow::Divider);
        }
        rows.extend(group.iter().cloned().map(EditorRow::Preset));
    }
    rows
}

/// Slot whose rows already hold a preset name
pub fn slot_holding(slots: &[Vec<EditorRow>], name: &str) -> Option<usize> {
    slots
        .iter()
        .position(|rows| rows.iter().any(|row| row.preset_name() == Some(name)))
}

/// Insert a preset row into a slot, removing it from wherever it was
///
/// `row` is clamped to the end of the target slot. Returns the slot the
/// preset was moved out of, if any.
pub fn place_preset(
    slots: &mut [Vec<EditorRow>],
    target: usize,
    row: usize,
    name: &str,
) -> Result<Option<usize>, LibraryError> {
    validate_preset_name(name)?;
    if target >= slots.len() {
        return Err(LibraryError::SlotCount {
            expected: slots.len(),
            actual: target + 1,
        });
    }

    let previous = slot_holding(slots, name);
    let mut row = row;
    if let Some(source) = previous {
        if let Some(index) = slots[source]
            .iter()
            .position(|r| r.preset_name() == Some(name))
        {
            slots[source].remove(index);
            if source == target && index < row {
                row -= 1;
            }
        }
    }

    let rows = &mut slots[target];
    rows.insert(row.min(rows.len()), EditorRow::Preset(name.to_string()));
    Ok(previous.filter(|&source| source != target))
}
