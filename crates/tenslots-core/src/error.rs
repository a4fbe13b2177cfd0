//! Error types for kit library edits
//!
//! Only edit-time operations can fail. The cycling engine models its
//! failures as outcomes, never as errors.

use thiserror::Error;

/// Errors that can occur while editing the kit library
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// Kit name not present in the store
    #[error("Kit '{0}' does not exist")]
    UnknownKit(String),

    /// Target kit name already taken
    #[error("Kit '{0}' already exists")]
    KitExists(String),

    /// Kit name contains a character the settings format cannot represent
    #[error("Kit name '{name}' contains reserved character '{reserved}'")]
    InvalidKitName { name: String, reserved: char },

    /// Preset name contains a character the settings format cannot represent
    #[error("Preset name '{name}' contains reserved character '{reserved}'")]
    InvalidPresetName { name: String, reserved: char },

    /// A preset appears more than once in the same kit
    #[error("Preset '{name}' is already assigned to slot {slot}")]
    DuplicatePreset { name: String, slot: usize },

    /// A kit must carry exactly ten slots
    #[error("Kit must have {expected} slots, got {actual}")]
    SlotCount { expected: usize, actual: usize },

    /// A reorder request does not name every kit exactly once
    #[error("Kit order does not match the stored kits")]
    KitOrderMismatch,
}
