//! Ten Brush Slots core - kits, sync policy and persistence
//!
//! This crate provides:
//! - The preset catalog contract (the host's authoritative preset lookup)
//! - The Kit Store: ordered named kits of ten slots, each slot a list of groups
//! - The Sync Policy store: per-kit, per-slot tri-state parameter propagation
//! - The `Library` aggregate that tracks edited kits and the dirty flag
//! - Editor row conversion (preset rows + group dividers ⇄ groups)
//! - The settings wire codec and settings store backends
//!
//! # Architecture
//!
//! ```text
//! SettingsStore ──load_library──► Library { KitStore, SyncStore, Options }
//!                ◄─save_library──
//! ```
//!
//! The cycling engine lives in `tenslots-engine` and only reads/mutates the
//! `Library` through the operations exposed here.

pub mod catalog;
pub mod editor;
mod error;
pub mod kit;
pub mod library;
pub mod options;
pub mod settings;
pub mod sync;

pub use catalog::{Preset, PresetCatalog};
pub use error::LibraryError;
pub use kit::{Group, Kit, KitStore, PresetLocation, Slot, SLOT_COUNT, SLOT_KEYS};
pub use library::{KitMove, Library};
pub use options::Options;
pub use sync::{KitSync, SyncMode, SyncParam, SyncStore};
