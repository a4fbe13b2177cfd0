//! Ten Brush Slots engine - hotkey-driven preset cycling
//!
//! This crate provides:
//! - Ring arithmetic for wrap-around kit/group/position stepping
//! - Per-window cycling state with two-phase teardown
//! - The sixteen per-window actions and their engine-owned payloads
//! - The cycling state machine (slot activation, second-press policy,
//!   previous-preset toggle, parameter sync)
//! - Floating notices for every outcome
//! - A flume channel bridge from host callbacks to the engine
//!
//! # Architecture
//!
//! ```text
//! host callback → HostEvent → flume channel → SlotController::process_pending()
//!                                                   │
//!                              SlotEngine ◄─────────┘
//!                              ├── WindowRegistry  (active kit, current/prev slot)
//!                              ├── ActionRegistry  (slot payloads)
//!                              └── Library         (kits, sync policy, options)
//! ```
//!
//! The host is reached only through the [`BrushView`] and [`PresetCatalog`]
//! traits, so the engine runs the same against a real application or an
//! in-memory double.
//!
//! [`PresetCatalog`]: tenslots_core::PresetCatalog

mod actions;
mod controller;
mod engine;
mod host;
mod notice;
pub mod ring;
#[cfg(test)]
mod testing;
mod window;

pub use actions::{
    ActionId, ActionKind, ActionPayload, ActionRegistry, CycleOrder, CyclePayload, Direction,
    SlotPayload, ACTIONS_PER_WINDOW,
};
pub use controller::{HostEvent, SlotController};
pub use engine::{Outcome, SlotEngine};
pub use host::{BrushParams, BrushView, PresetSnapshot, ViewProvider};
pub use notice::{FloatingMessage, Icon, Notice, NOTICE_DURATION_MS, NOTICE_PRIORITY};
pub use window::{Lifecycle, WindowId, WindowRegistry, WindowState};
