//! Per-window cycling state
//!
//! Every open editor window cycles independently: its own active kit,
//! current and previous slot, and previous-preset snapshot.
//!
//! # Lifecycle
//!
//! ```text
//! open() ──► Open ──mark_closing()──► Closing ──reap()──► (removed)
//! ```
//!
//! The host tears down a window's actions asynchronously after signalling
//! the close, so removal is split in two phases. Hotkeys for a `Closing`
//! window are never dispatched.

use crate::host::PresetSnapshot;
use std::collections::BTreeMap;
use std::fmt;

/// Host window identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window {}", self.0)
    }
}

/// Phase of a window's state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Open,
    /// Close signalled; waiting for the host to finish teardown
    Closing,
}

/// Cycling state of one window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowState {
    /// Name of the kit this window cycles through
    pub active_kit: String,
    /// Slot the active preset belongs to (0-9)
    pub current_slot: usize,
    /// Slot of the previous preset (0-9)
    pub prev_slot: usize,
    /// Preset and parameters in use before the last activation
    pub prev_preset: Option<PresetSnapshot>,
    pub lifecycle: Lifecycle,
}

impl WindowState {
    /// Fresh state cycling through `kit`
    pub fn new(kit: &str) -> Self {
        Self {
            active_kit: kit.to_string(),
            current_slot: 0,
            prev_slot: 0,
            prev_preset: None,
            lifecycle: Lifecycle::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.lifecycle == Lifecycle::Open
    }
}

/// All windows' cycling state
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: BTreeMap<WindowId, WindowState>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a window; returns false if it was already known
    pub fn open(&mut self, window: WindowId, kit: &str) -> bool {
        if self.windows.contains_key(&window) {
            return false;
        }
        self.windows.insert(window, WindowState::new(kit));
        true
    }

    pub fn get(&self, window: WindowId) -> Option<&WindowState> {
        self.windows.get(&window)
    }

    pub fn get_mut(&mut self, window: WindowId) -> Option<&mut WindowState> {
        self.windows.get_mut(&window)
    }

    /// State of a window that still accepts hotkeys
    pub fn open_state(&self, window: WindowId) -> Option<&WindowState> {
        self.windows.get(&window).filter(|state| state.is_open())
    }

    /// First phase of removal; returns false for unknown windows
    pub fn mark_closing(&mut self, window: WindowId) -> bool {
        match self.windows.get_mut(&window) {
            Some(state) => {
                state.lifecycle = Lifecycle::Closing;
                true
            }
            None => false,
        }
    }

    /// Second phase of removal: drop a window only if it is closing
    pub fn reap(&mut self, window: WindowId) -> bool {
        if self.windows.get(&window).is_some_and(|state| !state.is_open()) {
            self.windows.remove(&window);
            return true;
        }
        false
    }

    /// Drop every closing window, returning the ones removed
    pub fn reap_all(&mut self) -> Vec<WindowId> {
        let closing: Vec<WindowId> = self
            .windows
            .iter()
            .filter(|(_, state)| !state.is_open())
            .map(|(id, _)| *id)
            .collect();
        for window in &closing {
            self.windows.remove(window);
        }
        closing
    }

    /// Windows whose active kit is `kit`
    pub fn using_kit(&self, kit: &str) -> Vec<WindowId> {
        self.windows
            .iter()
            .filter(|(_, state)| state.active_kit == kit)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&WindowId, &mut WindowState)> {
        self.windows.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_phase_removal() {
        let mut windows = WindowRegistry::new();
        assert!(windows.open(WindowId(1), "A"));
        assert!(!windows.open(WindowId(1), "B"));
        assert!(windows.open(WindowId(2), "A"));

        // Reaping an open window does nothing
        assert!(!windows.reap(WindowId(1)));

        assert!(windows.mark_closing(WindowId(1)));
        assert!(windows.open_state(WindowId(1)).is_none());
        assert!(windows.get(WindowId(1)).is_some());

        assert_eq!(windows.reap_all(), vec![WindowId(1)]);
        assert!(windows.get(WindowId(1)).is_none());
        assert_eq!(windows.len(), 1);
        assert!(!windows.mark_closing(WindowId(9)));
    }

    #[test]
    fn test_using_kit() {
        let mut windows = WindowRegistry::new();
        windows.open(WindowId(1), "A");
        windows.open(WindowId(2), "B");
        windows.open(WindowId(3), "A");
        assert_eq!(windows.using_kit("A"), vec![WindowId(1), WindowId(3)]);
    }
}
