//! Host event bridge
//!
//! The host delivers window and action callbacks on its own terms. They are
//! queued on a flume channel and drained by [`SlotController::process_pending`]
//! on the thread that owns the engine.
//!
//! ```text
//! host callback → HostEvent → flume channel → process_pending() → SlotEngine
//! ```

use crate::actions::{ActionId, ActionKind};
use crate::engine::{Outcome, SlotEngine};
use crate::host::ViewProvider;
use crate::window::WindowId;
use anyhow::{Context, Result};
use flume::{Receiver, Sender};
use tenslots_core::settings::{load_library, save_library, SettingsStore};
use tenslots_core::PresetCatalog;

/// Callback from the host application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A main window was created
    WindowCreated(WindowId),
    /// A main window was closed (its actions still exist)
    WindowClosed(WindowId),
    /// The host finished tearing down a closed window's actions
    ActionsDestroyed(WindowId),
    /// A hotkey fired
    Triggered { window: WindowId, action: ActionKind },
}

/// Engine plus settings store, fed by queued host events
pub struct SlotController<S: SettingsStore> {
    engine: SlotEngine,
    store: S,
    event_tx: Sender<HostEvent>,
    event_rx: Receiver<HostEvent>,
}

impl<S: SettingsStore> SlotController<S> {
    /// Load the library from `store` and start with no windows
    pub fn new<C: PresetCatalog>(store: S, catalog: &C) -> Self {
        let library = load_library(&store, catalog);
        log::info!(
            "SlotController: {} kit(s) loaded",
            library.kits().len()
        );
        let (event_tx, event_rx) = flume::unbounded();
        Self {
            engine: SlotEngine::new(library),
            store,
            event_tx,
            event_rx,
        }
    }

    /// Sender for host callbacks
    pub fn event_sender(&self) -> Sender<HostEvent> {
        self.event_tx.clone()
    }

    /// Try to receive a pending event (non-blocking)
    pub fn try_recv(&self) -> Option<HostEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Handle every queued event; returns the outcomes of triggered hotkeys
    pub fn process_pending<C, P>(&mut self, catalog: &C, views: &mut P) -> Vec<Outcome>
    where
        C: PresetCatalog + ?Sized,
        P: ViewProvider,
    {
        let mut outcomes = Vec::new();
        while let Some(event) = self.try_recv() {
            if let Some(outcome) = self.handle(event, catalog, views) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    /// Handle one event
    pub fn handle<C, P>(&mut self, event: HostEvent, catalog: &C, views: &mut P) -> Option<Outcome>
    where
        C: PresetCatalog + ?Sized,
        P: ViewProvider,
    {
        match event {
            HostEvent::WindowCreated(window) => {
                self.engine.open_window(window);
                None
            }
            HostEvent::WindowClosed(window) => {
                self.engine.close_window(window);
                None
            }
            HostEvent::ActionsDestroyed(window) => {
                self.engine.reap(window);
                None
            }
            HostEvent::Triggered { window, action } => {
                let Some(view) = views.view_mut(window) else {
                    log::debug!("handle: {} has no active view", window);
                    return Some(Outcome::Ignored);
                };
                Some(self.engine.trigger(ActionId { window, kind: action }, catalog, view))
            }
        }
    }

    /// Remove closed windows whose teardown was never reported
    pub fn reap(&mut self) -> Vec<WindowId> {
        self.engine.reap_all()
    }

    /// Apply editor changes for `window` and persist them if anything changed
    pub fn finish_editing(&mut self, window: WindowId, selected_kit: &str) -> Result<()> {
        self.engine.finish_editing(window, selected_kit);
        self.save()
    }

    /// Write the library back if it is dirty
    pub fn save(&mut self) -> Result<()> {
        if !self.engine.library().is_dirty() {
            return Ok(());
        }
        save_library(&mut self.store, self.engine.library())
            .context("Failed to save kit settings")?;
        self.engine.library_mut().mark_saved();
        log::info!("save: Kit settings written");
        Ok(())
    }

    pub fn engine(&self) -> &SlotEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SlotEngine {
        &mut self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
