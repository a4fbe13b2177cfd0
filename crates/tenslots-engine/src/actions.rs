//! Action registry
//!
//! Each window gets sixteen hotkey actions: ten slot actions and six cycle
//! actions (kit/group/position × next/previous). The host action is only an
//! event source; the engine keeps each action's payload here, keyed by
//! window and action kind.
//!
//! A slot payload is the engine's scratch memory for that slot: the preset
//! it will activate next and the group that preset was last seen in.

use crate::window::WindowId;
use std::collections::HashMap;
use std::fmt;
use tenslots_core::{Kit, SLOT_COUNT, SLOT_KEYS};

/// Number of actions registered per window
pub const ACTIONS_PER_WINDOW: usize = SLOT_COUNT + CycleOrder::ALL.len() * 2;

/// Dimension a cycle action steps through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleOrder {
    Kit,
    Group,
    Position,
}

impl CycleOrder {
    pub const ALL: [CycleOrder; 3] = [Self::Kit, Self::Group, Self::Position];

    fn as_str(self) -> &'static str {
        match self {
            Self::Kit => "kit",
            Self::Group => "group",
            Self::Position => "position",
        }
    }
}

/// Step direction of a cycle action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Self::Next, Self::Previous];

    /// Ring step for this direction
    pub fn vector(self) -> i64 {
        match self {
            Self::Next => 1,
            Self::Previous => -1,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
        }
    }
}

/// What a hotkey action does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Activate slot 0-9
    Slot(usize),
    /// Step through kits, groups or positions
    Cycle { order: CycleOrder, direction: Direction },
}

impl ActionKind {
    /// All sixteen actions in registration order
    pub fn all() -> impl Iterator<Item = ActionKind> {
        let slots = (0..SLOT_COUNT).map(ActionKind::Slot);
        let cycles = CycleOrder::ALL.into_iter().flat_map(|order| {
            Direction::ALL
                .into_iter()
                .map(move |direction| ActionKind::Cycle { order, direction })
        });
        slots.chain(cycles)
    }

    /// Stable host action id (e.g. `activate_slot_1`, `switch_to_next_group`)
    pub fn id(&self) -> String {
        match self {
            Self::Slot(slot) => {
                let digit = SLOT_KEYS.get(*slot).copied().unwrap_or('?');
                format!("activate_slot_{}", digit)
            }
            Self::Cycle { order, direction } => {
                format!("switch_to_{}_{}", direction.as_str(), order.as_str())
            }
        }
    }

    /// Parse a host action id
    pub fn from_id(id: &str) -> Option<Self> {
        if let Some(digit) = id.strip_prefix("activate_slot_") {
            let mut chars = digit.chars();
            let key = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            return SLOT_KEYS.iter().position(|&k| k == key).map(Self::Slot);
        }

        let rest = id.strip_prefix("switch_to_")?;
        let (direction, order) = rest.split_once('_')?;
        let direction = Direction::ALL.into_iter().find(|d| d.as_str() == direction)?;
        let order = CycleOrder::ALL.into_iter().find(|o| o.as_str() == order)?;
        Some(Self::Cycle { order, direction })
    }

    /// Menu label shown by the host
    pub fn label(&self) -> String {
        match self {
            Self::Slot(slot) => {
                let digit = SLOT_KEYS.get(*slot).copied().unwrap_or('?');
                format!("Activate Brush Slot {}", digit)
            }
            Self::Cycle { order, direction } => {
                format!(
                    "Switch To {} {}",
                    capitalize(direction.as_str()),
                    capitalize(order.as_str())
                )
            }
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One action of one window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId {
    pub window: WindowId,
    pub kind: ActionKind,
}

/// Remembered preset of a slot action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPayload {
    /// Group the preset was last seen in
    pub group: usize,
    /// Preset name
    pub name: String,
}

/// Step description of a cycle action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclePayload {
    pub order: CycleOrder,
    pub vector: i64,
}

/// Engine-owned payload of an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionPayload {
    /// Slot action; `None` when the slot is empty
    Slot(Option<SlotPayload>),
    Cycle(CyclePayload),
}

/// Payloads of every registered action
#[derive(Debug, Default)]
pub struct ActionRegistry {
    payloads: HashMap<ActionId, ActionPayload>,
}

impl ActionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register all sixteen actions of a window
    ///
    /// Slot payloads start at the first preset of each slot of `kit`.
    pub fn register_window(&mut self, window: WindowId, kit: Option<&Kit>) {
        for kind in ActionKind::all() {
            let payload = match kind {
                ActionKind::Slot(slot) => ActionPayload::Slot(first_payload(kit, slot)),
                ActionKind::Cycle { order, direction } => ActionPayload::Cycle(CyclePayload {
                    order,
                    vector: direction.vector(),
                }),
            };
            self.payloads.insert(ActionId { window, kind }, payload);
        }
    }

    /// Drop every action of a window
    pub fn unregister_window(&mut self, window: WindowId) {
        self.payloads.retain(|id, _| id.window != window);
    }

    /// Point every slot action of a window at the first preset of its slot
    pub fn reset_slots(&mut self, window: WindowId, kit: Option<&Kit>) {
        for slot in 0..SLOT_COUNT {
            self.set_slot_payload(window, slot, first_payload(kit, slot));
        }
    }

    /// Payload of any action
    pub fn payload(&self, id: &ActionId) -> Option<&ActionPayload> {
        self.payloads.get(id)
    }

    /// Remembered preset of a window's slot action
    pub fn slot_payload(&self, window: WindowId, slot: usize) -> Option<&SlotPayload> {
        let id = ActionId {
            window,
            kind: ActionKind::Slot(slot),
        };
        match self.payloads.get(&id) {
            Some(ActionPayload::Slot(payload)) => payload.as_ref(),
            _ => None,
        }
    }

    /// Replace a window's slot payload (only for registered windows)
    pub fn set_slot_payload(&mut self, window: WindowId, slot: usize, payload: Option<SlotPayload>) {
        let id = ActionId {
            window,
            kind: ActionKind::Slot(slot),
        };
        if let Some(entry) = self.payloads.get_mut(&id) {
            *entry = ActionPayload::Slot(payload);
        }
    }

    /// Whether a window has registered actions
    pub fn has_window(&self, window: WindowId) -> bool {
        self.payloads.keys().any(|id| id.window == window)
    }

    /// Total number of registered actions
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

fn first_payload(kit: Option<&Kit>, slot: usize) -> Option<SlotPayload> {
    kit?.first_preset(slot).map(|name| SlotPayload {
        group: 0,
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenslots_core::Slot;

    #[test]
    fn test_sixteen_actions() {
        assert_eq!(ActionKind::all().count(), ACTIONS_PER_WINDOW);
        assert_eq!(ACTIONS_PER_WINDOW, 16);
    }

    #[test]
    fn test_ids_roundtrip_and_labels() {
        for kind in ActionKind::all() {
            assert_eq!(ActionKind::from_id(&kind.id()), Some(kind));
        }
        assert_eq!(ActionKind::Slot(9).id(), "activate_slot_0");
        assert_eq!(ActionKind::Slot(0).label(), "Activate Brush Slot 1");
        let previous_group = ActionKind::Cycle {
            order: CycleOrder::Group,
            direction: Direction::Previous,
        };
        assert_eq!(previous_group.id(), "switch_to_previous_group");
        assert_eq!(previous_group.label(), "Switch To Previous Group");
        assert_eq!(ActionKind::from_id("activate_slot_11"), None);
        assert_eq!(ActionKind::from_id("switch_to_next_layer"), None);
    }

    #[test]
    fn test_register_and_unregister() {
        let mut slots = vec![Slot::new(); SLOT_COUNT];
        slots[2] = vec![vec!["Round".to_string(), "Flat".to_string()]];
        let kit = Kit::from_slots(slots).unwrap();

        let mut registry = ActionRegistry::new();
        registry.register_window(WindowId(1), Some(&kit));
        registry.register_window(WindowId(2), None);
        assert_eq!(registry.len(), 32);

        assert_eq!(
            registry.slot_payload(WindowId(1), 2),
            Some(&SlotPayload {
                group: 0,
                name: "Round".to_string()
            })
        );
        assert_eq!(registry.slot_payload(WindowId(1), 0), None);
        assert_eq!(registry.slot_payload(WindowId(2), 2), None);

        let id = ActionId {
            window: WindowId(2),
            kind: ActionKind::Cycle {
                order: CycleOrder::Kit,
                direction: Direction::Previous,
            },
        };
        assert_eq!(
            registry.payload(&id),
            Some(&ActionPayload::Cycle(CyclePayload {
                order: CycleOrder::Kit,
                vector: -1
            }))
        );

        registry.unregister_window(WindowId(1));
        assert!(!registry.has_window(WindowId(1)));
        assert!(registry.has_window(WindowId(2)));
        assert_eq!(registry.len(), 16);
    }
}
