//! Event type definitions for the event bus.
//!
//! Events mirror what the presentation layer needs to react to: selection
//! membership, preview batches during gestures, undo/redo availability, and
//! screen context switches. Events are cloneable and serializable for
//! logging/replay.

use serde::{Deserialize, Serialize};

use crate::geometry::PreviewSnapshot;

/// Root event enum for all board notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    /// Selection membership changes
    Selection(SelectionEvent),
    /// Gesture preview batches
    Preview(PreviewEvent),
    /// Undo/redo availability
    History(HistoryEvent),
    /// Screen context switches
    Screen(ScreenEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Selection(_) => EventCategory::Selection,
            AppEvent::Preview(_) => EventCategory::Preview,
            AppEvent::History(_) => EventCategory::History,
            AppEvent::Screen(_) => EventCategory::Screen,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Selection(e) => e.description(),
            AppEvent::Preview(e) => e.description(),
            AppEvent::History(e) => e.description(),
            AppEvent::Screen(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Selection membership events.
    Selection,
    /// Gesture preview events.
    Preview,
    /// Undo/redo availability events.
    History,
    /// Screen context events.
    Screen,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::Preview => write!(f, "Preview"),
            EventCategory::History => write!(f, "History"),
            EventCategory::Screen => write!(f, "Screen"),
        }
    }
}

/// Selection-related events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// The selected card set changed.
    Changed {
        /// Identifiers of all currently selected cards.
        selected: Vec<String>,
    },
}

impl SelectionEvent {
    /// Short description for logging.
    pub fn description(&self) -> String {
        match self {
            SelectionEvent::Changed { selected } => {
                format!("Selection changed ({} cards)", selected.len())
            }
        }
    }
}

/// Gesture preview events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PreviewEvent {
    /// A new preview batch was computed for the active gesture.
    Updated {
        /// One snapshot per card under active manipulation.
        snapshots: Vec<PreviewSnapshot>,
    },
    /// The active gesture ended; no preview should be shown.
    Cleared,
}

impl PreviewEvent {
    /// Short description for logging.
    pub fn description(&self) -> String {
        match self {
            PreviewEvent::Updated { snapshots } => {
                format!("Preview updated ({} cards)", snapshots.len())
            }
            PreviewEvent::Cleared => "Preview cleared".to_string(),
        }
    }
}

/// Undo/redo availability events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HistoryEvent {
    /// The history stacks changed.
    Changed {
        /// Whether an undo is currently possible.
        can_undo: bool,
        /// Whether a redo is currently possible.
        can_redo: bool,
    },
}

impl HistoryEvent {
    /// Short description for logging.
    pub fn description(&self) -> String {
        match self {
            HistoryEvent::Changed { can_undo, can_redo } => {
                format!("History changed (undo: {}, redo: {})", can_undo, can_redo)
            }
        }
    }
}

/// Screen context events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScreenEvent {
    /// A screen's card set became active.
    Activated {
        /// Identifier of the newly active screen.
        screen_id: String,
        /// Number of cards on the screen.
        card_count: usize,
    },
    /// The active screen's stored layout was reset to defaults.
    LayoutReset {
        /// Identifier of the reset screen.
        screen_id: String,
    },
}

impl ScreenEvent {
    /// Short description for logging.
    pub fn description(&self) -> String {
        match self {
            ScreenEvent::Activated {
                screen_id,
                card_count,
            } => format!("Screen '{}' activated ({} cards)", screen_id, card_count),
            ScreenEvent::LayoutReset { screen_id } => {
                format!("Screen '{}' layout reset", screen_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_mapping() {
        let e = AppEvent::Selection(SelectionEvent::Changed { selected: vec![] });
        assert_eq!(e.category(), EventCategory::Selection);

        let e = AppEvent::Preview(PreviewEvent::Cleared);
        assert_eq!(e.category(), EventCategory::Preview);

        let e = AppEvent::History(HistoryEvent::Changed {
            can_undo: true,
            can_redo: false,
        });
        assert_eq!(e.category(), EventCategory::History);
    }

    #[test]
    fn test_descriptions() {
        let e = AppEvent::Screen(ScreenEvent::Activated {
            screen_id: "tactics".to_string(),
            card_count: 4,
        });
        assert_eq!(e.description(), "Screen 'tactics' activated (4 cards)");
    }
}
