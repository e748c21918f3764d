//! # Touchline Board
//!
//! The card layout interaction engine behind the Touchline dashboard. Turns
//! raw pointer gestures into validated grid placements, maintains
//! multi-selection, computes live collision previews, and provides linear
//! undo/redo over card geometry and formation-player positions.
//!
//! ## Architecture
//!
//! The engine operates in layers:
//!
//! ```text
//! BoardEngine (imperative shell, notifications, persistence)
//!   ├── GridMetrics (pixel↔cell snapping and clamping)
//!   ├── CardStore (cards of the active screen)
//!   ├── SelectionManager (replace/add/toggle semantics)
//!   ├── CurrentGesture (single active drag/resize/player-drag slot)
//!   ├── collision (candidate validation, preview batches)
//!   └── HistoryManager (undo/redo stacks)
//! ```
//!
//! All operations run synchronously on the caller's thread in response to
//! discrete pointer events; none of them error on the interactive path.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use touchline_board::{BoardEngine, Card, GridMetrics, SelectModifier};
//!
//! let mut board = BoardEngine::new(metrics, store);
//! board.set_active_screen("squad", cards);
//! board.begin_drag("squad-fitness");
//! board.update_drag("squad-fitness", 44.0, 0.0);
//! board.complete_drag("squad-fitness", false);
//! ```

pub mod board;
pub mod card_store;
pub mod collision;
pub mod gesture;
pub mod grid;
pub mod history;
pub mod model;
pub mod selection;

pub use board::{BoardEngine, BoardViewport};
pub use card_store::CardStore;
pub use collision::validate_previews;
pub use gesture::{CurrentGesture, DragGesture, PlayerDragGesture, ResizeGesture};
pub use grid::GridMetrics;
pub use history::{HistoryEntry, HistoryManager};
pub use model::{Card, FormationPlayer, ResizeHandle, SelectModifier};
pub use selection::SelectionManager;

// Re-export the core value types the public API surfaces.
pub use touchline_core::geometry::{CardGeometry, PlayerPosition, PreviewSnapshot};
pub use touchline_core::layout::LayoutStore;
