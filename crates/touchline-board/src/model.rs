//! Card and gesture input model for the board engine.

use serde::{Deserialize, Serialize};
use touchline_core::geometry::{CardGeometry, PlayerPosition};

/// How a click combines with the existing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectModifier {
    /// Clear the selection and select only the clicked card.
    Replace,
    /// Insert the clicked card into the selection.
    Add,
    /// Flip the clicked card's membership.
    Toggle,
}

/// Resize grip on a card. Only the growing edges exist; there is no
/// shrink-from-top/left grip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeHandle {
    East,
    South,
    SouthEast,
}

impl ResizeHandle {
    /// Whether dragging this handle changes the column span.
    pub fn resizes_columns(&self) -> bool {
        matches!(self, ResizeHandle::East | ResizeHandle::SouthEast)
    }

    /// Whether dragging this handle changes the row span.
    pub fn resizes_rows(&self) -> bool {
        matches!(self, ResizeHandle::South | ResizeHandle::SouthEast)
    }
}

/// A token on a formation card's pitch diagram, positioned in normalized
/// card-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationPlayer {
    pub id: String,
    pub position: PlayerPosition,
    /// Design-time position, restored when the screen layout is reset.
    pub default_position: PlayerPosition,
}

impl FormationPlayer {
    /// Creates a player at its design-time position.
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        let position = PlayerPosition::new(x, y).clamped();
        Self {
            id: id.into(),
            position,
            default_position: position,
        }
    }
}

/// A dashboard card tracked by the engine.
///
/// The engine references cards by their stable string identifier; content
/// and rendering belong to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub geometry: CardGeometry,
    /// Design-time geometry, used when no stored placement exists and when
    /// the screen layout is reset.
    pub default_geometry: CardGeometry,
    pub selected: bool,
    /// Present only on formation-capable cards.
    pub players: Option<Vec<FormationPlayer>>,
}

impl Card {
    /// Creates a card at its design-time geometry.
    pub fn new(id: impl Into<String>, title: impl Into<String>, geometry: CardGeometry) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            geometry,
            default_geometry: geometry,
            selected: false,
            players: None,
        }
    }

    /// Attaches a formation pitch with the given players.
    pub fn with_players(mut self, players: Vec<FormationPlayer>) -> Self {
        self.players = Some(players);
        self
    }

    /// Whether this card hosts a formation pitch.
    pub fn is_formation(&self) -> bool {
        self.players.is_some()
    }

    /// Looks up a player by id.
    pub fn player(&self, player_id: &str) -> Option<&FormationPlayer> {
        self.players
            .as_ref()
            .and_then(|players| players.iter().find(|p| p.id == player_id))
    }
}
