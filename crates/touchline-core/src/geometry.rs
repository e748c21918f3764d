//! Card geometry value types.
//!
//! Geometry is always expressed in integer grid-cell units. Cell ranges are
//! half-open: a card at column 2 with span 2 occupies columns `[2, 4)`.

use serde::{Deserialize, Serialize};

/// Grid placement of a card: position plus span, in cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardGeometry {
    /// Leftmost occupied column.
    pub column: u32,
    /// Topmost occupied row.
    pub row: u32,
    /// Width in cells, always >= 1.
    pub column_span: u32,
    /// Height in cells, always >= 1.
    pub row_span: u32,
}

impl CardGeometry {
    /// Creates a geometry, forcing spans to at least one cell.
    pub fn new(column: u32, row: u32, column_span: u32, row_span: u32) -> Self {
        Self {
            column,
            row,
            column_span: column_span.max(1),
            row_span: row_span.max(1),
        }
    }

    /// One past the rightmost occupied column.
    pub fn right(&self) -> u32 {
        self.column + self.column_span
    }

    /// One past the bottommost occupied row.
    pub fn bottom(&self) -> u32 {
        self.row + self.row_span
    }

    /// Axis-aligned overlap test on half-open cell ranges.
    pub fn overlaps(&self, other: &CardGeometry) -> bool {
        let columns_disjoint = self.right() <= other.column || other.right() <= self.column;
        let rows_disjoint = self.bottom() <= other.row || other.bottom() <= self.row;
        !columns_disjoint && !rows_disjoint
    }

    /// Whether this geometry fits inside a grid of the given dimensions.
    pub fn fits(&self, total_columns: u32, total_rows: u32) -> bool {
        self.right() <= total_columns && self.bottom() <= total_rows
    }
}

/// Normalized position of a formation player inside a card's local pitch
/// space. Both axes are in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPosition {
    pub x: f64,
    pub y: f64,
}

impl PlayerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamps both axes into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }
}

/// Speculative placement of one card during an active gesture, annotated
/// with the collision verdict. Recomputed on every gesture update; a batch
/// of these is published to the presentation layer, and an empty batch
/// signals "no active preview".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSnapshot {
    /// Identifier of the card under manipulation.
    pub card_id: String,
    /// Candidate geometry for this update tick.
    pub geometry: CardGeometry,
    /// False when the candidate overlaps any other card.
    pub is_valid: bool,
}
