//! Transient per-gesture state.
//!
//! Exactly one gesture can be active at a time; the tagged `CurrentGesture`
//! enum makes that invariant structural instead of conventional. Each
//! variant captures the pre-gesture state it needs for candidate
//! computation and for exact rollback.

use std::collections::BTreeMap;

use touchline_core::geometry::{CardGeometry, PlayerPosition};

use crate::grid::GridMetrics;
use crate::model::ResizeHandle;

/// The single active-gesture slot of the board engine.
#[derive(Debug, Clone, Default)]
pub enum CurrentGesture {
    #[default]
    Idle,
    Drag(DragGesture),
    Resize(ResizeGesture),
    PlayerDrag(PlayerDragGesture),
}

impl CurrentGesture {
    /// Whether no gesture is in flight.
    pub fn is_idle(&self) -> bool {
        matches!(self, CurrentGesture::Idle)
    }
}

/// A card drag in flight. Moves the whole selection as a rigid block,
/// driven by the card the gesture started on.
#[derive(Debug, Clone)]
pub struct DragGesture {
    /// The card whose updates drive the gesture; updates reported for any
    /// other participant are ignored.
    pub controller: String,
    /// Pre-gesture geometry of every participating card.
    pub origins: BTreeMap<String, CardGeometry>,
    /// Accumulated pointer delta since the gesture began, in pixels.
    pub acc_dx: f64,
    pub acc_dy: f64,
    /// Collision verdict of the most recent preview.
    pub has_collision: bool,
}

impl DragGesture {
    pub fn new(controller: impl Into<String>, origins: BTreeMap<String, CardGeometry>) -> Self {
        Self {
            controller: controller.into(),
            origins,
            acc_dx: 0.0,
            acc_dy: 0.0,
            has_collision: false,
        }
    }

    /// Adds a pointer movement to the accumulated delta.
    pub fn accumulate(&mut self, dx: f64, dy: f64) {
        self.acc_dx += dx;
        self.acc_dy += dy;
    }

    /// Candidate geometry for every participant at the current accumulated
    /// delta.
    ///
    /// The controller's accumulated pixel position snaps to a cell; the
    /// resulting cell delta is applied to every participant's origin,
    /// re-clamped per card so a card pinned at a grid edge stops while the
    /// rest of the block keeps moving.
    pub fn candidates(&self, metrics: &GridMetrics) -> BTreeMap<String, CardGeometry> {
        let Some(controller_origin) = self.origins.get(&self.controller) else {
            return BTreeMap::new();
        };

        let pixel_x = metrics.calculate_left(controller_origin.column) + self.acc_dx;
        let pixel_y = metrics.calculate_top(controller_origin.row) + self.acc_dy;
        let column = metrics.snap_column(pixel_x, controller_origin.column_span);
        let row = metrics.snap_row(pixel_y, controller_origin.row_span);

        let column_delta = column as i64 - controller_origin.column as i64;
        let row_delta = row as i64 - controller_origin.row as i64;

        self.origins
            .iter()
            .map(|(id, origin)| {
                (
                    id.clone(),
                    metrics.clamp_shift(origin, column_delta, row_delta),
                )
            })
            .collect()
    }
}

/// A single-card resize in flight.
#[derive(Debug, Clone)]
pub struct ResizeGesture {
    pub card_id: String,
    pub handle: ResizeHandle,
    /// Pre-gesture geometry, also the rollback target.
    pub origin: CardGeometry,
    pub acc_dx: f64,
    pub acc_dy: f64,
    pub has_collision: bool,
}

impl ResizeGesture {
    pub fn new(card_id: impl Into<String>, handle: ResizeHandle, origin: CardGeometry) -> Self {
        Self {
            card_id: card_id.into(),
            handle,
            origin,
            acc_dx: 0.0,
            acc_dy: 0.0,
            has_collision: false,
        }
    }

    /// Adds a pointer movement to the accumulated delta.
    pub fn accumulate(&mut self, dx: f64, dy: f64) {
        self.acc_dx += dx;
        self.acc_dy += dy;
    }

    /// Candidate geometry at the current accumulated delta: span deltas in
    /// whole cells, applied only to the axes the handle resizes, clamped so
    /// the card neither vanishes nor crosses the grid edge.
    pub fn candidate(&self, metrics: &GridMetrics) -> CardGeometry {
        let mut geometry = self.origin;

        if self.handle.resizes_columns() {
            let delta = metrics.cells_for_delta(self.acc_dx);
            let max_span = metrics.total_columns().saturating_sub(self.origin.column) as i64;
            geometry.column_span =
                (self.origin.column_span as i64 + delta).clamp(1, max_span.max(1)) as u32;
        }
        if self.handle.resizes_rows() {
            let delta = metrics.cells_for_delta(self.acc_dy);
            let max_span = metrics.total_rows().saturating_sub(self.origin.row) as i64;
            geometry.row_span =
                (self.origin.row_span as i64 + delta).clamp(1, max_span.max(1)) as u32;
        }

        geometry
    }
}

/// A formation-player drag in flight, scoped to one card's local pitch.
#[derive(Debug, Clone)]
pub struct PlayerDragGesture {
    pub card_id: String,
    pub player_id: String,
    /// Positions of every player on the card when the gesture began, in
    /// the card's player order. Rollback target and history baseline.
    pub baseline: Vec<(String, PlayerPosition)>,
}
