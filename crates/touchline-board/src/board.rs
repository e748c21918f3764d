//! Board engine: the imperative shell over the interaction core.
//!
//! Owns the active screen's cards, the selection, the single gesture slot,
//! and the history stacks. Presentation calls the begin/update/complete
//! operations in response to pointer events; the engine answers with
//! selection, preview, and history notifications on its event bus and
//! persists committed state through the layout store, best-effort.
//!
//! Nothing here returns an error on the interactive path: stale or
//! mismatched gesture input is silently ignored, placement conflicts roll
//! back to the pre-gesture snapshot, and storage failures degrade to
//! defaults.

use std::collections::BTreeMap;

use touchline_core::event_bus::{
    AppEvent, EventBus, HistoryEvent, PreviewEvent, ScreenEvent, SelectionEvent,
};
use touchline_core::constants::PLAYER_TOKEN_SIZE;
use touchline_core::geometry::{CardGeometry, PlayerPosition, PreviewSnapshot};
use touchline_core::layout::LayoutStore;

use crate::card_store::CardStore;
use crate::collision::validate_previews;
use crate::gesture::{CurrentGesture, DragGesture, PlayerDragGesture, ResizeGesture};
use crate::grid::GridMetrics;
use crate::history::{HistoryEntry, HistoryManager};
use crate::model::{Card, ResizeHandle, SelectModifier};
use crate::selection::SelectionManager;

/// Vertical slice of the surface currently shown by the host, used only for
/// visibility culling. Placement correctness never depends on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardViewport {
    pub top: f64,
    pub height: f64,
}

impl Default for BoardViewport {
    fn default() -> Self {
        Self {
            top: 0.0,
            height: f64::INFINITY,
        }
    }
}

/// The card layout interaction engine for one dashboard session.
pub struct BoardEngine {
    metrics: GridMetrics,
    cards: CardStore,
    selection: SelectionManager,
    gesture: CurrentGesture,
    history: HistoryManager,
    store: Box<dyn LayoutStore>,
    events: EventBus,
    active_screen: Option<String>,
    viewport: BoardViewport,
}

impl BoardEngine {
    /// Creates an engine over the given grid and layout store. No screen is
    /// active until [`set_active_screen`](Self::set_active_screen).
    pub fn new(metrics: GridMetrics, store: Box<dyn LayoutStore>) -> Self {
        Self {
            metrics,
            cards: CardStore::new(),
            selection: SelectionManager::new(),
            gesture: CurrentGesture::Idle,
            history: HistoryManager::new(),
            store,
            events: EventBus::new(),
            active_screen: None,
            viewport: BoardViewport::default(),
        }
    }

    /// The engine's notification bus.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Grid metrics of the surface.
    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    /// Identifier of the active screen, if one is set.
    pub fn active_screen(&self) -> Option<&str> {
        self.active_screen.as_deref()
    }

    /// Cards of the active screen, in registration order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Borrows one card by id.
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Currently selected card ids, sorted.
    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.sorted_ids()
    }

    // ------------------------------------------------------------------
    // Screen context
    // ------------------------------------------------------------------

    /// Replaces the tracked card set with a screen's cards.
    ///
    /// Each card arrives at its design-time geometry; stored placements and
    /// player positions overlay it where they exist and still fit the grid.
    /// Any in-flight gesture is abandoned, the selection is cleared, and the
    /// history stacks are dropped.
    pub fn set_active_screen(&mut self, screen_id: &str, cards: Vec<Card>) {
        self.abandon_gesture();

        let had_selection = !self.selection.is_empty();
        self.selection.reset();
        self.cards.clear();

        let card_count = cards.len();
        for mut card in cards {
            if let Some(stored) = self.store.geometry(screen_id, &card.id) {
                if stored.fits(self.metrics.total_columns(), self.metrics.total_rows()) {
                    card.geometry = stored;
                } else {
                    tracing::debug!(
                        "Stored geometry for '{}' no longer fits the grid, using default",
                        card.id
                    );
                }
            }
            if let Some(players) = card.players.as_mut() {
                if let Some(stored) = self.store.player_positions(screen_id, &card.id) {
                    for player in players.iter_mut() {
                        if let Some(position) = stored.get(&player.id) {
                            player.position = position.clamped();
                        }
                    }
                }
            }
            card.selected = false;
            self.cards.insert(card);
        }

        self.active_screen = Some(screen_id.to_string());
        self.history.clear();

        if had_selection {
            self.emit_selection_changed();
        }
        self.emit_history_changed();
        self.events
            .publish(AppEvent::Screen(ScreenEvent::Activated {
                screen_id: screen_id.to_string(),
                card_count,
            }))
            .ok();
    }

    /// Clears the active screen's persisted layout and restores every card
    /// (and formation player) to its design-time position.
    pub fn reset_layout(&mut self) {
        let Some(screen_id) = self.active_screen.clone() else {
            return;
        };
        self.abandon_gesture();

        self.store.reset_screen(&screen_id);
        self.flush_store();

        for card in self.cards.iter_mut() {
            card.geometry = card.default_geometry;
            if let Some(players) = card.players.as_mut() {
                for player in players.iter_mut() {
                    player.position = player.default_position;
                }
            }
        }

        self.history.clear();
        self.emit_history_changed();
        self.events
            .publish(AppEvent::Screen(ScreenEvent::LayoutReset { screen_id }))
            .ok();
    }

    /// Updates the visible slice of the surface.
    pub fn set_viewport(&mut self, top: f64, height: f64) {
        self.viewport = BoardViewport {
            top,
            height: height.max(0.0),
        };
    }

    /// Ids of cards whose pixel extent intersects the viewport, in
    /// registration order.
    pub fn visible_cards(&self) -> Vec<String> {
        self.cards
            .iter()
            .filter(|card| {
                let top = self.metrics.calculate_top(card.geometry.row);
                let height = self.metrics.span_pixels(card.geometry.row_span);
                top < self.viewport.top + self.viewport.height && top + height > self.viewport.top
            })
            .map(|card| card.id.clone())
            .collect()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Applies a selection click.
    pub fn select_card(&mut self, card_id: &str, modifier: SelectModifier) {
        if self.selection.select(&mut self.cards, card_id, modifier) {
            self.emit_selection_changed();
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        if self.selection.clear(&mut self.cards) {
            self.emit_selection_changed();
        }
    }

    /// Selects every card on the screen.
    pub fn select_all(&mut self) {
        if self.selection.select_all(&mut self.cards) {
            self.emit_selection_changed();
        }
    }

    // ------------------------------------------------------------------
    // Drag
    // ------------------------------------------------------------------

    /// Starts a card drag. Dragging an unselected card collapses the
    /// selection to just that card; dragging a selected card moves the
    /// whole selection. Ignored while another gesture is in flight.
    pub fn begin_drag(&mut self, card_id: &str) {
        if !self.gesture.is_idle() || !self.cards.contains(card_id) {
            return;
        }

        if !self.selection.is_selected(card_id)
            && self
                .selection
                .select(&mut self.cards, card_id, SelectModifier::Replace)
        {
            self.emit_selection_changed();
        }

        let origins: BTreeMap<String, CardGeometry> = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| self.cards.get(id).map(|card| (id.clone(), card.geometry)))
            .collect();

        self.gesture = CurrentGesture::Drag(DragGesture::new(card_id, origins));
        self.refresh_drag_preview();
    }

    /// Feeds a pointer delta into the active drag. Only the card that began
    /// the drag may drive updates; anything else is a stale event and is
    /// ignored.
    pub fn update_drag(&mut self, card_id: &str, dx: f64, dy: f64) {
        match &mut self.gesture {
            CurrentGesture::Drag(drag) if drag.controller == card_id => {
                drag.accumulate(dx, dy);
            }
            CurrentGesture::Drag(_) => {
                tracing::debug!("Ignoring drag update from non-controlling card '{}'", card_id);
                return;
            }
            _ => return,
        }
        self.refresh_drag_preview();
    }

    /// Ends the active drag. On cancel, or if the last preview reported a
    /// collision, every participant reverts to its pre-gesture geometry and
    /// no history entry is created. Otherwise the new placements are
    /// persisted and recorded.
    pub fn complete_drag(&mut self, card_id: &str, canceled: bool) {
        let drag = match std::mem::take(&mut self.gesture) {
            CurrentGesture::Drag(drag) => drag,
            other => {
                self.gesture = other;
                return;
            }
        };
        if drag.controller != card_id {
            self.gesture = CurrentGesture::Drag(drag);
            return;
        }

        if canceled || drag.has_collision {
            for (id, origin) in &drag.origins {
                if let Some(card) = self.cards.get_mut(id) {
                    card.geometry = *origin;
                }
            }
        } else {
            let before: Vec<(String, CardGeometry)> = drag
                .origins
                .iter()
                .map(|(id, geometry)| (id.clone(), *geometry))
                .collect();
            let after: Vec<(String, CardGeometry)> = drag
                .origins
                .keys()
                .filter_map(|id| self.cards.get(id).map(|card| (id.clone(), card.geometry)))
                .collect();

            self.persist_geometries(after.iter().map(|(id, _)| id.as_str()));

            let label = if after.len() == 1 {
                format!("Move card '{}'", drag.controller)
            } else {
                format!("Move {} cards", after.len())
            };
            if self.history.commit(HistoryEntry::geometry(label, before, after)) {
                self.emit_history_changed();
            }
        }

        self.emit_preview_cleared();
    }

    fn refresh_drag_preview(&mut self) {
        let candidates = match &self.gesture {
            CurrentGesture::Drag(drag) => drag.candidates(&self.metrics),
            _ => return,
        };

        let (snapshots, has_collision) = validate_previews(&candidates, &self.cards);

        for (id, geometry) in &candidates {
            if let Some(card) = self.cards.get_mut(id) {
                card.geometry = *geometry;
            }
        }
        if let CurrentGesture::Drag(drag) = &mut self.gesture {
            drag.has_collision = has_collision;
        }

        self.emit_preview(snapshots);
    }

    // ------------------------------------------------------------------
    // Resize
    // ------------------------------------------------------------------

    /// Starts a single-card resize from one of the growing handles.
    /// Ignored while another gesture is in flight.
    pub fn begin_resize(&mut self, card_id: &str, handle: ResizeHandle) {
        if !self.gesture.is_idle() {
            return;
        }
        let Some(card) = self.cards.get(card_id) else {
            return;
        };

        self.gesture =
            CurrentGesture::Resize(ResizeGesture::new(card_id, handle, card.geometry));
        self.refresh_resize_preview();
    }

    /// Feeds a pointer delta into the active resize. Updates carrying a
    /// stale handle or a different card are ignored.
    pub fn update_resize(&mut self, card_id: &str, handle: ResizeHandle, dx: f64, dy: f64) {
        match &mut self.gesture {
            CurrentGesture::Resize(resize)
                if resize.card_id == card_id && resize.handle == handle =>
            {
                resize.accumulate(dx, dy);
            }
            CurrentGesture::Resize(_) => {
                tracing::debug!("Ignoring stale resize update for card '{}'", card_id);
                return;
            }
            _ => return,
        }
        self.refresh_resize_preview();
    }

    /// Ends the active resize, reverting on cancel or collision and
    /// persisting plus recording history otherwise.
    pub fn complete_resize(&mut self, card_id: &str, canceled: bool) {
        let resize = match std::mem::take(&mut self.gesture) {
            CurrentGesture::Resize(resize) => resize,
            other => {
                self.gesture = other;
                return;
            }
        };
        if resize.card_id != card_id {
            self.gesture = CurrentGesture::Resize(resize);
            return;
        }

        if canceled || resize.has_collision {
            if let Some(card) = self.cards.get_mut(&resize.card_id) {
                card.geometry = resize.origin;
            }
        } else {
            let after = self
                .cards
                .get(&resize.card_id)
                .map(|card| card.geometry)
                .unwrap_or(resize.origin);

            self.persist_geometries(std::iter::once(resize.card_id.as_str()));

            let entry = HistoryEntry::geometry(
                format!("Resize card '{}'", resize.card_id),
                vec![(resize.card_id.clone(), resize.origin)],
                vec![(resize.card_id.clone(), after)],
            );
            if self.history.commit(entry) {
                self.emit_history_changed();
            }
        }

        self.emit_preview_cleared();
    }

    fn refresh_resize_preview(&mut self) {
        let (card_id, candidate) = match &self.gesture {
            CurrentGesture::Resize(resize) => {
                (resize.card_id.clone(), resize.candidate(&self.metrics))
            }
            _ => return,
        };

        let mut candidates = BTreeMap::new();
        candidates.insert(card_id.clone(), candidate);
        let (snapshots, has_collision) = validate_previews(&candidates, &self.cards);

        if let Some(card) = self.cards.get_mut(&card_id) {
            card.geometry = candidate;
        }
        if let CurrentGesture::Resize(resize) = &mut self.gesture {
            resize.has_collision = has_collision;
        }

        self.emit_preview(snapshots);
    }

    // ------------------------------------------------------------------
    // Formation players
    // ------------------------------------------------------------------

    /// Starts dragging a formation player inside its card. Ignored if the
    /// card is not formation-capable, the player is unknown, or another
    /// gesture is in flight.
    pub fn begin_player_drag(&mut self, card_id: &str, player_id: &str) {
        if !self.gesture.is_idle() {
            return;
        }
        let Some(card) = self.cards.get(card_id) else {
            return;
        };
        let Some(players) = &card.players else {
            return;
        };
        if !players.iter().any(|p| p.id == player_id) {
            return;
        }

        let baseline = players
            .iter()
            .map(|p| (p.id.clone(), p.position))
            .collect();
        self.gesture = CurrentGesture::PlayerDrag(PlayerDragGesture {
            card_id: card_id.to_string(),
            player_id: player_id.to_string(),
            baseline,
        });
    }

    /// Moves the dragged player by a pixel delta, converted into the card's
    /// normalized pitch space and clamped so the token's center cannot push
    /// the token off the pitch edge.
    pub fn update_player_drag(&mut self, card_id: &str, player_id: &str, dx: f64, dy: f64) {
        match &self.gesture {
            CurrentGesture::PlayerDrag(drag)
                if drag.card_id == card_id && drag.player_id == player_id => {}
            _ => return,
        }

        let Some(card) = self.cards.get(card_id) else {
            return;
        };
        let pitch_width = self.metrics.span_pixels(card.geometry.column_span);
        let pitch_height = self.metrics.span_pixels(card.geometry.row_span);

        let (nx, half_x) = normalized_axis_delta(dx, pitch_width);
        let (ny, half_y) = normalized_axis_delta(dy, pitch_height);

        let Some(card) = self.cards.get_mut(card_id) else {
            return;
        };
        let Some(players) = card.players.as_mut() else {
            return;
        };
        if let Some(player) = players.iter_mut().find(|p| p.id == player_id) {
            player.position.x = (player.position.x + nx).clamp(half_x, 1.0 - half_x);
            player.position.y = (player.position.y + ny).clamp(half_y, 1.0 - half_y);
        }
    }

    /// Ends the player drag. Cancel restores the pre-gesture snapshot;
    /// otherwise a net change is persisted and recorded as a players-only
    /// history entry.
    pub fn complete_player_drag(&mut self, card_id: &str, canceled: bool) {
        let drag = match std::mem::take(&mut self.gesture) {
            CurrentGesture::PlayerDrag(drag) => drag,
            other => {
                self.gesture = other;
                return;
            }
        };
        if drag.card_id != card_id {
            self.gesture = CurrentGesture::PlayerDrag(drag);
            return;
        }

        if canceled {
            self.restore_players(&drag.card_id, &drag.baseline);
            return;
        }

        let after: Vec<(String, PlayerPosition)> = self
            .cards
            .get(&drag.card_id)
            .and_then(|card| card.players.as_ref())
            .map(|players| players.iter().map(|p| (p.id.clone(), p.position)).collect())
            .unwrap_or_default();

        if after == drag.baseline {
            return;
        }

        self.persist_players(&drag.card_id);

        let entry = HistoryEntry::players(
            format!("Move player '{}'", drag.player_id),
            &drag.card_id,
            drag.baseline,
            after,
        );
        if self.history.commit(entry) {
            self.emit_history_changed();
        }
    }

    // ------------------------------------------------------------------
    // Nudge
    // ------------------------------------------------------------------

    /// Shifts the whole selection by a fixed cell delta, with the same
    /// validity rules as a drag: each card clamps to the grid on its own,
    /// and any collision makes the nudge a no-op.
    pub fn nudge_selection(&mut self, column_delta: i32, row_delta: i32) {
        if !self.gesture.is_idle() || self.selection.is_empty() {
            return;
        }
        if column_delta == 0 && row_delta == 0 {
            return;
        }

        let candidates: BTreeMap<String, CardGeometry> = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| {
                self.cards.get(id).map(|card| {
                    (
                        id.clone(),
                        self.metrics.clamp_shift(
                            &card.geometry,
                            column_delta as i64,
                            row_delta as i64,
                        ),
                    )
                })
            })
            .collect();

        let (_, has_collision) = validate_previews(&candidates, &self.cards);
        if has_collision {
            return;
        }

        let before: Vec<(String, CardGeometry)> = candidates
            .keys()
            .filter_map(|id| self.cards.get(id).map(|card| (id.clone(), card.geometry)))
            .collect();

        for (id, geometry) in &candidates {
            if let Some(card) = self.cards.get_mut(id) {
                card.geometry = *geometry;
            }
        }
        self.persist_geometries(candidates.keys().map(|id| id.as_str()));

        let after: Vec<(String, CardGeometry)> = candidates
            .iter()
            .map(|(id, geometry)| (id.clone(), *geometry))
            .collect();
        if self
            .history
            .commit(HistoryEntry::geometry("Nudge selection", before, after))
        {
            self.emit_history_changed();
        }
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Whether an undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Label of the change `undo` would revert.
    pub fn undo_label(&self) -> Option<&str> {
        self.history.undo_label()
    }

    /// Label of the change `redo` would re-apply.
    pub fn redo_label(&self) -> Option<&str> {
        self.history.redo_label()
    }

    /// Reverts the most recent committed change. No-op while a gesture is
    /// in flight or when the undo stack is empty.
    pub fn undo(&mut self) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }
        let Some(entry) = self.history.undo() else {
            return false;
        };
        self.apply_history_state(&entry.geometry_before, &entry.players_before);
        self.emit_history_changed();
        true
    }

    /// Re-applies the most recently undone change. No-op while a gesture is
    /// in flight or when the redo stack is empty.
    pub fn redo(&mut self) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }
        let Some(entry) = self.history.redo() else {
            return false;
        };
        self.apply_history_state(&entry.geometry_after, &entry.players_after);
        self.emit_history_changed();
        true
    }

    fn apply_history_state(
        &mut self,
        geometries: &[(String, CardGeometry)],
        players: &[(String, String, PlayerPosition)],
    ) {
        for (card_id, geometry) in geometries {
            if let Some(card) = self.cards.get_mut(card_id) {
                card.geometry = *geometry;
            }
        }
        self.persist_geometries(geometries.iter().map(|(id, _)| id.as_str()));

        let mut touched_cards: Vec<&str> = Vec::new();
        for (card_id, player_id, position) in players {
            if let Some(card) = self.cards.get_mut(card_id) {
                if let Some(card_players) = card.players.as_mut() {
                    if let Some(player) = card_players.iter_mut().find(|p| &p.id == player_id) {
                        player.position = *position;
                    }
                }
            }
            if !touched_cards.contains(&card_id.as_str()) {
                touched_cards.push(card_id.as_str());
            }
        }
        for card_id in touched_cards {
            self.persist_players(card_id);
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn abandon_gesture(&mut self) {
        if self.gesture.is_idle() {
            return;
        }
        // Gesture state dies with the screen switch; committed geometry is
        // whatever the last update applied, which the incoming card set
        // replaces anyway.
        self.gesture = CurrentGesture::Idle;
        self.emit_preview_cleared();
    }

    fn restore_players(&mut self, card_id: &str, baseline: &[(String, PlayerPosition)]) {
        let Some(card) = self.cards.get_mut(card_id) else {
            return;
        };
        let Some(players) = card.players.as_mut() else {
            return;
        };
        for (player_id, position) in baseline {
            if let Some(player) = players.iter_mut().find(|p| &p.id == player_id) {
                player.position = *position;
            }
        }
    }

    fn persist_geometries<'a>(&mut self, card_ids: impl Iterator<Item = &'a str>) {
        let Some(screen_id) = self.active_screen.clone() else {
            return;
        };
        for card_id in card_ids {
            if let Some(card) = self.cards.get(card_id) {
                self.store.set_geometry(&screen_id, card_id, card.geometry);
            }
        }
        self.flush_store();
    }

    fn persist_players(&mut self, card_id: &str) {
        let Some(screen_id) = self.active_screen.clone() else {
            return;
        };
        let Some(positions) = self
            .cards
            .get(card_id)
            .and_then(|card| card.players.as_ref())
            .map(|players| {
                players
                    .iter()
                    .map(|p| (p.id.clone(), p.position))
                    .collect::<BTreeMap<String, PlayerPosition>>()
            })
        else {
            return;
        };
        self.store
            .set_player_positions(&screen_id, card_id, positions);
        self.flush_store();
    }

    fn flush_store(&mut self) {
        // Persistence is best-effort; a failed write must never surface
        // into the interactive path.
        if let Err(err) = self.store.flush() {
            tracing::warn!("Failed to persist layout state: {}", err);
        }
    }

    fn emit_selection_changed(&self) {
        self.events
            .publish(AppEvent::Selection(SelectionEvent::Changed {
                selected: self.selection.sorted_ids(),
            }))
            .ok();
    }

    fn emit_history_changed(&self) {
        self.events
            .publish(AppEvent::History(HistoryEvent::Changed {
                can_undo: self.history.can_undo(),
                can_redo: self.history.can_redo(),
            }))
            .ok();
    }

    fn emit_preview(&self, snapshots: Vec<PreviewSnapshot>) {
        self.events
            .publish(AppEvent::Preview(PreviewEvent::Updated { snapshots }))
            .ok();
    }

    fn emit_preview_cleared(&self) {
        self.events
            .publish(AppEvent::Preview(PreviewEvent::Cleared))
            .ok();
    }
}

impl std::fmt::Debug for BoardEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardEngine")
            .field("active_screen", &self.active_screen)
            .field("cards", &self.cards.len())
            .field("selected", &self.selection.len())
            .field("gesture_idle", &self.gesture.is_idle())
            .finish()
    }
}

/// Converts a pixel delta on one axis into normalized pitch space, together
/// with the half-token clamp margin for that axis. A degenerate pitch or
/// token collapses the margin toward the full `[0, 1]` range; a token wider
/// than its pitch degrades to centering.
fn normalized_axis_delta(pixels: f64, pitch_extent: f64) -> (f64, f64) {
    if pitch_extent <= 0.0 {
        return (0.0, 0.0);
    }
    let delta = pixels / pitch_extent;
    let half_token = (PLAYER_TOKEN_SIZE / 2.0 / pitch_extent).min(0.5);
    (delta, half_token)
}
